use serde::Deserialize;
use std::fmt;
use utoipa::IntoParams;

use crate::{PaginationConfig, PaginationError};

/// Raw paging parameters as they arrive in the query string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page index; values below 1 are treated as 1
    #[param(example = 1)]
    pub page_number: Option<i64>,
    /// Items per page; clamped to the server maximum (50 by default)
    #[param(example = 10)]
    pub page_size: Option<i64>,
}

impl PageQuery {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
        }
    }

    /// Apply defaults and bounds.
    ///
    /// A page number below 1 is coerced to 1 and a page size above the maximum is
    /// clamped; only a page size below 1 is rejected.
    pub fn normalize(&self, config: &PaginationConfig) -> Result<PageParams, PaginationError> {
        let page_number = self.page_number.unwrap_or(1).max(1) as u64;
        let page_size = match self.page_size {
            None => config.default_page_size,
            Some(size) if size < 1 => return Err(PaginationError::InvalidPageSize(size)),
            Some(size) => (size as u64).min(config.max_page_size),
        };

        Ok(PageParams {
            page_number,
            page_size,
        })
    }
}

/// Validated paging window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageParams {
    pub page_number: u64,
    pub page_size: u64,
}

impl PageParams {
    /// Rows to skip before the first item of this page, capped at `i64::MAX` so it
    /// always fits a SQL `OFFSET` bind
    pub fn offset(&self) -> u64 {
        (self.page_number - 1)
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// Stable textual form, used in cache keys
impl fmt::Display for PageParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page={}&size={}", self.page_number, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(query: PageQuery) -> Result<PageParams, PaginationError> {
        query.normalize(&PaginationConfig::default())
    }

    #[test]
    fn test_missing_values_use_defaults() {
        let params = normalize(PageQuery::default()).unwrap();
        assert_eq!(params.page_number, 1);
        assert_eq!(params.page_size, 10);
    }

    #[test]
    fn test_page_size_is_clamped_to_max() {
        let params = normalize(PageQuery::new(2, 500)).unwrap();
        assert_eq!(params.page_size, 50);
        assert_eq!(params.page_number, 2);
    }

    #[test]
    fn test_page_number_below_one_is_coerced() {
        assert_eq!(normalize(PageQuery::new(0, 5)).unwrap().page_number, 1);
        assert_eq!(normalize(PageQuery::new(-3, 5)).unwrap().page_number, 1);
    }

    #[test]
    fn test_page_size_below_one_is_rejected() {
        assert_eq!(
            normalize(PageQuery::new(1, 0)),
            Err(PaginationError::InvalidPageSize(0))
        );
        assert_eq!(
            normalize(PageQuery::new(1, -7)),
            Err(PaginationError::InvalidPageSize(-7))
        );
    }

    #[test]
    fn test_offset_and_limit() {
        let params = normalize(PageQuery::new(3, 20)).unwrap();
        assert_eq!(params.offset(), 40);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn test_huge_page_number_offset_fits_i64() {
        let params = normalize(PageQuery::new(i64::MAX, 50)).unwrap();
        assert_eq!(params.offset(), i64::MAX as u64);
        assert!(i64::try_from(params.offset()).is_ok());
    }

    #[test]
    fn test_display_is_stable() {
        let params = normalize(PageQuery::new(4, 12)).unwrap();
        assert_eq!(params.to_string(), "page=4&size=12");
    }

    #[test]
    fn test_deserializes_camel_case_query() {
        let query: PageQuery =
            serde_json::from_value(serde_json::json!({"pageNumber": 2, "pageSize": 30})).unwrap();
        assert_eq!(query, PageQuery::new(2, 30));
    }
}
