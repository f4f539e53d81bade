use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response header carrying [`PaginationMetadata`] as JSON
pub const X_PAGINATION: &str = "x-pagination";

/// Paging summary sent alongside a page of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_count: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_camel_case_names() {
        let metadata = PaginationMetadata {
            total_count: 7,
            page_size: 3,
            current_page: 1,
            total_pages: 3,
            has_next: true,
            has_previous: false,
        };

        let json = serde_json::to_value(metadata).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalCount": 7,
                "pageSize": 3,
                "currentPage": 1,
                "totalPages": 3,
                "hasNext": true,
                "hasPrevious": false
            })
        );
    }
}
