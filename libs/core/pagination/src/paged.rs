use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::{PageParams, PaginationMetadata};

/// One page of a filtered, ordered collection together with its position.
///
/// Serializable so cached pages round-trip through the response cache unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> PagedList<T> {
    /// Wrap an already sliced page; `total_count` counts the whole filtered collection
    pub fn new(items: Vec<T>, total_count: u64, params: PageParams) -> Self {
        Self {
            items,
            current_page: params.page_number,
            page_size: params.page_size,
            total_count,
            total_pages: total_count.div_ceil(params.page_size),
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn metadata(&self) -> PaginationMetadata {
        PaginationMetadata {
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
            has_next: self.has_next(),
            has_previous: self.has_previous(),
        }
    }

    /// Convert the items while keeping the paging position
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedList<U> {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

/// Filter, order and slice an in-memory collection.
///
/// Pages past the end yield no items but still report the real totals.
pub fn paginate<T, F, C>(
    source: impl IntoIterator<Item = T>,
    keep: F,
    order: C,
    params: PageParams,
) -> PagedList<T>
where
    F: FnMut(&T) -> bool,
    C: FnMut(&T, &T) -> Ordering,
{
    let mut matching: Vec<T> = source.into_iter().filter(keep).collect();
    matching.sort_by(order);

    let total_count = matching.len() as u64;
    let items = matching
        .into_iter()
        .skip(params.offset() as usize)
        .take(params.limit() as usize)
        .collect();

    PagedList::new(items, total_count, params)
}
