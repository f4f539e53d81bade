use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("pageSize must be at least 1, got {0}")]
    InvalidPageSize(i64),
}
