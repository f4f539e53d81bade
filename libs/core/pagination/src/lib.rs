//! Offset pagination shared by every list endpoint.
//!
//! A request's `pageNumber`/`pageSize` arrive as a [`PageQuery`], are normalized
//! against the [`PaginationConfig`] into [`PageParams`], drive a repository query
//! that yields a [`PagedList`], and leave the handler as a [`PaginatedJson`]:
//! the items as the JSON body and [`PaginationMetadata`] in the `X-Pagination`
//! header.
//!
//! [`NameFilter`] is the optional `nome` filter both catalog resources accept.

mod config;
mod error;
mod filter;
mod metadata;
mod paged;
mod params;
mod response;

pub use config::PaginationConfig;
pub use error::PaginationError;
pub use filter::NameFilter;
pub use metadata::{PaginationMetadata, X_PAGINATION};
pub use paged::{PagedList, paginate};
pub use params::{PageParams, PageQuery};
pub use response::PaginatedJson;
