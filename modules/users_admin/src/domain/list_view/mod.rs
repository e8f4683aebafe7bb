//! Searchable, category-filterable, paginated view over the user collection.

pub mod controller;
pub mod debounce;
pub mod filter;
pub mod view;
pub mod window;

pub use controller::{DeleteOutcome, UsersListController};
pub use view::{ActiveFilter, ListView, ListViewOptions, PageView, RequestToken};
pub use window::{PageEvent, PageWindow};

use crate::contract::error::Fault;

#[derive(Debug, thiserror::Error)]
pub enum ListViewError {
    #[error("page size {size} is not one of {options:?}")]
    UnsupportedPageSize { size: usize, options: Vec<usize> },

    #[error(transparent)]
    Fault(#[from] Fault),
}
