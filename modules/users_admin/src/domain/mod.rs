pub mod dashboard;
pub mod dialog;
pub mod fault;
pub mod form;
pub mod list_view;
pub mod notify;
pub mod stats;
