//! Paginated list state kept in sync with a remote list endpoint.

pub mod controller;
pub mod filters;

pub use controller::{FetchOutcome, FetchTicket, ListController};
pub use filters::{FilterField, FilterSet};
