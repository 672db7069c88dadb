//! Pure derivations of the article views.

pub mod filters;
pub mod stats;
pub mod visible;

pub use filters::{AvailableFilters, DateRange, FilterSelection};
pub use stats::{MonthCount, Statistics, compute_statistics};
pub use visible::{time_window, visible_items, visible_items_within};
