//! Spatial network filtering, isolation mode and entity ranking.

pub mod entities;
pub mod filter;
pub mod isolation;

pub use filter::{SpatialFilterParams, apply_spatial_filters, network_countries};
pub use isolation::IsolationMode;
