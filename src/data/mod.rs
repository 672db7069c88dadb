//! Static inputs: schemas, validation, processing and browser loading.

mod error;
mod fetch;
pub mod focus;
pub mod geo;
mod item;
pub mod loader;
pub mod network;
pub mod places;
pub mod process;
pub mod schema;

pub use error::DataError;
pub use focus::{CountryFocusCounts, FocusLevel};
pub use item::{ProcessedItem, TemporalData, month_key, parse_publish_date};
pub use loader::ArticleDataset;
pub use network::{
	Bounds, EntityNetworkData, EntityNode, NetworkEdge, NetworkMeta, SpatialNetworkData,
	SpatialNetworkEdge, SpatialNetworkNode, ValidationReport,
};
