//! Session state. Each store owns its data, changes only through its own
//! setters, and counts its revisions so derived values can tell when to
//! recompute.

mod filters;
mod focus;
mod load_state;
mod map_data;
mod network;
mod time;
mod view;

pub use filters::FilterStore;
pub use focus::CountryFocusStore;
pub use load_state::LoadState;
pub use map_data::MapDataStore;
pub use network::{EntityNetworkStore, SpatialNetworkStore};
pub use time::TimeStore;
pub use view::{DerivedView, ViewStamp};
