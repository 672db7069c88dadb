use std::sync::Arc;

use crate::data::ProcessedItem;
use crate::derive::{DateRange, Statistics, compute_statistics, time_window, visible_items_within};

use super::filters::FilterStore;
use super::map_data::MapDataStore;
use super::time::TimeStore;

/// Revisions of the stores a view was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewStamp {
	/// Revision of the map data store.
	pub items: u64,
	/// Revision of the time store.
	pub time: u64,
	/// Revision of the filter store.
	pub filters: u64,
	/// Window half-width the view was derived with.
	pub window_months: u32,
}

/// Visible items and their statistics for one combination of store revisions.
#[derive(Clone, Debug)]
pub struct DerivedView {
	/// Store revisions this view was derived from.
	pub stamp: ViewStamp,
	/// Time window around the current date.
	pub window: Option<DateRange>,
	/// Visible items.
	pub items: Arc<Vec<ProcessedItem>>,
	/// Statistics of `items`.
	pub stats: Arc<Statistics>,
}

impl PartialEq for DerivedView {
	fn eq(&self, other: &Self) -> bool {
		self.stamp == other.stamp && Arc::ptr_eq(&self.items, &other.items)
	}
}

impl DerivedView {
	/// Derive from scratch.
	pub fn derive(map: &MapDataStore, time: &TimeStore, filters: &FilterStore, window_months: u32) -> Self {
		let window = time.current_date().map(|d| time_window(d, window_months));
		let items = match &window {
			Some(window) => visible_items_within(map.items(), window, filters.selected()),
			None => Vec::new(),
		};
		let stats = compute_statistics(&items);
		Self {
			stamp: stamp_of(map, time, filters, window_months),
			window,
			items: Arc::new(items),
			stats: Arc::new(stats),
		}
	}

	/// Reuse `previous` when none of the inputs changed since it was derived.
	pub fn refresh(
		previous: Option<&DerivedView>,
		map: &MapDataStore,
		time: &TimeStore,
		filters: &FilterStore,
		window_months: u32,
	) -> Self {
		match previous {
			Some(prev) if prev.stamp == stamp_of(map, time, filters, window_months) => prev.clone(),
			_ => Self::derive(map, time, filters, window_months),
		}
	}
}

fn stamp_of(map: &MapDataStore, time: &TimeStore, filters: &FilterStore, window_months: u32) -> ViewStamp {
	ViewStamp {
		items: map.revision(),
		time: time.revision(),
		filters: filters.revision(),
		window_months,
	}
}
