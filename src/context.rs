//! Leptos signals around the stores, the derived view memo and the load
//! actions. Components reach everything through [`Dashboard`].

use std::time::Duration;

use leptos::leptos_dom::helpers::set_interval_with_handle;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::config::DashboardConfig;
use crate::data::FocusLevel;
use crate::data::loader::{
	load_article_dataset, load_country_focus, load_entity_network, load_spatial_network,
};
use crate::derive::AvailableFilters;
use crate::stores::{
	CountryFocusStore, DerivedView, EntityNetworkStore, FilterStore, MapDataStore, SpatialNetworkStore,
	TimeStore,
};

/// Handles to every piece of session state.
#[derive(Clone, Copy)]
pub struct Dashboard {
	pub config: StoredValue<DashboardConfig>,
	pub map: RwSignal<MapDataStore>,
	pub time: RwSignal<TimeStore>,
	pub filters: RwSignal<FilterStore>,
	pub network: RwSignal<SpatialNetworkStore>,
	pub entities: RwSignal<EntityNetworkStore>,
	pub focus: RwSignal<CountryFocusStore>,
	pub view: Memo<DerivedView>,
}

impl Dashboard {
	fn new(config: DashboardConfig) -> Self {
		let network = RwSignal::new(SpatialNetworkStore::new(config.default_weight_min));
		let window_months = config.window_months;
		let config = StoredValue::new(config);
		let map = RwSignal::new(MapDataStore::default());
		let time = RwSignal::new(TimeStore::default());
		let filters = RwSignal::new(FilterStore::default());

		// Memo already skips unchanged output; the stamp check skips the work.
		let view = Memo::new(move |previous: Option<&DerivedView>| {
			map.with(|m| {
				time.with(|t| filters.with(|f| DerivedView::refresh(previous, m, t, f, window_months)))
			})
		});

		Self {
			config,
			map,
			time,
			filters,
			network,
			entities: RwSignal::new(EntityNetworkStore::default()),
			focus: RwSignal::new(CountryFocusStore::default()),
			view,
		}
	}

	/// Fetch articles and map layers, then reset the filter domains and the
	/// timeline to the new dataset.
	pub fn load_articles(self) {
		if !self.map.try_update(|m| m.begin_load()).unwrap_or(false) {
			warn!("Article load already in progress");
			return;
		}
		let config = self.config.get_value();
		spawn_local(async move {
			let result = load_article_dataset(&config).await;
			let loaded = result.is_ok();
			self.map.update(|m| m.finish_load(result));
			if !loaded {
				return;
			}
			let available = self.map.with_untracked(|m| AvailableFilters::from_items(m.items()));
			let (min, max) = (available.min_date, available.max_date);
			self.filters.update(|f| f.set_available(available));
			self.time.update(|t| t.set_bounds(min, max));
			info!("Timeline spans {:?} to {:?}", min, max);
		});
	}

	pub fn load_network(self) {
		if !self.network.try_update(|n| n.begin_load()).unwrap_or(false) {
			warn!("Spatial network load already in progress");
			return;
		}
		let config = self.config.get_value();
		spawn_local(async move {
			let result = load_spatial_network(&config).await;
			self.network.update(|n| n.finish_load(result));
		});
	}

	pub fn load_entities(self) {
		if !self.entities.try_update(|e| e.begin_load()).unwrap_or(false) {
			return;
		}
		let config = self.config.get_value();
		spawn_local(async move {
			let result = load_entity_network(&config).await;
			self.entities.update(|e| e.finish_load(result));
		});
	}

	/// Pick the focus country and level, fetching their counts when the
	/// selection changed.
	pub fn focus_country(self, country: Option<String>, level: FocusLevel) {
		let Some(request) = self.focus.try_update(|f| f.select(country, level)).flatten() else {
			return;
		};
		if !self.focus.try_update(|f| f.begin_load()).unwrap_or(false) {
			warn!("Country focus load already in progress");
			return;
		}
		let config = self.config.get_value();
		spawn_local(async move {
			let result = load_country_focus(&config, &request.0, request.1).await;
			self.focus.update(|f| f.finish_load(&request, result));
		});
	}

	pub fn load_all(self) {
		self.load_articles();
		self.load_network();
		self.load_entities();
	}

	/// Advance the timeline on a fixed tick while playback is on.
	fn start_playback_clock(self) {
		let interval = Duration::from_millis(self.config.with_value(|c| c.playback_interval_ms));
		let time = self.time;
		let tick = move || {
			if time.with_untracked(|t| t.is_playing()) {
				time.update(|t| t.advance());
			}
		};
		match set_interval_with_handle(tick, interval) {
			Ok(handle) => on_cleanup(move || handle.clear()),
			Err(err) => warn!("Playback clock unavailable: {:?}", err),
		}
	}
}

/// Build the session state from the page URL, provide it and start loading.
pub fn provide_dashboard() -> Dashboard {
	let dashboard = Dashboard::new(DashboardConfig::from_location());
	provide_context(dashboard);
	dashboard.start_playback_clock();
	dashboard.load_all();
	dashboard
}

pub fn use_dashboard() -> Dashboard {
	expect_context::<Dashboard>()
}
