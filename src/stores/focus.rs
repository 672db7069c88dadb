use std::sync::Arc;

use log::{debug, info};

use crate::data::{CountryFocusCounts, DataError, FocusLevel};

use super::load_state::LoadState;

/// Division counts of the country picked in the focus panel.
#[derive(Clone, Debug, Default)]
pub struct CountryFocusStore {
	country: Option<String>,
	level: FocusLevel,
	counts: Option<Arc<CountryFocusCounts>>,
	load: LoadState,
}

impl CountryFocusStore {
	/// Selected country.
	pub fn country(&self) -> Option<&str> {
		self.country.as_deref()
	}

	/// Selected level.
	pub fn level(&self) -> FocusLevel {
		self.level
	}

	/// `None` before a load, or when the country publishes no counts.
	pub fn counts(&self) -> Option<&Arc<CountryFocusCounts>> {
		self.counts.as_ref()
	}

	pub fn load_state(&self) -> &LoadState {
		&self.load
	}

	/// Change the selection. Returns the request to load, if any.
	pub fn select(&mut self, country: Option<String>, level: FocusLevel) -> Option<(String, FocusLevel)> {
		if self.country == country && self.level == level {
			return None;
		}
		self.country = country;
		self.level = level;
		self.counts = None;
		self.load = LoadState::Idle;
		self.country.clone().map(|c| (c, level))
	}

	/// Refused while a load is in flight.
	pub fn begin_load(&mut self) -> bool {
		self.load.begin()
	}

	/// Install a result for `request`. Results for a selection that has
	/// since changed are dropped.
	pub fn finish_load(
		&mut self,
		request: &(String, FocusLevel),
		result: Result<Option<CountryFocusCounts>, DataError>,
	) {
		if self.country.as_deref() != Some(request.0.as_str()) || self.level != request.1 {
			debug!("Dropping stale {} counts for {}", request.1, request.0);
			return;
		}
		match result {
			Ok(counts) => {
				if counts.is_none() {
					info!("No {} counts for {}", request.1, request.0);
				}
				self.counts = counts.map(Arc::new);
				self.load.succeed("country focus counts");
			}
			Err(err) => self.load.fail("country focus counts", &err),
		}
	}
}
