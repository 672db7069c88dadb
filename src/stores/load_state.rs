use log::{error, info};

use crate::data::DataError;

/// Lifecycle of one resource load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
	/// Nothing requested yet.
	#[default]
	Idle,
	/// A fetch is in flight.
	Loading,
	/// Last load succeeded.
	Loaded,
	/// User-facing message.
	Failed(String),
}

impl LoadState {
	/// Enter `Loading`. Refused while a load is already in flight.
	pub fn begin(&mut self) -> bool {
		if self.is_loading() {
			return false;
		}
		*self = Self::Loading;
		true
	}

	/// Mark the load done.
	pub fn succeed(&mut self, what: &str) {
		info!("{} loaded", what);
		*self = Self::Loaded;
	}

	/// Store the user-facing message of `err`.
	pub fn fail(&mut self, what: &str, err: &DataError) {
		error!("Failed to load {}: {}", what, err);
		*self = Self::Failed(err.user_message());
	}

	pub fn is_loading(&self) -> bool {
		matches!(self, Self::Loading)
	}

	pub fn is_loaded(&self) -> bool {
		matches!(self, Self::Loaded)
	}

	/// Message of a failed load.
	pub fn error(&self) -> Option<&str> {
		match self {
			Self::Failed(message) => Some(message),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn second_begin_is_refused_while_loading() {
		let mut state = LoadState::default();
		assert!(state.begin());
		assert!(!state.begin());
		state.succeed("articles");
		assert!(state.is_loaded());
		assert!(state.begin());
	}

	#[test]
	fn failure_stores_message_and_clears_loading() {
		let mut state = LoadState::default();
		state.begin();
		state.fail(
			"spatial network",
			&DataError::NotFound {
				path: "data/networks/spatial.json".into(),
			},
		);
		assert!(!state.is_loading());
		assert!(state.error().unwrap().contains("spatial.json"));
		assert!(state.begin());
	}
}
