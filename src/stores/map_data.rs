use std::sync::Arc;

use crate::data::{ArticleDataset, DataError, ProcessedItem, TemporalData};

use super::load_state::LoadState;

/// Owns the processed article dataset for the session.
#[derive(Clone, Debug, Default)]
pub struct MapDataStore {
	dataset: Arc<ArticleDataset>,
	load: LoadState,
	revision: u64,
}

impl MapDataStore {
	/// Processed articles of the last successful load.
	pub fn items(&self) -> &[ProcessedItem] {
		&self.dataset.items
	}

	/// Month buckets of the items.
	pub fn temporal(&self) -> &[TemporalData] {
		&self.dataset.temporal
	}

	/// Whole dataset, including map layers.
	pub fn dataset(&self) -> &Arc<ArticleDataset> {
		&self.dataset
	}

	pub fn load_state(&self) -> &LoadState {
		&self.load
	}

	/// Bumped whenever the dataset is replaced.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Returns false when a load is already in flight.
	pub fn begin_load(&mut self) -> bool {
		self.load.begin()
	}

	/// Install the result of a load. On error the previous dataset stays.
	pub fn finish_load(&mut self, result: Result<ArticleDataset, DataError>) {
		match result {
			Ok(dataset) => {
				self.dataset = Arc::new(dataset);
				self.revision += 1;
				self.load.succeed("article dataset");
			}
			Err(err) => self.load.fail("article dataset", &err),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn successful_load_replaces_dataset() {
		let mut store = MapDataStore::default();
		assert!(store.begin_load());
		assert!(!store.begin_load());
		store.finish_load(Ok(ArticleDataset {
			items: vec![ProcessedItem::default()],
			..Default::default()
		}));
		assert_eq!(store.items().len(), 1);
		assert_eq!(store.revision(), 1);
		assert!(store.load_state().is_loaded());
	}

	#[test]
	fn failed_load_keeps_dataset_unset() {
		let mut store = MapDataStore::default();
		store.begin_load();
		store.finish_load(Err(DataError::Load {
			path: "data/articles.json".into(),
			detail: "HTTP 500".into(),
		}));
		assert!(store.items().is_empty());
		assert_eq!(store.revision(), 0);
		assert!(store.load_state().error().is_some());
	}
}
