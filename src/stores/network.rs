use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, info};

use crate::config::DEFAULT_WEIGHT_MIN;
use crate::data::{DataError, EntityNetworkData, SpatialNetworkData, ValidationReport};
use crate::network::{IsolationMode, SpatialFilterParams, apply_spatial_filters, network_countries};

use super::load_state::LoadState;

/// Spatial network state: raw data, filter axes, isolation overlay and the
/// filtered view. Every mutation rebuilds the view from the raw data.
#[derive(Clone, Debug)]
pub struct SpatialNetworkStore {
	raw: Option<Arc<SpatialNetworkData>>,
	report: ValidationReport,
	params: SpatialFilterParams,
	default_weight_min: u32,
	isolation: IsolationMode,
	selected_node: Option<String>,
	filtered: Arc<SpatialNetworkData>,
	load: LoadState,
	revision: u64,
}

impl Default for SpatialNetworkStore {
	fn default() -> Self {
		Self::new(DEFAULT_WEIGHT_MIN)
	}
}

impl SpatialNetworkStore {
	/// Empty store with the given reset threshold.
	pub fn new(default_weight_min: u32) -> Self {
		Self {
			raw: None,
			report: ValidationReport::default(),
			params: SpatialFilterParams {
				visible_countries: BTreeSet::new(),
				weight_min: default_weight_min,
				show_isolated_nodes: false,
			},
			default_weight_min,
			isolation: IsolationMode::Off,
			selected_node: None,
			filtered: Arc::default(),
			load: LoadState::Idle,
			revision: 0,
		}
	}

	/// The network as loaded.
	pub fn raw(&self) -> Option<&Arc<SpatialNetworkData>> {
		self.raw.as_ref()
	}

	/// The network after the filter axes. Empty before a load.
	pub fn filtered(&self) -> &Arc<SpatialNetworkData> {
		&self.filtered
	}

	/// Warnings found while parsing.
	pub fn report(&self) -> &ValidationReport {
		&self.report
	}

	/// Current filter axes.
	pub fn params(&self) -> &SpatialFilterParams {
		&self.params
	}

	/// Isolation overlay.
	pub fn isolation(&self) -> &IsolationMode {
		&self.isolation
	}

	pub fn selected_node(&self) -> Option<&str> {
		self.selected_node.as_deref()
	}

	/// Nodes highlighted by isolation mode.
	pub fn highlighted(&self) -> Option<&BTreeSet<String>> {
		self.isolation.highlighted()
	}

	pub fn load_state(&self) -> &LoadState {
		&self.load
	}

	/// Bumped by every mutation.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Every country present in the raw network.
	pub fn all_countries(&self) -> BTreeSet<String> {
		self.raw.as_deref().map(network_countries).unwrap_or_default()
	}

	/// Upper end of the threshold control: the heaviest raw edge, or the
	/// current threshold when that is higher.
	pub fn weight_ceiling(&self) -> u32 {
		let heaviest = self
			.raw
			.as_deref()
			.and_then(|raw| raw.edges.iter().map(|e| e.weight).max())
			.unwrap_or(1);
		heaviest.max(self.params.weight_min)
	}

	/// Returns false when a load is already in flight.
	pub fn begin_load(&mut self) -> bool {
		self.load.begin()
	}

	/// Install a load result; on error the previous network stays.
	pub fn finish_load(&mut self, result: Result<(SpatialNetworkData, ValidationReport), DataError>) {
		match result {
			Ok((data, report)) => {
				self.set_raw(data, report);
				self.load.succeed("spatial network");
			}
			Err(err) => self.load.fail("spatial network", &err),
		}
	}

	/// Install a freshly loaded network with the initial filter state.
	pub fn set_raw(&mut self, data: SpatialNetworkData, report: ValidationReport) {
		self.raw = Some(Arc::new(data));
		self.report = report;
		self.reset_state();
		self.recompute();
	}

	/// Replace the visible country set.
	pub fn set_visible_countries(&mut self, countries: BTreeSet<String>) {
		self.params.visible_countries = countries;
		self.recompute();
	}

	/// Show or hide one country's nodes.
	pub fn toggle_country(&mut self, country: &str) {
		let mut countries = self.params.visible_countries.clone();
		if !countries.remove(country) {
			countries.insert(country.to_string());
		}
		self.set_visible_countries(countries);
	}

	/// Change the edge threshold.
	pub fn set_weight_min(&mut self, weight_min: u32) {
		self.params.weight_min = weight_min;
		self.recompute();
	}

	/// Show or hide edgeless nodes.
	pub fn set_show_isolated_nodes(&mut self, show: bool) {
		self.params.show_isolated_nodes = show;
		self.recompute();
	}

	/// Isolation on/off switch for `node_id`; another node switches target.
	pub fn toggle_isolation(&mut self, node_id: &str) {
		let edges = self.raw.as_deref().map(|r| r.edges.as_slice()).unwrap_or_default();
		self.isolation.toggle(node_id, edges);
		debug!("Isolation target: {:?}", self.isolation.target());
		self.revision += 1;
	}

	/// Leave isolation mode.
	pub fn disable_isolation(&mut self) {
		if self.isolation.is_active() {
			self.isolation.disable();
			self.revision += 1;
		}
	}

	/// Node picked on the map. Independent of isolation.
	pub fn select_node(&mut self, node_id: Option<String>) {
		if self.selected_node != node_id {
			self.selected_node = node_id;
			self.revision += 1;
		}
	}

	/// Back to defaults with every country visible, then one recompute.
	pub fn reset(&mut self) {
		self.reset_state();
		self.recompute();
		info!("Spatial network filters reset");
	}

	fn reset_state(&mut self) {
		self.params = SpatialFilterParams {
			visible_countries: self.all_countries(),
			weight_min: self.default_weight_min,
			show_isolated_nodes: false,
		};
		self.isolation = IsolationMode::Off;
		self.selected_node = None;
	}

	fn recompute(&mut self) {
		self.filtered = match &self.raw {
			Some(raw) => Arc::new(apply_spatial_filters(raw, &self.params)),
			None => Arc::default(),
		};
		self.revision += 1;
		debug!(
			"Spatial network r{}: {} nodes, {} edges",
			self.revision, self.filtered.meta.total_nodes, self.filtered.meta.total_edges
		);
	}
}

/// The optional entity network and the type shown in the entity view.
#[derive(Clone, Debug, Default)]
pub struct EntityNetworkStore {
	data: Option<Arc<EntityNetworkData>>,
	kind: Option<String>,
	load: LoadState,
}

impl EntityNetworkStore {
	/// The entity network, when published.
	pub fn data(&self) -> Option<&Arc<EntityNetworkData>> {
		self.data.as_ref()
	}

	/// Entity type shown, or all.
	pub fn kind(&self) -> Option<&str> {
		self.kind.as_deref()
	}

	/// `None` shows every type.
	pub fn set_kind(&mut self, kind: Option<String>) {
		self.kind = kind;
	}

	pub fn load_state(&self) -> &LoadState {
		&self.load
	}

	pub fn begin_load(&mut self) -> bool {
		self.load.begin()
	}

	/// A missing file (`Ok(None)`) is not an error.
	pub fn finish_load(&mut self, result: Result<Option<EntityNetworkData>, DataError>) {
		match result {
			Ok(data) => {
				if data.is_none() {
					info!("No entity network published");
				}
				self.data = data.map(Arc::new);
				self.load.succeed("entity network");
			}
			Err(err) => self.load.fail("entity network", &err),
		}
	}
}
