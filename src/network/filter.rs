//! The spatial network filter.

use std::collections::{BTreeSet, HashSet};

use crate::config::DEFAULT_WEIGHT_MIN;
use crate::data::{NetworkMeta, SpatialNetworkData, SpatialNetworkNode};

/// The three independent filter axes of the spatial network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpatialFilterParams {
	/// Countries whose nodes are kept. Nodes without a country always are.
	pub visible_countries: BTreeSet<String>,
	/// Edges lighter than this are dropped.
	pub weight_min: u32,
	/// Keep nodes that lost all their edges.
	pub show_isolated_nodes: bool,
}

impl SpatialFilterParams {
	/// Every country of `raw` visible, default threshold, isolated nodes hidden.
	pub fn initial(raw: &SpatialNetworkData) -> Self {
		Self {
			visible_countries: network_countries(raw),
			weight_min: DEFAULT_WEIGHT_MIN,
			show_isolated_nodes: false,
		}
	}
}

/// All distinct node countries.
pub fn network_countries(raw: &SpatialNetworkData) -> BTreeSet<String> {
	raw.nodes.iter().filter_map(|n| n.country.clone()).collect()
}

/// Country axis for one node.
pub fn node_visible(node: &SpatialNetworkNode, visible_countries: &BTreeSet<String>) -> bool {
	node.country
		.as_ref()
		.is_none_or(|c| visible_countries.contains(c))
}

/// Rebuild the filtered view from `raw`. Node and edge order follow `raw`;
/// bounds are the raw bounds; meta counts describe the result.
pub fn apply_spatial_filters(raw: &SpatialNetworkData, params: &SpatialFilterParams) -> SpatialNetworkData {
	let candidates: HashSet<&str> = raw
		.nodes
		.iter()
		.filter(|n| node_visible(n, &params.visible_countries))
		.map(|n| n.id.as_str())
		.collect();

	let edges: Vec<_> = raw
		.edges
		.iter()
		.filter(|e| {
			e.weight >= params.weight_min
				&& candidates.contains(e.source.as_str())
				&& candidates.contains(e.target.as_str())
		})
		.cloned()
		.collect();

	let connected: HashSet<&str> = edges
		.iter()
		.flat_map(|e| [e.source.as_str(), e.target.as_str()])
		.collect();

	let nodes: Vec<_> = raw
		.nodes
		.iter()
		.filter(|n| {
			candidates.contains(n.id.as_str())
				&& (params.show_isolated_nodes || connected.contains(n.id.as_str()))
		})
		.cloned()
		.collect();

	let meta = NetworkMeta {
		total_nodes: nodes.len(),
		total_edges: edges.len(),
		extra: raw.meta.extra.clone(),
	};

	SpatialNetworkData {
		nodes,
		edges,
		bounds: raw.bounds,
		meta,
	}
}
