//! Isolation mode: highlight one node and its direct neighbours.
//!
//! Unrelated to hiding isolated (edgeless) nodes in the filter; this is an
//! overlay and never removes anything from the filtered network.

use std::collections::BTreeSet;

use crate::data::NetworkEdge;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum IsolationMode {
	/// No node isolated.
	#[default]
	Off,
	/// `node_id` and its neighbours are highlighted.
	Active {
		node_id: String,
		/// The target plus its neighbours.
		highlighted: BTreeSet<String>,
	},
}

impl IsolationMode {
	/// Activate on `node_id`; on the node that is already isolated, switch off.
	pub fn toggle(&mut self, node_id: &str, edges: &[NetworkEdge]) {
		if self.target() == Some(node_id) {
			self.disable();
		} else {
			*self = Self::Active {
				node_id: node_id.to_string(),
				highlighted: highlight_set(node_id, edges),
			};
		}
	}

	/// Switch off.
	pub fn disable(&mut self) {
		*self = Self::Off;
	}

	/// True while a node is isolated.
	pub fn is_active(&self) -> bool {
		matches!(self, Self::Active { .. })
	}

	/// The isolated node.
	pub fn target(&self) -> Option<&str> {
		match self {
			Self::Off => None,
			Self::Active { node_id, .. } => Some(node_id),
		}
	}

	/// Highlight set while active.
	pub fn highlighted(&self) -> Option<&BTreeSet<String>> {
		match self {
			Self::Off => None,
			Self::Active { highlighted, .. } => Some(highlighted),
		}
	}

	/// False whenever isolation is off.
	pub fn is_highlighted(&self, id: &str) -> bool {
		self.highlighted().is_some_and(|h| h.contains(id))
	}
}

/// Undirected neighbours of `node_id`.
pub fn neighbors(node_id: &str, edges: &[NetworkEdge]) -> BTreeSet<String> {
	edges
		.iter()
		.filter_map(|e| e.other(node_id))
		.filter(|other| *other != node_id)
		.map(str::to_string)
		.collect()
}

/// `node_id` plus every node sharing an edge with it.
pub fn highlight_set(node_id: &str, edges: &[NetworkEdge]) -> BTreeSet<String> {
	let mut set = neighbors(node_id, edges);
	set.insert(node_id.to_string());
	set
}
