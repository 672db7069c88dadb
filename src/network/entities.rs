//! Ranking for the entity view of `networks/global.json`.

use std::collections::HashMap;

use crate::data::{EntityNetworkData, EntityNode};

/// Undirected degree of every node that has at least one edge.
pub fn entity_degree(network: &EntityNetworkData) -> HashMap<&str, usize> {
	let mut degree = HashMap::new();
	for edge in &network.edges {
		*degree.entry(edge.source.as_str()).or_default() += 1;
		if edge.target != edge.source {
			*degree.entry(edge.target.as_str()).or_default() += 1;
		}
	}
	degree
}

/// Nodes of type `kind` (all types when `None`), by count descending then id.
pub fn top_entities<'a>(network: &'a EntityNetworkData, kind: Option<&str>, limit: usize) -> Vec<&'a EntityNode> {
	let mut nodes: Vec<&EntityNode> = network
		.nodes
		.iter()
		.filter(|n| kind.is_none_or(|k| n.kind == k))
		.collect();
	nodes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.id.cmp(&b.id)));
	nodes.truncate(limit);
	nodes
}

/// Distinct entity types in first-seen order.
pub fn entity_kinds(network: &EntityNetworkData) -> Vec<&str> {
	let mut kinds: Vec<&str> = Vec::new();
	for node in &network.nodes {
		if !kinds.contains(&node.kind.as_str()) {
			kinds.push(&node.kind);
		}
	}
	kinds
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::{NetworkEdge, NetworkMeta};

	fn network() -> EntityNetworkData {
		let node = |id: &str, kind: &str, count| EntityNode {
			id: id.into(),
			kind: kind.into(),
			label: id.into(),
			count,
		};
		let edge = |source: &str, target: &str| NetworkEdge {
			source: source.into(),
			target: target.into(),
			weight: 2,
			kind: Some("cooccurrence".into()),
			weight_norm: None,
			article_ids: Vec::new(),
		};
		EntityNetworkData {
			nodes: vec![
				node("person:1", "person", 3),
				node("event:1", "event", 9),
				node("person:2", "person", 7),
				node("person:3", "person", 7),
			],
			edges: vec![edge("person:1", "event:1"), edge("event:1", "person:2")],
			meta: NetworkMeta::default(),
		}
	}

	#[test]
	fn ranks_within_kind() {
		let net = network();
		let ids: Vec<_> = top_entities(&net, Some("person"), 2).iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["person:2", "person:3"]);
		assert_eq!(top_entities(&net, None, 1)[0].id, "event:1");
	}

	#[test]
	fn degree_counts_both_endpoints() {
		let net = network();
		let degree = entity_degree(&net);
		assert_eq!(degree["event:1"], 2);
		assert_eq!(degree["person:1"], 1);
		assert!(!degree.contains_key("person:3"));
		assert_eq!(entity_kinds(&net), vec!["person", "event"]);
	}
}
