//! Schemas of `networks/spatial.json` and `networks/global.json`, with
//! load-time validation.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::error::DataError;

/// Top-level keys every network payload must carry.
const REQUIRED_KEYS: &[&str] = &["nodes", "edges", "meta"];
/// How many offending ids a report keeps for logging.
const REPORT_SAMPLE: usize = 5;

/// A place in the co-occurrence network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialNetworkNode {
	/// Stable node id, e.g. `location:12`.
	pub id: String,
	/// `None` for places outside any known country.
	#[serde(default, deserialize_with = "non_empty_string")]
	pub country: Option<String>,
	/// `[lat, lng]`; `None` when the payload had anything but two finite numbers.
	#[serde(default, deserialize_with = "lenient_coordinates")]
	pub coordinates: Option<[f64; 2]>,
	/// Articles mentioning the place.
	#[serde(default, deserialize_with = "lenient_count")]
	pub count: u32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// First-level division, when known.
	#[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty_string")]
	pub region: Option<String>,
	/// Second-level division (prefecture, department or province).
	#[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty_string")]
	pub prefecture: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub degree: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub strength: Option<u32>,
}

impl SpatialNetworkNode {
	/// Label when present, else the id.
	pub fn display_name(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.id)
	}
}

/// Weighted co-occurrence link. Shared by the spatial and entity networks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEdge {
	/// Node id at one end.
	pub source: String,
	/// Node id at the other end.
	pub target: String,
	/// Number of articles citing both endpoints.
	#[serde(deserialize_with = "lenient_count")]
	pub weight: u32,
	/// Edge type in the entity network.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Weight scaled into `0..=1` by the producer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub weight_norm: Option<f64>,
	/// Articles behind the link.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub article_ids: Vec<String>,
}

impl NetworkEdge {
	/// The endpoint opposite to `id`, if `id` is an endpoint.
	pub fn other(&self, id: &str) -> Option<&str> {
		if self.source == id {
			Some(&self.target)
		} else if self.target == id {
			Some(&self.source)
		} else {
			None
		}
	}
}

/// Edges of the spatial network.
pub type SpatialNetworkEdge = NetworkEdge;

/// Geographic bounding box, degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
	pub north: f64,
	pub south: f64,
	pub east: f64,
	pub west: f64,
}

impl Bounds {
	/// Smallest box holding every point, padded by 10% of each span.
	pub fn around(points: impl IntoIterator<Item = [f64; 2]>) -> Option<Self> {
		let mut bounds: Option<Self> = None;
		for [lat, lng] in points {
			let b = bounds.get_or_insert(Self {
				north: lat,
				south: lat,
				east: lng,
				west: lng,
			});
			b.north = b.north.max(lat);
			b.south = b.south.min(lat);
			b.east = b.east.max(lng);
			b.west = b.west.min(lng);
		}
		bounds.map(|b| {
			let lat_pad = pad(b.north - b.south);
			let lng_pad = pad(b.east - b.west);
			Self {
				north: b.north + lat_pad,
				south: b.south - lat_pad,
				east: b.east + lng_pad,
				west: b.west - lng_pad,
			}
		})
	}

	/// Latitude extent in degrees.
	pub fn lat_span(&self) -> f64 {
		self.north - self.south
	}

	/// Longitude extent in degrees.
	pub fn lng_span(&self) -> f64 {
		self.east - self.west
	}
}

fn pad(span: f64) -> f64 {
	let p = span * 0.1;
	if p == 0.0 { 0.1 } else { p }
}

/// Generation metadata. Keys other than the counts are kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMeta {
	/// Node count, updated by the filter.
	#[serde(default)]
	pub total_nodes: usize,
	/// Edge count, updated by the filter.
	#[serde(default)]
	pub total_edges: usize,
	/// Every other producer key, kept as is.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl NetworkMeta {
	/// Threshold the producer already applied, when it recorded one.
	pub fn weight_min(&self) -> Option<u32> {
		self.extra
			.get("weightMin")
			.and_then(Value::as_u64)
			.and_then(|w| u32::try_from(w).ok())
	}

	/// `generatedAt` as written by the producer.
	pub fn generated_at(&self) -> Option<&str> {
		self.extra.get("generatedAt").and_then(Value::as_str)
	}
}

/// A parsed `networks/spatial.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialNetworkData {
	pub nodes: Vec<SpatialNetworkNode>,
	pub edges: Vec<SpatialNetworkEdge>,
	/// Padded extent of the valid coordinates.
	#[serde(default)]
	pub bounds: Option<Bounds>,
	pub meta: NetworkMeta,
}

impl SpatialNetworkData {
	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&SpatialNetworkNode> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

/// Node of the entity co-occurrence network (`networks/global.json`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityNode {
	/// Entity id, prefixed by its type.
	pub id: String,
	/// Entity type: person, organization, subject, event or location.
	#[serde(rename = "type", default)]
	pub kind: String,
	#[serde(default)]
	pub label: String,
	/// Articles mentioning the entity.
	#[serde(default, deserialize_with = "lenient_count")]
	pub count: u32,
}

/// A parsed `networks/global.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityNetworkData {
	pub nodes: Vec<EntityNode>,
	pub edges: Vec<NetworkEdge>,
	pub meta: NetworkMeta,
}

/// Soft data-quality findings. Nothing listed here is removed from the data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
	/// Nodes without two finite coordinates.
	pub invalid_coordinates: usize,
	/// Edges naming a node that is not in the payload.
	pub dangling_edges: usize,
	/// First few offending node ids.
	pub samples: Vec<String>,
}

impl ValidationReport {
	/// No warnings at all.
	pub fn is_clean(&self) -> bool {
		self.invalid_coordinates == 0 && self.dangling_edges == 0
	}

	/// Sum of both counts.
	pub fn warning_count(&self) -> usize {
		self.invalid_coordinates + self.dangling_edges
	}

	fn note(&mut self, id: &str) {
		if self.samples.len() < REPORT_SAMPLE {
			self.samples.push(id.to_string());
		}
	}
}

/// Parse and validate a spatial network payload.
pub fn parse_spatial_network(
	path: &str,
	text: &str,
) -> Result<(SpatialNetworkData, ValidationReport), DataError> {
	let value = parse_with_required_keys(path, text)?;
	let data: SpatialNetworkData =
		serde_json::from_value(value).map_err(|e| DataError::parse(path, e))?;

	let mut report = ValidationReport::default();
	for node in data.nodes.iter().filter(|n| n.coordinates.is_none()) {
		report.invalid_coordinates += 1;
		report.note(&node.id);
	}
	report.dangling_edges = count_dangling(data.nodes.iter().map(|n| n.id.as_str()), &data.edges);

	if !report.is_clean() {
		warn!(
			"{}: {} node(s) without valid coordinates, {} edge(s) with unknown endpoints (e.g. {:?})",
			path, report.invalid_coordinates, report.dangling_edges, report.samples
		);
	}
	Ok((data, report))
}

/// Parse and validate an entity network payload.
pub fn parse_entity_network(path: &str, text: &str) -> Result<EntityNetworkData, DataError> {
	let value = parse_with_required_keys(path, text)?;
	let data: EntityNetworkData =
		serde_json::from_value(value).map_err(|e| DataError::parse(path, e))?;
	let dangling = count_dangling(data.nodes.iter().map(|n| n.id.as_str()), &data.edges);
	if dangling > 0 {
		warn!("{}: {} edge(s) with unknown endpoints", path, dangling);
	}
	Ok(data)
}

fn parse_with_required_keys(path: &str, text: &str) -> Result<Value, DataError> {
	let value: Value = serde_json::from_str(text).map_err(|e| DataError::parse(path, e))?;
	let Some(object) = value.as_object() else {
		return Err(DataError::validation(path, "top level is not an object"));
	};
	let missing: Vec<&str> = REQUIRED_KEYS
		.iter()
		.copied()
		.filter(|key| object.get(*key).is_none_or(Value::is_null))
		.collect();
	if !missing.is_empty() {
		return Err(DataError::validation(
			path,
			format!("missing required field(s): {}", missing.join(", ")),
		));
	}
	for key in ["nodes", "edges"] {
		if !object[key].is_array() {
			return Err(DataError::validation(path, format!("`{key}` is not an array")));
		}
	}
	Ok(value)
}

fn count_dangling<'a>(ids: impl Iterator<Item = &'a str>, edges: &[NetworkEdge]) -> usize {
	let ids: std::collections::HashSet<&str> = ids.collect();
	edges
		.iter()
		.filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
		.count()
}

fn lenient_coordinates<'de, D>(deserializer: D) -> Result<Option<[f64; 2]>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	let (lat, lng) = match value.as_array() {
		Some(pair) if pair.len() == 2 => (&pair[0], &pair[1]),
		_ => return Ok(None),
	};
	Ok(match (lat.as_f64(), lng.as_f64()) {
		(Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some([lat, lng]),
		_ => None,
	})
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	let n = value
		.as_u64()
		.or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
		.unwrap_or(0);
	Ok(u32::try_from(n).unwrap_or(u32::MAX))
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value: Option<String> = Option::deserialize(deserializer)?;
	Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
	use super::*;

	const PATH: &str = "networks/spatial.json";

	#[test]
	fn parses_producer_payload() {
		let text = r#"{
			"nodes": [
				{"id": "location:1", "type": "location", "label": "Lomé", "count": 12,
				 "coordinates": [6.13, 1.22], "country": "Togo", "region": "", "prefecture": "Golfe",
				 "degree": 1},
				{"id": "location:2", "label": "Cotonou", "count": 4,
				 "coordinates": [6.37, 2.39], "country": "", "prefecture": ""}
			],
			"edges": [{"source": "location:1", "target": "location:2", "weight": 3,
			           "weightNorm": 1.0, "articleIds": ["10", "11", "12"]}],
			"bounds": {"north": 6.5, "south": 6.0, "east": 2.5, "west": 1.1},
			"meta": {"totalNodes": 2, "totalEdges": 1, "weightMin": 2, "generatedAt": "2025-01-01T00:00:00Z"}
		}"#;
		let (data, report) = parse_spatial_network(PATH, text).unwrap();
		assert!(report.is_clean());
		assert_eq!(data.nodes[0].country.as_deref(), Some("Togo"));
		assert_eq!(data.nodes[0].region, None);
		assert_eq!(data.nodes[0].prefecture.as_deref(), Some("Golfe"));
		assert_eq!(data.nodes[1].prefecture, None);
		assert_eq!(data.nodes[1].country, None);
		assert_eq!(data.edges[0].article_ids.len(), 3);
		assert_eq!(data.meta.weight_min(), Some(2));
		assert_eq!(data.meta.generated_at(), Some("2025-01-01T00:00:00Z"));
		assert!(data.bounds.is_some());
	}

	#[test]
	fn missing_top_level_field_is_fatal() {
		let err = parse_spatial_network(PATH, r#"{"nodes": [], "edges": []}"#).unwrap_err();
		match err {
			DataError::Validation { detail, .. } => assert!(detail.contains("meta")),
			other => panic!("unexpected error {other:?}"),
		}
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		let err = parse_spatial_network(PATH, "{not json").unwrap_err();
		assert!(matches!(err, DataError::Parse { .. }));
	}

	#[test]
	fn bad_coordinates_are_counted_not_dropped() {
		let text = r#"{
			"nodes": [
				{"id": "a", "coordinates": [1.0], "count": 1},
				{"id": "b", "coordinates": ["x", 2.0], "count": 1},
				{"id": "c", "coordinates": [1.0, 2.0], "count": 1},
				{"id": "d", "count": 1}
			],
			"edges": [{"source": "a", "target": "zz", "weight": 2}],
			"meta": {"totalNodes": 4, "totalEdges": 1}
		}"#;
		let (data, report) = parse_spatial_network(PATH, text).unwrap();
		assert_eq!(data.nodes.len(), 4);
		assert_eq!(report.invalid_coordinates, 3);
		assert_eq!(report.dangling_edges, 1);
		assert_eq!(report.samples, vec!["a", "b", "d"]);
		assert_eq!(report.warning_count(), 4);
	}

	#[test]
	fn bounds_are_padded() {
		let b = Bounds::around([[0.0, 0.0], [10.0, 20.0]]).unwrap();
		assert_eq!(b.north, 11.0);
		assert_eq!(b.south, -1.0);
		assert_eq!(b.east, 22.0);
		assert_eq!(b.west, -2.0);
		let single = Bounds::around([[5.0, 5.0]]).unwrap();
		assert!((single.lat_span() - 0.2).abs() < 1e-9);
		assert!(Bounds::around([]).is_none());
	}

	#[test]
	fn entity_network_keeps_types() {
		let text = r#"{
			"nodes": [{"id": "person:1", "type": "person", "label": "A", "count": 3}],
			"edges": [],
			"meta": {"totalNodes": 1, "totalEdges": 0, "supportedTypes": ["person"]}
		}"#;
		let data = parse_entity_network("networks/global.json", text).unwrap();
		assert_eq!(data.nodes[0].kind, "person");
		assert!(data.meta.extra.contains_key("supportedTypes"));
	}
}
