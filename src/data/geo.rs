//! GeoJSON boundary layers (world countries, per-country regions) and
//! point-in-polygon lookup.

use serde::Deserialize;
use serde_json::Value;

use super::error::DataError;

#[derive(Debug, Deserialize)]
struct GeoJsonFeatureCollection {
	features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
	#[serde(default)]
	properties: serde_json::Map<String, Value>,
	geometry: Option<GeoJsonGeometry>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonGeometry {
	#[serde(rename = "type")]
	ty: String,
	coordinates: Value,
}

/// Linear rings in GeoJSON order: `[lng, lat]`, first ring outer, rest holes.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
	/// Outer ring first, then holes, each as `[lng, lat]`.
	pub rings: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
	/// Even-odd test against the outer ring minus its holes.
	pub fn contains(&self, lat: f64, lng: f64) -> bool {
		let Some((outer, holes)) = self.rings.split_first() else {
			return false;
		};
		ring_contains(outer, lng, lat) && !holes.iter().any(|h| ring_contains(h, lng, lat))
	}
}

/// A named area of a boundary layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Area {
	/// Value of the layer's name property.
	pub name: String,
	/// One or more polygons of the area.
	pub polygons: Vec<Polygon>,
}

impl Area {
	/// True if any polygon contains the point.
	pub fn contains(&self, lat: f64, lng: f64) -> bool {
		self.polygons.iter().any(|p| p.contains(lat, lng))
	}
}

/// Named areas of one GeoJSON file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundaryLayer {
	/// Areas in file order.
	pub areas: Vec<Area>,
}

impl BoundaryLayer {
	/// Parse a FeatureCollection; each area is named by `name_property`.
	/// Features without a name or a polygonal geometry are skipped.
	pub fn parse(path: &str, text: &str, name_property: &str) -> Result<Self, DataError> {
		let collection: GeoJsonFeatureCollection =
			serde_json::from_str(text).map_err(|e| DataError::parse(path, e))?;

		let areas = collection
			.features
			.into_iter()
			.filter_map(|feature| {
				let name = feature.properties.get(name_property)?.as_str()?.trim().to_string();
				if name.is_empty() {
					return None;
				}
				let polygons = feature.geometry.map(polygons_of).unwrap_or_default();
				(!polygons.is_empty()).then_some(Area { name, polygons })
			})
			.collect();
		Ok(Self { areas })
	}

	/// Name of the first area containing the point.
	pub fn locate(&self, lat: f64, lng: f64) -> Option<&str> {
		self.areas
			.iter()
			.find(|a| a.contains(lat, lng))
			.map(|a| a.name.as_str())
	}

	/// Area names in file order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.areas.iter().map(|a| a.name.as_str())
	}
}

fn polygons_of(geometry: GeoJsonGeometry) -> Vec<Polygon> {
	match geometry.ty.as_str() {
		"Polygon" => polygon(&geometry.coordinates).into_iter().collect(),
		"MultiPolygon" => geometry
			.coordinates
			.as_array()
			.map(|polys| polys.iter().filter_map(polygon).collect())
			.unwrap_or_default(),
		_ => Vec::new(),
	}
}

fn polygon(value: &Value) -> Option<Polygon> {
	let rings: Vec<Vec<[f64; 2]>> = value
		.as_array()?
		.iter()
		.filter_map(|ring| {
			let points: Vec<[f64; 2]> = ring
				.as_array()?
				.iter()
				.filter_map(|p| {
					let a = p.as_array()?;
					Some([a.first()?.as_f64()?, a.get(1)?.as_f64()?])
				})
				.collect();
			(points.len() >= 3).then_some(points)
		})
		.collect();
	(!rings.is_empty()).then_some(Polygon { rings })
}

/// Even-odd ray casting. `ring` is `[x, y]` = `[lng, lat]`.
fn ring_contains(ring: &[[f64; 2]], x: f64, y: f64) -> bool {
	let mut inside = false;
	let mut j = ring.len() - 1;
	for i in 0..ring.len() {
		let [xi, yi] = ring[i];
		let [xj, yj] = ring[j];
		if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
			inside = !inside;
		}
		j = i;
	}
	inside
}
