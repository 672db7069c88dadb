//! Place index built from the `Lieux` rows of `index.json`.

use std::collections::HashMap;

use super::geo::BoundaryLayer;
use super::schema::IndexEntry;

/// A geocodable place from `index.json`.
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
	/// Name as written in `Titre`.
	pub name: String,
	/// `[lat, lng]`, when parseable and in range.
	pub coordinates: Option<[f64; 2]>,
	/// From the index, else from the world layer.
	pub country: Option<String>,
}

/// Place lookup by case-insensitive name.
#[derive(Clone, Debug, Default)]
pub struct PlaceIndex {
	by_name: HashMap<String, Place>,
}

impl PlaceIndex {
	/// Index the place rows of `entries`. Places with coordinates but no
	/// country get one from `world` when a layer is given.
	pub fn build(entries: &[IndexEntry], world: Option<&BoundaryLayer>) -> Self {
		let mut by_name = HashMap::new();
		for entry in entries.iter().filter(|e| e.is_place()) {
			let name = entry.title.trim();
			if name.is_empty() {
				continue;
			}
			let coordinates = parse_coordinates(&entry.coordinates);
			let country = Some(entry.country.trim())
				.filter(|c| !c.is_empty())
				.map(str::to_string)
				.or_else(|| {
					let [lat, lng] = coordinates?;
					world?.locate(lat, lng).map(str::to_string)
				});
			by_name.entry(normalize(name)).or_insert(Place {
				name: name.to_string(),
				coordinates,
				country,
			});
		}
		Self { by_name }
	}

	/// Case-insensitive lookup.
	pub fn lookup(&self, name: &str) -> Option<&Place> {
		self.by_name.get(&normalize(name))
	}

	/// Number of places.
	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	/// True when no place was indexed.
	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}

	/// Number of places with coordinates.
	pub fn geocoded(&self) -> usize {
		self.by_name.values().filter(|p| p.coordinates.is_some()).count()
	}
}

fn normalize(name: &str) -> String {
	name.trim().to_lowercase()
}

/// Parse `"6.13, 1.22"` (brackets or parentheses allowed) into a range-checked
/// `[lat, lng]`.
pub fn parse_coordinates(raw: &str) -> Option<[f64; 2]> {
	let cleaned: String = raw.chars().filter(|c| !matches!(c, '(' | ')' | '[' | ']')).collect();
	let mut parts = cleaned.split(',').map(str::trim);
	let lat: f64 = parts.next()?.parse().ok()?;
	let lng: f64 = parts.next()?.parse().ok()?;
	((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)).then_some([lat, lng])
}
