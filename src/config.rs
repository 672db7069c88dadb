//! Dashboard configuration: where the data lives and the filter defaults.

use crate::data::focus::{FocusLevel, country_file_slug};

/// Default minimum edge weight of the spatial network.
pub const DEFAULT_WEIGHT_MIN: u32 = 2;
/// Half-width of the visible time window.
pub const DEFAULT_WINDOW_MONTHS: u32 = 1;

/// A per-country regional GeoJSON layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionLayerSource {
	/// Country the layer belongs to, as written in the data.
	pub country: String,
	/// GeoJSON path relative to the data root.
	pub path: String,
	/// Feature property holding the region name.
	pub name_property: String,
}

impl RegionLayerSource {
	fn new(country: &str, file: &str) -> Self {
		Self {
			country: country.to_string(),
			path: format!("maps/{file}"),
			name_property: "name".to_string(),
		}
	}
}

/// Where the data files live and the defaults of the filters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
	/// Prefix of every data path, with a trailing slash.
	pub data_root: String,
	/// Article metadata.
	pub articles_path: String,
	/// Place index with coordinates.
	pub index_path: String,
	/// Optional world country boundaries.
	pub world_layer_path: String,
	/// Feature property naming each country.
	pub world_name_property: String,
	/// Regional layers, one per covered country.
	pub region_layers: Vec<RegionLayerSource>,
	/// Spatial co-occurrence network.
	pub spatial_network_path: String,
	/// Optional entity network.
	pub entity_network_path: String,
	/// Directory of the per-country division counts.
	pub country_focus_dir: String,
	/// Threshold applied on load and on reset.
	pub default_weight_min: u32,
	/// Half-width of the visible window, in months.
	pub window_months: u32,
	/// Milliseconds between timeline steps while playing.
	pub playback_interval_ms: u64,
}

impl Default for DashboardConfig {
	fn default() -> Self {
		Self {
			data_root: "data/".to_string(),
			articles_path: "articles.json".to_string(),
			index_path: "index.json".to_string(),
			world_layer_path: "maps/world_countries.geojson".to_string(),
			world_name_property: "name".to_string(),
			region_layers: vec![
				RegionLayerSource::new("Benin", "benin_regions.geojson"),
				RegionLayerSource::new("Burkina Faso", "burkina_faso_regions.geojson"),
				RegionLayerSource::new("Côte d'Ivoire", "cote_divoire_regions.geojson"),
				RegionLayerSource::new("Togo", "togo_regions.geojson"),
			],
			spatial_network_path: "networks/spatial.json".to_string(),
			entity_network_path: "networks/global.json".to_string(),
			country_focus_dir: "country_focus".to_string(),
			default_weight_min: DEFAULT_WEIGHT_MIN,
			window_months: DEFAULT_WINDOW_MONTHS,
			playback_interval_ms: 800,
		}
	}
}

impl DashboardConfig {
	/// Defaults, with the data root taken from `?data=` when present.
	pub fn from_location() -> Self {
		let mut config = Self::default();
		if let Some(root) = query_param("data") {
			config.set_data_root(&root);
		}
		config
	}

	/// Set the prefix of every data path. A trailing slash is added.
	pub fn set_data_root(&mut self, root: &str) {
		let root = root.trim();
		self.data_root = if root.is_empty() || root.ends_with('/') {
			root.to_string()
		} else {
			format!("{root}/")
		};
	}

	/// Countries with regional layers, which are also the ones with
	/// published division counts.
	pub fn focus_countries(&self) -> Vec<String> {
		self.region_layers.iter().map(|l| l.country.clone()).collect()
	}

	/// Relative path of a country's counts file at `level`.
	pub fn country_focus_path(&self, country: &str, level: FocusLevel) -> String {
		format!(
			"{}/{}_{}_counts.json",
			self.country_focus_dir.trim_end_matches('/'),
			country_file_slug(country),
			level
		)
	}

	/// Full URL path of a data file.
	pub fn resolve(&self, path: &str) -> String {
		format!("{}{}", self.data_root, path.trim_start_matches('/'))
	}
}

fn query_param(name: &str) -> Option<String> {
	let window = web_sys::window()?;
	let search = window.location().search().ok()?;
	let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
	params.get(name).filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_against_data_root() {
		let mut config = DashboardConfig::default();
		assert_eq!(config.resolve("networks/spatial.json"), "data/networks/spatial.json");
		config.set_data_root("/static/iwac");
		assert_eq!(config.resolve("/articles.json"), "/static/iwac/articles.json");
		config.set_data_root("");
		assert_eq!(config.resolve("index.json"), "index.json");
	}

	#[test]
	fn defaults_match_producer_output() {
		let config = DashboardConfig::default();
		assert_eq!(config.default_weight_min, 2);
		assert_eq!(config.window_months, 1);
		assert_eq!(config.region_layers.len(), 4);
		assert_eq!(config.region_layers[3].path, "maps/togo_regions.geojson");
	}

	#[test]
	fn country_focus_paths_use_file_slugs() {
		let config = DashboardConfig::default();
		assert_eq!(
			config.country_focus_path("Côte d'Ivoire", FocusLevel::Prefectures),
			"country_focus/cote_divoire_prefectures_counts.json"
		);
		assert_eq!(
			config.resolve(&config.country_focus_path("Togo", FocusLevel::Regions)),
			"data/country_focus/togo_regions_counts.json"
		);
		assert_eq!(config.focus_countries()[2], "Côte d'Ivoire");
	}
}
