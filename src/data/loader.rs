//! Loading of whole datasets: fetch, parse, validate, process.

use log::{info, warn};

use super::error::DataError;
use super::fetch::{fetch_json, fetch_text};
use super::focus::{CountryFocusCounts, FocusLevel, parse_country_focus};
use super::geo::BoundaryLayer;
use super::item::{ProcessedItem, TemporalData};
use super::network::{
	EntityNetworkData, SpatialNetworkData, ValidationReport, parse_entity_network,
	parse_spatial_network,
};
use super::places::PlaceIndex;
use super::process::{RegionLayers, bucket_by_month, process_articles};
use super::schema::{IndexEntry, RawArticle};
use crate::config::DashboardConfig;

/// Everything the map, timeline and filters are derived from.
#[derive(Clone, Debug, Default)]
pub struct ArticleDataset {
	/// Processed articles in source order.
	pub items: Vec<ProcessedItem>,
	/// Month buckets, ascending.
	pub temporal: Vec<TemporalData>,
	/// Place index the items were geocoded with.
	pub places: PlaceIndex,
	/// World country boundaries, when published.
	pub world: Option<BoundaryLayer>,
	/// Regional layers keyed by country.
	pub regions: RegionLayers,
}

impl ArticleDataset {
	/// Build from already-parsed inputs.
	pub fn assemble(
		articles: &[RawArticle],
		index: &[IndexEntry],
		world: Option<BoundaryLayer>,
		regions: RegionLayers,
	) -> Self {
		let places = PlaceIndex::build(index, world.as_ref());
		let items = process_articles(articles, &places, &regions);
		let temporal = bucket_by_month(&items);

		let undated = items.iter().filter(|i| i.publish_date.is_none()).count();
		if undated > 0 {
			warn!("{} of {} articles have no usable publication date", undated, items.len());
		}
		info!(
			"Processed {} articles over {} months; {} of {} places geocoded",
			items.len(),
			temporal.len(),
			places.geocoded(),
			places.len()
		);

		Self {
			items,
			temporal,
			places,
			world,
			regions,
		}
	}
}

/// Fetch articles, place index and map layers. Map layers are optional.
pub async fn load_article_dataset(config: &DashboardConfig) -> Result<ArticleDataset, DataError> {
	let articles: Vec<RawArticle> = fetch_json(&config.resolve(&config.articles_path)).await?;
	let index: Vec<IndexEntry> = fetch_json(&config.resolve(&config.index_path)).await?;

	let world = load_optional_layer(
		&config.resolve(&config.world_layer_path),
		&config.world_name_property,
	)
	.await?;

	let mut regions = RegionLayers::new();
	for source in &config.region_layers {
		if let Some(layer) =
			load_optional_layer(&config.resolve(&source.path), &source.name_property).await?
		{
			regions.insert(source.country.clone(), layer);
		}
	}

	Ok(ArticleDataset::assemble(&articles, &index, world, regions))
}

async fn load_optional_layer(path: &str, name_property: &str) -> Result<Option<BoundaryLayer>, DataError> {
	match fetch_text(path).await {
		Ok(text) => {
			let layer = BoundaryLayer::parse(path, &text, name_property)?;
			info!("Loaded {} areas from {}", layer.areas.len(), path);
			Ok(Some(layer))
		}
		Err(err) if err.is_not_found() => {
			info!("Optional map layer {} not present", path);
			Ok(None)
		}
		Err(err) => Err(err),
	}
}

pub async fn load_spatial_network(
	config: &DashboardConfig,
) -> Result<(SpatialNetworkData, ValidationReport), DataError> {
	let path = config.resolve(&config.spatial_network_path);
	let text = fetch_text(&path).await?;
	let (data, report) = parse_spatial_network(&path, &text)?;
	info!(
		"Loaded spatial network: {} nodes, {} edges",
		data.nodes.len(),
		data.edges.len()
	);
	Ok((data, report))
}

/// The entity network is optional; a missing file is `Ok(None)`.
pub async fn load_entity_network(config: &DashboardConfig) -> Result<Option<EntityNetworkData>, DataError> {
	let path = config.resolve(&config.entity_network_path);
	match fetch_text(&path).await {
		Ok(text) => parse_entity_network(&path, &text).map(Some),
		Err(err) if err.is_not_found() => Ok(None),
		Err(err) => Err(err),
	}
}

/// Division counts of one country. Not every country has them; a missing
/// file is `Ok(None)`.
pub async fn load_country_focus(
	config: &DashboardConfig,
	country: &str,
	level: FocusLevel,
) -> Result<Option<CountryFocusCounts>, DataError> {
	let path = config.resolve(&config.country_focus_path(country, level));
	match fetch_text(&path).await {
		Ok(text) => {
			let counts = parse_country_focus(&path, &text, level)?;
			info!("Loaded {} {} counts for {}", counts.counts_articles.len(), level, country);
			Ok(Some(counts))
		}
		Err(err) if err.is_not_found() => {
			info!("No {} counts published for {}", level, country);
			Ok(None)
		}
		Err(err) => Err(err),
	}
}
