//! End to end over small fixtures: raw JSON in, visible items, statistics
//! and the filtered spatial network out.

use std::sync::Arc;

use chrono::NaiveDate;
use news_atlas::data::geo::BoundaryLayer;
use news_atlas::data::network::parse_spatial_network;
use news_atlas::data::process::RegionLayers;
use news_atlas::data::schema::{IndexEntry, RawArticle};
use news_atlas::data::{ArticleDataset, DataError};
use news_atlas::derive::AvailableFilters;
use news_atlas::stores::{DerivedView, FilterStore, MapDataStore, SpatialNetworkStore, TimeStore};

const ARTICLES: &str = r#"[
	{"o:id": 1, "title": "Départ des pèlerins", "newspaper": "Togo-Presse", "country": "Togo",
	 "pub_date": "2018-08-20", "subject": "Hajj|Pèlerinage", "spatial": "Lomé|La Mecque"},
	{"o:id": "2", "title": "Retour de La Mecque", "newspaper": "La Nation", "country": "Bénin",
	 "pub_date": "05/09/2018", "subject": "Hajj", "spatial": "Cotonou|Lomé"},
	{"o:id": 3, "title": "Fin du ramadan", "newspaper": "Sidwaya", "country": "Burkina Faso",
	 "pub_date": "2017", "subject": "Ramadan", "spatial": null},
	{"o:id": 4, "title": "Sans date", "newspaper": "Togo-Presse", "country": "Togo",
	 "pub_date": "", "subject": "", "spatial": "Lomé"}
]"#;

const INDEX: &str = r#"[
	{"o:id": 10, "Titre": "Lomé", "Type": "Lieux", "Coordonnées": "6.13, 1.22", "Country": "Togo"},
	{"o:id": 11, "Titre": "Cotonou", "Type": "Lieux", "Coordonnées": "6.37, 2.39", "Country": "Benin"},
	{"o:id": 12, "Titre": "La Mecque", "Type": "Lieux", "Coordonnées": "21.42, 39.83", "Country": ""},
	{"o:id": 13, "Titre": "Islam", "Type": "Sujets", "Coordonnées": "", "Country": ""}
]"#;

const TOGO_REGIONS: &str = r#"{
	"type": "FeatureCollection",
	"features": [
		{"type": "Feature", "properties": {"name": "Maritime"},
		 "geometry": {"type": "Polygon",
		  "coordinates": [[[0.5, 6.0], [2.0, 6.0], [2.0, 7.0], [0.5, 7.0], [0.5, 6.0]]]}}
	]
}"#;

const SPATIAL: &str = r#"{
	"nodes": [
		{"id": "lome", "label": "Lomé", "count": 9, "coordinates": [6.13, 1.22], "country": "Togo"},
		{"id": "kara", "label": "Kara", "count": 3, "coordinates": [9.55, 1.19], "country": "Togo"},
		{"id": "cotonou", "label": "Cotonou", "count": 5, "coordinates": [6.37, 2.39], "country": "Benin"},
		{"id": "mecca", "label": "La Mecque", "count": 4, "coordinates": [21.42, 39.83], "country": ""},
		{"id": "broken", "label": "Nulle part", "count": 1, "coordinates": "n/a", "country": "Togo"}
	],
	"edges": [
		{"source": "lome", "target": "kara", "weight": 4},
		{"source": "lome", "target": "cotonou", "weight": 2},
		{"source": "cotonou", "target": "mecca", "weight": 1},
		{"source": "lome", "target": "ghost", "weight": 3}
	],
	"bounds": {"north": 23.0, "south": 4.0, "east": 42.0, "west": -1.0},
	"meta": {"totalNodes": 5, "totalEdges": 4, "weightMin": 1, "generatedAt": "2024-05-01"}
}"#;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
	NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dataset() -> ArticleDataset {
	let articles: Vec<RawArticle> = serde_json::from_str(ARTICLES).unwrap();
	let index: Vec<IndexEntry> = serde_json::from_str(INDEX).unwrap();
	let mut regions = RegionLayers::new();
	regions.insert(
		"Togo".to_string(),
		BoundaryLayer::parse("maps/togo_regions.geojson", TOGO_REGIONS, "name").unwrap(),
	);
	ArticleDataset::assemble(&articles, &index, None, regions)
}

/// Stores as they stand right after a successful article load.
fn loaded_stores() -> (MapDataStore, TimeStore, FilterStore) {
	let mut map = MapDataStore::default();
	assert!(map.begin_load());
	map.finish_load(Ok(dataset()));

	let available = AvailableFilters::from_items(map.items());
	let mut time = TimeStore::default();
	time.set_bounds(available.min_date, available.max_date);
	let mut filters = FilterStore::default();
	filters.set_available(available);
	(map, time, filters)
}

#[test]
fn articles_are_geocoded_and_bucketed() {
	let dataset = dataset();
	assert_eq!(dataset.items.len(), 4);

	let first = &dataset.items[0];
	assert_eq!(first.id, "1");
	assert_eq!(first.place_label.as_deref(), Some("Lomé"));
	assert_eq!(first.coordinates.as_ref().map(Vec::len), Some(2));
	assert_eq!(first.region.as_deref(), Some("Maritime"));

	let second = &dataset.items[1];
	assert_eq!(second.publish_date, Some(ymd(2018, 9, 5)));
	assert_eq!(second.country.as_deref(), Some("Benin"));
	assert_eq!(second.article_country.as_deref(), Some("Bénin"));

	let third = &dataset.items[2];
	assert_eq!(third.publish_date, Some(ymd(2017, 1, 1)));
	assert_eq!(third.country.as_deref(), Some("Burkina Faso"));
	assert!(third.coordinates.is_none());

	assert!(dataset.items[3].publish_date.is_none());

	let months: Vec<String> = dataset.temporal.iter().map(|b| b.key()).collect();
	assert_eq!(months, vec!["2017-01", "2018-08", "2018-09"]);
	assert!(dataset.temporal.iter().all(|b| b.count == b.items.len()));
}

#[test]
fn available_filters_cover_the_dataset() {
	let (_, time, filters) = loaded_stores();
	let available = filters.available();
	assert_eq!(available.countries, vec!["Benin", "Burkina Faso", "Togo"]);
	assert_eq!(available.regions["Togo"], vec!["Maritime"]);
	assert_eq!(available.min_date, Some(ymd(2017, 1, 1)));
	assert_eq!(available.max_date, Some(ymd(2018, 9, 5)));
	assert_eq!(time.current_date(), Some(ymd(2017, 1, 1)));
}

#[test]
fn visible_items_follow_time_and_filters() {
	let (map, mut time, mut filters) = loaded_stores();

	let view = DerivedView::derive(&map, &time, &filters, 1);
	let ids: Vec<&str> = view.items.iter().map(|i| i.id.as_str()).collect();
	assert_eq!(ids, vec!["3"]);
	assert_eq!(view.stats.total_count, 1);

	time.set_current_date(ymd(2018, 8, 20));
	let view = DerivedView::refresh(Some(&view), &map, &time, &filters, 1);
	let ids: Vec<&str> = view.items.iter().map(|i| i.id.as_str()).collect();
	assert_eq!(ids, vec!["1", "2"]);
	assert_eq!(view.stats.country_breakdown["Togo"], 1);
	assert_eq!(view.stats.country_breakdown["Benin"], 1);
	let months: Vec<&str> = view.stats.timeline.iter().map(|m| m.month_key.as_str()).collect();
	assert_eq!(months, vec!["2018-08", "2018-09"]);

	filters.toggle_country("Togo");
	let view = DerivedView::refresh(Some(&view), &map, &time, &filters, 1);
	assert_eq!(view.items.len(), 1);
	assert_eq!(view.items[0].id, "1");

	filters.toggle_keyword("Ramadan");
	let view = DerivedView::refresh(Some(&view), &map, &time, &filters, 1);
	assert!(view.items.is_empty());
	assert_eq!(view.stats.total_count, 0);
	assert!(view.stats.timeline.is_empty());

	filters.clear();
	let cleared = DerivedView::refresh(Some(&view), &map, &time, &filters, 1);
	assert_eq!(cleared.items.len(), 2);
	let same = DerivedView::refresh(Some(&cleared), &map, &time, &filters, 1);
	assert!(Arc::ptr_eq(&cleared.items, &same.items));
}

#[test]
fn spatial_network_filters_and_isolates() {
	let (data, report) = parse_spatial_network("networks/spatial.json", SPATIAL).unwrap();
	assert_eq!(report.invalid_coordinates, 1);
	assert_eq!(report.dangling_edges, 1);
	assert_eq!(data.meta.weight_min(), Some(1));

	let mut store = SpatialNetworkStore::default();
	assert!(store.begin_load());
	store.finish_load(Ok((data, report)));
	assert!(store.load_state().is_loaded());

	// default threshold of 2 drops cotonou-mecca, leaving mecca isolated
	let filtered = store.filtered();
	let ids: Vec<&str> = filtered.nodes.iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids, vec!["lome", "kara", "cotonou"]);
	assert_eq!(filtered.meta.total_nodes, 3);
	assert_eq!(filtered.meta.total_edges, 2);
	assert_eq!(filtered.meta.generated_at(), Some("2024-05-01"));
	assert_eq!(filtered.bounds, store.raw().unwrap().bounds);

	store.set_weight_min(1);
	assert_eq!(store.filtered().edges.len(), 3);
	assert!(store.filtered().node("mecca").is_some());

	store.toggle_country("Benin");
	let ids: Vec<&str> = store.filtered().nodes.iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids, vec!["lome", "kara"]);

	store.toggle_isolation("cotonou");
	let highlighted = store.highlighted().unwrap();
	assert!(highlighted.contains("cotonou"));
	assert!(highlighted.contains("lome"));
	assert!(highlighted.contains("mecca"));
	assert!(!highlighted.contains("kara"));

	store.reset();
	assert_eq!(store.params().weight_min, 2);
	assert_eq!(store.params().visible_countries.len(), 2);
	assert!(store.highlighted().is_none());
	assert_eq!(store.filtered().edges.len(), 2);
}

#[test]
fn malformed_network_is_rejected() {
	let err = parse_spatial_network("networks/spatial.json", r#"{"nodes": [], "edges": []}"#).unwrap_err();
	assert!(matches!(err, DataError::Validation { .. }));

	let err = parse_spatial_network("networks/spatial.json", "not json").unwrap_err();
	assert!(matches!(err, DataError::Parse { .. }));
}
