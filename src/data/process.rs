//! Raw article rows to [`ProcessedItem`]s.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};

use super::geo::BoundaryLayer;
use super::item::{ProcessedItem, TemporalData, parse_publish_date};
use super::places::PlaceIndex;
use super::schema::{RawArticle, parse_pipe_list};

/// Regional boundary layers keyed by country name.
pub type RegionLayers = BTreeMap<String, BoundaryLayer>;

/// Normalize one row: date, keywords, places, country and region.
pub fn process_article(raw: &RawArticle, places: &PlaceIndex, regions: &RegionLayers) -> ProcessedItem {
	let spatial = parse_pipe_list(&raw.spatial);

	let mut seen = HashSet::new();
	let geocoded: Vec<_> = spatial
		.iter()
		.filter_map(|name| places.lookup(name))
		.filter(|p| p.coordinates.is_some() && seen.insert(p.name.clone()))
		.collect();

	let coordinates: Option<Vec<[f64; 2]>> = (!geocoded.is_empty())
		.then(|| geocoded.iter().filter_map(|p| p.coordinates).collect());
	let place_label = geocoded.first().map(|p| p.name.clone());

	let article_country = Some(raw.country.trim())
		.filter(|c| !c.is_empty())
		.map(str::to_string);
	let country = geocoded
		.iter()
		.find_map(|p| p.country.clone())
		.or_else(|| article_country.clone());

	let region = country
		.as_ref()
		.and_then(|c| regions.get(c))
		.and_then(|layer| {
			coordinates
				.iter()
				.flatten()
				.find_map(|[lat, lng]| layer.locate(*lat, *lng))
		})
		.map(str::to_string);

	ProcessedItem {
		id: raw.id.trim().to_string(),
		title: raw.title.trim().to_string(),
		publish_date: parse_publish_date(&raw.pub_date),
		coordinates,
		country,
		article_country,
		region,
		newspaper_source: raw.newspaper.trim().to_string(),
		keywords: parse_pipe_list(&raw.subject),
		spatial,
		place_label,
	}
}

/// Process every row, keeping source order.
pub fn process_articles(raw: &[RawArticle], places: &PlaceIndex, regions: &RegionLayers) -> Vec<ProcessedItem> {
	raw.iter().map(|a| process_article(a, places, regions)).collect()
}

/// Group dated items by month, oldest first. Undated items are left out.
pub fn bucket_by_month(items: &[ProcessedItem]) -> Vec<TemporalData> {
	let mut buckets: BTreeMap<NaiveDate, Vec<ProcessedItem>> = BTreeMap::new();
	for item in items {
		let Some(date) = item.publish_date else {
			continue;
		};
		let Some(month) = date.with_day(1) else {
			continue;
		};
		buckets.entry(month).or_default().push(item.clone());
	}
	buckets
		.into_iter()
		.map(|(date, items)| TemporalData {
			date,
			count: items.len(),
			items,
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::schema::IndexEntry;

	fn places() -> PlaceIndex {
		let row = |title: &str, coords: &str, country: &str| IndexEntry {
			id: String::new(),
			title: title.into(),
			kind: "Lieux".into(),
			coordinates: coords.into(),
			country: country.into(),
		};
		PlaceIndex::build(
			&[
				row("Lomé", "6.13, 1.22", "Togo"),
				row("Kara", "9.55, 1.19", "Togo"),
				row("Mecca", "", ""),
				row("Ouagadougou", "12.37, -1.52", "Burkina Faso"),
			],
			None,
		)
	}

	fn article(spatial: &str, country: &str) -> RawArticle {
		RawArticle {
			id: " 17 ".into(),
			title: "Title".into(),
			newspaper: "Togo-Presse".into(),
			country: country.into(),
			pub_date: "2015-06".into(),
			subject: "Ramadan | Islam".into(),
			spatial: spatial.into(),
		}
	}

	#[test]
	fn geocodes_mentions_in_order() {
		let item = process_article(&article("Mecca | Kara | Lomé | kara", "Benin"), &places(), &RegionLayers::new());
		assert_eq!(item.id, "17");
		assert_eq!(item.coordinates, Some(vec![[9.55, 1.19], [6.13, 1.22]]));
		assert_eq!(item.place_label.as_deref(), Some("Kara"));
		assert_eq!(item.country.as_deref(), Some("Togo"));
		assert_eq!(item.article_country.as_deref(), Some("Benin"));
		assert_eq!(item.spatial.len(), 4);
		assert_eq!(item.keywords, vec!["Ramadan", "Islam"]);
		assert_eq!(item.publish_date, NaiveDate::from_ymd_opt(2015, 6, 1));
	}

	#[test]
	fn falls_back_to_declared_country() {
		let item = process_article(&article("Mecca", "Benin"), &places(), &RegionLayers::new());
		assert_eq!(item.coordinates, None);
		assert_eq!(item.place_label, None);
		assert_eq!(item.country.as_deref(), Some("Benin"));

		let bare = process_article(&article("", " "), &places(), &RegionLayers::new());
		assert_eq!(bare.country, None);
		assert_eq!(bare.article_country, None);
	}

	#[test]
	fn assigns_region_from_country_layer() {
		let layer = BoundaryLayer::parse(
			"maps/togo_regions.geojson",
			r#"{"features": [
				{"properties": {"name": "Maritime"},
				 "geometry": {"type": "Polygon", "coordinates": [[[0, 6], [2, 6], [2, 7], [0, 7], [0, 6]]]}},
				{"properties": {"name": "Kara"},
				 "geometry": {"type": "Polygon", "coordinates": [[[0, 9], [2, 9], [2, 10], [0, 10], [0, 9]]]}}
			]}"#,
			"name",
		)
		.unwrap();
		let regions = RegionLayers::from([("Togo".to_string(), layer)]);
		let item = process_article(&article("Lomé", ""), &places(), &regions);
		assert_eq!(item.region.as_deref(), Some("Maritime"));

		let elsewhere = process_article(&article("Ouagadougou", ""), &places(), &regions);
		assert_eq!(elsewhere.region, None);
	}

	#[test]
	fn buckets_are_chronological_and_counted() {
		let mut items = process_articles(
			&[article("", "Togo"), article("", "Togo"), article("", "Togo")],
			&places(),
			&RegionLayers::new(),
		);
		items[1].publish_date = NaiveDate::from_ymd_opt(2014, 1, 20);
		items[2].publish_date = None;
		let buckets = bucket_by_month(&items);
		assert_eq!(buckets.len(), 2);
		assert_eq!(buckets[0].key(), "2014-01");
		assert_eq!(buckets[1].key(), "2015-06");
		assert!(buckets.iter().all(|b| b.count == b.items.len()));
	}
}
