//! Filter selection, the domains it chooses from and date ranges.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::data::ProcessedItem;

/// Inclusive calendar range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
	/// First day.
	pub start: NaiveDate,
	/// Last day.
	pub end: NaiveDate,
}

impl DateRange {
	/// Swaps the ends when given in reverse.
	pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
		Self {
			start: a.min(b),
			end: a.max(b),
		}
	}

	/// Inclusive on both ends.
	pub fn contains(&self, date: NaiveDate) -> bool {
		self.start <= date && date <= self.end
	}
}

/// The user's narrowing. Empty lists mean "no restriction".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSelection {
	/// Selected countries.
	pub countries: Vec<String>,
	/// Selected regions, of any country.
	pub regions: Vec<String>,
	/// Selected newspapers.
	pub newspapers: Vec<String>,
	/// Explicit range on top of the time window.
	pub date_range: Option<DateRange>,
	/// Matches when any one is present.
	pub keywords: Vec<String>,
}

impl FilterSelection {
	/// No dimension restricts anything.
	pub fn is_unrestricted(&self) -> bool {
		self.countries.is_empty()
			&& self.regions.is_empty()
			&& self.newspapers.is_empty()
			&& self.date_range.is_none()
			&& self.keywords.is_empty()
	}

	/// Whether every selected value exists in `available`.
	pub fn is_within(&self, available: &AvailableFilters) -> bool {
		let all_regions: BTreeSet<&str> = available
			.regions
			.values()
			.flatten()
			.map(String::as_str)
			.collect();
		let dates_ok = match (self.date_range, available.min_date, available.max_date) {
			(None, _, _) => true,
			(Some(range), Some(min), Some(max)) => min <= range.start && range.end <= max,
			(Some(_), _, _) => false,
		};
		self.countries.iter().all(|c| available.countries.contains(c))
			&& self.regions.iter().all(|r| all_regions.contains(r.as_str()))
			&& self.newspapers.iter().all(|n| available.newspapers.contains(n))
			&& self.keywords.iter().all(|k| available.keywords.contains(k))
			&& dates_ok
	}
}

/// The selectable universe, derived from the loaded items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailableFilters {
	/// Distinct countries, sorted.
	pub countries: Vec<String>,
	/// Regions per country.
	pub regions: BTreeMap<String, Vec<String>>,
	pub newspapers: Vec<String>,
	pub keywords: Vec<String>,
	/// Earliest dated item.
	pub min_date: Option<NaiveDate>,
	/// Latest dated item.
	pub max_date: Option<NaiveDate>,
}

impl AvailableFilters {
	/// Collect every filter domain from `items`.
	pub fn from_items(items: &[ProcessedItem]) -> Self {
		let mut countries = BTreeSet::new();
		let mut regions: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
		let mut newspapers = BTreeSet::new();
		let mut keywords = BTreeSet::new();
		let mut min_date: Option<NaiveDate> = None;
		let mut max_date: Option<NaiveDate> = None;

		for item in items {
			if let Some(country) = &item.country {
				countries.insert(country.clone());
				if let Some(region) = &item.region {
					regions
						.entry(country.clone())
						.or_default()
						.insert(region.clone());
				}
			}
			if !item.newspaper_source.is_empty() {
				newspapers.insert(item.newspaper_source.clone());
			}
			keywords.extend(item.keywords.iter().cloned());
			if let Some(date) = item.publish_date {
				min_date = Some(min_date.map_or(date, |d| d.min(date)));
				max_date = Some(max_date.map_or(date, |d| d.max(date)));
			}
		}

		Self {
			countries: countries.into_iter().collect(),
			regions: regions
				.into_iter()
				.map(|(country, set)| (country, set.into_iter().collect()))
				.collect(),
			newspapers: newspapers.into_iter().collect(),
			keywords: keywords.into_iter().collect(),
			min_date,
			max_date,
		}
	}
}
