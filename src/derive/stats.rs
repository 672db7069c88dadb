//! Breakdowns of the visible items.

use std::collections::BTreeMap;

use crate::data::ProcessedItem;

/// Bucket for items lacking a country or newspaper.
pub const UNKNOWN: &str = "Unknown";

/// Visible items of one month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthCount {
	/// `YYYY-MM`
	pub month_key: String,
	/// Visible items dated that month.
	pub count: usize,
}

/// Counts over the visible items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
	/// Equals the number of visible items.
	pub total_count: usize,
	/// Items per country, `Unknown` included.
	pub country_breakdown: BTreeMap<String, usize>,
	/// Items per newspaper, `Unknown` included.
	pub newspaper_breakdown: BTreeMap<String, usize>,
	/// Ascending by month.
	pub timeline: Vec<MonthCount>,
}

impl Statistics {
	/// Countries ordered by count, largest first.
	pub fn top_countries(&self, limit: usize) -> Vec<(&str, usize)> {
		top(&self.country_breakdown, limit)
	}

	/// Newspapers ordered by count, largest first.
	pub fn top_newspapers(&self, limit: usize) -> Vec<(&str, usize)> {
		top(&self.newspaper_breakdown, limit)
	}
}

fn top(counts: &BTreeMap<String, usize>, limit: usize) -> Vec<(&str, usize)> {
	let mut ranked: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
	ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
	ranked.truncate(limit);
	ranked
}

/// Fold over the visible items.
pub fn compute_statistics(visible: &[ProcessedItem]) -> Statistics {
	let mut stats = Statistics {
		total_count: visible.len(),
		..Default::default()
	};
	let mut months: BTreeMap<String, usize> = BTreeMap::new();

	for item in visible {
		let country = item.country.as_deref().unwrap_or(UNKNOWN);
		*stats.country_breakdown.entry(country.to_string()).or_default() += 1;

		let newspaper = match item.newspaper_source.as_str() {
			"" => UNKNOWN,
			name => name,
		};
		*stats.newspaper_breakdown.entry(newspaper.to_string()).or_default() += 1;

		if let Some(key) = item.month_key() {
			*months.entry(key).or_default() += 1;
		}
	}

	stats.timeline = months
		.into_iter()
		.map(|(month_key, count)| MonthCount { month_key, count })
		.collect();
	stats
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;

	fn item(country: Option<&str>, newspaper: &str, date: (i32, u32, u32)) -> ProcessedItem {
		ProcessedItem {
			country: country.map(Into::into),
			newspaper_source: newspaper.into(),
			publish_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
			..Default::default()
		}
	}

	#[test]
	fn breakdowns_sum_to_total() {
		let visible = vec![
			item(Some("Togo"), "Togo-Presse", (2020, 3, 1)),
			item(Some("Togo"), "", (2020, 2, 28)),
			item(None, "La Nation", (2020, 3, 9)),
			item(Some("Benin"), "La Nation", (2019, 12, 31)),
		];
		let stats = compute_statistics(&visible);
		assert_eq!(stats.total_count, visible.len());
		assert_eq!(stats.country_breakdown.values().sum::<usize>(), stats.total_count);
		assert_eq!(stats.newspaper_breakdown.values().sum::<usize>(), stats.total_count);
		assert_eq!(stats.country_breakdown[UNKNOWN], 1);
		assert_eq!(stats.newspaper_breakdown[UNKNOWN], 1);
	}

	#[test]
	fn timeline_is_ascending() {
		let visible = vec![
			item(None, "x", (2020, 3, 1)),
			item(None, "x", (2019, 12, 31)),
			item(None, "x", (2020, 3, 30)),
		];
		let keys: Vec<_> = compute_statistics(&visible)
			.timeline
			.into_iter()
			.map(|m| (m.month_key, m.count))
			.collect();
		assert_eq!(keys, vec![("2019-12".to_string(), 1), ("2020-03".to_string(), 2)]);
	}

	#[test]
	fn ranks_by_count_then_name() {
		let visible = vec![
			item(Some("Togo"), "a", (2020, 1, 1)),
			item(Some("Benin"), "a", (2020, 1, 1)),
			item(Some("Togo"), "b", (2020, 1, 1)),
			item(Some("Niger"), "b", (2020, 1, 1)),
		];
		let stats = compute_statistics(&visible);
		assert_eq!(stats.top_countries(2), vec![("Togo", 2), ("Benin", 1)]);
		assert_eq!(stats.top_newspapers(5), vec![("a", 2), ("b", 2)]);
	}

	#[test]
	fn empty_input_is_zeroed() {
		assert_eq!(compute_statistics(&[]), Statistics::default());
	}
}
