//! Which items are shown for a given date and filter selection.
//!
//! Every predicate is independent and side-effect free; [`visible_items`]
//! is their conjunction.

use chrono::{Months, NaiveDate};

use super::filters::{DateRange, FilterSelection};
use crate::config::DEFAULT_WINDOW_MONTHS;
use crate::data::ProcessedItem;

/// Symmetric window of `months` around `current`, inclusive. Month arithmetic
/// clamps to the end of shorter months.
pub fn time_window(current: NaiveDate, months: u32) -> DateRange {
	let span = Months::new(months);
	DateRange {
		start: current.checked_sub_months(span).unwrap_or(NaiveDate::MIN),
		end: current.checked_add_months(span).unwrap_or(NaiveDate::MAX),
	}
}

/// Dated and inside `window`.
pub fn in_window(item: &ProcessedItem, window: &DateRange) -> bool {
	item.publish_date.is_some_and(|d| window.contains(d))
}

/// Empty selection admits everything; otherwise `value` must be selected.
pub fn matches_selection(selected: &[String], value: Option<&str>) -> bool {
	selected.is_empty() || value.is_some_and(|v| selected.iter().any(|s| s == v))
}

/// Country is selected, or no country selection.
pub fn matches_country(item: &ProcessedItem, selection: &FilterSelection) -> bool {
	matches_selection(&selection.countries, item.country.as_deref())
}

/// Region is selected, or no region selection.
pub fn matches_region(item: &ProcessedItem, selection: &FilterSelection) -> bool {
	matches_selection(&selection.regions, item.region.as_deref())
}

/// Newspaper is selected, or no newspaper selection.
pub fn matches_newspaper(item: &ProcessedItem, selection: &FilterSelection) -> bool {
	matches_selection(&selection.newspapers, Some(item.newspaper_source.as_str()))
}

/// Inside the explicit date range, when there is one.
pub fn matches_date_range(item: &ProcessedItem, selection: &FilterSelection) -> bool {
	match selection.date_range {
		None => true,
		Some(range) => item.publish_date.is_some_and(|d| range.contains(d)),
	}
}

/// Any selected keyword present on the item.
pub fn matches_keywords(item: &ProcessedItem, selection: &FilterSelection) -> bool {
	selection.keywords.is_empty()
		|| item
			.keywords
			.iter()
			.any(|k| selection.keywords.contains(k))
}

/// Every selection dimension matches.
pub fn passes_filters(item: &ProcessedItem, selection: &FilterSelection) -> bool {
	matches_country(item, selection)
		&& matches_region(item, selection)
		&& matches_newspaper(item, selection)
		&& matches_date_range(item, selection)
		&& matches_keywords(item, selection)
}

/// Items within one month of `current` that pass every filter, in input order.
pub fn visible_items(
	items: &[ProcessedItem],
	current: NaiveDate,
	selection: &FilterSelection,
) -> Vec<ProcessedItem> {
	visible_items_within(items, &time_window(current, DEFAULT_WINDOW_MONTHS), selection)
}

/// Items passing the window and the filters, in input order.
pub fn visible_items_within(
	items: &[ProcessedItem],
	window: &DateRange,
	selection: &FilterSelection,
) -> Vec<ProcessedItem> {
	if items.is_empty() {
		return Vec::new();
	}
	items
		.iter()
		.filter(|item| in_window(item, window) && passes_filters(item, selection))
		.cloned()
		.collect()
}
