use crate::derive::{AvailableFilters, DateRange, FilterSelection};

/// Selectable domains and the current selection. Every setter installs a
/// fresh selection value and bumps the revision.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterStore {
	available: AvailableFilters,
	selected: FilterSelection,
	revision: u64,
}

impl FilterStore {
	/// Domains of the current dataset.
	pub fn available(&self) -> &AvailableFilters {
		&self.available
	}

	/// The current narrowing.
	pub fn selected(&self) -> &FilterSelection {
		&self.selected
	}

	/// Bumped by every setter.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// New domains; the old selection no longer applies and is cleared.
	pub fn set_available(&mut self, available: AvailableFilters) {
		self.available = available;
		self.replace(FilterSelection::default());
	}

	/// Keep only values present in the domain.
	pub fn set_countries(&mut self, countries: Vec<String>) {
		self.replace(FilterSelection {
			countries,
			..self.selected.clone()
		});
	}

	/// Add or remove one country.
	pub fn toggle_country(&mut self, country: &str) {
		self.set_countries(toggled(&self.selected.countries, country));
	}

	/// Keep only regions present in the domain.
	pub fn set_regions(&mut self, regions: Vec<String>) {
		self.replace(FilterSelection {
			regions,
			..self.selected.clone()
		});
	}

	/// Add or remove one region.
	pub fn toggle_region(&mut self, region: &str) {
		self.set_regions(toggled(&self.selected.regions, region));
	}

	/// Keep only newspapers present in the domain.
	pub fn set_newspapers(&mut self, newspapers: Vec<String>) {
		self.replace(FilterSelection {
			newspapers,
			..self.selected.clone()
		});
	}

	/// Add or remove one newspaper.
	pub fn toggle_newspaper(&mut self, newspaper: &str) {
		self.set_newspapers(toggled(&self.selected.newspapers, newspaper));
	}

	/// `None` lifts the explicit range.
	pub fn set_date_range(&mut self, date_range: Option<DateRange>) {
		self.replace(FilterSelection {
			date_range,
			..self.selected.clone()
		});
	}

	/// Keep only keywords present in the domain.
	pub fn set_keywords(&mut self, keywords: Vec<String>) {
		self.replace(FilterSelection {
			keywords,
			..self.selected.clone()
		});
	}

	/// Add or remove one keyword.
	pub fn toggle_keyword(&mut self, keyword: &str) {
		self.set_keywords(toggled(&self.selected.keywords, keyword));
	}

	/// Drop every selection, keeping the domains.
	pub fn clear(&mut self) {
		self.replace(FilterSelection::default());
	}

	fn replace(&mut self, selected: FilterSelection) {
		self.selected = selected;
		self.revision += 1;
	}
}

fn toggled(list: &[String], value: &str) -> Vec<String> {
	if list.iter().any(|v| v == value) {
		list.iter().filter(|v| *v != value).cloned().collect()
	} else {
		let mut next = list.to_vec();
		next.push(value.to_string());
		next
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;

	#[test]
	fn toggles_are_symmetric() {
		let mut store = FilterStore::default();
		store.toggle_country("Togo");
		store.toggle_country("Benin");
		assert_eq!(store.selected().countries, vec!["Togo", "Benin"]);
		store.toggle_country("Togo");
		assert_eq!(store.selected().countries, vec!["Benin"]);
		assert_eq!(store.revision(), 3);
	}

	#[test]
	fn setters_leave_other_dimensions_alone() {
		let mut store = FilterStore::default();
		store.toggle_keyword("Hajj");
		store.toggle_newspaper("Sidwaya");
		store.toggle_region("Centre");
		let start = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
		store.set_date_range(Some(DateRange::new(start, start)));
		let selected = store.selected();
		assert_eq!(selected.keywords, vec!["Hajj"]);
		assert_eq!(selected.newspapers, vec!["Sidwaya"]);
		assert_eq!(selected.regions, vec!["Centre"]);
		assert!(selected.date_range.is_some());
		store.clear();
		assert!(store.selected().is_unrestricted());
	}

	#[test]
	fn new_domains_clear_selection() {
		let mut store = FilterStore::default();
		store.set_countries(vec!["Togo".into()]);
		store.set_available(AvailableFilters {
			countries: vec!["Niger".into()],
			..Default::default()
		});
		assert!(store.selected().is_unrestricted());
		assert_eq!(store.available().countries, vec!["Niger"]);
	}
}
