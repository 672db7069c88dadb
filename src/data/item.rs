use chrono::{Datelike, NaiveDate};

/// One article observation, ready for filtering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessedItem {
	/// Omeka item id.
	pub id: String,
	/// Article title.
	pub title: String,
	/// `None` when the source date could not be normalized.
	pub publish_date: Option<NaiveDate>,
	/// `[lat, lng]` of every geocoded place the article mentions.
	pub coordinates: Option<Vec<[f64; 2]>>,
	/// Country of the first geocoded place, else the declared one.
	pub country: Option<String>,
	/// Country declared by the source collection.
	pub article_country: Option<String>,
	/// Region of the first geocoded place, when a regional layer covers it.
	pub region: Option<String>,
	/// Newspaper title; may be empty.
	pub newspaper_source: String,
	/// Subject keywords.
	pub keywords: Vec<String>,
	/// Raw place-name mentions.
	pub spatial: Vec<String>,
	/// Set whenever `coordinates` is.
	pub place_label: Option<String>,
}

impl ProcessedItem {
	/// `YYYY-MM` of the publication date.
	pub fn month_key(&self) -> Option<String> {
		self.publish_date.map(month_key)
	}
}

/// Items sharing one month.
#[derive(Clone, Debug, PartialEq)]
pub struct TemporalData {
	/// First day of the month.
	pub date: NaiveDate,
	/// Always `items.len()`.
	pub count: usize,
	/// The items, in source order.
	pub items: Vec<ProcessedItem>,
}

impl TemporalData {
	/// `YYYY-MM` of the bucket.
	pub fn key(&self) -> String {
		month_key(self.date)
	}
}

/// `YYYY-MM`; sorts chronologically as a string.
pub fn month_key(date: NaiveDate) -> String {
	format!("{:04}-{:02}", date.year(), date.month())
}

/// Best-effort date parsing of `YYYY-MM-DD`, `YYYY-MM`, `YYYY`,
/// `DD/MM/YYYY` and ISO timestamps. Anything else is `None`.
pub fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
	let s = raw.trim();
	if s.is_empty() {
		return None;
	}
	if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
		return Some(d);
	}
	if let Ok(d) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
		return Some(d);
	}
	let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
	match s.split('-').collect::<Vec<_>>().as_slice() {
		[year] if year.len() == 4 && all_digits(*year) => {
			return NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1);
		}
		[year, month] if year.len() == 4 && all_digits(*year) && all_digits(*month) => {
			return NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1);
		}
		_ => {}
	}
	// "2020-03-01T10:00:00Z" and friends
	s.get(..10)
		.filter(|_| s.as_bytes().get(10) == Some(&b'T'))
		.and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[test]
	fn normalizes_partial_dates() {
		assert_eq!(parse_publish_date("2019-07-14"), Some(ymd(2019, 7, 14)));
		assert_eq!(parse_publish_date("2019-07"), Some(ymd(2019, 7, 1)));
		assert_eq!(parse_publish_date(" 2019 "), Some(ymd(2019, 1, 1)));
		assert_eq!(parse_publish_date("14/07/2019"), Some(ymd(2019, 7, 14)));
		assert_eq!(parse_publish_date("2019-07-14T08:30:00Z"), Some(ymd(2019, 7, 14)));
	}

	#[test]
	fn rejects_garbage() {
		assert_eq!(parse_publish_date(""), None);
		assert_eq!(parse_publish_date("None"), None);
		assert_eq!(parse_publish_date("2019-13"), None);
		assert_eq!(parse_publish_date("31/02/2019"), None);
		assert_eq!(parse_publish_date("circa 1990"), None);
	}

	#[test]
	fn month_keys_are_zero_padded() {
		assert_eq!(month_key(ymd(2003, 2, 17)), "2003-02");
		let item = ProcessedItem {
			publish_date: Some(ymd(1999, 12, 31)),
			..Default::default()
		};
		assert_eq!(item.month_key().as_deref(), Some("1999-12"));
	}
}
