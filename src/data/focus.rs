//! Precomputed per-division article counts of one country, published as
//! `country_focus/<country>_{regions,prefectures}_counts.json`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DataError;

/// Administrative level of a counts file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusLevel {
	/// First-level divisions.
	#[default]
	Regions,
	/// Second-level divisions.
	Prefectures,
}

impl FocusLevel {
	/// Both levels, in display order.
	pub const ALL: [FocusLevel; 2] = [FocusLevel::Regions, FocusLevel::Prefectures];

	/// Name used in file names and by the producer.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Regions => "regions",
			Self::Prefectures => "prefectures",
		}
	}
}

impl fmt::Display for FocusLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Article and mention counts per division name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryFocusCounts {
	/// Country as spelled by the producer.
	pub country: String,
	/// Must match the level the file was requested for.
	pub level: FocusLevel,
	/// Place mentions per division.
	#[serde(default)]
	pub counts_mentions: BTreeMap<String, u32>,
	/// Articles per division.
	#[serde(default)]
	pub counts_articles: BTreeMap<String, u32>,
	/// Producer timestamp.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<String>,
}

impl CountryFocusCounts {
	/// Divisions by article count, heaviest first, ties by name.
	pub fn ranked(&self) -> Vec<(&str, u32)> {
		let mut rows: Vec<(&str, u32)> = self
			.counts_articles
			.iter()
			.map(|(name, count)| (name.as_str(), *count))
			.collect();
		rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
		rows
	}

	/// Sum over all divisions.
	pub fn total_articles(&self) -> u32 {
		self.counts_articles.values().sum()
	}
}

/// File-name form of a country: accents folded, apostrophes dropped,
/// whitespace runs joined by `_`, lowercase.
pub fn country_file_slug(country: &str) -> String {
	let folded: String = country
		.chars()
		.filter(|c| !matches!(c, '\'' | '\u{2019}' | '`'))
		.map(fold_accent)
		.collect();
	folded.split_whitespace().collect::<Vec<_>>().join("_").to_lowercase()
}

fn fold_accent(c: char) -> char {
	match c {
		'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
		'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
		'ç' => 'c',
		'Ç' => 'C',
		'è' | 'é' | 'ê' | 'ë' => 'e',
		'È' | 'É' | 'Ê' | 'Ë' => 'E',
		'ì' | 'í' | 'î' | 'ï' => 'i',
		'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
		'ñ' => 'n',
		'Ñ' => 'N',
		'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
		'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
		'ù' | 'ú' | 'û' | 'ü' => 'u',
		'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
		'ý' | 'ÿ' => 'y',
		other => other,
	}
}

/// Parse a counts file. A file whose `level` disagrees with the one asked
/// for is rejected.
pub fn parse_country_focus(path: &str, text: &str, level: FocusLevel) -> Result<CountryFocusCounts, DataError> {
	let counts: CountryFocusCounts = serde_json::from_str(text).map_err(|e| DataError::parse(path, e))?;
	if counts.level != level {
		return Err(DataError::validation(
			path,
			format!("expected {} counts, found {}", level, counts.level),
		));
	}
	Ok(counts)
}

#[cfg(test)]
mod tests {
	use super::*;

	const REGIONS: &str = r#"{
		"country": "Togo",
		"level": "regions",
		"countsMentions": {"Maritime": 40, "Kara": 7, "Savanes": 7},
		"countsArticles": {"Maritime": 40, "Kara": 7, "Savanes": 7},
		"updatedAt": "2025-03-01T10:00:00"
	}"#;

	#[test]
	fn file_slugs_match_published_names() {
		assert_eq!(country_file_slug("Côte d'Ivoire"), "cote_divoire");
		assert_eq!(country_file_slug("Burkina Faso"), "burkina_faso");
		assert_eq!(country_file_slug("Bénin"), "benin");
		assert_eq!(country_file_slug("  Togo "), "togo");
	}

	#[test]
	fn parses_region_counts() {
		let counts = parse_country_focus("country_focus/togo_regions_counts.json", REGIONS, FocusLevel::Regions)
			.unwrap();
		assert_eq!(counts.country, "Togo");
		assert_eq!(counts.total_articles(), 54);
		assert_eq!(counts.ranked(), vec![("Maritime", 40), ("Kara", 7), ("Savanes", 7)]);
		assert_eq!(counts.updated_at.as_deref(), Some("2025-03-01T10:00:00"));
	}

	#[test]
	fn empty_prefecture_counts_are_fine() {
		let text = r#"{"country": "Benin", "level": "prefectures", "countsMentions": {}, "countsArticles": {}}"#;
		let counts = parse_country_focus("p.json", text, FocusLevel::Prefectures).unwrap();
		assert!(counts.ranked().is_empty());
		assert!(counts.updated_at.is_none());
	}

	#[test]
	fn level_mismatch_is_rejected() {
		let err = parse_country_focus("p.json", REGIONS, FocusLevel::Prefectures).unwrap_err();
		assert!(matches!(err, DataError::Validation { .. }));
		let err = parse_country_focus("p.json", r#"{"country": "Togo", "level": "cantons"}"#, FocusLevel::Regions)
			.unwrap_err();
		assert!(matches!(err, DataError::Parse { .. }));
	}
}
