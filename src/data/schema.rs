//! Serde schemas of `articles.json` and `index.json`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `Type` value of place rows in `index.json`.
pub const PLACE_TYPE: &str = "Lieux";

/// One row of `articles.json`. Multi-valued fields are pipe-separated.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RawArticle {
	/// `o:id`, numeric or string.
	#[serde(rename = "o:id", default, deserialize_with = "lenient_string")]
	pub id: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub title: String,
	/// Newspaper title.
	#[serde(default, deserialize_with = "lenient_string")]
	pub newspaper: String,
	/// Country declared by the collection.
	#[serde(default, deserialize_with = "lenient_string")]
	pub country: String,
	/// Free-form date as exported.
	#[serde(default, deserialize_with = "lenient_string")]
	pub pub_date: String,
	/// Pipe-separated subjects.
	#[serde(default, deserialize_with = "lenient_string")]
	pub subject: String,
	/// Pipe-separated place names.
	#[serde(default, deserialize_with = "lenient_string")]
	pub spatial: String,
}

/// One row of `index.json`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct IndexEntry {
	#[serde(rename = "o:id", default, deserialize_with = "lenient_string")]
	pub id: String,
	#[serde(rename = "Titre", default, deserialize_with = "lenient_string")]
	pub title: String,
	/// `Type` column; places are `Lieux`.
	#[serde(rename = "Type", default, deserialize_with = "lenient_string")]
	pub kind: String,
	/// `Coordonnées`, e.g. `"6.13, 1.22"`.
	#[serde(rename = "Coordonnées", default, deserialize_with = "lenient_string")]
	pub coordinates: String,
	#[serde(rename = "Country", default, deserialize_with = "lenient_string")]
	pub country: String,
}

impl IndexEntry {
	/// True for rows of type `Lieux`.
	pub fn is_place(&self) -> bool {
		self.kind == PLACE_TYPE
	}
}

/// Accepts strings, numbers and null; the producer is not consistent about ids.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::Null => String::new(),
		Value::String(s) => s,
		other => other.to_string(),
	})
}

/// Split a ` | ` separated field into trimmed, non-empty parts.
pub fn parse_pipe_list(value: &str) -> Vec<String> {
	value
		.split('|')
		.map(str::trim)
		.filter(|part| !part.is_empty())
		.map(str::to_string)
		.collect()
}
