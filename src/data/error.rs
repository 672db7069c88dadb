use thiserror::Error;

/// Failure while loading one static resource.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
	/// The server answered 404.
	#[error("resource `{path}` not found")]
	NotFound { path: String },
	/// Network failure or a non-2xx status other than 404.
	#[error("failed to load `{path}`: {detail}")]
	Load { path: String, detail: String },
	/// The body was not the JSON we expected.
	#[error("malformed JSON in `{path}`: {detail}")]
	Parse { path: String, detail: String },
	/// Required top-level fields are missing.
	#[error("invalid payload in `{path}`: {detail}")]
	Validation { path: String, detail: String },
}

impl DataError {
	/// A `Parse` error carrying the serde message.
	pub fn parse(path: &str, err: impl std::fmt::Display) -> Self {
		Self::Parse {
			path: path.to_string(),
			detail: err.to_string(),
		}
	}

	/// A `Validation` error.
	pub fn validation(path: &str, detail: impl Into<String>) -> Self {
		Self::Validation {
			path: path.to_string(),
			detail: detail.into(),
		}
	}

	/// True for a 404, which optional resources treat as absent.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}

	/// Text shown in the dashboard when a load fails.
	pub fn user_message(&self) -> String {
		match self {
			Self::NotFound { path } => format!(
				"Data file `{path}` is missing. Run the preprocessing scripts to generate it."
			),
			Self::Load { .. } => "Could not load dashboard data. Please try again.".to_string(),
			Self::Parse { path, .. } | Self::Validation { path, .. } => {
				format!("Data file `{path}` is invalid: {self}")
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn not_found_message_points_at_preprocessing() {
		let err = DataError::NotFound {
			path: "data/networks/spatial.json".into(),
		};
		assert!(err.is_not_found());
		assert!(err.user_message().contains("preprocessing"));
	}

	#[test]
	fn load_error_message_is_generic() {
		let err = DataError::Load {
			path: "data/articles.json".into(),
			detail: "HTTP 500".into(),
		};
		assert!(!err.user_message().contains("HTTP 500"));
	}
}
