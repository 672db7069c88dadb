//! Browser fetch of static data files.

use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::error::DataError;

/// Fetch `path` and return the body as text.
pub async fn fetch_text(path: &str) -> Result<String, DataError> {
	let load_err = |detail: String| DataError::Load {
		path: path.to_string(),
		detail,
	};

	let window = web_sys::window().ok_or_else(|| load_err("window not available".into()))?;
	let response_value = JsFuture::from(window.fetch_with_str(path))
		.await
		.map_err(|e| load_err(format!("fetch failed: {:?}", e)))?;

	let response: web_sys::Response = response_value
		.dyn_into()
		.map_err(|_| load_err("failed to cast fetch response".into()))?;

	match response.status() {
		404 => {
			return Err(DataError::NotFound {
				path: path.to_string(),
			});
		}
		_ if !response.ok() => return Err(load_err(format!("HTTP {}", response.status()))),
		_ => {}
	}

	let text_promise = response
		.text()
		.map_err(|e| load_err(format!("response.text() failed: {:?}", e)))?;
	let text_value = JsFuture::from(text_promise)
		.await
		.map_err(|e| load_err(format!("await response text failed: {:?}", e)))?;
	text_value
		.as_string()
		.ok_or_else(|| load_err("response text was not a string".into()))
}

/// Fetch `path` and deserialize it as JSON.
pub async fn fetch_json<T: DeserializeOwned>(path: &str) -> Result<T, DataError> {
	let text = fetch_text(path).await?;
	serde_json::from_str(&text).map_err(|e| DataError::parse(path, e))
}
