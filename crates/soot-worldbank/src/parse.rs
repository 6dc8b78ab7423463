//! Parsing of World Bank indicator pages.
//!
//! The API wraps every page in a two-element root array: element 0 is
//! pagination metadata (ignored — the ETL reads a single oversized page),
//! element 1 is the observation array.

use soot_core::Observation;

use crate::error::{FetchError, Result};

/// Extract the observation list from a raw response body.
pub fn parse_page(body: &str) -> Result<Vec<Observation>> {
  let root: serde_json::Value = serde_json::from_str(body)?;

  let Some(elements) = root.as_array() else {
    return Err(FetchError::Shape("response root is not an array".into()));
  };
  if elements.len() < 2 {
    return Err(FetchError::Shape(format!(
      "expected [metadata, observations], got {} element(s)",
      elements.len()
    )));
  }
  if elements[1].is_null() {
    // The API answers `[metadata, null]` for unknown country or indicator
    // codes rather than a 404.
    return Err(FetchError::Shape("observation array is null".into()));
  }

  Ok(serde_json::from_value(elements[1].clone())?)
}
