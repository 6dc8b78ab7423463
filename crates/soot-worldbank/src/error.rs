//! Error type for `soot-worldbank`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
  /// Request failed in transit — includes connection errors and the
  /// per-request timeout.
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("unexpected status {status} for {country}")]
  Status {
    country: String,
    status:  reqwest::StatusCode,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// Response parsed as JSON but did not match the expected
  /// `[metadata, observations]` root shape.
  #[error("malformed response: {0}")]
  Shape(String),

  /// The page parsed but held too few observations to be a usable series.
  #[error("insufficient data for {country}: {count} observation(s)")]
  InsufficientData { country: String, count: usize },
}

pub type Result<T, E = FetchError> = std::result::Result<T, E>;
