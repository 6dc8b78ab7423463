//! [`WorldBankClient`] — concurrent per-country indicator fetches.

use std::time::Duration;

use soot_core::{CountryBatch, Observation};
use tracing::{info, warn};

use crate::{
  error::{FetchError, Result},
  parse::parse_page,
};

/// The fixed set of tracked countries, by ISO 3166-1 alpha-3 code.
pub const TRACKED_COUNTRIES: [&str; 6] = ["BRA", "CHN", "FRA", "IND", "JPN", "USA"];

/// Total GHG emissions, all gases, AR5 metric (Mt CO2e).
pub const INDICATOR_CODE: &str = "EN.GHG.ALL.MT.CE.AR5";

/// One oversized page per country; the annual series fits comfortably, so no
/// multi-page traversal is done.
const PAGE_SIZE: u32 = 100;

// ─── Config ──────────────────────────────────────────────────────────────────

/// Connection settings for the World Bank API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url: String,
  /// Per-request timeout. A hung request becomes that country's localized
  /// failure instead of stalling the whole join.
  pub timeout:  Duration,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: "https://api.worldbank.org/v2".to_string(),
      timeout:  Duration::from_secs(30),
    }
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async client for the World Bank indicator API.
///
/// Constructed once at startup and cloned into fetch tasks — the inner
/// [`reqwest::Client`] is `Arc`-based, so clones share one connection pool.
#[derive(Clone)]
pub struct WorldBankClient {
  client: reqwest::Client,
  config: ClientConfig,
}

impl WorldBankClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let client = reqwest::Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  fn indicator_url(&self, country_code: &str) -> String {
    format!(
      "{}/country/{}/indicator/{}?format=json&per_page={}",
      self.config.base_url.trim_end_matches('/'),
      country_code,
      INDICATOR_CODE,
      PAGE_SIZE
    )
  }

  /// Fetch and validate the indicator page for a single country.
  ///
  /// A page must hold more than one observation to count as a usable series;
  /// 0 or 1 observations is [`FetchError::InsufficientData`].
  pub async fn fetch_country(&self, country_code: &str) -> Result<Vec<Observation>> {
    let resp = self
      .client
      .get(self.indicator_url(country_code))
      .header(reqwest::header::ACCEPT, "application/json")
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(FetchError::Status {
        country: country_code.to_owned(),
        status,
      });
    }

    let body = resp.text().await?;
    accept_page(country_code, parse_page(&body)?)
  }

  /// Fetch every tracked country concurrently and join all results.
  ///
  /// Failures are localized: a country whose fetch errored out is returned
  /// as an empty batch, leaving the all-or-nothing decision to the caller.
  pub async fn fetch_all(&self) -> Vec<CountryBatch> {
    let mut tasks = Vec::with_capacity(TRACKED_COUNTRIES.len());
    for code in TRACKED_COUNTRIES {
      let client = self.clone();
      tasks.push((code, tokio::spawn(async move { client.fetch_country(code).await })));
    }

    let mut batches = Vec::with_capacity(tasks.len());
    for (code, task) in tasks {
      let outcome = match task.await {
        Ok(outcome) => outcome,
        Err(e) => {
          warn!(country = code, error = %e, "fetch task aborted");
          batches.push(CountryBatch::empty(code));
          continue;
        }
      };

      match outcome {
        Ok(observations) => {
          info!(country = code, observations = observations.len(), "fetched");
          batches.push(CountryBatch {
            country_code: code.to_owned(),
            observations,
          });
        }
        Err(e) => {
          warn!(country = code, error = %e, "fetch failed");
          batches.push(CountryBatch::empty(code));
        }
      }
    }
    batches
  }
}

/// Per-country acceptance threshold: more than one observation.
fn accept_page(country_code: &str, observations: Vec<Observation>) -> Result<Vec<Observation>> {
  if observations.len() > 1 {
    Ok(observations)
  } else {
    Err(FetchError::InsufficientData {
      country: country_code.to_owned(),
      count:   observations.len(),
    })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use soot_core::observation::Descriptor;

  use super::*;

  fn obs(date: &str) -> Observation {
    Observation {
      country:      Descriptor {
        id:    "BR".into(),
        value: "Brazil".into(),
      },
      country_iso3: "BRA".into(),
      date:         date.into(),
      indicator:    Descriptor {
        id:    INDICATOR_CODE.into(),
        value: "Total greenhouse gas emissions".into(),
      },
      status:       String::new(),
      unit:         String::new(),
      value:        Some(1.0),
    }
  }

  #[test]
  fn indicator_url_includes_country_indicator_and_page_size() {
    let client = WorldBankClient::new(ClientConfig::default()).unwrap();
    assert_eq!(
      client.indicator_url("BRA"),
      "https://api.worldbank.org/v2/country/BRA/indicator/EN.GHG.ALL.MT.CE.AR5?format=json&per_page=100"
    );
  }

  #[test]
  fn indicator_url_tolerates_trailing_slash_in_base() {
    let client = WorldBankClient::new(ClientConfig {
      base_url: "http://localhost:8080/".into(),
      ..ClientConfig::default()
    })
    .unwrap();
    assert!(
      client
        .indicator_url("JPN")
        .starts_with("http://localhost:8080/country/JPN/")
    );
  }

  #[test]
  fn single_observation_page_is_insufficient() {
    let err = accept_page("BRA", vec![obs("2021")]).unwrap_err();
    assert!(matches!(
      err,
      FetchError::InsufficientData { count: 1, .. }
    ));

    let err = accept_page("BRA", vec![]).unwrap_err();
    assert!(matches!(
      err,
      FetchError::InsufficientData { count: 0, .. }
    ));
  }

  #[test]
  fn two_observation_page_is_accepted() {
    let page = accept_page("BRA", vec![obs("2020"), obs("2021")]).unwrap();
    assert_eq!(page.len(), 2);
  }
}
