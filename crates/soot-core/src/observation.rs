//! Wire-level observation types, as returned by the World Bank API.
//!
//! One observation is a single country/indicator/year measurement. The API
//! nests short `{id, value}` descriptors for the country and the indicator
//! inside every observation; those descriptors are the only source of
//! reference data for the store.

use serde::{Deserialize, Serialize};

// ─── Descriptors ─────────────────────────────────────────────────────────────

/// A nested `{id, value}` pair, used for both the country and the indicator.
///
/// For countries `id` is the two-letter abbreviation and `value` the display
/// name; for indicators `id` is the indicator code and `value` the
/// description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
  #[serde(default)]
  pub id:    String,
  #[serde(default)]
  pub value: String,
}

// ─── Observation ─────────────────────────────────────────────────────────────

/// One measurement for one country, indicator and period.
///
/// `value` is nullable at the source — a missing measurement maps to `None`,
/// never to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
  pub country:   Descriptor,
  #[serde(rename = "countryiso3code")]
  pub country_iso3: String,
  /// Period label; a year for annual series.
  pub date:      String,
  pub indicator: Descriptor,
  #[serde(rename = "obs_status", default)]
  pub status:    String,
  #[serde(default)]
  pub unit:      String,
  pub value:     Option<f64>,
}

impl Observation {
  /// The period label parsed as a calendar year. Non-numeric labels (e.g.
  /// quarterly periods) yield `None` and are stored as NULL.
  pub fn year(&self) -> Option<i32> {
    self.date.parse().ok()
  }
}

// ─── Batches ─────────────────────────────────────────────────────────────────

/// All observations returned for one country in one run.
#[derive(Debug, Clone)]
pub struct CountryBatch {
  pub country_code: String,
  pub observations: Vec<Observation>,
}

impl CountryBatch {
  /// The placeholder for a country whose fetch failed or returned too little
  /// data.
  pub fn empty(country_code: impl Into<String>) -> Self {
    Self {
      country_code: country_code.into(),
      observations: Vec::new(),
    }
  }
}

/// Aggregate fetch gate: at least one batch, and no batch empty.
///
/// A single country with insufficient data invalidates the entire run. This
/// is strict all-or-nothing by product decision, not an error-handling
/// accident.
pub fn batches_valid(batches: &[CountryBatch]) -> bool {
  !batches.is_empty() && batches.iter().all(|b| !b.observations.is_empty())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn obs(iso: &str, date: &str, value: Option<f64>) -> Observation {
    Observation {
      country:      Descriptor {
        id:    "BR".into(),
        value: "Brazil".into(),
      },
      country_iso3: iso.into(),
      date:         date.into(),
      indicator:    Descriptor {
        id:    "EN.GHG.ALL.MT.CE.AR5".into(),
        value: "Total greenhouse gas emissions".into(),
      },
      status:       String::new(),
      unit:         String::new(),
      value,
    }
  }

  #[test]
  fn observation_deserialises_from_api_shape() {
    let json = r#"{
      "indicator": {"id": "EN.GHG.ALL.MT.CE.AR5", "value": "Total greenhouse gas emissions"},
      "country": {"id": "BR", "value": "Brazil"},
      "countryiso3code": "BRA",
      "date": "2021",
      "value": 1310.9045,
      "unit": "",
      "obs_status": "",
      "decimal": 4
    }"#;

    let o: Observation = serde_json::from_str(json).unwrap();
    assert_eq!(o.country_iso3, "BRA");
    assert_eq!(o.country.value, "Brazil");
    assert_eq!(o.indicator.id, "EN.GHG.ALL.MT.CE.AR5");
    assert_eq!(o.year(), Some(2021));
    assert_eq!(o.value, Some(1310.9045));
  }

  #[test]
  fn null_value_maps_to_none_not_zero() {
    let json = r#"{
      "indicator": {"id": "X", "value": "x"},
      "country": {"id": "BR", "value": "Brazil"},
      "countryiso3code": "BRA",
      "date": "2023",
      "value": null,
      "unit": "",
      "obs_status": ""
    }"#;

    let o: Observation = serde_json::from_str(json).unwrap();
    assert_eq!(o.value, None);
  }

  #[test]
  fn non_numeric_period_label_has_no_year() {
    assert_eq!(obs("BRA", "2021Q3", Some(1.0)).year(), None);
    assert_eq!(obs("BRA", "2021", Some(1.0)).year(), Some(2021));
  }

  #[test]
  fn no_batches_is_invalid() {
    assert!(!batches_valid(&[]));
  }

  #[test]
  fn any_empty_batch_invalidates_the_run() {
    let full = CountryBatch {
      country_code: "BRA".into(),
      observations: vec![obs("BRA", "2020", Some(1.0)), obs("BRA", "2021", Some(2.0))],
    };
    let empty = CountryBatch::empty("CHN");

    assert!(batches_valid(&[full.clone()]));
    assert!(!batches_valid(&[full, empty]));
  }
}
