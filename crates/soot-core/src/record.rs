//! Persisted record types — reference rows and emission facts.
//!
//! Reference rows (countries, indicators) are append-only dictionaries keyed
//! by their external codes: created on first sighting, never updated. Fact
//! rows are append-only snapshots; no run ever mutates a previous run's rows.

use chrono::{DateTime, Utc};

use crate::observation::Observation;

// ─── Reference data ──────────────────────────────────────────────────────────

/// A country row to insert if its ISO code has not been seen before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCountry {
  pub iso_code:     String,
  pub name:         String,
  pub abbreviation: String,
}

impl NewCountry {
  pub fn from_observation(obs: &Observation) -> Self {
    Self {
      iso_code:     obs.country_iso3.clone(),
      name:         obs.country.value.clone(),
      abbreviation: obs.country.id.clone(),
    }
  }
}

/// An indicator row to insert if its code has not been seen before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIndicator {
  pub code:        String,
  pub description: String,
}

impl NewIndicator {
  pub fn from_observation(obs: &Observation) -> Self {
    Self {
      code:        obs.indicator.id.clone(),
      description: obs.indicator.value.clone(),
    }
  }
}

// ─── Emission facts ──────────────────────────────────────────────────────────

/// A fact row ready for insertion. The store assigns the row id and the
/// `captured_at` timestamp.
#[derive(Debug, Clone)]
pub struct NewEmissionRecord {
  pub country_id:   i64,
  pub indicator_id: i64,
  pub year:         Option<i32>,
  pub status:       String,
  pub unit:         String,
  pub value:        Option<f64>,
  pub version:      i64,
}

impl NewEmissionRecord {
  /// Build a fact row from an observation and its resolved foreign keys.
  pub fn from_observation(
    obs: &Observation,
    country_id: i64,
    indicator_id: i64,
    version: i64,
  ) -> Self {
    Self {
      country_id,
      indicator_id,
      year: obs.year(),
      status: obs.status.clone(),
      unit: obs.unit.clone(),
      value: obs.value,
      version,
    }
  }
}

/// A persisted fact row.
#[derive(Debug, Clone)]
pub struct EmissionRecord {
  pub id:           i64,
  pub country_id:   i64,
  pub indicator_id: i64,
  pub year:         Option<i32>,
  pub status:       String,
  pub unit:         String,
  pub value:        Option<f64>,
  pub captured_at:  DateTime<Utc>,
  pub version:      i64,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::observation::Descriptor;

  #[test]
  fn reference_rows_come_from_the_embedded_descriptors() {
    let obs = Observation {
      country:      Descriptor {
        id:    "BR".into(),
        value: "Brazil".into(),
      },
      country_iso3: "BRA".into(),
      date:         "2020".into(),
      indicator:    Descriptor {
        id:    "EN.GHG.ALL.MT.CE.AR5".into(),
        value: "Total greenhouse gas emissions".into(),
      },
      status:       String::new(),
      unit:         String::new(),
      value:        Some(1034.1),
    };

    let country = NewCountry::from_observation(&obs);
    assert_eq!(country.iso_code, "BRA");
    assert_eq!(country.name, "Brazil");
    assert_eq!(country.abbreviation, "BR");

    let indicator = NewIndicator::from_observation(&obs);
    assert_eq!(indicator.code, "EN.GHG.ALL.MT.CE.AR5");
    assert_eq!(indicator.description, "Total greenhouse gas emissions");

    let record = NewEmissionRecord::from_observation(&obs, 7, 3, 2);
    assert_eq!(record.country_id, 7);
    assert_eq!(record.indicator_id, 3);
    assert_eq!(record.year, Some(2020));
    assert_eq!(record.value, Some(1034.1));
    assert_eq!(record.version, 2);
  }
}
