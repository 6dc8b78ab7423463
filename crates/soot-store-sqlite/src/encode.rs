//! Encoding and decoding helpers between Rust domain types and SQLite rows.
//!
//! Timestamps are stored as RFC 3339 strings; everything else maps to plain
//! SQLite scalars.

use chrono::{DateTime, Utc};
use soot_core::record::EmissionRecord;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `emission_records` row.
pub struct RawEmissionRecord {
  pub id:           i64,
  pub country_id:   i64,
  pub indicator_id: i64,
  pub year:         Option<i32>,
  pub status:       String,
  pub unit:         String,
  pub value:        Option<f64>,
  pub captured_at:  String,
  pub version:      i64,
}

impl RawEmissionRecord {
  pub fn into_record(self) -> Result<EmissionRecord> {
    Ok(EmissionRecord {
      id:           self.id,
      country_id:   self.country_id,
      indicator_id: self.indicator_id,
      year:         self.year,
      status:       self.status,
      unit:         self.unit,
      value:        self.value,
      captured_at:  decode_dt(&self.captured_at)?,
      version:      self.version,
    })
  }
}
