//! [`SqliteStore`] — the SQLite implementation of [`EmissionStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use soot_core::{
  record::{EmissionRecord, NewCountry, NewEmissionRecord, NewIndicator},
  store::EmissionStore,
};

use crate::{
  Error, Result,
  encode::{RawEmissionRecord, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An emissions snapshot store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Reads (used by run summaries and tests) ───────────────────────────────

  /// All fact rows belonging to one snapshot version.
  pub async fn records_at_version(&self, version: i64) -> Result<Vec<EmissionRecord>> {
    let raws: Vec<RawEmissionRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, country_id, indicator_id, year, status, unit, value,
                  captured_at, version
           FROM emission_records
           WHERE version = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![version], |row| {
            Ok(RawEmissionRecord {
              id:           row.get(0)?,
              country_id:   row.get(1)?,
              indicator_id: row.get(2)?,
              year:         row.get(3)?,
              status:       row.get(4)?,
              unit:         row.get(5)?,
              value:        row.get(6)?,
              captured_at:  row.get(7)?,
              version:      row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEmissionRecord::into_record).collect()
  }

  /// Number of country reference rows.
  pub async fn country_count(&self) -> Result<i64> {
    self.count("SELECT COUNT(*) FROM countries").await
  }

  /// Number of indicator reference rows.
  pub async fn indicator_count(&self) -> Result<i64> {
    self.count("SELECT COUNT(*) FROM indicators").await
  }

  async fn count(&self, sql: &'static str) -> Result<i64> {
    let n = self
      .conn
      .call(move |conn| Ok(conn.query_row(sql, [], |row| row.get(0))?))
      .await?;
    Ok(n)
  }
}

// ─── EmissionStore impl ──────────────────────────────────────────────────────

impl EmissionStore for SqliteStore {
  type Error = Error;

  // ── Reference data ────────────────────────────────────────────────────────

  async fn upsert_country(&self, country: NewCountry) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO countries (iso_code, name, abbreviation)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![country.iso_code, country.name, country.abbreviation],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn upsert_indicator(&self, indicator: NewIndicator) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO indicators (description, code) VALUES (?1, ?2)",
          rusqlite::params![indicator.description, indicator.code],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn find_country_id(&self, iso_code: &str) -> Result<Option<i64>> {
    let iso_code = iso_code.to_owned();
    let id = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id FROM countries WHERE iso_code = ?1",
              rusqlite::params![iso_code],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(id)
  }

  async fn find_indicator_id(&self, code: &str) -> Result<Option<i64>> {
    let code = code.to_owned();
    let id = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id FROM indicators WHERE code = ?1",
              rusqlite::params![code],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(id)
  }

  // ── Facts — append-only writes ────────────────────────────────────────────

  async fn next_version(&self) -> Result<i64> {
    // MAX over an empty table yields one row holding NULL.
    let max: Option<i64> = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT MAX(version) FROM emission_records",
          [],
          |row| row.get(0),
        )?)
      })
      .await?;
    Ok(max.map_or(1, |v| v + 1))
  }

  async fn insert_record(&self, record: NewEmissionRecord) -> Result<EmissionRecord> {
    let captured_at = Utc::now();
    let captured_at_str = encode_dt(captured_at);

    let row = record.clone();
    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO emission_records (
             country_id, indicator_id, year, status, unit, value,
             captured_at, version
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            row.country_id,
            row.indicator_id,
            row.year,
            row.status,
            row.unit,
            row.value,
            captured_at_str,
            row.version,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(EmissionRecord {
      id,
      country_id: record.country_id,
      indicator_id: record.indicator_id,
      year: record.year,
      status: record.status,
      unit: record.unit,
      value: record.value,
      captured_at,
      version: record.version,
    })
  }
}
