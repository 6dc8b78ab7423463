//! The `EmissionStore` trait.
//!
//! Implemented by storage backends (e.g. `soot-store-sqlite`). The load step
//! and the pipeline depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::{EmissionRecord, NewCountry, NewEmissionRecord, NewIndicator};

/// Abstraction over an emissions snapshot store.
///
/// Reference rows are insert-if-absent and never updated; fact rows are
/// append-only. Lookups return `Option` — there is no sentinel id value for
/// "not found".
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait EmissionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reference data ────────────────────────────────────────────────────

  /// Insert a country row unless its ISO code already exists. Duplicate
  /// attempts are silent no-ops, not errors.
  fn upsert_country(
    &self,
    country: NewCountry,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert an indicator row unless its code already exists.
  fn upsert_indicator(
    &self,
    indicator: NewIndicator,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Resolve a country primary key by exact ISO code. `None` if absent.
  fn find_country_id<'a>(
    &'a self,
    iso_code: &'a str,
  ) -> impl Future<Output = Result<Option<i64>, Self::Error>> + Send + 'a;

  /// Resolve an indicator primary key by exact code. `None` if absent.
  fn find_indicator_id<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<i64>, Self::Error>> + Send + 'a;

  // ── Facts — append-only writes ────────────────────────────────────────

  /// The snapshot version for the next run: `MAX(version) + 1` over the fact
  /// table, or 1 when no facts exist.
  fn next_version(
    &self,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Insert one fact row. The store assigns the row id and the
  /// `captured_at` timestamp.
  fn insert_record(
    &self,
    record: NewEmissionRecord,
  ) -> impl Future<Output = Result<EmissionRecord, Self::Error>> + Send + '_;
}
