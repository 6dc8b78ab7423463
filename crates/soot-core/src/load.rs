//! The load step — normalize fetched batches into reference and fact rows.
//!
//! One call per run. The snapshot version is computed exactly once, before
//! any batch is touched, so every fact row written by the run carries the
//! same version regardless of which country it belongs to.

use tracing::warn;

use crate::{
  observation::CountryBatch,
  record::{NewCountry, NewEmissionRecord, NewIndicator},
  store::EmissionStore,
};

/// Outcome of one load run.
///
/// Success is judged across *all* insert attempts, not just the last one:
/// the run saved cleanly only when `failed == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
  /// Snapshot version shared by every fact row written in this run.
  pub version:  i64,
  /// Fact rows successfully inserted.
  pub inserted: usize,
  /// Observations that could not be persisted (failed upsert lookup or
  /// failed insert). These are logged and skipped, never fatal.
  pub failed:   usize,
}

impl LoadReport {
  pub fn all_inserted(&self) -> bool {
    self.failed == 0
  }
}

/// Persist every observation in `batches` as one new snapshot.
///
/// Per batch, the country and indicator descriptors are upserted once, on
/// the first observation — they are stable across a batch, so repeating the
/// upsert per observation would be wasted work. Foreign keys are then
/// resolved by lookup for every observation; post-upsert the lookup is
/// expected to succeed, and an observation whose keys cannot be resolved is
/// counted as failed rather than aborting its siblings.
///
/// Only a failure to compute the snapshot version aborts the run.
pub async fn load_batches<S: EmissionStore>(
  store: &S,
  batches: &[CountryBatch],
) -> Result<LoadReport, S::Error> {
  let version = store.next_version().await?;
  let mut report = LoadReport {
    version,
    inserted: 0,
    failed: 0,
  };

  for batch in batches {
    for (i, obs) in batch.observations.iter().enumerate() {
      if i == 0 {
        if let Err(e) = store.upsert_country(NewCountry::from_observation(obs)).await {
          warn!(country = %batch.country_code, error = %e, "country upsert failed");
        }
        if let Err(e) = store
          .upsert_indicator(NewIndicator::from_observation(obs))
          .await
        {
          warn!(country = %batch.country_code, error = %e, "indicator upsert failed");
        }
      }

      let country_id = match store.find_country_id(&obs.country_iso3).await {
        Ok(Some(id)) => id,
        Ok(None) => {
          warn!(iso_code = %obs.country_iso3, "no country row for observation, skipping");
          report.failed += 1;
          continue;
        }
        Err(e) => {
          warn!(iso_code = %obs.country_iso3, error = %e, "country lookup failed, skipping");
          report.failed += 1;
          continue;
        }
      };

      let indicator_id = match store.find_indicator_id(&obs.indicator.id).await {
        Ok(Some(id)) => id,
        Ok(None) => {
          warn!(code = %obs.indicator.id, "no indicator row for observation, skipping");
          report.failed += 1;
          continue;
        }
        Err(e) => {
          warn!(code = %obs.indicator.id, error = %e, "indicator lookup failed, skipping");
          report.failed += 1;
          continue;
        }
      };

      let record =
        NewEmissionRecord::from_observation(obs, country_id, indicator_id, version);
      match store.insert_record(record).await {
        Ok(_) => report.inserted += 1,
        Err(e) => {
          warn!(
            country = %batch.country_code,
            period = %obs.date,
            error = %e,
            "fact insert failed, skipping"
          );
          report.failed += 1;
        }
      }
    }
  }

  Ok(report)
}
