//! World Bank API client for the soot emissions ETL.
//!
//! Fetches one page of the greenhouse-gas indicator per tracked country,
//! concurrently, and collapses per-country failures into empty batches so a
//! single bad country never aborts its siblings. The aggregate accept/reject
//! decision belongs to the caller (see `soot_core::batches_valid`).

mod client;
mod parse;

pub mod error;

pub use client::{ClientConfig, INDICATOR_CODE, TRACKED_COUNTRIES, WorldBankClient};
pub use error::{FetchError, Result};
