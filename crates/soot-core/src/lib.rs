//! Core types and trait definitions for the soot emissions ETL.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The API client and the SQLite store both depend on it; it depends on
//! nothing but serde, chrono and tracing.

pub mod load;
pub mod observation;
pub mod record;
pub mod store;

pub use load::{LoadReport, load_batches};
pub use observation::{CountryBatch, Observation, batches_valid};
pub use store::EmissionStore;
