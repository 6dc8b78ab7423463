//! SQL schema for the soot SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Reference dictionaries keyed by external codes: insert-if-absent,
-- never updated.
CREATE TABLE IF NOT EXISTS countries (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    iso_code      TEXT UNIQUE NOT NULL,  -- ISO 3166-1 alpha-3
    name          TEXT NOT NULL,
    abbreviation  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS indicators (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    description  TEXT NOT NULL,
    code         TEXT UNIQUE NOT NULL
);

-- Fact rows are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS emission_records (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    country_id    INTEGER NOT NULL REFERENCES countries(id),
    indicator_id  INTEGER NOT NULL REFERENCES indicators(id),
    year          INTEGER,               -- NULL for non-annual period labels
    status        TEXT NOT NULL DEFAULT '',
    unit          TEXT NOT NULL DEFAULT '',
    value         NUMERIC(8, 4),         -- NULL when the source had no value
    captured_at   TEXT NOT NULL,         -- RFC 3339 UTC; store-assigned
    version       INTEGER NOT NULL       -- snapshot id, shared per run
);

CREATE INDEX IF NOT EXISTS emission_records_version_idx ON emission_records(version);
CREATE INDEX IF NOT EXISTS emission_records_country_idx ON emission_records(country_id);

PRAGMA user_version = 1;
";
