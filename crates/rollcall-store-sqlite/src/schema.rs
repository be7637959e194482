//! SQL schema for the Rollcall SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Persons are written as unconditional puts keyed by person_id.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS persons (
    person_id    TEXT PRIMARY KEY,
    first_name   TEXT NOT NULL,
    last_name    TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    street       TEXT NOT NULL,
    city         TEXT NOT NULL,
    province     TEXT NOT NULL,
    zip_code     TEXT NOT NULL,
    country      TEXT NOT NULL,
    created_at   TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS persons_created_idx ON persons(created_at);

PRAGMA user_version = 1;
";
