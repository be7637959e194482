//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`].

use std::path::Path;

use rollcall_core::{person::PersonRecord, store::PersonStore};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawPerson, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rollcall person store backed by a single SQLite file.
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
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn create(&self, record: PersonRecord) -> Result<Uuid> {
    let person_id      = record.person_id;
    let person_id_str  = encode_uuid(record.person_id);
    let created_at_str = encode_dt(record.created_at);
    let updated_at_str = encode_dt(record.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO persons (
             person_id, first_name, last_name, phone_number,
             street, city, province, zip_code, country,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            person_id_str,
            record.first_name,
            record.last_name,
            record.phone_number,
            record.address.street,
            record.address.city,
            record.address.province,
            record.address.zip_code,
            record.address.country,
            created_at_str,
            updated_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(person_id)
  }

  async fn list_all(&self) -> Result<Vec<PersonRecord>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT person_id, first_name, last_name, phone_number,
                  street, city, province, zip_code, country,
                  created_at, updated_at
           FROM persons",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawPerson {
              person_id:    row.get(0)?,
              first_name:   row.get(1)?,
              last_name:    row.get(2)?,
              phone_number: row.get(3)?,
              street:       row.get(4)?,
              city:         row.get(5)?,
              province:     row.get(6)?,
              zip_code:     row.get(7)?,
              country:      row.get(8)?,
              created_at:   row.get(9)?,
              updated_at:   row.get(10)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_record).collect()
  }
}
