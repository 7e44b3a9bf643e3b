//! Parcel store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and per-client queries over the `parcel` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate input before issuing SQL.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Each operation issues exactly one statement; there is no caching.

use crate::db::schema::{schema_version, SCHEMA_VERSION};
use crate::db::DbError;
use crate::model::parcel::{
    validate_address, ClientId, Parcel, ParcelNumber, ParcelStatus, ParcelValidationError,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PARCEL_TABLE: &str = "parcel";
const PARCEL_COLUMNS: &[&str] = &["number", "client", "status", "address", "created_at"];

const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    status,
    address,
    created_at
FROM parcel";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for parcel persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(ParcelValidationError),
    Db(DbError),
    NotFound(ParcelNumber),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(number) => write!(f, "parcel not found: {number}"),
            Self::InvalidData(message) => write!(f, "invalid persisted parcel data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParcelValidationError> for StoreError {
    fn from(value: ParcelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data-access contract for parcels.
pub trait ParcelStore {
    /// Persists a new parcel and returns its freshly assigned number.
    ///
    /// The input `number` is ignored.
    fn add(&self, parcel: &Parcel) -> StoreResult<ParcelNumber>;
    /// Loads one parcel; `NotFound` when no row has this number.
    fn get(&self, number: ParcelNumber) -> StoreResult<Parcel>;
    /// Replaces the address of an existing parcel.
    fn set_address(&self, number: ParcelNumber, address: &str) -> StoreResult<()>;
    /// Replaces the status of an existing parcel. Any status is accepted.
    fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> StoreResult<()>;
    /// Removes a parcel. Deleting a missing number succeeds.
    fn delete(&self, number: ParcelNumber) -> StoreResult<()>;
    /// Lists every parcel owned by `client`, ordered by number.
    fn get_by_client(&self, client: ClientId) -> StoreResult<Vec<Parcel>>;
}

/// SQLite-backed parcel store borrowing a caller-owned connection.
pub struct SqliteParcelStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelStore<'conn> {
    /// Constructs a store from a bootstrapped connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `parcel`
    ///   table does not have the expected shape.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ParcelStore for SqliteParcelStore<'_> {
    fn add(&self, parcel: &Parcel) -> StoreResult<ParcelNumber> {
        parcel.validate()?;

        self.conn.execute(
            "INSERT INTO parcel (client, status, address, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                parcel.client,
                parcel.status.as_str(),
                parcel.address.as_str(),
                parcel.created_at.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, number: ParcelNumber) -> StoreResult<Parcel> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE number = ?1;"))?;

        let mut rows = stmt.query([number])?;
        match rows.next()? {
            Some(row) => parse_parcel_row(row),
            None => Err(StoreError::NotFound(number)),
        }
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> StoreResult<()> {
        validate_address(address)?;

        let changed = self.conn.execute(
            "UPDATE parcel SET address = ?1 WHERE number = ?2;",
            params![address, number],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(number));
        }

        Ok(())
    }

    fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE parcel SET status = ?1 WHERE number = ?2;",
            params![status.as_str(), number],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(number));
        }

        Ok(())
    }

    fn delete(&self, number: ParcelNumber) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM parcel WHERE number = ?1;", [number])?;
        Ok(())
    }

    fn get_by_client(&self, client: ClientId) -> StoreResult<Vec<Parcel>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PARCEL_SELECT_SQL} WHERE client = ?1 ORDER BY number ASC;"
        ))?;

        let mut rows = stmt.query([client])?;
        let mut parcels = Vec::new();
        while let Some(row) = rows.next()? {
            parcels.push(parse_parcel_row(row)?);
        }

        Ok(parcels)
    }
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let actual_version = schema_version(conn)?;
    if actual_version != SCHEMA_VERSION {
        return Err(StoreError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version,
        });
    }

    let table_exists = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [PARCEL_TABLE],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !table_exists {
        return Err(StoreError::MissingRequiredTable(PARCEL_TABLE));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({PARCEL_TABLE});"))?;
    let existing = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    for &column in PARCEL_COLUMNS {
        if !existing.iter().any(|name| name == column) {
            return Err(StoreError::MissingRequiredColumn {
                table: PARCEL_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn parse_parcel_row(row: &Row<'_>) -> StoreResult<Parcel> {
    let status_text: String = row.get("status")?;
    let status = status_text.parse::<ParcelStatus>().map_err(|_| {
        StoreError::InvalidData(format!(
            "invalid parcel status `{status_text}` in parcel.status"
        ))
    })?;

    let parcel = Parcel {
        number: row.get("number")?,
        client: row.get("client")?,
        status,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    };
    parcel
        .validate()
        .map_err(|err| StoreError::InvalidData(format!("parcel {}: {err}", parcel.number)))?;
    Ok(parcel)
}
