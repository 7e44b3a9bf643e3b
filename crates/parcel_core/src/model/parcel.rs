//! Parcel domain model.
//!
//! # Responsibility
//! - Define the single tracked entity and its lifecycle status.
//! - Validate caller-provided fields before they reach storage.
//!
//! # Invariants
//! - `number` is assigned by storage exactly once and never reused.
//! - `created_at` is `YYYY-MM-DDTHH:MM:SSZ` and never changes after creation.
//! - `status` is one of the closed set `registered|sent|delivered`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage-assigned parcel identifier.
pub type ParcelNumber = i64;

/// Identifier of the client owning a parcel.
pub type ClientId = i64;

/// Lifecycle state of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    /// Accepted but not yet handed to the carrier.
    Registered,
    /// In transit.
    Sent,
    /// Handed to the recipient. Terminal.
    Delivered,
}

impl ParcelStatus {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
        }
    }

    /// Returns the following lifecycle state, or `None` for terminal states.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Registered => Some(Self::Sent),
            Self::Sent => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParcelStatus {
    type Err = ParcelValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "registered" => Ok(Self::Registered),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            other => Err(ParcelValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Field-level validation failures for [`Parcel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParcelValidationError {
    BlankAddress,
    InvalidCreatedAt(String),
    UnknownStatus(String),
}

impl Display for ParcelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankAddress => write!(f, "parcel address must not be blank"),
            Self::InvalidCreatedAt(value) => {
                write!(f, "created_at `{value}` is not of the form YYYY-MM-DDTHH:MM:SSZ")
            }
            Self::UnknownStatus(value) => write!(f, "unknown parcel status `{value}`"),
        }
    }
}

impl Error for ParcelValidationError {}

/// A tracked parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// `0` until the parcel has been persisted.
    pub number: ParcelNumber,
    pub client: ClientId,
    pub status: ParcelStatus,
    pub address: String,
    /// RFC3339, UTC, second precision (e.g. `2024-01-01T00:00:00Z`).
    pub created_at: String,
}

impl Parcel {
    /// Creates an unsaved `registered` parcel stamped with the current time.
    pub fn new(client: ClientId, address: impl Into<String>) -> Self {
        Self::with_created_at(client, address, now_timestamp())
    }

    /// Creates an unsaved `registered` parcel with a caller-provided timestamp.
    pub fn with_created_at(
        client: ClientId,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: 0,
            client,
            status: ParcelStatus::Registered,
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    /// Checks field invariants. `number` is not inspected.
    pub fn validate(&self) -> Result<(), ParcelValidationError> {
        validate_address(&self.address)?;
        validate_created_at(&self.created_at)
    }
}

/// Rejects addresses that are empty after trimming.
pub fn validate_address(address: &str) -> Result<(), ParcelValidationError> {
    if address.trim().is_empty() {
        return Err(ParcelValidationError::BlankAddress);
    }
    Ok(())
}

/// Accepts only `YYYY-MM-DDTHH:MM:SSZ`, the form whose text order is time order.
///
/// Offsets and fractional seconds are rejected, never normalized.
pub fn validate_created_at(created_at: &str) -> Result<(), ParcelValidationError> {
    let canonical = DateTime::parse_from_rfc3339(created_at)
        .map(|parsed| {
            parsed
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        })
        .ok();
    if canonical.as_deref() != Some(created_at) {
        return Err(ParcelValidationError::InvalidCreatedAt(
            created_at.to_string(),
        ));
    }
    Ok(())
}

/// Current UTC time in the persisted `created_at` format.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
