//! Parcel lifecycle use-case service.
//!
//! # Responsibility
//! - Enforce the forward-only lifecycle `registered -> sent -> delivered`.
//! - Restrict address changes and cancellation to registered parcels.
//!
//! # Invariants
//! - Service APIs never bypass store validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use crate::store::parcel_store::{ParcelStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from parcel lifecycle operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Parcel is already in a terminal status.
    InvalidTransition {
        number: ParcelNumber,
        from: ParcelStatus,
    },
    /// Operation requires the parcel to still be `registered`.
    NotRegistered {
        number: ParcelNumber,
        status: ParcelStatus,
    },
    /// Store-level failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { number, from } => {
                write!(f, "parcel {number} cannot advance from status `{from}`")
            }
            Self::NotRegistered { number, status } => write!(
                f,
                "parcel {number} has status `{status}`; only registered parcels can be changed"
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case service wrapping a [`ParcelStore`].
pub struct ParcelService<S: ParcelStore> {
    store: S,
}

impl<S: ParcelStore> ParcelService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new parcel for `client` stamped with the current time.
    ///
    /// Returns the stored parcel with its assigned number.
    pub fn register(&self, client: ClientId, address: impl Into<String>) -> ServiceResult<Parcel> {
        let mut parcel = Parcel::new(client, address);
        parcel.number = self.store.add(&parcel)?;
        info!(
            "event=parcel_register module=service status=ok number={} client={}",
            parcel.number, parcel.client
        );
        Ok(parcel)
    }

    /// Lists all parcels of one client.
    pub fn client_parcels(&self, client: ClientId) -> ServiceResult<Vec<Parcel>> {
        Ok(self.store.get_by_client(client)?)
    }

    /// Advances a parcel to its next status and returns the new status.
    ///
    /// # Errors
    /// - `InvalidTransition` when the parcel is already delivered.
    pub fn next_status(&self, number: ParcelNumber) -> ServiceResult<ParcelStatus> {
        let parcel = self.store.get(number)?;
        let Some(next) = parcel.status.next() else {
            warn!(
                "event=parcel_next_status module=service status=error number={} error_code=terminal_status from={}",
                number, parcel.status
            );
            return Err(ServiceError::InvalidTransition {
                number,
                from: parcel.status,
            });
        };

        self.store.set_status(number, next)?;
        info!(
            "event=parcel_next_status module=service status=ok number={} from={} to={}",
            number, parcel.status, next
        );
        Ok(next)
    }

    /// Changes the delivery address while the parcel is still registered.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> ServiceResult<()> {
        self.ensure_registered(number)?;
        self.store.set_address(number, address)?;
        info!("event=parcel_change_address module=service status=ok number={number}");
        Ok(())
    }

    /// Cancels (deletes) a parcel while it is still registered.
    pub fn cancel(&self, number: ParcelNumber) -> ServiceResult<()> {
        self.ensure_registered(number)?;
        self.store.delete(number)?;
        info!("event=parcel_cancel module=service status=ok number={number}");
        Ok(())
    }

    fn ensure_registered(&self, number: ParcelNumber) -> ServiceResult<()> {
        let parcel = self.store.get(number)?;
        if parcel.status != ParcelStatus::Registered {
            return Err(ServiceError::NotRegistered {
                number,
                status: parcel.status,
            });
        }
        Ok(())
    }
}
