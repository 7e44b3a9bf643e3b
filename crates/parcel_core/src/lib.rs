//! Parcel tracking core: a SQLite-backed store for parcels and their
//! `registered -> sent -> delivered` lifecycle.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{init_logging, LoggingError};
pub use model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus, ParcelValidationError};
pub use service::parcel_service::{ParcelService, ServiceError, ServiceResult};
pub use store::parcel_store::{ParcelStore, SqliteParcelStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
