//! Storage layer for parcels.
//!
//! # Responsibility
//! - Define the data-access contract used by services.
//! - Isolate SQLite query details from lifecycle orchestration.
//!
//! # Invariants
//! - Store APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - The store never opens or closes connections.

pub mod parcel_store;
