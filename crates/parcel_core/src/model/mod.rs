//! Parcel tracking domain model.
//!
//! # Responsibility
//! - Define the data structures shared by storage and service layers.
//!
//! # Invariants
//! - Every parcel is identified by a storage-assigned `ParcelNumber`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod parcel;
