//! Parcel use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into lifecycle-level APIs.
//! - Keep CLI callers decoupled from storage details.

pub mod parcel_service;
