//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - The [`entities::ShortLink`] data model
//! - [`repositories`] - Registry store and path registry trait definitions
//! - [`errors`] - Validation, storage and admission error taxonomy
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Request Flows
//!
//! Admission: validator → code generator (when no code is given) → store insert.
//! Redirect: resolver → store lookup → atomic usage increment.

pub mod entities;
pub mod errors;
pub mod repositories;

pub use errors::{AdmissionError, StoreError, ValidationError};
