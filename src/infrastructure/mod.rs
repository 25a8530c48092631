//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching and routing.
//!
//! # Modules
//!
//! - [`cache`] - Redirect lookup cache (Redis and no-op implementations)
//! - [`persistence`] - Registry store implementations (PostgreSQL, in-memory)
//! - [`routing`] - Reserved-path registry for the admission validator

pub mod cache;
pub mod persistence;
pub mod routing;
