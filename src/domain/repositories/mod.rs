//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Contracts
//!
//! - [`ShortLinkRepository`] - The registry store (insert, lookup, increment, delete, list)
//! - [`PathRegistry`] - Reserved-path lookups owned by the host router
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod path_registry;
pub mod short_link_repository;

pub use path_registry::PathRegistry;
pub use short_link_repository::ShortLinkRepository;

#[cfg(test)]
pub use path_registry::MockPathRegistry;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
