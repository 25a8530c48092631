//! Registry store implementations.
//!
//! # Repositories
//!
//! - [`PgShortLinkRepository`] - PostgreSQL via SQLx, unique index on `short_code`
//! - [`MemoryShortLinkRepository`] - In-process store with the same guarantees

pub mod memory_short_link_repository;
pub mod pg_short_link_repository;

pub use memory_short_link_repository::MemoryShortLinkRepository;
pub use pg_short_link_repository::PgShortLinkRepository;
