//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and admission rules. Services consume repository traits and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link admission, listing and deletion
//! - [`services::redirect_resolver::RedirectResolver`] - Path resolution with usage counting
//! - [`services::uniqueness_validator::UniquenessValidator`] - Duplicate URL and reserved path checks

pub mod services;
