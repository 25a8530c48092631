//! Business logic services for the application layer.

pub mod link_service;
pub mod redirect_resolver;
pub mod uniqueness_validator;

pub use link_service::{LinkPage, LinkService};
pub use redirect_resolver::{RedirectResolver, RedirectTarget};
pub use uniqueness_validator::UniquenessValidator;
