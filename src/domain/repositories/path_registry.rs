//! Contract for the routing system that owns non-redirect paths.

use async_trait::async_trait;

/// Answers whether a candidate short code would shadow a path the host
/// routing system already serves.
///
/// Consulted only at admission time. Codes minted before a path became
/// reserved are not re-validated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PathRegistry: Send + Sync {
    async fn path_is_reserved(&self, candidate: &str) -> bool;
}
