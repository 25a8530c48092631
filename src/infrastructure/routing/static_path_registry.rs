//! Path registry built from a fixed set of reserved segments.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::repositories::PathRegistry;

/// Reserved paths known at startup: the service's own top-level routes plus
/// any operator-supplied `RESERVED_PATHS`.
///
/// Matching is exact and case-sensitive, like the router itself. Entries are
/// stored without leading or trailing slashes.
#[derive(Debug, Clone, Default)]
pub struct StaticPathRegistry {
    reserved: HashSet<String>,
}

impl StaticPathRegistry {
    /// Builds a registry from path segments such as `"api"` or `"/about/"`.
    ///
    /// Blank entries are ignored.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let reserved = paths
            .into_iter()
            .map(|p| p.as_ref().trim().trim_matches('/').to_string())
            .filter(|p| !p.is_empty())
            .collect();

        Self { reserved }
    }

    /// Number of distinct reserved paths.
    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    /// Returns `true` if nothing is reserved.
    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }
}

#[async_trait]
impl PathRegistry for StaticPathRegistry {
    async fn path_is_reserved(&self, candidate: &str) -> bool {
        self.reserved.contains(candidate.trim_matches('/'))
    }
}
