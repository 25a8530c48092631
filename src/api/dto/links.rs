//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::ShortLink;

/// Desired codes: up to 10 characters of `[A-Za-z0-9_-]`. Empty means "generate".
static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{0,10}$").expect("valid short code regex"));

/// Request to register a long URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination URL (HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub long_url: String,

    /// Optional desired short code, used exactly as given.
    #[validate(regex(
        path = "*SHORT_CODE_REGEX",
        message = "Short code must be up to 10 characters of letters, digits, '-' or '_'"
    ))]
    pub short_code: Option<String>,
}

/// JSON representation of a short link.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortLinkResponse {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub usage_count: i64,
}

impl ShortLinkResponse {
    pub fn from_link(link: ShortLink, base_url: &str) -> Self {
        Self {
            short_url: link.short_url(base_url),
            id: link.id,
            short_code: link.short_code,
            long_url: link.long_url,
            created_at: link.created_at,
            usage_count: link.usage_count,
        }
    }
}

/// Paginated listing response.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<ShortLinkResponse>,
}

/// Pagination metadata for the listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total_items: i64) -> Self {
        let size = i64::from(page_size.max(1));
        Self {
            page,
            page_size,
            total_items,
            total_pages: (total_items + size - 1) / size,
        }
    }
}
