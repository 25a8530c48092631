//! CLI administration tool for shortlink-registry.
//!
//! Registers, lists and deletes short links directly against the database,
//! through the same admission rules as the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register a long URL under a generated code
//! cargo run --bin admin -- links create https://example.com/page
//!
//! # ...or under a chosen code
//! cargo run --bin admin -- links create https://example.com/page --code promo
//!
//! # List links, newest first
//! cargo run --bin admin -- links list --page 2 --page-size 50
//!
//! # Delete a link (asks for confirmation)
//! cargo run --bin admin -- links delete 42
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`), `BASE_URL`,
//! `RESERVED_PATHS`, and optionally `REDIS_URL` so deletions evict cached
//! redirects.

use shortlink_registry::application::services::LinkService;
use shortlink_registry::config::{self, Config, StorageBackend};
use shortlink_registry::domain::errors::{AdmissionError, StoreError};
use shortlink_registry::domain::repositories::{PathRegistry, ShortLinkRepository};
use shortlink_registry::infrastructure::cache::{CacheService, RedisCache};
use shortlink_registry::infrastructure::persistence::PgShortLinkRepository;
use shortlink_registry::server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

type Service = LinkService<dyn ShortLinkRepository, dyn PathRegistry>;

/// CLI tool for managing shortlink-registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Register a long URL
    Create {
        /// Destination URL (http or https)
        long_url: String,

        /// Desired short code (generated if omitted)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// List links, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 25)]
        page_size: u32,
    },

    /// Permanently delete a link
    Delete {
        /// Link ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("The admin tool requires STORAGE_BACKEND=postgres");
    }

    let pool = server::connect_database(&config).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &config, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, config: &Config, pool: PgPool) -> Result<()> {
    let repository: Arc<dyn ShortLinkRepository> =
        Arc::new(PgShortLinkRepository::new(Arc::new(pool)));
    let paths: Arc<dyn PathRegistry> = Arc::new(server::reserved_paths(config));

    let mut service: Service = LinkService::new(repository, paths);
    if let Some(cache) = connect_cache(config).await {
        service = service.with_cache(cache);
    }

    match action {
        LinkAction::Create { long_url, code } => {
            create_link(&service, &config.base_url, &long_url, code.as_deref()).await
        }
        LinkAction::List { page, page_size } => {
            list_links(&service, &config.base_url, page, page_size).await
        }
        LinkAction::Delete { id, yes } => delete_link(&service, id, yes).await,
    }
}

async fn connect_cache(config: &Config) -> Option<Arc<dyn CacheService>> {
    let redis_url = config.redis_url.as_deref()?;

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(cache) => Some(Arc::new(cache)),
        Err(e) => {
            println!(
                "{}",
                format!("⚠️  Redis unavailable ({e}); cached redirects will expire by TTL").yellow()
            );
            None
        }
    }
}

/// Registers a long URL and prints the resulting short URL.
async fn create_link(
    service: &Service,
    base_url: &str,
    long_url: &str,
    code: Option<&str>,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let link = service
        .create_short_link(long_url, code.unwrap_or_default())
        .await
        .map_err(|e| match e {
            AdmissionError::Validation(reason) => anyhow::anyhow!("Rejected: {}", reason),
            other => anyhow::anyhow!("Failed to create link: {}", other),
        })?;

    println!("  ID:        {}", link.id.to_string().bright_black());
    println!("  Code:      {}", link.short_code.cyan());
    println!("  Long URL:  {}", link.long_url);
    println!("  Short URL: {}", link.short_url(base_url).bright_yellow().bold());
    println!();
    println!("{}", "✅ Link created successfully!".green().bold());
    println!();

    Ok(())
}

/// Lists one page of links.
///
/// # Output Format
///
/// ```text
/// 📋 Short Links
///
///   ID    Long URL                                 Short URL                     Created            Clicks
///   ───────────────────────────────────────────────────────────────────────────────────────────────────────
///   12    https://example.com/page                 http://localhost:3000/abc123  2026-01-15 10:30   4
/// ```
async fn list_links(service: &Service, base_url: &str, page: u32, page_size: u32) -> Result<()> {
    println!("{}", "📋 Short Links".bright_blue().bold());
    println!();

    let listing = service
        .list_short_links(page, page_size)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if listing.items.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create <URL>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<40} {:<29} {:<18} {}",
        "ID".bright_white().bold(),
        "Long URL".bright_white().bold(),
        "Short URL".bright_white().bold(),
        "Created".bright_white().bold(),
        "Clicks".bright_white().bold()
    );
    println!("  {}", "─".repeat(103).bright_black());

    for link in &listing.items {
        println!(
            "  {:<5} {:<40} {:<29} {:<18} {}",
            link.id.to_string().bright_black(),
            truncate(&link.long_url, 40),
            link.short_url(base_url).cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.usage_count
        );
    }

    println!();
    println!(
        "  Page {} · {} per page · Total: {}",
        listing.page,
        listing.page_size,
        listing.total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes a link after confirmation. The code becomes free immediately.
async fn delete_link(service: &Service, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short Link".bright_blue().bold());
    println!();

    let link = match service.get_short_link(id).await {
        Ok(link) => link,
        Err(StoreError::NotFound) => anyhow::bail!("No link with ID {id}"),
        Err(e) => anyhow::bail!("Database error: {e}"),
    };

    println!("  Code:     {}", link.short_code.cyan());
    println!("  Long URL: {}", link.long_url);
    println!("  Clicks:   {}", link.usage_count);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Are you sure you want to delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_short_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  {}", version.bright_black());
            println!("  Links: {}", links.to_string().bright_white().bold());
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max - 1).collect();
        format!("{head}…")
    }
}
