//! CLI administration tool for link-shortener.
//!
//! Operates directly on the JSON snapshot files, without the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Show one link with its recent accesses
//! cargo run --bin admin -- links show testlink
//!
//! # Delete a link and its access events
//! cargo run --bin admin -- links delete testlink
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check that both snapshot files parse
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `BACKEND_URL`, `LINKS_FILE`, `ANALYTICS_FILE`.
//!
//! The server keeps no in-memory copy, so changes made here are seen by a
//! running server on its next request. Do not run a mutating command while
//! the server is handling writes.

use link_shortener::AppError;
use link_shortener::application::services::{AnalyticsService, LinkService};
use link_shortener::config::Config;
use link_shortener::domain::clock::SystemClock;
use link_shortener::domain::entities::{AccessEvent, Link};
use link_shortener::domain::repositories::{AnalyticsRepository, LinkRepository, SnapshotStore};
use link_shortener::infrastructure::persistence::{
    JsonFileStore, SnapshotAnalyticsRepository, SnapshotLinkRepository,
};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

type LinkRepo = SnapshotLinkRepository<JsonFileStore<Link>>;
type AnalyticsRepo = SnapshotAnalyticsRepository<JsonFileStore<AccessEvent>>;

/// CLI tool for managing link-shortener.
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
        action: LinksAction,
    },

    /// Show statistics
    Stats,

    /// Snapshot file operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List all links
    List,

    /// Show a link and its recent accesses
    Show {
        /// Short token or alias
        token: String,
    },

    /// Delete a link and its access events
    Delete {
        /// Short token or alias
        token: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Snapshot file subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check that both snapshot files parse
    Check,
}

/// Repositories and services over the configured snapshot files.
struct Admin {
    config: Config,
    links: Arc<LinkRepo>,
    analytics: Arc<AnalyticsRepo>,
}

impl Admin {
    fn open(config: Config) -> Self {
        let links = Arc::new(SnapshotLinkRepository::new(JsonFileStore::new(
            &config.links_file,
        )));
        let analytics = Arc::new(SnapshotAnalyticsRepository::new(JsonFileStore::new(
            &config.analytics_file,
        )));

        Self {
            config,
            links,
            analytics,
        }
    }

    fn link_service(&self) -> LinkService<LinkRepo, AnalyticsRepo> {
        LinkService::new(
            self.links.clone(),
            self.analytics.clone(),
            Arc::new(SystemClock),
            self.config.link_settings(),
        )
    }

    fn analytics_service(&self) -> AnalyticsService<AnalyticsRepo, LinkRepo> {
        AnalyticsService::new(
            self.analytics.clone(),
            self.links.clone(),
            self.config.base_url.clone(),
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let admin = Admin::open(config);

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &admin).await?,
        Commands::Stats => handle_stats(&admin).await?,
        Commands::Store { action } => handle_store_action(action, &admin).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_links_action(action: LinksAction, admin: &Admin) -> Result<()> {
    match action {
        LinksAction::List => list_links(admin).await,
        LinksAction::Show { token } => show_link(admin, &token).await,
        LinksAction::Delete { token, yes } => delete_link(admin, &token, yes).await,
    }
}

/// Lists all links with their state and click counts.
///
/// # Output Format
///
/// ```text
/// 🔗 Short Links
///
///   Short URL                          Clicks   Expires              State
///   ─────────────────────────────────────────────────────────────────────────────
///   http://localhost:5000/testlink     3        2025-01-02 10:30     ACTIVE
///   http://localhost:5000/k3x9qa       0        2024-12-01 08:00     EXPIRED
/// ```
async fn list_links(admin: &Admin) -> Result<()> {
    println!("{}", "🔗 Short Links".bright_blue().bold());
    println!();

    let links = admin
        .links
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<34} {:<8} {:<20} {:<8}",
        "Short URL".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Expires".bright_white().bold(),
        "State".bright_white().bold()
    );
    println!("  {}", "─".repeat(77).bright_black());

    let now = Utc::now();
    for link in &links {
        let state = if link.is_expired_at(now) {
            "EXPIRED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<34} {:<8} {:<20} {}",
            link.short_url.cyan(),
            link.click_count,
            format_expiry(link).bright_black(),
            state
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Shows one link with its access summary.
async fn show_link(admin: &Admin, token: &str) -> Result<()> {
    let link = match admin.link_service().get_info(token).await {
        Ok(link) => link,
        Err(AppError::NotFound { .. }) => {
            println!("{}", "❌ Link not found".red());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to load link: {}", e)),
    };

    println!("{}", "🔗 Link".bright_blue().bold());
    println!();
    println!("  Short URL:  {}", link.short_url.cyan());
    println!("  Target:     {}", link.original_url);
    println!(
        "  Created:    {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("  Expires:    {}", format_expiry(&link));
    println!("  Clicks:     {}", link.click_count.to_string().bold());
    println!();

    match admin.analytics_service().get_analytics_summary(token).await {
        Ok(summary) => {
            println!(
                "{} {}",
                "Recent accesses, total:".bright_white().bold(),
                summary.total_count
            );
            for event in &summary.recent_events {
                println!(
                    "  {}  {}",
                    event
                        .opened_date
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string()
                        .bright_black(),
                    event.ip
                );
            }
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", "  No accesses recorded".yellow());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to load analytics: {}", e)),
    }
    println!();

    Ok(())
}

/// Deletes a link and its access events with confirmation prompt.
///
/// Requires confirmation (default: No) unless `--yes` is passed.
async fn delete_link(admin: &Admin, token: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let service = admin.link_service();
    println!("  Short URL: {}", service.format_short_url(token).cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link and all its analytics?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .delete_link(token)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if deleted {
        println!("{}", "✅ Link deleted".green().bold());
    } else {
        println!("{}", "⚠️  Link not found".yellow());
    }
    println!();

    Ok(())
}

/// Displays link, expiry and access totals.
async fn handle_stats(admin: &Admin) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links = admin
        .links
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read links: {}", e))?;
    let events = admin
        .analytics
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read analytics: {}", e))?;

    let now = Utc::now();
    let expired = links.iter().filter(|l| l.is_expired_at(now)).count();
    let clicks: u64 = links.iter().map(|l| l.click_count).sum();

    println!("  Links:          {}", links.len().to_string().bold());
    println!("  Expired links:  {}", expired.to_string().bold());
    println!("  Clicks:         {}", clicks.to_string().bold());
    println!("  Access events:  {}", events.len().to_string().bold());
    println!();

    Ok(())
}

/// Dispatches snapshot file commands.
async fn handle_store_action(action: StoreAction, admin: &Admin) -> Result<()> {
    match action {
        StoreAction::Check => check_stores(admin).await,
    }
}

/// Reads both snapshot files and reports whether they parse.
async fn check_stores(admin: &Admin) -> Result<()> {
    println!("{}", "🔍 Checking snapshot files...".bright_blue().bold());
    println!();

    let links_ok = report(
        "Links",
        JsonFileStore::<Link>::new(&admin.config.links_file)
            .read_all()
            .await
            .map(|items| items.len()),
        &admin.config.links_file.display().to_string(),
    );
    let analytics_ok = report(
        "Analytics",
        JsonFileStore::<AccessEvent>::new(&admin.config.analytics_file)
            .read_all()
            .await
            .map(|items| items.len()),
        &admin.config.analytics_file.display().to_string(),
    );

    println!();
    if links_ok && analytics_ok {
        println!("{}", "✅ All snapshots readable".green().bold());
        Ok(())
    } else {
        anyhow::bail!("One or more snapshot files are unreadable")
    }
}

fn report<E: std::fmt::Display>(name: &str, result: Result<usize, E>, path: &str) -> bool {
    match result {
        Ok(count) => {
            println!(
                "  {:<10} {} ({} records, {})",
                name,
                "OK".green(),
                count,
                path.bright_black()
            );
            true
        }
        Err(e) => {
            println!("  {:<10} {} {}", name, "FAILED".red(), e);
            false
        }
    }
}

fn format_expiry(link: &Link) -> String {
    link.expires_at
        .map(|e| e.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string())
}
