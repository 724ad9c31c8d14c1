//! CLI administration tool for link-shortener.
//!
//! Works directly on the SQLite file, so links can be managed without the
//! HTTP API or its credentials.
//!
//! # Usage
//!
//! ```bash
//! # Save a link under a generated alias
//! cargo run --bin link-admin -- link add https://example.com
//!
//! # Save a link under a chosen alias
//! cargo run --bin link-admin -- link add https://example.com --alias docs
//!
//! # Show where an alias points
//! cargo run --bin link-admin -- link resolve docs
//!
//! # Delete a link by id
//! cargo run --bin link-admin -- link delete 3
//!
//! # Check the database
//! cargo run --bin link-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `STORAGE_PATH` (required unless `--storage-path` is given): SQLite database file
//! - `ALIAS_LENGTH` (optional): generated alias length, default 6

use link_shortener::application::services::{LinkService, LinkServiceConfig};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::infrastructure::persistence::SqliteLinkRepository;
use link_shortener::utils::alias::{AliasGenerator, validate_alias};
use link_shortener::utils::url_check::is_absolute_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing link-shortener.
#[derive(Parser)]
#[command(name = "link-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "STORAGE_PATH")]
    storage_path: PathBuf,

    /// Length of generated aliases
    #[arg(long, env = "ALIAS_LENGTH", default_value_t = 6)]
    alias_length: usize,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Link {
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
    /// Save a URL
    Add {
        /// Absolute URL to store
        url: String,

        /// Alias to use instead of a generated one
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show the URL stored under an alias
    Resolve {
        /// Alias to look up
        alias: String,
    },

    /// Delete a link by id
    Delete {
        /// Link id
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
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let repository = SqliteLinkRepository::connect(&cli.storage_path, 1)
        .await
        .with_context(|| {
            format!(
                "Failed to open database at {}",
                cli.storage_path.display()
            )
        })?;
    let repository = Arc::new(repository);

    match cli.command {
        Commands::Link { action } => {
            let service = LinkService::new(
                repository,
                Arc::new(AliasGenerator::new()),
                LinkServiceConfig {
                    alias_length: cli.alias_length,
                    ..LinkServiceConfig::default()
                },
            );
            handle_link_action(action, &service).await?
        }
        Commands::Db { action } => handle_db_action(action, repository.as_ref()).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, service: &LinkService) -> Result<()> {
    match action {
        LinkAction::Add { url, alias } => add_link(service, url, alias).await?,
        LinkAction::Resolve { alias } => resolve_link(service, alias).await?,
        LinkAction::Delete { id, yes } => delete_link(service, id, yes).await?,
    }

    Ok(())
}

/// Saves a link after the same checks the HTTP API applies.
async fn add_link(service: &LinkService, url: String, alias: Option<String>) -> Result<()> {
    println!("{}", "🔗 Add Link".bright_blue().bold());
    println!();

    if !is_absolute_url(&url) {
        anyhow::bail!("'{}' is not an absolute URL", url);
    }

    let alias = alias.filter(|a| !a.is_empty());
    if let Some(alias) = &alias {
        validate_alias(alias).map_err(|e| anyhow::anyhow!("{}", e))?;
    }

    let link = service
        .save(&url, alias.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to save link: {}", e))?;

    println!("{}", "✅ Link saved".green().bold());
    println!();
    println!("  ID:    {}", link.id.to_string().bright_black());
    println!("  Alias: {}", link.alias.cyan());
    println!("  URL:   {}", link.url.bright_white());
    println!();

    Ok(())
}

async fn resolve_link(service: &LinkService, alias: String) -> Result<()> {
    let url = service
        .resolve(&alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to resolve '{}': {}", alias, e))?;

    println!("  {} → {}", alias.cyan(), url.bright_white());

    Ok(())
}

/// Deletes a link by id with confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
async fn delete_link(service: &LinkService, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();
    println!("  ID: {}", id.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, repository: &SqliteLinkRepository) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database...".bright_blue());

            repository
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(repository.pool())
                .await?;

            println!("{}", "✅ Database OK".green().bold());
            println!("  Links: {}", links.to_string().bright_green().bold());
        }
    }

    Ok(())
}
