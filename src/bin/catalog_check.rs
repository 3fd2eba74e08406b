//! Catalog diagnostic tool
//!
//! Fetches a feedback-code catalog (from the configured backend or a local
//! JSON capture), normalizes it, and reports what each role would see and
//! which fields every code requires.
//!
//! Usage:
//!   cargo run --bin catalog-check
//!   cargo run --bin catalog-check -- --file captures/feedback_codes.json
//!   cargo run --bin catalog-check -- --url https://collections.example.com --json

use anyhow::{Context, Result};
use clap::Parser;
use feedback_engine::client::{CatalogSource, FileCatalogSource, HttpCatalogSource};
use feedback_engine::engine::{extra_required_fields, visible_codes};
use feedback_engine::types::{FieldKind, RequiredFieldSet, Role};
use feedback_engine::{CodeCatalog, FeedbackConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog-check")]
#[command(about = "Inspect a feedback-code catalog: per-role visibility and required fields")]
#[command(version)]
struct CliArgs {
    /// Load the catalog from a JSON file instead of the backend
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Override the backend base URL from the config
    #[arg(long)]
    url: Option<String>,

    /// Override the session token from the config
    #[arg(long, env = "FEEDBACK_TOKEN")]
    token: Option<String>,

    /// Print the normalized catalog as JSON instead of a report
    #[arg(long)]
    json: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    show_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let mut config = FeedbackConfig::load();
    if let Some(url) = &args.url {
        config.backend.base_url = url.clone();
    }
    if let Some(token) = &args.token {
        config.backend.token = token.clone();
    }

    if args.show_config {
        println!("{}", config.to_toml().context("Failed to render config")?);
        return Ok(());
    }

    let source: Box<dyn CatalogSource> = match &args.file {
        Some(path) => Box::new(FileCatalogSource::new(path)),
        None => Box::new(HttpCatalogSource::from_config(&config)),
    };

    let raw = source
        .fetch_raw()
        .await
        .context("Failed to fetch the feedback-code listing")?;
    let catalog = CodeCatalog::normalize(raw);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    print_report(&catalog);
    Ok(())
}

fn print_report(catalog: &CodeCatalog) {
    println!("Catalog: {} codes", catalog.len());
    println!();

    for role in [Role::Caller, Role::Executive, Role::Admin] {
        let visible = visible_codes(catalog, role);
        println!("{:<10} sees {:>3} codes: {}", role, visible.len(), visible.join(", "));
    }
    println!();

    // Admin ordering covers every code
    for code in visible_codes(catalog, Role::Admin) {
        let entry = match catalog.get(&code) {
            Some(entry) => entry,
            None => continue,
        };

        println!("{} [{}] {}", entry.code, entry.category, entry.description);
        match &entry.requirements {
            RequiredFieldSet::Flat(fields) => {
                if fields.is_empty() {
                    println!("  no fields");
                } else {
                    println!("  fields: {}", describe_fields(fields));
                }
            }
            RequiredFieldSet::BySubCode(options) => {
                if options.is_empty() {
                    println!("  sub-codes: none defined yet");
                }
                for (sub_code, fields) in options {
                    println!("  sub-code {}: {}", sub_code, describe_fields(fields));
                }
            }
        }
        for extra in extra_required_fields(Some(code.as_str())) {
            println!("  always required: {extra}");
        }
        println!();
    }
}

fn describe_fields(fields: &[String]) -> String {
    if fields.is_empty() {
        return "(none)".to_string();
    }
    fields
        .iter()
        .map(|field| format!("{} <{}>", field, FieldKind::classify(field)))
        .collect::<Vec<_>>()
        .join(", ")
}
