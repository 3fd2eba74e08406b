//! Scripted form replay
//!
//! Drives a form session through a JSON event script against a captured
//! catalog, printing the selection state, required fields, and validation
//! outcome after each step. Used to reproduce operator reports without a
//! backend or a browser.
//!
//! Usage:
//!   cargo run --bin form-replay -- --catalog captures/feedback_codes.json --script ptp_flow.json
//!   echo '[{"event":"select_code","code":"PAID"}]' | cargo run --bin form-replay -- --catalog captures/feedback_codes.json
//!
//! Script format: a JSON array of events, in order:
//!   {"event": "select_code", "code": "PTP"}
//!   {"event": "select_sub_code", "sub_code": "Billing"}
//!   {"event": "set_field", "field": "Amount", "value": "5000"}
//!   {"event": "submit", "allocation_id": 17}

use anyhow::{Context, Result};
use clap::Parser;
use feedback_engine::client::{CatalogSource, FileCatalogSource};
use feedback_engine::types::Role;
use feedback_engine::{CodeCatalog, FormSession};
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "form-replay")]
#[command(about = "Replay a scripted feedback form interaction against a captured catalog")]
#[command(version)]
struct CliArgs {
    /// Catalog capture (JSON array, same shape as the backend listing)
    #[arg(long, value_name = "PATH")]
    catalog: PathBuf,

    /// Role to open the form as
    #[arg(long, default_value = "admin")]
    role: String,

    /// Event script file; reads stdin when omitted
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ReplayEvent {
    SelectCode { code: String },
    SelectSubCode { sub_code: String },
    SetField { field: String, value: String },
    Submit { allocation_id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let source = FileCatalogSource::new(&args.catalog);
    let raw = source
        .fetch_raw()
        .await
        .context("Failed to read the catalog capture")?;
    let catalog = Arc::new(CodeCatalog::normalize(raw));

    let script = read_script(args.script.as_deref())?;

    let role = Role::parse(&args.role);
    let mut session = FormSession::new(catalog, role);
    println!(
        "session opened: role {}, {} codes visible",
        session.role(),
        session.visible_codes().len()
    );

    for event in script {
        replay(&mut session, event);
    }

    Ok(())
}

fn read_script(path: Option<&std::path::Path>) -> Result<Vec<ReplayEvent>> {
    let contents = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };
    serde_json::from_str(&contents).context("Failed to parse event script")
}

fn replay(session: &mut FormSession, event: ReplayEvent) {
    match event {
        ReplayEvent::SelectCode { code } => {
            println!("-> select_code {code}");
            session.select_code(code);
            print_requirements(session);
        }
        ReplayEvent::SelectSubCode { sub_code } => {
            println!("-> select_sub_code {sub_code}");
            session.select_sub_code(sub_code);
            print_requirements(session);
        }
        ReplayEvent::SetField { field, value } => {
            println!("-> set_field {field} = {value:?}");
            session.set_field(field, value);
        }
        ReplayEvent::Submit { allocation_id } => {
            println!("-> submit allocation {allocation_id}");
            match session.prepare_submission(allocation_id) {
                Ok(submission) => match serde_json::to_string_pretty(&submission) {
                    Ok(json) => println!("   payload:\n{json}"),
                    Err(e) => println!("   payload render failed: {e}"),
                },
                Err(blocked) => {
                    println!("   BLOCKED:");
                    for field in blocked.errors.fields() {
                        for message in blocked.errors.get(field).unwrap_or(&[]) {
                            println!("     {field}: {message}");
                        }
                    }
                }
            }
        }
    }
}

fn print_requirements(session: &FormSession) {
    if session.sub_code_required() && session.selection().sub_code.is_none() {
        let options = session.sub_code_options();
        println!("   sub-code needed, options: {}", options.join(", "));
        return;
    }
    let fields = session.fields_to_validate();
    if fields.is_empty() {
        println!("   no fields required");
    } else {
        println!("   required fields: {}", fields.join(", "));
    }
}
