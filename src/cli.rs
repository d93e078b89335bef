//! Command-line host for a single visitor profile.
//!
//! `main.rs` only parses arguments and calls [`run`]; the commands themselves
//! live here so they can be driven against a temporary profile.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::{Args, Parser, Subcommand};

use crate::{publishing::normalize_tags, settings::MeterSettings, AppState};

const ENABLE_LOGS: bool = true;

use crate::log_info;

#[derive(Debug, Parser)]
#[command(name = "readmeter", author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Directory holding the visitor profile (local store and settings)
    #[arg(
        short,
        long,
        env = "READMETER_DATA_DIR",
        default_value = ".readmeter",
        global = true
    )]
    pub data_dir: PathBuf,

    /// Override the stored free-read limit for this invocation
    #[arg(long, env = "READMETER_FREE_LIMIT", global = true)]
    pub free_limit: Option<u32>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Meter a view of an article and print the gate decision
    View {
        article_id: String,

        /// Treat the visitor as signed in (never metered)
        #[arg(long)]
        authenticated: bool,
    },

    /// Show unexpired reads and remaining free reads
    Status,

    /// Forget every recorded read
    Reset,

    /// Normalize a free-form tag list
    Tags { input: String },

    /// Inspect or change the free-read policy
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    /// Persist a new policy. `--free-limit` stays a one-run override.
    Set {
        /// New stored free-read limit
        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        retention_days: Option<u32>,
    },
}

fn open_profile(global: &GlobalOpts) -> Result<(AppState, MeterSettings)> {
    let state = AppState::open(&global.data_dir)?;
    let mut settings = state.settings.meter();
    if let Some(limit) = global.free_limit {
        settings.free_limit = limit;
    }
    Ok((state, settings))
}

/// Execute one parsed command, writing its report to `out`.
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let Cli { global, command } = cli;

    match command {
        Commands::Tags { input } => {
            let tags = normalize_tags(&input);
            if global.json {
                writeln!(out, "{}", serde_json::to_string(&tags)?)?;
            } else {
                writeln!(out, "{}", tags.join(" "))?;
            }
        }
        Commands::View {
            article_id,
            authenticated,
        } => {
            let (state, settings) = open_profile(&global)?;
            let gate = state.gate_with(settings);
            let outcome = gate.check(&article_id, authenticated, Utc::now()).await;
            if global.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
            } else if let Some(prompt) = outcome.view.prompt() {
                writeln!(out, "blocked: {}", prompt.headline)?;
                writeln!(out, "  sign in: {}", prompt.sign_in_href)?;
                writeln!(out, "  sign up: {}", prompt.sign_up_href)?;
            } else {
                writeln!(
                    out,
                    "open ({} of {} free reads used, write {})",
                    outcome.reads_counted,
                    outcome.free_limit,
                    outcome.persisted.as_str()
                )?;
            }
        }
        Commands::Status => {
            let (state, settings) = open_profile(&global)?;
            let free_limit = settings.free_limit;
            let log = state.gate_with(settings).current_log(Utc::now()).await;
            let used = u32::try_from(log.len()).unwrap_or(u32::MAX);
            let remaining = free_limit.saturating_sub(used);
            if global.json {
                let body = serde_json::json!({
                    "reads": log,
                    "freeLimit": free_limit,
                    "remaining": remaining,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            } else {
                for entry in log.iter() {
                    let seen = Utc
                        .timestamp_millis_opt(entry.observed_at_millis)
                        .single()
                        .map(|at| at.to_rfc3339())
                        .unwrap_or_else(|| entry.observed_at_millis.to_string());
                    writeln!(out, "{}  {}", seen, entry.article_id)?;
                }
                writeln!(out, "{remaining} of {free_limit} free reads remaining")?;
            }
        }
        Commands::Reset => {
            let (state, settings) = open_profile(&global)?;
            let outcome = state.gate_with(settings).reset().await;
            log_info!("Read log reset ({})", outcome.as_str());
        }
        Commands::Settings(SettingsCommand::Show) => {
            let (state, _) = open_profile(&global)?;
            writeln!(
                out,
                "{}",
                serde_json::to_string_pretty(&state.settings.meter())?
            )?;
        }
        Commands::Settings(SettingsCommand::Set {
            limit,
            retention_days,
        }) => {
            let (state, _) = open_profile(&global)?;
            let mut updated = state.settings.meter();
            if let Some(limit) = limit {
                updated.free_limit = limit;
            }
            if let Some(days) = retention_days {
                updated.retention_days = days;
            }
            state
                .settings
                .update_meter(updated)
                .context("failed to save settings")?;
            writeln!(
                out,
                "{}",
                serde_json::to_string_pretty(&state.settings.meter())?
            )?;
        }
    }

    Ok(())
}
