//! CLI module for Taskroute
//!
//! Provides commands:
//! - `route`: Select a model for a task and print the selection
//! - `analyze`: Print the analysis of a task without routing it
//! - `export`: Print the configuration for downstream consumers
//! - `replay`: Feed recorded usage events through a router and print metrics

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use taskroute_core::{CostProjection, TaskContext, TaskRouter};
use tracing::debug;

pub mod replay;

/// Taskroute CLI
#[derive(Parser, Debug)]
#[command(name = "taskroute")]
#[command(about = "Route development tasks to the right model profile")]
#[command(version)]
pub struct Cli {
    /// Routing document (.json or .toml)
    #[arg(long, short, env = "TASKROUTE_CONFIG", default_value = "config/routing.json")]
    pub config: PathBuf,

    /// Accumulated windows per month used for the monthly cost estimate
    #[arg(
        long = "periods-per-month",
        value_name = "FACTOR",
        default_value = "30",
        allow_hyphen_values = true,
        value_parser = parse_projection
    )]
    pub projection: CostProjection,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select a model for a task
    Route {
        /// Task description
        text: String,
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Analyze a task without selecting a model
    Analyze {
        /// Task description
        text: String,
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Print the routing configuration
    Export,
    /// Replay a JSON array of usage events and print metrics
    Replay {
        /// File with `[{"model", "task", "tokens", "success"}]` entries
        file: PathBuf,
    },
}

/// Task context flags
#[derive(Args, Debug, Default)]
pub struct ContextArgs {
    /// Full context as JSON; the flags below override its fields
    #[arg(long = "context")]
    pub json: Option<String>,
    /// Number of files touched
    #[arg(long)]
    pub file_count: Option<u32>,
    /// Needs compliance review
    #[arg(long)]
    pub compliance_review: bool,
    /// Spans multiple services
    #[arg(long)]
    pub multiple_services: bool,
    /// Has security implications
    #[arg(long)]
    pub security: bool,
    /// Caller is budget constrained
    #[arg(long)]
    pub budget_constraint: bool,
}

impl ContextArgs {
    /// Build the task context
    pub fn into_context(self) -> Result<TaskContext> {
        let mut context: TaskContext = match self.json.as_deref() {
            Some(json) => serde_json::from_str(json).context("Failed to parse --context JSON")?,
            None => TaskContext::default(),
        };

        if self.file_count.is_some() {
            context.file_count = self.file_count;
        }
        context.requires_compliance_review |= self.compliance_review;
        context.affects_multiple_services |= self.multiple_services;
        context.has_security_implications |= self.security;
        context.budget_constraint |= self.budget_constraint;
        Ok(context)
    }
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    };

    let router = TaskRouter::from_path(&cli.config)
        .with_context(|| format!("Failed to load routing config {}", cli.config.display()))?
        .with_cost_projection(cli.projection);
    debug!(config = %cli.config.display(), "Router ready");

    match command {
        Commands::Route { text, context } => {
            let context = context.into_context()?;
            print_json(&router.select_model(&text, &context))
        }
        Commands::Analyze { text, context } => {
            let context = context.into_context()?;
            print_json(&router.analyze(&text, &context))
        }
        Commands::Export => print_json(&router.export_config()),
        Commands::Replay { file } => print_json(&replay::run(&router, &file)?),
    }
}

fn parse_projection(value: &str) -> std::result::Result<CostProjection, String> {
    let factor: f64 = value.parse().map_err(|e| format!("{e}"))?;
    CostProjection::new(factor).map_err(|e| e.to_string())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_route() {
        let cli = Cli::try_parse_from([
            "taskroute",
            "--config",
            "routing.toml",
            "route",
            "Fix the login bug",
            "--file-count",
            "4",
            "--security",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("routing.toml"));
        let Some(Commands::Route { text, context }) = cli.command else {
            panic!("expected route command");
        };
        assert_eq!(text, "Fix the login bug");

        let context = context.into_context().unwrap();
        assert_eq!(context.file_count, Some(4));
        assert!(context.has_security_implications);
        assert!(!context.requires_compliance_review);
    }

    #[test]
    fn test_flags_override_context_json() {
        let args = ContextArgs {
            json: Some(r#"{"fileCount": 2, "urgency": "high"}"#.to_string()),
            file_count: Some(9),
            compliance_review: true,
            ..Default::default()
        };
        let context = args.into_context().unwrap();
        assert_eq!(context.file_count, Some(9));
        assert!(context.requires_compliance_review);
        assert_eq!(context.urgency, Some(taskroute_core::Urgency::High));
    }

    #[test]
    fn test_periods_per_month_validated() {
        let cli = Cli::try_parse_from(["taskroute", "export"]).unwrap();
        assert_eq!(cli.projection, CostProjection::default());

        let cli = Cli::try_parse_from(["taskroute", "--periods-per-month", "4.5", "export"])
            .unwrap();
        assert_eq!(cli.projection.periods_per_month(), 4.5);

        for bad in ["-1", "NaN", "inf", "thirty"] {
            let parsed = Cli::try_parse_from(["taskroute", "--periods-per-month", bad, "export"]);
            assert!(parsed.is_err(), "{bad}");
        }
    }

    #[test]
    fn test_bad_context_json() {
        let args = ContextArgs {
            json: Some("{not json".to_string()),
            ..Default::default()
        };
        assert!(args.into_context().is_err());
    }
}
