use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use depaudit::{
    cache::Cache,
    checker::VulnerabilityTable,
    config::Config,
    logging,
    output::{print_outdated, print_report_saved, print_scan, print_unused},
    AuditOptions, Auditor, NpmRegistry,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

#[derive(Parser)]
#[command(name = "depaudit")]
#[command(
    author,
    version,
    about = "Audit package.json for outdated, unused, and vulnerable dependencies"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every check and print the results
    Scan,

    /// List dependencies behind the registry's latest release
    Outdated,

    /// List dependencies no source file appears to reference
    Unused,

    /// Run every check and save the results as JSON
    Report,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().with_context(|| {
        format!(
            "failed to load config file {}",
            Config::config_path().display()
        )
    })?;

    let root = std::env::current_dir().context("failed to resolve the working directory")?;
    let auditor = build_auditor(&config, &root)?;

    let manifest = auditor.read_manifest()?;
    let deps = &manifest.dependencies;

    match cli.command {
        Commands::Scan => {
            let findings = with_spinner("Checking dependencies...", auditor.scan(deps)).await?;
            print_scan(manifest.name.as_deref(), deps.len(), &findings);
        }
        Commands::Outdated => {
            let outdated = with_spinner("Checking registry...", auditor.outdated(deps)).await;
            print_outdated(&outdated);
        }
        Commands::Unused => {
            let unused = auditor.unused(deps).await?;
            print_unused(&unused);
        }
        Commands::Report => {
            let report = with_spinner("Generating report...", auditor.save_report(deps)).await?;
            print_report_saved(&report, &auditor.options().report_path);
        }
    }

    Ok(())
}

fn build_auditor(config: &Config, root: &Path) -> Result<Auditor> {
    let mut registry = NpmRegistry::with_options(&config.registry_url, config.request_timeout())
        .context("failed to set up the registry client")?;

    if config.cache_ttl_hours > 0 {
        registry = registry.with_cache(Cache::with_ttl_hours(config.cache_ttl_hours));
    }

    Ok(Auditor::new(
        Arc::new(registry),
        VulnerabilityTable::builtin(),
        AuditOptions::from_config(config, root),
    ))
}

/// Shows a spinner on stderr while `task` runs.
async fn with_spinner<F: Future>(message: &str, task: F) -> F::Output {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());

    let output = task.await;
    pb.finish_and_clear();
    output
}
