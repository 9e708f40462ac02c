//! CLI entrypoint for consilium
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Context, Result};
use clap::Parser;
use consilium_application::{ExecutionParams, RunCaseUseCase};
use consilium_domain::{medical_board, CaseInput};
use consilium_infrastructure::{ConfigLoader, OpenRouterGenerator};
use consilium_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting consilium");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };
    config.validate().context("invalid configuration")?;

    // Panel is fixed at startup: a malformed graph is fatal here, before
    // any case is accepted.
    let panel = if config.panel.is_configured() {
        config.panel.to_panel().context("invalid panel definition")?
    } else {
        medical_board()
    };

    let case = match &cli.case {
        Some(text) => match CaseInput::try_new(text.clone()) {
            Some(case) => case,
            None => bail!("Case description cannot be empty."),
        },
        None => bail!("Case description is required."),
    };

    // === Dependency Injection ===
    let api_key = match &config.generator.api_key {
        Some(key) => key.clone(),
        None => bail!("No API key configured. Set OPENROUTER_API_KEY."),
    };

    let model = cli
        .model
        .clone()
        .unwrap_or_else(|| config.generator.model.clone());
    let generator = Arc::new(
        OpenRouterGenerator::new(api_key)
            .with_base_url(config.generator.base_url.clone())
            .with_model(model.clone()),
    );

    let deadline_seconds = cli.timeout.or(config.generator.timeout_seconds);
    let params = ExecutionParams::default().with_task_deadline(match deadline_seconds {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => None,
    });

    // Print header
    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|                    Consilium Panel                         |");
        println!("+============================================================+");
        println!();
        println!("Case: {}", case);
        println!(
            "Panel: {}",
            panel
                .specs()
                .iter()
                .map(|spec| spec.worker().role())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Model: {}", model);
        println!();
    }

    // Create use case with injected generator
    let use_case = RunCaseUseCase::new(Arc::new(panel), generator).with_params(params);

    // Execute with or without progress reporting
    let result = if cli.quiet {
        use_case.run(case).await
    } else {
        let progress = ProgressReporter::new();
        use_case.run_with_progress(case, &progress).await
    };

    let report = match result {
        Ok(report) => report,
        Err(error) => {
            let role = error.failed_role().unwrap_or("scheduler").to_string();
            let kind = error.failure_kind().unwrap_or("internal").to_string();
            eprintln!(
                "{}",
                ConsoleFormatter::format_failure(&role, &kind, &error.to_string())
            );
            std::process::exit(1);
        }
    };

    // Output results
    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&report),
        OutputFormat::Decision => ConsoleFormatter::format_decision_only(&report),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };

    println!("{}", output);

    Ok(())
}
