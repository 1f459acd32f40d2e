#![allow(missing_docs)]

use anyhow::{Context, Result};
use apiverve_mcp::{
    app_config::AppConfig,
    cli::Cli,
    client_paths::ConfigLocator,
    config::ServerDescriptor,
    install::{manual_configuration_snippet, ClientInstall, InstallOptions, InstallReport, Installer},
    MergeOutcome,
};
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(cli.debug, cli.trace);

    let app_config = load_and_log_config()?.unwrap_or_default();

    let target = cli.target.or_else(|| app_config.default_target()).unwrap_or_default();
    let options = InstallOptions {
        dry_run: cli.dry_run,
        backup: cli.backup || app_config.backup_enabled(),
    };
    debug!("Configuring {target:?} with {options:?}");

    let locator = ConfigLocator::from_env().with_overrides(app_config.paths);
    let installer = Installer::new(ServerDescriptor::apiverve(), locator, options);

    println!();
    println!("APIVerve MCP Server Configuration");
    println!();

    let report = installer.configure(target);
    print_report(&report)?;

    if report.is_success() {
        print_next_steps(options.dry_run);
        Ok(())
    } else {
        print_manual_fallback(installer.descriptor())?;
        std::process::exit(1);
    }
}

/// Initialize tracing with the specified debug/trace flags
fn initialize_tracing(debug: bool, trace: bool) {
    let log_level = if trace {
        Level::TRACE
    } else if debug {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::builder().with_default_directive(log_level.into()).from_env_lossy())
        .init();
}

/// Load application configuration and log its status
fn load_and_log_config() -> Result<Option<AppConfig>> {
    let config_path = AppConfig::config_path()?;
    let app_config = AppConfig::load_from(&config_path).context("Failed to load app configuration")?;

    if app_config.is_some() {
        debug!("Loaded app configuration from: {}", config_path.display());
    } else {
        debug!("No app configuration file found at: {}", config_path.display());
    }

    Ok(app_config)
}

fn print_report(report: &InstallReport) -> Result<()> {
    for attempt in &report.attempts {
        match &attempt.result {
            Ok(install) => print_install(install)?,
            Err(e) => eprintln!("Failed to configure {}: {e}", attempt.client),
        }
    }
    Ok(())
}

fn print_install(install: &ClientInstall) -> Result<()> {
    println!("{} config path: {}", install.client, install.path.display());

    if !install.written {
        let json = serde_json::to_string_pretty(&install.document)
            .context("Failed to serialize merged configuration")?;
        println!("Dry run - {} would contain:", install.path.display());
        println!("{json}");
        return Ok(());
    }

    if let Some(backup_path) = &install.backup_path {
        println!("  Backup created: {}", backup_path.display());
    }

    match install.outcome {
        MergeOutcome::Inserted => {
            println!("APIVerve MCP server added to {} config", install.client);
        },
        MergeOutcome::Replaced => {
            println!("APIVerve MCP server updated in {} config", install.client);
        },
        MergeOutcome::Unchanged => {
            println!("APIVerve MCP server already present in {} config", install.client);
        },
    }

    Ok(())
}

fn print_next_steps(dry_run: bool) {
    println!();
    if dry_run {
        println!("Dry run complete - no files were changed.");
        return;
    }

    println!("Configuration complete!");
    println!();
    println!("Next steps:");
    println!("  1. Restart your MCP client (Claude Desktop, VS Code, or Cursor)");
    println!("  2. Sign up at https://apiverve.com");
    println!("  3. Authorize when prompted");
    println!();
}

fn print_manual_fallback(descriptor: &ServerDescriptor) -> Result<()> {
    let snippet = manual_configuration_snippet(descriptor)
        .context("Failed to render manual configuration snippet")?;

    eprintln!();
    eprintln!("Configuration failed.");
    eprintln!();
    eprintln!("Manual configuration:");
    eprintln!("  Add this to your MCP client config:");
    eprintln!();
    for line in snippet.lines() {
        eprintln!("  {line}");
    }
    eprintln!();
    Ok(())
}
