//! CLI entrypoint for coursegen
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;
mod logging;

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use commands::{Cli, OutputFormat};
use coursegen_application::{GeneratedContent, GenerationService};
use coursegen_infrastructure::{ConfigLoader, FileConfig, JsonlGenerationLogger, RoutingGateway};
use std::sync::Arc;
use tracing::{info, warn};

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_deref()).map_err(|e| anyhow!("Failed to load config: {}", e))
}

fn render(content: &GeneratedContent, format: OutputFormat) -> Result<String> {
    Ok(match (format, content) {
        (OutputFormat::Pretty, GeneratedContent::Chat(reply)) => reply.clone(),
        (OutputFormat::Pretty, _) => serde_json::to_string_pretty(content)?,
        (OutputFormat::Json, _) => serde_json::to_string(content)?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let file_config = load_config(&cli)?;
    let issues = file_config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("{}", issue);
        } else {
            warn!("{}", issue.message);
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration");
    }

    // === Dependency Injection ===
    let gateway = Arc::new(RoutingGateway::from_config(&file_config.provider_config())?);
    info!("Enabled providers: {:?}", gateway.enabled());

    let (generation_config, _) = file_config.generation_config();
    let mut service = GenerationService::new(gateway, generation_config);
    if let Some(path) = &file_config.logging.event_log
        && let Some(logger) = JsonlGenerationLogger::open(path)
    {
        info!("Writing generation events to {}", logger.path().display());
        service = service.with_generation_logger(Arc::new(logger));
    }

    let request = cli.command.into_request()?;
    let content = service.generate(request).await?;

    if content.is_fallback() && !cli.quiet {
        eprintln!("note: generation was unavailable; showing fallback content");
    }
    println!("{}", render(&content, cli.output)?);

    Ok(())
}
