//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, SITE_URL_ENV};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.line("");
    ctx.output.line("[store]");
    ctx.output
        .kv("dir", &ctx.config.store.dir.display().to_string());
    ctx.output
        .kv("resolved", &ctx.store_dir().display().to_string());

    ctx.output.line("");
    ctx.output.line("[site]");
    ctx.output.kv("base_url", &ctx.config.site.base_url);
    if std::env::var(SITE_URL_ENV).is_ok() {
        ctx.output.debug(&format!("base_url overridden by {}", SITE_URL_ENV));
    }

    ctx.output.line("");
    ctx.output.line("[catalog]");
    ctx.output
        .kv("availability", ctx.config.catalog.availability.as_str());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("urbno.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let base_url = ctx.config.site.base_url.trim();
    if base_url.is_empty() {
        errors.push("site.base_url is required".to_string());
    } else if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
        errors.push(format!("site.base_url '{}' must start with http:// or https://", base_url));
    } else if base_url.starts_with("http://") {
        warnings.push("site.base_url should use https for canonical links".to_string());
    }

    if ctx.config.store.dir.as_os_str().is_empty() {
        errors.push("store.dir must not be empty".to_string());
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        for error in &errors[1..] {
            ctx.output.error(&format!("Error: {}", error));
        }
        bail!("Error: {} ({} error(s))", errors[0], errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
