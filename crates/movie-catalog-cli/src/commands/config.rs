use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use movie_catalog_config::{Config, PathManager};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;

pub fn run_config(cmd: crate::ConfigCommands, config: &Config, config_path: &PathBuf, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show => show_config(config, config_path, output),
        crate::ConfigCommands::Init { force } => init_config(config_path, force, output),
    }
}

fn show_config(config: &Config, config_path: &PathBuf, output: &Output) -> Result<()> {
    let seeds = config.seed_movies();
    let log_path = config.logging.log_path(&PathManager::default());

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_path.display().to_string(),
            "config_file_exists": config_path.exists(),
            "catalog": {
                "seed_defaults": config.catalog.seed_defaults,
                "seed_movies": seeds,
            },
            "staging": { "max_image_bytes": config.staging.max_image_bytes },
            "logging": {
                "level": config.logging.level,
                "json": config.logging.json_enabled(),
                "file": log_path.as_ref().map(|file| file.display().to_string()),
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    println!("\n{}", "Configuration".bright_cyan().bold());
    if !config_path.exists() {
        output.warn(format!(
            "No config file at {} (using defaults). Run 'movie-catalog config init' to create one.",
            config_path.display()
        ));
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config file"), Cell::new(config_path.display())]);
    table.add_row(vec![
        Cell::new("Seed sample films"),
        Cell::new(yes_no(config.catalog.seed_defaults)),
    ]);
    table.add_row(vec![Cell::new("Seed movies"), Cell::new(seeds.len())]);
    table.add_row(vec![
        Cell::new("Max image size"),
        Cell::new(format!("{} bytes", config.staging.max_image_bytes)),
    ]);
    table.add_row(vec![Cell::new("Log level"), Cell::new(&config.logging.level)]);
    let json_logs = match config.logging.json {
        Some(json) => yes_no(json).to_string(),
        None => format!("{} (auto)", yes_no(config.logging.json_enabled())),
    };
    table.add_row(vec![Cell::new("JSON logs"), Cell::new(json_logs)]);
    table.add_row(vec![
        Cell::new("Log file"),
        Cell::new(
            log_path
                .as_ref()
                .map(|file| file.display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);

    Ok(())
}

fn init_config(config_path: &PathBuf, force: bool, output: &Output) -> Result<()> {
    if config_path.exists() && !force {
        output.warn(format!(
            "Config file already exists at {}. Use --force to overwrite it.",
            config_path.display()
        ));
        return Ok(());
    }

    Config::default()
        .save_to_file(config_path)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_path.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_path.display()));
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
