//! CLI commands and argument parsing
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, subcommands, and their arguments.

use crate::config::{init_default_settings, Settings};
use crate::error::{PropstoreError, Result};
use crate::store::{
    parse_property_name, ImportReport, PropertiesProvider, PropertyEntry, DEFAULT_CONTAINER_NAME,
};
use crate::utils::format::{DisplayUtils, OutputFormat, TableFormatter};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;
use tracing::debug;

/// Get the full version string with build information
fn get_version() -> &'static str {
    env!("VERSION_WITH_GIT")
}

/// Get build information for display
pub fn get_build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("GIT_HASH"),
        git_branch: env!("GIT_BRANCH"),
        full_version: env!("VERSION_WITH_GIT"),
    }
}

#[derive(Debug)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_branch: &'static str,
    pub full_version: &'static str,
}

#[derive(Parser)]
#[command(name = "pstore")]
#[command(about = "Inspect and query properties files")]
#[command(version = get_version(), author)]
pub struct Cli {
    /// Properties file to load
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every value of a property (`module.name` or `name`)
    Get {
        /// Qualified property name
        name: String,
    },
    /// List properties
    #[command(alias = "ls")]
    List {
        /// Only list properties of this module
        #[arg(short, long)]
        module: Option<String>,
    },
    /// List modules with their property counts
    Modules,
    /// Parse the properties file and report what was imported
    Check,
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Show detailed version and build information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show configuration file path
    Path,
    /// Write a default configuration file if none exists
    Init,
}

#[derive(Tabled, Serialize)]
struct PropertyRow {
    #[tabled(rename = "Module")]
    module: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<PropertyEntry> for PropertyRow {
    fn from(entry: PropertyEntry) -> Self {
        Self {
            module: entry.module,
            name: entry.name,
            value: entry.value,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ModuleRow {
    #[tabled(rename = "Module")]
    module: String,
    #[tabled(rename = "Properties")]
    properties: usize,
}

#[derive(Tabled, Serialize)]
struct SettingRow {
    #[tabled(rename = "Setting")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl Cli {
    /// Apply command-line overrides on top of loaded settings
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(file) = &self.file {
            settings.properties_file = Some(file.clone());
        }
        if self.debug {
            settings.debug = true;
        }
        if self.no_color {
            settings.no_color = true;
        }
        if let Some(format) = self.format {
            settings.output_json = format == OutputFormat::Json;
        }
    }

    fn output_format(&self, settings: &Settings) -> OutputFormat {
        match self.format {
            Some(format) => format,
            None if settings.output_json => OutputFormat::Json,
            None => OutputFormat::Table,
        }
    }

    pub async fn execute(self, settings: Settings) -> Result<()> {
        let format = self.output_format(&settings);

        match self.command {
            Commands::Get { name } => execute_get_command(&name, &settings),
            Commands::List { module } => execute_list_command(module, format, &settings),
            Commands::Modules => execute_modules_command(format, &settings),
            Commands::Check => execute_check_command(format, &settings),
            Commands::Config { command } => execute_config_command(command, format, &settings).await,
            Commands::Version => execute_version_command(),
        }
    }
}

/// Build a provider for this invocation and import the configured file
pub fn load_provider(settings: &Settings) -> Result<(PropertiesProvider, ImportReport)> {
    let path = settings.require_properties_file()?;
    let provider = PropertiesProvider::with_parse_options(settings.parse_options());

    if settings.preload_system_modules {
        provider.register_system_modules()?;
    }

    let report = provider.import_properties(path)?;
    debug!(
        "Loaded {} containers from {}",
        provider.container_count(),
        path.display()
    );

    Ok((provider, report))
}

fn execute_get_command(name: &str, settings: &Settings) -> Result<()> {
    let (provider, _) = load_provider(settings)?;

    let (module, property) = parse_property_name(name)
        .ok_or_else(|| PropstoreError::invalid_argument(format!("Invalid property name: {}", name)))?;

    let mut values = Vec::new();
    if !provider.get_property_values(module, property, &mut values) {
        let module = if module.is_empty() {
            DEFAULT_CONTAINER_NAME
        } else {
            module
        };
        return Err(PropstoreError::property_not_found(module, property));
    }

    for value in values {
        println!("{}", value);
    }

    Ok(())
}

fn execute_list_command(
    module: Option<String>,
    format: OutputFormat,
    settings: &Settings,
) -> Result<()> {
    let (provider, _) = load_provider(settings)?;

    let rows: Vec<PropertyRow> = provider
        .snapshot()
        .into_iter()
        .filter(|entry| module.as_deref().map_or(true, |m| entry.module == m))
        .map(PropertyRow::from)
        .collect();

    let formatter = TableFormatter::new(format, settings.no_color);
    println!("{}", formatter.format_table(&rows)?);

    Ok(())
}

fn execute_modules_command(format: OutputFormat, settings: &Settings) -> Result<()> {
    let (provider, _) = load_provider(settings)?;

    let rows: Vec<ModuleRow> = provider
        .container_names()
        .into_iter()
        .filter_map(|name| {
            provider.container(&name).map(|container| ModuleRow {
                properties: container.len(),
                module: name,
            })
        })
        .collect();

    let formatter = TableFormatter::new(format, settings.no_color);
    println!("{}", formatter.format_table(&rows)?);

    Ok(())
}

fn execute_check_command(format: OutputFormat, settings: &Settings) -> Result<()> {
    let (provider, report) = load_provider(settings)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let display = DisplayUtils::new(settings.no_color);
    let imported = report.imported.to_string();
    let skipped = report.skipped.to_string();
    let comments = report.comments.to_string();
    let modules = provider.container_count().to_string();

    println!(
        "{}",
        display.format_key_value_pairs(&[
            ("Imported", imported.as_str()),
            ("Skipped", skipped.as_str()),
            ("Comments", comments.as_str()),
            ("Modules", modules.as_str()),
        ])
    );

    if report.skipped > 0 {
        display.print_warning(&format!("{} malformed lines were skipped", report.skipped));
    } else {
        display.print_success("All property lines parsed");
    }

    Ok(())
}

async fn execute_config_command(
    command: ConfigCommands,
    format: OutputFormat,
    settings: &Settings,
) -> Result<()> {
    match command {
        ConfigCommands::Show => execute_config_show(format, settings),
        ConfigCommands::Path => {
            println!("{}", Settings::get_config_path()?.display());
            Ok(())
        }
        ConfigCommands::Init => {
            let path = Settings::get_config_path()?;
            let display = DisplayUtils::new(settings.no_color);

            if init_default_settings(&path).await? {
                display.print_success(&format!("Created {}", path.display()));
            } else {
                display.print_info(&format!("{} already exists", path.display()));
            }
            Ok(())
        }
    }
}

fn execute_config_show(format: OutputFormat, settings: &Settings) -> Result<()> {
    let rows = vec![
        SettingRow {
            key: "properties_file".to_string(),
            value: settings
                .properties_file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<not set>".to_string()),
        },
        SettingRow {
            key: "comment_prefixes".to_string(),
            value: settings.comment_prefixes.join(" "),
        },
        SettingRow {
            key: "trim_whitespace".to_string(),
            value: settings.trim_whitespace.to_string(),
        },
        SettingRow {
            key: "preload_system_modules".to_string(),
            value: settings.preload_system_modules.to_string(),
        },
        SettingRow {
            key: "debug".to_string(),
            value: settings.debug.to_string(),
        },
        SettingRow {
            key: "output_json".to_string(),
            value: settings.output_json.to_string(),
        },
        SettingRow {
            key: "no_color".to_string(),
            value: settings.no_color.to_string(),
        },
    ];

    let formatter = TableFormatter::new(format, settings.no_color);
    println!("{}", formatter.format_table(&rows)?);

    Ok(())
}

fn execute_version_command() -> Result<()> {
    let build_info = get_build_info();

    println!("propstore CLI");
    println!("=============");
    println!("Version:      {}", build_info.version);
    println!("Full Version: {}", build_info.full_version);
    println!("Git Hash:     {}", build_info.git_hash);
    println!("Git Branch:   {}", build_info.git_branch);

    Ok(())
}
