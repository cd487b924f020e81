//! Configuration management for Courier
//!
//! This module defines the main `Config` struct and its sub-structs,
//! responsible for holding all application settings. It uses the `figment`
//! crate to load configuration from a `courier.toml` file and merge it
//! with environment variables and command-line arguments.

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::dispatch::DispatchMode;

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// The logging level for the application (an `EnvFilter` directive,
    /// e.g. "info" or "courier=debug").
    pub log_level: String,
    /// Configuration for the dispatch manager.
    pub dispatch: DispatchConfig,
    /// Configuration for delivery output.
    pub output: OutputConfig,
}

/// Configuration for the dispatch manager.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DispatchConfig {
    /// The operating mode: "batch" or "fan-out".
    pub mode: DispatchMode,
}

/// The format for stdout output.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    PlainText,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("JSON"),
            OutputFormat::PlainText => f.write_str("Plain Text"),
        }
    }
}

/// Configuration for delivery output.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    /// The format to use for stdout output.
    pub format: OutputFormat,
}

impl Config {
    /// Loads the application configuration, layering sources in priority
    /// order: built-in defaults, the TOML file, `COURIER_*` environment
    /// variables, and finally command-line arguments.
    ///
    /// The file defaults to `courier.toml` in the working directory and
    /// may be absent; a path given explicitly on the command line must
    /// exist.
    pub fn load(cli: Cli) -> Result<Self> {
        if let Some(path) = &cli.config {
            if !path.exists() {
                anyhow::bail!("Config file not found at specified path: {}", path.display());
            }
        }
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from("courier.toml"));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_path))
            // Allow overriding with environment variables, e.g.
            // COURIER_DISPATCH__MODE=fan-out
            .merge(Env::prefixed("COURIER_").split("__"))
            .merge(cli)
            .extract()?;
        Ok(config)
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            dispatch: DispatchConfig {
                mode: DispatchMode::Batch,
            },
            output: OutputConfig {
                format: OutputFormat::PlainText,
            },
        }
    }
}
