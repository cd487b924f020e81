//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using
//! the `clap` crate. These arguments are parsed at startup and then merged
//! as the highest-priority layer on top of the `courier.toml` file and
//! environment variables.

use clap::Parser;
use figment::{
    util::nest,
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// A notification construction and dispatch demo.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dispatch mode: "batch" or "fan-out".
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Logging level directive (e.g. "debug" or "courier=trace").
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit delivered notifications as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

/// Inserts `value` at a dotted `key` path. The CLI layer has to nest the
/// same way the file and env layers do, or the merge would leave the
/// overridden value sitting next to the original instead of replacing it.
fn insert_nested(dict: &mut Dict, key: &str, value: Value) {
    if let Some(entries) = nest(key, value).into_dict() {
        dict.extend(entries);
    }
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(mode) = &self.mode {
            insert_nested(&mut dict, "dispatch.mode", Value::from(mode.clone()));
        }

        if let Some(level) = &self.log_level {
            insert_nested(&mut dict, "log_level", Value::from(level.clone()));
        }

        // `--json` is a plain switch; absence means "leave the configured
        // format alone", so only an explicit flag is merged.
        if self.json {
            insert_nested(&mut dict, "output.format", Value::from("Json"));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
