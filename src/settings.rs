use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "aoc";
const ENV_PREFIX: &str = "AOC";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub year: i32,
    /// Directory holding `src/dayNN/`.
    pub root: PathBuf,
    /// Program invoked as `<runner> run <file>` and `<runner> test [file]`.
    pub runner: String,
    pub base_url: String,
    #[serde(default)]
    pub session: Option<String>,
}

impl Settings {
    /// Defaults, then `aoc.toml` if present, then `AOC_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX));
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let today = Local::now().date_naive();
        builder
            .set_default("year", i64::from(default_year(today)))?
            .set_default("root", ".")?
            .set_default("runner", "bun")?
            .set_default("base_url", "https://adventofcode.com")?
            .build()?
            .try_deserialize()
    }
}

/// Puzzles unlock in December, so before then the latest event is last year's.
pub fn default_year(today: NaiveDate) -> i32 {
    if today.month() == 12 {
        today.year()
    } else {
        today.year() - 1
    }
}
