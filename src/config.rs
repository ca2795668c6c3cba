use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::chart::ChartOptions;
use crate::error::ChartError;

pub const CONFIG_ENV: &str = "RELCHART_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "relchart.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    /// Chart switches; filters live under `[chart.filter]`
    #[serde(default)]
    pub chart: ChartOptions,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Write the `.gv` description instead of calling Graphviz
    #[serde(default)]
    pub norender: bool,
    #[serde(default = "default_dot_program")]
    pub dot_program: String,
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            norender: false,
            dot_program: default_dot_program(),
            format: default_format(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("chart.png")
}

fn default_dot_program() -> String {
    "dot".to_string()
}

fn default_format() -> String {
    "png".to_string()
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) first.
    /// Looks for the config file in this order:
    /// 1. Path specified in RELCHART_CONFIG environment variable (must exist)
    /// 2. ./relchart.toml in current directory (optional; defaults apply when missing)
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load_from(Path::new(&path)),
            Err(_) => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from(default_path)
                } else {
                    log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and validate a specific config file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.validate()?;
        log::debug!("Loaded configuration from {}", config_path.display());

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.render.output_path.as_os_str().is_empty() {
            anyhow::bail!("render.output_path must not be empty");
        }

        if self.render.dot_program.trim().is_empty() {
            anyhow::bail!("render.dot_program must not be empty");
        }

        if self.render.format.trim().is_empty() || self.render.format.contains('.') {
            anyhow::bail!(
                "render.format must be a bare Graphviz output format such as \"png\", got \"{}\"",
                self.render.format
            );
        }

        let filter = &self.chart.filter;
        let lists = [
            ("include_heroes", &filter.include_heroes),
            ("exclude_heroes", &filter.exclude_heroes),
            ("include_relationships", &filter.include_relationships),
            ("exclude_relationships", &filter.exclude_relationships),
        ];
        for (name, list) in lists {
            if let Some(entries) = list {
                if entries.iter().any(|e| e.trim().is_empty()) {
                    return Err(ChartError::Config(format!(
                        "chart.filter.{} must not contain empty entries",
                        name
                    ))
                    .into());
                }
            }
        }

        // An empty include list would select nothing at all.
        let includes = [
            ("include_heroes", &filter.include_heroes),
            ("include_relationships", &filter.include_relationships),
        ];
        for (name, list) in includes {
            if list.as_ref().is_some_and(|entries| entries.is_empty()) {
                return Err(ChartError::Config(format!(
                    "chart.filter.{} must not be empty; omit it to include everything",
                    name
                ))
                .into());
            }
        }

        Ok(())
    }
}
