use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::Serialize;
use std::path::Path;

use super::RangesumConfig;
use crate::parallel::ExecutionMode;
use crate::reducer::RangePolicy;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Command-line values layered on top of every other source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub threshold: Option<u64>,
    pub min_threshold: Option<u64>,
    pub range_policy: Option<RangePolicy>,
    pub mode: Option<ExecutionMode>,
    pub max_threads: Option<usize>,
}

impl ConfigOverrides {
    fn apply(&self, figment: Figment) -> Figment {
        let figment = merge_opt(figment, "reducer.threshold", self.threshold);
        let figment = merge_opt(figment, "reducer.min_threshold", self.min_threshold);
        let figment = merge_opt(figment, "reducer.range_policy", self.range_policy);
        let figment = merge_opt(figment, "parallel.mode", self.mode);
        merge_opt(figment, "parallel.max_threads", self.max_threads)
    }
}

fn merge_opt<T: Serialize>(figment: Figment, key: &str, value: Option<T>) -> Figment {
    match value {
        Some(value) => {
            tracing::trace!("CONFIG LOAD: CLI override for {}", key);
            figment.merge(Serialized::default(key, value))
        }
        None => figment,
    }
}

impl RangesumConfig {
    /// Build the layered provider chain
    ///
    /// Priority, lowest first: embedded defaults, user config, repo config
    /// (both replaced by `custom_config` when given), `RANGESUM_` environment
    /// variables, command-line overrides.
    pub fn figment(custom_config: Option<&str>, overrides: &ConfigOverrides) -> Figment {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            figment = figment.merge(Toml::file(custom_path));
        } else {
            figment = figment
                .merge(Toml::file(Self::user_config_path()))
                .merge(Toml::file("rangesum.toml"));
        }

        figment = figment.merge(Env::prefixed("RANGESUM_").split("__"));
        overrides.apply(figment)
    }

    /// Load, merge, and validate the configuration
    pub fn load(custom_config: Option<&str>, overrides: &ConfigOverrides) -> Result<Self> {
        if let Some(path) = custom_config
            && !Path::new(path).is_file()
        {
            anyhow::bail!("Config file not found: {}", path);
        }

        let config: RangesumConfig = Self::figment(custom_config, overrides)
            .extract()
            .context("Failed to parse configuration")?;

        config.validate().context("Invalid configuration")?;
        tracing::trace!("CONFIG LOAD: Final config = {:?}", config);
        Ok(config)
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/rangesum/config.toml", home),
            Err(_) => "~/.config/rangesum/config.toml".to_string(),
        }
    }
}
