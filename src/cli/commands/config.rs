use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use crate::config::{ConfigOverrides, RangesumConfig};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Display current merged configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

pub fn execute(args: ConfigArgs, custom_config: Option<&str>) -> Result<()> {
    match args.command {
        ConfigCommand::Show { format } => {
            let config = RangesumConfig::load(custom_config, &ConfigOverrides::default())?;
            let rendered = match format {
                ConfigFormat::Toml => {
                    toml::to_string_pretty(&config).context("Failed to render configuration as TOML")?
                }
                ConfigFormat::Json => serde_json::to_string_pretty(&config)
                    .context("Failed to render configuration as JSON")?,
            };
            println!("{}", rendered.trim_end());
        }
    }
    Ok(())
}
