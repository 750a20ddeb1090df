//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::config::Config;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Dead-zone radius as a fraction of the outer radius
    #[arg(long, value_name = "RATIO")]
    dead_zone_ratio: Option<f32>,

    /// Outer radius as a fraction of half the keypad's shorter side
    #[arg(long, value_name = "RATIO")]
    ring_ratio: Option<f32>,

    /// Hysteresis band past a sector edge, in degrees
    #[arg(long, value_name = "DEGREES")]
    hysteresis_degrees: Option<f32>,

    /// Radial band around the dead-zone edge, as a fraction of its radius
    #[arg(long, value_name = "RATIO")]
    dead_zone_hysteresis_ratio: Option<f32>,

    /// Rotation offset of the sector grid, in degrees
    #[arg(long, value_name = "DEGREES", allow_hyphen_values = true)]
    rotation_offset_degrees: Option<f32>,

    /// Input-method id of the emoticon keyboard
    #[arg(long, value_name = "ID")]
    emoticon_keyboard: Option<String>,

    /// Default layout file
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(config_path),
            ConfigCommand::Set(args) => args.execute(config_path),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult<()> {
        let config = load_config(config_path)?;

        if self.json {
            print_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.dead_zone_ratio.is_none()
            && self.ring_ratio.is_none()
            && self.hysteresis_degrees.is_none()
            && self.dead_zone_hysteresis_ratio.is_none()
            && self.rotation_offset_degrees.is_none()
            && self.emoticon_keyboard.is_none()
            && self.layout.is_none()
    }

    /// Execute set command
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --dead-zone-ratio, \
                 --ring-ratio, --hysteresis-degrees, --dead-zone-hysteresis-ratio, \
                 --rotation-offset-degrees, --emoticon-keyboard, or --layout",
            ));
        }

        let mut config = load_config(config_path)?;

        if let Some(value) = self.dead_zone_ratio {
            config.decoder.dead_zone_ratio = value;
        }
        if let Some(value) = self.ring_ratio {
            config.decoder.ring_ratio = value;
        }
        if let Some(value) = self.hysteresis_degrees {
            config.decoder.hysteresis_degrees = value;
        }
        if let Some(value) = self.dead_zone_hysteresis_ratio {
            config.decoder.dead_zone_hysteresis_ratio = value;
        }
        if let Some(value) = self.rotation_offset_degrees {
            config.decoder.rotation_offset_degrees = value;
        }
        if let Some(id) = &self.emoticon_keyboard {
            config.input.emoticon_keyboard = Some(id.clone());
        }
        if let Some(path) = &self.layout {
            config.paths.layout = Some(path.clone());
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;

        let result = match config_path {
            Some(path) => config.save_to(path),
            None => config.save(),
        };
        result.map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("RingKeys Configuration");
    println!("======================");
    println!();

    println!("Decoder:");
    println!("  Dead Zone Ratio: {}", config.decoder.dead_zone_ratio);
    println!("  Ring Ratio: {}", config.decoder.ring_ratio);
    println!("  Hysteresis: {}°", config.decoder.hysteresis_degrees);
    println!(
        "  Dead Zone Hysteresis Ratio: {}",
        config.decoder.dead_zone_hysteresis_ratio
    );
    println!("  Rotation Offset: {}°", config.decoder.rotation_offset_degrees);
    println!();

    println!("Input:");
    match &config.input.emoticon_keyboard {
        Some(id) => println!("  Emoticon Keyboard: {id}"),
        None => println!("  Emoticon Keyboard: (not configured)"),
    }
    println!();

    println!("Paths:");
    match &config.paths.layout {
        Some(path) => println!("  Layout: {}", path.display()),
        None => println!("  Layout: (built-in)"),
    }
    println!();
}
