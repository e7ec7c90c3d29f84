use crate::logger;
use crate::GlobalOpts;
use ampliseq_config::{Config, ConfigError};
use clap::Subcommand;
use colored::*;
use std::fs;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the configured values
    Show,
    /// Set a configuration value
    Set { key: String, value: String },
    /// Get or set the path to the config file.
    /// If `new_path` is provided, the config location is redirected there.
    /// If omitted, the current configuration file path is printed.
    Path {
        /// Optional new config path to set
        new_path: Option<String>,
    },
}

pub fn handle_config(action: Option<ConfigAction>, opts: GlobalOpts) {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => match Config::load() {
            Ok(config) => {
                println!("{}", "Configuration:".bold().green());
                if config.is_empty() {
                    if opts.verbosity_level() > 0 {
                        println!("  {}", "(empty)".yellow());
                    }
                } else {
                    for (key, value) in config.values_iter() {
                        println!("  {}: {}", key.cyan(), value);
                    }
                }
            }
            Err(e) => {
                logger::error(&format!("Failed to load config: {}", e));
            }
        },
        ConfigAction::Set { key, value } => {
            if let Err(e) = set_value(&key, &value) {
                logger::error(&e.to_string());
            } else {
                logger::success(&format!("Set {} = {}", key, value));
            }
        }
        ConfigAction::Path { new_path } => {
            let config_path = Config::path();
            logger::debug(&format!("Reading config from: {}", config_path.display()));

            match new_path {
                Some(p) => {
                    let pointer_path = Config::pointer_path();
                    if let Some(parent) = pointer_path.parent() {
                        if let Err(e) = fs::create_dir_all(parent) {
                            logger::error(&format!("Failed to set config path: {}", e));
                            return;
                        }
                    }

                    if let Err(e) = fs::write(&pointer_path, p.as_bytes()) {
                        logger::error(&format!("Failed to set config path: {}", e));
                        return;
                    }

                    logger::success(&format!("Config path set to {}", p));
                }
                None => {
                    println!("{}", config_path.display());
                }
            }
        }
    }
}

fn set_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let mut config = Config::load()?;
    config.set(key, value.to_string())?;
    config.save()
}
