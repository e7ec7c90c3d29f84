//! Centralized error types for the ampliseq task
//!
//! Every failure is fatal to the single invocation; nothing here is retried.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading run parameters
#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse parameters YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Errors raised by the storage layer when mapping locations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Cannot resolve '{location}': {reason}")]
    Unresolvable { location: String, reason: String },

    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Errors that end a task run
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Parameter error: {0}")]
    Params(#[from] ParamsError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Pipeline exited with {}", describe_exit(.code))]
    ProcessFailed { code: Option<i32> },
}

impl From<ampliseq_config::ConfigError> for TaskError {
    fn from(e: ampliseq_config::ConfigError) -> Self {
        TaskError::Config(e.to_string())
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
