//! Running the pipeline as a child process

use crate::command::{build_command, CommandLine, ResolvedInputs, RunnerSettings};
use crate::errors::TaskError;
use crate::logger;
use crate::params::RunParameters;
use crate::storage::{OutputReference, StorageResolver};
use std::fmt;
use std::fs;
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::time::Instant;

/// Lifecycle of one task run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Running,
    Succeeded,
    Failed,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskState::Running => "running",
            TaskState::Succeeded => "succeeded",
            TaskState::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Executes a command and blocks until it exits
pub trait ProcessRunner {
    fn run(&self, command: &CommandLine, cwd: &Path) -> Result<ExitStatus, TaskError>;
}

/// Spawns the real process with inherited stdio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandLine, cwd: &Path) -> Result<ExitStatus, TaskError> {
        Command::new(command.program())
            .args(command.args())
            .current_dir(cwd)
            .status()
            .map_err(|source| TaskError::Spawn {
                program: command.program().to_string(),
                source,
            })
    }
}

/// Resolve inputs through the storage layer
pub fn resolve_inputs(
    params: &RunParameters,
    storage: &dyn StorageResolver,
) -> Result<ResolvedInputs, TaskError> {
    let input = storage.resolve_dir(&params.readsdir)?;
    let metadata = match params.metafile.as_deref() {
        Some(location) => Some(storage.resolve_file(location)?),
        None => None,
    };
    Ok(ResolvedInputs { input, metadata })
}

/// Run the pipeline once and publish its output directory
///
/// The output reference only exists when the process exited with code 0.
pub fn run_task(
    params: &RunParameters,
    settings: &RunnerSettings,
    destination: &str,
    storage: &dyn StorageResolver,
    runner: &dyn ProcessRunner,
) -> Result<OutputReference, TaskError> {
    let inputs = resolve_inputs(params, storage)?;
    let command = build_command(params, &inputs, settings);
    logger::debug(&format!("Pipeline command: {}", command));

    fs::create_dir_all(&settings.work_dir).map_err(|e| {
        TaskError::Config(format!(
            "Failed to create work dir {}: {}",
            settings.work_dir.display(),
            e
        ))
    })?;

    logger::step(&format!("Task {}", TaskState::Running));
    let start = Instant::now();
    let status = runner.run(&command, &settings.work_dir)?;
    logger::record_exit(&command.to_string(), &status);

    if !status.success() {
        logger::step(&format!("Task {}", TaskState::Failed));
        return Err(TaskError::ProcessFailed {
            code: status.code(),
        });
    }

    logger::debug(&format!("Pipeline finished in {:?}", start.elapsed()));
    logger::spinner_start("Publishing results");
    let reference = match storage.publish(&settings.outdir, destination) {
        Ok(reference) => {
            logger::spinner_stop();
            reference
        }
        Err(e) => {
            logger::spinner_error("Publishing results failed");
            logger::step(&format!("Task {}", TaskState::Failed));
            return Err(e.into());
        }
    };
    logger::step(&format!("Task {}", TaskState::Succeeded));
    Ok(reference)
}
