use crate::command::{build_command, ResolvedInputs, RunnerSettings};
use crate::errors::TaskError;
use crate::logger;
use crate::params::{RunParameters, SeqTech, SeqType, TEST_DATA};
use crate::runner::{run_task, SystemRunner};
use crate::storage::{LocalStorage, StorageResolver};
use crate::GlobalOpts;
use ampliseq_config::Config;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
pub struct RunCommand {
    /// Directory with the fastq files (local path or storage URI)
    #[arg(long, value_name = "LOCATION", required_unless_present_any = ["params", "test_data"])]
    pub readsdir: Option<String>,

    /// Sequencing technology
    #[arg(long, value_enum, default_value_t = SeqTech::Illumina)]
    pub seqtech: SeqTech,

    /// Read layout
    #[arg(long, value_enum, default_value_t = SeqType::Paired)]
    pub seqtype: SeqType,

    /// Forward primer sequence
    #[arg(long, default_value = "")]
    pub fprimer: String,

    /// Reverse primer sequence
    #[arg(long, default_value = "")]
    pub rprimer: String,

    /// Reads are paired-end ITS (Illumina only)
    #[arg(long)]
    pub itspe: bool,

    /// Multiple sequencing runs per sample, organized in subdirectories
    #[arg(long)]
    pub multi: bool,

    /// Metadata file (local path or storage URI)
    #[arg(long, value_name = "LOCATION")]
    pub metafile: Option<String>,

    /// Read all parameters from a YAML file
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = [
            "readsdir", "test_data", "seqtech", "seqtype", "fprimer", "rprimer", "itspe",
            "multi", "metafile",
        ]
    )]
    pub params: Option<PathBuf>,

    /// Use the "Test Data" launch plan
    #[arg(
        long,
        conflicts_with_all = [
            "readsdir", "seqtech", "seqtype", "fprimer", "rprimer", "itspe", "multi", "metafile",
        ]
    )]
    pub test_data: bool,

    /// Print the pipeline command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the output reference as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunCommand {
    /// Collect the run parameters from whichever source was chosen
    pub fn parameters(&self) -> Result<RunParameters, TaskError> {
        if let Some(path) = &self.params {
            logger::debug(&format!("Loading parameters from {}", path.display()));
            return Ok(RunParameters::load(path)?);
        }
        if self.test_data {
            logger::debug(&format!("Using launch plan '{}'", TEST_DATA.name));
            return Ok(RunParameters::from(TEST_DATA));
        }
        let readsdir = self
            .readsdir
            .clone()
            .ok_or_else(|| TaskError::Config("--readsdir is required".to_string()))?;
        Ok(RunParameters {
            readsdir,
            seqtech: self.seqtech,
            seqtype: self.seqtype,
            fprimer: self.fprimer.clone(),
            rprimer: self.rprimer.clone(),
            itspe: self.itspe,
            multi: self.multi,
            metafile: self.metafile.clone(),
        })
    }
}

pub fn handle_run(cmd: RunCommand, _opts: GlobalOpts) -> Result<(), TaskError> {
    let params = cmd.parameters()?;
    let config = Config::load()?;
    let settings = RunnerSettings::from_config(&config)?;
    let storage = LocalStorage::new(config.get_staging_root());

    if cmd.dry_run {
        let inputs = preview_inputs(&params, &storage);
        let command = build_command(&params, &inputs, &settings);
        println!("{}", command);
        return Ok(());
    }

    logger::info(&format!(
        "Running {} ({} {}) from {}",
        settings.pipeline, params.seqtech, params.seqtype, params.readsdir
    ));

    let destination = config.get_destination();
    match run_task(&params, &settings, &destination, &storage, &SystemRunner) {
        Ok(reference) => {
            logger::success(&format!(
                "Results published to {}",
                reference.remote_path.bold()
            ));
            if cmd.json {
                let rendered = serde_json::to_string_pretty(&reference)
                    .map_err(|e| TaskError::Config(e.to_string()))?;
                println!("{}", rendered);
            } else {
                println!("{}", reference.local_path.display());
            }
            Ok(())
        }
        Err(e) => {
            logger::show_log_path();
            Err(e)
        }
    }
}

/// Resolve inputs for display, keeping the raw location when it cannot be staged
fn preview_inputs(params: &RunParameters, storage: &dyn StorageResolver) -> ResolvedInputs {
    let input = storage.resolve_dir(&params.readsdir).unwrap_or_else(|e| {
        logger::warn(&format!("{}; showing location unresolved", e));
        PathBuf::from(&params.readsdir)
    });
    let metadata = params.metafile.as_deref().map(|location| {
        storage.resolve_file(location).unwrap_or_else(|e| {
            logger::warn(&format!("{}; showing location unresolved", e));
            PathBuf::from(location)
        })
    });
    ResolvedInputs { input, metadata }
}
