//! Translation of run parameters into the pipeline command line

use crate::errors::TaskError;
use crate::params::{RunParameters, SeqTech, SeqType};
use ampliseq_config::Config;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Local paths produced by the storage layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    pub input: PathBuf,
    pub metadata: Option<PathBuf>,
}

/// Fixed parts of the command: what to run and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerSettings {
    pub program: String,
    pub pipeline: String,
    pub profile: String,
    pub work_dir: PathBuf,
    pub outdir: PathBuf,
}

impl RunnerSettings {
    /// Settings from the config file, with a relative work dir anchored at
    /// the current directory
    pub fn from_config(config: &Config) -> Result<Self, TaskError> {
        let mut work_dir = config.get_work_dir();
        let mut outdir = config.get_output_dir();
        if work_dir.is_relative() {
            let cwd = env::current_dir().map_err(|e| {
                TaskError::Config(format!("Cannot determine current directory: {}", e))
            })?;
            work_dir = cwd.join(work_dir);
            outdir = cwd.join(outdir);
        }

        Ok(RunnerSettings {
            program: config.get_runner_path(),
            pipeline: config.get_pipeline(),
            profile: config.get_profile(),
            work_dir,
            outdir,
        })
    }
}

impl Default for RunnerSettings {
    fn default() -> Self {
        let config = Config::default();
        RunnerSettings {
            program: ampliseq_config::DEFAULT_RUNNER.to_string(),
            pipeline: config.get_pipeline(),
            profile: config.get_profile(),
            work_dir: config.get_work_dir(),
            outdir: config.get_output_dir(),
        }
    }
}

/// Program plus ordered arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        CommandLine {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn flag_with_value(&mut self, flag: &str, value: impl Into<String>) -> &mut Self {
        self.arg(flag).arg(value)
    }

    pub fn path_arg(&mut self, flag: &str, path: &Path) -> &mut Self {
        self.flag_with_value(flag, path.to_string_lossy())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Program followed by every argument
    pub fn tokens(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.tokens().into_iter().map(shell_quote).collect();
        f.write_str(&rendered.join(" "))
    }
}

fn shell_quote(token: &str) -> String {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
    if plain {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

/// Flag for the sequencing technology; illumina is the pipeline default
pub fn technology_flag(seqtech: SeqTech) -> Option<&'static str> {
    match seqtech {
        SeqTech::Illumina => None,
        SeqTech::Novaseq => Some("--illumina_novaseq"),
        SeqTech::Pacbio => Some("--pacbio"),
        SeqTech::Iontorrent => Some("--iontorrent"),
    }
}

/// Flag for the read layout; paired is the pipeline default
pub fn layout_flag(seqtype: SeqType) -> Option<&'static str> {
    match seqtype {
        SeqType::Paired => None,
        SeqType::Single => Some("--single_end"),
    }
}

/// Build the pipeline command for one run
///
/// Optional flags are appended in a fixed order: primer pair, layout,
/// technology, paired ITS, multiple runs, metadata.
pub fn build_command(
    params: &RunParameters,
    inputs: &ResolvedInputs,
    settings: &RunnerSettings,
) -> CommandLine {
    let mut cmd = CommandLine::new(settings.program.as_str());
    cmd.arg("run")
        .arg(settings.pipeline.as_str())
        .flag_with_value("-profile", settings.profile.as_str())
        .path_arg("-work-dir", &settings.work_dir)
        .path_arg("--input", &inputs.input)
        .path_arg("--outdir", &settings.outdir);

    if params.has_primer_pair() {
        cmd.flag_with_value("--FW_primer", params.fprimer.as_str())
            .flag_with_value("--RV_primer", params.rprimer.as_str());
    }

    if let Some(flag) = layout_flag(params.seqtype) {
        cmd.arg(flag);
    }

    if let Some(flag) = technology_flag(params.seqtech) {
        cmd.arg(flag);
    }

    if params.itspe {
        cmd.arg("--illumina_pe_its");
    }

    if params.multi {
        cmd.arg("--multiple_sequencing_runs");
    }

    if let Some(metadata) = &inputs.metadata {
        cmd.path_arg("--metadata", metadata);
    }

    cmd
}
