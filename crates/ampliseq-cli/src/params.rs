//! Typed run parameters for one pipeline invocation

use crate::errors::ParamsError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Sequencing technology of the reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeqTech {
    #[default]
    Illumina,
    Novaseq,
    Pacbio,
    Iontorrent,
}

impl SeqTech {
    pub fn as_str(self) -> &'static str {
        match self {
            SeqTech::Illumina => "illumina",
            SeqTech::Novaseq => "novaseq",
            SeqTech::Pacbio => "pacbio",
            SeqTech::Iontorrent => "iontorrent",
        }
    }
}

impl fmt::Display for SeqTech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read layout: paired-end or single-end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeqType {
    #[default]
    Paired,
    Single,
}

impl SeqType {
    pub fn as_str(self) -> &'static str {
        match self {
            SeqType::Paired => "paired",
            SeqType::Single => "single",
        }
    }
}

impl fmt::Display for SeqType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that drives one pipeline run
///
/// `readsdir` and `metafile` are storage locations, either local paths or
/// remote URIs. They are resolved to local paths before the command is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunParameters {
    pub readsdir: String,
    #[serde(default)]
    pub seqtech: SeqTech,
    #[serde(default)]
    pub seqtype: SeqType,
    #[serde(default)]
    pub fprimer: String,
    #[serde(default)]
    pub rprimer: String,
    #[serde(default)]
    pub itspe: bool,
    #[serde(default)]
    pub multi: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metafile: Option<String>,
}

impl RunParameters {
    /// Load parameters from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ParamsError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ParamsError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String, ParamsError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Both primers are given, so the pair is forwarded to the pipeline
    pub fn has_primer_pair(&self) -> bool {
        !self.fprimer.is_empty() && !self.rprimer.is_empty()
    }
}

/// A named set of default parameters offered as test data
#[derive(Debug, Clone, Copy)]
pub struct LaunchPlan {
    pub name: &'static str,
    pub readsdir: &'static str,
    pub seqtech: SeqTech,
    pub seqtype: SeqType,
    pub fprimer: &'static str,
    pub rprimer: &'static str,
    pub itspe: bool,
    pub multi: bool,
    pub metafile: Option<&'static str>,
}

pub const DEFAULT_FPRIMER: &str = "GTGYCAGCMGCCGCGGTAA";
pub const DEFAULT_RPRIMER: &str = "GGACTACNVGGGTWTCTAAT";

/// 16S test data set
pub const TEST_DATA: LaunchPlan = LaunchPlan {
    name: "Test Data",
    readsdir: "s3://ampliseq_16S/",
    seqtech: SeqTech::Illumina,
    seqtype: SeqType::Paired,
    fprimer: DEFAULT_FPRIMER,
    rprimer: DEFAULT_RPRIMER,
    itspe: false,
    multi: false,
    metafile: Some("s3://ampliseq_16S/metadata.tsv"),
};

impl From<LaunchPlan> for RunParameters {
    fn from(plan: LaunchPlan) -> Self {
        RunParameters {
            readsdir: plan.readsdir.to_string(),
            seqtech: plan.seqtech,
            seqtype: plan.seqtype,
            fprimer: plan.fprimer.to_string(),
            rprimer: plan.rprimer.to_string(),
            itspe: plan.itspe,
            multi: plan.multi,
            metafile: plan.metafile.map(str::to_string),
        }
    }
}
