//! Display metadata consumed by the hosting platform's UI

use crate::params::{DEFAULT_FPRIMER, DEFAULT_RPRIMER};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub name: &'static str,
    pub email: &'static str,
    pub github: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterMetadata {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    /// Shown as a column in batched mode
    pub batch_table_column: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowMetadata {
    pub display_name: &'static str,
    pub documentation: &'static str,
    pub author: Author,
    pub repository: &'static str,
    pub license: &'static str,
    pub parameters: &'static [ParameterMetadata],
    pub tags: &'static [&'static str],
}

impl WorkflowMetadata {
    pub fn parameter(&self, name: &str) -> Option<&ParameterMetadata> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

const PARAMETERS: &[ParameterMetadata] = &[
    ParameterMetadata {
        name: "readsdir",
        display_name: "Select the Fastq directory location",
        description: "Specify the location of the fastq files.",
        placeholder: None,
        batch_table_column: true,
    },
    ParameterMetadata {
        name: "seqtype",
        display_name: "Sequence type",
        description: "Select if reads are paired or single ends",
        placeholder: None,
        batch_table_column: true,
    },
    ParameterMetadata {
        name: "seqtech",
        display_name: "Sequence technology",
        description: "Select reads technology: Illumina, Illumina Novaseq, PacBio, IonTorrent",
        placeholder: None,
        batch_table_column: true,
    },
    ParameterMetadata {
        name: "fprimer",
        display_name: "Forward primer sequence",
        description: "Sequence for the forward primer",
        placeholder: Some(DEFAULT_FPRIMER),
        batch_table_column: true,
    },
    ParameterMetadata {
        name: "rprimer",
        display_name: "Reverse primer sequence",
        description: "Sequence for the reverse primer",
        placeholder: Some(DEFAULT_RPRIMER),
        batch_table_column: true,
    },
    ParameterMetadata {
        name: "multi",
        display_name: "Multiple runs per sample",
        description: "Select if there are multiple runs per sample organized in subdirectories",
        placeholder: None,
        batch_table_column: true,
    },
    ParameterMetadata {
        name: "itspe",
        display_name: "Paired ITS (Illumina)",
        description: "Select if reads are paired-ends for ITS regions (only Illumina)",
        placeholder: None,
        batch_table_column: true,
    },
    ParameterMetadata {
        name: "metafile",
        display_name: "Metadata file",
        description: "Select metadata file",
        placeholder: None,
        batch_table_column: true,
    },
];

pub const WORKFLOW_METADATA: WorkflowMetadata = WorkflowMetadata {
    display_name: "nf-core/ampliseq workflow",
    documentation: "",
    author: Author {
        name: "Juan Caballero",
        email: "juan.caballero.perez@gmail.com",
        github: "github.com/caballero",
    },
    repository: "https://github.com/caballero/latchbio-nf-ampliseq",
    license: "",
    parameters: PARAMETERS,
    tags: &[],
};

/// Long description of the workflow shown on its landing page
pub const DESCRIPTION: &str = "\
nf-core/ampliseq

Amplicon sequencing analysis using DADA2 and QIIME2 (https://nf-co.re/ampliseq/).
Supports denoising of any amplicon and taxonomic assignment of 16S, ITS, CO1
and 18S amplicons. Paired-end Illumina, single-end Illumina, PacBio and
IonTorrent data are supported. The default is 16S rRNA gene amplicons
sequenced paired-end with Illumina.";
