//! ampliseq task library - expose modules for testing
//!
//! Translates typed run parameters into a `nextflow run nf-core/ampliseq`
//! command, runs it, and hands back the published results directory.

pub mod command;
pub mod commands;
pub mod common;
pub mod errors;
pub mod metadata;
pub mod params;
pub mod runner;
pub mod storage;

pub use ampliseq_logger as logger;
pub use common::GlobalOpts;
