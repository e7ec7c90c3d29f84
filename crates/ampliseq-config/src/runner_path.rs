//! Locating the pipeline runner executable

use crate::DEFAULT_RUNNER;
use std::path::Path;
use which::which;

/// Resolve the runner executable
///
/// An explicit path that exists wins. Otherwise `nextflow` is looked up on
/// `PATH`; when that fails the bare name is returned and the spawn itself
/// reports the problem.
pub fn resolve_runner(configured: Option<&str>) -> String {
    if let Some(path) = configured {
        if Path::new(path).exists() {
            return path.to_string();
        }
    }

    let name = configured.unwrap_or(DEFAULT_RUNNER);
    match which(name) {
        Ok(path) => path.to_string_lossy().trim().to_string(),
        Err(_) => name.to_string(),
    }
}
