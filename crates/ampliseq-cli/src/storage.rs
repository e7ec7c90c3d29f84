//! Mapping storage locations to local paths and publishing results

use crate::errors::StorageError;
use crate::logger;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Published output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputReference {
    pub local_path: PathBuf,
    pub remote_path: String,
}

/// Storage collaborator: fetches inputs to local paths and publishes outputs
pub trait StorageResolver {
    fn resolve_dir(&self, location: &str) -> Result<PathBuf, StorageError>;
    fn resolve_file(&self, location: &str) -> Result<PathBuf, StorageError>;
    fn publish(&self, local_dir: &Path, destination: &str) -> Result<OutputReference, StorageError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Dir,
    File,
}

/// Split `scheme://rest`, returning `None` for anything that is not a URI
fn split_uri(location: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = location.split_once("://")?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
    valid.then_some((scheme, rest))
}

/// Filesystem-backed resolver
///
/// Plain paths and `file://` URIs are used as-is. Other URIs are looked up
/// under the staging root as `<root>/<scheme>/<bucket>/<key>`. Resolved paths
/// are always absolute, since the pipeline runs from its own work dir.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    staging_root: Option<PathBuf>,
}

impl LocalStorage {
    pub fn new(staging_root: Option<PathBuf>) -> Self {
        LocalStorage { staging_root }
    }

    fn local_candidate(&self, location: &str) -> Result<PathBuf, StorageError> {
        let Some((scheme, rest)) = split_uri(location) else {
            return Ok(PathBuf::from(location));
        };

        if scheme.eq_ignore_ascii_case("file") {
            return Ok(PathBuf::from(rest));
        }

        let root = self
            .staging_root
            .as_ref()
            .ok_or_else(|| StorageError::Unresolvable {
                location: location.to_string(),
                reason: format!("no staging root configured for {}:// locations", scheme),
            })?;

        let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));
        let mut path = root.join(scheme);
        if !bucket.is_empty() {
            path.push(bucket);
        }
        for part in key.split('/').filter(|p| !p.is_empty()) {
            if part == ".." {
                return Err(StorageError::Unresolvable {
                    location: location.to_string(),
                    reason: "parent directory segments are not allowed".to_string(),
                });
            }
            path.push(part);
        }
        Ok(path)
    }

    fn resolve(&self, location: &str, kind: Kind) -> Result<PathBuf, StorageError> {
        if location.trim().is_empty() {
            return Err(StorageError::Unresolvable {
                location: location.to_string(),
                reason: "empty location".to_string(),
            });
        }

        let mut path = self.local_candidate(location)?;
        if path.is_relative() {
            let cwd = env::current_dir().map_err(|e| StorageError::Unresolvable {
                location: location.to_string(),
                reason: format!("cannot determine current directory: {}", e),
            })?;
            path = cwd.join(path);
        }

        let matches_kind = match kind {
            Kind::Dir => path.is_dir(),
            Kind::File => path.is_file(),
        };
        if !matches_kind {
            return Err(StorageError::NotFound(path));
        }

        logger::debug(&format!("Resolved {} -> {}", location, path.display()));
        Ok(path)
    }
}

impl StorageResolver for LocalStorage {
    fn resolve_dir(&self, location: &str) -> Result<PathBuf, StorageError> {
        self.resolve(location, Kind::Dir)
    }

    fn resolve_file(&self, location: &str) -> Result<PathBuf, StorageError> {
        self.resolve(location, Kind::File)
    }

    fn publish(&self, local_dir: &Path, destination: &str) -> Result<OutputReference, StorageError> {
        if !local_dir.is_dir() {
            return Err(StorageError::NotFound(local_dir.to_path_buf()));
        }

        let file_count = WalkDir::new(local_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .count();
        logger::info(&format!(
            "Publishing {} ({} files) to {}",
            local_dir.display(),
            file_count,
            destination
        ));

        Ok(OutputReference {
            local_path: local_dir.to_path_buf(),
            remote_path: destination.to_string(),
        })
    }
}
