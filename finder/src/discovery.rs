//! End-to-end discovery pipeline.
//!
//! Locates record files, resolves installed applications once, parses every
//! record file, reconciles unresolved builds, and loads the result into a
//! finalized [`ProjectRegistry`]. Any error aborts the run.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{DiscoveryError, Result};
use crate::locator::{locate, RecordFile};
use crate::parser::parse_records;
use crate::reconcile::reconcile;
use crate::registry::ProjectRegistry;
use crate::resolver::find_installed_apps;
use crate::types::ProjectRecord;

/// Reads and parses one located record file.
///
/// # Errors
///
/// - [`DiscoveryError::Io`] if the file cannot be read.
/// - [`DiscoveryError::MalformedRecord`] if it cannot be decoded.
pub fn read_record_file(file: &RecordFile, home_dir: &Path) -> Result<Vec<ProjectRecord>> {
    let bytes = fs::read(&file.path).map_err(|source| DiscoveryError::Io {
        path: file.path.clone(),
        source,
    })?;
    debug!(path = %file.path.display(), "Record file opened");

    let home = home_dir.to_string_lossy();
    let records = parse_records(&bytes, &file.application, &home);
    records.map_err(|source| DiscoveryError::MalformedRecord {
        path: file.path.clone(),
        source,
    })
}

/// Runs a full discovery with `config`.
///
/// # Errors
///
/// Returns the first walk, read, or parse error, or
/// [`DiscoveryError::MissingInstallationSuite`] if Toolbox is not installed.
pub fn discover(config: &Config) -> Result<ProjectRegistry> {
    let located = locate(config)?;

    let suite_root = config
        .toolbox_dir
        .as_deref()
        .unwrap_or(located.suite_dir.as_path());
    let installed = find_installed_apps(suite_root);

    let mut records = Vec::new();
    for file in &located.files {
        records.extend(read_record_file(file, &config.home_dir)?);
    }

    let parsed = records.len();
    let resolved = reconcile(records, &installed);
    let resolved_count = resolved.len();

    let mut registry = ProjectRegistry::new(config.identity_scope);
    registry.ingest(resolved);
    registry.finalize();

    info!(
        record_files = located.files.len(),
        installed_builds = installed.len(),
        parsed,
        resolved = resolved_count,
        projects = registry.len(),
        "Discovery complete"
    );

    Ok(registry)
}
