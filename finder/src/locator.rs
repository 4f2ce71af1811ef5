//! Locator for per-application recent project record files.
//!
//! Every JetBrains IDE keeps its recent projects list under its own
//! versioned configuration directory:
//!
//! ```text
//! ~/Library/Application Support/JetBrains/
//! +-- IntelliJIdea2023.1/
//! |   +-- options/recentProjects.xml
//! +-- GoLand2023.2/
//! |   +-- options/recentProjects.xml
//! +-- Rider2023.1/
//! |   +-- options/recentSolutions.xml
//! +-- Toolbox/                          # installation suite marker
//! ```
//!
//! The owning application identifier is the first path segment below the
//! root with its trailing version number removed (`IntelliJIdea2023.1`
//! becomes `IntelliJIdea`).

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{DiscoveryError, Result};

/// File names that hold recent project records.
pub const RECORD_FILE_NAMES: &[&str] = &["recentProjects.xml", "recentSolutions.xml"];

static VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[0-9]+.?)*$").expect("valid pattern"));

/// A record file together with the application that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFile {
    /// Owning application identifier (e.g. `GoLand`).
    pub application: String,

    /// Full path of the record file.
    pub path: PathBuf,
}

/// Result of walking the JetBrains root.
#[derive(Debug, Clone)]
pub struct LocatedRecords {
    /// Record files in walk order.
    pub files: Vec<RecordFile>,

    /// The installation suite directory found directly under the root.
    pub suite_dir: PathBuf,
}

/// Returns `true` if `file_name` is one of [`RECORD_FILE_NAMES`].
#[must_use]
pub fn is_record_file_name(file_name: &str) -> bool {
    RECORD_FILE_NAMES.contains(&file_name)
}

/// Derives the owning application identifier for a record file.
///
/// Returns `None` if `path` is not below `root` or sits directly in it.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use jbrecents_finder::locator::application_from_path;
///
/// let root = Path::new("/jb");
/// let path = Path::new("/jb/IntelliJIdea2023.1/options/recentProjects.xml");
/// assert_eq!(application_from_path(root, path).as_deref(), Some("IntelliJIdea"));
/// ```
#[must_use]
pub fn application_from_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components();

    let segment = match components.next()? {
        Component::Normal(segment) => segment.to_string_lossy(),
        _ => return None,
    };
    // The record file itself is not an application directory.
    components.next()?;

    Some(VERSION_SUFFIX.replace(&segment, "").into_owned())
}

/// Walks `config.projects_root` and collects every record file not owned by
/// an ignored application.
///
/// Also detects the installation suite: a directory directly under the root
/// whose name contains `config.suite_marker`.
///
/// # Errors
///
/// - [`DiscoveryError::Walk`] on any I/O error during the walk, including a
///   missing root.
/// - [`DiscoveryError::MissingInstallationSuite`] if the walk completes
///   without finding the suite directory.
pub fn locate(config: &Config) -> Result<LocatedRecords> {
    let root = config.projects_root.as_path();
    let mut files = Vec::new();
    let mut suite_dir = None;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy();

        let top_level_dir = entry.depth() == 1 && entry.file_type().is_dir();
        if top_level_dir && name.contains(&config.suite_marker) {
            if suite_dir.is_none() {
                debug!(path = %entry.path().display(), "Installation suite found");
                suite_dir = Some(entry.path().to_path_buf());
            }
            continue;
        }

        if !entry.file_type().is_file() || !is_record_file_name(&name) {
            continue;
        }

        let Some(application) = application_from_path(root, entry.path()) else {
            debug!(path = %entry.path().display(), "Record file outside an application dir");
            continue;
        };

        if config.is_ignored(&application) {
            debug!(application = %application, "Skipping ignored application");
            continue;
        }

        debug!(
            application = %application,
            path = %entry.path().display(),
            "Record file located"
        );
        files.push(RecordFile {
            application,
            path: entry.into_path(),
        });
    }

    let suite_dir = suite_dir.ok_or_else(|| DiscoveryError::MissingInstallationSuite {
        root: root.to_path_buf(),
    })?;

    Ok(LocatedRecords { files, suite_dir })
}
