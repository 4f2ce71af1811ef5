//! Installed application resolver.
//!
//! Toolbox installs every IDE build into its own directory named after the
//! build identifier, with the application bundle directly inside:
//!
//! ```text
//! Toolbox/apps/IDEA-U/ch-0/231.8109.175/IntelliJ IDEA.app
//! Toolbox/apps/Goland/ch-0/231.9011.35/GoLand.app
//! ```
//!
//! The resolver maps each build identifier to its bundle path. Bundles are
//! never descended into.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

/// File extension of an installed application bundle.
pub const BUNDLE_EXTENSION: &str = "app";

/// Build identifier to bundle path.
pub type InstalledApps = HashMap<String, String>;

/// Returns `true` if `file_name` ends with the bundle extension.
#[must_use]
pub fn is_bundle_name(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext == BUNDLE_EXTENSION)
}

/// Walks `suite_root` and maps each bundle's build identifier (its parent
/// directory name) to the bundle path.
///
/// If two bundles share a build identifier the one walked last wins. Walk
/// errors are logged and skipped; a missing root yields an empty map.
#[must_use]
pub fn find_installed_apps(suite_root: &Path) -> InstalledApps {
    let mut installed = InstalledApps::new();
    let mut walker = WalkDir::new(suite_root).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "Skipping unreadable entry in installation suite");
                continue;
            }
        };

        if !is_bundle_name(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let Some(build_number) = entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
        else {
            continue;
        };

        debug!(
            build_number = %build_number,
            path = %entry.path().display(),
            "Application bundle found"
        );
        installed.insert(build_number, entry.path().to_string_lossy().into_owned());

        if entry.file_type().is_dir() {
            walker.skip_current_dir();
        }
    }

    installed
}
