//! Matching of parsed records to installed applications.
//!
//! A record resolves directly when its bare build number names an installed
//! build. EAP and patched builds often record a build number that no longer
//! exists on disk; those records fall back to any installed copy of the same
//! product code that some other record resolved to. Among several such
//! copies the lexicographically smallest path wins.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::resolver::InstalledApps;
use crate::types::{ProjectRecord, ResolvedProject};

/// Resolves `records` against `installed`.
///
/// Directly resolved records come first, in input order, followed by
/// records resolved through their product code. Records that match neither
/// way are dropped.
#[must_use]
pub fn reconcile(records: Vec<ProjectRecord>, installed: &InstalledApps) -> Vec<ResolvedProject> {
    let mut resolved = Vec::with_capacity(records.len());
    let mut candidates: HashMap<String, BTreeSet<String>> = HashMap::new();
    let mut pending = Vec::new();

    for record in records {
        match installed.get(&record.build.build_number) {
            Some(app_path) => {
                candidates
                    .entry(record.build.production_code.clone())
                    .or_default()
                    .insert(app_path.clone());
                resolved.push(ResolvedProject::resolved(record, app_path.clone()));
            }
            None => pending.push(record),
        }
    }

    for record in pending {
        let fallback = candidates
            .get(&record.build.production_code)
            .and_then(|paths| paths.first());

        match fallback {
            Some(app_path) => {
                debug!(
                    project = %record.identity,
                    build_number = %record.build.build_number,
                    app_path = %app_path,
                    "Resolved by product code"
                );
                resolved.push(ResolvedProject::resolved(record, app_path.clone()));
            }
            None => {
                debug!(
                    project = %record.identity,
                    build_number = %record.build.build_number,
                    production_code = %record.build.production_code,
                    "No installed application, dropping record"
                );
            }
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BuildDetails, ProjectIdentity};

    fn record(name: &str, build_number: &str, production_code: &str) -> ProjectRecord {
        ProjectRecord {
            identity: ProjectIdentity::new(name, "IntelliJIdea"),
            path: format!("/code/{name}"),
            build_timestamp: 0,
            last_opened: 100,
            build: BuildDetails {
                build_number: build_number.to_string(),
                production_code: production_code.to_string(),
            },
            opened: false,
        }
    }

    fn installed(pairs: &[(&str, &str)]) -> InstalledApps {
        pairs
            .iter()
            .map(|(build, path)| ((*build).to_string(), (*path).to_string()))
            .collect()
    }

    #[test]
    fn direct_match() {
        let apps = installed(&[("123.456", "/T/123.456/IntelliJ IDEA.app")]);

        let resolved = reconcile(vec![record("a", "123.456", "IU")], &apps);

        assert_eq!(resolved.len(), 1);
        assert!(resolved[0].valid);
        assert_eq!(resolved[0].app_path, "/T/123.456/IntelliJ IDEA.app");
    }

    #[test]
    fn fallback_picks_smallest_path() {
        let apps = installed(&[("2.0", "/A/2.0"), ("1.0", "/A/1.0")]);
        let records = vec![
            record("new", "2.0", "IU"),
            record("old", "1.0", "IU"),
            record("eap", "3.0-EAP", "IU"),
        ];

        let resolved = reconcile(records, &apps);

        assert_eq!(resolved.len(), 3);
        let eap = resolved.iter().find(|r| r.name() == "eap").unwrap();
        assert_eq!(eap.app_path, "/A/1.0");
        assert!(eap.valid);
    }

    #[test]
    fn fallback_is_independent_of_input_order() {
        let apps = installed(&[("2.0", "/A/2.0"), ("1.0", "/A/1.0")]);
        let records = vec![
            record("eap", "3.0", "IU"),
            record("old", "1.0", "IU"),
            record("new", "2.0", "IU"),
        ];

        let resolved = reconcile(records, &apps);

        let eap = resolved.iter().find(|r| r.name() == "eap").unwrap();
        assert_eq!(eap.app_path, "/A/1.0");
    }

    #[test]
    fn fallback_requires_same_product_code() {
        let apps = installed(&[("1.0", "/A/1.0")]);
        let records = vec![record("idea", "1.0", "IU"), record("go", "9.9", "GO")];

        let resolved = reconcile(records, &apps);

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name(), "idea");
    }

    #[test]
    fn direct_matches_come_before_fallbacks() {
        let apps = installed(&[("1.0", "/A/1.0")]);
        let records = vec![record("eap", "1.1", "IU"), record("stable", "1.0", "IU")];

        let resolved = reconcile(records, &apps);

        let names: Vec<_> = resolved.iter().map(ResolvedProject::name).collect();
        assert_eq!(names, vec!["stable", "eap"]);
    }

    #[test]
    fn nothing_installed() {
        let resolved = reconcile(vec![record("a", "1.0", "IU")], &InstalledApps::new());
        assert!(resolved.is_empty());
    }
}
