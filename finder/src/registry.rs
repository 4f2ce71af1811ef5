//! Deduplicated, recency-ordered project registry.
//!
//! The registry keeps one [`ResolvedProject`] per identity key: the one with
//! the greatest last-opened timestamp. After all records are ingested,
//! [`ProjectRegistry::finalize`] fixes the listing order, most recent first.
//!
//! # Example
//!
//! ```
//! use jbrecents_finder::registry::ProjectRegistry;
//! use jbrecents_finder::types::{
//!     BuildDetails, IdentityScope, ProjectIdentity, ProjectRecord, ResolvedProject,
//! };
//!
//! let record = ProjectRecord {
//!     identity: ProjectIdentity::new("myrepo", "GoLand"),
//!     path: "/code/myrepo".to_string(),
//!     build_timestamp: 0,
//!     last_opened: 1_700_000_000,
//!     build: BuildDetails::default(),
//!     opened: false,
//! };
//!
//! let mut registry = ProjectRegistry::new(IdentityScope::PerApplication);
//! registry.ingest(vec![ResolvedProject::resolved(record, "/apps/GoLand.app")]);
//! registry.finalize();
//!
//! assert_eq!(registry.filter("REPO").len(), 1);
//! assert!(registry.lookup("myrepo", "GoLand").is_ok());
//! ```

use std::cmp::Reverse;
use std::collections::HashMap;

use thiserror::Error;

use crate::types::{IdentityScope, ProjectIdentity, ResolvedProject};

/// Errors from registry queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No project with the given identity exists.
    #[error("project {name} ({application}) not found")]
    NotFound { name: String, application: String },
}

/// Canonical set of discovered projects.
#[derive(Debug, Default)]
pub struct ProjectRegistry {
    scope: IdentityScope,
    projects: HashMap<ProjectIdentity, ResolvedProject>,
    sorted: Vec<ResolvedProject>,
}

impl ProjectRegistry {
    #[must_use]
    pub fn new(scope: IdentityScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    /// Merges `projects` into the registry.
    ///
    /// An incoming project replaces an existing one with the same key only if
    /// it was opened strictly later. Unresolved projects are skipped.
    pub fn ingest(&mut self, projects: impl IntoIterator<Item = ResolvedProject>) {
        for project in projects {
            if !project.valid {
                continue;
            }

            let key = self.scope.key_for(project.identity());
            let newer = match self.projects.get(&key) {
                Some(existing) => project.last_opened() > existing.last_opened(),
                None => true,
            };
            if newer {
                self.projects.insert(key, project);
            }
        }
    }

    /// Fixes the listing order: last opened descending, then name and
    /// application ascending.
    pub fn finalize(&mut self) {
        let mut sorted: Vec<ResolvedProject> = self.projects.values().cloned().collect();
        sorted.sort_by(|a, b| {
            Reverse(a.last_opened())
                .cmp(&Reverse(b.last_opened()))
                .then_with(|| a.identity().cmp(b.identity()))
        });
        self.sorted = sorted;
    }

    /// Returns the finalized listing.
    #[must_use]
    pub fn list(&self) -> &[ResolvedProject] {
        &self.sorted
    }

    /// Returns finalized projects whose display name contains `query`,
    /// ignoring case, in listing order.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&ResolvedProject> {
        let query = query.to_lowercase();
        self.sorted
            .iter()
            .filter(|project| project.name().to_lowercase().contains(&query))
            .collect()
    }

    /// Looks up a project by display name and owning application.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no such project was ingested.
    pub fn lookup(&self, name: &str, application: &str) -> Result<&ResolvedProject, RegistryError> {
        let identity = ProjectIdentity::new(name, application);
        self.projects
            .get(&self.scope.key_for(&identity))
            .filter(|project| project.identity() == &identity)
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
                application: application.to_string(),
            })
    }

    /// Number of distinct projects ingested.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BuildDetails, ProjectRecord};

    fn project(name: &str, application: &str, last_opened: i64) -> ResolvedProject {
        ResolvedProject::resolved(
            ProjectRecord {
                identity: ProjectIdentity::new(name, application),
                path: format!("/code/{name}/{last_opened}"),
                build_timestamp: 0,
                last_opened,
                build: BuildDetails::default(),
                opened: false,
            },
            format!("/apps/{application}.app"),
        )
    }

    fn finalized(scope: IdentityScope, projects: Vec<ResolvedProject>) -> ProjectRegistry {
        let mut registry = ProjectRegistry::new(scope);
        registry.ingest(projects);
        registry.finalize();
        registry
    }

    fn names(projects: &[&ResolvedProject]) -> Vec<String> {
        projects.iter().map(|p| p.name().to_string()).collect()
    }

    // =========================================================================
    // Ingestion
    // =========================================================================

    #[test]
    fn latest_wins_in_either_order() {
        for order in [[10, 20], [20, 10]] {
            let registry = finalized(
                IdentityScope::PerApplication,
                order.iter().map(|t| project("a", "GoLand", *t)).collect(),
            );

            assert_eq!(registry.len(), 1);
            assert_eq!(registry.list()[0].last_opened(), 20);
        }
    }

    #[test]
    fn equal_timestamp_keeps_first() {
        let mut first = project("a", "GoLand", 10);
        first.record.path = "/first".to_string();
        let mut second = project("a", "GoLand", 10);
        second.record.path = "/second".to_string();

        let registry = finalized(IdentityScope::PerApplication, vec![first, second]);

        assert_eq!(registry.list()[0].record.path, "/first");
    }

    #[test]
    fn unresolved_projects_are_skipped() {
        let unresolved = ResolvedProject::unresolved(project("a", "GoLand", 10).record);

        let registry = finalized(IdentityScope::PerApplication, vec![unresolved]);

        assert!(registry.is_empty());
        assert!(registry.list().is_empty());
    }

    #[test]
    fn per_application_scope_keeps_both() {
        let registry = finalized(
            IdentityScope::PerApplication,
            vec![
                project("myrepo", "IntellijIdea", 10),
                project("myrepo", "GoLand", 20),
            ],
        );

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn global_scope_merges_across_applications() {
        for projects in [
            vec![
                project("myrepo", "IntellijIdea", 10),
                project("myrepo", "GoLand", 20),
            ],
            vec![
                project("myrepo", "GoLand", 20),
                project("myrepo", "IntellijIdea", 10),
            ],
        ] {
            let registry = finalized(IdentityScope::Global, projects);

            assert_eq!(registry.len(), 1);
            assert_eq!(registry.list()[0].identity().application, "GoLand");
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[test]
    fn list_is_most_recent_first_with_stable_ties() {
        let registry = finalized(
            IdentityScope::PerApplication,
            vec![
                project("b", "GoLand", 5),
                project("old", "GoLand", 1),
                project("a", "GoLand", 5),
                project("new", "GoLand", 9),
            ],
        );

        let listed: Vec<_> = registry.list().iter().collect();
        assert_eq!(names(&listed), vec!["new", "a", "b", "old"]);
    }

    #[test]
    fn list_is_empty_before_finalize() {
        let mut registry = ProjectRegistry::new(IdentityScope::PerApplication);
        registry.ingest(vec![project("a", "GoLand", 1)]);

        assert!(registry.list().is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn filter_is_case_insensitive_and_ordered() {
        let registry = finalized(
            IdentityScope::PerApplication,
            vec![
                project("Backend-API", "GoLand", 1),
                project("frontend", "WebStorm", 3),
                project("docs", "WebStorm", 2),
            ],
        );

        assert_eq!(
            names(&registry.filter("END")),
            vec!["frontend", "Backend-API"]
        );
        assert!(registry.filter("nothing").is_empty());
    }

    #[test]
    fn empty_filter_returns_full_listing() {
        let registry = finalized(
            IdentityScope::PerApplication,
            vec![project("x", "GoLand", 1), project("y", "GoLand", 2)],
        );

        let all: Vec<_> = registry.list().iter().collect();
        assert_eq!(registry.filter(""), all);
    }

    #[test]
    fn lookup_by_identity() {
        let registry = finalized(
            IdentityScope::PerApplication,
            vec![project("myrepo", "GoLand", 1)],
        );

        let found = registry.lookup("myrepo", "GoLand").unwrap();
        assert_eq!(found.last_opened(), 1);
        assert_eq!(
            registry.lookup("myrepo", "Rider").unwrap_err(),
            RegistryError::NotFound {
                name: "myrepo".to_string(),
                application: "Rider".to_string(),
            }
        );
    }

    #[test]
    fn not_found_display() {
        let err = RegistryError::NotFound {
            name: "myrepo".to_string(),
            application: "GoLand".to_string(),
        };
        assert_eq!(err.to_string(), "project myrepo (GoLand) not found");
    }

    #[test]
    fn lookup_under_global_scope_checks_application() {
        let registry = finalized(
            IdentityScope::Global,
            vec![
                project("myrepo", "IntellijIdea", 10),
                project("myrepo", "GoLand", 20),
            ],
        );

        assert!(registry.lookup("myrepo", "GoLand").is_ok());
        assert!(registry.lookup("myrepo", "IntellijIdea").is_err());
    }
}
