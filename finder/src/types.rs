//! Project record types shared by the discovery pipeline.
//!
//! Records move through three shapes: a [`ProjectRecord`] straight out of the
//! parser, a [`ResolvedProject`] once an installed IDE has been matched, and
//! finally an entry in the registry keyed by [`ProjectIdentity`]. All types
//! serialize to camelCase JSON for the CLI's `--json` output.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Product codes published for the IDE family.
pub const KNOWN_PRODUCT_CODES: &[&str] = &[
    "AI", "OC", "CL", "DB", "GO", "IC", "IU", "PS", "PC", "PY", "RD", "RM", "WS", "IE", "MPS", "PE",
];

/// Returns `true` if `code` is one of [`KNOWN_PRODUCT_CODES`].
#[must_use]
pub fn is_known_product_code(code: &str) -> bool {
    KNOWN_PRODUCT_CODES.contains(&code)
}

/// Identifies a logical project across every record file.
///
/// `application` is the owning application identifier taken from the record
/// file's location (e.g. `IntelliJIdea`, `GoLand`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdentity {
    pub name: String,
    pub application: String,
}

impl ProjectIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>, application: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            application: application.into(),
        }
    }
}

impl fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.application)
    }
}

/// Build information recorded by the IDE that last opened a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDetails {
    /// Bare build identifier with the product code prefix removed (e.g. `231.8109.175`).
    pub build_number: String,

    /// IDE family code (e.g. `IU`, `GO`).
    pub production_code: String,
}

/// A project entry parsed from a record file, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub identity: ProjectIdentity,

    /// Project location with the home directory placeholder substituted.
    pub path: String,

    /// Build timestamp in seconds.
    pub build_timestamp: i64,

    /// Last-opened timestamp in seconds.
    pub last_opened: i64,

    pub build: BuildDetails,

    /// Whether the IDE reported the project as currently open.
    pub opened: bool,
}

/// A project record matched to an installed application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedProject {
    #[serde(flatten)]
    pub record: ProjectRecord,

    /// Path of the application bundle that can reopen the project.
    pub app_path: String,

    /// `true` only if resolution succeeded.
    pub valid: bool,
}

impl ResolvedProject {
    /// Wraps a record that was matched to `app_path`.
    #[must_use]
    pub fn resolved(record: ProjectRecord, app_path: impl Into<String>) -> Self {
        Self {
            record,
            app_path: app_path.into(),
            valid: true,
        }
    }

    /// Wraps a record that could not be matched to any installed application.
    #[must_use]
    pub fn unresolved(record: ProjectRecord) -> Self {
        Self {
            record,
            app_path: String::new(),
            valid: false,
        }
    }

    #[must_use]
    pub fn identity(&self) -> &ProjectIdentity {
        &self.record.identity
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.identity.name
    }

    #[must_use]
    pub fn last_opened(&self) -> i64 {
        self.record.last_opened
    }
}

/// How the registry decides that two records are the same logical project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityScope {
    /// Key by display name and owning application.
    #[default]
    PerApplication,

    /// Key by display name only, so one project opened from several IDEs
    /// collapses into a single entry.
    Global,
}

impl IdentityScope {
    /// Returns the registry key for `identity` under this scope.
    #[must_use]
    pub fn key_for(self, identity: &ProjectIdentity) -> ProjectIdentity {
        match self {
            Self::PerApplication => identity.clone(),
            Self::Global => ProjectIdentity::new(identity.name.clone(), String::new()),
        }
    }
}

impl FromStr for IdentityScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "application" | "per_application" => Ok(Self::PerApplication),
            "global" => Ok(Self::Global),
            other => Err(format!("expected 'application' or 'global', got '{other}'")),
        }
    }
}
