//! jbrecents - recent JetBrains IDE project discovery.
//!
//! This crate finds the projects recently opened in any installed JetBrains
//! IDE, works out which installed IDE build can reopen each one, and serves
//! them newest first with substring search.
//!
//! # Overview
//!
//! Each IDE records its recent projects in
//! `<JetBrains root>/<IDE><version>/options/recentProjects.xml`. Toolbox keeps
//! the installed builds under `<JetBrains root>/Toolbox`. A discovery run reads
//! both trees from scratch; nothing is cached or written.
//!
//! # Modules
//!
//! - [`config`]: Configuration from environment variables
//! - [`error`]: Error types for discovery
//! - [`types`]: Project records and identities
//! - [`locator`]: Finds record files and the Toolbox directory
//! - [`parser`]: Decodes record files
//! - [`resolver`]: Maps installed build numbers to application bundles
//! - [`reconcile`]: Resolves records to bundles, with product code fallback
//! - [`registry`]: Deduplicated, ordered, searchable project set
//! - [`discovery`]: The full pipeline

pub mod config;
pub mod discovery;
pub mod error;
pub mod locator;
pub mod parser;
pub mod reconcile;
pub mod registry;
pub mod resolver;
pub mod types;

pub use config::Config;
pub use discovery::discover;
pub use error::{DiscoveryError, Result};
pub use registry::{ProjectRegistry, RegistryError};
pub use types::{BuildDetails, IdentityScope, ProjectIdentity, ProjectRecord, ResolvedProject};
