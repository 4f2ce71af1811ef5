//! Error types for jbrecents.
//!
//! This module defines the top-level error returned by a discovery run. Any
//! variant aborts the whole run; no partial results are returned.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// Errors that can occur during project discovery.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// A record file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the JetBrains root failed.
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// No installation suite directory exists under the JetBrains root.
    #[error("JetBrains Toolbox is not found under {}", root.display())]
    MissingInstallationSuite { root: PathBuf },

    /// A record file is not a well-formed recent projects document.
    #[error("malformed record file {}: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// A specialized `Result` type for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
