//! Error types for registry building and template transformation.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for migration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// Two distinct template files resolve to the same component name.
    #[error("component name '{name}' is ambiguous")]
    #[diagnostic(
        code(jxm::registry_ambiguity),
        help(
            "'{}' and '{}' both resolve to '{name}', rename one of them or mount its folder under a prefix",
            .first.display(),
            .second.display()
        )
    )]
    RegistryAmbiguity {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Import aliases could not be made unique within one template.
    #[error("no unique import alias for {} in '{}'", .names.join(", "), .file.display())]
    #[diagnostic(
        code(jxm::alias_exhausted),
        help("import these components manually with distinct aliases, then run the migration again")
    )]
    AliasExhausted {
        file: PathBuf,
        alias: String,
        names: Vec<String>,
    },

    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan component folder '{}'", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to serialize pipeline snapshot")]
    Snapshot {
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Whether this error only invalidates the template being transformed.
    ///
    /// Every other error aborts the whole run.
    pub fn is_file_scoped(&self) -> bool {
        matches!(self, Error::AliasExhausted { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
