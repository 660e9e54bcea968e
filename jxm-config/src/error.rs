use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for configuration operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "jxm.toml");
/// ctx.validation_error("at least one folder is required", None);
/// ctx.duplicate_prefix_error("ui", first, second);
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Locate the `nth` quoted occurrence of `value` in the source.
    pub fn find_value_span(&self, value: &str, nth: usize) -> Option<SourceSpan> {
        let needle = format!("\"{}\"", value);
        self.src
            .match_indices(&needle)
            .nth(nth)
            .map(|(offset, _)| SourceSpan::from((offset + 1, value.len())))
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create a missing folder error.
    pub fn missing_folder_error(&self, path: PathBuf, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::MissingFolder {
            src: self.named_source(),
            span,
            path,
        })
    }

    /// Create an invalid prefix error.
    pub fn invalid_prefix_error(
        &self,
        prefix: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidPrefix {
            src: self.named_source(),
            span,
            prefix: prefix.into(),
        })
    }

    /// Create a duplicate prefix error.
    pub fn duplicate_prefix_error(
        &self,
        prefix: impl Into<String>,
        first_span: Option<SourceSpan>,
        second_span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicatePrefix {
            src: self.named_source(),
            first_span,
            second_span,
            prefix: prefix.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'jxm init' to create a configuration file"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse jxm.toml")]
    #[diagnostic(code(jxm::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(jxm::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("component folder '{}' does not exist", .path.display())]
    #[diagnostic(
        code(jxm::missing_folder),
        help("paths are resolved relative to the directory containing jxm.toml")
    )]
    MissingFolder {
        #[source_code]
        src: NamedSource<String>,
        #[label("not a directory")]
        span: Option<SourceSpan>,
        path: PathBuf,
    },

    #[error("invalid folder prefix '{prefix}'")]
    #[diagnostic(
        code(jxm::invalid_prefix),
        help("prefixes may only contain letters, numbers, '.', '_' and '-'")
    )]
    InvalidPrefix {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid prefix")]
        span: Option<SourceSpan>,
        prefix: String,
    },

    #[error("duplicate folder prefix '{prefix}'")]
    #[diagnostic(
        code(jxm::duplicate_prefix),
        help("every prefixed folder needs its own prefix, component names would be ambiguous")
    )]
    DuplicatePrefix {
        #[source_code]
        src: NamedSource<String>,
        #[label("first used here")]
        first_span: Option<SourceSpan>,
        #[label("conflicts with first usage")]
        second_span: Option<SourceSpan>,
        prefix: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_value_span() {
        let ctx = SourceContext::new("a = \"ui\"\nb = \"ui\"\n", "jxm.toml");

        let first = ctx.find_value_span("ui", 0).unwrap();
        let second = ctx.find_value_span("ui", 1).unwrap();

        assert_eq!(first.offset(), 5);
        assert_eq!(first.len(), 2);
        assert_eq!(second.offset(), 14);
        assert!(ctx.find_value_span("ui", 2).is_none());
    }
}
