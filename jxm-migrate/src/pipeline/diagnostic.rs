//! Diagnostic types for the rewrite pipeline.
//!
//! Passes record anything they could not rewrite as diagnostics instead of
//! failing, so one odd construct never blocks the rest of a template.

use std::path::PathBuf;

use serde::Serialize;

/// How much attention a diagnostic needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something was left unchanged and needs a manual look.
    Warning,
    /// Recorded for snapshots and logs, never shown in the report.
    Info,
}

impl Severity {
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message from a pipeline pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The pass that produced this diagnostic.
    pub pass: String,
    /// The diagnostic message.
    pub message: String,
    /// Template the diagnostic is about.
    pub file: Option<PathBuf>,
    /// 1-based line in the original template.
    pub line: Option<usize>,
}

impl Diagnostic {
    fn new(severity: Severity, pass: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            pass: pass.into(),
            message: message.into(),
            file: None,
            line: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(pass: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, pass, message)
    }

    /// Create a new info diagnostic.
    pub fn info(pass: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, pass, message)
    }

    /// Attach the template this diagnostic is about.
    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attach a line number.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, " (at {}:{})", file.display(), line)?,
            (Some(file), None) => write!(f, " (at {})", file.display())?,
            (None, Some(line)) => write!(f, " (at line {})", line)?,
            (None, None) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_info() {
        let diag = Diagnostic::info("imports", "<Table> matches no component");
        assert!(!diag.severity.is_warning());
        assert_eq!(diag.pass, "imports");
        assert_eq!(diag.to_string(), "info: <Table> matches no component");
    }

    #[test]
    fn test_diagnostic_with_location() {
        let diag = Diagnostic::warning("slots", "mixed conditional")
            .in_file("components/Card.jinja")
            .at_line(12);
        assert!(diag.severity.is_warning());
        assert_eq!(
            diag.to_string(),
            "warning: mixed conditional (at components/Card.jinja:12)"
        );
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
