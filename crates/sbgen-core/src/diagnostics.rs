use std::fmt;

/// How bad a reported problem is.
///
/// Neither severity stops generation: the offending declaration (or the
/// offending part of it) is skipped and processing continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Generation continues and output is produced, but it may be invalid
    /// or incomplete.
    Warning,
    /// The declaration or member was dropped from the output.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A single diagnostic message.
///
/// `subject` names the declaration the message is about, by source name.
///
/// ```
/// use sbgen_core::{Diagnostic, Severity};
///
/// let diagnostic = Diagnostic::warning("Mesh::getBounds", "method is not public");
/// assert_eq!(diagnostic.severity, Severity::Warning);
/// assert_eq!(diagnostic.to_string(), "warning: Mesh::getBounds: method is not public");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub subject: String,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.subject, self.message)
    }
}

/// A collection of diagnostics accumulated across all phases.
///
/// Every diagnostic is also forwarded to the `log` facade when added, so a
/// binary that installs a logger sees one line per diagnostic as it happens.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `diagnostic` and mirror it to the log.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => log::warn!("{}: {}", diagnostic.subject, diagnostic.message),
            Severity::Error => {
                self.error_count += 1;
                log::error!("{}: {}", diagnostic.subject, diagnostic.message);
            }
        }
        self.diagnostics.push(diagnostic);
    }

    /// Adds a warning about `subject`.
    pub fn warn(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::warning(subject, message));
    }

    /// Adds an error about `subject`.
    pub fn error(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::error(subject, message));
    }

    /// Any error among the recorded problems.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns an iterator over all diagnostics, in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Check whether any diagnostic about `subject` contains `needle`.
    pub fn mentions(&self, subject: &str, needle: &str) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.subject == subject && d.message.contains(needle))
    }

    /// Move every diagnostic out of `other` into this collection.
    pub fn append(&mut self, other: &mut Diagnostics) {
        self.error_count += other.error_count;
        self.diagnostics.append(&mut other.diagnostics);
        other.error_count = 0;
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
