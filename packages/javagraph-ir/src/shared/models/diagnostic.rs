//! Diagnostics surfaced by an analysis run
//!
//! File-local problems never abort a run. They are collected as
//! [`Diagnostic`]s and returned alongside the graph.

use serde::{Deserialize, Serialize};

use super::span::{Location, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Local syntax failure; the parser recovered and the file continues
    ParseError,
    /// The whole file yielded no usable tree
    UnparseableFile,
    /// An import naming only a package (`import a.b;`)
    MalformedImport,
    /// A reference that lies outside the source set
    UnresolvedReference,
    /// A generic parameter instantiated as if it were concrete (`new T()`)
    TypeVariableInstantiation,
    /// Several wildcard imports offer the same simple name
    AmbiguousReference,
    /// Several files declare the same qualified name
    DuplicateDeclaration,
}

impl DiagnosticKind {
    pub fn default_severity(self) -> Severity {
        match self {
            DiagnosticKind::ParseError
            | DiagnosticKind::UnparseableFile
            | DiagnosticKind::DuplicateDeclaration => Severity::Error,
            DiagnosticKind::MalformedImport
            | DiagnosticKind::TypeVariableInstantiation
            | DiagnosticKind::AmbiguousReference => Severity::Warning,
            DiagnosticKind::UnresolvedReference => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub locations: Vec<Location>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: kind.default_severity(),
            kind,
            message: message.into(),
            locations: Vec::new(),
        }
    }

    pub fn at(kind: DiagnosticKind, message: impl Into<String>, path: &str, span: Span) -> Self {
        Self::new(kind, message).with_location(Location::new(path, span))
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Where the diagnostic is reported first; used for ordering
    pub fn primary_location(&self) -> Option<&Location> {
        self.locations.first()
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered by location first so a sorted list reads file by file
impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.locations
            .cmp(&other.locations)
            .then(self.kind.cmp(&other.kind))
            .then(self.severity.cmp(&other.severity))
            .then(self.message.cmp(&other.message))
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        match self.primary_location() {
            Some(loc) => write!(f, "{severity}[{:?}] {loc}: {}", self.kind, self.message),
            None => write!(f, "{severity}[{:?}] {}", self.kind, self.message),
        }
    }
}
