//! Cross-file types
//!
//! Core data structures shared by the per-file edge builder and the merge
//! phase: dependency edges, pending references and import resolutions.

use serde::{Deserialize, Serialize};

use crate::features::symbols::domain::{RefContext, SourceUnit};
use crate::shared::models::{Diagnostic, Span};

use super::symbol_table::DeclarationSummary;

/// Dependency edge kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Extends,
    Implements,
    FieldType,
    MethodSignature,
    Instantiation,
    Import,
    /// Local variables, throws clauses, casts, `instanceof`, generic bounds
    TypeUse,
}

impl EdgeKind {
    pub fn from_context(context: RefContext) -> Self {
        match context {
            RefContext::Extends => EdgeKind::Extends,
            RefContext::Implements => EdgeKind::Implements,
            RefContext::FieldType => EdgeKind::FieldType,
            RefContext::Parameter | RefContext::Return => EdgeKind::MethodSignature,
            RefContext::Instantiation => EdgeKind::Instantiation,
            RefContext::LocalVariable
            | RefContext::Throws
            | RefContext::TypeBound
            | RefContext::TypeUse => EdgeKind::TypeUse,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Extends => "extends",
            EdgeKind::Implements => "implements",
            EdgeKind::FieldType => "field-type",
            EdgeKind::MethodSignature => "method-signature",
            EdgeKind::Instantiation => "instantiation",
            EdgeKind::Import => "import",
            EdgeKind::TypeUse => "type-use",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an edge points at
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "kebab-case")]
pub enum EdgeTarget {
    /// An admitted declaration in the input set
    Declared(String),
    /// Not declared in the input set; the best-known name
    External(String),
    /// A generic parameter in scope at the reference
    TypeVariable(String),
    /// A qualified name claimed by more than one file
    Conflicted(String),
}

impl EdgeTarget {
    pub fn name(&self) -> &str {
        match self {
            EdgeTarget::Declared(n)
            | EdgeTarget::External(n)
            | EdgeTarget::TypeVariable(n)
            | EdgeTarget::Conflicted(n) => n,
        }
    }

    pub fn is_declared(&self) -> bool {
        matches!(self, EdgeTarget::Declared(_))
    }

    pub fn is_external(&self) -> bool {
        matches!(self, EdgeTarget::External(_))
    }
}

impl std::fmt::Display for EdgeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeTarget::Declared(n) => write!(f, "{}", n),
            EdgeTarget::External(n) => write!(f, "external:{}", n),
            EdgeTarget::TypeVariable(n) => write!(f, "type-variable:{}", n),
            EdgeTarget::Conflicted(n) => write!(f, "conflicted:{}", n),
        }
    }
}

/// Resolved dependency between a declaration and a target
///
/// `file` is the file whose source contains the reference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: EdgeTarget,
    pub kind: EdgeKind,
    pub file: String,
    /// Source declaration's name is claimed by several files
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub conflicted: bool,
}

impl DependencyEdge {
    pub fn new(from: impl Into<String>, to: EdgeTarget, kind: EdgeKind, file: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to,
            kind,
            file: file.into(),
            conflicted: false,
        }
    }

    pub fn mark_conflicted(mut self) -> Self {
        self.conflicted = true;
        self
    }
}

/// Where a resolution candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMethod {
    /// `import a.b.C;` (or `import static a.b.C.D;`)
    SingleImport,
    /// `import a.b.c;`, which names a type only if `a.b.c` is declared
    PackageLikeImport,
    /// Same package as the referencing file
    SamePackage,
    /// `import a.b.*;`
    Wildcard,
    /// Implicit `java.lang.*`
    ImplicitLang,
    /// Dotted name taken as already qualified
    FullyQualified,
}

/// A qualified name a reference may denote
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub qualified_name: String,
    pub method: ResolutionMethod,
}

impl Candidate {
    pub fn new(qualified_name: impl Into<String>, method: ResolutionMethod) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            method,
        }
    }
}

/// What the per-file pass could settle without the global table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalResolution {
    /// Generic parameter in scope
    TypeVariable(String),
    /// Member type of the declaring or an enclosing type, same file
    MemberType(String),
    /// Ordered candidates to try against the global symbol table
    Deferred(Vec<Candidate>),
}

/// One reference site waiting for the merge phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReference {
    pub from: String,
    /// Source declaration is invisible outside its file
    pub from_file_local: bool,
    /// Name as written in source
    pub written: String,
    pub kind: EdgeKind,
    pub span: Span,
    pub resolution: LocalResolution,
}

impl PendingReference {
    /// Candidates in order; empty for locally settled references
    pub fn candidates(&self) -> &[Candidate] {
        match &self.resolution {
            LocalResolution::Deferred(candidates) => candidates,
            _ => &[],
        }
    }
}

/// Per-file output of the edge builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileGraph {
    pub references: Vec<PendingReference>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileGraph {
    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

/// Outcome of resolving one import declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ImportResolution {
    /// Names an admitted declaration
    Resolved { target: String },
    /// Names a declaration claimed by several files
    Conflicted { target: String },
    /// Not in the input set
    External { name: String },
    /// Wildcard with at least one matching declaration; only extends scope
    Scope { prefix: String, declarations: usize },
    /// Names a package of the input, or is spelled like one and names no
    /// declared type
    Malformed,
}

/// Import resolution result for the per-file manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedImport {
    /// Written form, e.g. `static a.b.C.*`
    pub import: String,
    pub span: Span,
    pub resolution: ImportResolution,
}

impl ResolvedImport {
    pub fn new(import: impl Into<String>, span: Span, resolution: ImportResolution) -> Self {
        Self {
            import: import.into(),
            span,
            resolution,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, ImportResolution::Resolved { .. })
    }
}

/// Everything the per-file worker produces
///
/// `unit` is `None` when the file could not be parsed at all; the file still
/// counts toward the manifest and carries its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAnalysis {
    pub path: String,
    pub text: String,
    pub unit: Option<SourceUnit>,
    pub declarations: Vec<DeclarationSummary>,
    pub graph: FileGraph,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileAnalysis {
    pub fn unparsed(path: impl Into<String>, text: impl Into<String>, diagnostic: Diagnostic) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            unit: None,
            declarations: Vec::new(),
            graph: FileGraph::default(),
            diagnostics: vec![diagnostic],
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.unit.is_some()
    }
}
