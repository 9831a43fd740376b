//! One parsed input file

use serde::{Deserialize, Serialize};

use super::declaration::{Metrics, TypeDeclaration};
use crate::shared::models::Span;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportDeclaration {
    pub path: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    /// Spelled like a package import; settled against the symbol table at merge
    pub looks_like_package: bool,
    pub span: Span,
}

impl ImportDeclaration {
    pub fn simple_name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// `a.b` for `a.b.C`; empty for a single segment
    pub fn owner(&self) -> &str {
        self.path.rsplit_once('.').map_or("", |(owner, _)| owner)
    }

    /// Written form, e.g. `static a.b.C.*`
    pub fn display(&self) -> String {
        let prefix = if self.is_static { "static " } else { "" };
        let suffix = if self.is_wildcard { ".*" } else { "" };
        format!("{}{}{}", prefix, self.path, suffix)
    }
}

/// A parsed file: immutable once extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub path: String,
    pub text: String,
    /// Empty for the default package
    pub package: String,
    pub imports: Vec<ImportDeclaration>,
    pub types: Vec<TypeDeclaration>,
}

impl SourceUnit {
    /// Every declaration in the file, top-level ones first in source order,
    /// each followed by its nested declarations
    pub fn declarations(&self) -> Vec<&TypeDeclaration> {
        self.types.iter().flat_map(|t| t.walk()).collect()
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            lines: self.text.lines().count() as u32,
            characters: self.text.chars().count(),
        }
    }

    /// Qualify a name declared at top level of this file
    pub fn qualify(&self, simple_name: &str) -> String {
        if self.package.is_empty() {
            simple_name.to_string()
        } else {
            format!("{}.{}", self.package, simple_name)
        }
    }
}
