//! Global symbol table
//!
//! Arena of admitted declarations indexed by qualified name. Parent/child
//! links are arena ids, so the nesting tree has no owning cycles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::features::symbols::domain::{
    DeclKind, Member, MemberKind, Metrics, Modifiers, TypeDeclaration,
};
use crate::shared::models::{Location, Span};

pub type DeclId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberSummary {
    pub name: String,
    pub kind: MemberKind,
    pub modifiers: Modifiers,
    pub signature: String,
}

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            kind: member.kind,
            modifiers: member.modifiers,
            signature: member.signature(),
        }
    }
}

/// Declaration as published in the symbol table and the output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationSummary {
    pub qualified_name: String,
    pub simple_name: String,
    pub package: String,
    pub kind: DeclKind,
    pub modifiers: Modifiers,
    pub generics: Vec<String>,
    /// Supertype names as written
    pub supertypes: Vec<String>,
    pub members: Vec<MemberSummary>,
    pub nested: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosing: Option<String>,
    pub file: String,
    pub span: Span,
    pub metrics: Metrics,
    pub file_local: bool,
}

impl DeclarationSummary {
    pub fn from_declaration(decl: &TypeDeclaration, file: &str) -> Self {
        Self {
            qualified_name: decl.qualified_name.clone(),
            simple_name: decl.simple_name.clone(),
            package: decl.package.clone(),
            kind: decl.kind,
            modifiers: decl.modifiers,
            generics: decl.generic_names().map(str::to_string).collect(),
            supertypes: decl.supertypes.iter().map(|r| r.name.clone()).collect(),
            members: decl.members.iter().map(MemberSummary::from).collect(),
            nested: decl.nested.iter().map(|n| n.qualified_name.clone()).collect(),
            enclosing: decl.enclosing.clone(),
            file: file.to_string(),
            span: decl.span,
            metrics: decl.metrics,
            file_local: decl.file_local,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.file.clone(), self.span)
    }

    /// Non-private member with this name (static imports)
    pub fn has_accessible_member(&self, name: &str) -> bool {
        self.members
            .iter()
            .any(|m| m.name == name && !m.modifiers.is_private())
    }

    /// Visible from `file`: not file-local, or declared there
    pub fn is_visible_from(&self, file: &str) -> bool {
        !self.file_local || self.file == file
    }
}

/// Admitted declarations of the whole input set
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    arena: Vec<DeclarationSummary>,
    parents: Vec<Option<DeclId>>,
    children: Vec<Vec<DeclId>>,
    index: BTreeMap<String, DeclId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a declaration; `Err` with the existing id if the name is taken
    ///
    /// Links to the enclosing declaration when it is already admitted, so
    /// callers insert enclosing types first (qualified-name order does this).
    pub fn insert(&mut self, summary: DeclarationSummary) -> Result<DeclId, DeclId> {
        if let Some(&existing) = self.index.get(&summary.qualified_name) {
            return Err(existing);
        }

        let id = self.arena.len();
        let parent = summary
            .enclosing
            .as_ref()
            .and_then(|outer| self.index.get(outer).copied());
        if let Some(parent) = parent {
            self.children[parent].push(id);
        }

        self.index.insert(summary.qualified_name.clone(), id);
        self.arena.push(summary);
        self.parents.push(parent);
        self.children.push(Vec::new());
        Ok(id)
    }

    pub fn get(&self, qualified_name: &str) -> Option<&DeclarationSummary> {
        self.index.get(qualified_name).map(|&id| &self.arena[id])
    }

    pub fn id(&self, qualified_name: &str) -> Option<DeclId> {
        self.index.get(qualified_name).copied()
    }

    pub fn by_id(&self, id: DeclId) -> Option<&DeclarationSummary> {
        self.arena.get(id)
    }

    pub fn parent(&self, id: DeclId) -> Option<DeclId> {
        self.parents.get(id).copied().flatten()
    }

    pub fn children(&self, id: DeclId) -> &[DeclId] {
        self.children.get(id).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.index.contains_key(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Declarations in qualified-name order
    pub fn iter(&self) -> impl Iterator<Item = &DeclarationSummary> {
        self.index.values().map(|&id| &self.arena[id])
    }

    /// Declarations named `prefix.X` for a single segment `X`
    ///
    /// This is what `import prefix.*;` brings into scope.
    pub fn scope_members<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a DeclarationSummary> + 'a {
        let start = format!("{}.", prefix);
        self.index
            .range(start.clone()..)
            .take_while(move |(name, _)| name.starts_with(&start))
            .filter(move |(name, _)| !name[prefix.len() + 1..].contains('.'))
            .map(move |(_, &id)| &self.arena[id])
    }

    /// Some admitted name lies strictly below `prefix`
    pub fn declares_under(&self, prefix: &str) -> bool {
        let start = format!("{}.", prefix);
        self.index
            .range(start.clone()..)
            .next()
            .is_some_and(|(name, _)| name.starts_with(&start))
    }

    pub fn into_map(self) -> BTreeMap<String, DeclarationSummary> {
        let mut arena: Vec<Option<DeclarationSummary>> = self.arena.into_iter().map(Some).collect();
        self.index
            .into_iter()
            .filter_map(|(name, id)| arena[id].take().map(|summary| (name, summary)))
            .collect()
    }
}
