//! Declared types and their members

use serde::{Deserialize, Serialize};

use crate::features::parsing::domain::DeclKind;
use crate::shared::models::Span;

/// Symbol visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    PackagePrivate,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
}

impl Modifiers {
    pub fn from_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut modifiers = Self::default();
        for keyword in keywords {
            match keyword.as_ref() {
                "public" => modifiers.visibility = Visibility::Public,
                "protected" => modifiers.visibility = Visibility::Protected,
                "private" => modifiers.visibility = Visibility::Private,
                "static" => modifiers.is_static = true,
                "abstract" => modifiers.is_abstract = true,
                "final" => modifiers.is_final = true,
                _ => {}
            }
        }
        modifiers
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }
}

/// Syntactic position of a type reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefContext {
    Extends,
    Implements,
    FieldType,
    Parameter,
    Return,
    Instantiation,
    LocalVariable,
    Throws,
    /// Bound of a generic parameter (`<T extends Food>`)
    TypeBound,
    /// Casts, `instanceof`, catch clauses, type arguments of `new`
    TypeUse,
}

/// A type name as written, before resolution
///
/// Generic arguments are separate references and arrays are reduced to their
/// element type, so `name` is always a plain simple or dotted name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeReference {
    pub name: String,
    pub context: RefContext,
    pub span: Span,
}

impl TypeReference {
    pub fn new(name: impl Into<String>, context: RefContext, span: Span) -> Self {
        Self {
            name: name.into(),
            context,
            span,
        }
    }

    /// First dotted segment (`Map` for `Map.Entry`)
    pub fn head(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }

    pub fn is_qualified(&self) -> bool {
        self.name.contains('.')
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericParameter {
    pub name: String,
    pub bounds: Vec<TypeReference>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
    EnumConstant,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    pub modifiers: Modifiers,
    /// Field type or method return type, as written
    pub declared_type: Option<String>,
    /// Parameter types, as written
    pub parameters: Vec<String>,
    pub type_parameters: Vec<GenericParameter>,
    pub references: Vec<TypeReference>,
    pub span: Span,
}

impl Member {
    /// `price(int, Food): double`, `count: int`, `Steak(Food)`
    pub fn signature(&self) -> String {
        match self.kind {
            MemberKind::Field => match &self.declared_type {
                Some(ty) => format!("{}: {}", self.name, ty),
                None => self.name.clone(),
            },
            MemberKind::EnumConstant => self.name.clone(),
            MemberKind::Constructor => format!("{}({})", self.name, self.parameters.join(", ")),
            MemberKind::Method => {
                let generics = if self.type_parameters.is_empty() {
                    String::new()
                } else {
                    let names: Vec<_> = self.type_parameters.iter().map(|g| g.name.as_str()).collect();
                    format!("<{}>", names.join(", "))
                };
                format!(
                    "{}{}({}): {}",
                    generics,
                    self.name,
                    self.parameters.join(", "),
                    self.declared_type.as_deref().unwrap_or("void")
                )
            }
        }
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }
}

/// Size of a declaration or file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub lines: u32,
    pub characters: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub qualified_name: String,
    pub simple_name: String,
    pub package: String,
    pub kind: DeclKind,
    pub modifiers: Modifiers,
    pub generics: Vec<GenericParameter>,
    /// `extends` and `implements` references
    pub supertypes: Vec<TypeReference>,
    pub members: Vec<Member>,
    pub nested: Vec<TypeDeclaration>,
    /// References from initializer blocks and enum constant bodies
    pub body_references: Vec<TypeReference>,
    pub enclosing: Option<String>,
    /// Private, or nested inside a private type: invisible to other files
    pub file_local: bool,
    /// Non-static member class: sees the enclosing type's generics
    pub is_inner: bool,
    pub span: Span,
    pub metrics: Metrics,
}

impl TypeDeclaration {
    pub fn generic_names(&self) -> impl Iterator<Item = &str> {
        self.generics.iter().map(|g| g.name.as_str())
    }

    pub fn is_top_level(&self) -> bool {
        self.enclosing.is_none()
    }

    /// This declaration followed by all nested ones, depth first
    pub fn walk(&self) -> Vec<&TypeDeclaration> {
        let mut out = vec![self];
        for nested in &self.nested {
            out.extend(nested.walk());
        }
        out
    }
}
