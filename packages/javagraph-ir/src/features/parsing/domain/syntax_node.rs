//! Typed concrete syntax for Java compilation units
//!
//! Produced by lowering a tree-sitter tree. Every type here is owned and
//! `Send`, so a lowered unit can leave the worker that parsed it.

use serde::{Deserialize, Serialize};

use crate::shared::models::Span;

/// Declared type kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl DeclKind {
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "class_declaration" => Some(DeclKind::Class),
            "interface_declaration" => Some(DeclKind::Interface),
            "enum_declaration" => Some(DeclKind::Enum),
            "record_declaration" => Some(DeclKind::Record),
            "annotation_type_declaration" => Some(DeclKind::Annotation),
            _ => None,
        }
    }

    /// Interface-like kinds make their members implicitly public
    pub fn is_interface_like(self) -> bool {
        matches!(self, DeclKind::Interface | DeclKind::Annotation)
    }

    /// Kinds that are static even when nested without the keyword
    pub fn is_implicitly_static(self) -> bool {
        !matches!(self, DeclKind::Class)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnitSyntax {
    pub package: Option<PackageSyntax>,
    pub imports: Vec<ImportSyntax>,
    pub types: Vec<TypeDeclSyntax>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSyntax {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSyntax {
    /// Dotted path without `import`, `static` or the trailing `.*`
    pub path: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    pub span: Span,
}

impl ImportSyntax {
    /// Spelled like an import of a package rather than a type (`import a.b;`)
    ///
    /// Java types conventionally start with an uppercase letter, so a
    /// single-type import whose last segment is lowercase, or that has a
    /// single segment, looks like a package. This is only provisional: the
    /// merge settles it against the declarations of the whole input.
    pub fn looks_like_package(&self) -> bool {
        if self.is_static || self.is_wildcard {
            return false;
        }
        let mut segments = self.path.rsplit('.');
        let last = segments.next().unwrap_or_default();
        let single_segment = segments.next().is_none();
        single_segment || last.chars().next().map_or(true, |c| c.is_lowercase())
    }

    pub fn simple_name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclSyntax {
    pub kind: DeclKind,
    pub name: String,
    pub modifiers: Vec<String>,
    pub type_parameters: Vec<TypeParamSyntax>,
    /// `extends` clause: the superclass, or the super-interfaces of an interface
    pub extends: Vec<TypeSyntax>,
    pub implements: Vec<TypeSyntax>,
    pub members: Vec<MemberSyntax>,
    pub nested: Vec<TypeDeclSyntax>,
    /// References from initializer blocks and enum constant bodies
    pub body_refs: Vec<BodyRefSyntax>,
    pub span: Span,
    /// Source length in characters
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamSyntax {
    pub name: String,
    pub bounds: Vec<TypeSyntax>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSyntaxKind {
    Field,
    Method,
    Constructor,
    EnumConstant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSyntax {
    pub kind: MemberSyntaxKind,
    pub name: String,
    pub modifiers: Vec<String>,
    pub type_parameters: Vec<TypeParamSyntax>,
    /// Field type or method return type
    pub ty: Option<TypeSyntax>,
    pub parameters: Vec<ParamSyntax>,
    pub throws: Vec<TypeSyntax>,
    /// References from the body or the field initializer
    pub body_refs: Vec<BodyRefSyntax>,
    pub span: Span,
}

impl MemberSyntax {
    pub fn new(kind: MemberSyntaxKind, name: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: Vec::new(),
            type_parameters: Vec::new(),
            ty: None,
            parameters: Vec::new(),
            throws: Vec::new(),
            body_refs: Vec::new(),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSyntax {
    pub name: String,
    pub ty: TypeSyntax,
    pub is_varargs: bool,
}

/// Where inside a body a type is mentioned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRefKind {
    /// `new T(...)` or `new T[n]`
    Instantiation,
    /// `T x = ...;`
    LocalVariable,
    /// Casts, `instanceof`, catch clauses, typed lambda parameters
    TypeUse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRefSyntax {
    pub kind: BodyRefKind,
    pub ty: TypeSyntax,
}

/// A type as written in source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSyntax {
    /// Simple or dotted name with its type arguments (`Map.Entry<K, V>`)
    Named {
        name: String,
        arguments: Vec<TypeSyntax>,
        span: Span,
    },
    Array(Box<TypeSyntax>),
    Primitive(String),
    /// `?`, `? extends T`, `? super T`
    Wildcard {
        bound: Option<Box<TypeSyntax>>,
        is_super: bool,
    },
}

impl TypeSyntax {
    pub fn named(name: impl Into<String>, span: Span) -> Self {
        TypeSyntax::Named {
            name: name.into(),
            arguments: Vec::new(),
            span,
        }
    }

    /// Source-like rendering (`List<Food>[]`), used for member signatures
    pub fn render(&self) -> String {
        match self {
            TypeSyntax::Named {
                name, arguments, ..
            } if arguments.is_empty() => name.clone(),
            TypeSyntax::Named {
                name, arguments, ..
            } => {
                let args: Vec<String> = arguments.iter().map(TypeSyntax::render).collect();
                format!("{}<{}>", name, args.join(", "))
            }
            TypeSyntax::Array(element) => format!("{}[]", element.render()),
            TypeSyntax::Primitive(name) => name.clone(),
            TypeSyntax::Wildcard { bound: None, .. } => "?".to_string(),
            TypeSyntax::Wildcard {
                bound: Some(bound),
                is_super,
            } => {
                let keyword = if *is_super { "super" } else { "extends" };
                format!("? {} {}", keyword, bound.render())
            }
        }
    }

    /// Visit the outer name and every name inside type arguments, arrays and
    /// wildcard bounds. Primitives produce nothing.
    ///
    /// The flag tells whether the name is the outer type (`false`) or sits
    /// inside a type argument (`true`).
    pub fn for_each_name<F: FnMut(&str, Span, bool)>(&self, f: &mut F) {
        self.walk_names(f, false);
    }

    fn walk_names<F: FnMut(&str, Span, bool)>(&self, f: &mut F, in_argument: bool) {
        match self {
            TypeSyntax::Named {
                name,
                arguments,
                span,
            } => {
                f(name, *span, in_argument);
                for arg in arguments {
                    arg.walk_names(f, true);
                }
            }
            TypeSyntax::Array(element) => element.walk_names(f, in_argument),
            TypeSyntax::Primitive(_) => {}
            TypeSyntax::Wildcard { bound, .. } => {
                if let Some(bound) = bound {
                    bound.walk_names(f, true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(path: &str, is_static: bool, is_wildcard: bool) -> ImportSyntax {
        ImportSyntax {
            path: path.to_string(),
            is_static,
            is_wildcard,
            span: Span::zero(),
        }
    }

    #[test]
    fn test_malformed_import_detection() {
        assert!(import("java.io", false, false).looks_like_package());
        assert!(import("Food", false, false).looks_like_package());
        assert!(!import("java.io.File", false, false).looks_like_package());
        assert!(!import("java.io", false, true).looks_like_package());
        assert!(!import("a.b.Burger.restaurantCount", true, false).looks_like_package());
    }

    #[test]
    fn test_type_render() {
        let ty = TypeSyntax::Array(Box::new(TypeSyntax::Named {
            name: "Map".into(),
            arguments: vec![
                TypeSyntax::named("String", Span::zero()),
                TypeSyntax::Wildcard {
                    bound: Some(Box::new(TypeSyntax::named("Food", Span::zero()))),
                    is_super: false,
                },
            ],
            span: Span::zero(),
        }));
        assert_eq!(ty.render(), "Map<String, ? extends Food>[]");
    }

    #[test]
    fn test_for_each_name_skips_primitives() {
        let ty = TypeSyntax::Named {
            name: "List".into(),
            arguments: vec![
                TypeSyntax::Array(Box::new(TypeSyntax::Primitive("int".into()))),
                TypeSyntax::named("Food", Span::zero()),
            ],
            span: Span::zero(),
        };
        let mut seen = Vec::new();
        ty.for_each_name(&mut |name, _, nested| seen.push((name.to_string(), nested)));
        assert_eq!(
            seen,
            vec![("List".to_string(), false), ("Food".to_string(), true)]
        );
    }
}
