//! Symbols Feature
//!
//! Turns typed syntax into the per-file symbol model: qualified names,
//! modifiers, generics, members and unresolved type references.

pub mod domain;
pub mod extractor;

pub use domain::{
    DeclKind, GenericParameter, ImportDeclaration, Member, MemberKind, Metrics, Modifiers,
    RefContext, SourceUnit, TypeDeclaration, TypeReference, Visibility,
};
pub use extractor::SymbolExtractor;
