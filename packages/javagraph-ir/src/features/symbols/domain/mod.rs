//! Symbol domain models

mod declaration;
mod source_unit;

pub use crate::features::parsing::domain::DeclKind;
pub use declaration::{
    GenericParameter, Member, MemberKind, Metrics, Modifiers, RefContext, TypeDeclaration,
    TypeReference, Visibility,
};
pub use source_unit::{ImportDeclaration, SourceUnit};
