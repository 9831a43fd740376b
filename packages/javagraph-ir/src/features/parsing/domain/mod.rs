//! Parsing domain models

mod parsed_tree;
mod syntax_node;

pub use parsed_tree::{ParseError, ParsedTree};
pub use syntax_node::{
    BodyRefKind, BodyRefSyntax, CompilationUnitSyntax, DeclKind, ImportSyntax, MemberSyntax,
    MemberSyntaxKind, PackageSyntax, ParamSyntax, TypeDeclSyntax, TypeParamSyntax, TypeSyntax,
};
