//! Symbol extraction
//!
//! Walks one file's typed syntax and builds its [`SourceUnit`].

use crate::features::parsing::domain::{
    BodyRefKind, BodyRefSyntax, CompilationUnitSyntax, DeclKind, MemberSyntax, MemberSyntaxKind,
    TypeDeclSyntax, TypeParamSyntax, TypeSyntax,
};
use crate::features::symbols::domain::{
    GenericParameter, ImportDeclaration, Member, MemberKind, Metrics, Modifiers, RefContext,
    SourceUnit, TypeDeclaration, TypeReference, Visibility,
};

/// What a nested declaration needs to know about its enclosing type
struct Enclosing<'a> {
    qualified_name: &'a str,
    kind: DeclKind,
    file_local: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SymbolExtractor;

impl SymbolExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, syntax: &CompilationUnitSyntax, path: &str, text: &str) -> SourceUnit {
        let package = syntax
            .package
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_default();

        let imports = syntax
            .imports
            .iter()
            .map(|i| ImportDeclaration {
                path: i.path.clone(),
                is_static: i.is_static,
                is_wildcard: i.is_wildcard,
                looks_like_package: i.looks_like_package(),
                span: i.span,
            })
            .collect();

        let types = syntax
            .types
            .iter()
            .map(|t| self.extract_type(t, &package, None))
            .collect();

        SourceUnit {
            path: path.to_string(),
            text: text.to_string(),
            package,
            imports,
            types,
        }
    }

    fn extract_type(
        &self,
        syntax: &TypeDeclSyntax,
        package: &str,
        enclosing: Option<&Enclosing>,
    ) -> TypeDeclaration {
        let qualified_name = match enclosing {
            Some(outer) => format!("{}.{}", outer.qualified_name, syntax.name),
            None if package.is_empty() => syntax.name.clone(),
            None => format!("{}.{}", package, syntax.name),
        };

        let mut modifiers = Modifiers::from_keywords(&syntax.modifiers);
        if let Some(outer) = enclosing {
            if outer.kind.is_interface_like() {
                modifiers.visibility = Visibility::Public;
                modifiers.is_static = true;
            }
            if syntax.kind.is_implicitly_static() {
                modifiers.is_static = true;
            }
        }

        let file_local = modifiers.is_private() || enclosing.is_some_and(|o| o.file_local);
        let is_inner = enclosing.is_some() && !modifiers.is_static;

        let mut supertypes = Vec::new();
        for ty in &syntax.extends {
            collect_references(ty, RefContext::Extends, RefContext::Extends, &mut supertypes);
        }
        for ty in &syntax.implements {
            collect_references(
                ty,
                RefContext::Implements,
                RefContext::Implements,
                &mut supertypes,
            );
        }

        let mut body_references = Vec::new();
        for body_ref in &syntax.body_refs {
            collect_body_reference(body_ref, &mut body_references);
        }

        let members = syntax
            .members
            .iter()
            .map(|m| self.extract_member(m, syntax.kind))
            .collect();

        let this = Enclosing {
            qualified_name: &qualified_name,
            kind: syntax.kind,
            file_local,
        };
        let nested = syntax
            .nested
            .iter()
            .map(|n| self.extract_type(n, package, Some(&this)))
            .collect();

        TypeDeclaration {
            simple_name: syntax.name.clone(),
            package: package.to_string(),
            kind: syntax.kind,
            modifiers,
            generics: extract_generics(&syntax.type_parameters),
            supertypes,
            members,
            nested,
            body_references,
            enclosing: enclosing.map(|o| o.qualified_name.to_string()),
            file_local,
            is_inner,
            span: syntax.span,
            metrics: Metrics {
                lines: syntax.span.line_count(),
                characters: syntax.length,
            },
            qualified_name,
        }
    }

    fn extract_member(&self, syntax: &MemberSyntax, owner: DeclKind) -> Member {
        let kind = match syntax.kind {
            MemberSyntaxKind::Field => MemberKind::Field,
            MemberSyntaxKind::Method => MemberKind::Method,
            MemberSyntaxKind::Constructor => MemberKind::Constructor,
            MemberSyntaxKind::EnumConstant => MemberKind::EnumConstant,
        };

        let mut modifiers = Modifiers::from_keywords(&syntax.modifiers);
        if owner.is_interface_like() && modifiers.visibility == Visibility::PackagePrivate {
            modifiers.visibility = Visibility::Public;
        }
        if owner.is_interface_like() && kind == MemberKind::Field {
            modifiers.is_static = true;
            modifiers.is_final = true;
        }

        let mut references = Vec::new();
        if let Some(ty) = &syntax.ty {
            let context = match kind {
                MemberKind::Field => RefContext::FieldType,
                _ => RefContext::Return,
            };
            collect_references(ty, context, context, &mut references);
        }
        for param in &syntax.parameters {
            collect_references(
                &param.ty,
                RefContext::Parameter,
                RefContext::Parameter,
                &mut references,
            );
        }
        for ty in &syntax.throws {
            collect_references(ty, RefContext::Throws, RefContext::Throws, &mut references);
        }
        for body_ref in &syntax.body_refs {
            collect_body_reference(body_ref, &mut references);
        }

        let parameters = syntax
            .parameters
            .iter()
            .map(|p| {
                if p.is_varargs {
                    format!("{}...", p.ty.render())
                } else {
                    p.ty.render()
                }
            })
            .collect();

        Member {
            name: syntax.name.clone(),
            kind,
            modifiers,
            declared_type: syntax.ty.as_ref().map(TypeSyntax::render),
            parameters,
            type_parameters: extract_generics(&syntax.type_parameters),
            references,
            span: syntax.span,
        }
    }
}

fn extract_generics(params: &[TypeParamSyntax]) -> Vec<GenericParameter> {
    params
        .iter()
        .map(|p| {
            let mut bounds = Vec::new();
            for bound in &p.bounds {
                collect_references(bound, RefContext::TypeBound, RefContext::TypeBound, &mut bounds);
            }
            GenericParameter {
                name: p.name.clone(),
                bounds,
            }
        })
        .collect()
}

/// Flatten a written type into references: the outer name gets `outer`,
/// names inside type arguments get `argument`
fn collect_references(
    ty: &TypeSyntax,
    outer: RefContext,
    argument: RefContext,
    out: &mut Vec<TypeReference>,
) {
    ty.for_each_name(&mut |name, span, in_argument| {
        let context = if in_argument { argument } else { outer };
        out.push(TypeReference::new(name, context, span));
    });
}

fn collect_body_reference(body_ref: &BodyRefSyntax, out: &mut Vec<TypeReference>) {
    match body_ref.kind {
        // `new ArrayList<Food>()` instantiates ArrayList, not Food
        BodyRefKind::Instantiation => collect_references(
            &body_ref.ty,
            RefContext::Instantiation,
            RefContext::TypeUse,
            out,
        ),
        BodyRefKind::LocalVariable => collect_references(
            &body_ref.ty,
            RefContext::LocalVariable,
            RefContext::LocalVariable,
            out,
        ),
        BodyRefKind::TypeUse => {
            collect_references(&body_ref.ty, RefContext::TypeUse, RefContext::TypeUse, out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::{Parser, TreeSitterJavaParser};

    fn extract(path: &str, source: &str) -> SourceUnit {
        let tree = TreeSitterJavaParser::new().parse(source, path).unwrap();
        SymbolExtractor::new().extract(&tree.unit, path, source)
    }

    #[test]
    fn test_qualified_names_follow_nesting() {
        let unit = extract(
            "food/Steak.java",
            r#"
package food;

public class Steak {
    private static class Tapeworm {
        class Egg {}
    }
}
"#,
        );

        let names: Vec<_> = unit
            .declarations()
            .iter()
            .map(|d| d.qualified_name.clone())
            .collect();
        assert_eq!(
            names,
            vec!["food.Steak", "food.Steak.Tapeworm", "food.Steak.Tapeworm.Egg"]
        );

        let decls = unit.declarations();
        assert!(!decls[0].file_local);
        assert!(decls[1].file_local);
        assert!(decls[2].file_local, "nested inside a private type");
        assert!(!decls[1].is_inner);
        assert!(decls[2].is_inner);
        assert_eq!(decls[2].enclosing.as_deref(), Some("food.Steak.Tapeworm"));
    }

    #[test]
    fn test_same_simple_name_under_different_parents() {
        let unit = extract(
            "a/Outer.java",
            r#"
package a;
class One { class Inner {} }
class Two { class Inner {} }
"#,
        );
        let names: Vec<_> = unit
            .declarations()
            .iter()
            .map(|d| d.qualified_name.clone())
            .collect();
        assert!(names.contains(&"a.One.Inner".to_string()));
        assert!(names.contains(&"a.Two.Inner".to_string()));
    }

    #[test]
    fn test_references_and_contexts() {
        let unit = extract(
            "food/Burger.java",
            r#"
package food;

public class Burger<T> extends Food implements Edible {
    public static int restaurantCount = 0;
    private java.util.List<Condiment> toppings;

    public static String advertisement(Bun bun) throws SoldOut {
        T extra = null;
        return new StringBuilder().toString();
    }
}
"#,
        );

        let burger = &unit.types[0];
        assert_eq!(burger.generic_names().collect::<Vec<_>>(), vec!["T"]);
        assert_eq!(
            burger.supertypes,
            vec![
                TypeReference::new("Food", RefContext::Extends, burger.supertypes[0].span),
                TypeReference::new("Edible", RefContext::Implements, burger.supertypes[1].span),
            ]
        );

        assert!(burger.members[0].is_static());
        assert!(burger.members[0].references.is_empty(), "primitives dropped");

        let toppings: Vec<_> = burger.members[1]
            .references
            .iter()
            .map(|r| (r.name.as_str(), r.context))
            .collect();
        assert_eq!(
            toppings,
            vec![
                ("java.util.List", RefContext::FieldType),
                ("Condiment", RefContext::FieldType)
            ]
        );

        let advertisement: Vec<_> = burger.members[2]
            .references
            .iter()
            .map(|r| (r.name.as_str(), r.context))
            .collect();
        assert_eq!(
            advertisement,
            vec![
                ("String", RefContext::Return),
                ("Bun", RefContext::Parameter),
                ("SoldOut", RefContext::Throws),
                ("T", RefContext::LocalVariable),
                ("StringBuilder", RefContext::Instantiation),
            ]
        );
        assert_eq!(burger.members[2].signature(), "advertisement(Bun): String");
    }

    #[test]
    fn test_interface_members_are_public() {
        let unit = extract(
            "food/Edible.java",
            r#"
package food;
interface Edible {
    int CALORIES = 10;
    double price();
    class Receipt {}
}
"#,
        );
        let edible = &unit.types[0];
        assert!(edible
            .members
            .iter()
            .all(|m| m.modifiers.visibility == Visibility::Public));
        assert!(edible.members[0].modifiers.is_static);
        assert!(edible.nested[0].modifiers.is_static);
        assert!(!edible.nested[0].is_inner);
    }

    #[test]
    fn test_instantiation_type_arguments_are_type_uses() {
        let unit = extract(
            "Kitchen.java",
            "class Kitchen { Object o = new java.util.ArrayList<Food>(); }",
        );
        let refs: Vec<_> = unit.types[0].members[0]
            .references
            .iter()
            .map(|r| (r.name.as_str(), r.context))
            .collect();
        assert_eq!(
            refs,
            vec![
                ("Object", RefContext::FieldType),
                ("java.util.ArrayList", RefContext::Instantiation),
                ("Food", RefContext::TypeUse)
            ]
        );
    }

    #[test]
    fn test_malformed_imports_flagged() {
        let unit = extract("Food.java", "package food;\nimport java.io;\nclass Food {}\n");
        assert!(unit.imports[0].looks_like_package);
        assert_eq!(unit.package, "food");
        assert_eq!(unit.types[0].qualified_name, "food.Food");
    }
}
