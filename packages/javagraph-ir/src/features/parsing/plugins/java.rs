//! Java Language Plugin
//!
//! Lowers a tree-sitter-java tree into a [`CompilationUnitSyntax`].
//! Supports: classes, interfaces, enums, records, annotations, generics
//!
//! `ERROR` nodes are never lowered themselves, but declarations found inside
//! them are, so one broken member does not hide its siblings.

use tree_sitter::{Language as TSLanguage, Node as TSNode, Tree};

use crate::features::parsing::domain::{
    BodyRefKind, BodyRefSyntax, CompilationUnitSyntax, DeclKind, ImportSyntax, MemberSyntax,
    MemberSyntaxKind, PackageSyntax, ParamSyntax, TypeDeclSyntax, TypeParamSyntax, TypeSyntax,
};
use crate::features::parsing::ports::SpanExt;

/// Java language plugin
pub struct JavaPlugin;

struct LoweringContext<'a> {
    source: &'a str,
}

impl<'a> LoweringContext<'a> {
    fn node_text(&self, node: &TSNode) -> &'a str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    /// Node text with whitespace and comments between tokens removed
    fn compact_text(&self, node: &TSNode) -> String {
        let mut out = String::new();
        let mut rest = self.node_text(node);
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix("//") {
                rest = after.find('\n').map_or("", |i| &after[i..]);
            } else if let Some(after) = rest.strip_prefix("/*") {
                rest = after.find("*/").map_or("", |i| &after[i + 2..]);
            } else {
                let mut chars = rest.chars();
                if let Some(c) = chars.next().filter(|c| !c.is_whitespace()) {
                    out.push(c);
                }
                rest = chars.as_str();
            }
        }
        out
    }

    /// `a.b.C` from an `identifier` or `scoped_identifier`, comments skipped
    fn dotted_name(&self, node: &TSNode) -> String {
        let mut segments = Vec::new();
        self.collect_identifiers(node, &mut segments);
        segments.join(".")
    }

    fn collect_identifiers(&self, node: &TSNode, segments: &mut Vec<&'a str>) {
        if node.kind() == "identifier" {
            segments.push(self.node_text(node));
            return;
        }
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if matches!(child.kind(), "identifier" | "scoped_identifier") {
                self.collect_identifiers(&child, segments);
            }
        }
    }
}

impl JavaPlugin {
    pub fn new() -> Self {
        Self
    }

    pub fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_java::language()
    }

    /// Lower a whole tree
    pub fn lower(&self, tree: &Tree, source: &str) -> CompilationUnitSyntax {
        let ctx = LoweringContext { source };
        let root = tree.root_node();
        let mut unit = CompilationUnitSyntax {
            package: None,
            imports: Vec::new(),
            types: Vec::new(),
            span: root.to_span(),
        };
        self.lower_program_items(&ctx, &root, &mut unit);
        unit
    }

    fn lower_program_items(
        &self,
        ctx: &LoweringContext,
        node: &TSNode,
        unit: &mut CompilationUnitSyntax,
    ) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "package_declaration" => {
                    if unit.package.is_none() {
                        unit.package = self.lower_package(ctx, &child);
                    }
                }
                "import_declaration" => {
                    if let Some(import) = self.lower_import(ctx, &child) {
                        unit.imports.push(import);
                    }
                }
                "ERROR" => self.lower_program_items(ctx, &child, unit),
                _ => {
                    if let Some(decl) = self.lower_type_decl(ctx, &child) {
                        unit.types.push(decl);
                    }
                }
            }
        }
    }

    fn lower_package(&self, ctx: &LoweringContext, node: &TSNode) -> Option<PackageSyntax> {
        let mut cursor = node.walk();
        let name = node
            .named_children(&mut cursor)
            .find(|c| c.kind() == "scoped_identifier" || c.kind() == "identifier")?;
        Some(PackageSyntax {
            name: ctx.dotted_name(&name),
            span: node.to_span(),
        })
    }

    /// Extract import declaration
    fn lower_import(&self, ctx: &LoweringContext, node: &TSNode) -> Option<ImportSyntax> {
        let mut path = None;
        let mut is_static = false;
        let mut is_wildcard = false;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "static" => is_static = true,
                "asterisk" => is_wildcard = true,
                "identifier" | "scoped_identifier" => path = Some(ctx.dotted_name(&child)),
                _ => {}
            }
        }

        // Recovered imports may lose their structure; fall back to the text.
        let path = match path {
            Some(path) => path,
            None => {
                let text = ctx.compact_text(node);
                let mut rest = text.strip_prefix("import")?.trim_end_matches(';');
                if let Some(stripped) = rest.strip_prefix("static") {
                    is_static = true;
                    rest = stripped;
                }
                if let Some(stripped) = rest.strip_suffix(".*") {
                    is_wildcard = true;
                    rest = stripped;
                }
                rest.to_string()
            }
        };
        if path.is_empty() {
            return None;
        }

        Some(ImportSyntax {
            path,
            is_static,
            is_wildcard,
            span: node.to_span(),
        })
    }

    /// Lower class, interface, enum, record and annotation declarations
    fn lower_type_decl(&self, ctx: &LoweringContext, node: &TSNode) -> Option<TypeDeclSyntax> {
        let kind = DeclKind::from_node_kind(node.kind())?;
        let name = node
            .child_by_field_name("name")
            .map(|n| ctx.node_text(&n).to_string())
            .filter(|n| !n.is_empty())?;

        let mut decl = TypeDeclSyntax {
            kind,
            name,
            modifiers: self.lower_modifiers(ctx, node),
            type_parameters: self.lower_type_parameters(ctx, node),
            extends: Vec::new(),
            implements: Vec::new(),
            members: Vec::new(),
            nested: Vec::new(),
            body_refs: Vec::new(),
            span: node.to_span(),
            length: ctx.node_text(node).chars().count(),
        };

        if let Some(superclass) = node.child_by_field_name("superclass") {
            decl.extends.extend(self.types_in(ctx, &superclass));
        }
        if let Some(interfaces) = node.child_by_field_name("interfaces") {
            decl.implements.extend(self.types_in(ctx, &interfaces));
        }
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "extends_interfaces" {
                decl.extends.extend(self.types_in(ctx, &child));
            }
        }

        // Record components behave like final fields
        if kind == DeclKind::Record {
            if let Some(params) = node.child_by_field_name("parameters") {
                for param in self.lower_parameters(ctx, &params) {
                    let mut member =
                        MemberSyntax::new(MemberSyntaxKind::Field, param.name, params.to_span());
                    member.modifiers = vec!["private".to_string(), "final".to_string()];
                    member.ty = Some(param.ty);
                    decl.members.push(member);
                }
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            self.lower_body(ctx, &body, &mut decl);
        }

        Some(decl)
    }

    fn lower_body(&self, ctx: &LoweringContext, body: &TSNode, decl: &mut TypeDeclSyntax) {
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            match child.kind() {
                "field_declaration" | "constant_declaration" => {
                    decl.members.extend(self.lower_fields(ctx, &child));
                }
                "method_declaration" | "annotation_type_element_declaration" => {
                    decl.members
                        .extend(self.lower_method(ctx, &child, MemberSyntaxKind::Method));
                }
                "constructor_declaration" | "compact_constructor_declaration" => {
                    decl.members
                        .extend(self.lower_method(ctx, &child, MemberSyntaxKind::Constructor));
                }
                "enum_constant" => {
                    decl.members.extend(self.lower_enum_constant(ctx, &child));
                }
                "static_initializer" | "block" => {
                    let mut locals = Vec::new();
                    self.scan_body(ctx, &child, &mut decl.body_refs, &mut locals);
                }
                "enum_body_declarations" | "ERROR" => self.lower_body(ctx, &child, decl),
                _ => {
                    if let Some(nested) = self.lower_type_decl(ctx, &child) {
                        decl.nested.push(nested);
                    }
                }
            }
        }
    }

    /// One member per declarator: `Food a, b;` declares two fields
    fn lower_fields(&self, ctx: &LoweringContext, node: &TSNode) -> Vec<MemberSyntax> {
        let modifiers = self.lower_modifiers(ctx, node);
        let ty = node
            .child_by_field_name("type")
            .and_then(|t| self.lower_type(ctx, &t));

        let mut fields = Vec::new();
        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            let Some(name_node) = declarator.child_by_field_name("name") else {
                continue;
            };
            let name = ctx.node_text(&name_node);
            if name.is_empty() {
                continue;
            }
            let mut field = MemberSyntax::new(MemberSyntaxKind::Field, name, node.to_span());
            field.modifiers = modifiers.clone();
            field.ty = ty.clone();
            if let Some(value) = declarator.child_by_field_name("value") {
                let mut locals = Vec::new();
                self.scan_node(ctx, &value, &mut field.body_refs, &mut locals);
            }
            fields.push(field);
        }
        fields
    }

    fn lower_method(
        &self,
        ctx: &LoweringContext,
        node: &TSNode,
        kind: MemberSyntaxKind,
    ) -> Option<MemberSyntax> {
        let name = node
            .child_by_field_name("name")
            .map(|n| ctx.node_text(&n))
            .filter(|n| !n.is_empty())?;

        let mut method = MemberSyntax::new(kind, name, node.to_span());
        method.modifiers = self.lower_modifiers(ctx, node);
        method.type_parameters = self.lower_type_parameters(ctx, node);
        method.ty = node
            .child_by_field_name("type")
            .and_then(|t| self.lower_type(ctx, &t));
        if let Some(params) = node.child_by_field_name("parameters") {
            method.parameters = self.lower_parameters(ctx, &params);
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "throws" {
                method.throws.extend(self.types_in(ctx, &child));
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            let mut locals = Vec::new();
            self.scan_body(ctx, &body, &mut method.body_refs, &mut locals);
        }

        Some(method)
    }

    /// Extract enum constant
    fn lower_enum_constant(&self, ctx: &LoweringContext, node: &TSNode) -> Option<MemberSyntax> {
        let name = node
            .child_by_field_name("name")
            .map(|n| ctx.node_text(&n))
            .filter(|n| !n.is_empty())?;

        let mut constant = MemberSyntax::new(MemberSyntaxKind::EnumConstant, name, node.to_span());
        constant.modifiers = vec![
            "public".to_string(),
            "static".to_string(),
            "final".to_string(),
        ];
        // Constructor arguments and the constant's class body
        let mut locals = Vec::new();
        self.scan_body(ctx, node, &mut constant.body_refs, &mut locals);
        Some(constant)
    }

    fn lower_parameters(&self, ctx: &LoweringContext, params: &TSNode) -> Vec<ParamSyntax> {
        let mut lowered = Vec::new();
        let mut cursor = params.walk();
        for child in params.named_children(&mut cursor) {
            match child.kind() {
                "formal_parameter" => {
                    let ty = child
                        .child_by_field_name("type")
                        .and_then(|t| self.lower_type(ctx, &t));
                    let name = child
                        .child_by_field_name("name")
                        .map(|n| ctx.node_text(&n).to_string())
                        .unwrap_or_default();
                    if let Some(ty) = ty {
                        lowered.push(ParamSyntax {
                            name,
                            ty,
                            is_varargs: false,
                        });
                    }
                }
                "spread_parameter" => {
                    let mut inner = child.walk();
                    let ty = child
                        .named_children(&mut inner)
                        .find_map(|c| self.lower_type(ctx, &c));
                    let mut inner = child.walk();
                    let name = child
                        .named_children(&mut inner)
                        .find(|c| c.kind() == "variable_declarator")
                        .and_then(|d| d.child_by_field_name("name"))
                        .map(|n| ctx.node_text(&n).to_string())
                        .unwrap_or_default();
                    if let Some(ty) = ty {
                        lowered.push(ParamSyntax {
                            name,
                            ty,
                            is_varargs: true,
                        });
                    }
                }
                _ => {}
            }
        }
        lowered
    }

    /// Modifier keywords, annotations excluded
    fn lower_modifiers(&self, ctx: &LoweringContext, node: &TSNode) -> Vec<String> {
        let mut cursor = node.walk();
        let Some(modifiers) = node
            .children(&mut cursor)
            .find(|c| c.kind() == "modifiers")
        else {
            return Vec::new();
        };

        let mut inner = modifiers.walk();
        let keywords = modifiers
            .children(&mut inner)
            .filter(|c| {
                !matches!(
                    c.kind(),
                    "marker_annotation" | "annotation" | "line_comment" | "block_comment"
                )
            })
            .map(|c| ctx.node_text(&c).to_string())
            .filter(|text| !text.is_empty())
            .collect();
        keywords
    }

    /// Extract type parameters (generics)
    fn lower_type_parameters(&self, ctx: &LoweringContext, node: &TSNode) -> Vec<TypeParamSyntax> {
        let Some(type_params) = node.child_by_field_name("type_parameters") else {
            return Vec::new();
        };

        let mut params = Vec::new();
        let mut cursor = type_params.walk();
        for child in type_params.named_children(&mut cursor) {
            if child.kind() != "type_parameter" {
                continue;
            }
            let mut inner = child.walk();
            let mut name = None;
            let mut bounds = Vec::new();
            for part in child.named_children(&mut inner) {
                match part.kind() {
                    "type_identifier" | "identifier" if name.is_none() => {
                        name = Some(ctx.node_text(&part).to_string());
                    }
                    "type_bound" => bounds.extend(self.types_in(ctx, &part)),
                    _ => {}
                }
            }
            if let Some(name) = name {
                params.push(TypeParamSyntax {
                    name,
                    bounds,
                    span: child.to_span(),
                });
            }
        }
        params
    }

    /// Types listed directly under `node` or under a nested `type_list`
    fn types_in(&self, ctx: &LoweringContext, node: &TSNode) -> Vec<TypeSyntax> {
        let mut types = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "type_list" {
                types.extend(self.types_in(ctx, &child));
            } else if let Some(ty) = self.lower_type(ctx, &child) {
                types.push(ty);
            }
        }
        types
    }

    fn lower_type(&self, ctx: &LoweringContext, node: &TSNode) -> Option<TypeSyntax> {
        match node.kind() {
            "type_identifier" => Some(TypeSyntax::named(ctx.node_text(node), node.to_span())),
            "scoped_type_identifier" => {
                let mut segments = Vec::new();
                let mut arguments = Vec::new();
                self.flatten_scoped(ctx, node, &mut segments, &mut arguments);
                if segments.is_empty() {
                    return None;
                }
                Some(TypeSyntax::Named {
                    name: segments.join("."),
                    arguments,
                    span: node.to_span(),
                })
            }
            "generic_type" => {
                let mut base = None;
                let mut arguments = Vec::new();
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "type_arguments" {
                        let mut inner = child.walk();
                        arguments.extend(
                            child
                                .named_children(&mut inner)
                                .filter_map(|a| self.lower_type(ctx, &a)),
                        );
                    } else if base.is_none() {
                        base = self.lower_type(ctx, &child);
                    }
                }
                match base? {
                    TypeSyntax::Named {
                        name,
                        arguments: mut outer,
                        ..
                    } => {
                        outer.extend(arguments);
                        Some(TypeSyntax::Named {
                            name,
                            arguments: outer,
                            span: node.to_span(),
                        })
                    }
                    other => Some(other),
                }
            }
            "array_type" => {
                // `Food[][]` is one array_type with two dimensions
                let dimensions = node
                    .child_by_field_name("dimensions")
                    .map(|d| ctx.node_text(&d).matches('[').count())
                    .unwrap_or(1)
                    .max(1);
                let element = node
                    .child_by_field_name("element")
                    .and_then(|e| self.lower_type(ctx, &e))?;
                Some((0..dimensions).fold(element, |ty, _| TypeSyntax::Array(Box::new(ty))))
            }
            "integral_type" | "floating_point_type" | "boolean_type" | "void_type" => {
                Some(TypeSyntax::Primitive(ctx.node_text(node).to_string()))
            }
            "wildcard" => {
                let mut cursor = node.walk();
                let is_super = node.children(&mut cursor).any(|c| c.kind() == "super");
                let mut cursor = node.walk();
                let bound = node
                    .named_children(&mut cursor)
                    .find_map(|c| self.lower_type(ctx, &c))
                    .map(Box::new);
                Some(TypeSyntax::Wildcard { bound, is_super })
            }
            "annotated_type" => {
                let mut cursor = node.walk();
                let found = node
                    .named_children(&mut cursor)
                    .find_map(|c| self.lower_type(ctx, &c));
                found
            }
            _ => None,
        }
    }

    /// `a.b.Outer<X>.Inner` → segments `[a, b, Outer, Inner]`, arguments `[X]`
    fn flatten_scoped(
        &self,
        ctx: &LoweringContext,
        node: &TSNode,
        segments: &mut Vec<String>,
        arguments: &mut Vec<TypeSyntax>,
    ) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "type_identifier" => segments.push(ctx.node_text(&child).to_string()),
                "scoped_type_identifier" => self.flatten_scoped(ctx, &child, segments, arguments),
                "generic_type" => {
                    if let Some(TypeSyntax::Named {
                        name,
                        arguments: args,
                        ..
                    }) = self.lower_type(ctx, &child)
                    {
                        segments.push(name);
                        arguments.extend(args);
                    }
                }
                _ => {}
            }
        }
    }

    fn scan_body(
        &self,
        ctx: &LoweringContext,
        node: &TSNode,
        out: &mut Vec<BodyRefSyntax>,
        locals: &mut Vec<String>,
    ) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.scan_node(ctx, &child, out, locals);
        }
    }

    /// Collect type mentions inside executable code
    fn scan_node(
        &self,
        ctx: &LoweringContext,
        node: &TSNode,
        out: &mut Vec<BodyRefSyntax>,
        locals: &mut Vec<String>,
    ) {
        match node.kind() {
            "ERROR" => return,
            "local_variable_declaration" => {
                if let Some(ty) = node.child_by_field_name("type") {
                    self.push_body_ref(ctx, &ty, BodyRefKind::LocalVariable, out, locals);
                }
            }
            "object_creation_expression" | "array_creation_expression" => {
                if let Some(ty) = node.child_by_field_name("type") {
                    self.push_body_ref(ctx, &ty, BodyRefKind::Instantiation, out, locals);
                }
            }
            "cast_expression" => {
                let mut cursor = node.walk();
                let types: Vec<_> = node.children_by_field_name("type", &mut cursor).collect();
                for ty in types {
                    self.push_body_ref(ctx, &ty, BodyRefKind::TypeUse, out, locals);
                }
            }
            "instanceof_expression" => {
                if let Some(ty) = node.child_by_field_name("right") {
                    self.push_body_ref(ctx, &ty, BodyRefKind::TypeUse, out, locals);
                }
            }
            "formal_parameter" => {
                if let Some(ty) = node.child_by_field_name("type") {
                    self.push_body_ref(ctx, &ty, BodyRefKind::TypeUse, out, locals);
                }
            }
            "catch_type" => {
                let mut cursor = node.walk();
                let types: Vec<_> = node.named_children(&mut cursor).collect();
                for ty in types {
                    self.push_body_ref(ctx, &ty, BodyRefKind::TypeUse, out, locals);
                }
            }
            kind if DeclKind::from_node_kind(kind).is_some() => {
                // Local types shadow anything else with the same name
                if let Some(name) = node.child_by_field_name("name") {
                    locals.push(ctx.node_text(&name).to_string());
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.scan_node(ctx, &child, out, locals);
        }
    }

    fn push_body_ref(
        &self,
        ctx: &LoweringContext,
        node: &TSNode,
        kind: BodyRefKind,
        out: &mut Vec<BodyRefSyntax>,
        locals: &[String],
    ) {
        let Some(ty) = self.lower_type(ctx, node) else {
            return;
        };
        if let TypeSyntax::Named { name, .. } = &ty {
            let head = name.split('.').next().unwrap_or(name);
            if name == "var" || locals.iter().any(|l| l == head) {
                return;
            }
        }
        out.push(BodyRefSyntax { kind, ty });
    }
}

impl Default for JavaPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn lower(source: &str) -> CompilationUnitSyntax {
        let plugin = JavaPlugin::new();
        let mut parser = Parser::new();
        parser.set_language(&plugin.tree_sitter_language()).unwrap();
        let tree = parser.parse(source, None).unwrap();
        plugin.lower(&tree, source)
    }

    fn type_name(ty: &TypeSyntax) -> &str {
        match ty {
            TypeSyntax::Named { name, .. } => name,
            other => panic!("expected a named type, got {other:?}"),
        }
    }

    #[test]
    fn test_lower_package_and_imports() {
        let unit = lower(
            r#"
package io.nanoapi.food;

import java.util.List;
import java.util.*;
import static io.nanoapi.food.Burger.restaurantCount;
import java.io;

class Food {}
"#,
        );

        assert_eq!(unit.package.unwrap().name, "io.nanoapi.food");
        assert_eq!(unit.imports.len(), 4);

        assert_eq!(unit.imports[0].path, "java.util.List");
        assert!(!unit.imports[0].is_wildcard);

        assert_eq!(unit.imports[1].path, "java.util");
        assert!(unit.imports[1].is_wildcard);

        assert!(unit.imports[2].is_static);
        assert_eq!(unit.imports[2].path, "io.nanoapi.food.Burger.restaurantCount");

        assert!(unit.imports[3].looks_like_package());
    }

    #[test]
    fn test_comments_inside_dotted_names() {
        let unit = lower(
            r#"
package io /* root */ .nanoapi;

import java.util./*x*/List;
import java.util // maps
    .Map;
import static java.util./* y */Collections.*;

class Food {}
"#,
        );

        assert_eq!(unit.package.unwrap().name, "io.nanoapi");
        let paths: Vec<_> = unit.imports.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["java.util.List", "java.util.Map", "java.util.Collections"]);
        assert!(unit.imports[2].is_static && unit.imports[2].is_wildcard);
    }

    #[test]
    fn test_lower_class_header() {
        let unit = lower(
            r#"
public abstract class Burger<T extends Food, U> extends Sandwich implements Edible, Comparable<Burger<T, U>> {
}
"#,
        );

        let burger = &unit.types[0];
        assert_eq!(burger.kind, DeclKind::Class);
        assert_eq!(burger.name, "Burger");
        assert_eq!(burger.modifiers, vec!["public", "abstract"]);
        assert_eq!(burger.type_parameters.len(), 2);
        assert_eq!(burger.type_parameters[0].name, "T");
        assert_eq!(type_name(&burger.type_parameters[0].bounds[0]), "Food");
        assert_eq!(type_name(&burger.extends[0]), "Sandwich");
        assert_eq!(burger.implements.len(), 2);
        assert_eq!(burger.implements[1].render(), "Comparable<Burger<T, U>>");
    }

    #[test]
    fn test_lower_interface_extends() {
        let unit = lower("interface Meal extends Food, java.io.Serializable {}");
        let meal = &unit.types[0];
        assert_eq!(meal.kind, DeclKind::Interface);
        let names: Vec<_> = meal.extends.iter().map(type_name).collect();
        assert_eq!(names, vec!["Food", "java.io.Serializable"]);
    }

    #[test]
    fn test_lower_members() {
        let unit = lower(
            r#"
class Steak {
    private Food side, extra;
    public static int count = 0;

    public Steak(Food side) throws CookingException {}

    <R> R serve(java.util.List<Food> plates, String... notes) {
        Plate p = new Plate();
        return null;
    }
}
"#,
        );

        let steak = &unit.types[0];
        let names: Vec<_> = steak.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["side", "extra", "count", "Steak", "serve"]);

        let ctor = &steak.members[3];
        assert_eq!(ctor.kind, MemberSyntaxKind::Constructor);
        assert_eq!(type_name(&ctor.throws[0]), "CookingException");

        let serve = &steak.members[4];
        assert_eq!(serve.type_parameters[0].name, "R");
        assert_eq!(serve.parameters.len(), 2);
        assert_eq!(serve.parameters[0].ty.render(), "java.util.List<Food>");
        assert!(serve.parameters[1].is_varargs);

        let kinds: Vec<_> = serve.body_refs.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![BodyRefKind::LocalVariable, BodyRefKind::Instantiation]
        );
    }

    #[test]
    fn test_lower_nested_types() {
        let unit = lower(
            r#"
public class Steak {
    private static class Tapeworm {
        class Egg {}
    }
    interface Sauce {}
    enum Doneness { RARE, WELL }
}
"#,
        );

        let steak = &unit.types[0];
        let nested: Vec<_> = steak.nested.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(nested, vec!["Tapeworm", "Sauce", "Doneness"]);
        assert_eq!(steak.nested[0].modifiers, vec!["private", "static"]);
        assert_eq!(steak.nested[0].nested[0].name, "Egg");
        assert_eq!(steak.nested[2].members.len(), 2);
    }

    #[test]
    fn test_var_and_local_types_are_skipped() {
        let unit = lower(
            r#"
class Kitchen {
    void cook() {
        var pan = new Pan();
        class Helper {}
        Helper h = new Helper();
    }
}
"#,
        );

        let refs: Vec<_> = unit.types[0].members[0]
            .body_refs
            .iter()
            .map(|r| r.ty.render())
            .collect();
        assert_eq!(refs, vec!["Pan"]);
    }

    #[test]
    fn test_anonymous_class_body_is_scanned() {
        let unit = lower(
            r#"
class Kitchen {
    Runnable task = new Runnable() {
        public void run() { Food f = null; }
    };
}
"#,
        );

        let refs: Vec<_> = unit.types[0].members[0]
            .body_refs
            .iter()
            .map(|r| r.ty.render())
            .collect();
        assert_eq!(refs, vec!["Runnable", "Food"]);
    }

    #[test]
    fn test_record_components_become_fields() {
        let unit = lower("record Order(Food food, int quantity) {}");
        let order = &unit.types[0];
        assert_eq!(order.kind, DeclKind::Record);
        assert_eq!(order.members.len(), 2);
        assert_eq!(order.members[0].ty.as_ref().map(TypeSyntax::render).unwrap(), "Food");
    }

    #[test]
    fn test_primitive_and_array_types() {
        let unit = lower("class Tray { int[] slots; Food[][] grid; }");
        let tray = &unit.types[0];
        assert_eq!(
            tray.members[0].ty,
            Some(TypeSyntax::Array(Box::new(TypeSyntax::Primitive(
                "int".to_string()
            ))))
        );
        assert_eq!(tray.members[1].ty.as_ref().unwrap().render(), "Food[][]");
    }
}
