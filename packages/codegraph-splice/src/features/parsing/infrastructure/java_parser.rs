//! Java source parser
//!
//! This is where the tree-sitter dependency lives. Extraction follows the
//! tree-sitter-java grammar: `program` → package/imports/type declarations,
//! type bodies → members and nested types.

use tree_sitter::{Node as TSNode, Parser as TSParser, Tree};

use crate::errors::{Result, SpliceError};
use crate::features::parsing::domain::{
    ImportDecl, ParseIssue, ParsedMember, ParsedType, ParsedUnit,
};
use crate::features::parsing::ports::SourceParser;
use crate::shared::models::{
    Marker, MarkerKind, MemberKind, Modifiers, Span, TextRange, TypeKind, Visibility,
    CONSTRUCTOR_NAME,
};

/// Java parser backed by tree-sitter-java
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaSourceParser;

impl JavaSourceParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_tree(&self, rel_path: &str, source: &str) -> Result<Tree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&tree_sitter_java::language())
            .map_err(|e| SpliceError::parse(rel_path, format!("Failed to set language: {}", e)))?;

        parser
            .parse(source, None)
            .ok_or_else(|| SpliceError::parse(rel_path, "Failed to parse source code"))
    }
}

impl SourceParser for JavaSourceParser {
    fn parse_unit(&self, rel_path: &str, source: &str) -> Result<ParsedUnit> {
        let tree = self.parse_tree(rel_path, source)?;
        let root = tree.root_node();

        let mut unit = ParsedUnit::new(rel_path, source);
        let extractor = JavaExtractor { source };
        extractor.extract_unit(&root, &mut unit);

        if root.has_error() {
            extractor.collect_issues(&root, &mut unit.issues);
        }

        Ok(unit)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == "java"
    }

    fn language_name(&self) -> &'static str {
        "java"
    }
}

/// Where a body sits, which decides implicit modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyContext {
    Class,
    Interface,
}

struct JavaExtractor<'s> {
    source: &'s str,
}

impl<'s> JavaExtractor<'s> {
    fn text(&self, node: &TSNode) -> &'s str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    fn range(node: &TSNode) -> TextRange {
        TextRange::from(node.byte_range())
    }

    fn span(node: &TSNode) -> Span {
        Span::new(
            node.start_position().row as u32 + 1,
            node.start_position().column as u32,
            node.end_position().row as u32 + 1,
            node.end_position().column as u32,
        )
    }

    /// Whitespace between the start of the line and `offset`, if nothing else is there
    fn line_indent(&self, offset: usize) -> String {
        let line_start = self.source[..offset].rfind('\n').map_or(0, |i| i + 1);
        let prefix = &self.source[line_start..offset];
        if prefix.chars().all(char::is_whitespace) {
            prefix.to_string()
        } else {
            String::new()
        }
    }

    fn child_of_kind<'t>(node: &TSNode<'t>, kinds: &[&str]) -> Option<TSNode<'t>> {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .find(|c| kinds.contains(&c.kind()));
        found
    }

    fn extract_unit(&self, root: &TSNode, unit: &mut ParsedUnit) {
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            match child.kind() {
                "package_declaration" => {
                    if let Some(name) =
                        Self::child_of_kind(&child, &["scoped_identifier", "identifier"])
                    {
                        unit.package = self.text(&name).to_string();
                    }
                    unit.package_range = Some(Self::range(&child));
                }
                "import_declaration" => unit.imports.push(self.extract_import(&child)),
                kind => {
                    if let Some(type_kind) = TypeKind::from_declaration(kind) {
                        if let Some(ty) = self.extract_type(&child, type_kind, BodyContext::Class)
                        {
                            unit.types.push(ty);
                        }
                    }
                }
            }
        }
    }

    fn extract_import(&self, node: &TSNode) -> ImportDecl {
        let mut is_static = false;
        let mut is_wildcard = false;
        let mut target = String::new();

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "static" => is_static = true,
                "asterisk" => is_wildcard = true,
                "scoped_identifier" | "identifier" => target = self.text(&child).to_string(),
                _ => {}
            }
        }

        ImportDecl {
            target,
            is_static,
            is_wildcard,
            range: Self::range(node),
        }
    }

    /// Extract visibility, modifiers and markers from a `modifiers` node
    fn extract_modifiers(
        &self,
        modifiers: Option<TSNode>,
        context: BodyContext,
    ) -> (Visibility, Modifiers, Vec<Marker>) {
        let mut visibility = match context {
            BodyContext::Interface => Visibility::Public,
            BodyContext::Class => Visibility::Package,
        };
        let mut mods = Modifiers::default();
        let mut markers = Vec::new();

        let Some(modifiers) = modifiers else {
            return (visibility, mods, markers);
        };

        let mut cursor = modifiers.walk();
        for child in modifiers.children(&mut cursor) {
            match child.kind() {
                "public" => visibility = Visibility::Public,
                "protected" => visibility = Visibility::Protected,
                "private" => visibility = Visibility::Private,
                "static" => mods.is_static = true,
                "final" => mods.is_final = true,
                "abstract" => mods.is_abstract = true,
                "annotation" | "marker_annotation" => {
                    if let Some(marker) = self.extract_marker(&child) {
                        markers.push(marker);
                    }
                }
                _ => {}
            }
        }

        (visibility, mods, markers)
    }

    fn extract_marker(&self, annotation: &TSNode) -> Option<Marker> {
        let name = annotation
            .child_by_field_name("name")
            .map(|n| self.text(&n))
            .unwrap_or_default();

        let mut args = Vec::new();
        if let Some(arguments) = annotation.child_by_field_name("arguments") {
            let mut cursor = arguments.walk();
            for arg in arguments.named_children(&mut cursor) {
                if arg.kind() == "element_value_pair" {
                    let key = arg
                        .child_by_field_name("key")
                        .map(|n| self.text(&n).to_string())
                        .unwrap_or_default();
                    let value = arg
                        .child_by_field_name("value")
                        .map(|n| self.text(&n).to_string())
                        .unwrap_or_default();
                    args.push((key, value));
                } else if !arg.is_extra() {
                    args.push(("value".to_string(), self.text(&arg).to_string()));
                }
            }
        }

        let kind = MarkerKind::from_annotation(name, &args)?;
        Some(
            Marker::new(kind)
                .with_args(args)
                .with_range(Self::range(annotation)),
        )
    }

    fn extract_type(
        &self,
        node: &TSNode,
        kind: TypeKind,
        context: BodyContext,
    ) -> Option<ParsedType> {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(&n).to_string())
            .unwrap_or_default();
        if name.is_empty() {
            return None;
        }
        let body = node.child_by_field_name("body")?;

        let (visibility, modifiers, markers) =
            self.extract_modifiers(Self::child_of_kind(node, &["modifiers"]), context);

        let mut ty = ParsedType {
            name,
            kind,
            visibility,
            modifiers,
            markers,
            supertypes: self.extract_supertypes(node),
            decl_range: Self::range(node),
            body_range: Self::range(&body),
            indent: self.line_indent(node.start_byte()),
            enum_constants: None,
            extras: Vec::new(),
            members: Vec::new(),
            nested: Vec::new(),
            span: Self::span(node),
        };

        let body_context = match kind {
            TypeKind::Interface | TypeKind::Annotation => BodyContext::Interface,
            _ => BodyContext::Class,
        };

        if kind == TypeKind::Enum {
            self.extract_enum_body(&body, &mut ty);
        } else if kind != TypeKind::Annotation {
            self.extract_body(&body, body_context, &mut ty);
        }

        Some(ty)
    }

    fn extract_supertypes(&self, node: &TSNode) -> Vec<String> {
        let mut supertypes = Vec::new();

        if let Some(superclass) = node.child_by_field_name("superclass") {
            let mut cursor = superclass.walk();
            supertypes.extend(
                superclass
                    .named_children(&mut cursor)
                    .map(|t| self.text(&t).to_string()),
            );
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if matches!(child.kind(), "super_interfaces" | "extends_interfaces") {
                if let Some(list) = Self::child_of_kind(&child, &["type_list"]) {
                    let mut list_cursor = list.walk();
                    supertypes.extend(
                        list.named_children(&mut list_cursor)
                            .map(|t| self.text(&t).to_string()),
                    );
                }
            }
        }

        supertypes
    }

    fn extract_enum_body(&self, body: &TSNode, ty: &mut ParsedType) {
        let mut first_constant: Option<usize> = None;
        let mut last_constant: Option<usize> = None;

        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            match child.kind() {
                "enum_constant" => {
                    first_constant.get_or_insert(child.start_byte());
                    last_constant = Some(child.end_byte());
                }
                "enum_body_declarations" => {
                    self.extract_body(&child, BodyContext::Class, ty);
                }
                _ => {}
            }
        }

        if let (Some(start), Some(end)) = (first_constant, last_constant) {
            ty.enum_constants = Some(TextRange::new(start, end));
        }
    }

    fn extract_body(&self, body: &TSNode, context: BodyContext, ty: &mut ParsedType) {
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            match child.kind() {
                "method_declaration" => {
                    if let Some(method) = self.extract_method(&child, context) {
                        ty.members.push(method);
                    }
                }
                "constructor_declaration" => {
                    ty.members.push(self.extract_constructor(&child, &ty.name));
                }
                "field_declaration" | "constant_declaration" => {
                    self.extract_fields(&child, context, &mut ty.members);
                }
                "block" | "static_initializer" | "compact_constructor_declaration" => {
                    ty.extras.push(Self::range(&child));
                }
                kind => {
                    if let Some(nested_kind) = TypeKind::from_declaration(kind) {
                        if let Some(nested) = self.extract_type(&child, nested_kind, context) {
                            ty.nested.push(nested);
                        }
                    }
                }
            }
        }
    }

    fn extract_method(&self, node: &TSNode, context: BodyContext) -> Option<ParsedMember> {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(&n).to_string())
            .unwrap_or_default();
        if name.is_empty() {
            return None;
        }

        let modifiers_node = Self::child_of_kind(node, &["modifiers"]);
        let is_default = modifiers_node
            .map(|m| Self::child_of_kind(&m, &["default"]).is_some())
            .unwrap_or(false);
        let (visibility, mut modifiers, markers) = self.extract_modifiers(modifiers_node, context);

        let body_range = match node.child_by_field_name("body") {
            Some(block) => Some(Self::range(&block)),
            None => {
                if context == BodyContext::Interface && !modifiers.is_static && !is_default {
                    modifiers.is_abstract = true;
                }
                Self::child_of_kind(node, &[";"]).map(|semi| Self::range(&semi))
            }
        };

        let mut return_type = node
            .child_by_field_name("type")
            .map(|t| self.text(&t).to_string())
            .unwrap_or_else(|| "void".to_string());
        if let Some(dims) = node.child_by_field_name("dimensions") {
            return_type.push_str(&"[]".repeat(self.text(&dims).matches('[').count()));
        }

        Some(ParsedMember {
            kind: MemberKind::Method,
            name,
            params: self.extract_parameters(node),
            return_type,
            visibility,
            modifiers,
            markers,
            decl_range: Self::range(node),
            field_prefix: None,
            declarator: None,
            body_range,
            indent: self.line_indent(node.start_byte()),
            doc_range: self.doc_comment(node),
            span: Self::span(node),
        })
    }

    fn extract_constructor(&self, node: &TSNode, owner: &str) -> ParsedMember {
        let (visibility, modifiers, markers) =
            self.extract_modifiers(Self::child_of_kind(node, &["modifiers"]), BodyContext::Class);

        ParsedMember {
            kind: MemberKind::Constructor,
            name: CONSTRUCTOR_NAME.to_string(),
            params: self.extract_parameters(node),
            return_type: owner.to_string(),
            visibility,
            modifiers,
            markers,
            decl_range: Self::range(node),
            field_prefix: None,
            declarator: None,
            body_range: node.child_by_field_name("body").map(|b| Self::range(&b)),
            indent: self.line_indent(node.start_byte()),
            doc_range: self.doc_comment(node),
            span: Self::span(node),
        }
    }

    /// Parameter types in order; varargs become arrays
    fn extract_parameters(&self, node: &TSNode) -> Vec<String> {
        let Some(params) = node.child_by_field_name("parameters") else {
            return Vec::new();
        };

        let mut types = Vec::new();
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            match param.kind() {
                "formal_parameter" => {
                    let mut ty = param
                        .child_by_field_name("type")
                        .map(|t| self.text(&t).to_string())
                        .unwrap_or_default();
                    if let Some(dims) = param.child_by_field_name("dimensions") {
                        ty.push_str(&"[]".repeat(self.text(&dims).matches('[').count()));
                    }
                    types.push(ty);
                }
                "spread_parameter" => {
                    let mut inner = param.walk();
                    let ty = param
                        .named_children(&mut inner)
                        .find(|c| !matches!(c.kind(), "modifiers" | "variable_declarator"))
                        .map(|t| format!("{}[]", self.text(&t)))
                        .unwrap_or_default();
                    types.push(ty);
                }
                _ => {}
            }
        }
        types
    }

    /// One member per declarator: `int a = 1, b;` yields `a` and `b`
    fn extract_fields(&self, node: &TSNode, context: BodyContext, out: &mut Vec<ParsedMember>) {
        let Some(type_node) = node.child_by_field_name("type") else {
            return;
        };
        let (visibility, mut modifiers, markers) =
            self.extract_modifiers(Self::child_of_kind(node, &["modifiers"]), context);
        if context == BodyContext::Interface {
            modifiers.is_static = true;
            modifiers.is_final = true;
        }

        let declared_type = self.text(&type_node);
        let prefix = TextRange::new(node.start_byte(), type_node.end_byte());
        let doc_range = self.doc_comment(node);

        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            let Some(name_node) = declarator.child_by_field_name("name") else {
                continue;
            };

            let mut field_type = declared_type.to_string();
            if let Some(dims) = declarator.child_by_field_name("dimensions") {
                field_type.push_str(&"[]".repeat(self.text(&dims).matches('[').count()));
            }

            out.push(ParsedMember {
                kind: MemberKind::Field,
                name: self.text(&name_node).to_string(),
                params: Vec::new(),
                return_type: field_type,
                visibility,
                modifiers,
                markers: markers.clone(),
                decl_range: Self::range(node),
                field_prefix: Some(prefix),
                declarator: Some(Self::range(&declarator)),
                body_range: declarator
                    .child_by_field_name("value")
                    .map(|v| Self::range(&v)),
                indent: self.line_indent(node.start_byte()),
                doc_range,
                span: Self::span(node),
            });
        }
    }

    /// Javadoc block directly preceding a declaration
    fn doc_comment(&self, node: &TSNode) -> Option<TextRange> {
        let prev = node.prev_sibling()?;
        if prev.kind() != "block_comment" || !self.text(&prev).starts_with("/**") {
            return None;
        }
        let gap = self.source.get(prev.end_byte()..node.start_byte())?;
        gap.chars()
            .all(char::is_whitespace)
            .then(|| Self::range(&prev))
    }

    fn collect_issues(&self, node: &TSNode, issues: &mut Vec<ParseIssue>) {
        if node.is_error() || node.is_missing() {
            issues.push(ParseIssue {
                message: if node.is_missing() {
                    format!("missing {}", node.kind())
                } else {
                    format!("unexpected `{}`", self.text(node).lines().next().unwrap_or(""))
                },
                span: Self::span(node),
            });
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.has_error() || child.is_missing() {
                self.collect_issues(&child, issues);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ParsedUnit {
        JavaSourceParser::new()
            .parse_unit("com/example/Foo.java", source)
            .unwrap()
    }

    #[test]
    fn test_package_and_imports() {
        let unit = parse(
            r#"
package com.example;

import java.util.List;
import java.util.*;
import static java.lang.Math.max;

public class Foo {}
"#,
        );
        assert_eq!(unit.package, "com.example");
        assert_eq!(unit.imports.len(), 3);
        assert_eq!(unit.imports[0].target, "java.util.List");
        assert!(unit.imports[1].is_wildcard);
        assert_eq!(unit.imports[1].target, "java.util");
        assert!(unit.imports[2].is_static);
        assert_eq!(unit.imports[2].render(), "import static java.lang.Math.max;");
    }

    #[test]
    fn test_members_and_markers() {
        let source = r#"
package com.example;

@OverwriteClass
public class Foo extends Base implements Runnable {
    public static final int X = 1;
    private String name, alias = "a";

    public Foo(int x, String... rest) {}

    @Overwrite
    public int bar(java.util.List<String> items, int[] counts) {
        return 1;
    }

    public abstract void run();
}
"#;
        let unit = parse(source);
        assert_eq!(unit.types.len(), 1);
        let foo = &unit.types[0];
        assert_eq!(foo.name, "Foo");
        assert_eq!(foo.kind, TypeKind::Class);
        assert_eq!(foo.markers.len(), 1);
        assert_eq!(foo.markers[0].kind, MarkerKind::OverwriteClass);
        assert_eq!(foo.supertypes, vec!["Base".to_string(), "Runnable".to_string()]);

        let names: Vec<_> = foo.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["X", "name", "alias", CONSTRUCTOR_NAME, "bar", "run"]);

        let x = &foo.members[0];
        assert_eq!(x.kind, MemberKind::Field);
        assert_eq!(x.return_type, "int");
        assert!(x.modifiers.is_static && x.modifiers.is_final);
        assert_eq!(x.body_range.unwrap().slice(source), "1");

        let alias = &foo.members[2];
        assert_eq!(alias.visibility, Visibility::Private);
        assert_eq!(alias.declarator.unwrap().slice(source), "alias = \"a\"");

        let ctor = &foo.members[3];
        assert_eq!(ctor.params, vec!["int".to_string(), "String[]".to_string()]);
        assert_eq!(ctor.return_type, "Foo");

        let bar = &foo.members[4];
        assert_eq!(bar.markers[0].kind, MarkerKind::Overwrite);
        assert_eq!(bar.params, vec!["java.util.List<String>".to_string(), "int[]".to_string()]);
        assert_eq!(bar.body_range.unwrap().slice(source).trim_start().chars().next(), Some('{'));
        assert_eq!(bar.indent, "    ");

        let run = &foo.members[5];
        assert!(run.modifiers.is_abstract);
        assert_eq!(run.body_range.unwrap().slice(source), ";");
    }

    #[test]
    fn test_interface_members_are_public() {
        let unit = parse(
            r#"
public interface Service {
    int LIMIT = 3;
    String name();
    default int size() { return 0; }
}
"#,
        );
        let service = &unit.types[0];
        assert_eq!(service.kind, TypeKind::Interface);
        assert!(service.members.iter().all(|m| m.visibility == Visibility::Public));
        assert!(service.members[0].modifiers.is_static);
        assert!(service.members[1].modifiers.is_abstract);
        assert!(!service.members[2].modifiers.is_abstract);
    }

    #[test]
    fn test_nested_types_and_enum_constants() {
        let unit = parse(
            r#"
public class Outer {
    public enum Mode { ON, OFF; public boolean on() { return this == ON; } }
    static class Inner {
        void ping() {}
    }
}
"#,
        );
        let outer = &unit.types[0];
        assert_eq!(outer.nested.len(), 2);
        let mode = &outer.nested[0];
        assert_eq!(mode.kind, TypeKind::Enum);
        assert!(mode.extras.is_empty());
        assert_eq!(
            mode.enum_constants.map(|r| r.len()),
            Some("ON, OFF".len())
        );
        assert_eq!(mode.members.len(), 1);
        assert_eq!(outer.nested[1].members[0].name, "ping");
    }

    #[test]
    fn test_marker_arguments() {
        let unit = parse(
            r#"
@OverwriteTarget(required = false)
public class Foo {
    @PlatformMustInherit
    public void a() {}
}
"#,
        );
        let foo = &unit.types[0];
        assert_eq!(
            foo.markers[0].kind,
            MarkerKind::OverwriteTarget { required: false }
        );
        assert_eq!(foo.markers[0].arg("required"), Some("false"));
        assert_eq!(foo.members[0].markers[0].kind, MarkerKind::PlatformMustInherit);
    }

    #[test]
    fn test_javadoc_is_attached() {
        let source = "class A {\n    /** Doc. */\n    void a() {}\n}\n";
        let unit = parse(source);
        let doc = unit.types[0].members[0].doc_range.unwrap();
        assert_eq!(doc.slice(source), "/** Doc. */");
    }

    #[test]
    fn test_syntax_errors_are_reported_not_fatal() {
        let unit = parse("class A { void a( { }");
        assert!(unit.has_issues());
    }
}
