//! SourceTree construction from parse results

use std::path::Path;

use tracing::{debug, info};

use crate::errors::{Result, SpliceError};
use crate::features::parsing::{
    collect_sources, parse_sources, ParsedMember, ParsedType, ParsedUnit, SourceParser,
};
use crate::features::source_tree::domain::{
    FileId, MemberLayout, MemberNode, MemberOrigin, SourceFile, SourceTree, TypeId, TypeNode,
    TypeOrigin,
};
use crate::shared::models::{MemberKind, TextRange};

/// Parse every source file under `root` into a tree
///
/// A missing root is an IO error; a root without sources yields an empty tree.
pub fn parse_tree<P: SourceParser>(
    root: &Path,
    extension: &str,
    parser: &P,
) -> Result<SourceTree> {
    if !root.is_dir() {
        return Err(SpliceError::io(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "source root is not a directory"),
        ));
    }

    let files = collect_sources(root, extension)?;
    let units = parse_sources(root, &files, parser)?;
    let tree = SourceTree::from_units(root, units);

    info!(
        "Parsed {}: {} files, {} types, {} members",
        root.display(),
        tree.file_count(),
        tree.type_count(),
        tree.member_count()
    );
    Ok(tree)
}

impl SourceTree {
    /// Assemble the arena; units are taken in path order
    pub fn from_units(root: impl Into<std::path::PathBuf>, mut units: Vec<ParsedUnit>) -> Self {
        units.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

        let mut tree = SourceTree::new(root);
        for unit in units {
            let ParsedUnit {
                rel_path,
                source,
                package,
                package_range,
                imports,
                types,
                ..
            } = unit;

            let mut marker_ranges = Vec::new();
            for ty in &types {
                collect_marker_ranges(ty, &mut marker_ranges);
            }
            marker_ranges.sort();
            marker_ranges.dedup();

            let file = tree.add_file(SourceFile {
                rel_path,
                text: source,
                package,
                package_range,
                imports,
                adopted_imports: Vec::new(),
                marker_ranges,
                types: Vec::new(),
            });

            for ty in types {
                tree.add_parsed_type(file, None, ty);
            }
            debug!("Indexed {}", tree.file(file).rel_path);
        }
        tree
    }

    fn add_parsed_type(
        &mut self,
        file: FileId,
        parent: Option<TypeId>,
        parsed: ParsedType,
    ) -> TypeId {
        let package = self.file(file).package.clone();
        let qualified_name = match parent {
            Some(parent) => format!("{}.{}", self.ty(parent).qualified_name, parsed.name),
            None if package.is_empty() => parsed.name.clone(),
            None => format!("{}.{}", package, parsed.name),
        };

        let id = self.add_type(TypeNode {
            name: parsed.name,
            qualified_name,
            package,
            kind: parsed.kind,
            visibility: parsed.visibility,
            modifiers: parsed.modifiers,
            markers: parsed.markers,
            supertypes: parsed.supertypes,
            file,
            parent,
            members: Vec::new(),
            nested: Vec::new(),
            indent: parsed.indent,
            span: parsed.span,
            origin: TypeOrigin::Source {
                decl_range: parsed.decl_range,
                body_range: parsed.body_range,
                enum_constants: parsed.enum_constants,
                extras: parsed.extras,
            },
        });

        for member in parsed.members {
            let node = self.member_from_parsed(file, id, member);
            self.add_member(node);
        }
        for nested in parsed.nested {
            self.add_parsed_type(file, Some(id), nested);
        }
        id
    }

    fn member_from_parsed(&self, file: FileId, owner: TypeId, parsed: ParsedMember) -> MemberNode {
        let text = self.file(file).text.as_str();
        let body = parsed.body_range.and_then(|range| {
            let slice = range.slice(text);
            match parsed.kind {
                MemberKind::Field => Some(slice.to_string()),
                MemberKind::Method | MemberKind::Constructor => {
                    slice.starts_with('{').then(|| slice.to_string())
                }
            }
        });

        MemberNode {
            owner,
            kind: parsed.kind,
            name: parsed.name,
            params: parsed.params,
            return_type: parsed.return_type,
            visibility: parsed.visibility,
            modifiers: parsed.modifiers,
            markers: parsed.markers,
            body,
            body_replaced: false,
            indent: parsed.indent,
            span: parsed.span,
            origin: MemberOrigin::Source(MemberLayout {
                decl_range: parsed.decl_range,
                field_prefix: parsed.field_prefix,
                declarator: parsed.declarator,
                body_range: parsed.body_range,
                doc_range: parsed.doc_range,
            }),
        }
    }
}

fn collect_marker_ranges(ty: &ParsedType, out: &mut Vec<TextRange>) {
    out.extend(ty.markers.iter().filter_map(|m| m.range));
    for member in &ty.members {
        out.extend(member.markers.iter().filter_map(|m| m.range));
    }
    for nested in &ty.nested {
        collect_marker_ranges(nested, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::JavaSourceParser;
    use crate::features::source_tree::domain::MemberId;
    use crate::shared::models::{MarkerKind, MarkerSet};

    fn tree(files: &[(&str, &str)]) -> SourceTree {
        let parser = JavaSourceParser::new();
        let units = files
            .iter()
            .map(|(path, source)| parser.parse_unit(path, source).unwrap())
            .collect();
        SourceTree::from_units("root", units)
    }

    #[test]
    fn test_qualified_names_and_lookup() {
        let tree = tree(&[(
            "a/Foo.java",
            "package a;\npublic class Foo {\n    public static class Inner {}\n}\n",
        )]);
        let foo = tree.lookup("a.Foo").unwrap();
        let inner = tree.lookup("a.Foo.Inner").unwrap();
        assert_eq!(tree.ty(inner).parent, Some(foo));
        assert_eq!(tree.nesting_path(inner), "Foo.Inner");
        assert!(tree.lookup("a.Inner").is_none());
    }

    #[test]
    fn test_all_types_order() {
        let tree = tree(&[
            ("b/B.java", "package b;\nclass B { class BI {} }\n"),
            ("a/Z.java", "package a;\nclass Z { class ZI { class ZII {} } }\n"),
            ("a/A.java", "package a;\nclass A {}\n"),
        ]);
        let names: Vec<&str> = tree
            .all_types()
            .into_iter()
            .map(|ty| tree.ty(ty).qualified_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["a.A", "a.Z", "a.Z.ZI", "a.Z.ZI.ZII", "b.B", "b.B.BI"]
        );
    }

    #[test]
    fn test_public_members_and_constants() {
        let tree = tree(&[(
            "Foo.java",
            r#"public class Foo {
    public static final int X = 1;
    public static final String NAME = "foo";
    private int hidden;
    public java.util.List<String> items;
    public int bar() { return X; }
    private void secret() {}
    public static class Inner {
        public void ping() {}
        public static final long Y = 2L;
    }
    private static class Hidden {
        public void nope() {}
    }
}
"#,
        )]);
        let foo = tree.lookup("Foo").unwrap();

        let members: Vec<String> = tree
            .public_members(foo)
            .into_iter()
            .map(|m| tree.describe_member(m))
            .collect();
        assert_eq!(
            members,
            vec![
                "Foo#items -> java.util.List<String>",
                "Foo#bar() -> int",
                "Foo.Inner#ping() -> void",
            ]
        );

        let constants: Vec<String> = tree
            .public_constants(foo)
            .into_iter()
            .map(|m| tree.describe_member(m))
            .collect();
        assert_eq!(
            constants,
            vec!["Foo#X -> int", "Foo#NAME -> String", "Foo.Inner#Y -> long"]
        );
    }

    #[test]
    fn test_member_bodies() {
        let tree = tree(&[(
            "A.java",
            "abstract class A {\n    int x = 1 + 2;\n    abstract void a();\n    A(int v) { x = v; }\n}\n",
        )]);
        let a = tree.lookup("A").unwrap();
        let bodies: Vec<Option<&str>> = tree
            .members_of(a)
            .map(|(_, m)| m.body.as_deref())
            .collect();
        assert_eq!(bodies, vec![Some("1 + 2"), None, Some("{ x = v; }")]);
    }

    #[test]
    fn test_render_member_strips_markers() {
        let source = "class A {\n    /** Doc. */\n    @PlatformMustInherit\n    public int a() { return 1; }\n    @Inherit public static final int X = 1, Y = 2;\n}\n";
        let tree = tree(&[("A.java", source)]);
        let a = tree.lookup("A").unwrap();
        let members: Vec<MemberId> = tree.ty(a).members.clone();

        assert!(tree.member(members[0]).has_marker(&MarkerKind::PlatformMustInherit));
        assert_eq!(
            tree.render_member(members[0]),
            "    /** Doc. */\n    public int a() { return 1; }"
        );
        assert_eq!(tree.render_member(members[2]), "    public static final int Y = 2;");
    }

    #[test]
    fn test_render_enum_type() {
        let source = "class A {\n    enum Mode {\n        ON, OFF;\n        boolean on() { return this == ON; }\n    }\n}\n";
        let tree = tree(&[("A.java", source)]);
        let mode = tree.lookup("A.Mode").unwrap();
        assert_eq!(
            tree.render_type(mode),
            "    enum Mode {\n        ON, OFF;\n        boolean on() { return this == ON; }\n    }"
        );
    }

    #[test]
    fn test_marker_ranges_recorded_once() {
        let source = "class A {\n    @Inherit int x = 1, y = 2;\n}\n";
        let tree = tree(&[("A.java", source)]);
        let file = tree.file_by_path("A.java").unwrap();
        assert_eq!(tree.file(file).marker_ranges.len(), 1);
    }
}
