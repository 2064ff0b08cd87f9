//! Java source generators

/// `package {package};` followed by a class with the given body lines
pub fn java_class(package: &str, header: &str, body: &[&str]) -> String {
    let mut out = String::new();
    if !package.is_empty() {
        out.push_str(&format!("package {};\n\n", package));
    }
    out.push_str(&format!("{} {{\n", header));
    for line in body {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

/// Public method returning a default value for its type
pub fn java_method(name: &str, params: &[&str], return_type: &str) -> String {
    let params: Vec<String> = params
        .iter()
        .enumerate()
        .map(|(i, ty)| format!("{} p{}", ty, i))
        .collect();
    let body = match return_type {
        "void" => "{}".to_string(),
        "boolean" => "{ return false; }".to_string(),
        "int" | "long" | "short" | "byte" | "char" | "float" | "double" => {
            "{ return 0; }".to_string()
        }
        _ => "{ return null; }".to_string(),
    };
    format!("public {} {}({}) {}", return_type, name, params.join(", "), body)
}

/// Reference and primitive types with no generic arguments
pub const SIMPLE_TYPES: &[&str] = &[
    "int",
    "long",
    "double",
    "Object",
    "Number",
    "Integer",
    "String",
    "CharSequence",
    "Base",
    "Derived",
    "int[]",
    "Object[]",
    "String[]",
];

/// Declares `Derived extends Base` for hierarchy-aware fixtures
pub fn hierarchy_sources() -> Vec<(String, String)> {
    vec![
        ("Base.java".to_string(), java_class("", "public class Base", &[])),
        (
            "Derived.java".to_string(),
            java_class("", "public class Derived extends Base", &[]),
        ),
    ]
}
