//! Textual type reference helpers
//!
//! Types are compared as written in source. These helpers normalise the text
//! (whitespace, type annotations, varargs) and split it into erasure, type
//! arguments and array dimensions.

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "short", "char", "int", "long", "float", "double",
];

/// Last dotted segment of a (possibly qualified) name
pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}

/// A type reference split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeShape {
    /// Erased base name as written (`java.util.List`, `int`, `T`)
    pub base: String,
    /// Type arguments without the outer angle brackets, whitespace removed
    pub args: Option<String>,
    /// Array dimensions (varargs count as one)
    pub dims: usize,
}

impl TypeShape {
    pub fn parse(text: &str) -> Self {
        let normalized = normalize(text);
        let mut rest = normalized.as_str();

        let mut dims = 0;
        while let Some(stripped) = rest.strip_suffix("[]") {
            dims += 1;
            rest = stripped;
        }

        let (base, args) = match rest.find('<') {
            Some(open) if rest.ends_with('>') => (
                rest[..open].to_string(),
                Some(rest[open + 1..rest.len() - 1].to_string()),
            ),
            _ => (rest.to_string(), None),
        };

        Self { base, args, dims }
    }

    pub fn simple_base(&self) -> &str {
        simple_name(&self.base)
    }

    pub fn is_primitive(&self) -> bool {
        self.dims == 0 && is_primitive(&self.base)
    }

    pub fn is_void(&self) -> bool {
        self.dims == 0 && self.base == "void"
    }

    pub fn is_string(&self) -> bool {
        self.dims == 0 && self.simple_base() == "String"
    }

    /// Element type of an array shape
    pub fn component(&self) -> Option<TypeShape> {
        (self.dims > 0).then(|| TypeShape {
            base: self.base.clone(),
            args: self.args.clone(),
            dims: self.dims - 1,
        })
    }

    pub fn render(&self) -> String {
        let mut out = self.base.clone();
        if let Some(args) = &self.args {
            out.push('<');
            out.push_str(args);
            out.push('>');
        }
        for _ in 0..self.dims {
            out.push_str("[]");
        }
        out
    }
}

/// Canonical text of a type reference
///
/// Drops type-use annotations, `final`, whitespace, and turns varargs into an
/// array dimension: `@Nullable List< String >...` becomes `List<String>[]`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for token in text.split_whitespace() {
        if token.starts_with('@') || token == "final" {
            continue;
        }
        out.push_str(token);
    }
    if let Some(stripped) = out.strip_suffix("...") {
        let mut array = stripped.to_string();
        array.push_str("[]");
        return array;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("java.util.Map< String, Integer >"), "java.util.Map<String,Integer>");
        assert_eq!(normalize("@Nullable String"), "String");
        assert_eq!(normalize("String..."), "String[]");
    }

    #[test]
    fn test_shape_parts() {
        let shape = TypeShape::parse("java.util.List<String>[][]");
        assert_eq!(shape.base, "java.util.List");
        assert_eq!(shape.args.as_deref(), Some("String"));
        assert_eq!(shape.dims, 2);
        assert_eq!(shape.simple_base(), "List");
        assert_eq!(shape.component().unwrap().dims, 1);
        assert_eq!(shape.render(), "java.util.List<String>[][]");
    }

    #[test]
    fn test_primitive_and_string() {
        assert!(TypeShape::parse("int").is_primitive());
        assert!(!TypeShape::parse("int[]").is_primitive());
        assert!(TypeShape::parse("java.lang.String").is_string());
        assert!(TypeShape::parse("void").is_void());
    }
}
