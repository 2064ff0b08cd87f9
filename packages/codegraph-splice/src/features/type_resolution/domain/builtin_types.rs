//! Built-in Java type hierarchy
//!
//! Direct supertypes of the `java.lang` / `java.util` types platform code
//! commonly narrows to. Keys and values are simple names.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Direct supertypes by simple name
pub static BUILTIN_SUPERTYPES: Lazy<FxHashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        let mut m: FxHashMap<&'static str, &'static [&'static str]> = FxHashMap::default();

        // Boxed primitives and strings
        m.insert("Integer", &["Number", "Comparable"]);
        m.insert("Long", &["Number", "Comparable"]);
        m.insert("Short", &["Number", "Comparable"]);
        m.insert("Byte", &["Number", "Comparable"]);
        m.insert("Float", &["Number", "Comparable"]);
        m.insert("Double", &["Number", "Comparable"]);
        m.insert("Number", &["Serializable"]);
        m.insert("Boolean", &["Serializable", "Comparable"]);
        m.insert("Character", &["Serializable", "Comparable"]);
        m.insert("String", &["CharSequence", "Comparable", "Serializable"]);
        m.insert("StringBuilder", &["CharSequence", "Appendable"]);

        // Collections
        m.insert("Collection", &["Iterable"]);
        m.insert("List", &["Collection"]);
        m.insert("Set", &["Collection"]);
        m.insert("SortedSet", &["Set"]);
        m.insert("NavigableSet", &["SortedSet"]);
        m.insert("Queue", &["Collection"]);
        m.insert("Deque", &["Queue"]);
        m.insert("AbstractCollection", &["Collection"]);
        m.insert("AbstractList", &["AbstractCollection", "List"]);
        m.insert("AbstractSet", &["AbstractCollection", "Set"]);
        m.insert("ArrayList", &["AbstractList", "List", "RandomAccess"]);
        m.insert("LinkedList", &["AbstractList", "List", "Deque"]);
        m.insert("ArrayDeque", &["AbstractCollection", "Deque"]);
        m.insert("HashSet", &["AbstractSet", "Set"]);
        m.insert("LinkedHashSet", &["HashSet", "Set"]);
        m.insert("TreeSet", &["AbstractSet", "NavigableSet"]);
        m.insert("SortedMap", &["Map"]);
        m.insert("NavigableMap", &["SortedMap"]);
        m.insert("AbstractMap", &["Map"]);
        m.insert("HashMap", &["AbstractMap", "Map"]);
        m.insert("LinkedHashMap", &["HashMap", "Map"]);
        m.insert("TreeMap", &["AbstractMap", "NavigableMap"]);
        m.insert("EnumMap", &["AbstractMap"]);
        m.insert("ConcurrentMap", &["Map"]);
        m.insert("ConcurrentHashMap", &["AbstractMap", "ConcurrentMap"]);

        // Exceptions
        m.insert("Throwable", &["Serializable"]);
        m.insert("Exception", &["Throwable"]);
        m.insert("Error", &["Throwable"]);
        m.insert("RuntimeException", &["Exception"]);
        m.insert("IllegalArgumentException", &["RuntimeException"]);
        m.insert("IllegalStateException", &["RuntimeException"]);
        m.insert("UnsupportedOperationException", &["RuntimeException"]);
        m.insert("NullPointerException", &["RuntimeException"]);
        m.insert("IOException", &["Exception"]);

        m
    });

/// Primitive types `from` widens to without a cast
pub fn primitive_widens_to(from: &str, to: &str) -> bool {
    let targets: &[&str] = match from {
        "byte" => &["short", "int", "long", "float", "double"],
        "short" => &["int", "long", "float", "double"],
        "char" => &["int", "long", "float", "double"],
        "int" => &["long", "float", "double"],
        "long" => &["float", "double"],
        "float" => &["double"],
        _ => &[],
    };
    targets.contains(&to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        assert_eq!(BUILTIN_SUPERTYPES.get("ArrayList").map(|s| s[1]), Some("List"));
        assert!(BUILTIN_SUPERTYPES.get("Object").is_none());
    }

    #[test]
    fn test_primitive_widening() {
        assert!(primitive_widens_to("int", "long"));
        assert!(primitive_widens_to("char", "int"));
        assert!(!primitive_widens_to("long", "int"));
        assert!(!primitive_widens_to("char", "short"));
        assert!(!primitive_widens_to("boolean", "int"));
    }
}
