use serde::Serialize;

/// Which tree an output file came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmitOrigin {
    Platform,
    Common,
}

/// Source text ready to be written under the output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedFile {
    /// Path relative to the output directory, `/`-separated
    pub rel_path: String,
    pub text: String,
    pub origin: EmitOrigin,
}

impl EmittedFile {
    pub fn platform(rel_path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            rel_path: rel_path.into(),
            text: text.into(),
            origin: EmitOrigin::Platform,
        }
    }

    pub fn common(rel_path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            rel_path: rel_path.into(),
            text: text.into(),
            origin: EmitOrigin::Common,
        }
    }
}
