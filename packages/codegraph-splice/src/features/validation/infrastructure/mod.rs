//! Validation infrastructure

mod renderer;

pub use renderer::DiagnosticRenderer;
