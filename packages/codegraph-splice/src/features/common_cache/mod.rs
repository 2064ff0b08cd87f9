//! Common-tree cache
//!
//! The common tree is parsed and indexed once per process and shared,
//! read-only, by every platform build. Each build receives it through an
//! explicit [`BuildContext`].

mod build_context;
mod cache;
mod index;

pub use build_context::BuildContext;
pub use cache::CommonTreeCache;
pub use index::CommonIndex;
