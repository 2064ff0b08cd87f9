//! Member comparator
//!
//! Decides whether one member structurally overrides another. There is no
//! explicit linkage between the trees; matching is by kind, name, arity and
//! type assignability:
//!
//! - methods and fields need equal names, constructors only compare signatures
//! - each child parameter must be assignable to the parent parameter
//! - the child's return (or declared) type must be assignable to the parent's
//!
//! Unknown types are never assignable, so doubtful pairs do not match.

mod member_comparator;

pub use member_comparator::MemberComparator;
