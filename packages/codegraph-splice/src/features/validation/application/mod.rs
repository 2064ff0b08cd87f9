//! Validation use cases

mod validator;

pub use validator::Validator;
