//! Field-level validation of canonical candidate records.

pub mod format;
pub mod result;
pub mod validator;

pub use result::{ErrorKind, FieldError, ValidationResult};
pub use validator::Validator;
