//! Validation modules

pub mod package;

pub use package::{validate_identifier, validate_package};
