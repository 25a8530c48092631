//! Utility functions for code generation, URL validation and error mapping.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Long URL admission checks
//! - [`db_error`] - SQLx error classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
