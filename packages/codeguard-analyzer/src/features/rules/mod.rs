//! Rule Engine
//!
//! Parses one Python source text and reports:
//! - LongFile: more lines than `max_file_lines`
//! - LongFunction: a function spanning more than `max_function_lines`
//! - MissingDocstring
//! - NonLatinIdentifier: Hebrew characters in function, variable or
//!   parameter names
//! - UnusedVariable: stored but never loaded anywhere in the file
//!
//! The engine is pure; recording history is the orchestrator's job.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::RuleEngine;
pub use domain::{Alert, AlertDetail, AlertKind, IdentifierRole};
