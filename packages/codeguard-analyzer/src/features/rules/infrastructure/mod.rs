//! Detector implementations

mod file_length;
mod functions;
mod identifiers;
mod names;
mod walker;

pub use file_length::check_file_length;
pub use functions::{function_length, has_docstring};
pub use identifiers::contains_hebrew;
pub use names::{NameContext, NameUsage};
pub use walker::check_tree;
