//! Rules application layer

mod analyze_file;

pub use analyze_file::RuleEngine;
