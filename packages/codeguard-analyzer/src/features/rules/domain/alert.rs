//! Alert model
//!
//! An alert serializes as one flat record with a `kind` discriminant:
//!
//! ```json
//! {"kind": "LongFunction", "function_name": "load", "line_count": 34,
//!  "message": "Function 'load' has 34 lines, which exceeds 20.", "line": 12}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five detectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertKind {
    LongFile,
    LongFunction,
    MissingDocstring,
    NonLatinIdentifier,
    UnusedVariable,
}

impl AlertKind {
    pub const ALL: [AlertKind; 5] = [
        AlertKind::LongFile,
        AlertKind::LongFunction,
        AlertKind::MissingDocstring,
        AlertKind::NonLatinIdentifier,
        AlertKind::UnusedVariable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::LongFile => "LongFile",
            AlertKind::LongFunction => "LongFunction",
            AlertKind::MissingDocstring => "MissingDocstring",
            AlertKind::NonLatinIdentifier => "NonLatinIdentifier",
            AlertKind::UnusedVariable => "UnusedVariable",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a non-Latin identifier was introduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierRole {
    Function,
    Variable,
    Parameter,
}

impl IdentifierRole {
    fn label(&self) -> &'static str {
        match self {
            IdentifierRole::Function => "function name",
            IdentifierRole::Variable => "variable name",
            IdentifierRole::Parameter => "parameter name",
        }
    }
}

/// Kind-specific payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AlertDetail {
    LongFile {
        line_count: usize,
    },
    LongFunction {
        function_name: String,
        line_count: usize,
    },
    MissingDocstring {
        function_name: String,
    },
    NonLatinIdentifier {
        identifier: String,
        role: IdentifierRole,
    },
    UnusedVariable {
        variable_name: String,
    },
}

/// One detected issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(flatten)]
    pub detail: AlertDetail,
    pub message: String,
    /// Line the finding points at; whole-file findings have none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Alert {
    pub fn long_file(line_count: usize, limit: usize) -> Self {
        Self {
            message: format!(
                "The file has {} lines, which exceeds the recommended limit of {}.",
                line_count, limit
            ),
            detail: AlertDetail::LongFile { line_count },
            line: None,
        }
    }

    pub fn long_function(name: &str, line_count: usize, limit: usize, line: u32) -> Self {
        Self {
            message: format!(
                "Function '{}' has {} lines, which exceeds {}.",
                name, line_count, limit
            ),
            detail: AlertDetail::LongFunction {
                function_name: name.to_string(),
                line_count,
            },
            line: Some(line),
        }
    }

    pub fn missing_docstring(name: &str, line: u32) -> Self {
        Self {
            message: format!("Function '{}' is missing a docstring.", name),
            detail: AlertDetail::MissingDocstring {
                function_name: name.to_string(),
            },
            line: Some(line),
        }
    }

    pub fn non_latin_identifier(identifier: &str, role: IdentifierRole, line: u32) -> Self {
        Self {
            message: format!(
                "The {} '{}' contains Hebrew characters, which is not recommended.",
                role.label(),
                identifier
            ),
            detail: AlertDetail::NonLatinIdentifier {
                identifier: identifier.to_string(),
                role,
            },
            line: Some(line),
        }
    }

    pub fn unused_variable(name: &str, line: u32) -> Self {
        Self {
            message: format!("The variable '{}' is defined but never used.", name),
            detail: AlertDetail::UnusedVariable {
                variable_name: name.to_string(),
            },
            line: Some(line),
        }
    }

    pub fn kind(&self) -> AlertKind {
        match self.detail {
            AlertDetail::LongFile { .. } => AlertKind::LongFile,
            AlertDetail::LongFunction { .. } => AlertKind::LongFunction,
            AlertDetail::MissingDocstring { .. } => AlertKind::MissingDocstring,
            AlertDetail::NonLatinIdentifier { .. } => AlertKind::NonLatinIdentifier,
            AlertDetail::UnusedVariable { .. } => AlertKind::UnusedVariable,
        }
    }

    /// Line count carried by LongFile and LongFunction alerts
    pub fn line_count(&self) -> Option<usize> {
        match self.detail {
            AlertDetail::LongFile { line_count } | AlertDetail::LongFunction { line_count, .. } => {
                Some(line_count)
            }
            _ => None,
        }
    }

    /// The offending name: function, identifier or variable
    pub fn subject(&self) -> Option<&str> {
        match &self.detail {
            AlertDetail::LongFile { .. } => None,
            AlertDetail::LongFunction { function_name, .. }
            | AlertDetail::MissingDocstring { function_name } => Some(function_name),
            AlertDetail::NonLatinIdentifier { identifier, .. } => Some(identifier),
            AlertDetail::UnusedVariable { variable_name } => Some(variable_name),
        }
    }
}
