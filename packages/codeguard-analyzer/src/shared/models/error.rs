//! Error types for the codeguard-analyzer crate
//!
//! Features:
//! - Categorized error kinds
//! - Optional file path and line context
//! - Source error chaining

use std::fmt;

use codeguard_storage::StorageError;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source text is not valid Python
    Parse,
    /// Configuration errors
    Config,
    /// IO errors
    IO,
    /// History store errors
    Storage,
    /// Internal errors (bugs)
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::Config => "config",
            ErrorKind::IO => "io",
            ErrorKind::Storage => "storage",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Unified error type
#[derive(Debug)]
pub struct CodeguardError {
    pub kind: ErrorKind,
    pub message: String,
    pub file_path: Option<String>,
    pub line: Option<u32>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CodeguardError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file_path: None,
            line: None,
            source: None,
        }
    }

    pub fn with_file(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn is_parse(&self) -> bool {
        self.kind == ErrorKind::Parse
    }
}

impl fmt::Display for CodeguardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(ref file) = self.file_path {
            write!(f, " in {}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for CodeguardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CodeguardError>;

impl From<std::io::Error> for CodeguardError {
    fn from(err: std::io::Error) -> Self {
        CodeguardError::new(ErrorKind::IO, format!("IO error: {}", err)).with_source(err)
    }
}

impl From<StorageError> for CodeguardError {
    fn from(err: StorageError) -> Self {
        CodeguardError::storage(format!("History store error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for CodeguardError {
    fn from(err: serde_json::Error) -> Self {
        CodeguardError::internal(format!("JSON serialization error: {}", err)).with_source(err)
    }
}

impl From<crate::config::ConfigError> for CodeguardError {
    fn from(err: crate::config::ConfigError) -> Self {
        CodeguardError::config(err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = CodeguardError::parse("unexpected token")
            .with_file("test.py")
            .with_line(42);

        let msg = format!("{}", err);
        assert_eq!(msg, "[parse] unexpected token in test.py:42");
        assert!(err.is_parse());
    }

    #[test]
    fn test_line_without_file_is_not_rendered() {
        let err = CodeguardError::internal("boom").with_line(3);
        assert_eq!(err.to_string(), "[internal] boom");
    }

    #[test]
    fn test_storage_error_conversion_keeps_source() {
        let err: CodeguardError = StorageError::database("locked").into();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(err.message.contains("locked"));
        assert!(err.source().is_some());
    }
}
