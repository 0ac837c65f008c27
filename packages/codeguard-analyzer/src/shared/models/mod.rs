//! Shared models

mod error;
mod span;

pub use error::{CodeguardError, ErrorKind, Result};
pub use span::Span;
