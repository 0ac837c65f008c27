//! Rules domain models

mod alert;

pub use alert::{Alert, AlertDetail, AlertKind, IdentifierRole};
