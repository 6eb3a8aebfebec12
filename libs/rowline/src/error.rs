/// Broad failure classification. Every `EncodeError` variant maps to
/// exactly one kind — callers that only route on shape-vs-content use
/// `kind()` instead of matching variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong shape supplied: record, column order, or dialect profile.
    Type,
    /// Well-shaped input violating a value-level rule.
    Value,
}

/// Encode error — terminates the call, no partial line is produced.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("record must be a map, got {actual}")]
    RecordShape { actual: &'static str },

    #[error("column order must be an array, got {actual}")]
    ColumnOrderShape { actual: &'static str },

    #[error("column order must contain at least one key")]
    EmptyColumnOrder,

    #[error("invalid dialect: {reason}")]
    Dialect { reason: String },

    #[error("record contains fields not in column order: {extras}")]
    ExtraFields { extras: String },

    #[error("field {token:?} needs escaping, but no escape character is set")]
    EscapeRequired { token: String },
}

impl EncodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::RecordShape { .. }
            | EncodeError::ColumnOrderShape { .. }
            | EncodeError::Dialect { .. } => ErrorKind::Type,
            EncodeError::EmptyColumnOrder
            | EncodeError::ExtraFields { .. }
            | EncodeError::EscapeRequired { .. } => ErrorKind::Value,
        }
    }
}
