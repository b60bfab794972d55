//! Error types for schema derivation and DDL generation.
//!
//! Every variant is a terminal validation failure: the builder fails fast on
//! the first violation and nothing is retried or partially cached.

use thiserror::Error;

/// The main error type for ddlgen operations.
#[derive(Debug, Error)]
pub enum DdlError {
    /// The input type is not a struct-like record.
    #[error("cannot derive a table model from non-struct type '{0}'")]
    InvalidKind(String),

    /// A clause received the wrong number of arguments.
    #[error("clause '{clause}' on '{target}' expects {expected} argument(s), got {got}")]
    AnnotationArity {
        clause: &'static str,
        target: String,
        expected: &'static str,
        got: usize,
    },

    /// An unrecognized clause key.
    #[error("unknown annotation clause '{clause}' on column '{column}'")]
    UnknownAnnotation { clause: String, column: String },

    /// A constraint name reused across the index/unique/foreign-key/check
    /// namespaces (names are compared case-insensitively).
    #[error("constraint name '{name}' is already used by a {existing} constraint")]
    ConstraintNameCollision { name: String, existing: &'static str },

    /// A field-state conflict, such as an auto-increment column with a
    /// default value or a second optimistic-lock column.
    #[error("column '{column}': {reason}")]
    InvalidColumnState { column: String, reason: String },

    /// A host value type with no mapping in the target dialect.
    #[error("unsupported column type '{0}'")]
    UnsupportedType(String),

    /// A fixed-precision column lacking its required length parameters.
    #[error("column '{column}' requires explicit length parameters")]
    MissingLength { column: String },

    /// A table-level option given the wrong argument count.
    #[error("table option '{option}' expects exactly one argument")]
    InvalidTableOption { option: String },

    /// A clause argument that could not be interpreted (bad boolean or
    /// integer literal).
    #[error("clause '{clause}' on column '{column}': {message}")]
    InvalidArgument {
        clause: &'static str,
        column: String,
        message: String,
    },

    /// The annotation string could not be tokenized.
    #[error("annotation parse error: {0}")]
    Parse(String),
}

impl DdlError {
    /// Create an arity error for a clause applied to a column or table.
    pub fn arity(
        clause: &'static str,
        target: impl Into<String>,
        expected: &'static str,
        got: usize,
    ) -> Self {
        Self::AnnotationArity {
            clause,
            target: target.into(),
            expected,
            got,
        }
    }

    /// Create a column-state conflict error.
    pub fn state(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColumnState {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed-argument error.
    pub fn argument(
        clause: &'static str,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            clause,
            column: column.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for ddlgen operations.
pub type DdlResult<T> = Result<T, DdlError>;
