//! Error types for criteria handling and query execution.
//!
//! The taxonomy has three families:
//!
//! - **validation** — unknown field or operator, malformed literal, empty
//!   value list, kind mismatch. Detected before any store I/O, never
//!   retried, surfaced to the caller as a rejected request.
//! - **not found** — an update or delete referencing a nonexistent id.
//!   Surfaced, not retried.
//! - **unavailable** — the primary or secondary store is unreachable or
//!   timed out. Retryable by the caller.
//!
//! The `is_*` helpers classify an error without matching on variants at the
//! call site.

use thiserror::Error;

use crate::filter::Operator;
use crate::value::{EntityId, FieldKind};

/// Result type for criteria and query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors produced by the criteria decoder, the specification compiler, and
/// the store seams.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// A request parameter referenced a field the entity does not declare.
    #[error("unknown field `{field}` for {entity}")]
    UnknownField {
        /// Entity name.
        entity: &'static str,
        /// The offending field name.
        field: String,
    },

    /// A request parameter carried an operator suffix that does not exist.
    #[error("unknown operator `{operator}` on field `{field}`")]
    UnknownOperator {
        /// The field part of the parameter key.
        field: String,
        /// The unrecognized suffix.
        operator: String,
    },

    /// A request parameter key was not of the form `field.operator`.
    #[error("malformed parameter key `{key}`, expected `field.operator`")]
    MalformedKey {
        /// The offending key.
        key: String,
    },

    /// The operator is not defined for the field's declared kind.
    #[error("operator `{operator}` is not supported on {kind} field `{field}`")]
    UnsupportedOperator {
        /// Field name.
        field: &'static str,
        /// The field's declared kind.
        kind: FieldKind,
        /// The rejected operator.
        operator: Operator,
    },

    /// An `in`/`notIn` filter carried no values.
    #[error("empty value list for field `{field}`")]
    EmptyValueList {
        /// Field name.
        field: &'static str,
    },

    /// A filter payload's kind does not match the field's declared kind.
    #[error("value kind mismatch on field `{field}`: expected {expected}, got {actual}")]
    KindMismatch {
        /// Field name.
        field: &'static str,
        /// The field's declared kind.
        expected: FieldKind,
        /// The payload's kind.
        actual: FieldKind,
    },

    /// A literal could not be converted to the field's kind.
    #[error("malformed value `{value}` for field `{field}`: {reason}")]
    MalformedValue {
        /// Field name.
        field: String,
        /// The raw literal.
        value: String,
        /// Conversion failure detail.
        reason: String,
    },

    /// An operation required an assigned id but the entity had none.
    #[error("{entity} has no id assigned")]
    MissingId {
        /// Entity name.
        entity: &'static str,
    },

    /// An update or delete referenced an id absent from the primary store.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity name.
        entity: &'static str,
        /// The missing id.
        id: EntityId,
    },

    /// The primary or secondary store is unreachable or timed out.
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Failure detail.
        reason: String,
    },
}

impl QueryError {
    /// Create an unknown-field error.
    pub fn unknown_field(entity: &'static str, field: impl Into<String>) -> Self {
        Self::UnknownField {
            entity,
            field: field.into(),
        }
    }

    /// Create an unknown-operator error.
    pub fn unknown_operator(field: impl Into<String>, operator: impl Into<String>) -> Self {
        Self::UnknownOperator {
            field: field.into(),
            operator: operator.into(),
        }
    }

    /// Create a malformed-value error.
    pub fn malformed_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(entity: &'static str, id: EntityId) -> Self {
        Self::NotFound { entity, id }
    }

    /// Create a store-unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Whether this is a rejected-request error: never retried, no store
    /// I/O has happened.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownField { .. }
                | Self::UnknownOperator { .. }
                | Self::MalformedKey { .. }
                | Self::UnsupportedOperator { .. }
                | Self::EmptyValueList { .. }
                | Self::KindMismatch { .. }
                | Self::MalformedValue { .. }
                | Self::MissingId { .. }
        )
    }

    /// Whether this is a missing-entity error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the caller may retry the whole operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
