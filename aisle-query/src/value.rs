//! Field values and their kinds.
//!
//! Every filterable field of an entity carries one of a small set of scalar
//! kinds. [`Value`] is the runtime payload used by filters and by field
//! access on entities; [`FieldKind`] is the compile-time tag declared in an
//! entity's field-descriptor table. The two line up one-to-one, which is what
//! lets the compiler reject a filter whose payload does not match the field
//! it targets.
//!
//! # Examples
//!
//! ```rust
//! use aisle_query::{FieldKind, Value};
//!
//! let price: Value = Value::decimal("9.99").unwrap();
//! assert_eq!(price.kind(), FieldKind::Decimal);
//!
//! let name: Value = "Gouda".into();
//! assert_eq!(name.kind(), FieldKind::Text);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Opaque entity identifier assigned by the primary store on creation.
///
/// Ids are monotonically increasing and never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Wrap a raw id value.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id value.
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The declared kind of an entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Entity id (own or related).
    Id,
    /// Signed integer.
    Int,
    /// Arbitrary-precision decimal, compared by numeric magnitude.
    Decimal,
    /// Free text.
    Text,
    /// Calendar date, compared in calendar order.
    Date,
    /// A closed set of symbolic names (an enumeration).
    Symbol,
}

impl FieldKind {
    /// Human-readable kind name, used in error messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Int => "integer",
            Self::Decimal => "decimal",
            Self::Text => "text",
            Self::Date => "date",
            Self::Symbol => "symbol",
        }
    }

    /// Whether values of this kind form a total order usable by the
    /// ordered-range operators.
    pub const fn is_ordered(&self) -> bool {
        matches!(self, Self::Id | Self::Int | Self::Decimal | Self::Date)
    }

    /// Whether values of this kind support substring matching.
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed scalar payload carried by filters and returned by field access.
///
/// A null field is represented as `Option::<Value>::None` at the access
/// seam, not as a `Value` variant; filters therefore never carry a null
/// payload (null checks go through the `Specified` operator instead).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Entity id.
    Id(EntityId),
    /// Signed integer.
    Int(i64),
    /// Decimal number.
    Decimal(Decimal),
    /// Free text.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Symbolic enumeration name.
    Symbol(SmolStr),
}

impl Value {
    /// The kind this value belongs to.
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Id(_) => FieldKind::Id,
            Self::Int(_) => FieldKind::Int,
            Self::Decimal(_) => FieldKind::Decimal,
            Self::Text(_) => FieldKind::Text,
            Self::Date(_) => FieldKind::Date,
            Self::Symbol(_) => FieldKind::Symbol,
        }
    }

    /// Parse a decimal value from its literal form.
    pub fn decimal(literal: &str) -> Result<Self, rust_decimal::Error> {
        Decimal::from_str(literal).map(Self::Decimal)
    }

    /// Parse a calendar date from its ISO `YYYY-MM-DD` form.
    pub fn date(literal: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::from_str(literal).map(Self::Date)
    }

    /// Borrow the text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Compare two values of the same kind along their stored total order.
    ///
    /// Returns `None` for values of different kinds; the compiler guarantees
    /// evaluated pairs are kind-consistent, so callers treat `None` as a
    /// non-match.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Id(a), Self::Id(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Decimal(a), Self::Decimal(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::Symbol(a), Self::Symbol(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self {
        Self::Id(id)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<SmolStr> for Value {
    fn from(v: SmolStr) -> Self {
        Self::Symbol(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Int(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "'{}'", v),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Self::Symbol(v) => f.write_str(v),
        }
    }
}
