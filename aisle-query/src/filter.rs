//! Atomic filter descriptors.
//!
//! A [`Filter`] is one operator plus its payload, targeting a single field.
//! It is a pure value: cloning produces an independent deep copy, and
//! construction performs no validation — kind/operator compatibility is the
//! compiler's job, so an ill-typed filter is rejected at compile time of the
//! predicate rather than silently dropped.
//!
//! # Examples
//!
//! ```rust
//! use aisle_query::{Filter, Value};
//!
//! let exact = Filter::equals("A");
//! let range = Filter::at_least(Value::decimal("10").unwrap());
//! let set = Filter::any_of(["FRESH", "BAKERY"]);
//! let null_check = Filter::specified(false);
//! assert_eq!(range.to_string(), ">= 10");
//! ```

use std::fmt;

use serde::Serialize;

use crate::value::Value;

/// The operator carried by a filter, named after its request-parameter
/// suffix (`price.greaterThanOrEqual=10`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    /// Exact match.
    Equals,
    /// Negated exact match.
    NotEquals,
    /// Set membership.
    In,
    /// Negated set membership.
    NotIn,
    /// Null check: `specified=true` means non-null.
    Specified,
    /// Case-sensitive literal substring presence.
    Contains,
    /// Case-sensitive literal substring absence.
    NotContains,
    /// Strict greater-than.
    GreaterThan,
    /// Non-strict greater-than.
    GreaterThanOrEqual,
    /// Strict less-than.
    LessThan,
    /// Non-strict less-than.
    LessThanOrEqual,
}

impl Operator {
    /// The request-parameter suffix for this operator.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::Specified => "specified",
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqual => "lessThanOrEqual",
        }
    }

    /// Parse a request-parameter suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "equals" => Self::Equals,
            "notEquals" => Self::NotEquals,
            "in" => Self::In,
            "notIn" => Self::NotIn,
            "specified" => Self::Specified,
            "contains" => Self::Contains,
            "notContains" => Self::NotContains,
            "greaterThan" => Self::GreaterThan,
            "greaterThanOrEqual" => Self::GreaterThanOrEqual,
            "lessThan" => Self::LessThan,
            "lessThanOrEqual" => Self::LessThanOrEqual,
            _ => return None,
        })
    }

    /// Whether this operator compares along the field's total order.
    pub const fn is_range(&self) -> bool {
        matches!(
            self,
            Self::GreaterThan | Self::GreaterThanOrEqual | Self::LessThan | Self::LessThanOrEqual
        )
    }

    /// Whether this operator performs substring matching.
    pub const fn is_substring(&self) -> bool {
        matches!(self, Self::Contains | Self::NotContains)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An atomic, typed predicate descriptor for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Filter {
    /// Exact match against the payload.
    Equals(Value),
    /// Negated exact match.
    NotEquals(Value),
    /// Membership in the payload set.
    In(Vec<Value>),
    /// Negated membership.
    NotIn(Vec<Value>),
    /// Null check: `Specified(true)` matches non-null fields,
    /// `Specified(false)` matches null fields.
    Specified(bool),
    /// Case-sensitive substring presence.
    Contains(String),
    /// Case-sensitive substring absence.
    NotContains(String),
    /// Strictly greater than the payload.
    GreaterThan(Value),
    /// Greater than or equal to the payload.
    GreaterThanOrEqual(Value),
    /// Strictly less than the payload.
    LessThan(Value),
    /// Less than or equal to the payload.
    LessThanOrEqual(Value),
}

impl Filter {
    /// Exact-match filter.
    pub fn equals(value: impl Into<Value>) -> Self {
        Self::Equals(value.into())
    }

    /// Negated exact-match filter.
    pub fn not_equals(value: impl Into<Value>) -> Self {
        Self::NotEquals(value.into())
    }

    /// Set-membership filter.
    pub fn any_of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::In(values.into_iter().map(Into::into).collect())
    }

    /// Negated set-membership filter.
    pub fn none_of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::NotIn(values.into_iter().map(Into::into).collect())
    }

    /// Null-check filter.
    pub fn specified(present: bool) -> Self {
        Self::Specified(present)
    }

    /// Substring-presence filter.
    pub fn contains(needle: impl Into<String>) -> Self {
        Self::Contains(needle.into())
    }

    /// Substring-absence filter.
    pub fn not_contains(needle: impl Into<String>) -> Self {
        Self::NotContains(needle.into())
    }

    /// Strict greater-than filter.
    pub fn greater_than(value: impl Into<Value>) -> Self {
        Self::GreaterThan(value.into())
    }

    /// Non-strict greater-than filter.
    pub fn at_least(value: impl Into<Value>) -> Self {
        Self::GreaterThanOrEqual(value.into())
    }

    /// Strict less-than filter.
    pub fn less_than(value: impl Into<Value>) -> Self {
        Self::LessThan(value.into())
    }

    /// Non-strict less-than filter.
    pub fn at_most(value: impl Into<Value>) -> Self {
        Self::LessThanOrEqual(value.into())
    }

    /// The operator of this filter.
    pub const fn operator(&self) -> Operator {
        match self {
            Self::Equals(_) => Operator::Equals,
            Self::NotEquals(_) => Operator::NotEquals,
            Self::In(_) => Operator::In,
            Self::NotIn(_) => Operator::NotIn,
            Self::Specified(_) => Operator::Specified,
            Self::Contains(_) => Operator::Contains,
            Self::NotContains(_) => Operator::NotContains,
            Self::GreaterThan(_) => Operator::GreaterThan,
            Self::GreaterThanOrEqual(_) => Operator::GreaterThanOrEqual,
            Self::LessThan(_) => Operator::LessThan,
            Self::LessThanOrEqual(_) => Operator::LessThanOrEqual,
        }
    }
}

impl fmt::Display for Filter {
    /// SQL-flavoured condition fragment, without the field name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals(v) => write!(f, "= {}", v),
            Self::NotEquals(v) => write!(f, "!= {}", v),
            Self::In(vs) => {
                f.write_str("IN (")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str(")")
            }
            Self::NotIn(vs) => {
                f.write_str("NOT IN (")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str(")")
            }
            Self::Specified(true) => f.write_str("IS NOT NULL"),
            Self::Specified(false) => f.write_str("IS NULL"),
            Self::Contains(s) => write!(f, "LIKE '%{}%'", s),
            Self::NotContains(s) => write!(f, "NOT LIKE '%{}%'", s),
            Self::GreaterThan(v) => write!(f, "> {}", v),
            Self::GreaterThanOrEqual(v) => write!(f, ">= {}", v),
            Self::LessThan(v) => write!(f, "< {}", v),
            Self::LessThanOrEqual(v) => write!(f, "<= {}", v),
        }
    }
}
