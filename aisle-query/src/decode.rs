//! Decoding criteria from flat request parameters.
//!
//! The transport layer hands over an untyped key/value list where each key
//! is a `field.operator` pair, e.g.
//! `price.greaterThanOrEqual=10&description.contains=milk&category.in=FRESH,BAKERY`.
//! [`decode`] resolves each key against the entity schema, parses the
//! literal per the field's declared kind, and assembles a [`Criteria`].
//!
//! Unknown field or operator names are rejected here, before anything
//! reaches the compiler; absent fields simply stay inactive; malformed
//! literals (a non-numeric value on a decimal field, an unknown symbol
//! name) surface as conversion errors.
//!
//! `in`/`notIn` accept comma-separated values and repeated parameters; for
//! every other operator a repeated parameter keeps the last value, matching
//! the usual form-binding behavior.

use crate::criteria::Criteria;
use crate::error::{QueryError, QueryResult};
use crate::filter::{Filter, Operator};
use crate::schema::{EntitySchema, FieldDef};
use crate::value::{EntityId, FieldKind, Value};

/// Decode a flat `field.operator=value` parameter list into a criteria.
///
/// # Examples
///
/// ```rust
/// # use aisle_query::{decode, EntitySchema, FieldDef, FieldKind, RelationDef};
/// # struct Offer;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)] enum OfferField { Amount }
/// # static FIELDS: [FieldDef<OfferField>; 1] =
/// #     [FieldDef::new(OfferField::Amount, "amount", FieldKind::Text)];
/// # impl EntitySchema for Offer {
/// #     type Field = OfferField;
/// #     const ENTITY: &'static str = "Offer";
/// #     const RELATION: Option<RelationDef> = None;
/// #     fn fields() -> &'static [FieldDef<OfferField>] { &FIELDS }
/// # }
/// let criteria = decode::<Offer>([("amount.contains", "500")]).unwrap();
/// assert_eq!(criteria.to_string(), "OfferCriteria { amount LIKE '%500%' }");
/// ```
pub fn decode<E: EntitySchema>(
    params: impl IntoIterator<Item = (impl AsRef<str>, impl AsRef<str>)>,
) -> QueryResult<Criteria<E>> {
    let mut criteria = Criteria::new();
    for (key, raw) in params {
        let (key, raw) = (key.as_ref(), raw.as_ref());
        let Some((field_name, suffix)) = key.split_once('.') else {
            return Err(QueryError::MalformedKey {
                key: key.to_string(),
            });
        };
        let operator = Operator::from_suffix(suffix)
            .ok_or_else(|| QueryError::unknown_operator(field_name, suffix))?;

        if let Some(def) = E::field_by_name(field_name) {
            let filter = build_filter(def.name, def.kind, def.symbols, operator, raw)?;
            let filter = match (criteria.get_mut(def.field), filter) {
                (Some(Filter::In(values)), Filter::In(more)) => {
                    values.extend(more);
                    continue;
                }
                (Some(Filter::NotIn(values)), Filter::NotIn(more)) => {
                    values.extend(more);
                    continue;
                }
                (_, filter) => filter,
            };
            criteria.set(def.field, filter);
        } else if E::RELATION.is_some_and(|relation| relation.name == field_name) {
            let filter = build_filter(field_name, FieldKind::Id, &[], operator, raw)?;
            let filter = match (criteria.join(), filter) {
                (Some(Filter::In(values)), Filter::In(more)) => {
                    let mut values = values.clone();
                    values.extend(more);
                    Filter::In(values)
                }
                (Some(Filter::NotIn(values)), Filter::NotIn(more)) => {
                    let mut values = values.clone();
                    values.extend(more);
                    Filter::NotIn(values)
                }
                (_, filter) => filter,
            };
            criteria.set_join(filter);
        } else {
            return Err(QueryError::unknown_field(E::ENTITY, field_name));
        }
    }
    Ok(criteria)
}

fn build_filter(
    field: &str,
    kind: FieldKind,
    symbols: &'static [&'static str],
    operator: Operator,
    raw: &str,
) -> QueryResult<Filter> {
    Ok(match operator {
        Operator::Specified => match raw {
            "true" => Filter::Specified(true),
            "false" => Filter::Specified(false),
            _ => {
                return Err(QueryError::malformed_value(
                    field,
                    raw,
                    "expected `true` or `false`",
                ));
            }
        },
        Operator::Contains => Filter::Contains(raw.to_string()),
        Operator::NotContains => Filter::NotContains(raw.to_string()),
        Operator::In => Filter::In(parse_list(field, kind, symbols, raw)?),
        Operator::NotIn => Filter::NotIn(parse_list(field, kind, symbols, raw)?),
        Operator::Equals => Filter::Equals(parse_value(field, kind, symbols, raw)?),
        Operator::NotEquals => Filter::NotEquals(parse_value(field, kind, symbols, raw)?),
        Operator::GreaterThan => Filter::GreaterThan(parse_value(field, kind, symbols, raw)?),
        Operator::GreaterThanOrEqual => {
            Filter::GreaterThanOrEqual(parse_value(field, kind, symbols, raw)?)
        }
        Operator::LessThan => Filter::LessThan(parse_value(field, kind, symbols, raw)?),
        Operator::LessThanOrEqual => {
            Filter::LessThanOrEqual(parse_value(field, kind, symbols, raw)?)
        }
    })
}

fn parse_list(
    field: &str,
    kind: FieldKind,
    symbols: &'static [&'static str],
    raw: &str,
) -> QueryResult<Vec<Value>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_value(field, kind, symbols, part))
        .collect()
}

fn parse_value(
    field: &str,
    kind: FieldKind,
    symbols: &'static [&'static str],
    raw: &str,
) -> QueryResult<Value> {
    match kind {
        FieldKind::Id => raw
            .parse::<i64>()
            .map(|id| Value::Id(EntityId::new(id)))
            .map_err(|e| QueryError::malformed_value(field, raw, e.to_string())),
        FieldKind::Int => raw
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| QueryError::malformed_value(field, raw, e.to_string())),
        FieldKind::Decimal => Value::decimal(raw)
            .map_err(|e| QueryError::malformed_value(field, raw, e.to_string())),
        FieldKind::Date => {
            Value::date(raw).map_err(|e| QueryError::malformed_value(field, raw, e.to_string()))
        }
        FieldKind::Text => Ok(Value::Text(raw.to_string())),
        FieldKind::Symbol => {
            if symbols.contains(&raw) {
                Ok(Value::Symbol(raw.into()))
            } else {
                Err(QueryError::malformed_value(
                    field,
                    raw,
                    "not a permitted symbol name",
                ))
            }
        }
    }
}
