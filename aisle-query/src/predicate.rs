//! The specification compiler: criteria in, executable predicate out.
//!
//! [`Predicate::compile`] turns a [`Criteria`] into a conjunction of leaf
//! predicates — one per active filter, in field-declaration order — after
//! checking every filter against the field's declared kind. Compilation is
//! deterministic and performs no I/O; every rejection happens here, before
//! any store call, so a validation error never leaves partial state.
//!
//! # Operator/kind compatibility
//!
//! | kind                     | equality + set + specified | substring | ordered range |
//! |--------------------------|----------------------------|-----------|---------------|
//! | text                     | yes                        | yes       | no            |
//! | id / integer / decimal / date | yes                   | no        | yes           |
//! | symbol                   | yes                        | no        | no            |
//!
//! # Join filters
//!
//! A join filter applies to the id of the related entity, located by a left
//! outer join. An entity with no related entity has a null join key: it
//! satisfies only `Specified(false)` and fails every other operator —
//! including `NotEquals` and `NotIn`, matching SQL comparison semantics
//! where a null never compares equal or unequal to anything. Null direct
//! fields behave the same way.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use smallvec::SmallVec;

use crate::criteria::Criteria;
use crate::error::{QueryError, QueryResult};
use crate::filter::Filter;
use crate::schema::{Entity, FieldDef, RelationDef};
use crate::value::{FieldKind, Value};

/// One compiled column constraint.
#[derive(Debug, Clone, PartialEq)]
struct Leaf<F> {
    field: F,
    name: &'static str,
    filter: Filter,
}

/// One compiled constraint on the related entity's id.
#[derive(Debug, Clone, PartialEq)]
struct JoinLeaf {
    relation: RelationDef,
    filter: Filter,
}

/// A compiled, executable conjunction of leaf predicates.
///
/// An empty predicate matches every entity.
pub struct Predicate<E: Entity> {
    leaves: SmallVec<[Leaf<E::Field>; 4]>,
    join: Option<JoinLeaf>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Predicate<E> {
    /// Compile a criteria into a predicate, validating every active filter
    /// against the entity schema.
    pub fn compile(criteria: &Criteria<E>) -> QueryResult<Self> {
        let mut leaves = SmallVec::new();
        for def in E::fields() {
            if let Some(filter) = criteria.get(def.field) {
                check_compatible(def, filter)?;
                leaves.push(Leaf {
                    field: def.field,
                    name: def.name,
                    filter: filter.clone(),
                });
            }
        }
        let join = match criteria.join() {
            None => None,
            Some(filter) => {
                let relation = E::RELATION
                    .ok_or_else(|| QueryError::unknown_field(E::ENTITY, "join"))?;
                let join_def: FieldDef<()> = FieldDef::new((), relation.name, FieldKind::Id);
                check_compatible(&join_def, filter)?;
                Some(JoinLeaf {
                    relation,
                    filter: filter.clone(),
                })
            }
        };
        Ok(Self {
            leaves,
            join,
            _entity: PhantomData,
        })
    }

    /// The match-all predicate, equivalent to compiling an empty criteria.
    pub fn match_all() -> Self {
        Self {
            leaves: SmallVec::new(),
            join: None,
            _entity: PhantomData,
        }
    }

    /// Whether this predicate matches every entity.
    pub fn is_match_all(&self) -> bool {
        self.leaves.is_empty() && self.join.is_none()
    }

    /// Evaluate the conjunction against one entity.
    pub fn matches(&self, entity: &E) -> bool {
        self.leaves
            .iter()
            .all(|leaf| eval(entity.value(leaf.field).as_ref(), &leaf.filter))
            && self
                .join
                .as_ref()
                .is_none_or(|join| eval(entity.join_key().map(Value::Id).as_ref(), &join.filter))
    }
}

impl<E: Entity> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        Self {
            leaves: self.leaves.clone(),
            join: self.join.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate<{}>({})", E::ENTITY, self)
    }
}

impl<E: Entity> fmt::Display for Predicate<E> {
    /// SQL-flavoured rendering for logging; `TRUE` for match-all.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_match_all() {
            return f.write_str("TRUE");
        }
        let mut first = true;
        for leaf in &self.leaves {
            if !first {
                f.write_str(" AND ")?;
            }
            write!(f, "{} {}", leaf.name, leaf.filter)?;
            first = false;
        }
        if let Some(join) = &self.join {
            if !first {
                f.write_str(" AND ")?;
            }
            write!(f, "{} {}", join.relation.name, join.filter)?;
        }
        Ok(())
    }
}

/// Reject a filter whose operator or payload does not fit the field's
/// declared kind.
fn check_compatible<F>(def: &FieldDef<F>, filter: &Filter) -> QueryResult<()> {
    let operator = filter.operator();
    if operator.is_substring() && !def.kind.is_text() {
        return Err(QueryError::UnsupportedOperator {
            field: def.name,
            kind: def.kind,
            operator,
        });
    }
    if operator.is_range() && !def.kind.is_ordered() {
        return Err(QueryError::UnsupportedOperator {
            field: def.name,
            kind: def.kind,
            operator,
        });
    }
    match filter {
        Filter::Equals(v)
        | Filter::NotEquals(v)
        | Filter::GreaterThan(v)
        | Filter::GreaterThanOrEqual(v)
        | Filter::LessThan(v)
        | Filter::LessThanOrEqual(v) => check_kind(def, v),
        Filter::In(vs) | Filter::NotIn(vs) => {
            if vs.is_empty() {
                return Err(QueryError::EmptyValueList { field: def.name });
            }
            vs.iter().try_for_each(|v| check_kind(def, v))
        }
        Filter::Specified(_) | Filter::Contains(_) | Filter::NotContains(_) => Ok(()),
    }
}

fn check_kind<F>(def: &FieldDef<F>, value: &Value) -> QueryResult<()> {
    if value.kind() == def.kind {
        Ok(())
    } else {
        Err(QueryError::KindMismatch {
            field: def.name,
            expected: def.kind,
            actual: value.kind(),
        })
    }
}

/// Evaluate one filter against one (possibly null) stored value.
///
/// A null value satisfies only `Specified(false)`.
fn eval(value: Option<&Value>, filter: &Filter) -> bool {
    match filter {
        Filter::Specified(present) => *present == value.is_some(),
        _ => {
            let Some(value) = value else {
                return false;
            };
            match filter {
                Filter::Equals(x) => value == x,
                Filter::NotEquals(x) => value != x,
                Filter::In(xs) => xs.contains(value),
                Filter::NotIn(xs) => !xs.contains(value),
                Filter::Contains(needle) => {
                    value.as_text().is_some_and(|text| text.contains(needle))
                }
                Filter::NotContains(needle) => {
                    value.as_text().is_some_and(|text| !text.contains(needle))
                }
                Filter::GreaterThan(x) => value.compare(x) == Some(Ordering::Greater),
                Filter::GreaterThanOrEqual(x) => {
                    matches!(value.compare(x), Some(Ordering::Greater | Ordering::Equal))
                }
                Filter::LessThan(x) => value.compare(x) == Some(Ordering::Less),
                Filter::LessThanOrEqual(x) => {
                    matches!(value.compare(x), Some(Ordering::Less | Ordering::Equal))
                }
                Filter::Specified(_) => unreachable!("handled above"),
            }
        }
    }
}
