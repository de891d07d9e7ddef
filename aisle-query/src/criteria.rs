//! Criteria: a named bag of optional per-field filters for one entity type.
//!
//! A [`Criteria`] maps field identifiers to [`Filter`]s — one slot per
//! declared field, where an absent slot is an inactive filter that
//! contributes no predicate — plus an optional join filter applying to the
//! id of the entity's related entity.
//!
//! Criteria are pure request-scoped values: cloning deep-copies every
//! contained filter, equality compares every field/filter pair including
//! the join filter, and `Display` renders a deterministic form (in
//! field-declaration order) for logging and diffing.
//!
//! # Examples
//!
//! ```rust
//! use aisle_query::{Criteria, Filter};
//! # use aisle_query::{EntitySchema, FieldDef, FieldKind, RelationDef};
//! # #[derive(Clone)] struct Offer;
//! # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)] enum OfferField { Amount }
//! # static FIELDS: [FieldDef<OfferField>; 1] =
//! #     [FieldDef::new(OfferField::Amount, "amount", FieldKind::Text)];
//! # impl EntitySchema for Offer {
//! #     type Field = OfferField;
//! #     const ENTITY: &'static str = "Offer";
//! #     const RELATION: Option<RelationDef> = None;
//! #     fn fields() -> &'static [FieldDef<OfferField>] { &FIELDS }
//! # }
//! let criteria = Criteria::<Offer>::new()
//!     .with(OfferField::Amount, Filter::equals("500g"));
//! assert!(!criteria.is_empty());
//! assert_eq!(criteria.to_string(), "OfferCriteria { amount = '500g' }");
//! ```

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::filter::Filter;
use crate::schema::EntitySchema;

/// An ordered bag of optional per-field filters plus an optional join
/// filter, for one entity type.
pub struct Criteria<E: EntitySchema> {
    filters: IndexMap<E::Field, Filter>,
    join: Option<Filter>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: EntitySchema> Criteria<E> {
    /// Create an empty criteria; it compiles to a match-all predicate.
    pub fn new() -> Self {
        Self {
            filters: IndexMap::new(),
            join: None,
            _entity: PhantomData,
        }
    }

    /// Set the filter for a direct field, replacing any previous one.
    pub fn set(&mut self, field: E::Field, filter: Filter) {
        self.filters.insert(field, filter);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: E::Field, filter: Filter) -> Self {
        self.set(field, filter);
        self
    }

    /// Set the join filter applying to the related entity's id.
    pub fn set_join(&mut self, filter: Filter) {
        self.join = Some(filter);
    }

    /// Builder-style [`set_join`](Self::set_join).
    pub fn with_join(mut self, filter: Filter) -> Self {
        self.set_join(filter);
        self
    }

    /// The active filter on a direct field, if any.
    pub fn get(&self, field: E::Field) -> Option<&Filter> {
        self.filters.get(&field)
    }

    /// Mutable access to the active filter on a direct field.
    pub fn get_mut(&mut self, field: E::Field) -> Option<&mut Filter> {
        self.filters.get_mut(&field)
    }

    /// Deactivate the filter on a direct field.
    pub fn clear(&mut self, field: E::Field) -> Option<Filter> {
        self.filters.shift_remove(&field)
    }

    /// The join filter, if active.
    pub fn join(&self) -> Option<&Filter> {
        self.join.as_ref()
    }

    /// Whether no filter is active at all.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.join.is_none()
    }

    /// Number of active filters, join filter included.
    pub fn active_len(&self) -> usize {
        self.filters.len() + usize::from(self.join.is_some())
    }
}

impl<E: EntitySchema> Default for Criteria<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntitySchema> Clone for Criteria<E> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            join: self.join.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: EntitySchema> PartialEq for Criteria<E> {
    fn eq(&self, other: &Self) -> bool {
        self.filters == other.filters && self.join == other.join
    }
}

impl<E: EntitySchema> fmt::Debug for Criteria<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<E: EntitySchema> fmt::Display for Criteria<E> {
    /// Deterministic rendering in field-declaration order, join filter last.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Criteria {{", E::ENTITY)?;
        let mut first = true;
        for def in E::fields() {
            if let Some(filter) = self.filters.get(&def.field) {
                if !first {
                    f.write_str(",")?;
                }
                write!(f, " {} {}", def.name, filter)?;
                first = false;
            }
        }
        if let (Some(filter), Some(relation)) = (&self.join, E::RELATION) {
            if !first {
                f.write_str(",")?;
            }
            write!(f, " {} {}", relation.name, filter)?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::schema::testing::{Item, ItemField};
    use crate::value::Value;

    #[test]
    fn test_absent_field_is_inactive() {
        let criteria = Criteria::<Item>::new().with(ItemField::Name, Filter::equals("milk"));
        assert!(criteria.get(ItemField::Price).is_none());
        assert_eq!(criteria.active_len(), 1);
    }

    #[test]
    fn test_copy_is_equal_but_independent() {
        let original = Criteria::<Item>::new()
            .with(ItemField::Name, Filter::contains("milk"))
            .with_join(Filter::equals(crate::EntityId::new(3)));
        let mut copy = original.clone();
        assert_eq!(original, copy);

        copy.set(ItemField::Name, Filter::contains("bread"));
        assert_ne!(original, copy);
        assert_eq!(original.get(ItemField::Name), Some(&Filter::contains("milk")));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = Criteria::<Item>::new()
            .with(ItemField::Name, Filter::equals("milk"))
            .with(ItemField::Price, Filter::at_least(Value::decimal("1").unwrap()));
        let b = Criteria::<Item>::new()
            .with(ItemField::Price, Filter::at_least(Value::decimal("1").unwrap()))
            .with(ItemField::Name, Filter::equals("milk"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_follows_declaration_order() {
        // Inserted out of declaration order on purpose.
        let criteria = Criteria::<Item>::new()
            .with(ItemField::Price, Filter::at_least(Value::decimal("10").unwrap()))
            .with(ItemField::Name, Filter::contains("milk"))
            .with_join(Filter::specified(true));
        assert_eq!(
            criteria.to_string(),
            "ItemCriteria { name LIKE '%milk%', price >= 10, supplierId IS NOT NULL }"
        );
    }

    #[test]
    fn test_empty_display() {
        assert_eq!(Criteria::<Item>::new().to_string(), "ItemCriteria { }");
    }

    #[test]
    fn test_clear_deactivates() {
        let mut criteria = Criteria::<Item>::new().with(ItemField::Name, Filter::equals("milk"));
        assert!(criteria.clear(ItemField::Name).is_some());
        assert!(criteria.is_empty());
    }
}
