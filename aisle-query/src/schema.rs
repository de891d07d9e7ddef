//! Entity schema descriptors.
//!
//! Each entity type declares a static field-descriptor table: one
//! [`FieldDef`] per filterable field, in declaration order, plus at most one
//! [`RelationDef`] for its optional reference to another entity. The one
//! generic compiler consumes these tables instead of every entity shipping
//! its own hand-written query service.
//!
//! Field identifiers are plain `Copy` enums declared next to each entity and
//! resolved against the table at compile time; there is no runtime
//! reflection anywhere in the query path.

use crate::value::{EntityId, FieldKind, Value};

/// Descriptor for one filterable field of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef<F> {
    /// The field identifier.
    pub field: F,
    /// The external field name, as it appears in request parameters and
    /// log output.
    pub name: &'static str,
    /// The declared kind.
    pub kind: FieldKind,
    /// Permitted names for symbol fields; empty for every other kind.
    pub symbols: &'static [&'static str],
}

impl<F> FieldDef<F> {
    /// Declare a field of any non-symbol kind.
    pub const fn new(field: F, name: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            name,
            kind,
            symbols: &[],
        }
    }

    /// Declare a symbol field with its closed set of permitted names.
    pub const fn symbol(field: F, name: &'static str, symbols: &'static [&'static str]) -> Self {
        Self {
            field,
            name,
            kind: FieldKind::Symbol,
            symbols,
        }
    }
}

/// Descriptor for an entity's single optional reference to another entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationDef {
    /// The external name of the join filter (e.g. `articleId`).
    pub name: &'static str,
    /// The entity name the relation points at.
    pub target: &'static str,
}

/// Static schema of an entity type: its name and field-descriptor table.
pub trait EntitySchema: Sized + 'static {
    /// Field identifier enum for this entity.
    type Field: Copy + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static;

    /// Entity name used in logs and error messages.
    const ENTITY: &'static str;

    /// The optional relation to another entity, filtered by related id
    /// through a left join.
    const RELATION: Option<RelationDef>;

    /// The field-descriptor table, in declaration order.
    fn fields() -> &'static [FieldDef<Self::Field>];

    /// Look up the descriptor for a field identifier.
    ///
    /// Every identifier produced by the entity's field enum has a row in
    /// the table; a missing row is a schema-declaration bug.
    fn field_def(field: Self::Field) -> &'static FieldDef<Self::Field> {
        Self::fields()
            .iter()
            .find(|def| def.field == field)
            .unwrap_or_else(|| panic!("{}: field {:?} missing from schema table", Self::ENTITY, field))
    }

    /// Look up a descriptor by external field name.
    fn field_by_name(name: &str) -> Option<&'static FieldDef<Self::Field>> {
        Self::fields().iter().find(|def| def.name == name)
    }
}

/// A stored entity: schema plus value access.
pub trait Entity: EntitySchema + Clone + Send + Sync {
    /// The assigned id, if the entity has been persisted.
    fn id(&self) -> Option<EntityId>;

    /// Assign the store-issued id.
    fn assign_id(&mut self, id: EntityId);

    /// The current value of a direct field, `None` when the field is null.
    fn value(&self, field: Self::Field) -> Option<Value>;

    /// The id of the related entity, `None` when unset or when the schema
    /// declares no relation. This is the left-join key seen by join filters.
    fn join_key(&self) -> Option<EntityId>;

    /// The free-text document mirrored into the search index: the entity's
    /// text and symbol field values, space-joined.
    fn search_document(&self) -> String {
        let mut doc = String::new();
        for def in Self::fields() {
            if !matches!(def.kind, FieldKind::Text | FieldKind::Symbol) {
                continue;
            }
            match self.value(def.field) {
                Some(Value::Text(s)) => {
                    if !doc.is_empty() {
                        doc.push(' ');
                    }
                    doc.push_str(&s);
                }
                Some(Value::Symbol(s)) => {
                    if !doc.is_empty() {
                        doc.push(' ');
                    }
                    doc.push_str(&s);
                }
                _ => {}
            }
        }
        doc
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A minimal fixture entity shared by the unit tests in this crate.

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ItemField {
        Id,
        Name,
        Grade,
        Price,
        AddedOn,
    }

    /// Test fixture: a warehouse item with an optional supplier relation.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Item {
        pub id: Option<EntityId>,
        pub name: String,
        pub grade: Option<&'static str>,
        pub price: Option<rust_decimal::Decimal>,
        pub added_on: Option<chrono::NaiveDate>,
        pub supplier_id: Option<EntityId>,
    }

    pub const GRADES: &[&str] = &["STANDARD", "PREMIUM"];

    static ITEM_FIELDS: [FieldDef<ItemField>; 5] = [
        FieldDef::new(ItemField::Id, "id", FieldKind::Id),
        FieldDef::new(ItemField::Name, "name", FieldKind::Text),
        FieldDef::symbol(ItemField::Grade, "grade", GRADES),
        FieldDef::new(ItemField::Price, "price", FieldKind::Decimal),
        FieldDef::new(ItemField::AddedOn, "addedOn", FieldKind::Date),
    ];

    impl Item {
        pub fn named(name: &str) -> Self {
            Self {
                id: None,
                name: name.to_string(),
                grade: None,
                price: None,
                added_on: None,
                supplier_id: None,
            }
        }
    }

    impl EntitySchema for Item {
        type Field = ItemField;

        const ENTITY: &'static str = "Item";

        const RELATION: Option<RelationDef> = Some(RelationDef {
            name: "supplierId",
            target: "Supplier",
        });

        fn fields() -> &'static [FieldDef<ItemField>] {
            &ITEM_FIELDS
        }
    }

    impl Entity for Item {
        fn id(&self) -> Option<EntityId> {
            self.id
        }

        fn assign_id(&mut self, id: EntityId) {
            self.id = Some(id);
        }

        fn value(&self, field: ItemField) -> Option<Value> {
            match field {
                ItemField::Id => self.id.map(Value::Id),
                ItemField::Name => Some(Value::Text(self.name.clone())),
                ItemField::Grade => self.grade.map(|g| Value::Symbol(g.into())),
                ItemField::Price => self.price.map(Value::Decimal),
                ItemField::AddedOn => self.added_on.map(Value::Date),
            }
        }

        fn join_key(&self) -> Option<EntityId> {
            self.supplier_id
        }
    }
}
