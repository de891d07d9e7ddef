//! # aisle-query
//!
//! Typed filter algebra and criteria-to-predicate compilation for the aisle
//! entity backend.
//!
//! This crate provides the core query machinery, including:
//! - A per-field [`Filter`] algebra (equality, set membership, null checks,
//!   substring match, ordered ranges)
//! - [`Criteria`]: an ordered, copyable bag of optional filters per entity
//!   type, plus a left-join filter on the related entity's id
//! - The specification compiler: [`Predicate::compile`] validates every
//!   filter against the entity's field-descriptor table and produces an
//!   executable AND-conjunction
//! - Pagination and sorting types ([`PageRequest`], [`Page`], [`Sort`])
//! - A decoder for the flat `field.operator=value` request representation
//!
//! ## Filters and criteria
//!
//! ```rust
//! use aisle_query::{Criteria, Filter, Value};
//! # use aisle_query::{EntitySchema, FieldDef, FieldKind, RelationDef};
//! # struct Product;
//! # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! # enum ProductField { Name, Price }
//! # static FIELDS: [FieldDef<ProductField>; 2] = [
//! #     FieldDef::new(ProductField::Name, "name", FieldKind::Text),
//! #     FieldDef::new(ProductField::Price, "price", FieldKind::Decimal),
//! # ];
//! # impl EntitySchema for Product {
//! #     type Field = ProductField;
//! #     const ENTITY: &'static str = "Product";
//! #     const RELATION: Option<RelationDef> = None;
//! #     fn fields() -> &'static [FieldDef<ProductField>] { &FIELDS }
//! # }
//! let criteria = Criteria::<Product>::new()
//!     .with(ProductField::Name, Filter::contains("milk"))
//!     .with(ProductField::Price, Filter::at_most(Value::decimal("2.50").unwrap()));
//!
//! // Copies are equal but fully independent.
//! let copy = criteria.clone();
//! assert_eq!(copy, criteria);
//! ```
//!
//! ## Compilation
//!
//! Compilation is the single validation point: a substring filter on a
//! decimal field, a range filter on a symbol field, an empty `in` list, or
//! a payload of the wrong kind are all rejected with a validation error
//! before any store I/O happens.
//!
//! An empty criteria compiles to a match-all predicate; two compilations of
//! the same criteria select the same rows.

pub mod criteria;
pub mod decode;
pub mod error;
pub mod filter;
pub mod page;
pub mod predicate;
pub mod schema;
pub mod value;

pub use criteria::Criteria;
pub use decode::decode;
pub use error::{QueryError, QueryResult};
pub use filter::{Filter, Operator};
pub use page::{Page, PageRequest, Sort, SortField, SortOrder};
pub use predicate::Predicate;
pub use schema::{Entity, EntitySchema, FieldDef, RelationDef};
pub use value::{EntityId, FieldKind, Value};
