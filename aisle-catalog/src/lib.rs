//! # aisle-catalog
//!
//! Domain entities of the aisle backend: catalog [`Article`]s and the
//! time-bounded [`Offer`]s discounting them.
//!
//! Each entity declares a static field-descriptor table consumed by the
//! generic criteria compiler in `aisle-query` — there is no per-entity
//! query code here, only schema.
//!
//! ```rust
//! use aisle_catalog::{Article, ArticleCategory, ArticleField};
//! use aisle_query::{Criteria, Filter, Predicate, Value};
//!
//! let criteria = Criteria::<Article>::new()
//!     .with(ArticleField::Description, Filter::contains("milk"))
//!     .with(ArticleField::Price, Filter::at_most(Value::decimal("1.50").unwrap()));
//! let predicate = Predicate::compile(&criteria).unwrap();
//!
//! let article = Article::new("Whole milk", "Hofmann", "1L")
//!     .with_category(ArticleCategory::Milkproducts)
//!     .with_price("1.09".parse().unwrap());
//! assert!(predicate.matches(&article));
//! ```

pub mod article;
pub mod category;
pub mod offer;

pub use article::{Article, ArticleField};
pub use category::{ArticleCategory, CATEGORY_NAMES, UnknownCategory};
pub use offer::{Offer, OfferField};
