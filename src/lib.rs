//! # Aisle
//!
//! A criteria-driven entity backend: a typed per-field filter algebra, one
//! generic criteria-to-predicate compiler, paged query execution against a
//! primary store, and a best-effort write-through mirror into a text-search
//! index.
//!
//! ## Quick Start
//!
//! ```rust
//! use aisle::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), aisle::QueryError> {
//! let articles = EntityService::new(MemoryStore::new(), MemorySearchIndex::new());
//! let queries = QueryService::new(articles.store().clone());
//!
//! articles
//!     .save(
//!         Article::new("Whole milk", "Hofmann", "1L")
//!             .with_category(ArticleCategory::Milkproducts)
//!             .with_price("1.09".parse().unwrap()),
//!     )
//!     .await?;
//!
//! // Filters arrive as flat request parameters...
//! let criteria = decode::<Article>([
//!     ("description.contains", "milk"),
//!     ("price.lessThanOrEqual", "2.00"),
//! ])?;
//!
//! // ...and run as one compiled conjunction.
//! assert_eq!(queries.count_by_criteria(&criteria).await?, 1);
//!
//! // Free-text search is answered by the mirror alone.
//! assert_eq!(articles.search("milk").await?.len(), 1);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod logging;

/// Core query machinery: filters, criteria, the compiler, paging.
pub mod query {
    pub use aisle_query::*;
}

/// Store seams, in-memory backends, and the mirror services.
pub mod store {
    pub use aisle_store::*;
}

/// Domain entities: articles, offers, categories.
pub mod catalog {
    pub use aisle_catalog::*;
}

pub use aisle_catalog::{Article, ArticleCategory, ArticleField, Offer, OfferField};
pub use aisle_query::{
    Criteria, Entity, EntityId, EntitySchema, FieldDef, FieldKind, Filter, Operator, Page,
    PageRequest, Predicate, QueryError, QueryResult, RelationDef, Sort, SortField, SortOrder,
    Value, decode,
};
pub use aisle_store::{
    EntityService, EntityStore, MemorySearchIndex, MemoryStore, QueryService, SearchIndex,
    StoreConfig,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::catalog::{Article, ArticleCategory, ArticleField, Offer, OfferField};
    pub use crate::query::{
        Criteria, Entity, EntityId, Filter, Page, PageRequest, Predicate, QueryError, QueryResult,
        Sort, SortOrder, Value, decode,
    };
    pub use crate::store::{
        EntityService, EntityStore, MemorySearchIndex, MemoryStore, QueryService, SearchIndex,
        StoreConfig,
    };
}
