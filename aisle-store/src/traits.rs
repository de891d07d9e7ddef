//! Store seams: the primary entity store and the secondary search index.
//!
//! Both traits are async and object-safe; backends provide their own
//! concurrency control and per-row atomicity. Nothing in this crate adds
//! cross-store transactions — the mirror in
//! [`EntityService`](crate::EntityService) is deliberately best-effort.

use async_trait::async_trait;

use aisle_query::{Entity, EntityId, Page, PageRequest, Predicate, QueryResult};

/// Adapter over the authoritative relational store for one entity type.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Persist an entity. A missing id gets a fresh, never-reused one; an
    /// existing id is an idempotent upsert-by-id.
    async fn save(&self, entity: E) -> QueryResult<E>;

    /// Fetch one entity by id.
    async fn find_by_id(&self, id: EntityId) -> QueryResult<Option<E>>;

    /// Remove one entity by id. Returns whether a row existed.
    async fn delete_by_id(&self, id: EntityId) -> QueryResult<bool>;

    /// All entities matching the predicate, in store-defined (id) order.
    async fn find_all(&self, predicate: &Predicate<E>) -> QueryResult<Vec<E>>;

    /// One bounded slice of the matching entities plus total-count
    /// metadata. An out-of-range page index yields an empty page.
    async fn find_page(&self, predicate: &Predicate<E>, request: &PageRequest)
    -> QueryResult<Page<E>>;

    /// Number of entities matching the predicate.
    async fn count(&self, predicate: &Predicate<E>) -> QueryResult<u64>;
}

/// Adapter over the secondary text-search store for one entity type.
///
/// The index is authoritative for free-text queries only; writes flow
/// through it strictly after the primary store confirms its own write.
#[async_trait]
pub trait SearchIndex<E: Entity>: Send + Sync {
    /// Insert or replace the indexed document for an entity.
    async fn upsert(&self, entity: &E) -> QueryResult<()>;

    /// Drop the indexed document for an id. Absent ids are a no-op.
    async fn delete_by_id(&self, id: EntityId) -> QueryResult<()>;

    /// Answer a free-text query entirely from the index.
    async fn search(&self, query: &str) -> QueryResult<Vec<E>>;
}
