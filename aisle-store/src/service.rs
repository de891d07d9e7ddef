//! Entity lifecycle service with a write-through search mirror.
//!
//! Every create/update/delete commits to the primary store first and only
//! then touches the search index, so a write rejected by the primary is
//! never mirrored. The two steps are **not** atomic across stores: when the
//! index write fails after the primary succeeded, the primary remains
//! authoritative, the failure is logged as a consistency warning, and the
//! stale mirror entry heals on the next write touching that id. Free-text
//! reads go to the index alone.

use std::marker::PhantomData;

use tracing::{debug, warn};

use aisle_query::{Entity, EntityId, Predicate, QueryError, QueryResult};

use crate::traits::{EntityStore, SearchIndex};

/// Manages one entity type across the primary store and its search mirror.
pub struct EntityService<E, S, X> {
    store: S,
    index: X,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S, X> EntityService<E, S, X>
where
    E: Entity,
    S: EntityStore<E>,
    X: SearchIndex<E>,
{
    /// Wire a service over a primary store and a search index.
    pub fn new(store: S, index: X) -> Self {
        Self {
            store,
            index,
            _entity: PhantomData,
        }
    }

    /// The primary store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The search index.
    pub fn index(&self) -> &X {
        &self.index
    }

    /// Persist an entity, then mirror it into the search index.
    pub async fn save(&self, entity: E) -> QueryResult<E> {
        debug!(entity = E::ENTITY, "request to save entity");
        let saved = self.store.save(entity).await?;
        self.mirror_upsert(&saved).await;
        Ok(saved)
    }

    /// Replace an existing entity wholesale. The id must already exist in
    /// the primary store; there is no partial-field update.
    pub async fn update(&self, entity: E) -> QueryResult<E> {
        let id = entity
            .id()
            .ok_or(QueryError::MissingId { entity: E::ENTITY })?;
        debug!(entity = E::ENTITY, %id, "request to update entity");
        if self.store.find_by_id(id).await?.is_none() {
            return Err(QueryError::not_found(E::ENTITY, id));
        }
        let saved = self.store.save(entity).await?;
        self.mirror_upsert(&saved).await;
        Ok(saved)
    }

    /// Fetch one entity by id from the primary store.
    pub async fn find_one(&self, id: EntityId) -> QueryResult<Option<E>> {
        debug!(entity = E::ENTITY, %id, "request to get entity");
        self.store.find_by_id(id).await
    }

    /// All entities, in store order.
    pub async fn find_all(&self) -> QueryResult<Vec<E>> {
        debug!(entity = E::ENTITY, "request to get all entities");
        self.store.find_all(&Predicate::match_all()).await
    }

    /// Delete an entity by id from the primary store, then from the index.
    pub async fn delete(&self, id: EntityId) -> QueryResult<()> {
        debug!(entity = E::ENTITY, %id, "request to delete entity");
        if !self.store.delete_by_id(id).await? {
            return Err(QueryError::not_found(E::ENTITY, id));
        }
        if let Err(error) = self.index.delete_by_id(id).await {
            warn!(
                entity = E::ENTITY,
                %id,
                %error,
                "search index delete failed; stale entry remains until the next write",
            );
        }
        Ok(())
    }

    /// Answer a free-text query from the search index only.
    pub async fn search(&self, query: &str) -> QueryResult<Vec<E>> {
        debug!(entity = E::ENTITY, query, "request to search entities");
        self.index.search(query).await
    }

    async fn mirror_upsert(&self, saved: &E) {
        if let Err(error) = self.index.upsert(saved).await {
            warn!(
                entity = E::ENTITY,
                id = ?saved.id(),
                %error,
                "search index upsert failed; mirror entry is stale until the next write",
            );
        }
    }
}
