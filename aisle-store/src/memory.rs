//! In-memory primary store.
//!
//! [`MemoryStore`] keeps rows in a `BTreeMap` keyed by id, so unsorted
//! scans come back in id order. Ids are issued from a monotonically
//! increasing sequence and never reused, even after deletes; saving an
//! entity that already carries an id is an idempotent upsert, and the
//! sequence is advanced past explicit ids so a later insert can never
//! collide.
//!
//! Handles are cheap to clone and share one underlying store.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use parking_lot::RwLock;

use aisle_query::{
    Entity, EntityId, FieldDef, Page, PageRequest, Predicate, QueryError, QueryResult, Sort,
    SortOrder, Value,
};

use crate::traits::EntityStore;

struct Inner<E> {
    rows: RwLock<BTreeMap<EntityId, E>>,
    sequence: AtomicI64,
}

/// In-memory implementation of [`EntityStore`].
pub struct MemoryStore<E> {
    inner: Arc<Inner<E>>,
}

impl<E> Clone for MemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> MemoryStore<E> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                rows: RwLock::new(BTreeMap::new()),
                sequence: AtomicI64::new(0),
            }),
        }
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.inner.rows.read().len()
    }

    /// Whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.inner.rows.read().is_empty()
    }
}

impl<E: Entity> MemoryStore<E> {
    fn next_id(&self) -> EntityId {
        EntityId::new(self.inner.sequence.fetch_add(1, AtomicOrdering::SeqCst) + 1)
    }

    fn scan(&self, predicate: &Predicate<E>) -> Vec<E> {
        self.inner
            .rows
            .read()
            .values()
            .filter(|entity| predicate.matches(entity))
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl<E: Entity> EntityStore<E> for MemoryStore<E> {
    async fn save(&self, mut entity: E) -> QueryResult<E> {
        let id = match entity.id() {
            Some(id) => {
                // Keep the sequence ahead of explicit ids so they are
                // never re-issued.
                self.inner
                    .sequence
                    .fetch_max(id.value(), AtomicOrdering::SeqCst);
                id
            }
            None => {
                let id = self.next_id();
                entity.assign_id(id);
                id
            }
        };
        self.inner.rows.write().insert(id, entity.clone());
        Ok(entity)
    }

    async fn find_by_id(&self, id: EntityId) -> QueryResult<Option<E>> {
        Ok(self.inner.rows.read().get(&id).cloned())
    }

    async fn delete_by_id(&self, id: EntityId) -> QueryResult<bool> {
        Ok(self.inner.rows.write().remove(&id).is_some())
    }

    async fn find_all(&self, predicate: &Predicate<E>) -> QueryResult<Vec<E>> {
        Ok(self.scan(predicate))
    }

    async fn find_page(
        &self,
        predicate: &Predicate<E>,
        request: &PageRequest,
    ) -> QueryResult<Page<E>> {
        let mut matched = self.scan(predicate);
        let total = matched.len() as u64;
        sort_entities(&mut matched, request.sort())?;
        let items = matched
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.size()).unwrap_or(usize::MAX))
            .collect();
        Ok(Page::new(items, request, total))
    }

    async fn count(&self, predicate: &Predicate<E>) -> QueryResult<u64> {
        Ok(self
            .inner
            .rows
            .read()
            .values()
            .filter(|entity| predicate.matches(entity))
            .count() as u64)
    }
}

/// Sort entities by the requested fields, nulls last ascending / first
/// descending, with the id as final tiebreak so paging is deterministic.
fn sort_entities<E: Entity>(entities: &mut [E], sort: &Sort) -> QueryResult<()> {
    let mut resolved: Vec<(&'static FieldDef<E::Field>, SortOrder)> =
        Vec::with_capacity(sort.fields().len());
    for field in sort.fields() {
        let def = E::field_by_name(&field.name)
            .ok_or_else(|| QueryError::unknown_field(E::ENTITY, field.name.as_str()))?;
        resolved.push((def, field.order));
    }
    entities.sort_by(|a, b| {
        for (def, order) in &resolved {
            let ordering = compare_values(a.value(def.field), b.value(def.field));
            let ordering = match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            if !ordering.is_eq() {
                return ordering;
            }
        }
        a.id().cmp(&b.id())
    });
    Ok(())
}

/// Null-aware value comparison: nulls sort as the greatest value, which
/// puts them last ascending and first descending.
fn compare_values(a: Option<Value>, b: Option<Value>) -> std::cmp::Ordering {
    match (a, b) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some(_), None) => std::cmp::Ordering::Less,
        (Some(a), Some(b)) => a.compare(&b).unwrap_or(std::cmp::Ordering::Equal),
    }
}
