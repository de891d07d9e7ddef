//! In-memory full-text search index.
//!
//! [`MemorySearchIndex`] mirrors entity documents keyed by id. Documents
//! are the entity's text and symbol fields, tokenized on non-alphanumeric
//! boundaries and lowercased; a free-text query matches a document when
//! **any** of its terms matches (the default OR operator of a query-string
//! search). Results come back in id order.
//!
//! The index never consults the primary store: a stale or missing mirror
//! entry simply keeps its entity out of free-text results until the next
//! write repairs it.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use aisle_query::{Entity, EntityId, QueryError, QueryResult};

use crate::traits::SearchIndex;

struct Document<E> {
    entity: E,
    terms: HashSet<String>,
}

/// In-memory implementation of [`SearchIndex`].
pub struct MemorySearchIndex<E> {
    documents: Arc<RwLock<BTreeMap<EntityId, Document<E>>>>,
}

impl<E> Clone for MemorySearchIndex<E> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
        }
    }
}

impl<E> Default for MemorySearchIndex<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> MemorySearchIndex<E> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

/// Lowercased tokens split on non-alphanumeric boundaries.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

#[async_trait::async_trait]
impl<E: Entity> SearchIndex<E> for MemorySearchIndex<E> {
    async fn upsert(&self, entity: &E) -> QueryResult<()> {
        let id = entity.id().ok_or(QueryError::MissingId { entity: E::ENTITY })?;
        let terms = tokenize(&entity.search_document()).collect();
        self.documents.write().insert(
            id,
            Document {
                entity: entity.clone(),
                terms,
            },
        );
        Ok(())
    }

    async fn delete_by_id(&self, id: EntityId) -> QueryResult<()> {
        self.documents.write().remove(&id);
        Ok(())
    }

    async fn search(&self, query: &str) -> QueryResult<Vec<E>> {
        let terms: Vec<String> = tokenize(query).collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .documents
            .read()
            .values()
            .filter(|doc| terms.iter().any(|term| doc.terms.contains(term)))
            .map(|doc| doc.entity.clone())
            .collect())
    }
}
