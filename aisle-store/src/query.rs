//! Criteria query execution.
//!
//! [`QueryService`] is the executor seam between a [`Criteria`] and the
//! primary store: it compiles the criteria (any validation failure
//! surfaces before a single store call) and runs the resulting predicate
//! as a list, page, or count query. Page sizes are clamped to the
//! configured maximum rather than rejected.

use std::marker::PhantomData;

use tracing::debug;

use aisle_query::{Criteria, Entity, Page, PageRequest, Predicate, QueryResult};

use crate::config::StoreConfig;
use crate::traits::EntityStore;

/// Executes criteria queries for one entity type against a primary store.
pub struct QueryService<E, S> {
    store: S,
    config: StoreConfig,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S> QueryService<E, S>
where
    E: Entity,
    S: EntityStore<E>,
{
    /// Wire a query service with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, StoreConfig::default())
    }

    /// Wire a query service with an explicit configuration.
    pub fn with_config(store: S, config: StoreConfig) -> Self {
        Self {
            store,
            config,
            _entity: PhantomData,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// A request for the given page at the configured default page size.
    pub fn default_page(&self, page: u64) -> PageRequest {
        PageRequest::of(page, self.config.default_page_size)
    }

    /// All entities matching the criteria.
    pub async fn find_by_criteria(&self, criteria: &Criteria<E>) -> QueryResult<Vec<E>> {
        debug!(%criteria, "find by criteria");
        let predicate = Predicate::compile(criteria)?;
        self.store.find_all(&predicate).await
    }

    /// One page of the entities matching the criteria, with total-count
    /// metadata. The page size is capped at the configured maximum.
    pub async fn find_page_by_criteria(
        &self,
        criteria: &Criteria<E>,
        request: &PageRequest,
    ) -> QueryResult<Page<E>> {
        debug!(%criteria, %request, "find page by criteria");
        let predicate = Predicate::compile(criteria)?;
        let request = request.clamped(self.config.max_page_size);
        self.store.find_page(&predicate, &request).await
    }

    /// Number of entities matching the criteria.
    pub async fn count_by_criteria(&self, criteria: &Criteria<E>) -> QueryResult<u64> {
        debug!(%criteria, "count by criteria");
        let predicate = Predicate::compile(criteria)?;
        self.store.count(&predicate).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use aisle_catalog::{Article, ArticleField};
    use aisle_query::{Filter, Value};

    use super::*;
    use crate::memory::MemoryStore;

    async fn seeded() -> QueryService<Article, MemoryStore<Article>> {
        let store = MemoryStore::new();
        for (desc, price) in [("milk", "1.09"), ("bread", "2.49"), ("butter", "3.19")] {
            let mut article = Article::new(desc, "Hofmann", "1x");
            article.price = Some(price.parse().unwrap());
            store.save(article).await.unwrap();
        }
        QueryService::new(store)
    }

    #[tokio::test]
    async fn test_find_and_count_agree() {
        let service = seeded().await;
        let criteria = Criteria::<Article>::new().with(
            ArticleField::Price,
            Filter::greater_than(Value::decimal("2").unwrap()),
        );
        let found = service.find_by_criteria(&criteria).await.unwrap();
        let count = service.count_by_criteria(&criteria).await.unwrap();
        assert_eq!(found.len() as u64, count);
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_empty_criteria_matches_everything() {
        let service = seeded().await;
        let all = service
            .find_by_criteria(&Criteria::<Article>::new())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_criteria_fails_before_store() {
        let service = seeded().await;
        let criteria =
            Criteria::<Article>::new().with(ArticleField::Price, Filter::contains("1"));
        let err = service.find_by_criteria(&criteria).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_default_page_uses_configured_size() {
        let config = StoreConfig::default().with_default_page_size(2);
        let service: QueryService<Article, MemoryStore<Article>> =
            QueryService::with_config(MemoryStore::new(), config);
        assert_eq!(service.default_page(3), PageRequest::of(3, 2));
    }

    #[tokio::test]
    async fn test_page_size_is_clamped() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .save(Article::new(format!("a{i}"), "Hofmann", "1x"))
                .await
                .unwrap();
        }
        let config = StoreConfig::default().with_max_page_size(2);
        let service = QueryService::with_config(store, config);
        let page = service
            .find_page_by_criteria(&Criteria::<Article>::new(), &PageRequest::of(0, 100))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.total(), 5);
    }
}
