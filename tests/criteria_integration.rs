//! Integration tests for criteria compilation and execution.
//!
//! These exercise the full path — request parameters → criteria →
//! compiled predicate → in-memory store — including:
//! - conjunction semantics and field-order independence
//! - count/list agreement
//! - left-join null-key behavior
//! - paging over sorted results

use pretty_assertions::assert_eq;

use aisle::prelude::*;
use aisle::{ArticleField, OfferField};

fn article(description: &str, category: Option<ArticleCategory>, price: Option<&str>) -> Article {
    let mut article = Article::new(description, "Hofmann", "1x");
    article.category = category;
    article.price = price.map(|p| p.parse().unwrap());
    article
}

async fn seeded_articles() -> (MemoryStore<Article>, QueryService<Article, MemoryStore<Article>>) {
    let store = MemoryStore::new();
    for entity in [
        article("Whole milk 1L", Some(ArticleCategory::Milkproducts), Some("1.09")),
        article("Rye bread 750g", Some(ArticleCategory::Bakery), Some("2.19")),
        article("Apples Gala 1kg", Some(ArticleCategory::Fresh), Some("2.49")),
        article("Mystery crate", None, None),
    ] {
        store.save(entity).await.unwrap();
    }
    (store.clone(), QueryService::new(store))
}

#[tokio::test]
async fn find_all_returns_exactly_the_conjunction_matches() {
    let (_, queries) = seeded_articles().await;
    let criteria = decode::<Article>([
        ("description.contains", "1"),
        ("price.greaterThan", "2.00"),
    ])
    .unwrap();
    // "Whole milk 1L" matches the substring but not the price;
    // "Rye bread 750g" matches the price but not the substring.
    let found = queries.find_by_criteria(&criteria).await.unwrap();
    let names: Vec<_> = found.iter().map(|a| a.description.as_str()).collect();
    assert_eq!(names, ["Apples Gala 1kg"]);
}

#[tokio::test]
async fn result_is_independent_of_filter_insertion_order() {
    let (_, queries) = seeded_articles().await;
    let forward = Criteria::<Article>::new()
        .with(ArticleField::Description, Filter::contains("1"))
        .with(ArticleField::Price, Filter::greater_than(Value::decimal("2.00").unwrap()));
    let backward = Criteria::<Article>::new()
        .with(ArticleField::Price, Filter::greater_than(Value::decimal("2.00").unwrap()))
        .with(ArticleField::Description, Filter::contains("1"));

    let a = queries.find_by_criteria(&forward).await.unwrap();
    let b = queries.find_by_criteria(&backward).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn count_equals_find_all_length() {
    let (_, queries) = seeded_articles().await;
    for params in [
        vec![],
        vec![("category.equals", "FRESH")],
        vec![("price.specified", "false")],
        vec![("category.in", "FRESH,BAKERY"), ("price.lessThan", "2.30")],
    ] {
        let criteria = decode::<Article>(params).unwrap();
        let found = queries.find_by_criteria(&criteria).await.unwrap();
        let count = queries.count_by_criteria(&criteria).await.unwrap();
        assert_eq!(count, found.len() as u64, "criteria {criteria}");
    }
}

#[tokio::test]
async fn empty_criteria_matches_every_entity() {
    let (store, queries) = seeded_articles().await;
    let all = queries
        .find_by_criteria(&Criteria::<Article>::new())
        .await
        .unwrap();
    assert_eq!(all.len(), store.len());
}

#[tokio::test]
async fn scenario_equals_includes_and_excludes() {
    // Entity {id:1, amount:"A"}: amount.equals=A includes, =B excludes.
    let store = MemoryStore::new();
    store.save(Article::new("x", "y", "A")).await.unwrap();

    let queries = QueryService::new(store);
    let matching = decode::<Article>([("amount.equals", "A")]).unwrap();
    let other = decode::<Article>([("amount.equals", "B")]).unwrap();
    assert_eq!(queries.count_by_criteria(&matching).await.unwrap(), 1);
    assert_eq!(queries.count_by_criteria(&other).await.unwrap(), 0);
}

#[tokio::test]
async fn scenario_greater_than_on_price() {
    // Prices {1, 2}: price.greaterThan=1 returns only the price-2 entity.
    let store = MemoryStore::new();
    store.save(article("a", None, Some("1"))).await.unwrap();
    store.save(article("b", None, Some("2"))).await.unwrap();
    let queries = QueryService::new(store);

    let criteria = decode::<Article>([("price.greaterThan", "1")]).unwrap();
    let found = queries.find_by_criteria(&criteria).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].description, "b");
    assert_eq!(queries.count_by_criteria(&criteria).await.unwrap(), 1);
}

#[tokio::test]
async fn scenario_update_moves_entity_between_category_filters() {
    let store = MemoryStore::new();
    let saved = store
        .save(article("Baguette", Some(ArticleCategory::Fresh), None))
        .await
        .unwrap();
    let queries = QueryService::new(store.clone());

    let fresh = decode::<Article>([("category.equals", "FRESH")]).unwrap();
    let bakery = decode::<Article>([("category.equals", "BAKERY")]).unwrap();
    assert_eq!(queries.count_by_criteria(&fresh).await.unwrap(), 1);

    let mut changed = saved;
    changed.category = Some(ArticleCategory::Bakery);
    store.save(changed).await.unwrap();

    assert_eq!(queries.count_by_criteria(&fresh).await.unwrap(), 0);
    assert_eq!(queries.count_by_criteria(&bakery).await.unwrap(), 1);
}

#[tokio::test]
async fn scenario_paging_concatenation_equals_find_all() {
    let (_, queries) = seeded_articles().await;
    let criteria = decode::<Article>([("price.specified", "true")]).unwrap();

    let sorted = Sort::by("price");
    let mut concatenated = Vec::new();
    for page_index in 0..3 {
        let page = queries
            .find_page_by_criteria(
                &criteria,
                &PageRequest::of(page_index, 1).sorted_by(sorted.clone()),
            )
            .await
            .unwrap();
        assert_eq!(page.total(), 3);
        assert_eq!(page.len(), 1);
        concatenated.extend(page.into_items());
    }

    let mut all = queries.find_by_criteria(&criteria).await.unwrap();
    all.sort_by_key(|a| a.price);
    assert_eq!(concatenated, all);

    // One page past the end: empty, not an error.
    let past_end = queries
        .find_page_by_criteria(&criteria, &PageRequest::of(3, 1))
        .await
        .unwrap();
    assert!(past_end.is_empty());
    assert_eq!(past_end.total(), 3);
}

#[tokio::test]
async fn join_filter_specified_false_matches_only_unrelated_offers() {
    let store = MemoryStore::new();
    let tied = Offer::new("0.50".parse().unwrap(), "1x").with_article(EntityId::new(1));
    let loose = Offer::new("0.80".parse().unwrap(), "1x");
    store.save(tied).await.unwrap();
    let loose = store.save(loose).await.unwrap();
    let queries = QueryService::new(store);

    let unrelated = decode::<Offer>([("articleId.specified", "false")]).unwrap();
    let found = queries.find_by_criteria(&unrelated).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, loose.id);

    // Equals never matches an offer without a related article, whatever x.
    for x in ["1", "2", "999"] {
        let criteria = decode::<Offer>([("articleId.equals", x)]).unwrap();
        let found = queries.find_by_criteria(&criteria).await.unwrap();
        assert!(found.iter().all(|offer| offer.article_id.is_some()));
    }
}

#[tokio::test]
async fn join_filter_negations_skip_offers_without_article() {
    let store = MemoryStore::new();
    store
        .save(Offer::new("0.50".parse().unwrap(), "1x").with_article(EntityId::new(1)))
        .await
        .unwrap();
    store.save(Offer::new("0.80".parse().unwrap(), "1x")).await.unwrap();
    let queries = QueryService::new(store);

    // A null join key fails NotEquals and NotIn, like a SQL left join.
    let not_equals = decode::<Offer>([("articleId.notEquals", "2")]).unwrap();
    let found = queries.find_by_criteria(&not_equals).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].article_id, Some(EntityId::new(1)));

    let not_in = decode::<Offer>([("articleId.notIn", "2,3")]).unwrap();
    let found = queries.find_by_criteria(&not_in).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].article_id, Some(EntityId::new(1)));
}

#[tokio::test]
async fn offer_date_window_query() {
    let store = MemoryStore::new();
    let in_june = Offer::new("0.40".parse().unwrap(), "1x")
        .with_start_date("2021-06-01".parse().unwrap())
        .with_end_date("2021-06-07".parse().unwrap());
    let in_may = Offer::new("0.40".parse().unwrap(), "1x")
        .with_start_date("2021-05-01".parse().unwrap())
        .with_end_date("2021-05-07".parse().unwrap());
    store.save(in_june).await.unwrap();
    store.save(in_may).await.unwrap();
    let queries = QueryService::new(store);

    let criteria = decode::<Offer>([
        ("startDate.greaterThanOrEqual", "2021-06-01"),
        ("endDate.lessThanOrEqual", "2021-06-30"),
    ])
    .unwrap();
    assert_eq!(queries.count_by_criteria(&criteria).await.unwrap(), 1);
}

#[tokio::test]
async fn criteria_copy_leaves_original_untouched() {
    let original = Criteria::<Offer>::new()
        .with(OfferField::Amount, Filter::equals("500g"))
        .with_join(Filter::equals(EntityId::new(5)));
    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.set(OfferField::Amount, Filter::equals("250g"));
    copy.set_join(Filter::specified(false));
    assert_ne!(copy, original);
    assert_eq!(original.get(OfferField::Amount), Some(&Filter::equals("500g")));
    assert_eq!(original.join(), Some(&Filter::equals(EntityId::new(5))));
}

#[tokio::test]
async fn validation_error_surfaces_before_any_store_io() {
    let queries: QueryService<Article, MemoryStore<Article>> =
        QueryService::new(MemoryStore::new());
    let criteria = Criteria::<Article>::new()
        .with(ArticleField::Category, Filter::greater_than(Value::Symbol("FRESH".into())));
    let err = queries.find_by_criteria(&criteria).await.unwrap_err();
    assert!(err.is_validation());
    assert!(!err.is_retryable());
}

#[test]
fn decoded_criteria_render_deterministically() {
    let criteria = decode::<Article>([
        ("price.greaterThanOrEqual", "10"),
        ("description.contains", "milk"),
        ("category.in", "FRESH,BAKERY"),
        ("id.specified", "true"),
    ])
    .unwrap();
    assert_eq!(
        criteria.to_string(),
        "ArticleCriteria { id IS NOT NULL, description LIKE '%milk%', \
         category IN (FRESH, BAKERY), price >= 10 }"
    );
}
