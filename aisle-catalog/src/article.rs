//! The article entity: one product in the catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use aisle_query::{Entity, EntityId, EntitySchema, FieldDef, FieldKind, RelationDef, Value};

use crate::category::{ArticleCategory, CATEGORY_NAMES};

/// Field identifiers of [`Article`], resolved against [`Article::fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleField {
    /// Assigned id.
    Id,
    /// Product description.
    Description,
    /// Producer name.
    Producer,
    /// Package amount, free-form (`"500g"`, `"6x1L"`).
    Amount,
    /// Optional category.
    Category,
    /// Optional price.
    Price,
}

static ARTICLE_FIELDS: [FieldDef<ArticleField>; 6] = [
    FieldDef::new(ArticleField::Id, "id", FieldKind::Id),
    FieldDef::new(ArticleField::Description, "description", FieldKind::Text),
    FieldDef::new(ArticleField::Producer, "producer", FieldKind::Text),
    FieldDef::new(ArticleField::Amount, "amount", FieldKind::Text),
    FieldDef::symbol(ArticleField::Category, "category", CATEGORY_NAMES),
    FieldDef::new(ArticleField::Price, "price", FieldKind::Decimal),
];

/// A catalog article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Store-assigned id; `None` until first save.
    pub id: Option<EntityId>,
    /// Product description.
    pub description: String,
    /// Producer name.
    pub producer: String,
    /// Package amount.
    pub amount: String,
    /// Category, if classified.
    pub category: Option<ArticleCategory>,
    /// Price, if known.
    pub price: Option<Decimal>,
}

impl Article {
    /// Create an unsaved article from its required fields.
    pub fn new(
        description: impl Into<String>,
        producer: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            description: description.into(),
            producer: producer.into(),
            amount: amount.into(),
            category: None,
            price: None,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: ArticleCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the price.
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }
}

impl EntitySchema for Article {
    type Field = ArticleField;

    const ENTITY: &'static str = "Article";

    const RELATION: Option<RelationDef> = None;

    fn fields() -> &'static [FieldDef<ArticleField>] {
        &ARTICLE_FIELDS
    }
}

impl Entity for Article {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn value(&self, field: ArticleField) -> Option<Value> {
        match field {
            ArticleField::Id => self.id.map(Value::Id),
            ArticleField::Description => Some(Value::Text(self.description.clone())),
            ArticleField::Producer => Some(Value::Text(self.producer.clone())),
            ArticleField::Amount => Some(Value::Text(self.amount.clone())),
            ArticleField::Category => self
                .category
                .map(|c| Value::Symbol(SmolStr::new_static(c.as_str()))),
            ArticleField::Price => self.price.map(Value::Decimal),
        }
    }

    fn join_key(&self) -> Option<EntityId> {
        None
    }
}
