//! The offer entity: a time-bounded discount on an article.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use aisle_query::{Entity, EntityId, EntitySchema, FieldDef, FieldKind, RelationDef, Value};

/// Field identifiers of [`Offer`], resolved against [`Offer::fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferField {
    /// Assigned id.
    Id,
    /// Discount amount.
    Advantage,
    /// Offered package amount, free-form.
    Amount,
    /// First day the offer applies.
    StartDate,
    /// Last day the offer applies.
    EndDate,
}

static OFFER_FIELDS: [FieldDef<OfferField>; 5] = [
    FieldDef::new(OfferField::Id, "id", FieldKind::Id),
    FieldDef::new(OfferField::Advantage, "advantage", FieldKind::Decimal),
    FieldDef::new(OfferField::Amount, "amount", FieldKind::Text),
    FieldDef::new(OfferField::StartDate, "startDate", FieldKind::Date),
    FieldDef::new(OfferField::EndDate, "endDate", FieldKind::Date),
];

/// A discount offer, optionally tied to one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Store-assigned id; `None` until first save.
    pub id: Option<EntityId>,
    /// Discount amount.
    pub advantage: Decimal,
    /// Offered package amount.
    pub amount: String,
    /// First day the offer applies.
    pub start_date: Option<NaiveDate>,
    /// Last day the offer applies.
    pub end_date: Option<NaiveDate>,
    /// The discounted article, by id. Filterable through the `articleId`
    /// join filter.
    pub article_id: Option<EntityId>,
}

impl Offer {
    /// Create an unsaved offer from its required fields.
    pub fn new(advantage: Decimal, amount: impl Into<String>) -> Self {
        Self {
            id: None,
            advantage,
            amount: amount.into(),
            start_date: None,
            end_date: None,
            article_id: None,
        }
    }

    /// Set the first applicable day.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Set the last applicable day.
    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Tie the offer to an article.
    pub fn with_article(mut self, article_id: EntityId) -> Self {
        self.article_id = Some(article_id);
        self
    }
}

impl EntitySchema for Offer {
    type Field = OfferField;

    const ENTITY: &'static str = "Offer";

    const RELATION: Option<RelationDef> = Some(RelationDef {
        name: "articleId",
        target: "Article",
    });

    fn fields() -> &'static [FieldDef<OfferField>] {
        &OFFER_FIELDS
    }
}

impl Entity for Offer {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn value(&self, field: OfferField) -> Option<Value> {
        match field {
            OfferField::Id => self.id.map(Value::Id),
            OfferField::Advantage => Some(Value::Decimal(self.advantage)),
            OfferField::Amount => Some(Value::Text(self.amount.clone())),
            OfferField::StartDate => self.start_date.map(Value::Date),
            OfferField::EndDate => self.end_date.map(Value::Date),
        }
    }

    fn join_key(&self) -> Option<EntityId> {
        self.article_id
    }
}
