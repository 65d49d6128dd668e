use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    identity::Identity,
    validation::{validate, Constraint, FieldCheck, ValidationError},
};

pub const STATUS_PENDING: &str = "pending";

const NAME: &[Constraint] = &[Constraint::Required, Constraint::Length { min: 2, max: 100 }];
const EMAIL: &[Constraint] = &[Constraint::Required, Constraint::Email];
const WHATSAPP: &[Constraint] = &[Constraint::Required, Constraint::Length { min: 10, max: 20 }];
const PRODUCT: &[Constraint] = &[Constraint::Required, Constraint::Length { min: 5, max: 200 }];
const QUANTITY: &[Constraint] = &[Constraint::Required, Constraint::Length { min: 1, max: 100 }];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub product: String,
    pub quantity: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
}

/// Quote request fields as submitted by a visitor.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewQuoteRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub product: Option<String>,
    pub quantity: Option<String>,
}

impl NewQuoteRequest {
    pub fn into_record(self, identity: Identity) -> Result<QuoteRequest, ValidationError> {
        validate(&[
            FieldCheck::text("name", self.name.as_deref(), NAME),
            FieldCheck::text("email", self.email.as_deref(), EMAIL),
            FieldCheck::text("whatsapp", self.whatsapp.as_deref(), WHATSAPP),
            FieldCheck::text("product", self.product.as_deref(), PRODUCT),
            FieldCheck::text("quantity", self.quantity.as_deref(), QUANTITY),
        ])?;

        Ok(QuoteRequest {
            id: identity.id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            whatsapp: self.whatsapp.unwrap_or_default(),
            product: self.product.unwrap_or_default(),
            quantity: self.quantity.unwrap_or_default(),
            created_at: identity.created_at,
            status: STATUS_PENDING.to_string(),
        })
    }
}
