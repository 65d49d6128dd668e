use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    identity::Identity,
    validation::{validate, Constraint, FieldCheck, ValidationError},
};

const TEXT: &[Constraint] = &[Constraint::Required];
const RATING: &[Constraint] = &[Constraint::Required, Constraint::Range { min: 1, max: 5 }];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub client_name: String,
    pub company: String,
    pub country: String,
    pub quote: String,
    pub rating: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewTestimonial {
    pub client_name: Option<String>,
    pub company: Option<String>,
    pub country: Option<String>,
    pub quote: Option<String>,
    pub rating: Option<i64>,
    pub is_active: Option<bool>,
}

impl NewTestimonial {
    pub fn into_record(self, identity: Identity) -> Result<Testimonial, ValidationError> {
        validate(&[
            FieldCheck::text("client_name", self.client_name.as_deref(), TEXT),
            FieldCheck::text("company", self.company.as_deref(), TEXT),
            FieldCheck::text("country", self.country.as_deref(), TEXT),
            FieldCheck::text("quote", self.quote.as_deref(), TEXT),
            FieldCheck::integer("rating", self.rating, RATING),
        ])?;

        Ok(Testimonial {
            id: identity.id,
            client_name: self.client_name.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            quote: self.quote.unwrap_or_default(),
            rating: self.rating.unwrap_or_default(),
            is_active: self.is_active.unwrap_or(true),
            created_at: identity.created_at,
        })
    }
}
