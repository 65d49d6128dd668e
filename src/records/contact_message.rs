use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    identity::Identity,
    validation::{validate, Constraint, FieldCheck, ValidationError},
};

const NAME: &[Constraint] = &[Constraint::Required, Constraint::Length { min: 2, max: 100 }];
const EMAIL: &[Constraint] = &[Constraint::Required, Constraint::Email];
const MESSAGE: &[Constraint] = &[Constraint::Required, Constraint::Length { min: 10, max: 1000 }];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewContactMessage {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl NewContactMessage {
    pub fn into_record(self, identity: Identity) -> Result<ContactMessage, ValidationError> {
        validate(&[
            FieldCheck::text("name", self.name.as_deref(), NAME),
            FieldCheck::text("email", self.email.as_deref(), EMAIL),
            FieldCheck::text("message", self.message.as_deref(), MESSAGE),
        ])?;

        Ok(ContactMessage {
            id: identity.id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
            created_at: identity.created_at,
        })
    }
}
