use serde::{Deserialize, Serialize};

use super::{
    identity::Identity,
    validation::{validate, Constraint, FieldCheck, ValidationError},
};

const TEXT: &[Constraint] = &[Constraint::Required];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub order: i64,
    pub is_active: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewFaq {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub order: Option<i64>,
    pub is_active: Option<bool>,
}

impl NewFaq {
    /// FAQ entries carry no creation timestamp; only the id is taken from `identity`.
    pub fn into_record(self, identity: Identity) -> Result<Faq, ValidationError> {
        validate(&[
            FieldCheck::text("question", self.question.as_deref(), TEXT),
            FieldCheck::text("answer", self.answer.as_deref(), TEXT),
        ])?;

        Ok(Faq {
            id: identity.id,
            question: self.question.unwrap_or_default(),
            answer: self.answer.unwrap_or_default(),
            order: self.order.unwrap_or(0),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}
