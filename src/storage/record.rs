use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::{Collection, CollectionStore, CommitGate, ListQuery, RowId};
use crate::records::{ContactMessage, Faq, QuoteRequest, Testimonial};

/// A record type bound to the collection that holds it.
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

impl Record for QuoteRequest {
    const COLLECTION: Collection = Collection::Quotes;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for ContactMessage {
    const COLLECTION: Collection = Collection::ContactMessages;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Testimonial {
    const COLLECTION: Collection = Collection::Testimonials;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Faq {
    const COLLECTION: Collection = Collection::Faq;

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn insert_record<S, R>(store: &S, record: &R, gate: &CommitGate) -> Result<RowId>
where
    S: CollectionStore + ?Sized,
    R: Record,
{
    let document = match serde_json::to_value(record).context("encoding record")? {
        Value::Object(map) => map,
        other => anyhow::bail!(
            "record for {} encoded as non-object: {}",
            R::COLLECTION,
            other
        ),
    };
    store.insert_gated(R::COLLECTION, &document, gate)
}

pub fn list_records<S, R>(store: &S, query: &ListQuery) -> Result<Vec<R>>
where
    S: CollectionStore + ?Sized,
    R: Record,
{
    store
        .list(R::COLLECTION, query)?
        .into_iter()
        .map(|stored| {
            serde_json::from_value(Value::Object(stored.document)).with_context(|| {
                format!("decoding row {} of {}", stored.row_id, R::COLLECTION)
            })
        })
        .collect()
}
