//! Moves contact messages that were filed into the quote collection over to
//! the contact-message collection.
//!
//! A move is an insert into `contact_messages` followed by a delete from
//! `quotes`. The two calls are not atomic: if the delete fails the document
//! exists in both collections, the error names it, and nothing is rolled back.
//! Running again while the source is still present copies it a second time.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::storage::{Collection, CollectionStore, Document, ListQuery, StoredDocument};

const SCAN_BATCH: u64 = 100;
const QUOTE_ONLY_FIELDS: [&str; 3] = ["whatsapp", "product", "quantity"];
const CONTACT_FIELDS: [&str; 5] = ["id", "name", "email", "message", "created_at"];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReclassifyReport {
    pub scanned: usize,
    /// Record ids of the documents that matched, in scan order.
    pub candidates: Vec<String>,
    pub moved: usize,
}

/// A document carrying `message` but lacking any quote-only field.
pub fn is_misfiled_contact(document: &Document) -> bool {
    document.contains_key("message")
        && QUOTE_ONLY_FIELDS
            .iter()
            .any(|field| !document.contains_key(*field))
}

pub fn to_contact_document(document: &Document) -> Document {
    CONTACT_FIELDS
        .iter()
        .map(|field| {
            let value = document.get(*field).cloned().unwrap_or(Value::Null);
            (field.to_string(), value)
        })
        .collect()
}

/// Reads the whole quote collection before anything is moved, so deletes do
/// not shift later pages.
pub fn scan<S: CollectionStore + ?Sized>(store: &S) -> Result<(usize, Vec<StoredDocument>)> {
    let mut scanned = 0;
    let mut misfiled = Vec::new();
    let mut skip = 0;

    loop {
        let page = store
            .list(
                Collection::Quotes,
                &ListQuery::new().skip(skip).limit(SCAN_BATCH),
            )
            .context("scanning quote collection")?;
        let fetched = page.len();
        scanned += fetched;
        misfiled.extend(page.into_iter().filter(|d| is_misfiled_contact(&d.document)));

        if (fetched as u64) < SCAN_BATCH {
            break;
        }
        skip += SCAN_BATCH;
    }

    Ok((scanned, misfiled))
}

pub fn reclassify<S: CollectionStore + ?Sized>(
    store: &S,
    dry_run: bool,
) -> Result<ReclassifyReport> {
    let (scanned, misfiled) = scan(store)?;
    let mut report = ReclassifyReport {
        scanned,
        candidates: misfiled
            .iter()
            .map(|d| d.record_id().unwrap_or_default().to_string())
            .collect(),
        moved: 0,
    };

    for stored in misfiled {
        let id = stored.record_id().unwrap_or_default().to_string();
        let keys: Vec<&str> = stored.document.keys().map(String::as_str).collect();
        let name = stored
            .document
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>");
        log::warn!(
            "⚠️ Contact message {} from {} (row {}) found in {}; keys: {:?}",
            id,
            name,
            stored.row_id,
            Collection::Quotes,
            keys
        );
        if dry_run {
            continue;
        }

        store
            .insert(Collection::ContactMessages, &to_contact_document(&stored.document))
            .with_context(|| format!("copying {id} into {}", Collection::ContactMessages))?;

        match store.delete(Collection::Quotes, stored.row_id) {
            Ok(true) => {}
            Ok(false) => log::warn!(
                "Row {} of {} was already gone after copying {}",
                stored.row_id,
                Collection::Quotes,
                id
            ),
            Err(err) => {
                log::error!(
                    "Document {} copied to {} but not removed from {}; it now exists in both",
                    id,
                    Collection::ContactMessages,
                    Collection::Quotes
                );
                return Err(err.context(format!(
                    "document {id} copied to {} but still present in {} (row {})",
                    Collection::ContactMessages,
                    Collection::Quotes,
                    stored.row_id
                )));
            }
        }
        report.moved += 1;
        log::info!("✅ Moved {} to {}", id, Collection::ContactMessages);
    }

    Ok(report)
}
