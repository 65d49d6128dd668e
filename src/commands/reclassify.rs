use anyhow::Result;

use crate::{
    maintenance::reclassify,
    storage::{Collection, CollectionStore},
};

pub fn run<S: CollectionStore + ?Sized>(store: &S, dry_run: bool) -> Result<()> {
    log::info!(
        "🔍 Scanning {} ({} documents)",
        Collection::Quotes,
        store.count(Collection::Quotes)?
    );

    let report = reclassify(store, dry_run)?;

    if dry_run {
        log::info!(
            "Dry run: {} of {} documents would move to {}",
            report.candidates.len(),
            report.scanned,
            Collection::ContactMessages
        );
    } else {
        log::info!(
            "✅ Moved {} of {} documents to {}",
            report.moved,
            report.scanned,
            Collection::ContactMessages
        );
    }
    Ok(())
}
