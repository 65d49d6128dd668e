mod collection;
mod record;
pub mod sqlite;
#[cfg(test)]
pub mod testing;
pub mod traits;

pub use collection::Collection;
pub use record::{insert_record, list_records, Record};
pub use sqlite::SqliteStorage;
pub use traits::{CollectionStore, CommitGate, Document, ListQuery, RowId, StoredDocument};
