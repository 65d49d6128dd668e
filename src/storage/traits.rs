use std::{
    fmt,
    sync::{
        atomic::{AtomicU8, Ordering},
        Arc,
    },
};

use serde_json::{Map, Value};

use super::Collection;

pub type Document = Map<String, Value>;

/// Storage-internal row identity; distinct from a record's `id` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub i64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoredDocument {
    pub row_id: RowId,
    pub document: Document,
}

impl StoredDocument {
    pub fn record_id(&self) -> Option<&str> {
        self.document.get("id").and_then(Value::as_str)
    }
}

/// Equality filter, optional ascending sort, then skip/limit.
#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery {
    pub filter: Vec<(String, Value)>,
    pub sort_by: Option<String>,
    pub skip: u64,
    pub limit: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: Vec::new(),
            sort_by: None,
            skip: 0,
            limit: u64::MAX,
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filter.push((field.to_string(), value.into()));
        self
    }

    pub fn sort_by(mut self, field: &str) -> Self {
        self.sort_by = Some(field.to_string());
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }
}

const GATE_OPEN: u8 = 0;
const GATE_COMMITTING: u8 = 1;
const GATE_ABANDONED: u8 = 2;

/// Decides, exactly once, whether a pending write commits or is abandoned by
/// its caller. Whichever side claims the gate first wins.
#[derive(Clone, Debug, Default)]
pub struct CommitGate(Arc<AtomicU8>);

impl CommitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the gate for the writer. False once the caller has given up.
    pub fn begin_commit(&self) -> bool {
        self.0
            .compare_exchange(
                GATE_OPEN,
                GATE_COMMITTING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Claims the gate for the caller. False if the commit already started.
    pub fn abandon(&self) -> bool {
        self.0
            .compare_exchange(
                GATE_OPEN,
                GATE_ABANDONED,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

pub trait CollectionStore {
    /// Inserts `document`, rolling back instead of committing when `gate`
    /// has been abandoned.
    fn insert_gated(
        &self,
        collection: Collection,
        document: &Document,
        gate: &CommitGate,
    ) -> anyhow::Result<RowId>;

    fn insert(&self, collection: Collection, document: &Document) -> anyhow::Result<RowId> {
        self.insert_gated(collection, document, &CommitGate::new())
    }

    fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> anyhow::Result<Vec<StoredDocument>>;
    /// Returns whether a row was removed.
    fn delete(&self, collection: Collection, row_id: RowId) -> anyhow::Result<bool>;
    fn count(&self, collection: Collection) -> anyhow::Result<u64>;
}
