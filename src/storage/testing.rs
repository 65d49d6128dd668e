use anyhow::anyhow;

use super::{Collection, CollectionStore, CommitGate, Document, ListQuery, RowId, StoredDocument};

/// Fails every call, as a store whose backend is unreachable would.
#[derive(Clone, Default)]
pub struct UnreachableStore;

impl CollectionStore for UnreachableStore {
    fn insert_gated(
        &self,
        collection: Collection,
        _document: &Document,
        _gate: &CommitGate,
    ) -> anyhow::Result<RowId> {
        Err(anyhow!("connection refused while inserting into {collection}"))
    }

    fn list(
        &self,
        collection: Collection,
        _query: &ListQuery,
    ) -> anyhow::Result<Vec<StoredDocument>> {
        Err(anyhow!("connection refused while listing {collection}"))
    }

    fn delete(&self, collection: Collection, _row_id: RowId) -> anyhow::Result<bool> {
        Err(anyhow!("connection refused while deleting from {collection}"))
    }

    fn count(&self, collection: Collection) -> anyhow::Result<u64> {
        Err(anyhow!("connection refused while counting {collection}"))
    }
}

/// Delegates to `inner` but fails every delete, simulating a crash between
/// the two halves of a move.
#[derive(Clone)]
pub struct FailingDeletes<S> {
    pub inner: S,
}

impl<S: CollectionStore> CollectionStore for FailingDeletes<S> {
    fn insert_gated(
        &self,
        collection: Collection,
        document: &Document,
        gate: &CommitGate,
    ) -> anyhow::Result<RowId> {
        self.inner.insert_gated(collection, document, gate)
    }

    fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> anyhow::Result<Vec<StoredDocument>> {
        self.inner.list(collection, query)
    }

    fn delete(&self, collection: Collection, row_id: RowId) -> anyhow::Result<bool> {
        Err(anyhow!("simulated crash before deleting row {row_id} from {collection}"))
    }

    fn count(&self, collection: Collection) -> anyhow::Result<u64> {
        self.inner.count(collection)
    }
}

/// Sleeps before every call; used to exercise per-call timeouts.
#[derive(Clone)]
pub struct SlowStore<S> {
    pub inner: S,
    pub delay: std::time::Duration,
}

impl<S: CollectionStore> CollectionStore for SlowStore<S> {
    fn insert_gated(
        &self,
        collection: Collection,
        document: &Document,
        gate: &CommitGate,
    ) -> anyhow::Result<RowId> {
        std::thread::sleep(self.delay);
        self.inner.insert_gated(collection, document, gate)
    }

    fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> anyhow::Result<Vec<StoredDocument>> {
        std::thread::sleep(self.delay);
        self.inner.list(collection, query)
    }

    fn delete(&self, collection: Collection, row_id: RowId) -> anyhow::Result<bool> {
        std::thread::sleep(self.delay);
        self.inner.delete(collection, row_id)
    }

    fn count(&self, collection: Collection) -> anyhow::Result<u64> {
        std::thread::sleep(self.delay);
        self.inner.count(collection)
    }
}
