use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, types::Type, types::Value as SqlValue, Connection};
use serde_json::Value;
use std::path::Path;

use super::{
    traits::{CollectionStore, CommitGate, Document, ListQuery, RowId, StoredDocument},
    Collection,
};

const DB_SCHEMA_VERSION: i64 = 1;

#[derive(Clone)]
pub struct SqliteStorage {
    pub path: String,
}

fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', "\\\""))
}

/// SQLite's `json_extract` yields 1/0 for JSON booleans, so filters bind them as integers.
fn sql_value(value: &Value) -> Option<SqlValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(SqlValue::Integer(i)),
            None => n.as_f64().map(SqlValue::Real),
        },
        Value::String(s) => Some(SqlValue::Text(s.clone())),
        other => Some(SqlValue::Text(other.to_string())),
    }
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn map_document_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredDocument> {
    let row_id: i64 = row.get(0)?;
    let raw: String = row.get(1)?;
    let value: Value = serde_json::from_str(&raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(err)))?;
    let document = match value {
        Value::Object(map) => map,
        other => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                1,
                Type::Text,
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("row {row_id} holds a non-object document: {other}"),
                )),
            ))
        }
    };
    Ok(StoredDocument {
        row_id: RowId(row_id),
        document,
    })
}

fn db_insert(conn: &Connection, collection: Collection, doc: &str) -> rusqlite::Result<RowId> {
    conn.execute(
        &format!("INSERT INTO {} (doc) VALUES (?1)", collection.name()),
        params![doc],
    )?;
    Ok(RowId(conn.last_insert_rowid()))
}

fn db_list(
    conn: &Connection,
    collection: Collection,
    query: &ListQuery,
) -> rusqlite::Result<Vec<StoredDocument>> {
    let mut bind: Vec<SqlValue> = Vec::new();
    let mut clauses = Vec::new();

    for (field, value) in &query.filter {
        bind.push(SqlValue::Text(json_path(field)));
        let path_idx = bind.len();
        match sql_value(value) {
            Some(v) => {
                bind.push(v);
                clauses.push(format!("json_extract(doc, ?{}) = ?{}", path_idx, bind.len()));
            }
            None => clauses.push(format!("json_extract(doc, ?{}) IS NULL", path_idx)),
        }
    }

    let mut sql = format!("SELECT row_id, doc FROM {}", collection.name());
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    match &query.sort_by {
        Some(field) => {
            bind.push(SqlValue::Text(json_path(field)));
            sql.push_str(&format!(" ORDER BY json_extract(doc, ?{}) ASC, row_id ASC", bind.len()));
        }
        None => sql.push_str(" ORDER BY row_id ASC"),
    }
    bind.push(SqlValue::Integer(to_sql_int(query.limit)));
    let limit_idx = bind.len();
    bind.push(SqlValue::Integer(to_sql_int(query.skip)));
    sql.push_str(&format!(" LIMIT ?{} OFFSET ?{}", limit_idx, bind.len()));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(bind.iter()), map_document_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_delete(conn: &Connection, collection: Collection, row_id: RowId) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        &format!("DELETE FROM {} WHERE row_id = ?1", collection.name()),
        params![row_id.0],
    )?;
    Ok(changed > 0)
}

fn db_count(conn: &Connection, collection: Collection) -> rusqlite::Result<u64> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", collection.name()),
        [],
        |row| row.get(0),
    )?;
    Ok(count.max(0) as u64)
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    /// Deletes the database together with its `-wal`/`-shm` sidecars, so a
    /// stale log from a crashed run is not replayed onto the fresh file.
    pub fn reset_all(&self) -> Result<()> {
        for path in [
            self.path.clone(),
            format!("{}-wal", self.path),
            format!("{}-shm", self.path),
        ] {
            if Path::new(&path).exists() {
                std::fs::remove_file(&path).with_context(|| format!("removing {path}"))?;
            }
        }
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    /// Folds the write-ahead log back into the main database file.
    pub fn close(&self) -> Result<()> {
        self.with_conn(|conn| conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(())))
            .context("checkpointing database")?;
        Ok(())
    }

    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        log::info!(
            "SQLite schema migration: {} -> {}",
            version,
            DB_SCHEMA_VERSION
        );

        if version == 0 {
            let mut ddl = String::new();
            for collection in Collection::ALL {
                let name = collection.name();
                ddl.push_str(&format!(
                    r#"
            CREATE TABLE {name} (
                row_id INTEGER PRIMARY KEY AUTOINCREMENT,
                doc TEXT NOT NULL CHECK (json_valid(doc))
            );
            CREATE INDEX {name}_id_idx ON {name}(json_extract(doc, '$.id'));
            "#
                ));
            }
            conn.execute_batch(&ddl)?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}

impl CollectionStore for SqliteStorage {
    fn insert_gated(
        &self,
        collection: Collection,
        document: &Document,
        gate: &CommitGate,
    ) -> Result<RowId> {
        let raw = serde_json::to_string(document).context("encoding document")?;
        let inserted = self
            .with_conn(|conn| {
                let tx = conn.unchecked_transaction()?;
                let row_id = db_insert(&tx, collection, &raw)?;
                if !gate.begin_commit() {
                    // dropping `tx` rolls the insert back
                    return Ok(None);
                }
                tx.commit()?;
                Ok(Some(row_id))
            })
            .with_context(|| format!("inserting into {collection}"))?;
        inserted.ok_or_else(|| {
            anyhow::anyhow!("insert into {collection} abandoned by its caller and rolled back")
        })
    }

    fn list(&self, collection: Collection, query: &ListQuery) -> Result<Vec<StoredDocument>> {
        let rows = self
            .with_conn(|conn| db_list(conn, collection, query))
            .with_context(|| format!("listing {collection}"))?;
        Ok(rows)
    }

    fn delete(&self, collection: Collection, row_id: RowId) -> Result<bool> {
        let removed = self
            .with_conn(|conn| db_delete(conn, collection, row_id))
            .with_context(|| format!("deleting row {row_id} from {collection}"))?;
        Ok(removed)
    }

    fn count(&self, collection: Collection) -> Result<u64> {
        let count = self
            .with_conn(|conn| db_count(conn, collection))
            .with_context(|| format!("counting {collection}"))?;
        Ok(count)
    }
}
