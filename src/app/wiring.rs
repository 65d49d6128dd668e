use std::sync::Arc;

use crate::{context, records::RandomIdentity, rest, storage};
use anyhow::{Context, Result};

pub fn init_data_dir(ctx: &context::Context) -> Result<()> {
    if let Some(parent) = ctx
        .config
        .database_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn init_storage(ctx: &context::Context) -> Result<storage::SqliteStorage> {
    let sqlite = storage::SqliteStorage::new(&ctx.config.database_path);
    if ctx.config.reset {
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;
    Ok(sqlite)
}

pub fn build_state(
    ctx: &context::Context,
    storage: storage::SqliteStorage,
) -> rest::AppState<storage::SqliteStorage> {
    rest::AppState {
        store: storage,
        identity: Arc::new(RandomIdentity),
        storage_timeout: ctx.config.storage_timeout,
    }
}
