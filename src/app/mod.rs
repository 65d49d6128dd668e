mod wiring;

use crate::{cli, context, rest, storage};
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;
use tokio_util::sync::CancellationToken;

pub struct App {
    pub ctx: context::Context,
    pub storage: storage::SqliteStorage,
}

impl App {
    pub fn from_cli() -> Result<(Self, cli::Cli)> {
        let cli = crate::cli::parse();
        let ctx = context::Context::from_cli(&cli)?;

        crate::tracing::init(ctx.config.log_file.as_deref().map(Path::new));
        log::info!("🚀 Starting clique");
        log::info!(
            "📂 Database: {}",
            ctx.config.database_path.to_string_lossy()
        );
        log::info!("⏱️ Storage timeout: {:?}", ctx.config.storage_timeout);

        wiring::init_data_dir(&ctx).context("initializing data dir")?;
        let storage = wiring::init_storage(&ctx)?;

        Ok((Self { ctx, storage }, cli))
    }

    /// Flushes storage before the process exits.
    pub fn shutdown(self) -> Result<()> {
        self.storage.close().context("closing storage")?;
        log::info!("💾 Storage closed");
        Ok(())
    }
}

pub async fn run_server(app: App) -> Result<()> {
    log::info!("🌐 REST API: http://{}", app.ctx.config.api_listen);
    if let Some(path) = app.ctx.config.log_file.as_deref() {
        log::info!("📝 Log file: {}", path);
    }

    let shutdown = CancellationToken::new();

    let api_addr = app.ctx.config.api_listen;
    let state = wiring::build_state(&app.ctx, app.storage.clone());
    let rest_shutdown = shutdown.clone();

    let mut rest_handle =
        tokio::spawn(async move { rest::serve(api_addr, state, rest_shutdown).await });

    let early_exit = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
            None
        }
        result = &mut rest_handle => Some(result),
    };

    shutdown.cancel();
    let rest_result = match early_exit {
        Some(result) => result,
        None => rest_handle.await,
    };

    let mut fatal_error: Option<anyhow::Error> = None;
    match rest_result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            log::error!("REST server error: {:#}", e);
            fatal_error = Some(e);
        }
        Err(e) => {
            log::error!("REST task error: {}", e);
            fatal_error = Some(e.into());
        }
    }

    if let Err(e) = app.shutdown() {
        log::error!("Storage shutdown error: {:#}", e);
        fatal_error.get_or_insert(e);
    }

    if let Some(e) = fatal_error {
        return Err(e);
    }

    log::info!("✅ Shutdown complete");
    Ok(())
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    if let Some(cmd) = cli.cmd {
        // one-shot command mode
        let storage = app.storage.clone();
        tokio::task::spawn_blocking(move || cmd.run(&storage))
            .await
            .context("command task failed")??;
        return app.shutdown();
    }

    run_server(app).await
}
