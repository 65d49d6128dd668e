use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{records::IdentityGenerator, storage::CollectionStore};

mod error;
mod handlers;
mod models;
mod request_log;

use handlers::{
    create_faq, create_testimonial, health, list_faq, list_quotes, list_testimonials,
    not_found, root, submit_contact_message, submit_quote_request,
};

#[derive(Clone)]
pub struct AppState<S: CollectionStore> {
    pub store: S,
    pub identity: Arc<dyn IdentityGenerator + Send + Sync>,
    pub storage_timeout: Duration,
}

pub fn router<S: CollectionStore + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route(
            "/api/quotes",
            get(list_quotes::<S>).post(submit_quote_request::<S>),
        )
        .route("/api/contact", post(submit_contact_message::<S>))
        .route(
            "/api/testimonials",
            get(list_testimonials::<S>).post(create_testimonial::<S>),
        )
        .route("/api/faq", get(list_faq::<S>).post(create_faq::<S>))
        .fallback(not_found)
        .layer(middleware::from_fn(request_log::log_requests))
        .with_state(state)
}

pub async fn serve<S: CollectionStore + Clone + Send + Sync + 'static>(
    addr: SocketAddr,
    state: AppState<S>,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 REST service on http://{}", addr);

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
