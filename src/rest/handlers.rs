use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tokio::task::JoinError;

use crate::{
    records::{
        ContactMessage, Faq, NewContactMessage, NewFaq, NewQuoteRequest, NewTestimonial,
        QuoteRequest, Testimonial, ValidationError,
    },
    storage::{insert_record, list_records, CollectionStore, CommitGate, ListQuery, Record},
};

use super::{
    error::ApiError,
    models::{CreatedResponse, ErrorResponse, HealthResponse, MessageResponse, PageParams},
    AppState,
};

pub const QUOTES_PAGE_LIMIT: u64 = 50;
pub const CONTENT_PAGE_LIMIT: u64 = 100;

type Created = (StatusCode, Json<CreatedResponse>);

impl PageParams {
    /// Limits above `ceiling` are clamped to it.
    fn into_query(self, ceiling: u64) -> ListQuery {
        ListQuery::new()
            .skip(self.skip.unwrap_or(0))
            .limit(self.limit.unwrap_or(ceiling).min(ceiling))
    }
}

fn joined<T>(outcome: Result<anyhow::Result<T>, JoinError>) -> Result<T, ApiError> {
    match outcome {
        Ok(result) => result.map_err(ApiError::Storage),
        Err(join_err) => Err(ApiError::Storage(
            anyhow::Error::new(join_err).context("storage task failed"),
        )),
    }
}

/// Runs a store call on the blocking pool, bounded by the configured timeout.
///
/// On timeout the call's `CommitGate` is abandoned, so a write still in
/// flight rolls back instead of landing behind a 500. If the write already
/// claimed the gate it is about to commit, and its outcome is awaited instead.
async fn call_store<S, T, F>(state: &AppState<S>, f: F) -> Result<T, ApiError>
where
    S: CollectionStore + Clone + Send + Sync + 'static,
    T: Send + 'static,
    F: FnOnce(&S, &CommitGate) -> anyhow::Result<T> + Send + 'static,
{
    let store = state.store.clone();
    let timeout = state.storage_timeout;
    let gate = CommitGate::new();
    let task_gate = gate.clone();
    let mut task = tokio::task::spawn_blocking(move || f(&store, &task_gate));

    match tokio::time::timeout(timeout, &mut task).await {
        Ok(result) => joined(result),
        Err(_) if gate.abandon() => Err(ApiError::Storage(anyhow::anyhow!(
            "storage call timed out after {:?}",
            timeout
        ))),
        Err(_) => {
            log::warn!("Storage call passed {:?} while committing", timeout);
            joined(task.await)
        }
    }
}

async fn store_created<S, R>(
    state: &AppState<S>,
    record: Result<R, ValidationError>,
    message: &str,
) -> Result<Created, ApiError>
where
    S: CollectionStore + Clone + Send + Sync + 'static,
    R: Record + Send + 'static,
{
    let record = record.map_err(|err| {
        log::warn!(
            "Rejected {} submission on {:?}: {}",
            R::COLLECTION,
            err.fields(),
            err
        );
        err
    })?;
    let id = record.id().to_string();

    call_store(state, move |store, gate| insert_record(store, &record, gate)).await?;
    log::info!("📝 Stored {} in {}", id, R::COLLECTION);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: message.to_string(),
            id,
        }),
    ))
}

async fn fetch_page<S, R>(state: &AppState<S>, query: ListQuery) -> Result<Json<Vec<R>>, ApiError>
where
    S: CollectionStore + Clone + Send + Sync + 'static,
    R: Record + Send + 'static,
{
    let records = call_store(state, move |store, _| list_records::<S, R>(store, &query)).await?;
    Ok(Json(records))
}

pub async fn root() -> impl IntoResponse {
    Json(MessageResponse {
        message: "Clique Procurement API is running".to_string(),
    })
}

pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }),
    )
}

pub async fn submit_quote_request<S: CollectionStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<NewQuoteRequest>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(raw) = payload?;
    let record = raw.into_record(state.identity.next());
    store_created(&state, record, "Quote request submitted successfully").await
}

pub async fn list_quotes<S: CollectionStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<QuoteRequest>>, ApiError> {
    let Query(params) = params?;
    fetch_page(&state, params.into_query(QUOTES_PAGE_LIMIT)).await
}

pub async fn submit_contact_message<S: CollectionStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<NewContactMessage>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(raw) = payload?;
    let record: Result<ContactMessage, _> = raw.into_record(state.identity.next());
    store_created(&state, record, "Contact message sent successfully").await
}

pub async fn list_testimonials<S: CollectionStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let Query(params) = params?;
    let query = params
        .into_query(CONTENT_PAGE_LIMIT)
        .filter_eq("is_active", true);
    fetch_page(&state, query).await
}

pub async fn create_testimonial<S: CollectionStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<NewTestimonial>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(raw) = payload?;
    let record = raw.into_record(state.identity.next());
    store_created(&state, record, "Testimonial created successfully").await
}

pub async fn list_faq<S: CollectionStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<Faq>>, ApiError> {
    let Query(params) = params?;
    let query = params
        .into_query(CONTENT_PAGE_LIMIT)
        .filter_eq("is_active", true)
        .sort_by("order");
    fetch_page(&state, query).await
}

pub async fn create_faq<S: CollectionStore + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<NewFaq>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(raw) = payload?;
    let record = raw.into_record(state.identity.next());
    store_created(&state, record, "FAQ created successfully").await
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
        }),
    )
}
