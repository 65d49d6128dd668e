use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::records::FieldViolation;

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: String,
}

#[derive(Serialize)]
pub struct ValidationErrorResponse {
    pub message: &'static str,
    pub detail: Vec<FieldViolation>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Optional `skip`/`limit` query parameters of the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}
