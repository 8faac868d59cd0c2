// Error taxonomy for the catalog service. Every failure a handler can see is
// one of these variants; the ResponseError impl below is the only place where
// errors are translated to HTTP status codes.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Caller supplied an invalid argument (bad chunk size, malformed input).
    #[error("invalid input: {0}")]
    Validation(String),

    /// An id-based lookup found no matching record.
    #[error("game {0} not found")]
    NotFound(i64),

    /// Fetching or decoding one of the external feeds failed.
    #[error("upstream fetch failed for {url}: {source}")]
    UpstreamFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The storage backend rejected or failed an operation.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub request_id: String,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

impl actix_web::ResponseError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Storage failures on CRUD map to 400, matching the documented
            // surface (the storage layer also reports constraint violations
            // caused by bad client payloads through this path).
            CatalogError::Validation(_) | CatalogError::Storage(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::UpstreamFetch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = ErrorBody::new(self.to_string());
        tracing::warn!(
            status = %self.status_code(),
            request_id = %body.request_id,
            error = %self,
            "request failed"
        );
        HttpResponse::build(self.status_code()).json(body)
    }
}
