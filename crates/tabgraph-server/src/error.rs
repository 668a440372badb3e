//! Mapping of command and import failures onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tabgraph_core::GraphError;
use tabgraph_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Graph(GraphError::InvalidEndpoint { .. })
            | ApiError::Graph(GraphError::UnknownEdge(_))
            | ApiError::Graph(GraphError::UnknownRoot(_)) => StatusCode::NOT_FOUND,
            ApiError::Graph(GraphError::EmptyName) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Graph(GraphError::DuplicateId(_))
            | ApiError::Graph(GraphError::DuplicateEdge(_)) => StatusCode::CONFLICT,
            ApiError::Ingest(IngestError::ParseFailure(_)) => StatusCode::BAD_REQUEST,
            ApiError::Ingest(IngestError::Graph(_)) | ApiError::Ingest(IngestError::Io { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(GraphError::EmptyName).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(GraphError::DuplicateId("A".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(GraphError::UnknownRoot("A".into())).status(),
            StatusCode::NOT_FOUND
        );
    }
}
