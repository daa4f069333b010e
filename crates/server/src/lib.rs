use api_types::ErrorResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use thiserror::Error;

pub use server::{ServerOptions, router, run_with_listener, spawn_with_listener};

mod predictions;
mod server;

pub mod types {
    pub mod transaction {
        pub use api_types::transaction::{Amount, TransactionRecord};
    }

    pub mod prediction {
        pub use api_types::prediction::{PredictionRequest, PredictionResponse};
    }
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// The request body could not be read as a prediction request.
    #[error("{0}")]
    Malformed(String),
    /// Invalid server settings, detected while building the router.
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InsufficientData { .. } => StatusCode::BAD_REQUEST,
        EngineError::InvalidDate(_)
        | EngineError::InvalidAmount(_)
        | EngineError::Numerical(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), err.to_string()),
            ServerError::Malformed(err) => (StatusCode::INTERNAL_SERVER_ERROR, err),
            other @ (ServerError::Config(_) | ServerError::Io(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };

        if status.is_server_error() {
            tracing::error!("prediction failed: {error}");
        } else {
            tracing::warn!("prediction rejected: {error}");
        }

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_maps_to_400() {
        let res = ServerError::from(EngineError::InsufficientData {
            required: 2,
            actual: 1,
        })
        .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_date_maps_to_500() {
        let res = ServerError::from(EngineError::InvalidDate("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_amount_maps_to_500() {
        let res = ServerError::from(EngineError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn numerical_maps_to_500() {
        let res = ServerError::from(EngineError::Numerical("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn config_error_message() {
        let err = ServerError::Config("bad origin".to_string());
        assert_eq!(err.to_string(), "invalid configuration: bad origin");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn malformed_maps_to_500() {
        let res = ServerError::Malformed("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
