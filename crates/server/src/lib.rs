use api_types::dashboard::ErrorBody;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::{EngineError, MonthKey, StoreError};

pub use server::{ServerState, router, run_with_listener};

mod budgets;
mod categories;
mod dashboard;
mod goals;
mod server;
mod statistics;
mod transactions;

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Rejected(_) => StatusCode::BAD_GATEWAY,
        EngineError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        EngineError::Store(_) => StatusCode::BAD_GATEWAY,
        EngineError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidMonth(_)
        | EngineError::InvalidDate(_)
        | EngineError::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Configuration(msg) => {
            tracing::error!("configuration error: {msg}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Month path segments go through [`MonthKey::parse`] so a bad key answers
/// 422 with a JSON body instead of the extractor's plain-text 400.
fn month_param(raw: &str) -> Result<MonthKey, ServerError> {
    Ok(MonthKey::parse(raw)?)
}

fn not_found(what: &str, id: i64) -> ServerError {
    ServerError::Engine(EngineError::KeyNotFound(format!("{what} {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_forbidden_maps_to_403() {
        let res = ServerError::from(EngineError::Forbidden("forbidden".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        for err in [
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidMonth("x".to_string()),
            EngineError::InvalidDate("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn store_failures_map_to_gateway_errors() {
        let res = ServerError::from(EngineError::Rejected("no".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

        let res = ServerError::from(EngineError::Store(StoreError::Unavailable(
            "timeout".to_string(),
        )))
        .into_response();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
