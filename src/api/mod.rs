use std::sync::Arc;

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};

use chrono::Utc;

use crate::{
    error::{ErrorKind, LookupError},
    models::{LookupState, ReferencePoint},
    session::{LookupSession, error_message},
};

#[derive(Serialize, Deserialize)]
pub struct LookupRequest {
    pub query: String,
}

#[derive(Serialize, Deserialize)]
pub struct ApiReference {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&ReferencePoint> for ApiReference {
    fn from(reference: &ReferencePoint) -> Self {
        Self {
            name: reference.name.clone(),
            latitude: reference.coordinate.latitude(),
            longitude: reference.coordinate.longitude(),
        }
    }
}

pub fn router(session: Arc<LookupSession>) -> Router {
    Router::new()
        .route("/lookup", get(get_lookup_state).post(submit_lookup))
        .route("/reference", get(get_reference))
        .with_state(session)
}

async fn submit_lookup(
    State(session): State<Arc<LookupSession>>,
    request: Result<Json<LookupRequest>, JsonRejection>,
) -> (StatusCode, Json<LookupState>) {
    let state = match request {
        Ok(Json(request)) => session.submit(&request.query).await,
        Err(rejection) => rejected_body(&rejection),
    };
    (status_for(&state), Json(state))
}

/// Unreadable request bodies are answered like a blank query, without touching the session
fn rejected_body(rejection: &JsonRejection) -> LookupState {
    tracing::debug!("Rejected lookup body: {}", rejection.body_text());
    let err = LookupError::validation(rejection.body_text());
    LookupState::Error {
        query: String::new(),
        kind: err.kind(),
        message: error_message(&err),
        completed_at: Utc::now(),
    }
}

async fn get_lookup_state(State(session): State<Arc<LookupSession>>) -> Json<LookupState> {
    Json(session.state())
}

async fn get_reference(State(session): State<Arc<LookupSession>>) -> Json<ApiReference> {
    Json(ApiReference::from(session.reference()))
}

fn status_for(state: &LookupState) -> StatusCode {
    match state {
        LookupState::Error { kind, .. } => match kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ServiceUnavailable => StatusCode::BAD_GATEWAY,
        },
        _ => StatusCode::OK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_state(kind: ErrorKind) -> LookupState {
        LookupState::Error {
            query: "q".to_string(),
            kind,
            message: String::new(),
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&LookupState::Idle), StatusCode::OK);
        assert_eq!(
            status_for(&error_state(ErrorKind::Validation)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&error_state(ErrorKind::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&error_state(ErrorKind::ServiceUnavailable)),
            StatusCode::BAD_GATEWAY
        );
    }
}
