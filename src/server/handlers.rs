use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::error::CounterError;
use crate::resilience::increment_with_retry;
use crate::server::state::AppState;

/// Handler failure carrying whether diagnostics may be shown to the client.
#[derive(Debug)]
pub struct HandlerError {
    source: CounterError,
    debug: bool,
}

impl HandlerError {
    pub fn new(source: CounterError, debug: bool) -> Self {
        Self { source, debug }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        if self.debug {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("{}\n", self.source),
            )
                .into_response()
        } else {
            self.source.into_response()
        }
    }
}

pub fn render_greeting(count: i64) -> String {
    format!("Hi! I have been called {} times\n", count)
}

/// `GET /`: bump the shared counter and report it.
pub async fn hello(State(state): State<AppState>) -> Result<String, HandlerError> {
    let count = increment_with_retry(state.store(), state.key(), state.retry())
        .await
        .map_err(|err| {
            error!(key = state.key(), error = %err, "Failed to increment hit counter");
            HandlerError::new(err, state.debug())
        })?;

    debug!(key = state.key(), count, "Hit counted");
    Ok(render_greeting(count))
}
