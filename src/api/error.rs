//! HTTP mapping for [`WeatherError`]

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::WeatherError;

impl WeatherError {
    /// HTTP status reported for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            WeatherError::NotFound { .. } => StatusCode::NOT_FOUND,
            WeatherError::InvalidSample { .. }
            | WeatherError::InvalidArgument { .. }
            | WeatherError::InvalidAirport { .. }
            | WeatherError::Parse { .. } => StatusCode::BAD_REQUEST,
            WeatherError::DuplicateAirport { .. } => StatusCode::CONFLICT,
            WeatherError::Config { .. } | WeatherError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = serde_json::json!({
            "error": self.user_message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
