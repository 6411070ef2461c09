use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Handler error wrapping `anyhow::Error`.
///
/// Lets handlers use `?` on anything convertible into `anyhow::Error`
/// (notably `RepositoryError` from the store) and turn it into a 500.
/// The store is in-memory and its operations are infallible in practice,
/// so this path exists for the trait contract, not for expected traffic.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", self.0),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
