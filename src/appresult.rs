use axum::{http::StatusCode, response::{IntoResponse, Response}};

use crate::brawls::StoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<StoreError>() {
            Some(StoreError::MissingBrawl(_)) => StatusCode::NOT_FOUND,
            Some(StoreError::DuplicateSong(_)) => StatusCode::CONFLICT,
            Some(StoreError::EmptySongName | StoreError::NegativeVotes(_)) => StatusCode::BAD_REQUEST,
            Some(StoreError::Database(_)) | None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::warn!("{}", self.0);
        }

        (status, self.0.to_string()).into_response()
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
