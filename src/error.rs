//! HTTP-facing error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::deco::{DecoError, DecoErrorResponse};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Deco(#[from] DecoError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Deco(DecoError::InvalidRequest(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Deco(DecoError::ExposureNotTabulable { .. }) => StatusCode::BAD_REQUEST,
            AppError::Deco(DecoError::EntryNotFound { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            AppError::Deco(DecoError::InvalidRequest(_)) => "invalid_request",
            AppError::Deco(DecoError::ExposureNotTabulable { .. }) => "exposure_not_tabulable",
            AppError::Deco(DecoError::EntryNotFound { .. }) => "entry_not_found",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Deco(DecoError::ExposureNotTabulable {
                depth,
                bottom_time,
                max_time,
            }) => Some(serde_json::json!({
                "rounded_depth": depth,
                "bottom_time": bottom_time,
                "max_time": max_time,
            })),
            AppError::Deco(DecoError::EntryNotFound { depth, bottom_time }) => {
                Some(serde_json::json!({
                    "rounded_depth": depth,
                    "rounded_time": bottom_time,
                }))
            }
            AppError::Deco(DecoError::InvalidRequest(_)) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = DecoErrorResponse {
            error_type: self.error_type().to_string(),
            message: self.to_string(),
            details: self.details(),
        };
        (self.status(), Json(body)).into_response()
    }
}
