//! Typed errors and HTTP mapping.
//!
//! Clients only ever see two 500 envelopes: a store-reported failure (with
//! the store's message in `details`) and an unexpected failure (generic
//! message plus ISO-8601 timestamp). Configuration errors surface at mount
//! time and never reach a client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("resource '{resource}': missing required field '{field}'")]
    MissingField { resource: String, field: &'static str },
    #[error("resource '{resource}': duplicate filter param '{param}'")]
    DuplicateParam { resource: String, param: String },
    #[error("resource '{resource}': {message}")]
    Validation { resource: String, message: String },
    #[error("config load: {0}")]
    Load(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Db(e) => {
                tracing::error!(error = %e, "store read failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(crate::response::store_error(&e.to_string())),
                )
                    .into_response()
            }
            other => {
                tracing::error!(error = %other, "unhandled error in resource handler");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(crate::response::unexpected_error()),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_error_maps_to_store_envelope() {
        let err = AppError::Db(sqlx::Error::RowNotFound);
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn config_error_display_names_resource() {
        let err = ConfigError::MissingField {
            resource: "opinions".into(),
            field: "table",
        };
        assert_eq!(
            err.to_string(),
            "resource 'opinions': missing required field 'table'"
        );
    }
}
