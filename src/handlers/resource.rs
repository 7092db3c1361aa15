//! The two halves produced per resource: the list handler and the
//! after-response default-header middleware.

use crate::error::AppError;
use crate::query::QueryIntent;
use crate::service;
use crate::sql;
use crate::state::ResourceState;
use axum::{
    extract::{rejection::QueryRejection, Query, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use std::collections::HashMap;

/// GET handler for one mounted resource.
///
/// Phases: clamp the limit, derive field filters in declared order, derive
/// the date filter, pick the ordering, then run exactly one read. A store
/// failure maps to the store envelope; anything else that goes wrong before
/// the read (a query string the framework cannot parse, for instance) maps
/// to the generic envelope.
pub async fn list(
    State(state): State<ResourceState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let Query(params) = query.map_err(|rej| AppError::Internal(rej.to_string()))?;
    let intent = QueryIntent::from_params(&state.resource, &params);
    let q = sql::select_rows(&state.resource, &intent);
    let rows = service::fetch_rows(&state.pool, &q).await?;
    Ok((StatusCode::OK, Json(rows)))
}

/// Runs after the handler. Fills in `Cache-Control` and the CORS trio only
/// when the handler left them unset, then forces the JSON content type.
/// This step cannot fail; an unrepresentable configured value is skipped.
pub async fn default_headers(
    State(state): State<ResourceState>,
    req: Request,
    next: Next,
) -> Response {
    let mut res = next.run(req).await;
    let headers = res.headers_mut();
    if !headers.contains_key(header::CACHE_CONTROL) {
        if let Ok(v) = HeaderValue::from_str(&state.resource.cache_control) {
            headers.insert(header::CACHE_CONTROL, v);
        }
    }
    if !headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
        if let Ok(v) = HeaderValue::from_str(&state.resource.cors_origin) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, v);
        }
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
    }
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    res
}
