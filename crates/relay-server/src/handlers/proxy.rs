//! Proxy handlers: every supported verb on every path.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderName, Method},
    response::{IntoResponse, Response},
    routing::MethodFilter,
};
use relay_core::HttpMethod;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Header que indica si la respuesta salio del cache.
pub static CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-relay-cache");

/// Verbs routed to the proxy. Anything else gets a 405 from the router.
pub fn proxy_methods() -> MethodFilter {
    MethodFilter::GET
        .or(MethodFilter::POST)
        .or(MethodFilter::DELETE)
        .or(MethodFilter::PATCH)
        .or(MethodFilter::PUT)
}

/// Handler para `/` (path vacio).
pub async fn proxy_root(State(state): State<AppState>, method: Method) -> Result<Response, AppError> {
    forward(&state, method, "").await
}

/// Handler para `/{*path}`.
pub async fn proxy_path(
    State(state): State<AppState>,
    method: Method,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    // p.ej. `/%FF`: el path no es UTF-8 valido una vez decodificado
    let Path(path) = path?;
    forward(&state, method, &path).await
}

#[instrument(skip(state, method), fields(method = %method))]
async fn forward(state: &AppState, method: Method, path: &str) -> Result<Response, AppError> {
    // HEAD llega aqui a traves de la ruta GET
    let method: HttpMethod = method.as_str().parse()?;

    let cached = state.proxy().handle(method, path).await?;

    Ok((
        [(CACHE_STATUS_HEADER.clone(), cached.status.as_str())],
        cached.response.into_body(),
    )
        .into_response())
}
