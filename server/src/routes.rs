//! Routes:
//!   GET          /api/scam-data     all municipalities
//!   GET|OPTIONS  /api/city/{name}   one municipality ("union" aliases)

use crate::error::ApiError;
use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use scamrisk_core::{
    query::{CityDetail, CitySummary},
    AppContext,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub type SharedContext = Arc<AppContext>;

pub fn build_router(ctx: SharedContext) -> Router {
    let cors = cors_layer(&ctx.config.allowed_origins);
    Router::new()
        .route("/api/scam-data", get(scam_data))
        .route("/api/city/{name}", get(city_detail))
        .layer(cors)
        .layer(middleware::from_fn(city_preflight_no_content))
        .with_state(ctx)
}

/// Only the configured origins; GET/POST/OPTIONS; two request headers.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring invalid CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn scam_data(State(ctx): State<SharedContext>) -> Result<Json<Vec<CitySummary>>, ApiError> {
    Ok(Json(ctx.query().list_all()?))
}

async fn city_detail(
    State(ctx): State<SharedContext>,
    Path(name): Path<String>,
) -> Result<Json<CityDetail>, ApiError> {
    Ok(Json(ctx.query().get(&name)?))
}

/// The CORS layer answers every OPTIONS request itself with 200.
/// City lookups answer preflight with 204 and an empty body.
async fn city_preflight_no_content(request: Request, next: Next) -> Response {
    let is_city_preflight =
        request.method() == Method::OPTIONS && request.uri().path().starts_with("/api/city/");
    let mut response = next.run(request).await;
    if is_city_preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
