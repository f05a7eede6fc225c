use std::{path::Path, sync::Arc};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path as UrlPath, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use intake::{
    get_booking, list_bookings, list_contact_submissions, parse_payload, submit_booking,
    submit_contact, update_booking_status, update_contact_status,
};
use serde_json::Value;
use shared::protocol::{
    BookingResponse, BookingsResponse, ContactStatusResponse, ContactSubmissionsResponse,
    PingResponse, SubmitBookingResponse, SubmitContactResponse,
};
use tower::ServiceExt;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod app_state;
pub mod config;
mod error;

pub use app_state::AppState;
use error::{payload_too_large, route_not_found, HttpError};

/// Static bundle service that answers unknown paths with `index.html`.
pub fn spa_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

pub fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/contact", post(http_submit_contact))
        .route(
            "/api/contact/submissions",
            get(http_list_contact_submissions),
        )
        .route(
            "/api/contact/submissions/:id",
            put(http_update_contact_status),
        )
        .route(
            "/api/bookings",
            post(http_submit_booking).get(http_list_bookings),
        )
        .route(
            "/api/bookings/:id",
            get(http_get_booking).put(http_update_booking_status),
        )
        .fallback(fallback)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(middleware::from_fn(api_error_envelopes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn is_api_path(path: &str) -> bool {
    path.starts_with("/api/") || path.starts_with("/health")
}

fn request_payload(headers: &HeaderMap, body: &Bytes) -> Result<Value, HttpError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    parse_payload(content_type, body).map_err(HttpError::from)
}

async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        message: state.ping_message.clone(),
    })
}

async fn http_submit_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmitContactResponse>, HttpError> {
    let payload = request_payload(&headers, &body)?;
    let submission = submit_contact(&state.intake, &payload).await?;
    Ok(Json(SubmitContactResponse::new(&submission)))
}

async fn http_list_contact_submissions(
    State(state): State<Arc<AppState>>,
) -> Json<ContactSubmissionsResponse> {
    Json(ContactSubmissionsResponse::new(
        list_contact_submissions(&state.intake).await,
    ))
}

async fn http_update_contact_status(
    State(state): State<Arc<AppState>>,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ContactStatusResponse>, HttpError> {
    let payload = request_payload(&headers, &body)?;
    let submission = update_contact_status(&state.intake, &id, &payload).await?;
    Ok(Json(ContactStatusResponse::new(submission)))
}

async fn http_submit_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmitBookingResponse>, HttpError> {
    let payload = request_payload(&headers, &body)?;
    let booking = submit_booking(&state.intake, &payload).await?;
    Ok(Json(SubmitBookingResponse::new(booking)))
}

async fn http_list_bookings(State(state): State<Arc<AppState>>) -> Json<BookingsResponse> {
    Json(BookingsResponse::new(list_bookings(&state.intake).await))
}

async fn http_get_booking(
    State(state): State<Arc<AppState>>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<BookingResponse>, HttpError> {
    let booking = get_booking(&state.intake, &id).await?;
    Ok(Json(BookingResponse::found(booking)))
}

async fn http_update_booking_status(
    State(state): State<Arc<AppState>>,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<BookingResponse>, HttpError> {
    let payload = request_payload(&headers, &body)?;
    let booking = update_booking_status(&state.intake, &id, &payload).await?;
    Ok(Json(BookingResponse::status_updated(booking)))
}

/// API-looking paths get a JSON 404; everything else goes to the frontend.
async fn fallback(State(state): State<Arc<AppState>>, request: Request) -> Response {
    if is_api_path(request.uri().path()) {
        return route_not_found();
    }

    match state.spa.clone() {
        Some(spa) => match spa.oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        },
        None => route_not_found(),
    }
}

/// Rewrites the bare 405 and 413 responses produced below the handlers into
/// the JSON bodies API callers expect. A method a route does not serve is
/// reported like any other unknown endpoint.
async fn api_error_envelopes(request: Request, next: Next) -> Response {
    if !is_api_path(request.uri().path()) {
        return next.run(request).await;
    }

    let response = next.run(request).await;
    match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => route_not_found(),
        StatusCode::PAYLOAD_TOO_LARGE => payload_too_large(),
        _ => response,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
