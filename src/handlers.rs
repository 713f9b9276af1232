use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use crate::{
    AppState,
    auth::verify_admin_key,
    error::ApiError,
    models::{Availability, BookingConfirmation, BookingRequest},
    validation::validate_booking_request,
};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsQuery {
    pub class_id: Option<String>,
    #[serde(default)]
    pub admin: bool,
    pub key: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    pub key: Option<String>,
    pub class_id: Option<String>,
    #[serde(default)]
    pub reset_all: bool,
}

#[utoipa::path(get, path = "/", tag = "bookings")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Class Booking API",
        "endpoints": {
            "GET /bookings?classId=<id>": "Check seat availability",
            "GET /bookings?admin=true&key=<adminKey>": "List every booking record",
            "POST /bookings": "Reserve a seat",
            "DELETE /bookings?key=<adminKey>&classId=<id>": "Reset one class",
            "DELETE /bookings?key=<adminKey>&resetAll=true": "Reset everything"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "bookings")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "bookings")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/bookings",
    params(
        ("classId" = Option<String>, Query, description = "Class to report availability for"),
        ("admin" = Option<bool>, Query, description = "Set to true to list every record instead"),
        ("key" = Option<String>, Query, description = "Admin key (alternative to Bearer header)")
    ),
    responses(
        (status = 200, description = "Availability for one class, or the full record map for admins", body = Availability),
        (status = 400, description = "Missing classId parameter"),
        (status = 401, description = "Invalid admin key")
    ),
    security(("bearer_auth" = []), ("admin_key" = [])),
    tag = "bookings"
)]
pub async fn get_bookings(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<BookingsQuery>,
) -> Result<Response, ApiError> {
    if query.admin {
        let auth_header = auth.map(|TypedHeader(a)| a);
        verify_admin_key(&state.settings, auth_header, query.key.as_deref())?;
        let records = state.service.list_all().await;
        return Ok(Json(records).into_response());
    }

    let Some(class_id) = query.class_id else {
        return Err(ApiError::BadRequest("Missing classId parameter".into()));
    };

    let availability = state.service.availability(&class_id).await;
    Ok(Json(availability).into_response())
}

#[utoipa::path(
    post,
    path = "/bookings",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking confirmed", body = BookingConfirmation),
        (status = 400, description = "Malformed JSON or missing required field"),
        (status = 409, description = "Already booked with this email, or class sold out")
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<BookingConfirmation>, ApiError> {
    let Json(request) =
        payload.map_err(|_| ApiError::BadRequest("Invalid request body".into()))?;
    validate_booking_request(&request)?;

    let confirmation = state.service.create_booking(&request).await?;
    Ok(Json(confirmation))
}

#[utoipa::path(
    delete,
    path = "/bookings",
    params(
        ("key" = Option<String>, Query, description = "Admin key (alternative to Bearer header)"),
        ("classId" = Option<String>, Query, description = "Class whose bookings to reset"),
        ("resetAll" = Option<bool>, Query, description = "Set to true to reset every class")
    ),
    responses(
        (status = 200, description = "Reset confirmation"),
        (status = 400, description = "Neither classId nor resetAll given"),
        (status = 401, description = "Invalid admin key")
    ),
    security(("bearer_auth" = []), ("admin_key" = [])),
    tag = "bookings"
)]
pub async fn delete_bookings(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let auth_header = auth.map(|TypedHeader(a)| a);
    verify_admin_key(&state.settings, auth_header, query.key.as_deref())?;

    if let Some(class_id) = query.class_id {
        state.service.delete_class(&class_id).await?;
        return Ok(Json(serde_json::json!({
            "message": format!("Bookings for {class_id} reset.")
        })));
    }

    if query.reset_all {
        let removed = state.service.reset_all().await?;
        return Ok(Json(serde_json::json!({
            "message": format!("All bookings reset ({removed} classes removed).")
        })));
    }

    Err(ApiError::BadRequest("Provide classId or resetAll=true".into()))
}

/// Bare OPTIONS outside a CORS preflight still answers 200 with no body.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Explicit method fallback so unsupported verbs get the `{message}` error
/// shape instead of axum's empty 405.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Method not allowed".into())
}
