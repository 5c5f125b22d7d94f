// handlers/protected/events.rs - /api/events[/:id][/exhibits/:exhibit_id]

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::utils::{edit_stamp, optional_date, parse_date, required_text};
use crate::database::models::{Event, EventDetail, EventUpdate, NewEvent};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct EventQuery {
    pub museum: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub museum_address: Option<String>,
}

fn date_order_error() -> ApiError {
    ApiError::invalid_field("endDate", "must not be before startDate")
}

/// GET /api/events[?museum=address] - ordered by start date
pub async fn events_get(State(state): State<AppState>, Query(query): Query<EventQuery>) -> ApiResult<Vec<Event>> {
    Ok(ApiResponse::success(state.catalog.events(query.museum.as_deref()).await?))
}

/// GET /api/events/:id - with participating exhibits
pub async fn event_get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<EventDetail> {
    let event = state
        .catalog
        .event(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Event {} not found", id)))?;
    Ok(ApiResponse::success(event))
}

/// POST /api/events - staff only
pub async fn events_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<EventRequest>,
) -> ApiResult<Event> {
    user.require_staff()?;
    let event = NewEvent {
        name: required_text(&body.name, "name")?.to_string(),
        start_date: parse_date(required_text(&body.start_date, "startDate")?, "startDate")?,
        end_date: parse_date(required_text(&body.end_date, "endDate")?, "endDate")?,
        museum_address: required_text(&body.museum_address, "museumAddress")?.to_string(),
    };
    if event.end_date < event.start_date {
        return Err(date_order_error());
    }
    Ok(ApiResponse::created(state.catalog.create_event(event).await?))
}

/// PATCH /api/events/:id - the merged dates must stay ordered
pub async fn event_patch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(body): Json<EventRequest>,
) -> ApiResult<Event> {
    let stamp = edit_stamp(&state, &user).await?;
    let update = EventUpdate {
        name: body.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        start_date: optional_date(&body.start_date, "startDate")?,
        end_date: optional_date(&body.end_date, "endDate")?,
    };
    if update.is_empty() {
        return Err(ApiError::bad_request("No update fields provided"));
    }

    let event = match state.catalog.update_event(id, update, &stamp).await {
        Ok(Some(event)) => event,
        Ok(None) => return Err(ApiError::not_found(format!("Event {} not found", id))),
        Err(crate::database::DatabaseError::CheckViolation(_)) => return Err(date_order_error()),
        Err(e) => return Err(e.into()),
    };
    Ok(ApiResponse::success(event))
}

/// DELETE /api/events/:id
pub async fn event_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Value> {
    let stamp = edit_stamp(&state, &user).await?;
    if !state
        .catalog
        .delete_event(id, &stamp)
        .await
        .map_err(ApiError::from_delete)?
    {
        return Err(ApiError::not_found(format!("Event {} not found", id)));
    }
    Ok(ApiResponse::success(json!({ "id": id })).message("Event deleted"))
}

/// PUT /api/events/:id/exhibits/:exhibit_id
pub async fn event_exhibit_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, exhibit_id)): Path<(i64, i64)>,
) -> ApiResult<EventDetail> {
    user.require_staff()?;
    state.catalog.attach_exhibit(id, exhibit_id).await?;
    let event = state
        .catalog
        .event(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Event {} not found", id)))?;
    Ok(ApiResponse::success(event))
}

/// DELETE /api/events/:id/exhibits/:exhibit_id
pub async fn event_exhibit_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, exhibit_id)): Path<(i64, i64)>,
) -> ApiResult<Value> {
    user.require_staff()?;
    if !state.catalog.detach_exhibit(id, exhibit_id).await? {
        return Err(ApiError::not_found("Exhibit is not part of this event"));
    }
    Ok(ApiResponse::success(json!({ "eventId": id, "exhibitId": exhibit_id })))
}
