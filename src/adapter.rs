//! Generic CRUD handlers shared by every resource controller.
//!
//! A [`ResourceAdapter`] wraps one model and is used as the router state of
//! that model's controller. The handlers below are generic over the model
//! trait, so a controller only has to pick which of them to mount.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ApiError;
use crate::models::{DeletableModel, Representation, ResourceModel};

/// Read-only handle on one entity model. Built once per controller.
pub struct ResourceAdapter<M: ?Sized> {
    entity: &'static str,
    model: Arc<M>,
}

impl<M: ?Sized> ResourceAdapter<M> {
    pub fn new(entity: &'static str, model: Arc<M>) -> Self {
        Self { entity, model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M: ?Sized> Clone for ResourceAdapter<M> {
    fn clone(&self) -> Self {
        Self {
            entity: self.entity,
            model: Arc::clone(&self.model),
        }
    }
}

/// Parse a path identifier as a non-negative base-10 integer.
///
/// Signs, whitespace, and trailing garbage are all rejected.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::InvalidId(raw.to_string()));
    }

    raw.parse().map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// 200 with the value as body, or 204 with no body when the model had
/// nothing to return.
pub fn respond(value: Option<Representation>) -> Response {
    match value {
        None | Some(Representation::Null) => StatusCode::NO_CONTENT.into_response(),
        Some(value) => (StatusCode::OK, Json(value)).into_response(),
    }
}

/// Response middleware marking successful bodies as JSON.
pub async fn set_json_type(mut response: Response) -> Response {
    let status = response.status();
    if status.is_success() && status != StatusCode::NO_CONTENT {
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
    }
    response
}

// GET /<resource>
pub async fn get_all<M>(
    State(adapter): State<ResourceAdapter<M>>,
) -> Result<Json<Vec<Representation>>, ApiError>
where
    M: ResourceModel + ?Sized + 'static,
{
    tracing::debug!(entity = adapter.entity, "listing");
    let rows = adapter.model.get().await?;

    Ok(Json(rows))
}

// GET /<resource>/{id}
pub async fn get_by_id<M>(
    State(adapter): State<ResourceAdapter<M>>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError>
where
    M: ResourceModel + ?Sized + 'static,
{
    let id = parse_id(&raw_id)?;
    tracing::debug!(entity = adapter.entity, id, "fetching");
    let row = adapter.model.get_by_id(id).await?;

    Ok(respond(row))
}

// POST /<resource>
pub async fn create_new<M>(
    State(adapter): State<ResourceAdapter<M>>,
    payload: Result<Json<Representation>, JsonRejection>,
) -> Result<Json<Representation>, ApiError>
where
    M: ResourceModel + ?Sized + 'static,
{
    let Json(payload) = payload?;
    tracing::debug!(entity = adapter.entity, "creating");
    let created = adapter.model.create(payload).await?;

    Ok(Json(created))
}

// PUT /<resource>/{id}
pub async fn update_by_id<M>(
    State(adapter): State<ResourceAdapter<M>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Representation>, JsonRejection>,
) -> Result<Json<Representation>, ApiError>
where
    M: ResourceModel + ?Sized + 'static,
{
    let id = parse_id(&raw_id)?;
    let Json(payload) = payload?;
    tracing::debug!(entity = adapter.entity, id, "updating");
    let updated = adapter.model.update_by_id(id, payload).await?;

    Ok(Json(updated))
}

// DELETE /<resource>/{id}
pub async fn delete_by_id<M>(
    State(adapter): State<ResourceAdapter<M>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Representation>, ApiError>
where
    M: DeletableModel + ?Sized + 'static,
{
    let id = parse_id(&raw_id)?;
    tracing::debug!(entity = adapter.entity, id, "deleting");
    let deleted = adapter.model.delete_by_id(id).await?;

    Ok(Json(deleted))
}
