use std::sync::Arc;

use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::get,
    Router,
};

use crate::adapter::{self, parse_id, ResourceAdapter};
use crate::error::ApiError;
use crate::models::{LeagueModel, Representation};

pub fn router<M>(model: Arc<M>) -> Router
where
    M: LeagueModel + ?Sized + 'static,
{
    Router::new()
        .route("/leagues", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route("/leagues/", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route(
            "/leagues/{id}",
            get(adapter::get_by_id::<M>).put(adapter::update_by_id::<M>),
        )
        .route("/leagues/{id}/seasons", get(get_seasons::<M>))
        .layer(middleware::map_response(adapter::set_json_type))
        .with_state(ResourceAdapter::new("league", model))
}

// GET /leagues/{id}/seasons
async fn get_seasons<M>(
    State(leagues): State<ResourceAdapter<M>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Representation>>, ApiError>
where
    M: LeagueModel + ?Sized + 'static,
{
    let league_id = parse_id(&raw_id)?;
    tracing::debug!(league_id, "fetching league seasons");
    let seasons = leagues.model().get_seasons(league_id).await?;

    Ok(Json(seasons))
}
