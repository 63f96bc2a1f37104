use std::sync::Arc;

use axum::{
    extract::{Path, State},
    middleware,
    response::{Json, Response},
    routing::{get, put},
    Router,
};

use crate::adapter::{self, parse_id, respond, ResourceAdapter};
use crate::error::ApiError;
use crate::models::{Representation, SeasonModel};

pub fn router<M>(model: Arc<M>) -> Router
where
    M: SeasonModel + ?Sized + 'static,
{
    Router::new()
        .route("/seasons", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route("/seasons/", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route(
            "/seasons/{id}",
            get(adapter::get_by_id::<M>).put(adapter::update_by_id::<M>),
        )
        .route("/seasons/{id}/teams", get(get_teams::<M>))
        .route(
            "/seasons/{id}/team/{team_id}",
            put(add_team::<M>).delete(remove_team::<M>),
        )
        .layer(middleware::map_response(adapter::set_json_type))
        .with_state(ResourceAdapter::new("season", model))
}

// GET /seasons/{id}/teams - Teams taking part in the season
async fn get_teams<M>(
    State(seasons): State<ResourceAdapter<M>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Representation>>, ApiError>
where
    M: SeasonModel + ?Sized + 'static,
{
    let season_id = parse_id(&raw_id)?;
    tracing::debug!(season_id, "fetching season teams");
    let teams = seasons.model().get_teams(season_id).await?;

    Ok(Json(teams))
}

// PUT /seasons/{id}/team/{team_id} - Enter a team, returns the season
async fn add_team<M>(
    State(seasons): State<ResourceAdapter<M>>,
    Path((raw_season_id, raw_team_id)): Path<(String, String)>,
) -> Result<Response, ApiError>
where
    M: SeasonModel + ?Sized + 'static,
{
    let season_id = parse_id(&raw_season_id)?;
    let team_id = parse_id(&raw_team_id)?;
    tracing::debug!(season_id, team_id, "adding team to season");

    let season = seasons.model().add_team(team_id, season_id).await?;

    Ok(respond(Some(season)))
}

// DELETE /seasons/{id}/team/{team_id} - Withdraw a team, returns the season
async fn remove_team<M>(
    State(seasons): State<ResourceAdapter<M>>,
    Path((raw_season_id, raw_team_id)): Path<(String, String)>,
) -> Result<Response, ApiError>
where
    M: SeasonModel + ?Sized + 'static,
{
    let season_id = parse_id(&raw_season_id)?;
    let team_id = parse_id(&raw_team_id)?;
    tracing::debug!(season_id, team_id, "removing team from season");

    let season = seasons.model().remove_team(team_id, season_id).await?;

    Ok(respond(Some(season)))
}
