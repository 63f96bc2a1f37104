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
use crate::models::{Representation, RulesetModel};

pub fn router<M>(model: Arc<M>) -> Router
where
    M: RulesetModel + ?Sized + 'static,
{
    Router::new()
        .route("/rulesets", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route("/rulesets/", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route(
            "/rulesets/{id}",
            get(adapter::get_by_id::<M>).put(adapter::update_by_id::<M>),
        )
        .route("/rulesets/game/{game_id}", get(get_by_game_id::<M>))
        .layer(middleware::map_response(adapter::set_json_type))
        .with_state(ResourceAdapter::new("ruleset", model))
}

// GET /rulesets/game/{game_id} - Rulesets defined for a game
async fn get_by_game_id<M>(
    State(rulesets): State<ResourceAdapter<M>>,
    Path(raw_game_id): Path<String>,
) -> Result<Json<Vec<Representation>>, ApiError>
where
    M: RulesetModel + ?Sized + 'static,
{
    let game_id = parse_id(&raw_game_id)?;
    tracing::debug!(game_id, "fetching rulesets for game");
    let found = rulesets.model().get_by_game_id(game_id).await?;

    Ok(Json(found))
}
