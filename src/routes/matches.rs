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
use crate::models::{MatchModel, Representation};

pub fn router<M>(model: Arc<M>) -> Router
where
    M: MatchModel + ?Sized + 'static,
{
    Router::new()
        .route("/matches", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route("/matches/", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route(
            "/matches/{id}",
            get(adapter::get_by_id::<M>).put(adapter::update_by_id::<M>),
        )
        .route("/matches/{id}/plays", get(get_plays::<M>))
        .layer(middleware::map_response(adapter::set_json_type))
        .with_state(ResourceAdapter::new("match", model))
}

// GET /matches/{id}/plays - Plays of the match, in order
async fn get_plays<M>(
    State(matches): State<ResourceAdapter<M>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Representation>>, ApiError>
where
    M: MatchModel + ?Sized + 'static,
{
    let match_id = parse_id(&raw_id)?;
    tracing::debug!(match_id, "fetching match plays");
    let plays = matches.model().get_plays(match_id).await?;

    Ok(Json(plays))
}
