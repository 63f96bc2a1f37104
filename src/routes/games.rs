use std::sync::Arc;

use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::get,
    Router,
};

use crate::adapter::{self, ResourceAdapter};
use crate::error::ApiError;
use crate::models::{GameModel, Representation};

pub fn router<M>(model: Arc<M>) -> Router
where
    M: GameModel + ?Sized + 'static,
{
    Router::new()
        .route("/games", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route("/games/", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route(
            "/games/{id}",
            get(adapter::get_by_id::<M>).put(adapter::update_by_id::<M>),
        )
        .route("/games/formatter/{formatter_id}", get(get_by_formatter_id::<M>))
        .layer(middleware::map_response(adapter::set_json_type))
        .with_state(ResourceAdapter::new("game", model))
}

// GET /games/formatter/{formatter_id} - Games scored with a given formatter
//
// Formatter ids are passed through as text.
async fn get_by_formatter_id<M>(
    State(games): State<ResourceAdapter<M>>,
    Path(formatter_id): Path<String>,
) -> Result<Json<Vec<Representation>>, ApiError>
where
    M: GameModel + ?Sized + 'static,
{
    tracing::debug!(formatter_id = %formatter_id, "fetching games by formatter");
    let found = games.model().get_by_formatter_id(&formatter_id).await?;

    Ok(Json(found))
}
