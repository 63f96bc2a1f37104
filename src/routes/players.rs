use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::adapter::{self, ResourceAdapter};
use crate::models::PlayerModel;

pub fn router<M>(model: Arc<M>) -> Router
where
    M: PlayerModel + ?Sized + 'static,
{
    Router::new()
        // Get all players, create player
        .route("/players", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route("/players/", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        // Get player, update player
        .route(
            "/players/{id}",
            get(adapter::get_by_id::<M>).put(adapter::update_by_id::<M>),
        )
        .layer(middleware::map_response(adapter::set_json_type))
        .with_state(ResourceAdapter::new("player", model))
}
