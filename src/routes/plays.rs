use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::adapter::{self, ResourceAdapter};
use crate::models::PlayModel;

/// Plays are the only resource that can be deleted.
pub fn router<M>(model: Arc<M>) -> Router
where
    M: PlayModel + ?Sized + 'static,
{
    Router::new()
        .route("/plays", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route("/plays/", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route(
            "/plays/{id}",
            get(adapter::get_by_id::<M>)
                .put(adapter::update_by_id::<M>)
                .delete(adapter::delete_by_id::<M>),
        )
        .layer(middleware::map_response(adapter::set_json_type))
        .with_state(ResourceAdapter::new("play", model))
}
