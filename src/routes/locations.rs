use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::adapter::{self, ResourceAdapter};
use crate::models::LocationModel;

pub fn router<M>(model: Arc<M>) -> Router
where
    M: LocationModel + ?Sized + 'static,
{
    Router::new()
        // Get all locations, create location
        .route("/locations", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route("/locations/", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        // Get location, update location
        .route(
            "/locations/{id}",
            get(adapter::get_by_id::<M>).put(adapter::update_by_id::<M>),
        )
        .layer(middleware::map_response(adapter::set_json_type))
        .with_state(ResourceAdapter::new("location", model))
}
