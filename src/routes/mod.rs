//! Resource controllers and the registrar that mounts them.
//!
//! Each controller module exposes `router(model)`, a static table of
//! `(verb, path)` bindings built on [`crate::adapter`]. Paths are disjoint
//! across controllers, so merge order does not affect matching.

use axum::Router;

use crate::models::Models;

pub mod games;
pub mod leagues;
pub mod locations;
pub mod matches;
pub mod players;
pub mod plays;
pub mod rulesets;
pub mod seasons;
pub mod teams;

/// Mount every resource controller exactly once.
pub fn register(models: &Models) -> Router {
    let controllers = [
        ("players", players::router(models.players.clone())),
        ("teams", teams::router(models.teams.clone())),
        ("leagues", leagues::router(models.leagues.clone())),
        ("seasons", seasons::router(models.seasons.clone())),
        ("locations", locations::router(models.locations.clone())),
        ("games", games::router(models.games.clone())),
        ("rulesets", rulesets::router(models.rulesets.clone())),
        ("plays", plays::router(models.plays.clone())),
        ("matches", matches::router(models.matches.clone())),
    ];

    controllers
        .into_iter()
        .fold(Router::new(), |app, (name, controller)| {
            tracing::debug!("Registered /{} routes", name);
            app.merge(controller)
        })
}
