pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod movies;
pub mod poster;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, movies::MovieService};

pub struct AppState {
    pub config: Arc<Config>,
    pub movies: MovieService,
}

impl AppState {
    pub fn new(config: Arc<Config>, db: sea_orm::DatabaseConnection) -> Self {
        let movies = MovieService::new(db, config.poster.clone());
        Self { config, movies }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.body_limit();

    Router::new()
        .route("/movies", post(routes::create))
        .route("/movies/all", get(routes::list_all))
        .route("/movies/by-genre", get(routes::list_by_genre))
        .route(
            "/movies/{id}",
            get(routes::get_by_id).put(routes::update).delete(routes::delete),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
