pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::ApiState;

use axum::{Router, routing::get};

pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/api/posts/{id}",
            get(handlers::get_post).patch(handlers::update_post),
        )
        .route("/api/categories", get(handlers::list_categories))
        .with_state(state)
}
