mod posts;
mod selectors;
mod shared;
mod state;

pub use state::AdminState;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infra::assets;

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route(
            "/posts/{id}/edit",
            get(posts::admin_post_edit).post(posts::admin_post_update),
        )
        .route("/posts/{id}/edit/panel", post(posts::admin_post_edit_panel))
        .route(
            "/posts/{id}/edit/change",
            post(posts::admin_post_edit_change),
        )
        .route("/posts/{id}/edit/tab", post(posts::admin_post_edit_tab))
        .route("/static/admin/{*path}", get(assets::serve_admin))
        .with_state(state)
}
