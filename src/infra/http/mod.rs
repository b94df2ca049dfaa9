mod admin;
pub mod api;
mod middleware;

pub use admin::{AdminState, build_admin_router};
pub use api::{ApiState, build_api_router};
pub use middleware::RequestContext;

use axum::{Router, middleware as axum_middleware};

/// Admin edit pages and the JSON resource API behind shared request logging.
pub fn build_router(admin: AdminState, api: ApiState) -> Router {
    Router::new()
        .merge(build_admin_router(admin))
        .merge(build_api_router(api))
        .layer(axum_middleware::from_fn(middleware::log_responses))
        .layer(axum_middleware::from_fn(middleware::set_request_context))
}
