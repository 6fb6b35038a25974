use axum::{
    Router,
    routing::{MethodRouter, get, patch},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
};

use crate::{AppState, handlers, middleware};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .nest("/api/users", user_routes())
        .nest("/api/articles", article_routes())
        // Nested "/" only matches the bare prefix.
        .route("/api/users/", user_collection())
        .route("/api/articles/", article_collection())
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

fn article_collection() -> MethodRouter<AppState> {
    get(handlers::list_articles).post(handlers::create_article)
}

fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/", article_collection())
        .route("/name/{name}", get(handlers::get_article_by_name))
        .route(
            "/{id}",
            get(handlers::get_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
        .route("/{id}/toggle", patch(handlers::toggle_article_status))
}

fn user_collection() -> MethodRouter<AppState> {
    get(handlers::list_users).post(handlers::create_user)
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", user_collection())
        .route(
            "/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
}
