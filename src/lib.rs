pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;

use std::sync::Arc;

pub use config::Config;

use repository::{ArticleRepository, Datastore, UserRepository};
use services::{ArticleService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub datastore: Arc<dyn Datastore>,
    pub article_service: ArticleService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(
        datastore: Arc<dyn Datastore>,
        article_repo: Arc<dyn ArticleRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            datastore,
            article_service: ArticleService::new(article_repo),
            user_service: UserService::new(user_repo),
        }
    }
}
