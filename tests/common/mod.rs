#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use mongodb::bson::{DateTime, oid::ObjectId};
use serde_json::Value;
use tower::ServiceExt;

use rust_axum_mongodb::{
    AppState,
    error::{AppError, AppResult},
    models::{Article, UpdateArticleInput, User, UserChanges},
    repository::{ArticleRepository, Datastore, UserRepository},
    routes::create_router,
};

#[derive(Default)]
pub struct InMemoryArticleRepository {
    articles: Mutex<Vec<Article>>,
}

impl InMemoryArticleRepository {
    pub fn len(&self) -> usize {
        self.articles.lock().unwrap().len()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn list(&self) -> AppResult<Vec<Article>> {
        let mut articles = self.articles.lock().unwrap().clone();
        articles.reverse();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(articles)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Article>> {
        let articles = self.articles.lock().unwrap();
        Ok(articles.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Article>> {
        let articles = self.articles.lock().unwrap();
        Ok(articles.iter().find(|a| a.name == name).cloned())
    }

    async fn create(&self, article: &Article) -> AppResult<()> {
        self.articles.lock().unwrap().push(article.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: ObjectId,
        changes: &UpdateArticleInput,
        updated_at: DateTime,
    ) -> AppResult<Option<Article>> {
        let mut articles = self.articles.lock().unwrap();
        let Some(article) = articles.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        if let Some(name) = &changes.name {
            article.name = name.clone();
        }
        if let Some(title) = &changes.title {
            article.title = title.clone();
        }
        if let Some(content) = &changes.content {
            article.content = content.clone();
        }
        if let Some(author) = &changes.author {
            article.author = author.clone();
        }
        if let Some(published) = changes.published {
            article.published = published;
        }
        article.updated_at = updated_at;

        Ok(Some(article.clone()))
    }

    async fn toggle_published(
        &self,
        id: ObjectId,
        updated_at: DateTime,
    ) -> AppResult<Option<Article>> {
        let mut articles = self.articles.lock().unwrap();
        let Some(article) = articles.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        article.published = !article.published;
        article.updated_at = updated_at;

        Ok(Some(article.clone()))
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let mut articles = self.articles.lock().unwrap();
        let before = articles.len();
        articles.retain(|a| a.id != id);
        Ok(articles.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn stored_password_hash(&self, email: &str) -> Option<String> {
        let users = self.users.lock().unwrap();
        users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.password_hash.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn exists_by_email(&self, email: &str, excluding: Option<ObjectId>) -> AppResult<bool> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .any(|u| u.email == email && Some(u.id) != excluding))
    }

    async fn create(&self, user: &User) -> AppResult<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: ObjectId,
        changes: &UserChanges,
        updated_at: DateTime,
    ) -> AppResult<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        if let Some(password_hash) = &changes.password_hash {
            user.password_hash = password_hash.clone();
        }
        if let Some(name) = &changes.name {
            user.name = name.clone();
        }
        user.updated_at = updated_at;

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

/// Fails every call with an error whose text must never reach a client.
pub struct FailingArticleRepository;

pub const LEAKED_DETAIL: &str = "connection refused by mongo-primary.internal:27017";

fn failure() -> AppError {
    AppError::Internal(LEAKED_DETAIL.to_string())
}

#[async_trait]
impl ArticleRepository for FailingArticleRepository {
    async fn list(&self) -> AppResult<Vec<Article>> {
        Err(failure())
    }

    async fn find_by_id(&self, _id: ObjectId) -> AppResult<Option<Article>> {
        Err(failure())
    }

    async fn find_by_name(&self, _name: &str) -> AppResult<Option<Article>> {
        Err(failure())
    }

    async fn create(&self, _article: &Article) -> AppResult<()> {
        Err(failure())
    }

    async fn update(
        &self,
        _id: ObjectId,
        _changes: &UpdateArticleInput,
        _updated_at: DateTime,
    ) -> AppResult<Option<Article>> {
        Err(failure())
    }

    async fn toggle_published(
        &self,
        _id: ObjectId,
        _updated_at: DateTime,
    ) -> AppResult<Option<Article>> {
        Err(failure())
    }

    async fn delete(&self, _id: ObjectId) -> AppResult<bool> {
        Err(failure())
    }
}

/// Panics inside the listing handler.
pub struct PanickingArticleRepository;

#[async_trait]
impl ArticleRepository for PanickingArticleRepository {
    async fn list(&self) -> AppResult<Vec<Article>> {
        panic!("{}", LEAKED_DETAIL)
    }

    async fn find_by_id(&self, _id: ObjectId) -> AppResult<Option<Article>> {
        Ok(None)
    }

    async fn find_by_name(&self, _name: &str) -> AppResult<Option<Article>> {
        Ok(None)
    }

    async fn create(&self, _article: &Article) -> AppResult<()> {
        Ok(())
    }

    async fn update(
        &self,
        _id: ObjectId,
        _changes: &UpdateArticleInput,
        _updated_at: DateTime,
    ) -> AppResult<Option<Article>> {
        Ok(None)
    }

    async fn toggle_published(
        &self,
        _id: ObjectId,
        _updated_at: DateTime,
    ) -> AppResult<Option<Article>> {
        Ok(None)
    }

    async fn delete(&self, _id: ObjectId) -> AppResult<bool> {
        Ok(false)
    }
}

pub struct StaticDatastore {
    pub healthy: bool,
}

#[async_trait]
impl Datastore for StaticDatastore {
    async fn ping(&self) -> AppResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::Internal("ping timed out".to_string()))
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub articles: Arc<InMemoryArticleRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        let articles = Arc::new(InMemoryArticleRepository::default());
        let users = Arc::new(InMemoryUserRepository::default());
        let state = AppState::new(
            Arc::new(StaticDatastore { healthy: true }),
            articles.clone(),
            users.clone(),
        );

        Self {
            router: create_router(state),
            articles,
            users,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, "GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router, "POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router, "PUT", uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, "PATCH", uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, "DELETE", uri, None).await
    }
}

pub fn router_with(
    datastore: Arc<dyn Datastore>,
    articles: Arc<dyn ArticleRepository>,
) -> Router {
    let state = AppState::new(
        datastore,
        articles,
        Arc::new(InMemoryUserRepository::default()),
    );
    create_router(state)
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}
