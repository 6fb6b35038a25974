use std::sync::Arc;

use mongodb::bson::DateTime;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{Article, ArticleDto, CreateArticleInput, UpdateArticleInput, parse_object_id},
    repository::ArticleRepository,
    telemetry::{ARTICLES_CREATED, ARTICLES_DELETED, ARTICLES_TOGGLED, ARTICLES_UPDATED},
};

#[derive(Clone)]
pub struct ArticleService {
    article_repo: Arc<dyn ArticleRepository>,
}

fn not_found() -> AppError {
    AppError::NotFound("Article not found".to_string())
}

impl ArticleService {
    pub fn new(article_repo: Arc<dyn ArticleRepository>) -> Self {
        Self { article_repo }
    }

    #[instrument(name = "article.list", skip(self))]
    pub async fn list(&self) -> AppResult<Vec<ArticleDto>> {
        let articles = self.article_repo.list().await?;

        Ok(articles.into_iter().map(ArticleDto::from).collect())
    }

    #[instrument(name = "article.get", skip(self))]
    pub async fn get(&self, id: &str) -> AppResult<ArticleDto> {
        let id = parse_object_id(id)?;

        self.article_repo
            .find_by_id(id)
            .await?
            .map(ArticleDto::from)
            .ok_or_else(not_found)
    }

    #[instrument(name = "article.get_by_name", skip(self))]
    pub async fn get_by_name(&self, name: &str) -> AppResult<ArticleDto> {
        self.article_repo
            .find_by_name(name)
            .await?
            .map(ArticleDto::from)
            .ok_or_else(not_found)
    }

    #[instrument(name = "article.create", skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CreateArticleInput) -> AppResult<ArticleDto> {
        let article = Article::from_input(input, DateTime::now());

        self.article_repo.create(&article).await?;

        ARTICLES_CREATED.add(1, &[]);

        tracing::info!(article_id = %article.id, name = %article.name, "Article created");

        Ok(ArticleDto::from(article))
    }

    #[instrument(name = "article.update", skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateArticleInput) -> AppResult<ArticleDto> {
        let id = parse_object_id(id)?;

        let article = self
            .article_repo
            .update(id, &input, DateTime::now())
            .await?
            .ok_or_else(not_found)?;

        ARTICLES_UPDATED.add(1, &[]);

        tracing::info!(article_id = %article.id, "Article updated");

        Ok(ArticleDto::from(article))
    }

    #[instrument(name = "article.toggle_status", skip(self))]
    pub async fn toggle_status(&self, id: &str) -> AppResult<ArticleDto> {
        let id = parse_object_id(id)?;

        let article = self
            .article_repo
            .toggle_published(id, DateTime::now())
            .await?
            .ok_or_else(not_found)?;

        ARTICLES_TOGGLED.add(1, &[]);

        tracing::info!(
            article_id = %article.id,
            published = article.published,
            "Article status toggled"
        );

        Ok(ArticleDto::from(article))
    }

    #[instrument(name = "article.delete", skip(self))]
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_object_id(id)?;

        if !self.article_repo.delete(id).await? {
            return Err(not_found());
        }

        ARTICLES_DELETED.add(1, &[]);

        tracing::info!(article_id = %id, "Article deleted");

        Ok(())
    }
}
