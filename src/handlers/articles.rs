use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::AppResult,
    middleware::Json,
    models::{ArticleDto, CreateArticleInput, UpdateArticleInput},
};

pub async fn list_articles(State(state): State<AppState>) -> AppResult<Json<Vec<ArticleDto>>> {
    let articles = state.article_service.list().await?;

    Ok(Json(articles))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ArticleDto>> {
    let article = state.article_service.get(&id).await?;

    Ok(Json(article))
}

pub async fn get_article_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ArticleDto>> {
    let article = state.article_service.get_by_name(&name).await?;

    Ok(Json(article))
}

pub async fn create_article(
    State(state): State<AppState>,
    Json(input): Json<CreateArticleInput>,
) -> AppResult<(StatusCode, Json<ArticleDto>)> {
    let article = state.article_service.create(input).await?;

    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateArticleInput>,
) -> AppResult<Json<ArticleDto>> {
    let article = state.article_service.update(&id, input).await?;

    Ok(Json(article))
}

pub async fn toggle_article_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ArticleDto>> {
    let article = state.article_service.toggle_status(&id).await?;

    Ok(Json(article))
}

pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.article_service.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
