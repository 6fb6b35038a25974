use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::AppResult,
    middleware::Json,
    models::{CreateUserInput, UpdateUserInput, UserDto},
};

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserDto>>> {
    let users = state.user_service.list().await?;

    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserDto>> {
    let user = state.user_service.get(&id).await?;

    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state.user_service.create(input).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<Json<UserDto>> {
    let user = state.user_service.update(&id, input).await?;

    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.user_service.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
