use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use mongodb::bson::{DateTime, oid::ObjectId};
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{CreateUserInput, UpdateUserInput, User, UserChanges, UserDto, parse_object_id},
    repository::UserRepository,
    telemetry::{USERS_CREATED, USERS_DELETED, USERS_UPDATED},
};

#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

fn not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

fn email_taken() -> AppError {
    AppError::Conflict("Email already registered".to_string())
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    #[instrument(name = "user.list", skip(self))]
    pub async fn list(&self) -> AppResult<Vec<UserDto>> {
        let users = self.user_repo.list().await?;

        Ok(users.into_iter().map(UserDto::from).collect())
    }

    #[instrument(name = "user.get", skip(self))]
    pub async fn get(&self, id: &str) -> AppResult<UserDto> {
        let id = parse_object_id(id)?;

        self.user_repo
            .find_by_id(id)
            .await?
            .map(UserDto::from)
            .ok_or_else(not_found)
    }

    #[instrument(name = "user.create", skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: CreateUserInput) -> AppResult<UserDto> {
        if self.user_repo.exists_by_email(&input.email, None).await? {
            return Err(email_taken());
        }

        let now = DateTime::now();
        let user = User {
            id: ObjectId::new(),
            email: input.email,
            password_hash: hash_password(&input.password)?,
            name: input.name,
            created_at: now,
            updated_at: now,
        };

        self.user_repo.create(&user).await?;

        USERS_CREATED.add(1, &[]);

        tracing::info!(user_id = %user.id, "User created");

        Ok(UserDto::from(user))
    }

    #[instrument(name = "user.update", skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateUserInput) -> AppResult<UserDto> {
        let id = parse_object_id(id)?;

        if let Some(email) = &input.email {
            if self.user_repo.exists_by_email(email, Some(id)).await? {
                return Err(email_taken());
            }
        }

        let changes = UserChanges {
            email: input.email,
            password_hash: input.password.as_deref().map(hash_password).transpose()?,
            name: input.name,
        };

        let user = self
            .user_repo
            .update(id, &changes, DateTime::now())
            .await?
            .ok_or_else(not_found)?;

        USERS_UPDATED.add(1, &[]);

        tracing::info!(user_id = %user.id, "User updated");

        Ok(UserDto::from(user))
    }

    #[instrument(name = "user.delete", skip(self))]
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_object_id(id)?;

        if !self.user_repo.delete(id).await? {
            return Err(not_found());
        }

        USERS_DELETED.add(1, &[]);

        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}
