mod article;
mod user;

pub use article::{Article, ArticleDto, CreateArticleInput, UpdateArticleInput};
pub use user::{CreateUserInput, UpdateUserInput, User, UserChanges, UserDto};

use mongodb::bson::oid::ObjectId;

use crate::error::AppResult;

/// Parses a path id into an `ObjectId`, rejecting malformed input as a validation error.
pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    Ok(ObjectId::parse_str(id)?)
}
