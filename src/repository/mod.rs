//! Data access for articles and users.
//!
//! Each collection is reached through an async trait so the HTTP layer only
//! ever holds an injected handle; the MongoDB implementations live alongside.

mod article;
mod user;

pub use article::MongoArticleRepository;
pub use user::MongoUserRepository;

use async_trait::async_trait;
use mongodb::{
    Database,
    bson::{DateTime, doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
};

use crate::{
    error::AppResult,
    models::{Article, UpdateArticleInput, User, UserChanges},
};

const DUPLICATE_KEY_CODE: i32 = 11000;

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// All articles, newest first.
    async fn list(&self) -> AppResult<Vec<Article>>;

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Article>>;

    /// First article whose `name` matches exactly. Names are not unique.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Article>>;

    async fn create(&self, article: &Article) -> AppResult<()>;

    /// Returns `None` when no article has `id`; never inserts.
    async fn update(
        &self,
        id: ObjectId,
        changes: &UpdateArticleInput,
        updated_at: DateTime,
    ) -> AppResult<Option<Article>>;

    async fn toggle_published(
        &self,
        id: ObjectId,
        updated_at: DateTime,
    ) -> AppResult<Option<Article>>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: ObjectId) -> AppResult<bool>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<User>>;

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>>;

    /// Whether another user already holds `email`, ignoring `excluding`.
    async fn exists_by_email(&self, email: &str, excluding: Option<ObjectId>) -> AppResult<bool>;

    async fn create(&self, user: &User) -> AppResult<()>;

    async fn update(
        &self,
        id: ObjectId,
        changes: &UserChanges,
        updated_at: DateTime,
    ) -> AppResult<Option<User>>;

    async fn delete(&self, id: ObjectId) -> AppResult<bool>;
}

/// Connectivity check used by the health endpoint.
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

#[async_trait]
impl Datastore for Database {
    async fn ping(&self) -> AppResult<()> {
        self.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[cfg(test)]
pub(crate) mod test_errors {
    use mongodb::{
        bson::{doc, from_document},
        error::{CommandError, Error, ErrorKind, WriteError, WriteFailure},
    };

    pub fn command_error(code: i32) -> Error {
        let error: CommandError = from_document(doc! {
            "code": code,
            "codeName": "DuplicateKey",
            "errmsg": "E11000 duplicate key error collection: articles.users",
        })
        .expect("command error should deserialize");

        ErrorKind::Command(error).into()
    }

    pub fn write_error(code: i32) -> Error {
        let error: WriteError = from_document(doc! {
            "code": code,
            "errmsg": "E11000 duplicate key error collection: articles.users",
        })
        .expect("write error should deserialize");

        ErrorKind::Write(WriteFailure::WriteError(error)).into()
    }
}
