use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{DateTime, doc, oid::ObjectId},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;

use super::{UserRepository, is_duplicate_key};
use crate::{
    error::{AppError, AppResult},
    models::{User, UserChanges},
};

const COLLECTION: &str = "users";

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    #[instrument(name = "db.user.ensure_indexes", skip(self))]
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

fn map_write_error(error: mongodb::error::Error) -> AppError {
    if is_duplicate_key(&error) {
        AppError::Conflict("Email already registered".to_string())
    } else {
        AppError::Database(error)
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(name = "db.user.list", skip(self))]
    async fn list(&self) -> AppResult<Vec<User>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    #[instrument(name = "db.user.find_by_id", skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(name = "db.user.exists_by_email", skip(self))]
    async fn exists_by_email(&self, email: &str, excluding: Option<ObjectId>) -> AppResult<bool> {
        let mut filter = doc! { "email": email };
        if let Some(id) = excluding {
            filter.insert("_id", doc! { "$ne": id });
        }

        let count = self.collection.count_documents(filter).limit(1).await?;
        Ok(count > 0)
    }

    #[instrument(name = "db.user.create", skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> AppResult<()> {
        self.collection
            .insert_one(user)
            .await
            .map_err(map_write_error)?;
        Ok(())
    }

    #[instrument(name = "db.user.update", skip(self, changes))]
    async fn update(
        &self,
        id: ObjectId,
        changes: &UserChanges,
        updated_at: DateTime,
    ) -> AppResult<Option<User>> {
        let set = changes.to_set_document(updated_at);

        self.collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_write_error)
    }

    #[instrument(name = "db.user.delete", skip(self))]
    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
