use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{DateTime, Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use tracing::instrument;

use super::ArticleRepository;
use crate::{
    error::AppResult,
    models::{Article, UpdateArticleInput},
};

const COLLECTION: &str = "articles";

#[derive(Clone)]
pub struct MongoArticleRepository {
    collection: Collection<Article>,
}

impl MongoArticleRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// Lookup index on `name`. Deliberately not unique.
    #[instrument(name = "db.article.ensure_indexes", skip(self))]
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder().keys(doc! { "name": 1 }).build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// Update pipeline that flips `published` server-side in a single write.
fn toggle_published_pipeline(updated_at: DateTime) -> Vec<Document> {
    vec![doc! {
        "$set": {
            "published": { "$not": ["$published"] },
            "updated_at": updated_at,
        }
    }]
}

#[async_trait]
impl ArticleRepository for MongoArticleRepository {
    #[instrument(name = "db.article.list", skip(self))]
    async fn list(&self) -> AppResult<Vec<Article>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    #[instrument(name = "db.article.find_by_id", skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Article>> {
        Ok(self.collection.find_one(by_id(id)).await?)
    }

    #[instrument(name = "db.article.find_by_name", skip(self))]
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Article>> {
        Ok(self.collection.find_one(doc! { "name": name }).await?)
    }

    #[instrument(name = "db.article.create", skip(self, article), fields(article_id = %article.id))]
    async fn create(&self, article: &Article) -> AppResult<()> {
        self.collection.insert_one(article).await?;
        Ok(())
    }

    #[instrument(name = "db.article.update", skip(self, changes))]
    async fn update(
        &self,
        id: ObjectId,
        changes: &UpdateArticleInput,
        updated_at: DateTime,
    ) -> AppResult<Option<Article>> {
        Ok(self
            .collection
            .find_one_and_update(by_id(id), changes.to_update_document(updated_at))
            .return_document(ReturnDocument::After)
            .await?)
    }

    #[instrument(name = "db.article.toggle_published", skip(self))]
    async fn toggle_published(
        &self,
        id: ObjectId,
        updated_at: DateTime,
    ) -> AppResult<Option<Article>> {
        Ok(self
            .collection
            .find_one_and_update(by_id(id), toggle_published_pipeline(updated_at))
            .return_document(ReturnDocument::After)
            .await?)
    }

    #[instrument(name = "db.article.delete", skip(self))]
    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(by_id(id)).await?;
        Ok(result.deleted_count > 0)
    }
}
