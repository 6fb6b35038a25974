use mongodb::bson::{DateTime, Document, doc, oid::ObjectId};
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub published: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Article {
    pub fn from_input(input: CreateArticleInput, now: DateTime) -> Self {
        Self {
            id: ObjectId::new(),
            name: input.name,
            title: input.title.unwrap_or_default(),
            content: input.content.unwrap_or_default(),
            author: input.author,
            published: input.published.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleDto {
    pub id: String,
    pub name: String,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub published: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.to_hex(),
            name: article.name,
            title: article.title,
            content: article.content,
            author: article.author,
            published: article.published,
            created_at: article.created_at.to_time_0_3(),
            updated_at: article.updated_at.to_time_0_3(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleInput {
    pub name: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
}

/// Fields absent from the request body keep their stored value. An explicit
/// `"author": null` removes the byline.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArticleInput {
    pub name: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub author: Option<Option<String>>,
    pub published: Option<bool>,
}

/// Distinguishes a field sent as `null` (`Some(None)`) from one left out (`None`).
fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateArticleInput {
    /// `$set` (and `$unset` when the author is cleared) for a `findOneAndUpdate`.
    pub fn to_update_document(&self, updated_at: DateTime) -> Document {
        let mut set = doc! { "updated_at": updated_at };
        let mut unset = Document::new();

        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(title) = &self.title {
            set.insert("title", title.as_str());
        }
        if let Some(content) = &self.content {
            set.insert("content", content.as_str());
        }
        match &self.author {
            Some(Some(author)) => {
                set.insert("author", author.as_str());
            }
            Some(None) => {
                unset.insert("author", "");
            }
            None => {}
        }
        if let Some(published) = self.published {
            set.insert("published", published);
        }

        let mut update = doc! { "$set": set };
        if !unset.is_empty() {
            update.insert("$unset", unset);
        }
        update
    }
}
