use mongodb::bson::{DateTime, Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email,
            name: user.name,
            created_at: user.created_at.to_time_0_3(),
            updated_at: user.updated_at.to_time_0_3(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Stored-field changes for a user; the password is already hashed here.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
}

impl UserChanges {
    pub fn to_set_document(&self, updated_at: DateTime) -> Document {
        let mut set = doc! { "updated_at": updated_at };

        if let Some(email) = &self.email {
            set.insert("email", email.as_str());
        }
        if let Some(password_hash) = &self.password_hash {
            set.insert("password_hash", password_hash.as_str());
        }
        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }

        set
    }
}
