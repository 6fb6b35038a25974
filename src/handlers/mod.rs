mod articles;
mod health;
mod users;

pub use articles::{
    create_article, delete_article, get_article, get_article_by_name, list_articles,
    toggle_article_status, update_article,
};
pub use health::health_check;
pub use users::{create_user, delete_user, get_user, list_users, update_user};
