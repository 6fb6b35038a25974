mod article;
mod user;

pub use article::ArticleService;
pub use user::UserService;
