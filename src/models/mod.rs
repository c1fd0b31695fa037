pub mod article_model;
pub mod auth_model;
pub mod media_model;
pub mod tag_model;
