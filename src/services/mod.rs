pub mod article_service;
pub mod auth_service;
pub mod media_service;
pub mod s3_service;
pub mod share_service;
pub mod tag_service;
