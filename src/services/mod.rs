pub mod favorite_service;
pub mod token_service;
pub mod user_deletion_service;
pub mod user_service;
