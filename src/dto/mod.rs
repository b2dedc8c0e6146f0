pub mod auth;
pub mod favorites;
pub mod users;
