//! Client side of the favorites flow: how a product card resolves the API,
//! its cover image, and its favorite state.

pub mod api;
pub mod card;
pub mod config;
pub mod image;
pub mod lifetime;

pub use api::{ClientError, FavoritesApi, HttpFavoritesApi, Session};
pub use card::{FavoriteState, ProductCard};
pub use config::{ApiConfig, UrlSource};
pub use lifetime::{Lifetime, LifetimeGuard};
