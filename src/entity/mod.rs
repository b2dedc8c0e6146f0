pub mod donations;
pub mod favorites;
pub mod products;
pub mod users;

pub use donations::Entity as Donations;
pub use favorites::Entity as Favorites;
pub use products::Entity as Products;
pub use users::Entity as Users;
