pub use super::favorites::Entity as Favorites;
pub use super::reviews::Entity as Reviews;
