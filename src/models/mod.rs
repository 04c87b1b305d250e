pub mod favorite;
pub mod recipe;
pub mod review;
