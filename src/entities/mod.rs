pub mod prelude;

pub mod favorites;
pub mod reviews;
