pub mod favorite_service;
pub mod favorite_service_impl;
pub use favorite_service::{AddOutcome, FavoriteError, FavoriteService, RemoveOutcome};
pub use favorite_service_impl::SeaOrmFavoriteService;

pub mod review_service;
pub mod review_service_impl;
pub use review_service::{ReviewError, ReviewService, ReviewSubmission};
pub use review_service_impl::SeaOrmReviewService;

pub mod search;
pub use search::{SearchError, SearchService};
