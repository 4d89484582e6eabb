pub mod posters;
pub mod recommender;

pub use posters::{PosterProvider, TmdbPosterProvider};
pub use recommender::Recommender;
