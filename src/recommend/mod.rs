pub mod emotion;
pub mod matcher;
pub mod poster;

pub use emotion::{Emotion, EmotionMap};
pub use matcher::{Recommendation, RecommendError, Recommender, MAX_RECOMMENDATIONS};
pub use poster::{OmdbClient, PosterEnricher, PosterError, PosterSource};
