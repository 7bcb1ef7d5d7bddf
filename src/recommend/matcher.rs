use std::sync::Arc;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::emotion::{Emotion, EmotionMap};
use super::poster::PosterEnricher;
use crate::dataset::{Dataset, Movie};

pub const MAX_RECOMMENDATIONS: usize = 3;

/// A recommended movie with its resolved poster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub movie: Movie,
    pub image_url: String,
}

pub struct Recommender {
    dataset: Arc<Dataset>,
    emotions: EmotionMap,
    posters: PosterEnricher,
}

impl Recommender {
    pub fn new(dataset: Arc<Dataset>, posters: PosterEnricher) -> Self {
        let emotions = EmotionMap::new(dataset.genres());
        Self {
            dataset,
            emotions,
            posters,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn emotions(&self) -> &EmotionMap {
        &self.emotions
    }

    /// All movies having at least one of `genres` as a whole genre token.
    pub fn matching<'a>(&'a self, genres: &[String]) -> Vec<&'a Movie> {
        self.dataset
            .movies()
            .iter()
            .filter(|m| genres.iter().any(|g| m.has_genre(g)))
            .collect()
    }

    /// Picks up to `MAX_RECOMMENDATIONS` distinct matching movies using `rng`.
    pub fn select<R: Rng + ?Sized>(
        &self,
        emotion: &str,
        rng: &mut R,
    ) -> Result<Vec<&Movie>, RecommendError> {
        let emotion: Emotion = emotion
            .parse()
            .map_err(|_| RecommendError::InvalidEmotion(emotion.to_string()))?;

        let genres = self.emotions.genres(emotion);
        if genres.is_empty() {
            return Err(RecommendError::InvalidEmotion(emotion.to_string()));
        }
        debug!("Genres for emotion '{}': {:?}", emotion, genres);

        let matched = self.matching(genres);
        info!("Emotion '{}' matched {} movies", emotion, matched.len());

        let amount = matched.len().min(MAX_RECOMMENDATIONS);
        Ok(matched.choose_multiple(rng, amount).copied().collect())
    }

    pub async fn recommend(&self, emotion: &str) -> Result<Vec<Recommendation>, RecommendError> {
        let picks: Vec<Movie> = {
            let mut rng = rand::rng();
            self.select(emotion, &mut rng)?
                .into_iter()
                .cloned()
                .collect()
        };

        let mut recommendations = Vec::with_capacity(picks.len());
        for movie in picks {
            let image_url = self.posters.fetch_poster(&movie.name).await;
            recommendations.push(Recommendation { movie, image_url });
        }

        Ok(recommendations)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("Invalid emotion: {0}")]
    InvalidEmotion(String),
}
