use serde::Serialize;

/// Separator used inside the `genres` column.
pub const GENRE_DELIMITER: char = ';';

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub name: String,
    pub year: i32,
    pub movie_rated: String,
    pub run_length: String,
    pub genres: String,
    pub release_date: String,
    pub rating: f64,
    #[serde(skip)]
    genre_tokens: Vec<String>,
}

impl Movie {
    pub fn new(
        name: String,
        year: i32,
        movie_rated: String,
        run_length: String,
        genres: String,
        release_date: String,
        rating: f64,
    ) -> Self {
        let genre_tokens = split_genres(&genres).collect();
        Self {
            name,
            year,
            movie_rated,
            run_length,
            genres,
            release_date,
            rating,
            genre_tokens,
        }
    }

    /// Normalized genre tokens of this movie, in field order.
    pub fn genre_tokens(&self) -> &[String] {
        &self.genre_tokens
    }

    /// True if `genre` is one of this movie's genres. Both sides are
    /// compared trimmed and lowercased, whole tokens only.
    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = genre.trim().to_lowercase();
        self.genre_tokens.iter().any(|g| *g == wanted)
    }
}

/// Splits a raw genre field into lowercase, trimmed, non-empty tokens.
pub fn split_genres(field: &str) -> impl Iterator<Item = String> + '_ {
    field
        .split(GENRE_DELIMITER)
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_lowercase)
}
