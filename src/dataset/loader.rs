use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::movie::{split_genres, Movie};

/// Columns that must be present in the dataset header.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "name",
    "year",
    "movie_rated",
    "run_length",
    "genres",
    "release_date",
    "rating",
];

/// The movie table, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    movies: Vec<Movie>,
    genres: BTreeSet<String>,
    columns: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MovieRecord {
    name: Option<String>,
    year: Option<i32>,
    movie_rated: Option<String>,
    run_length: Option<String>,
    genres: Option<String>,
    release_date: Option<String>,
    rating: Option<f64>,
}

impl MovieRecord {
    fn into_movie(self, line: u64) -> Result<Movie, DatasetError> {
        Ok(Movie::new(
            text(self.name, line, "name")?,
            value(self.year, line, "year")?,
            text(self.movie_rated, line, "movie_rated")?,
            text(self.run_length, line, "run_length")?,
            text(self.genres, line, "genres")?,
            text(self.release_date, line, "release_date")?,
            value(self.rating, line, "rating")?,
        ))
    }
}

fn value<T>(field: Option<T>, line: u64, column: &'static str) -> Result<T, DatasetError> {
    field.ok_or(DatasetError::MissingValue { line, column })
}

fn text(field: Option<String>, line: u64, column: &'static str) -> Result<String, DatasetError> {
    value(field.filter(|s| !s.trim().is_empty()), line, column)
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        info!("Loading movies from {}", path.display());

        let file = File::open(path)
            .map_err(|e| DatasetError::Open(path.display().to_string(), e))?;
        let dataset = Self::from_reader(file)?;

        info!("Columns in dataset: {:?}", dataset.columns);
        info!(
            "Loaded {} movies with {} distinct genres",
            dataset.movies.len(),
            dataset.genres.len()
        );
        debug!("Available genres: {:?}", dataset.genres);

        Ok(dataset)
    }

    /// Parses CSV data with a header row. Fails on the first missing
    /// column or value; a partial dataset is never returned.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let headers = reader.headers()?.clone();
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !columns.iter().any(|c| c == *col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DatasetError::MissingColumns(missing));
        }

        let mut movies = Vec::new();
        let mut raw = csv::StringRecord::new();
        while reader.read_record(&mut raw)? {
            let line = raw.position().map(|p| p.line()).unwrap_or_default();
            let record: MovieRecord = raw.deserialize(Some(&headers))?;
            movies.push(record.into_movie(line)?);
        }

        let mut dataset = Self::from_movies(movies);
        dataset.columns = columns;
        Ok(dataset)
    }

    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let genres = movies
            .iter()
            .flat_map(|m| split_genres(&m.genres))
            .collect();

        Self {
            movies,
            genres,
            columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Every distinct genre token in the dataset.
    pub fn genres(&self) -> &BTreeSet<String> {
        &self.genres
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to open dataset {0}: {1}")]
    Open(String, std::io::Error),
    #[error("Failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required columns in dataset: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Missing value for column '{column}' on line {line}")]
    MissingValue { line: u64, column: &'static str },
}
