pub mod loader;
pub mod movie;

pub use loader::{Dataset, DatasetError, REQUIRED_COLUMNS};
pub use movie::{split_genres, Movie, GENRE_DELIMITER};
