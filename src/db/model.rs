#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
    pub created: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("User already exists: {0}")]
    DuplicateEmail(String),
    #[error("Invalid credentials for {0}")]
    InvalidCredentials(String),
}

pub type DbResult<T> = Result<T, DbError>;
