use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{debug, info};

use super::error::ApiError;
use super::types::*;
use crate::db::UserRepo;
use crate::recommend::Recommendation;
use crate::server::AppState;

fn credentials(payload: Result<Json<Credentials>, JsonRejection>) -> Result<Credentials, ApiError> {
    payload
        .map(|Json(c)| c)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let creds = credentials(payload)?;

    if state.db.user_exists(&creds.email).await? {
        return Err(ApiError::DuplicateEmail(creds.email));
    }
    state.db.create_user(&creds.email, &creds.password).await?;

    Ok(Json(MessageResponse::new("User registered successfully")))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let creds = credentials(payload)?;

    state.db.verify_user(&creds.email, &creds.password).await?;
    debug!("User {} logged in", creds.email);

    Ok(Json(MessageResponse::new("Login successful")))
}

pub async fn recommend(
    State(state): State<AppState>,
    emotion: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    let Path(emotion) = emotion.map_err(|e| ApiError::InvalidEmotion(e.body_text()))?;
    info!("Emotion received: {}", emotion);

    let recommendations = state.recommender.recommend(&emotion).await?;
    debug!("Recommendations: {:?}", recommendations);

    Ok(Json(recommendations))
}

pub async fn list_genres(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.recommender.dataset().genres().iter().cloned().collect())
}

pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-cache, no-store")],
        "Healthy",
    )
}
