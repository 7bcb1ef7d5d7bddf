use axum::{
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::ApiError;
use crate::db::SqliteRepository;
use crate::recommend::Recommender;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<SqliteRepository>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(db: Arc<SqliteRepository>, recommender: Arc<Recommender>) -> Self {
        Self {
            db,
            recommender,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/signup", post(crate::api::signup))
        .route("/login", post(crate::api::login))
        .route("/recommend/:emotion", get(crate::api::recommend))
        .route("/genres", get(crate::api::list_genres))
        .route("/health", get(crate::api::health))
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler(req: Request) -> Response {
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    ApiError::NotFound(req.uri().path().to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MessageResponse;
    use crate::dataset::Dataset;
    use crate::recommend::PosterEnricher;
    use axum::body::Body;
    use axum::http::{header, Method};
    use serde_json::Value;
    use tower::ServiceExt;

    const CSV: &str = "name,year,movie_rated,run_length,genres,release_date,rating\n\
                       X,2010,PG,1h 40min,Comedy;Romance,2010-05-01,7.1\n\
                       Y,2012,R,2h 5min,Horror,2012-10-31,5.9\n";

    async fn app() -> Router {
        app_with(CSV).await
    }

    async fn app_with(csv: &str) -> Router {
        let dataset = Arc::new(Dataset::from_reader(csv.as_bytes()).unwrap());
        let posters = PosterEnricher::new(None, "https://via.placeholder.com/200?text={title}");
        let recommender = Arc::new(Recommender::new(dataset, posters));
        let db = Arc::new(SqliteRepository::in_memory().await.unwrap());
        build_router(AppState::new(db, recommender))
    }

    async fn send(app: &Router, req: axum::http::Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(uri: &str, body: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn message(body: &Value) -> MessageResponse {
        serde_json::from_value(body.clone()).unwrap()
    }

    #[tokio::test]
    async fn test_recommend_happy() {
        let app = app().await;
        let (status, body) = send(&app, get("/recommend/happy")).await;
        assert_eq!(status, StatusCode::OK);

        let movies = body.as_array().unwrap();
        assert_eq!(movies.len(), 1);
        let movie = &movies[0];
        assert_eq!(movie["name"], "X");
        assert_eq!(movie["year"], 2010);
        assert_eq!(movie["movie_rated"], "PG");
        assert_eq!(movie["run_length"], "1h 40min");
        assert_eq!(movie["genres"], "Comedy;Romance");
        assert_eq!(movie["release_date"], "2010-05-01");
        assert_eq!(movie["rating"], 7.1);
        assert_eq!(movie["image_url"], "https://via.placeholder.com/200?text=X");
    }

    #[tokio::test]
    async fn test_recommend_without_matches_is_empty_array() {
        let app = app().await;
        for _ in 0..3 {
            let (status, body) = send(&app, get("/recommend/angry")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, Value::Array(vec![]));
        }
    }

    #[tokio::test]
    async fn test_recommend_invalid_emotion() {
        let app = app().await;
        let (status, body) = send(&app, get("/recommend/bored")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&body).message, "Invalid emotion");
    }

    #[tokio::test]
    async fn test_signup_then_duplicate() {
        let app = app().await;
        let creds = r#"{"email": "a@example.com", "password": "pw"}"#;

        let (status, body) = send(&app, post_json("/signup", creds)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(message(&body).message, "User registered successfully");

        let (status, body) = send(&app, post_json("/signup", creds)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&body).message, "User already exists");
    }

    #[tokio::test]
    async fn test_login() {
        let app = app().await;
        let creds = r#"{"email": "b@example.com", "password": "pw"}"#;
        send(&app, post_json("/signup", creds)).await;

        let (status, body) = send(&app, post_json("/login", creds)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(message(&body).message, "Login successful");

        let wrong = r#"{"email": "b@example.com", "password": "nope"}"#;
        let (status, body) = send(&app, post_json("/login", wrong)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body).message, "Invalid email or password");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let app = app().await;
        let (status, body) = send(&app, post_json("/signup", r#"{"email": "c@example.com"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&body).message, "Invalid request body");
    }

    #[tokio::test]
    async fn test_genres_and_health() {
        let app = app().await;
        let (status, body) = send(&app, get("/genres")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!(["comedy", "horror", "romance"]));

        let response = app.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = app().await;
        let (status, body) = send(&app, get("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message(&body).message, "Not found");
    }

    #[tokio::test]
    async fn test_recommend_undecodable_emotion() {
        let app = app().await;
        let (status, body) = send(&app, get("/recommend/%FF")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&body).message, "Invalid emotion");
    }

    #[tokio::test]
    async fn test_recommend_labels_are_exact() {
        let app = app().await;
        for uri in ["/recommend/Happy", "/recommend/HAPPY", "/recommend/%20happy%20"] {
            let (status, body) = send(&app, get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(message(&body).message, "Invalid emotion");
        }
    }

    #[tokio::test]
    async fn test_recommend_mixed_on_empty_dataset() {
        let app = app_with("name,year,movie_rated,run_length,genres,release_date,rating\n").await;
        let (status, body) = send(&app, get("/recommend/mixed")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&body).message, "Invalid emotion");
    }
}
