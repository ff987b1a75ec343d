//! HTTP surface: request validation, handlers and the router.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::sentiment::SentimentContext;

pub struct AppState {
    pub context: SentimentContext,
}

#[derive(OpenApi)]
#[openapi(
    paths(hello, get_sentiment),
    components(schemas(
        SentimentRequest,
        SentimentResponse,
        SentimentResults,
        ErrorResponse,
        HelloResponse
    )),
    tags((name = "sentiment", description = "Thai sentiment classification"))
)]
pub struct ApiDoc;

/// Documented request shape. The handler reads the raw JSON so it can
/// tell a missing field from a mistyped one.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SentimentRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SentimentResults {
    pub sentiment: String,
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SentimentResponse {
    pub status_code: u16,
    pub results: SentimentResults,
    /// The submitted text, echoed back.
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HelloResponse {
    pub message: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("'{0}' key is not found")]
    MissingField(String),
    #[error("Input should be string")]
    InvalidType,
}

/// User-facing 4xx error.
#[derive(Debug)]
pub struct InvalidUsage {
    pub status: StatusCode,
    pub message: String,
}

impl From<ValidationError> for InvalidUsage {
    fn from(err: ValidationError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for InvalidUsage {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status_code: self.status.as_u16(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Pull the `text` field out of a request body.
pub fn validate_request(body: &Value) -> Result<&str, ValidationError> {
    let field = body
        .get("text")
        .ok_or_else(|| ValidationError::MissingField("text".to_string()))?;
    field.as_str().ok_or(ValidationError::InvalidType)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/sentiment-swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/hello", get(hello))
        .route("/sentiment", post(get_sentiment))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/hello",
    responses((status = 200, description = "Service is up", body = HelloResponse)),
    tag = "sentiment"
)]
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello Sentiment API".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/sentiment",
    request_body = SentimentRequest,
    responses(
        (status = 200, description = "Predicted sentiment", body = SentimentResponse),
        (status = 400, description = "Missing or non-string text", body = ErrorResponse)
    ),
    tag = "sentiment"
)]
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn get_sentiment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<SentimentResponse>, InvalidUsage> {
    let text = validate_request(&body).map_err(|e| {
        tracing::error!("{}", e);
        InvalidUsage::from(e)
    })?;

    let result = state.context.classify(text);
    tracing::info!("Classified as {} ({})", result.label, result.score);

    Ok(Json(SentimentResponse {
        status_code: StatusCode::OK.as_u16(),
        results: SentimentResults {
            sentiment: result.label,
            score: result.score,
        },
        message: text.to_string(),
    }))
}
