use thiserror::Error;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::{reject::Reject, Rejection, Reply};

use crate::llm::LlmError;

/// Why the planner's reply could not be turned into a plan.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("No valid JSON block found in LLM response")]
    NoJsonBlock,

    #[error("Invalid JSON in plan block: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("Gemini error: {0}")]
    Llm(#[from] LlmError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl Reject for ApiError {}

pub type Result<T> = std::result::Result<T, ApiError>;

pub async fn handle_rejection(err: Rejection) -> std::result::Result<impl Reply, Rejection> {
    let (code, detail) = if let Some(api_err) = err.find::<ApiError>() {
        let code = match api_err {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (code, api_err.to_string())
    } else if let Some(body_err) = err.find::<BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, body_err.to_string())
    } else {
        return Err(err);
    };

    let json = warp::reply::json(&serde_json::json!({ "detail": detail }));
    Ok(warp::reply::with_status(json, code))
}
