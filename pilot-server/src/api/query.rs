use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;
use warp::{Rejection, Reply};

use crate::error::ApiError;
use crate::metrics;
use crate::models::{QueryRequest, QueryResponse};
use crate::orchestrator::Orchestrator;

pub async fn handle_query(
    request: QueryRequest,
    orchestrator: Arc<Orchestrator>,
) -> Result<impl Reply, Rejection> {
    let request_id = Uuid::new_v4();
    info!("Processing query [{}]: {}", request_id, request.query);

    match orchestrator.process(&request).await {
        Ok(response) => {
            metrics::QUERIES.with_label_values(&["ok"]).inc();
            info!("Query [{}] answered ({} chars)", request_id, response.len());
            Ok(warp::reply::json(&QueryResponse { response }))
        }
        Err(e) => {
            metrics::QUERIES.with_label_values(&["error"]).inc();
            error!("Query [{}] failed: {}", request_id, e);
            Err(warp::reject::custom(e))
        }
    }
}

pub async fn handle_metrics() -> Result<impl Reply, Rejection> {
    let (buffer, content_type) = metrics::render()
        .map_err(|e| warp::reject::custom(ApiError::InternalError(e.to_string())))?;
    Ok(warp::reply::with_header(buffer, "Content-Type", content_type))
}
