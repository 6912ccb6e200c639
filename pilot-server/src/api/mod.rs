use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

use crate::error::handle_rejection;
use crate::middleware;
use crate::orchestrator::Orchestrator;

mod query;

/// Upper bound on request bodies; history is the only unbounded field.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

pub fn routes(
    orchestrator: Arc<Orchestrator>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let query_route = warp::path("process-query")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_orchestrator(orchestrator))
        .and_then(query::handle_query);

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({"status": "healthy"})));

    let metrics = warp::path("metrics")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(query::handle_metrics);

    health
        .or(metrics)
        .or(query_route)
        .recover(handle_rejection)
        .with(warp::log("api"))
        .with(middleware::cors())
}

fn with_orchestrator(
    orchestrator: Arc<Orchestrator>,
) -> impl Filter<Extract = (Arc<Orchestrator>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || orchestrator.clone())
}
