use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use log::{error, info};

use crate::data::{TimetableInput, TimetableOutput};
use crate::solver::{self, SolveError};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

async fn generate_handler(
    Json(input): Json<TimetableInput>,
) -> Result<Json<TimetableOutput>, (StatusCode, String)> {
    // placement is CPU-bound; keep it off the async workers
    let result = tokio::task::spawn_blocking(move || solver::solve(&input))
        .await
        .map_err(|e| {
            error!("Timetable task panicked: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    match result {
        Ok(output) => Ok(Json(output)),
        Err(e @ SolveError::InvalidInput(_)) => Err((StatusCode::BAD_REQUEST, e.to_string())),
        Err(e) => {
            error!("Timetable generation failed: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

pub fn router() -> Router {
    Router::new().route("/v1/timetable/generate", post(generate_handler))
}

pub async fn run_server(addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router()).await
}
