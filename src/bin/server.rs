use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use lifegrid::config::SimConfig;
use lifegrid::engine::live_count;
use lifegrid::render;
use lifegrid::{CellState, Grid};

const MAX_STEPS: usize = 1000;
const MAX_CELLS: usize = 256 * 256;

#[derive(Deserialize)]
struct SimulateRequest {
    board: Vec<Vec<f64>>,
    steps: Option<usize>,
    scale: Option<u32>,
}

#[derive(Serialize)]
struct SimulateResponse {
    frames: Vec<Frame>,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct Frame {
    step: usize,
    live: usize,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, msg: impl ToString) -> ApiError {
    (status, Json(ErrorBody { error: msg.to_string() }))
}

fn encode_frame(board: &Grid<CellState>, scale: u32) -> Result<String, image::ImageError> {
    let (w, h) = render::pixel_size(board, scale);
    let png = render::encode_png(&render::render_board(board, scale), w, h)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&png);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn run(req: SimulateRequest) -> Result<SimulateResponse, ApiError> {
    let steps = req.steps.unwrap_or(10).min(MAX_STEPS);
    let scale = req.scale.unwrap_or(8).clamp(1, 32);

    let cells = req.board.len() * req.board.iter().map(Vec::len).max().unwrap_or(0);
    if cells > MAX_CELLS {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("board has {cells} cells, limit is {MAX_CELLS}"),
        ));
    }

    // Frames are encoded as they arrive; only the PNG text is kept.
    let mut frames: Vec<Frame> = Vec::with_capacity(steps + 1);
    let mut encode_err: Option<image::ImageError> = None;
    let (engine, timings) = lifegrid::simulate(
        SimConfig::new(req.board),
        steps,
        |board: &Grid<CellState>, step: usize| {
            if encode_err.is_some() {
                return;
            }
            match encode_frame(board, scale) {
                Ok(data_url) => frames.push(Frame {
                    step,
                    live: live_count(board),
                    data_url,
                }),
                Err(e) => encode_err = Some(e),
            }
        },
    )
    .map_err(|e| api_error(StatusCode::UNPROCESSABLE_ENTITY, e))?;
    let (width, height) = (engine.board().w, engine.board().h);
    drop(engine);

    if let Some(e) = encode_err {
        log::error!("PNG encode failed: {e}");
        return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e));
    }

    let timings = timings
        .iter()
        .map(|t| TimingEntry {
            name: t.name.to_string(),
            ms: t.ms,
        })
        .collect();

    Ok(SimulateResponse {
        frames,
        timings,
        width,
        height,
    })
}

async fn simulate_handler(
    Json(req): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || run(req))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))??;
    log::info!(
        "simulated {}x{} board, {} frames",
        response.height,
        response.width,
        response.frames.len()
    );
    Ok(Json(response))
}

fn app() -> Router {
    Router::new()
        .route("/api/simulate", post(simulate_handler))
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    log::info!("lifegrid server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app()).await.unwrap();
}
