use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and the reference
/// data source in use.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let reference_data = match &state.config.data_dir {
        Some(dir) => dir.display().to_string(),
        None => "builtin".to_string(),
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "career-planner",
        "reference_data": reference_data,
        "default_timeframe_years": state.config.default_timeframe_years
    }))
}
