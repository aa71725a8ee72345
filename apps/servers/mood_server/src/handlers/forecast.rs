use crate::error::ApiError;
use crate::metrics::record_forecast;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mood_engine::{ForecastResult, MoodObservation, ObservationError};
use serde::Deserialize;
use tracing::instrument;

/// Wire form of one history point, e.g. `{"ds": "2024-07-09", "y": 6.5}`.
#[derive(Debug, Deserialize)]
pub struct HistoryEntry {
	pub ds: String,
	pub y: f64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
	pub history: Vec<HistoryEntry>,
}

#[instrument(name = "forecast", skip_all)]
pub async fn forecast(State(state): State<AppState>, payload: Result<Json<ForecastRequest>, JsonRejection>) -> Result<Json<ForecastResult>, ApiError> {
	let Json(request) = payload?;
	let history = parse_history(&request.history)?;
	let observations = history.len();

	let forecaster = state.forecaster.clone();
	let result = tokio::task::spawn_blocking(move || forecaster.forecast(&history)).await?;

	record_forecast(result.outcome, observations);
	tracing::info!(observations, outcome = result.outcome.as_str(), prediction = %result.prediction, "forecast served");
	Ok(Json(result))
}

/// Parses every entry, reporting all bad fields at once.
pub fn parse_history(entries: &[HistoryEntry]) -> Result<Vec<MoodObservation>, ApiError> {
	let mut history = Vec::with_capacity(entries.len());
	let mut errors = Vec::new();

	for (i, entry) in entries.iter().enumerate() {
		match MoodObservation::parse(&entry.ds, entry.y) {
			Ok(observation) => history.push(observation),
			Err(error) => {
				let field = match error {
					ObservationError::InvalidDate(_) => "ds",
					ObservationError::NonFiniteScore(_) => "y",
				};
				errors.push((format!("history[{i}].{field}"), error.to_string()));
			}
		}
	}

	if errors.is_empty() {
		Ok(history)
	} else {
		Err(ApiError::unprocessable_entity(errors))
	}
}
