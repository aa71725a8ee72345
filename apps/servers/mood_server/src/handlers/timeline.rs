use crate::error::ApiError;
use crate::metrics::record_classification;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mood_engine::{score_entries, TimedText, TimelineEntry};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct TimelineRequest {
	pub entries: Vec<TimedText>,
}

#[instrument(name = "timeline", skip_all)]
pub async fn timeline(State(state): State<AppState>, payload: Result<Json<TimelineRequest>, JsonRejection>) -> Result<Json<Vec<TimelineEntry>>, ApiError> {
	let Json(request) = payload?;
	let timeline = score_entries(&*state.classifier, &request.entries).map_err(|error| ApiError::unprocessable_entity([("timestamp", error.to_string())]))?;

	for entry in &timeline {
		record_classification(entry.mood);
	}
	tracing::debug!(received = request.entries.len(), kept = timeline.len(), "timeline scored");
	Ok(Json(timeline))
}
