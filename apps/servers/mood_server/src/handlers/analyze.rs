use crate::error::ApiError;
use crate::metrics::record_classification;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mood_engine::ClassificationResult;
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
	pub text: String,
}

#[instrument(name = "analyze", skip_all)]
pub async fn analyze(State(state): State<AppState>, payload: Result<Json<AnalyzeRequest>, JsonRejection>) -> Result<Json<ClassificationResult>, ApiError> {
	let Json(request) = payload?;
	let result = state.classifier.classify(&request.text);
	record_classification(result.mood);
	tracing::debug!(mood = %result.mood, confidence = result.confidence, "text classified");
	Ok(Json(result))
}
