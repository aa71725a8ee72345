use crate::handlers::{analyze, forecast, timeline};
use crate::{AppState, Config};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::post;
use axum::{extract::FromRef, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub fn mood_routes<S>(config: &Config) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	let cors = CorsLayer::new()
		.allow_origin(allowed_origins(config))
		.allow_methods([Method::POST, Method::OPTIONS])
		.allow_headers([CONTENT_TYPE]);

	Router::new()
		.route("/analyze", post(analyze::analyze))
		.route("/forecast", post(forecast::forecast))
		.route("/timeline", post(timeline::timeline))
		.layer(cors)
}

fn allowed_origins(config: &Config) -> AllowOrigin {
	let origins = config.origins();
	if origins.contains(&"*") {
		return Any.into();
	}

	let parsed: Vec<HeaderValue> = origins
		.into_iter()
		.filter_map(|origin| match origin.parse::<HeaderValue>() {
			Ok(value) => Some(value),
			Err(_) => {
				tracing::warn!(origin, "ignoring malformed CORS origin");
				None
			}
		})
		.collect();
	AllowOrigin::list(parsed)
}

