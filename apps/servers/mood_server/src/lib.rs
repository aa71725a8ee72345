pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod metrics;
pub mod routes;

pub use config::Config;
pub use error::ApiError;
pub use health::perform_health_check;

use crate::metrics::{metrics_handler, metrics_middleware};
use crate::routes::{health::get_health, mood::mood_routes};
use axum::{error_handling::HandleErrorLayer, routing::get, Router};
use mood_engine::{MoodClassifier, MoodForecaster};
use std::sync::Arc;
use std::time::Duration;
use tower::{limit::ConcurrencyLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer, BoxError, ServiceBuilder};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{filter::EnvFilter, fmt::format::JsonFields, util::SubscriberInitExt, Layer};

const DEFAULT_LOG_FILTER: &str = "mood_server=info,mood_engine=info,tower_http=info";

#[derive(Clone)]
pub struct AppState {
	pub classifier: Arc<MoodClassifier>,
	pub forecaster: Arc<MoodForecaster>,
	pub config: Arc<Config>,
}

impl AppState {
	#[must_use]
	pub fn new(config: Config) -> Self {
		Self {
			classifier: Arc::new(MoodClassifier::new()),
			forecaster: Arc::new(MoodForecaster::new().with_min_history(config.min_history)),
			config: Arc::new(config),
		}
	}
}

async fn handle_tower_error(error: BoxError) -> ApiError {
	if error.is::<tower::timeout::error::Elapsed>() {
		tracing::warn!("Request timeout: {}", error);
		ApiError::RequestTimeout
	} else if error.is::<tower::load_shed::error::Overloaded>() {
		tracing::warn!("Service overloaded: {}", error);
		ApiError::ServiceOverloaded
	} else {
		tracing::error!("Unhandled tower error: {}", error);
		ApiError::TowerError(error)
	}
}

/// Builds the full router: mood endpoints, health, and metrics behind the shared middleware stack.
pub fn app(state: AppState) -> Router {
	let config = state.config.clone();

	let routes = Router::new()
		.merge(mood_routes(&config))
		.merge(get_health())
		.route("/metrics", get(metrics_handler))
		.with_state(state)
		.layer(axum::middleware::from_fn(metrics_middleware));

	// Wrapped once around the whole router so every route draws on the same concurrency budget.
	let middleware = ServiceBuilder::new()
		.layer(TraceLayer::new_for_http())
		.layer(HandleErrorLayer::<_, ()>::new(handle_tower_error))
		.layer(RequestBodyLimitLayer::new(config.max_request_size * 1024))
		.layer(LoadShedLayer::new())
		.layer(ConcurrencyLimitLayer::new(config.max_concurrent_req))
		.layer(TimeoutLayer::new(Duration::from_millis(config.task_timeout_ms)));

	Router::new().fallback_service(middleware.service(routes))
}

pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
	use tracing_subscriber::layer::SubscriberExt;

	let filter = EnvFilter::try_new(config.rust_log.as_deref().unwrap_or(DEFAULT_LOG_FILTER))?;

	tracing_subscriber::registry()
		.with(if config.log_json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.fmt_fields(JsonFields::default())
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(
				tracing_subscriber::fmt::layer()
					.event_format(tracing_subscriber::fmt::format().pretty())
					.with_filter(filter),
			)
		})
		.try_init()?;
	Ok(())
}
