use lazy_static::lazy_static;
use mood_engine::{ClassifiedMood, ForecastOutcome};
use prometheus::{register_histogram, register_int_counter_vec, Histogram, IntCounterVec};

lazy_static! {
	static ref CLASSIFICATIONS_TOTAL: IntCounterVec =
		register_int_counter_vec!("mood_classifications_total", "Texts classified, by resulting mood", &["mood"]).expect("Failed to register CLASSIFICATIONS_TOTAL");
	static ref FORECASTS_TOTAL: IntCounterVec =
		register_int_counter_vec!("mood_forecasts_total", "Forecasts served, by terminal state", &["outcome"]).expect("Failed to register FORECASTS_TOTAL");
	static ref FORECAST_HISTORY_SIZE: Histogram = register_histogram!(
		"mood_forecast_history_size",
		"Observations supplied per forecast request",
		vec![0.0, 5.0, 10.0, 30.0, 90.0, 365.0, 1000.0]
	)
	.expect("Failed to register FORECAST_HISTORY_SIZE");
}

pub fn record_classification(mood: ClassifiedMood) {
	CLASSIFICATIONS_TOTAL.with_label_values(&[mood.as_str()]).inc();
}

#[allow(clippy::cast_precision_loss)]
pub fn record_forecast(outcome: ForecastOutcome, history_len: usize) {
	FORECASTS_TOTAL.with_label_values(&[outcome.as_str()]).inc();
	FORECAST_HISTORY_SIZE.observe(history_len as f64);
}
