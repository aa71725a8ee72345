use crate::bander::{band, clamp_round};
use crate::error::FitError;
use crate::model::{DailyAggregate, ForecastResult, MoodObservation};
use crate::regression::{AdditiveRegressor, SeasonalRegressor, SeasonalityMode, SeriesPoint};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Histories shorter than this are answered without fitting.
pub const MIN_HISTORY: usize = 5;

/// Days projected past the last observation.
const FORECAST_HORIZON: usize = 1;

pub struct MoodForecaster<R = AdditiveRegressor> {
	regressor: R,
	min_history: usize,
}

impl MoodForecaster<AdditiveRegressor> {
	/// Forecaster backed by the additive regressor with daily seasonality on.
	#[must_use]
	pub const fn new() -> Self {
		Self::with_regressor(AdditiveRegressor::new().with_daily_seasonality(SeasonalityMode::On))
	}
}

impl Default for MoodForecaster<AdditiveRegressor> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R: SeasonalRegressor> MoodForecaster<R> {
	pub const fn with_regressor(regressor: R) -> Self {
		Self {
			regressor,
			min_history: MIN_HISTORY,
		}
	}

	/// Overrides the insufficient-data threshold. Values below 1 are raised to 1.
	#[must_use]
	pub fn with_min_history(mut self, min_history: usize) -> Self {
		self.min_history = min_history.max(1);
		self
	}

	/// Forecasts tomorrow's mood. Never fails: short histories and failed fits
	/// both come back as low-confidence results.
	#[instrument(name = "forecast", skip_all, fields(observations = history.len()))]
	pub fn forecast(&self, history: &[MoodObservation]) -> ForecastResult {
		if history.len() < self.min_history {
			debug!(required = self.min_history, "not enough history to forecast");
			return ForecastResult::insufficient_data();
		}

		let daily = aggregate_daily(history);
		match self.project(&daily) {
			Ok(projected) => {
				let score = clamp_round(projected);
				debug!(projected, score, "forecast from model");
				ForecastResult::from_model(band(f64::from(score)), score)
			}
			Err(error) => {
				warn!(%error, days = daily.len(), "forecast fit failed, falling back to average");
				fallback(history)
			}
		}
	}

	fn project(&self, daily: &[DailyAggregate]) -> Result<f64, FitError> {
		let series: Vec<SeriesPoint> = daily.iter().map(|d| SeriesPoint::new(d.date, d.value)).collect();
		let model = self.regressor.fit(&series)?;
		let projection = self.regressor.predict(&model, FORECAST_HORIZON)?;
		projection.last().map(|p| p.yhat).ok_or(FitError::EmptyHorizon)
	}
}

/// Collapses observations to one mean per date, sorted by date.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate_daily(history: &[MoodObservation]) -> Vec<DailyAggregate> {
	let mut by_date: BTreeMap<_, (f64, usize)> = BTreeMap::new();
	for observation in history {
		let entry = by_date.entry(observation.date).or_insert((0.0, 0));
		entry.0 += observation.score;
		entry.1 += 1;
	}

	by_date
		.into_iter()
		.map(|(date, (sum, count))| DailyAggregate {
			date,
			value: sum / count as f64,
			count,
		})
		.collect()
}

#[allow(clippy::cast_precision_loss)]
fn fallback(history: &[MoodObservation]) -> ForecastResult {
	let mean = history.iter().map(|o| o.score).sum::<f64>() / history.len() as f64;
	let score = clamp_round(mean);
	ForecastResult::from_average(band(f64::from(score)), score)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{ForecastOutcome, MoodLabel};
	use crate::regression::Projection;
	use chrono::{Days, NaiveDate};

	fn day(offset: u64) -> NaiveDate {
		NaiveDate::from_ymd_opt(2024, 7, 9).unwrap() + Days::new(offset)
	}

	fn obs(offset: u64, score: f64) -> MoodObservation {
		MoodObservation::new(day(offset), score)
	}

	struct Failing;

	impl SeasonalRegressor for Failing {
		type Model = ();

		fn fit(&self, _series: &[SeriesPoint]) -> Result<(), FitError> {
			Err(FitError::Singular)
		}

		fn predict(&self, _model: &(), _horizon: usize) -> Result<Vec<Projection>, FitError> {
			unreachable!("fit never succeeds")
		}
	}

	struct Constant(f64);

	impl SeasonalRegressor for Constant {
		type Model = NaiveDate;

		fn fit(&self, series: &[SeriesPoint]) -> Result<NaiveDate, FitError> {
			series.last().map(|p| p.date).ok_or(FitError::TooFewPoints { required: 1, found: 0 })
		}

		fn predict(&self, last: &NaiveDate, horizon: usize) -> Result<Vec<Projection>, FitError> {
			Ok((1..=horizon as u64).map(|k| Projection { date: *last + Days::new(k), yhat: self.0 }).collect())
		}
	}

	#[test]
	fn empty_history_is_insufficient() {
		let result = MoodForecaster::new().forecast(&[]);
		assert_eq!(result, ForecastResult::insufficient_data());
		assert_eq!(result.outcome, ForecastOutcome::InsufficientData);
		assert!(result.mood_score.is_none());
	}

	#[test]
	fn four_observations_are_insufficient() {
		let history: Vec<_> = (0..4).map(|i| obs(i, 7.0)).collect();
		assert_eq!(MoodForecaster::new().forecast(&history).reason, "not enough data");
	}

	#[test]
	fn threshold_counts_raw_observations_not_days() {
		let history: Vec<_> = (0..5).map(|_| obs(0, 6.0)).collect();
		let result = MoodForecaster::with_regressor(Constant(2.0)).forecast(&history);
		assert_eq!(result.outcome, ForecastOutcome::Model);
	}

	#[test]
	fn model_projection_is_clamped_and_banded() {
		let history: Vec<_> = (0..5).map(|i| obs(i, 5.0)).collect();

		let high = MoodForecaster::with_regressor(Constant(14.2)).forecast(&history);
		assert_eq!(high.prediction, MoodLabel::Happy);
		assert_eq!(high.mood_score, Some(9));
		assert!((high.confidence - 0.7).abs() < f64::EPSILON);
		assert_eq!(high.reason, "predicted from trend, score=9");

		let low = MoodForecaster::with_regressor(Constant(-3.0)).forecast(&history);
		assert_eq!(low.prediction, MoodLabel::Frustrated);
		assert_eq!(low.mood_score, Some(0));

		let mid = MoodForecaster::with_regressor(Constant(5.6)).forecast(&history);
		assert_eq!(mid.prediction, MoodLabel::Calm);
		assert_eq!(mid.mood_score, Some(6));
	}

	#[test]
	fn fit_failure_falls_back_to_clamped_mean() {
		let history = vec![obs(0, 2.0), obs(1, 3.0), obs(2, 4.0), obs(3, 3.0), obs(4, 3.0)];
		let result = MoodForecaster::with_regressor(Failing).forecast(&history);
		assert_eq!(result.outcome, ForecastOutcome::Fallback);
		assert_eq!(result.prediction, MoodLabel::Bored);
		assert_eq!(result.mood_score, Some(3));
		assert!((result.confidence - 0.4).abs() < f64::EPSILON);
		assert_eq!(result.reason, "forecast failed, used average");
	}

	#[test]
	fn single_date_history_falls_back() {
		let history = vec![obs(0, 6.0), obs(0, 8.0), obs(0, 7.0), obs(0, 9.0), obs(0, 8.0)];
		let result = MoodForecaster::new().forecast(&history);
		assert_eq!(result.outcome, ForecastOutcome::Fallback);
		assert_eq!(result.mood_score, Some(8));
		assert_eq!(result.prediction, MoodLabel::Grateful);
	}

	#[test]
	fn constant_nines_forecast_happy() {
		let spread: Vec<_> = (0..5).map(|i| obs(i, 9.0)).collect();
		let result = MoodForecaster::new().forecast(&spread);
		assert_eq!(result.outcome, ForecastOutcome::Model);
		assert_eq!(result.prediction, MoodLabel::Happy);
		assert_eq!(result.mood_score, Some(9));

		let same_day: Vec<_> = (0..5).map(|_| obs(3, 9.0)).collect();
		let result = MoodForecaster::new().forecast(&same_day);
		assert_eq!(result.outcome, ForecastOutcome::Fallback);
		assert_eq!(result.prediction, MoodLabel::Happy);
		assert_eq!(result.mood_score, Some(9));
	}

	#[test]
	fn rising_trend_projects_upward() {
		let history = vec![obs(4, 6.0), obs(0, 2.0), obs(2, 4.0), obs(1, 3.0), obs(3, 5.0)];
		let result = MoodForecaster::new().forecast(&history);
		assert_eq!(result.outcome, ForecastOutcome::Model);
		assert_eq!(result.mood_score, Some(7));
		assert_eq!(result.prediction, MoodLabel::Grateful);
	}

	#[test]
	fn aggregates_by_date_in_order() {
		let history = vec![obs(2, 4.0), obs(0, 1.0), obs(2, 6.0), obs(0, 3.0), obs(1, 5.0)];
		let daily = aggregate_daily(&history);
		let summary: Vec<_> = daily.iter().map(|d| (d.date, d.value, d.count)).collect();
		assert_eq!(summary, vec![(day(0), 2.0, 2), (day(1), 5.0, 1), (day(2), 5.0, 2)]);
	}

	#[test]
	fn forecasting_is_repeatable() {
		let history: Vec<_> = (0..10).map(|i| obs(i, f64::from(u32::try_from(i % 4).unwrap()) + 4.0)).collect();
		let forecaster = MoodForecaster::new();
		assert_eq!(forecaster.forecast(&history), forecaster.forecast(&history));
	}

	#[test]
	fn custom_threshold_applies() {
		let history: Vec<_> = (0..3).map(|i| obs(i, 5.0)).collect();
		let result = MoodForecaster::with_regressor(Constant(5.0)).with_min_history(3).forecast(&history);
		assert_eq!(result.outcome, ForecastOutcome::Model);
		assert_eq!(result.prediction, MoodLabel::Neutral);
	}
}
