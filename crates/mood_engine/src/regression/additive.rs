use super::{Projection, SeasonalRegressor, SeriesPoint};
use crate::error::FitError;
use chrono::{Datelike, Days, NaiveDate};
use nalgebra::{DMatrix, DVector};
use std::f64::consts::TAU;

const MIN_POINTS: usize = 2;
/// Spans needed before the automatic seasonalities switch on.
const WEEKLY_AUTO_SPAN_DAYS: i64 = 14;
const YEARLY_AUTO_SPAN_DAYS: i64 = 730;
/// Ridge on intercept and slope, only to keep the normal matrix conditioned.
const TREND_PENALTY: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonalityMode {
	/// Decided from the span of the fitted series.
	Auto,
	On,
	Off,
}

/// A Fourier seasonal component with period in days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seasonality {
	pub name: &'static str,
	pub period_days: f64,
	pub order: usize,
}

impl Seasonality {
	pub const DAILY: Self = Self {
		name: "daily",
		period_days: 1.0,
		order: 4,
	};
	pub const WEEKLY: Self = Self {
		name: "weekly",
		period_days: 7.0,
		order: 3,
	};
	pub const YEARLY: Self = Self {
		name: "yearly",
		period_days: 365.25,
		order: 10,
	};

	const fn columns(self) -> usize {
		2 * self.order
	}

	#[allow(clippy::cast_precision_loss)]
	fn push_features(self, day: f64, row: &mut Vec<f64>) {
		for n in 1..=self.order {
			let angle = TAU * n as f64 * day / self.period_days;
			row.push(angle.sin());
			row.push(angle.cos());
		}
	}
}

/// Additive regression `y = k + m·t + Σ seasonal(t)` fitted by ridge least squares.
///
/// Time is scaled to `[0, 1]` over the fitted span and values are scaled by
/// their largest magnitude. Seasonal coefficients carry a ridge penalty of
/// `1 / prior_scale²`.
#[derive(Debug, Clone)]
pub struct AdditiveRegressor {
	daily: SeasonalityMode,
	weekly: SeasonalityMode,
	yearly: SeasonalityMode,
	prior_scale: f64,
}

impl AdditiveRegressor {
	#[must_use]
	pub const fn new() -> Self {
		Self {
			daily: SeasonalityMode::Off,
			weekly: SeasonalityMode::Auto,
			yearly: SeasonalityMode::Auto,
			prior_scale: 10.0,
		}
	}

	/// On day-granular series every daily term is evaluated at the same phase,
	/// so it folds into the level rather than adding shape.
	#[must_use]
	pub const fn with_daily_seasonality(mut self, mode: SeasonalityMode) -> Self {
		self.daily = mode;
		self
	}

	#[must_use]
	pub const fn with_weekly_seasonality(mut self, mode: SeasonalityMode) -> Self {
		self.weekly = mode;
		self
	}

	#[must_use]
	pub const fn with_yearly_seasonality(mut self, mode: SeasonalityMode) -> Self {
		self.yearly = mode;
		self
	}

	#[must_use]
	pub fn with_prior_scale(mut self, prior_scale: f64) -> Self {
		if prior_scale.is_finite() && prior_scale > 0.0 {
			self.prior_scale = prior_scale;
		}
		self
	}

	fn active_seasonalities(&self, span_days: i64) -> Vec<Seasonality> {
		let enabled = |mode: SeasonalityMode, auto: bool| match mode {
			SeasonalityMode::On => true,
			SeasonalityMode::Off => false,
			SeasonalityMode::Auto => auto,
		};

		let mut active = Vec::new();
		// daily is only ever automatic for sub-daily data, which a date series never is
		if enabled(self.daily, false) {
			active.push(Seasonality::DAILY);
		}
		if enabled(self.weekly, span_days >= WEEKLY_AUTO_SPAN_DAYS) {
			active.push(Seasonality::WEEKLY);
		}
		if enabled(self.yearly, span_days >= YEARLY_AUTO_SPAN_DAYS) {
			active.push(Seasonality::YEARLY);
		}
		active
	}
}

impl Default for AdditiveRegressor {
	fn default() -> Self {
		Self::new()
	}
}

/// A fitted [`AdditiveRegressor`].
#[derive(Debug, Clone)]
pub struct AdditiveModel {
	start: NaiveDate,
	last: NaiveDate,
	span_days: f64,
	y_scale: f64,
	seasonalities: Vec<Seasonality>,
	coefficients: DVector<f64>,
}

impl AdditiveModel {
	#[must_use]
	pub const fn last_date(&self) -> NaiveDate {
		self.last
	}

	#[must_use]
	pub fn seasonalities(&self) -> &[Seasonality] {
		&self.seasonalities
	}

	/// Model value on `date`, in the original units of the series.
	#[must_use]
	pub fn evaluate(&self, date: NaiveDate) -> f64 {
		let row = DVector::from_vec(design_row(self.start, self.span_days, &self.seasonalities, date));
		row.dot(&self.coefficients) * self.y_scale
	}
}

#[allow(clippy::cast_precision_loss)]
fn design_row(start: NaiveDate, span_days: f64, seasonalities: &[Seasonality], date: NaiveDate) -> Vec<f64> {
	let elapsed = (date - start).num_days() as f64;
	let absolute_day = f64::from(date.num_days_from_ce());

	let mut row = Vec::with_capacity(2 + seasonalities.iter().map(|s| s.columns()).sum::<usize>());
	row.push(1.0);
	row.push(elapsed / span_days);
	for seasonality in seasonalities {
		seasonality.push_features(absolute_day, &mut row);
	}
	row
}

impl SeasonalRegressor for AdditiveRegressor {
	type Model = AdditiveModel;

	#[allow(clippy::cast_precision_loss)]
	fn fit(&self, series: &[SeriesPoint]) -> Result<Self::Model, FitError> {
		if series.len() < MIN_POINTS {
			return Err(FitError::TooFewPoints {
				required: MIN_POINTS,
				found: series.len(),
			});
		}
		if let Some(bad) = series.iter().find(|p| !p.value.is_finite()) {
			return Err(FitError::NonFiniteValue(bad.date));
		}
		if let Some(pair) = series.windows(2).find(|pair| pair[1].date <= pair[0].date) {
			return Err(FitError::UnorderedDates(pair[1].date));
		}

		let start = series[0].date;
		let last = series[series.len() - 1].date;
		let span = (last - start).num_days();
		let span_days = span as f64;

		let max_abs = series.iter().map(|p| p.value.abs()).fold(0.0, f64::max);
		let y_scale = if max_abs > 0.0 { max_abs } else { 1.0 };

		let seasonalities = self.active_seasonalities(span);
		let rows: Vec<f64> = series.iter().flat_map(|p| design_row(start, span_days, &seasonalities, p.date)).collect();
		let columns = rows.len() / series.len();

		let x = DMatrix::from_row_slice(series.len(), columns, &rows);
		let y = DVector::from_iterator(series.len(), series.iter().map(|p| p.value / y_scale));

		let xt = x.transpose();
		let mut normal = &xt * &x;
		let seasonal_penalty = 1.0 / (self.prior_scale * self.prior_scale);
		for j in 0..columns {
			normal[(j, j)] += if j < 2 { TREND_PENALTY } else { seasonal_penalty };
		}

		let coefficients = normal.cholesky().ok_or(FitError::Singular)?.solve(&(&xt * &y));
		if coefficients.iter().any(|c| !c.is_finite()) {
			return Err(FitError::Singular);
		}

		tracing::trace!(points = series.len(), columns, span, "additive model fitted");

		Ok(AdditiveModel {
			start,
			last,
			span_days,
			y_scale,
			seasonalities,
			coefficients,
		})
	}

	fn predict(&self, model: &Self::Model, horizon: usize) -> Result<Vec<Projection>, FitError> {
		if horizon == 0 {
			return Err(FitError::EmptyHorizon);
		}

		(1..=horizon as u64)
			.map(|ahead| {
				let date = model.last.checked_add_days(Days::new(ahead)).ok_or(FitError::DateOverflow(model.last))?;
				let yhat = model.evaluate(date);
				if yhat.is_finite() {
					Ok(Projection { date, yhat })
				} else {
					Err(FitError::NonFiniteProjection(date))
				}
			})
			.collect()
	}
}
