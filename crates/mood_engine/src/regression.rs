pub mod additive;

pub use additive::{AdditiveModel, AdditiveRegressor, Seasonality, SeasonalityMode};

use crate::error::FitError;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
	pub date: NaiveDate,
	pub value: f64,
}

impl SeriesPoint {
	#[must_use]
	pub const fn new(date: NaiveDate, value: f64) -> Self {
		Self { date, value }
	}
}

/// A projected value for a day after the fitted series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
	pub date: NaiveDate,
	pub yhat: f64,
}

/// A seasonal time-series regression capability.
///
/// `fit` takes a series with strictly increasing, unique dates. `predict`
/// projects `horizon` consecutive days past the last fitted date.
pub trait SeasonalRegressor: Send + Sync {
	type Model: Send;

	fn fit(&self, series: &[SeriesPoint]) -> Result<Self::Model, FitError>;

	fn predict(&self, model: &Self::Model, horizon: usize) -> Result<Vec<Projection>, FitError>;
}
