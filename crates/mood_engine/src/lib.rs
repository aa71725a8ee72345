pub mod bander;
pub mod classifier;
pub mod error;
pub mod forecaster;
pub mod model;
pub mod regression;
pub mod sentiment;
pub mod timeline;

pub use bander::{band, clamp_round, MOOD_BANDS};
pub use classifier::{MoodClassifier, KEYWORD_OVERRIDES};
pub use error::{FitError, ObservationError};
pub use forecaster::{aggregate_daily, MoodForecaster, MIN_HISTORY};
pub use model::*;
pub use regression::{AdditiveRegressor, SeasonalRegressor};
pub use sentiment::{LexiconScorer, SentimentScorer};
pub use timeline::{score_entries, TimedText, TimelineEntry};
