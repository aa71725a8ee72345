#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
	#[error("need at least {required} distinct dates to fit, found {found}")]
	TooFewPoints { required: usize, found: usize },

	#[error("series value on {0} is not finite")]
	NonFiniteValue(chrono::NaiveDate),

	#[error("series dates must be strictly increasing, {0} repeats or goes backwards")]
	UnorderedDates(chrono::NaiveDate),

	#[error("normal equations are not positive definite")]
	Singular,

	#[error("forecast horizon must be at least one day")]
	EmptyHorizon,

	#[error("projection for {0} is not finite")]
	NonFiniteProjection(chrono::NaiveDate),

	#[error("date arithmetic overflowed past {0}")]
	DateOverflow(chrono::NaiveDate),
}

/// Caller supplied history that cannot be turned into observations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObservationError {
	#[error("invalid date `{0}`, expected YYYY-MM-DD or an RFC 3339 timestamp")]
	InvalidDate(String),

	#[error("score {0} is not a finite number")]
	NonFiniteScore(f64),
}
