use crate::error::ObservationError;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence reported for a model-based forecast.
pub const MODEL_CONFIDENCE: f64 = 0.7;
/// Confidence reported when the forecast degraded (too little data or a failed fit).
pub const DEGRADED_CONFIDENCE: f64 = 0.4;

/// Score used for moods that have no dedicated score.
const NEUTRAL_SCORE: u8 = 5;

/// The closed set of labels a numeric mood score can be banded into, in band order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
	Frustrated,
	Anxious,
	Bored,
	Neutral,
	Calm,
	Grateful,
	Happy,
}

impl MoodLabel {
	pub const ALL: [Self; 7] = [Self::Frustrated, Self::Anxious, Self::Bored, Self::Neutral, Self::Calm, Self::Grateful, Self::Happy];

	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Frustrated => "frustrated",
			Self::Anxious => "anxious",
			Self::Bored => "bored",
			Self::Neutral => "neutral",
			Self::Calm => "calm",
			Self::Grateful => "grateful",
			Self::Happy => "happy",
		}
	}

	/// Canonical score used when a label is turned back into a history point.
	#[must_use]
	pub const fn score(self) -> u8 {
		match self {
			Self::Frustrated => 1,
			Self::Anxious => 3,
			Self::Bored => 4,
			Self::Neutral => NEUTRAL_SCORE,
			Self::Calm => 7,
			Self::Grateful => 8,
			Self::Happy => 9,
		}
	}
}

impl fmt::Display for MoodLabel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Everything the classifier may answer with: the banded labels plus the
/// keyword-only moods `excited`, `tired` and `sad`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifiedMood {
	Frustrated,
	Anxious,
	Bored,
	Neutral,
	Calm,
	Grateful,
	Happy,
	Excited,
	Tired,
	Sad,
}

impl ClassifiedMood {
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Excited => "excited",
			Self::Tired => "tired",
			Self::Sad => "sad",
			other => match other.as_label() {
				Some(label) => label.as_str(),
				None => "neutral",
			},
		}
	}

	#[must_use]
	pub const fn as_label(self) -> Option<MoodLabel> {
		match self {
			Self::Frustrated => Some(MoodLabel::Frustrated),
			Self::Anxious => Some(MoodLabel::Anxious),
			Self::Bored => Some(MoodLabel::Bored),
			Self::Neutral => Some(MoodLabel::Neutral),
			Self::Calm => Some(MoodLabel::Calm),
			Self::Grateful => Some(MoodLabel::Grateful),
			Self::Happy => Some(MoodLabel::Happy),
			Self::Excited | Self::Tired | Self::Sad => None,
		}
	}

	/// `excited` has no score of its own and counts as neutral.
	#[must_use]
	pub const fn score(self) -> u8 {
		match self {
			Self::Tired => 3,
			Self::Sad => 2,
			Self::Excited => NEUTRAL_SCORE,
			other => match other.as_label() {
				Some(label) => label.score(),
				None => NEUTRAL_SCORE,
			},
		}
	}
}

impl From<MoodLabel> for ClassifiedMood {
	fn from(label: MoodLabel) -> Self {
		match label {
			MoodLabel::Frustrated => Self::Frustrated,
			MoodLabel::Anxious => Self::Anxious,
			MoodLabel::Bored => Self::Bored,
			MoodLabel::Neutral => Self::Neutral,
			MoodLabel::Calm => Self::Calm,
			MoodLabel::Grateful => Self::Grateful,
			MoodLabel::Happy => Self::Happy,
		}
	}
}

impl fmt::Display for ClassifiedMood {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
	Positive,
	Negative,
	Neutral,
}

impl Sentiment {
	#[must_use]
	pub fn from_polarity(polarity: f64) -> Self {
		if polarity > 0.0 {
			Self::Positive
		} else if polarity < 0.0 {
			Self::Negative
		} else {
			Self::Neutral
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
	pub mood: ClassifiedMood,
	pub sentiment: Sentiment,
	pub confidence: f64,
}

/// One caller supplied history point. Serialized as `{ds, y}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodObservation {
	#[serde(rename = "ds")]
	pub date: NaiveDate,
	#[serde(rename = "y")]
	pub score: f64,
}

impl MoodObservation {
	#[must_use]
	pub const fn new(date: NaiveDate, score: f64) -> Self {
		Self { date, score }
	}

	/// Builds an observation from its wire form. `ds` may be a calendar date or
	/// an RFC 3339 timestamp, which is truncated to its UTC date.
	pub fn parse(ds: &str, y: f64) -> Result<Self, ObservationError> {
		let date = parse_day(ds)?;
		if !y.is_finite() {
			return Err(ObservationError::NonFiniteScore(y));
		}
		Ok(Self { date, score: y })
	}
}

pub(crate) fn parse_day(raw: &str) -> Result<NaiveDate, ObservationError> {
	let raw = raw.trim();
	if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
		return Ok(date);
	}
	DateTime::parse_from_rfc3339(raw)
		.map(|ts| ts.naive_utc().date())
		.map_err(|_| ObservationError::InvalidDate(raw.to_string()))
}

/// Mean score of every observation that fell on `date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyAggregate {
	pub date: NaiveDate,
	pub value: f64,
	pub count: usize,
}

/// Which terminal state of the forecast state machine produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastOutcome {
	InsufficientData,
	Model,
	Fallback,
}

impl ForecastOutcome {
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::InsufficientData => "insufficient_data",
			Self::Model => "model",
			Self::Fallback => "fallback",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
	pub prediction: MoodLabel,
	pub confidence: f64,
	pub reason: String,
	#[serde(rename = "moodScore", skip_serializing_if = "Option::is_none")]
	pub mood_score: Option<u8>,
	#[serde(skip)]
	pub outcome: ForecastOutcome,
}

impl ForecastResult {
	#[must_use]
	pub fn insufficient_data() -> Self {
		Self {
			prediction: MoodLabel::Neutral,
			confidence: DEGRADED_CONFIDENCE,
			reason: "not enough data".to_string(),
			mood_score: None,
			outcome: ForecastOutcome::InsufficientData,
		}
	}

	#[must_use]
	pub fn from_model(prediction: MoodLabel, score: u8) -> Self {
		Self {
			prediction,
			confidence: MODEL_CONFIDENCE,
			reason: format!("predicted from trend, score={score}"),
			mood_score: Some(score),
			outcome: ForecastOutcome::Model,
		}
	}

	#[must_use]
	pub fn from_average(prediction: MoodLabel, score: u8) -> Self {
		Self {
			prediction,
			confidence: DEGRADED_CONFIDENCE,
			reason: "forecast failed, used average".to_string(),
			mood_score: Some(score),
			outcome: ForecastOutcome::Fallback,
		}
	}
}
