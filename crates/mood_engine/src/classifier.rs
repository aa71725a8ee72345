use crate::model::{ClassificationResult, ClassifiedMood, Sentiment};
use crate::sentiment::{LexiconScorer, SentimentScorer};
use tracing::{debug, instrument};

/// Explicit mood words, checked in order. The first key contained anywhere in
/// the normalized text decides the mood.
pub const KEYWORD_OVERRIDES: &[(&str, ClassifiedMood)] = &[
	("stressed", ClassifiedMood::Anxious),
	("stress", ClassifiedMood::Anxious),
	("tired", ClassifiedMood::Tired),
	("excited", ClassifiedMood::Excited),
	("sad", ClassifiedMood::Sad),
	("happy", ClassifiedMood::Happy),
	("joy", ClassifiedMood::Happy),
	("angry", ClassifiedMood::Frustrated),
	("mad", ClassifiedMood::Frustrated),
	("frustrated", ClassifiedMood::Frustrated),
	("grateful", ClassifiedMood::Grateful),
	("thankful", ClassifiedMood::Grateful),
	("calm", ClassifiedMood::Calm),
	("relaxed", ClassifiedMood::Calm),
	("bored", ClassifiedMood::Bored),
];

/// Polarity thresholds, evaluated top down. Anything below the last one is `sad`.
const POLARITY_BUCKETS: &[(f64, ClassifiedMood)] = &[
	(0.5, ClassifiedMood::Happy),
	(0.2, ClassifiedMood::Calm),
	(-0.2, ClassifiedMood::Neutral),
	(-0.4, ClassifiedMood::Bored),
	(-0.6, ClassifiedMood::Anxious),
];

pub struct MoodClassifier<S = LexiconScorer> {
	scorer: S,
}

impl MoodClassifier<LexiconScorer> {
	#[must_use]
	pub fn new() -> Self {
		Self { scorer: LexiconScorer::new() }
	}
}

impl Default for MoodClassifier<LexiconScorer> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: SentimentScorer> MoodClassifier<S> {
	pub const fn with_scorer(scorer: S) -> Self {
		Self { scorer }
	}

	#[instrument(name = "classify", skip_all, fields(len = text.len()))]
	pub fn classify(&self, text: &str) -> ClassificationResult {
		let normalized = text.to_lowercase();
		let normalized = normalized.trim();
		let polarity = self.scorer.score(normalized);

		let mood = match keyword_override(normalized) {
			Some((keyword, mood)) => {
				debug!(keyword, %mood, "keyword override");
				mood
			}
			None => mood_from_polarity(polarity),
		};

		ClassificationResult {
			mood,
			sentiment: Sentiment::from_polarity(polarity),
			confidence: round_to(polarity.abs(), 3),
		}
	}
}

fn keyword_override(text: &str) -> Option<(&'static str, ClassifiedMood)> {
	KEYWORD_OVERRIDES.iter().find(|(keyword, _)| text.contains(keyword)).copied()
}

#[must_use]
pub fn mood_from_polarity(polarity: f64) -> ClassifiedMood {
	POLARITY_BUCKETS
		.iter()
		.find(|(threshold, _)| polarity >= *threshold)
		.map_or(ClassifiedMood::Sad, |(_, mood)| *mood)
}

fn round_to(value: f64, places: i32) -> f64 {
	let factor = 10f64.powi(places);
	(value * factor).round() / factor
}
