use crate::classifier::MoodClassifier;
use crate::error::ObservationError;
use crate::model::{parse_day, ClassifiedMood, MoodObservation, Sentiment};
use crate::sentiment::SentimentScorer;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

const MIN_TEXT_CHARS: usize = 5;
const MIN_TEXT_WORDS: usize = 3;
/// Classifications at or below this confidence carry too little signal to keep.
const MIN_CONFIDENCE: f64 = 0.1;
const REASON_EXCERPT_CHARS: usize = 100;

/// A user authored text with the moment it was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedText {
	pub text: String,
	pub timestamp: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
	pub timestamp: String,
	#[serde(skip)]
	pub date: NaiveDate,
	pub mood: ClassifiedMood,
	pub sentiment: Sentiment,
	pub confidence: f64,
	pub mood_score: u8,
	/// Where the mood came from, e.g. `chat entry: "long day but good..."`.
	pub reason: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
}

impl TimelineEntry {
	#[must_use]
	pub fn observation(&self) -> MoodObservation {
		MoodObservation::new(self.date, f64::from(self.mood_score))
	}
}

/// Classifies texts into a chronological mood timeline.
///
/// Texts too short to carry a mood and classifications without enough
/// polarity are dropped. A timestamp that cannot be parsed fails the batch.
pub fn score_entries<S: SentimentScorer>(classifier: &MoodClassifier<S>, entries: &[TimedText]) -> Result<Vec<TimelineEntry>, ObservationError> {
	let mut dated = entries
		.iter()
		.map(|entry| Ok((instant(&entry.timestamp)?, entry)))
		.collect::<Result<Vec<_>, ObservationError>>()?;
	dated.sort_by_key(|(at, _)| *at);

	let timeline = dated
		.into_iter()
		.filter(|(_, entry)| is_significant(&entry.text))
		.filter_map(|(at, entry)| {
			let text = entry.text.trim();
			let result = classifier.classify(text);
			(result.confidence > MIN_CONFIDENCE).then(|| TimelineEntry {
				timestamp: entry.timestamp.clone(),
				date: at.naive_utc().date(),
				mood: result.mood,
				sentiment: result.sentiment,
				confidence: result.confidence,
				mood_score: result.mood.score(),
				reason: reason(entry.source.as_deref(), text),
				source: entry.source.clone(),
			})
		})
		.collect();

	Ok(timeline)
}

/// Whether a text is long enough to classify.
#[must_use]
pub fn is_significant(text: &str) -> bool {
	let text = text.trim();
	text.chars().count() >= MIN_TEXT_CHARS && text.split_whitespace().count() >= MIN_TEXT_WORDS
}

fn reason(source: Option<&str>, text: &str) -> String {
	let excerpt: String = text.chars().take(REASON_EXCERPT_CHARS).collect();
	format!("{} entry: \"{excerpt}...\"", source.unwrap_or("text"))
}

fn instant(raw: &str) -> Result<DateTime<FixedOffset>, ObservationError> {
	if let Ok(at) = DateTime::parse_from_rfc3339(raw.trim()) {
		return Ok(at);
	}
	let day = parse_day(raw)?;
	Ok(day.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Fixed(f64);

	impl SentimentScorer for Fixed {
		fn score(&self, _text: &str) -> f64 {
			self.0
		}
	}

	fn text(text: &str, timestamp: &str) -> TimedText {
		TimedText {
			text: text.to_string(),
			timestamp: timestamp.to_string(),
			source: Some("journal".to_string()),
		}
	}

	#[test]
	fn drops_short_and_weak_texts() {
		let classifier = MoodClassifier::new();
		let entries = vec![
			text("sad", "2024-07-09T10:00:00Z"),
			text("so so sad", "2024-07-09T11:00:00Z"),
			text("the meeting is at noon", "2024-07-09T12:00:00Z"),
			text("feeling really good about today", "2024-07-09T13:00:00Z"),
		];
		let timeline = score_entries(&classifier, &entries).unwrap();
		assert_eq!(timeline.len(), 1);
		assert_eq!(timeline[0].mood, ClassifiedMood::Happy);
		assert_eq!(timeline[0].mood_score, 9);
	}

	#[test]
	fn orders_chronologically_and_builds_history() {
		let classifier = MoodClassifier::new();
		let entries = vec![
			text("this week was awful and terrible", "2024-07-11T08:00:00Z"),
			text("what a wonderful calm evening", "2024-07-09T20:00:00+02:00"),
		];
		let timeline = score_entries(&classifier, &entries).unwrap();
		let moods: Vec<_> = timeline.iter().map(|e| e.mood).collect();
		assert_eq!(moods, vec![ClassifiedMood::Calm, ClassifiedMood::Sad]);

		let history: Vec<_> = timeline.iter().map(TimelineEntry::observation).collect();
		assert_eq!(history[0], MoodObservation::new(NaiveDate::from_ymd_opt(2024, 7, 9).unwrap(), 7.0));
		assert_eq!(history[1].score, 2.0);
	}

	#[test]
	fn bad_timestamp_fails_the_batch() {
		let classifier = MoodClassifier::new();
		let entries = vec![text("a perfectly fine entry", "last tuesday")];
		assert!(matches!(score_entries(&classifier, &entries), Err(ObservationError::InvalidDate(_))));
	}

	#[test]
	fn significance_counts_words_and_chars() {
		assert!(!is_significant("  hi  "));
		assert!(!is_significant("two words"));
		assert!(is_significant("a b cde"));
		assert!(is_significant("a b c"));
		assert!(!is_significant("a bc"));
	}

	#[test]
	fn confidence_at_threshold_is_dropped() {
		let entries = vec![text("nothing much to report today", "2024-07-09T10:00:00Z")];

		let at_threshold = MoodClassifier::with_scorer(Fixed(0.1));
		assert!(score_entries(&at_threshold, &entries).unwrap().is_empty());

		let above = MoodClassifier::with_scorer(Fixed(0.101));
		assert_eq!(score_entries(&above, &entries).unwrap().len(), 1);
	}

	#[test]
	fn equal_timestamps_keep_input_order() {
		let classifier = MoodClassifier::with_scorer(Fixed(0.5));
		let entries = vec![
			text("rather bored right now", "2024-07-09T10:00:00Z"),
			text("feeling calm this morning", "2024-07-09T10:00:00Z"),
			text("so thankful for friends", "2024-07-09T12:00:00+02:00"),
		];
		let moods: Vec<_> = score_entries(&classifier, &entries).unwrap().iter().map(|e| e.mood).collect();
		assert_eq!(moods, vec![ClassifiedMood::Bored, ClassifiedMood::Calm, ClassifiedMood::Grateful]);
	}

	#[test]
	fn reason_quotes_the_start_of_the_text() {
		let classifier = MoodClassifier::with_scorer(Fixed(0.5));
		let long = format!("  {}  ", "good ".repeat(30));
		let entries = vec![
			text(&long, "2024-07-09T10:00:00Z"),
			TimedText {
				text: "a calm quiet day".to_string(),
				timestamp: "2024-07-10".to_string(),
				source: None,
			},
		];
		let timeline = score_entries(&classifier, &entries).unwrap();

		let expected = format!("journal entry: \"{}...\"", &long.trim()[..100]);
		assert_eq!(timeline[0].reason, expected);
		assert_eq!(timeline[1].reason, "text entry: \"a calm quiet day...\"");
	}
}
