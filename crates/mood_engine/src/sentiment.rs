pub mod lexicon;

pub use lexicon::LexiconScorer;

/// A sentiment capability: turns text into a polarity in `[-1, 1]`.
///
/// Negative values are negative sentiment, magnitude is strength. Implementations
/// must be pure; the same text always scores the same.
pub trait SentimentScorer: Send + Sync {
	fn score(&self, text: &str) -> f64;
}

impl<T: SentimentScorer + ?Sized> SentimentScorer for Box<T> {
	fn score(&self, text: &str) -> f64 {
		(**self).score(text)
	}
}

impl<T: SentimentScorer + ?Sized> SentimentScorer for std::sync::Arc<T> {
	fn score(&self, text: &str) -> f64 {
		(**self).score(text)
	}
}
