use super::SentimentScorer;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// Scaling applied to a word preceded by a negation.
const NEGATION_FACTOR: f64 = -0.5;
/// How many tokens back a negation still applies.
const NEGATION_WINDOW: usize = 3;

const POLAR_WORDS: &[(&str, f64)] = &[
	// positive
	("good", 0.7),
	("great", 0.8),
	("excellent", 1.0),
	("amazing", 0.6),
	("awesome", 1.0),
	("wonderful", 1.0),
	("fantastic", 0.4),
	("perfect", 1.0),
	("best", 1.0),
	("better", 0.5),
	("beautiful", 0.85),
	("lovely", 0.5),
	("love", 0.5),
	("loved", 0.7),
	("nice", 0.6),
	("glad", 0.5),
	("pleased", 0.5),
	("proud", 0.8),
	("delighted", 0.7),
	("cheerful", 0.8),
	("hopeful", 0.4),
	("peaceful", 0.5),
	("fun", 0.3),
	("fine", 0.4),
	("okay", 0.5),
	("ok", 0.5),
	("positive", 0.23),
	("optimistic", 0.5),
	("productive", 0.4),
	("energized", 0.5),
	("motivated", 0.4),
	("confident", 0.5),
	("blessed", 0.6),
	("content", 0.3),
	("enjoyed", 0.4),
	("enjoy", 0.4),
	("smile", 0.3),
	("win", 0.8),
	("success", 0.3),
	("successful", 0.75),
	("comfortable", 0.4),
	("safe", 0.5),
	("free", 0.4),
	("interesting", 0.5),
	("cool", 0.35),
	// negative
	("bad", -0.7),
	("terrible", -1.0),
	("awful", -1.0),
	("horrible", -1.0),
	("worst", -1.0),
	("worse", -0.4),
	("hate", -0.8),
	("hated", -0.9),
	("sick", -0.71),
	("lonely", -0.5),
	("alone", -0.3),
	("boring", -1.0),
	("annoying", -0.8),
	("annoyed", -0.4),
	("upset", -0.5),
	("hurt", -0.5),
	("miserable", -1.0),
	("depressed", -0.7),
	("disappointed", -0.75),
	("disappointing", -0.6),
	("afraid", -0.6),
	("scared", -0.5),
	("nervous", -0.4),
	("worried", -0.45),
	("worry", -0.4),
	("overwhelmed", -0.5),
	("exhausted", -0.4),
	("difficult", -0.5),
	("hard", -0.29),
	("poor", -0.4),
	("wrong", -0.5),
	("sorry", -0.5),
	("unhappy", -0.6),
	("crying", -0.5),
	("cry", -0.4),
	("pain", -0.5),
	("painful", -0.7),
	("hopeless", -0.8),
	("useless", -0.5),
	("stupid", -0.8),
	("fail", -0.5),
	("failed", -0.5),
	("failure", -0.3),
	("lost", -0.3),
	("broken", -0.4),
	("ugly", -0.7),
	("dull", -0.3),
	("sucks", -0.3),
	("ruined", -0.6),
	("empty", -0.1),
	("numb", -0.3),
];

const INTENSIFIERS: &[(&str, f64)] = &[
	("very", 1.3),
	("really", 1.3),
	("so", 1.3),
	("extremely", 1.5),
	("incredibly", 1.5),
	("super", 1.4),
	("totally", 1.3),
	("quite", 1.1),
	("pretty", 1.1),
	("too", 1.2),
	("somewhat", 0.8),
	("slightly", 0.6),
	("kinda", 0.8),
	("little", 0.7),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "nothing", "nobody", "neither", "nor", "cannot", "without"];

lazy_static! {
	static ref TOKEN: Regex = Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("token pattern is valid");
}

/// Lexicon polarity scorer for English text.
///
/// Each known word contributes its polarity, scaled by an intensifier directly
/// before it and flipped and halved by a negation within the preceding three
/// tokens. The result is the mean contribution, or `0.0` when nothing matched.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
	words: HashMap<&'static str, f64>,
	intensifiers: HashMap<&'static str, f64>,
}

impl LexiconScorer {
	#[must_use]
	pub fn new() -> Self {
		Self {
			words: POLAR_WORDS.iter().copied().collect(),
			intensifiers: INTENSIFIERS.iter().copied().collect(),
		}
	}

	/// Adds or overrides a word polarity. Values are clamped to `[-1, 1]`.
	#[must_use]
	pub fn with_word(mut self, word: &'static str, polarity: f64) -> Self {
		self.words.insert(word, polarity.clamp(-1.0, 1.0));
		self
	}

	fn is_negation(token: &str) -> bool {
		NEGATIONS.contains(&token) || token.ends_with("n't")
	}
}

impl Default for LexiconScorer {
	fn default() -> Self {
		Self::new()
	}
}

impl SentimentScorer for LexiconScorer {
	#[allow(clippy::cast_precision_loss)]
	fn score(&self, text: &str) -> f64 {
		let lowered = text.to_lowercase();
		let tokens: Vec<&str> = TOKEN.find_iter(&lowered).map(|m| m.as_str()).collect();

		let contributions: Vec<f64> = tokens
			.iter()
			.enumerate()
			.filter_map(|(i, token)| {
				let base = *self.words.get(*token)?;
				let mut polarity = base;

				if let Some(factor) = i.checked_sub(1).and_then(|prev| self.intensifiers.get(tokens[prev])) {
					polarity = (polarity * factor).clamp(-1.0, 1.0);
				}

				if tokens[i.saturating_sub(NEGATION_WINDOW)..i].iter().any(|t| Self::is_negation(t)) {
					polarity *= NEGATION_FACTOR;
				}

				Some(polarity)
			})
			.collect();

		if contributions.is_empty() {
			return 0.0;
		}

		(contributions.iter().sum::<f64>() / contributions.len() as f64).clamp(-1.0, 1.0)
	}
}
