use crate::model::MoodLabel;

/// Upper bound of the band table. The last band is closed at this value.
pub const MAX_BAND_SCORE: f64 = 10.0;

/// Highest score a forecast may report.
pub const MAX_FORECAST_SCORE: f64 = 9.0;

/// Ordered `[low, high)` bands covering `[0, 10)`.
pub const MOOD_BANDS: [(f64, f64, MoodLabel); 7] = [
	(0.0, 1.5, MoodLabel::Frustrated),
	(1.5, 3.0, MoodLabel::Anxious),
	(3.0, 4.0, MoodLabel::Bored),
	(4.0, 5.5, MoodLabel::Neutral),
	(5.5, 7.0, MoodLabel::Calm),
	(7.0, 8.5, MoodLabel::Grateful),
	(8.5, MAX_BAND_SCORE, MoodLabel::Happy),
];

/// Maps a score onto its mood band.
///
/// Scores are clamped into `[0, 10]` first and `10` itself lands in `happy`,
/// so every finite input has exactly one label. `NaN` reads as `neutral`.
#[must_use]
pub fn band(score: f64) -> MoodLabel {
	if score.is_nan() {
		return MoodLabel::Neutral;
	}
	let score = score.clamp(0.0, MAX_BAND_SCORE);
	MOOD_BANDS
		.iter()
		.find(|(low, high, _)| *low <= score && score < *high)
		.map_or(MoodLabel::Happy, |(_, _, label)| *label)
}

/// The shared forecast convention: clamp into `[0, 9]`, then round to the nearest integer with ties going to the even one.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_round(value: f64) -> u8 {
	if value.is_nan() {
		return 0;
	}
	value.clamp(0.0, MAX_FORECAST_SCORE).round_ties_even() as u8
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_forecast_score_has_one_band() {
		for score in 0..=9u8 {
			let hits = MOOD_BANDS.iter().filter(|(low, high, _)| *low <= f64::from(score) && f64::from(score) < *high).count();
			assert_eq!(hits, 1, "score {score}");
		}
		let labels: Vec<_> = (0..=9u8).map(|s| band(f64::from(s))).collect();
		assert_eq!(
			labels,
			vec![
				MoodLabel::Frustrated,
				MoodLabel::Frustrated,
				MoodLabel::Anxious,
				MoodLabel::Bored,
				MoodLabel::Neutral,
				MoodLabel::Neutral,
				MoodLabel::Calm,
				MoodLabel::Grateful,
				MoodLabel::Grateful,
				MoodLabel::Happy,
			]
		);
	}

	#[test]
	fn boundaries_resolve_upward() {
		assert_eq!(band(1.5), MoodLabel::Anxious);
		assert_eq!(band(3.0), MoodLabel::Bored);
		assert_eq!(band(4.0), MoodLabel::Neutral);
		assert_eq!(band(5.5), MoodLabel::Calm);
		assert_eq!(band(7.0), MoodLabel::Grateful);
		assert_eq!(band(8.5), MoodLabel::Happy);
		assert_eq!(band(1.499), MoodLabel::Frustrated);
	}

	#[test]
	fn out_of_range_scores_are_clamped() {
		assert_eq!(band(10.0), MoodLabel::Happy);
		assert_eq!(band(42.0), MoodLabel::Happy);
		assert_eq!(band(-3.0), MoodLabel::Frustrated);
		assert_eq!(band(f64::NAN), MoodLabel::Neutral);
	}

	#[test]
	fn bands_are_contiguous() {
		assert!(MOOD_BANDS.windows(2).all(|w| (w[0].1 - w[1].0).abs() < f64::EPSILON));
		assert!(MOOD_BANDS[0].0.abs() < f64::EPSILON);
		let labels: Vec<_> = MOOD_BANDS.iter().map(|(_, _, label)| *label).collect();
		assert_eq!(labels, MoodLabel::ALL.to_vec());
	}

	#[test]
	fn clamp_round_stays_in_forecast_range() {
		assert_eq!(clamp_round(-0.4), 0);
		assert_eq!(clamp_round(4.5), 4);
		assert_eq!(clamp_round(5.5), 6);
		assert_eq!(clamp_round(6.49), 6);
		assert_eq!(clamp_round(9.7), 9);
		assert_eq!(clamp_round(120.0), 9);
		assert_eq!(clamp_round(f64::NAN), 0);
	}
}
