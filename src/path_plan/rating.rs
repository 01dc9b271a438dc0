//! Per-segment rating of recorded paths

use crate::correction_error::CorrectionError;
use crate::path::Path;
use crate::segments::Segments;

/// Attaches ratings to the path, one per segment. Every sample gets the rating
/// of its segment in the rating column, which is appended if the path has none.
/// Ratings must be in [0, 1].
pub fn rate_segments(
    path: &Path,
    segments: &Segments,
    ratings: &[f64],
) -> Result<Path, CorrectionError> {
    if ratings.len() != segments.len() {
        return Err(CorrectionError::InvalidConfiguration(format!(
            "{} ratings for {} segments",
            ratings.len(),
            segments.len()
        )));
    }
    if let Some((segment, rating)) = ratings
        .iter()
        .enumerate()
        .find(|(_, rating)| !(0.0..=1.0).contains(*rating))
    {
        return Err(CorrectionError::InvalidConfiguration(format!(
            "rating of segment {} must be in 0.0 .. 1.0 (got {})",
            segment, rating
        )));
    }

    let mut per_sample = vec![0.0; path.len()];
    for (range, rating) in segments.ranges().into_iter().zip(ratings) {
        let end = range.end.min(per_sample.len());
        let start = range.start.min(end);
        per_sample[start..end].fill(*rating);
    }
    Ok(path.with_ratings(&per_sample))
}
