//! Text rendering of rating results
//!
//! Fixed-width tables and a coarse histogram for terminal output. Rendering
//! never reorders or mutates the mapping it is given.

use std::fmt::Write;

use crate::rating::RatingMapping;

/// Number of buckets in the rating histogram
pub const HISTOGRAM_BINS: usize = 15;

/// Render a ranked, fixed-width rating table
///
/// One row per team, best first, with rank, team key, and the rating to three
/// decimal places.
pub fn render_table(mapping: &RatingMapping) -> String {
    let ranked = mapping.ranked();
    let key_width = ranked
        .iter()
        .map(|entry| entry.key.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:<key_width$}  {:>10}", "rank", "team", "rating");
    for (position, entry) in ranked.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<key_width$}  {:>10.3}",
            position + 1,
            entry.key,
            entry.rating
        );
    }
    out
}

/// Render a text histogram of the rating distribution
///
/// Ratings are bucketed into [`HISTOGRAM_BINS`] equal-width bins spanning the
/// observed range; each row shows the bin's lower edge and one `#` per team.
pub fn render_histogram(mapping: &RatingMapping) -> String {
    let ratings: Vec<f64> = mapping.entries().iter().map(|e| e.rating).collect();
    if ratings.is_empty() {
        return String::new();
    }

    let min = ratings.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = ratings.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let mut counts = [0usize; HISTOGRAM_BINS];
    for &rating in &ratings {
        let bin = if span > 0.0 {
            // The maximum lands in the last bin, not one past it
            (((rating - min) / span) * HISTOGRAM_BINS as f64).min(HISTOGRAM_BINS as f64 - 1.0)
                as usize
        } else {
            0
        };
        counts[bin] += 1;
    }

    let width = HISTOGRAM_BINS as f64;
    let mut out = String::new();
    for (bin, &count) in counts.iter().enumerate() {
        let edge = min + span * bin as f64 / width;
        let _ = writeln!(out, "{:>10.3} | {}", edge, "#".repeat(count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::matrix::TeamIndex;
    use nalgebra::DVector;

    fn mapping(pairs: &[(&str, f64)]) -> RatingMapping {
        let index = TeamIndex::new(pairs.iter().map(|(k, _)| k.to_string()).collect()).unwrap();
        let ratings = DVector::from_iterator(pairs.len(), pairs.iter().map(|(_, r)| *r));
        RatingMapping::bind(&index, &ratings)
    }

    #[test]
    fn test_table_is_ranked_best_first() {
        let table = render_table(&mapping(&[("frc1", 2.0), ("frc254", 9.0), ("frc33", 5.5)]));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("frc254"));
        assert!(lines[1].contains("9.000"));
        assert!(lines[2].contains("frc33"));
        assert!(lines[3].contains("frc1"));
    }

    #[test]
    fn test_histogram_accounts_for_every_team() {
        let histogram = render_histogram(&mapping(&[
            ("a", 0.0),
            ("b", 1.0),
            ("c", 2.0),
            ("d", 10.0),
        ]));

        let hashes: usize = histogram.chars().filter(|&c| c == '#').count();
        assert_eq!(hashes, 4);
        assert_eq!(histogram.lines().count(), HISTOGRAM_BINS);
    }

    #[test]
    fn test_histogram_with_identical_ratings() {
        let histogram = render_histogram(&mapping(&[("a", 3.0), ("b", 3.0)]));
        let hashes: usize = histogram.chars().filter(|&c| c == '#').count();
        assert_eq!(hashes, 2);
    }

    #[test]
    fn test_empty_mapping_renders_nothing() {
        let index = TeamIndex::new(vec![]).unwrap();
        let empty = RatingMapping::bind(&index, &DVector::zeros(0));
        assert!(render_histogram(&empty).is_empty());
    }
}
