//! Similarity search over a distance profile

use chrono::{DateTime, Utc};
use log::debug;
use series_math::distance::{minkowski_distance, z_normalized_distance};
use tsea_core::{
    Algorithm, AlgorithmDescriptor, AnalysisError, AnalysisOutput, CatalogueError, Dataset,
    ParameterSpec, Params, PatternMatch, Result, SimilarPatterns,
};

/// Distance used to compare subsequences
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// Euclidean distance between z-normalised subsequences
    ZNormalized,
    /// Minkowski distance of the given order on raw values
    Minkowski(f64),
}

impl Metric {
    fn distance(self, a: &[f64], b: &[f64]) -> Result<f64> {
        let d = match self {
            Metric::ZNormalized => z_normalized_distance(a, b)?,
            Metric::Minkowski(p) => minkowski_distance(a, b, p)?,
        };
        Ok(d)
    }
}

/// Mueen's algorithm for similarity search
///
/// The pattern is every observation between the `start` and `end` extra
/// parameters. Each subsequence of the same length is scored against it and
/// the closest ones are returned, skipping overlaps with the pattern itself
/// and with matches already taken.
#[derive(Debug, Clone)]
pub struct Mass {
    descriptor: AlgorithmDescriptor,
}

impl Mass {
    pub fn new() -> std::result::Result<Self, CatalogueError> {
        let descriptor = AlgorithmDescriptor::builder("mass")
            .short_description("Mueen's Algorithm for Similarity Search.")
            .long_description(
                "Computes the distance profile of the selected pattern against \
                 every subsequence of the series and returns the most similar ones.",
            )
            .parameter(
                ParameterSpec::number("nb_similar_patterns", 1.0, 25.0, 1.0, 5.0)?
                    .with_label("Number of similar patterns")
                    .with_description("Number of similar patterns to return"),
            )
            .parameter(
                ParameterSpec::boolean("normalize", true)?
                    .with_label("Normalize")
                    .with_description("Compare z-normalized subsequences"),
            )
            .parameter(
                ParameterSpec::number("p", 0.01, 10.0, 0.01, 2.0)?
                    .with_description("Order of the Minkowski distance when not normalizing")
                    .disabled(),
            )
            .required_extra_param("start")
            .required_extra_param("end")
            .build()?;

        Ok(Self { descriptor })
    }
}

/// Positions and distances of the `count` subsequences closest to
/// `values[query..query + length]`
///
/// Subsequences starting within `max(1, length / 2)` positions of the query
/// or of an accepted match are skipped. Results are ordered by distance.
pub fn best_matches(
    values: &[f64],
    query: usize,
    length: usize,
    count: usize,
    metric: Metric,
) -> Result<Vec<(usize, f64)>> {
    if length < 2 {
        return Err(AnalysisError::execution(
            "the pattern must contain at least 2 observations",
        ));
    }
    if query + length > values.len() {
        return Err(AnalysisError::execution(format!(
            "pattern [{}, {}) lies outside the series of length {}",
            query,
            query + length,
            values.len()
        )));
    }

    let pattern = &values[query..query + length];
    let exclusion = (length / 2).max(1);

    let mut profile = (0..=values.len() - length)
        .filter(|&i| i.abs_diff(query) >= exclusion)
        .map(|i| Ok((i, metric.distance(&values[i..i + length], pattern)?)))
        .collect::<Result<Vec<(usize, f64)>>>()?;
    profile.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    let mut matches: Vec<(usize, f64)> = Vec::with_capacity(count);
    for (i, distance) in profile {
        if matches.len() == count {
            break;
        }
        if matches.iter().all(|(j, _)| i.abs_diff(*j) >= exclusion) {
            matches.push((i, distance));
        }
    }

    Ok(matches)
}

fn ordered(a: DateTime<Utc>, b: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

impl Algorithm for Mass {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn compute(&self, dataset: &Dataset, column: &str, params: &Params) -> Result<AnalysisOutput> {
        let count = params.get_usize_within(&self.descriptor, "nb_similar_patterns")?;
        let metric = if params.get_bool("normalize")? {
            Metric::ZNormalized
        } else {
            Metric::Minkowski(params.get_f64_within(&self.descriptor, "p")?)
        };
        let (start, end) = ordered(params.get_timestamp("start")?, params.get_timestamp("end")?);

        let series = dataset.series(column)?;
        let pattern = series.slice_between(start, end);
        let query = series
            .timestamps()
            .iter()
            .position(|t| *t >= start)
            .ok_or_else(|| AnalysisError::execution("the pattern selection is empty"))?;

        debug!(
            "searching {} matches of a {}-point pattern at {} ({:?})",
            count,
            pattern.len(),
            query,
            metric
        );
        let found = best_matches(series.values(), query, pattern.len(), count, metric)?;

        let matches = found
            .into_iter()
            .map(|(i, distance)| PatternMatch {
                start: series.timestamps()[i],
                distance,
                window: series.slice(i, i + pattern.len()),
            })
            .collect();

        Ok(AnalysisOutput::SimilarPatterns(SimilarPatterns { pattern, matches }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    fn bumps() -> Vec<f64> {
        let mut values = vec![0.0; 60];
        for start in [5, 25, 45] {
            values[start..start + 4].copy_from_slice(&[1.0, 3.0, 2.0, 1.0]);
        }
        values
    }

    #[test]
    fn test_repeated_shape_is_found() {
        let matches = best_matches(&bumps(), 5, 4, 2, Metric::Minkowski(2.0)).unwrap();

        let starts: Vec<usize> = matches.iter().map(|(i, _)| *i).collect();
        assert_eq!(starts, vec![25, 45]);
        for (_, distance) in matches {
            assert_relative_eq!(distance, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalized_metric_ignores_scale() {
        let mut values = bumps();
        for v in &mut values[25..29] {
            *v *= 10.0;
        }

        let matches = best_matches(&values, 5, 4, 2, Metric::ZNormalized).unwrap();
        let mut starts: Vec<usize> = matches.iter().map(|(i, _)| *i).collect();
        starts.sort_unstable();
        assert_eq!(starts, vec![25, 45]);
        for (_, distance) in matches {
            assert_relative_eq!(distance, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_matches_do_not_overlap() {
        let values: Vec<f64> = (0..50).map(|i| (i as f64 * 0.3).sin()).collect();
        let matches = best_matches(&values, 0, 10, 4, Metric::ZNormalized).unwrap();

        assert_eq!(matches.len(), 4);
        for (i, (a, _)) in matches.iter().enumerate() {
            assert!(*a >= 5);
            for (b, _) in &matches[i + 1..] {
                assert!(a.abs_diff(*b) >= 5);
            }
        }
        assert!(matches.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(best_matches(&bumps(), 5, 1, 2, Metric::ZNormalized).is_err());
        assert!(best_matches(&bumps(), 58, 4, 2, Metric::ZNormalized).is_err());
    }
}
