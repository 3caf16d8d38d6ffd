//! Sliding window segmentation

use crate::change_in_mean::{change_points, jump_parameter, min_size_parameter, Segmentation};
use log::debug;
use series_math::cost::L2Cost;
use tsea_core::{
    Algorithm, AlgorithmDescriptor, AnalysisError, AnalysisOutput, CatalogueError, Dataset,
    ParameterSpec, Params, Result,
};

#[derive(Debug, Clone)]
pub struct SlidingWindowL2 {
    descriptor: AlgorithmDescriptor,
}

impl SlidingWindowL2 {
    pub fn new() -> std::result::Result<Self, CatalogueError> {
        let descriptor = AlgorithmDescriptor::builder("sliding-window-l2")
            .short_description("Window-based change detection with an L2 cost.")
            .long_description(
                "Slides two adjacent windows along the series and scores how much \
                 the cost drops when they are treated as separate segments. Score \
                 peaks are accepted, strongest first, while each one lowers the \
                 total cost by more than the penalty.",
            )
            .parameter(
                ParameterSpec::number("penalty", 0.1, 1000.0, 0.01, 10.0)?
                    .with_description("penalty value (>0)"),
            )
            .parameter(
                ParameterSpec::number("width", 5.0, 1000.0, 1.0, 30.0)?
                    .with_description("The width of the sliding window"),
            )
            .parameter(min_size_parameter()?)
            .parameter(jump_parameter()?)
            .build()?;

        Ok(Self { descriptor })
    }
}

/// Change points of `values` found with a window of `width` observations
pub fn sliding_window(values: &[f64], width: usize, segmentation: Segmentation) -> Result<Vec<usize>> {
    let Segmentation {
        penalty,
        min_size,
        jump,
    } = segmentation;
    if width < 2 {
        return Err(AnalysisError::execution("width must be at least 2"));
    }

    let n = values.len();
    let cost = L2Cost::new(values)?;
    if n < width {
        return Ok(Vec::new());
    }

    let half = width / 2;
    let centres: Vec<usize> = (half..n - half).step_by(jump).collect();
    let scores: Vec<f64> = centres
        .iter()
        .map(|&k| {
            cost.cost(k - half, k + half) - cost.cost(k - half, k) - cost.cost(k, k + half)
        })
        .collect();

    let order = (width.max(2 * min_size) / (2 * jump)).max(1);
    let mut peaks: Vec<(f64, usize)> = local_maxima(&scores, order)
        .into_iter()
        .map(|i| (scores[i], centres[i]))
        .collect();
    peaks.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut breakpoints = vec![n];
    let mut error = cost.sum_of_costs(&breakpoints);
    while let Some((_, candidate)) = peaks.pop() {
        let mut proposal = breakpoints.clone();
        proposal.push(candidate);
        proposal.sort_unstable();

        let proposal_error = cost.sum_of_costs(&proposal);
        if error - proposal_error <= penalty {
            break;
        }
        breakpoints = proposal;
        error = proposal_error;
    }

    breakpoints.retain(|&b| b != n);
    Ok(breakpoints)
}

/// Positions strictly greater than their `order` neighbours on each side,
/// wrapping around the ends
fn local_maxima(scores: &[f64], order: usize) -> Vec<usize> {
    let len = scores.len();
    (0..len)
        .filter(|&i| {
            (1..=order).all(|d| {
                let right = scores[(i + d) % len];
                let left = scores[(i + len - d % len) % len];
                scores[i] > right && scores[i] > left
            })
        })
        .collect()
}

impl Algorithm for SlidingWindowL2 {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn compute(&self, dataset: &Dataset, column: &str, params: &Params) -> Result<AnalysisOutput> {
        let segmentation = Segmentation::from_params(&self.descriptor, params)?;
        let width = params.get_usize_within(&self.descriptor, "width")?;
        let series = dataset.series(column)?;

        let indices = sliding_window(series.values(), width, segmentation)?;
        debug!("sliding-window-l2 found {} change points", indices.len());
        Ok(change_points(&series, indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn steps() -> Vec<f64> {
        let mut values = vec![0.0; 30];
        values.extend(vec![10.0; 30]);
        values.extend(vec![-5.0; 30]);
        values
    }

    fn segmentation(penalty: f64) -> Segmentation {
        Segmentation {
            penalty,
            min_size: 5,
            jump: 1,
        }
    }

    #[test]
    fn test_window_finds_level_shifts() {
        assert_eq!(
            sliding_window(&steps(), 10, segmentation(10.0)).unwrap(),
            vec![30, 60]
        );
    }

    #[rstest]
    #[case(steps(), 1e9)]
    #[case(vec![4.0; 40], 10.0)]
    #[case(vec![1.0, 2.0, 3.0], 10.0)]
    fn test_no_change_points(#[case] values: Vec<f64>, #[case] penalty: f64) {
        assert!(sliding_window(&values, 10, segmentation(penalty))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_local_maxima_are_strict() {
        let scores = [0.0, 3.0, 1.0, 1.0, 5.0, 0.0];
        assert_eq!(local_maxima(&scores, 1), vec![1, 4]);
        assert!(local_maxima(&[2.0, 2.0, 2.0], 1).is_empty());
    }
}
