//! Pruned exact linear time (PELT) segmentation

use crate::change_in_mean::{change_points, jump_parameter, min_size_parameter, Segmentation};
use log::debug;
use series_math::cost::L2Cost;
use tsea_core::{
    Algorithm, AlgorithmDescriptor, AnalysisError, AnalysisOutput, CatalogueError, Dataset,
    ParameterSpec, Params, Result,
};

#[derive(Debug, Clone)]
pub struct PeltL2 {
    descriptor: AlgorithmDescriptor,
}

impl PeltL2 {
    pub fn new() -> std::result::Result<Self, CatalogueError> {
        let descriptor = AlgorithmDescriptor::builder("pelt-l2")
            .short_description("Exact penalised segmentation with pruning.")
            .long_description(
                "Finds the segmentation minimising the sum of L2 segment costs plus \
                 a penalty per change point, pruning candidates that can no longer \
                 be optimal.",
            )
            .parameter(
                ParameterSpec::number("penalty", 0.0, 10.0, 0.01, 1.0)?
                    .with_description("Cost added for every change point"),
            )
            .parameter(min_size_parameter()?)
            .parameter(jump_parameter()?)
            .build()?;

        Ok(Self { descriptor })
    }
}

/// Optimal penalised segmentation of `values`
///
/// Returns the start index of every segment but the first.
pub fn pelt(values: &[f64], segmentation: Segmentation) -> Result<Vec<usize>> {
    let Segmentation {
        penalty,
        min_size,
        jump,
    } = segmentation;
    let n = values.len();
    if n < min_size {
        return Err(AnalysisError::execution(format!(
            "need at least min_size ({}) observations, have {}",
            min_size, n
        )));
    }

    let cost = L2Cost::new(values)?;

    let mut ends: Vec<usize> = (0..n).step_by(jump).filter(|&k| k >= min_size).collect();
    ends.push(n);

    // best[t]: optimal penalised cost of values[..t], previous[t]: its last breakpoint
    let mut best: Vec<Option<f64>> = vec![None; n + 1];
    let mut previous = vec![0; n + 1];
    best[0] = Some(-penalty);
    let mut admissible: Vec<usize> = Vec::new();

    for &end in &ends {
        let newest = (end - min_size) / jump * jump;
        if !admissible.contains(&newest) {
            admissible.push(newest);
        }

        let mut scored = Vec::with_capacity(admissible.len());
        for &start in &admissible {
            if let Some(prefix) = best[start] {
                scored.push((start, prefix + cost.cost(start, end) + penalty));
            }
        }

        let Some(&(argmin, minimum)) = scored
            .iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
        else {
            continue;
        };
        best[end] = Some(minimum);
        previous[end] = argmin;

        admissible.retain(|start| {
            scored
                .iter()
                .find(|(s, _)| s == start)
                .map_or(true, |(_, total)| total - penalty <= minimum)
        });
    }

    let mut breakpoints = Vec::new();
    let mut cursor = n;
    while cursor > 0 {
        cursor = previous[cursor];
        if cursor > 0 {
            breakpoints.push(cursor);
        }
    }
    breakpoints.reverse();
    Ok(breakpoints)
}

impl Algorithm for PeltL2 {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn compute(&self, dataset: &Dataset, column: &str, params: &Params) -> Result<AnalysisOutput> {
        let segmentation = Segmentation::from_params(&self.descriptor, params)?;
        let series = dataset.series(column)?;

        let indices = pelt(series.values(), segmentation)?;
        debug!("pelt-l2 found {} change points", indices.len());
        Ok(change_points(&series, indices))
    }
}
