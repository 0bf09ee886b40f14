//! Cumulative-share cutoff

use crate::errors::{LitsearchError, Result};

/// Relative slack when comparing the running sum to its target
const SUM_TOLERANCE: f64 = 1e-12;

/// Smallest importance value such that all values at or above it make up
/// at least `percent` of the total
///
/// `percent` must lie in `(0, 1]`. Returns `None` for an empty slice.
pub fn cumulative_cutoff(values: &[f64], percent: f64) -> Result<Option<f64>> {
    if !(percent > 0.0 && percent <= 1.0) {
        return Err(LitsearchError::invalid_config(format!(
            "cumulative percent must be in (0, 1], got {percent}"
        )));
    }
    if values.is_empty() {
        return Ok(None);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let total: f64 = sorted.iter().sum();
    let target = percent * total;
    let slack = SUM_TOLERANCE * total.abs().max(1.0);

    let mut running = 0.0;
    for &value in &sorted {
        running += value;
        if running >= target - slack {
            return Ok(Some(value));
        }
    }
    Ok(sorted.last().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sum of values at or above the cutoff
    fn mass_above(values: &[f64], cutoff: f64) -> f64 {
        values.iter().filter(|&&v| v >= cutoff).sum()
    }

    #[test]
    fn test_half_of_the_mass() {
        let values = [1.0, 2.0, 3.0, 4.0, 10.0];
        // Descending: 10 (10), 4 (14) ... target 10
        assert_eq!(cumulative_cutoff(&values, 0.5).unwrap(), Some(10.0));
        // target 16: 10 + 4 + 3
        assert_eq!(cumulative_cutoff(&values, 0.8).unwrap(), Some(3.0));
    }

    #[test]
    fn test_full_mass_returns_minimum() {
        let values = [5.0, 1.0, 3.0];
        assert_eq!(cumulative_cutoff(&values, 1.0).unwrap(), Some(1.0));
    }

    #[test]
    fn test_cutoff_is_minimal() {
        let values = [0.5, 7.0, 2.25, 2.25, 9.0, 0.1, 4.0, 1.0, 3.3];
        let total: f64 = values.iter().sum();
        for percent in [0.05, 0.2, 0.35, 0.5, 0.65, 0.8, 0.95, 1.0] {
            let cutoff = cumulative_cutoff(&values, percent).unwrap().unwrap();
            assert!(mass_above(&values, cutoff) >= percent * total - 1e-9);

            // No strictly larger observed value also reaches the target
            for &larger in values.iter().filter(|&&v| v > cutoff) {
                assert!(
                    mass_above(&values, larger) < percent * total,
                    "percent {percent}: {larger} also reaches the target"
                );
            }
        }
    }

    #[test]
    fn test_float_accumulation_is_tolerated() {
        // 0.1 summed ten times is not exactly 1.0
        let values = [0.1; 10];
        assert_eq!(cumulative_cutoff(&values, 1.0).unwrap(), Some(0.1));
    }

    #[test]
    fn test_percent_out_of_range() {
        let values = [1.0, 2.0];
        for percent in [0.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                cumulative_cutoff(&values, percent),
                Err(LitsearchError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(cumulative_cutoff(&[], 0.5).unwrap(), None);
    }
}
