//! Candidate monthly contributions for projection-table rows

use crate::error::{ensure_amount, ProjectionError, ProjectionResult};
use crate::projection::{ceil_to_unit, ProjectionEngine};

/// Percent of monthly income used as the affordable baseline contribution
pub const BASELINE_INCOME_PERCENT: f64 = 1.0;

/// Generate `count` ascending contributions from the 1%-of-income baseline to `min_contribution`.
///
/// A minimum below the baseline gives an even arithmetic ladder between the two;
/// a minimum above it gives a geometric ladder, so wide spans such as 100 to
/// 10,000 are spaced by ratio rather than by a fixed step.
///
/// Rungs are strictly ascending. When the span is narrower than one cent per
/// rung, rungs that would round onto each other are raised a cent above the
/// previous rung, so the top may end a few cents above the span.
pub fn generate_contribution_ladder(
    engine: &ProjectionEngine,
    monthly_income: f64,
    min_contribution: f64,
    count: usize,
) -> ProjectionResult<Vec<f64>> {
    ensure_amount("monthly_income", monthly_income)?;
    ensure_amount("min_contribution", min_contribution)?;
    if count == 0 {
        return Err(ProjectionError::invalid("count", "must be positive"));
    }

    let base = ceil_to_unit(monthly_income * BASELINE_INCOME_PERCENT / 100.0, engine.config().rounding_unit);
    let top = base.max(min_contribution);
    if count == 1 {
        return Ok(vec![ceil_cents(top)]);
    }

    let steps = (count - 1) as f64;
    let mut ladder: Vec<f64> = if min_contribution <= base || base <= 0.0 {
        let bottom = base.min(min_contribution);
        let step = (top - bottom) / steps;
        (0..count).map(|i| round_cents(bottom + step * i as f64)).collect()
    } else {
        let ratio = (min_contribution / base).powf(1.0 / steps);
        (0..count).map(|i| round_cents(base * ratio.powi(i as i32))).collect()
    };

    // Top rung never rounds below the larger of baseline and minimum
    ladder[count - 1] = ceil_cents(top);
    for i in 1..count {
        let floor = round_cents(ladder[i - 1] + 0.01);
        if ladder[i] < floor {
            ladder[i] = floor;
        }
    }
    Ok(ladder)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ceil_cents(value: f64) -> f64 {
    (value * 100.0).ceil() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ProjectionEngine {
        ProjectionEngine::default()
    }

    #[test]
    fn test_geometric_ladder() {
        // Baseline: 1% of 10,000 = 100; minimum 10,000 -> ratio 10 per rung over 3 rungs
        let ladder = generate_contribution_ladder(&engine(), 10_000.0, 10_000.0, 3).unwrap();
        assert_eq!(ladder, vec![100.0, 1000.0, 10_000.0]);
    }

    #[test]
    fn test_geometric_ladder_constant_ratio() {
        let ladder = generate_contribution_ladder(&engine(), 8_000.0, 2134.64, 10).unwrap();
        assert_eq!(ladder.len(), 10);
        assert_eq!(ladder[0], 100.0);
        assert!(ladder[9] >= 2134.64);
        assert!(ladder.windows(2).all(|w| w[0] < w[1]));

        let r1 = ladder[1] / ladder[0];
        let r2 = ladder[5] / ladder[4];
        assert!((r1 - r2).abs() < 1e-3);
    }

    #[test]
    fn test_arithmetic_ladder_when_minimum_below_baseline() {
        // Baseline: 1% of 50,000 = 500; minimum 100
        let ladder = generate_contribution_ladder(&engine(), 50_000.0, 100.0, 5).unwrap();
        assert_eq!(ladder, vec![100.0, 200.0, 300.0, 400.0, 500.0]);
    }

    #[test]
    fn test_baseline_rounded_up() {
        // 1% of 12,345 = 123.45 -> 200
        let ladder = generate_contribution_ladder(&engine(), 12_345.0, 0.0, 2).unwrap();
        assert_eq!(ladder, vec![0.0, 200.0]);
    }

    #[test]
    fn test_zero_income_uses_arithmetic() {
        let ladder = generate_contribution_ladder(&engine(), 0.0, 400.0, 5).unwrap();
        assert_eq!(ladder, vec![0.0, 100.0, 200.0, 300.0, 400.0]);
    }

    #[test]
    fn test_single_rung() {
        let ladder = generate_contribution_ladder(&engine(), 10_000.0, 2500.0, 1).unwrap();
        assert_eq!(ladder, vec![2500.0]);
    }

    #[test]
    fn test_minimum_equal_to_baseline_stays_ascending() {
        let ladder = generate_contribution_ladder(&engine(), 10_000.0, 100.0, 5).unwrap();
        assert_eq!(ladder, vec![100.0, 100.01, 100.02, 100.03, 100.04]);
    }

    #[test]
    fn test_narrow_span_has_no_repeated_rungs() {
        let ladder = generate_contribution_ladder(&engine(), 10_000.0, 100.03, 10).unwrap();
        assert_eq!(ladder.len(), 10);
        assert_eq!(ladder[0], 100.0);
        assert!(ladder[9] >= 100.03);
        assert!(ladder.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(generate_contribution_ladder(&engine(), 10_000.0, 100.0, 0).is_err());
        assert!(generate_contribution_ladder(&engine(), -1.0, 100.0, 5).is_err());
        assert!(generate_contribution_ladder(&engine(), 10_000.0, -100.0, 5).is_err());
    }
}
