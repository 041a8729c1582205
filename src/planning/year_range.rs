//! Adaptive year ranges for projection-table columns
//!
//! Fixed columns such as 10/15/.../40 years often sit entirely above or below
//! the horizon a user actually needs. The range here is centred on the number
//! of years it takes to reach the goal when investing a share of income:
//! - Binary search for the years needed (future value is monotonic in years)
//! - Window of 5 years before to 20 years after, clipped to the allowed range
//! - Evenly spaced points, then corrected to exactly `num_points`

use serde::{Deserialize, Serialize};

use crate::error::{ensure_amount, ProjectionError, ProjectionResult};
use crate::projection::{ProjectionEngine, MAX_PROJECTION_YEARS};

/// Years shown before the years-needed estimate
const WINDOW_BEFORE: u32 = 5;
/// Years shown after the years-needed estimate
const WINDOW_AFTER: u32 = 20;

/// Parameters for generating a year range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearRangeParams {
    /// Annual return used for the years-needed search (default: 10%)
    #[serde(default = "default_annual_rate")]
    pub annual_rate: f64,

    /// Shortest horizon that may appear (default: 5)
    #[serde(default = "default_min_years")]
    pub min_years: u32,

    /// Longest horizon that may appear (default: 40)
    #[serde(default = "default_max_years")]
    pub max_years: u32,

    /// Number of columns to produce (default: 7)
    #[serde(default = "default_num_points")]
    pub num_points: usize,

    /// Share of monthly income assumed invested (default: 0.5)
    #[serde(default = "default_income_share")]
    pub income_share: f64,
}

fn default_annual_rate() -> f64 { 0.10 }
fn default_min_years() -> u32 { 5 }
fn default_max_years() -> u32 { 40 }
fn default_num_points() -> usize { 7 }
fn default_income_share() -> f64 { 0.5 }

impl Default for YearRangeParams {
    fn default() -> Self {
        Self {
            annual_rate: 0.10,
            min_years: 5,
            max_years: 40,
            num_points: 7,
            income_share: 0.5,
        }
    }
}

impl YearRangeParams {
    fn validate(&self) -> ProjectionResult<()> {
        if self.min_years == 0 {
            return Err(ProjectionError::invalid("min_years", "must be positive"));
        }
        if self.max_years < self.min_years {
            return Err(ProjectionError::invalid("max_years", "must not be below min_years"));
        }
        if self.max_years > MAX_PROJECTION_YEARS {
            return Err(ProjectionError::invalid(
                "max_years",
                format!("must not exceed {}", MAX_PROJECTION_YEARS),
            ));
        }
        if self.num_points < 2 {
            return Err(ProjectionError::invalid("num_points", "must be at least 2"));
        }
        let available = (self.max_years - self.min_years + 1) as usize;
        if available < self.num_points {
            return Err(ProjectionError::invalid(
                "num_points",
                format!(
                    "{} distinct years requested but only {} fit in {}..={}",
                    self.num_points, available, self.min_years, self.max_years
                ),
            ));
        }
        if !(self.income_share.is_finite() && (0.0..=1.0).contains(&self.income_share)) {
            return Err(ProjectionError::invalid("income_share", "must be within [0, 1]"));
        }
        Ok(())
    }
}

/// Strictly ascending, positive horizons in years
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct YearRangeSet {
    years: Vec<u32>,
}

impl YearRangeSet {
    /// Build from explicit years; they must be positive and strictly ascending
    pub fn new(years: Vec<u32>) -> ProjectionResult<Self> {
        if years.is_empty() {
            return Err(ProjectionError::invalid("years", "must not be empty"));
        }
        if years[0] == 0 {
            return Err(ProjectionError::invalid("years", "must be positive"));
        }
        if years.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ProjectionError::invalid("years", "must be strictly ascending"));
        }
        Ok(Self { years })
    }

    pub fn years(&self) -> &[u32] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn first(&self) -> u32 {
        self.years[0]
    }

    pub fn last(&self) -> u32 {
        self.years[self.years.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.years.iter().copied()
    }
}

impl TryFrom<Vec<u32>> for YearRangeSet {
    type Error = ProjectionError;

    fn try_from(years: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(years)
    }
}

impl From<YearRangeSet> for Vec<u32> {
    fn from(set: YearRangeSet) -> Self {
        set.years
    }
}

/// Generate `params.num_points` horizons bracketing the years needed to reach `desired_amount`
pub fn generate_year_range(
    engine: &ProjectionEngine,
    initial_amount: f64,
    desired_amount: f64,
    monthly_income: f64,
    params: &YearRangeParams,
) -> ProjectionResult<YearRangeSet> {
    ensure_amount("initial_amount", initial_amount)?;
    ensure_amount("desired_amount", desired_amount)?;
    ensure_amount("monthly_income", monthly_income)?;
    params.validate()?;
    let rate = engine.rate_for(params.annual_rate)?;
    let contribution = monthly_income * params.income_share;

    // Smallest horizon reaching the goal, or max_years when none does
    let mut lo = params.min_years;
    let mut hi = params.max_years;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let value = engine.future_value_unchecked(initial_amount, contribution, mid * 12, rate);
        if value >= desired_amount {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    let years_needed = lo;

    let (start, end) = bracket_window(years_needed, params);
    let years = spread_points(start, end, params.num_points)?;
    YearRangeSet::new(years)
}

/// Window around `years_needed`, widened inside the allowed range when too narrow
fn bracket_window(years_needed: u32, params: &YearRangeParams) -> (u32, u32) {
    let mut start = params.min_years.max(years_needed.saturating_sub(WINDOW_BEFORE));
    let mut end = params.max_years.min(years_needed + WINDOW_AFTER);

    while ((end - start + 1) as usize) < params.num_points {
        if start > params.min_years {
            start -= 1;
        } else {
            end += 1;
        }
    }
    (start, end)
}

/// Exactly `count` distinct ascending points in `start..=end`, including both ends
fn spread_points(start: u32, end: u32, count: usize) -> ProjectionResult<Vec<u32>> {
    let step = ((end - start) / (count as u32 - 1)).max(1);
    let mut years: Vec<u32> = (start..=end).step_by(step as usize).collect();
    if years.last() != Some(&end) {
        years.push(end);
    }

    // Too many: drop from the middle, first and last stay
    while years.len() > count {
        let idx = years.len() / 2;
        years.remove(idx);
    }

    // Too few: split the widest gap
    while years.len() < count {
        let (gap, idx) = years
            .windows(2)
            .enumerate()
            .map(|(i, w)| (w[1] - w[0], i))
            .max()
            .unwrap_or((0, 0));
        if gap < 2 {
            return Err(ProjectionError::invalid(
                "num_points",
                format!("cannot place {} distinct years in {}..={}", count, start, end),
            ));
        }
        years.insert(idx + 1, years[idx] + gap / 2);
    }

    Ok(years)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_brackets_goal() {
        let engine = ProjectionEngine::default();
        let params = YearRangeParams::default();
        let range = generate_year_range(&engine, 10_000.0, 1_000_000.0, 5_000.0, &params).unwrap();

        assert_eq!(range.len(), 7);
        assert!(range.first() >= 5);
        assert!(range.last() <= 40);
        assert!(range.years().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_years_needed_drives_window() {
        // 2500/month at 0% reaches 300k after exactly 10 years
        let engine = ProjectionEngine::default();
        let params = YearRangeParams { annual_rate: 0.0, ..Default::default() };
        let range = generate_year_range(&engine, 0.0, 300_000.0, 5_000.0, &params).unwrap();

        // Window 5..=30
        assert_eq!(range.first(), 5);
        assert_eq!(range.last(), 30);
        assert_eq!(range.len(), 7);
    }

    #[test]
    fn test_window_widened_near_max() {
        // Never reached: years needed = max_years, window 35..=40 has only 6 years
        let engine = ProjectionEngine::default();
        let params = YearRangeParams::default();
        let range = generate_year_range(&engine, 0.0, 1e12, 100.0, &params).unwrap();

        assert_eq!(range.years(), &[34, 35, 36, 37, 38, 39, 40]);
    }

    #[test]
    fn test_already_reached_goal() {
        let engine = ProjectionEngine::default();
        let params = YearRangeParams::default();
        let range = generate_year_range(&engine, 2_000_000.0, 1_000_000.0, 0.0, &params).unwrap();

        assert_eq!(range.first(), 5);
        assert_eq!(range.last(), 25);
        assert_eq!(range.len(), 7);
    }

    #[test]
    fn test_spread_points_removes_middle() {
        // step 4 over 7..=32 gives 7,11,...,31 plus 32
        let years = spread_points(7, 32, 7).unwrap();
        assert_eq!(years, vec![7, 11, 15, 19, 27, 31, 32]);
    }

    #[test]
    fn test_spread_points_fills_gaps() {
        let years = spread_points(1, 10, 2).unwrap();
        assert_eq!(years, vec![1, 10]);

        let years = spread_points(1, 4, 4).unwrap();
        assert_eq!(years, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_range_too_small_rejected() {
        let engine = ProjectionEngine::default();
        let params = YearRangeParams { min_years: 5, max_years: 8, ..Default::default() };
        let err = generate_year_range(&engine, 0.0, 1000.0, 100.0, &params).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidInput { field: "num_points", .. }));
    }

    #[test]
    fn test_year_range_set_validation() {
        assert!(YearRangeSet::new(vec![5, 10, 15]).is_ok());
        assert!(YearRangeSet::new(vec![]).is_err());
        assert!(YearRangeSet::new(vec![0, 5]).is_err());
        assert!(YearRangeSet::new(vec![5, 5]).is_err());
        assert!(YearRangeSet::new(vec![10, 5]).is_err());
    }
}
