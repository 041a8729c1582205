//! Future-value calculator, goal solvers and timeline simulator

use crate::error::{ensure_amount, ProjectionError, ProjectionResult};
use super::config::{MonthlyRate, ProjectionConfig, RatePeriod};
use super::state::AccumulationState;
use super::timeline::{ContributionPlan, ProjectionSeries, TimeToGoal};
use super::{MAX_PROJECTION_MONTHS, MAX_PROJECTION_YEARS};

/// Pure projection engine. Every call is independent of every other call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create an engine after checking its configuration
    pub fn new(config: ProjectionConfig) -> ProjectionResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Total accumulated value after `years` of monthly compounding
    pub fn future_value(
        &self,
        initial_amount: f64,
        monthly_contribution: f64,
        years: u32,
        annual_rate: f64,
    ) -> ProjectionResult<f64> {
        let months = self.months_for(years)?;
        self.future_value_months(initial_amount, monthly_contribution, months, annual_rate, RatePeriod::Annual)
    }

    /// Future value over a horizon in months, with the rate quoted per `period`
    pub fn future_value_months(
        &self,
        initial_amount: f64,
        monthly_contribution: f64,
        months: u32,
        rate: f64,
        period: RatePeriod,
    ) -> ProjectionResult<f64> {
        ensure_amount("initial_amount", initial_amount)?;
        ensure_amount("monthly_contribution", monthly_contribution)?;
        let months = self.check_months(months)?;
        let rate = self.rate_in(rate, period)?;

        Ok(self.future_value_unchecked(initial_amount, monthly_contribution, months, rate))
    }

    /// Closed form shared with the planning module, inputs already validated
    pub(crate) fn future_value_unchecked(
        &self,
        initial_amount: f64,
        monthly_contribution: f64,
        months: u32,
        rate: MonthlyRate,
    ) -> f64 {
        let initial_fv = initial_amount * rate.growth(months);
        let contribution_fv =
            monthly_contribution * rate.annuity_factor(months, self.config.contribution_timing);
        initial_fv + contribution_fv
    }

    /// Break-even monthly contribution reaching `goal_amount` in `years`, unrounded.
    ///
    /// Negative when the principal alone already reaches the goal.
    pub fn required_contribution_exact(
        &self,
        initial_amount: f64,
        goal_amount: f64,
        years: u32,
        annual_rate: f64,
    ) -> ProjectionResult<f64> {
        ensure_amount("initial_amount", initial_amount)?;
        ensure_amount("goal_amount", goal_amount)?;
        if years == 0 {
            return Err(ProjectionError::invalid("years", "must be positive"));
        }
        let months = self.months_for(years)?;
        let rate = self.rate_for(annual_rate)?;

        let remaining = goal_amount - initial_amount * rate.growth(months);
        Ok(remaining / rate.annuity_factor(months, self.config.contribution_timing))
    }

    /// Required monthly contribution rounded up to the configured unit
    pub fn solve_required_contribution(
        &self,
        initial_amount: f64,
        goal_amount: f64,
        years: u32,
        annual_rate: f64,
    ) -> ProjectionResult<f64> {
        let exact = self.required_contribution_exact(initial_amount, goal_amount, years, annual_rate)?;
        Ok(ceil_to_unit(exact, self.config.rounding_unit))
    }

    /// Break-even contribution plus the simulated outcome of paying it
    pub fn plan_contribution(
        &self,
        initial_amount: f64,
        goal_amount: f64,
        years: u32,
        annual_rate: f64,
    ) -> ProjectionResult<ContributionPlan> {
        let break_even = self.required_contribution_exact(initial_amount, goal_amount, years, annual_rate)?;
        let monthly_contribution = break_even.max(0.0);
        let series = self.simulate_timeline(initial_amount, monthly_contribution, years, annual_rate)?;

        // years > 0 was checked above, so the series has at least two points
        let last = series.points()[series.len() - 1];
        Ok(ContributionPlan {
            break_even,
            monthly_contribution,
            final_amount: last.total_amount,
            total_invested: last.total_invested,
            total_interest: last.total_returns,
        })
    }

    /// Smallest whole number of months for the balance to reach `goal_amount`
    pub fn time_to_goal(
        &self,
        initial_amount: f64,
        monthly_contribution: f64,
        annual_rate: f64,
        goal_amount: f64,
    ) -> ProjectionResult<TimeToGoal> {
        ensure_amount("initial_amount", initial_amount)?;
        ensure_amount("monthly_contribution", monthly_contribution)?;
        ensure_amount("goal_amount", goal_amount)?;
        let rate = self.rate_for(annual_rate)?;
        let timing = self.config.contribution_timing;

        let mut state = AccumulationState::new(initial_amount);
        while state.balance < goal_amount {
            if state.month >= self.config.max_months {
                return Err(ProjectionError::GoalUnreachable {
                    max_months: self.config.max_months,
                });
            }
            state.advance(rate, monthly_contribution, timing);
        }

        Ok(TimeToGoal {
            total_months: state.month,
            years: state.month / 12,
            months: state.month % 12,
            final_amount: state.balance,
            total_invested: state.invested,
            total_interest: state.returns(),
        })
    }

    /// One projection point per month from month 0 through `years * 12`
    pub fn simulate_timeline(
        &self,
        initial_amount: f64,
        monthly_contribution: f64,
        years: u32,
        annual_rate: f64,
    ) -> ProjectionResult<ProjectionSeries> {
        let months = self.months_for(years)?;
        self.simulate_months(initial_amount, monthly_contribution, months, annual_rate, RatePeriod::Annual)
    }

    /// One projection point per month from month 0 through `months`, with the
    /// rate quoted per `period`
    pub fn simulate_months(
        &self,
        initial_amount: f64,
        monthly_contribution: f64,
        months: u32,
        rate: f64,
        period: RatePeriod,
    ) -> ProjectionResult<ProjectionSeries> {
        ensure_amount("initial_amount", initial_amount)?;
        ensure_amount("monthly_contribution", monthly_contribution)?;
        let months = self.check_months(months)?;
        let rate = self.rate_in(rate, period)?;
        let timing = self.config.contribution_timing;

        let mut state = AccumulationState::new(initial_amount);
        let mut points = Vec::with_capacity(months as usize + 1);
        points.push(state.to_point(0.0));

        for _ in 0..months {
            let interest = state.advance(rate, monthly_contribution, timing);
            points.push(state.to_point(interest));
        }

        Ok(ProjectionSeries::from_points(points))
    }

    /// Validate an annual rate and derive its monthly rate
    pub(crate) fn rate_for(&self, annual_rate: f64) -> ProjectionResult<MonthlyRate> {
        self.rate_in(annual_rate, RatePeriod::Annual)
    }

    /// Validate a rate quoted per `period`.
    ///
    /// Monthly rates are bounded through their annual equivalent so both
    /// periods share `max_annual_rate`.
    pub(crate) fn rate_in(&self, rate: f64, period: RatePeriod) -> ProjectionResult<MonthlyRate> {
        let field = match period {
            RatePeriod::Annual => "annual_rate",
            RatePeriod::Monthly => "monthly_rate",
        };
        if !rate.is_finite() {
            return Err(ProjectionError::invalid(field, "must be a finite number"));
        }
        if rate < 0.0 {
            return Err(ProjectionError::invalid(field, format!("must not be negative (got {})", rate)));
        }

        let (monthly, annual) = match period {
            RatePeriod::Annual => (self.config.monthly_rate(rate), rate),
            RatePeriod::Monthly => {
                let monthly = MonthlyRate::from_monthly(rate);
                (monthly, monthly.annual_equivalent(self.config.rate_convention))
            }
        };
        if annual > self.config.max_annual_rate {
            return Err(ProjectionError::invalid(
                field,
                format!(
                    "annual equivalent must not exceed {} (got {})",
                    self.config.max_annual_rate, annual
                ),
            ));
        }
        Ok(monthly)
    }

    /// Validate a horizon in years and convert it to months
    pub(crate) fn months_for(&self, years: u32) -> ProjectionResult<u32> {
        if years > MAX_PROJECTION_YEARS {
            return Err(ProjectionError::invalid(
                "years",
                format!("must not exceed {} (got {})", MAX_PROJECTION_YEARS, years),
            ));
        }
        Ok(years * 12)
    }

    fn check_months(&self, months: u32) -> ProjectionResult<u32> {
        if months > MAX_PROJECTION_MONTHS {
            return Err(ProjectionError::invalid(
                "months",
                format!("must not exceed {} (got {})", MAX_PROJECTION_MONTHS, months),
            ));
        }
        Ok(months)
    }
}

/// Round up to the next multiple of `unit`
pub fn ceil_to_unit(value: f64, unit: f64) -> f64 {
    (value / unit).ceil() * unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ContributionTiming, RateConvention};
    use approx::assert_relative_eq;

    fn engine() -> ProjectionEngine {
        ProjectionEngine::default()
    }

    #[test]
    fn test_principal_only_worked_example() {
        // 10000 * 1.10^3
        let fv = engine().future_value(10_000.0, 0.0, 3, 0.10).unwrap();
        assert_relative_eq!(fv, 13_310.0, max_relative = 1e-9);
    }

    #[test]
    fn test_required_contribution_worked_example() {
        let exact = engine()
            .required_contribution_exact(10_000.0, 1_000_000.0, 20, 0.06)
            .unwrap();
        assert_relative_eq!(exact, 2134.64, max_relative = 1e-5);

        let rounded = engine()
            .solve_required_contribution(10_000.0, 1_000_000.0, 20, 0.06)
            .unwrap();
        assert_eq!(rounded, 2200.0);
    }

    #[test]
    fn test_rounding_unit_is_configurable() {
        let config = ProjectionConfig { rounding_unit: 1.0, ..Default::default() };
        let engine = ProjectionEngine::new(config).unwrap();
        let rounded = engine
            .solve_required_contribution(10_000.0, 1_000_000.0, 20, 0.06)
            .unwrap();
        assert_eq!(rounded, 2135.0);
    }

    #[test]
    fn test_required_contribution_reports_negative_break_even() {
        // 100k at 10% for 10 years is ~259k, far past a 50k goal
        let exact = engine()
            .required_contribution_exact(100_000.0, 50_000.0, 10, 0.10)
            .unwrap();
        assert!(exact < 0.0);

        let plan = engine().plan_contribution(100_000.0, 50_000.0, 10, 0.10).unwrap();
        assert!(plan.goal_already_met());
        assert_eq!(plan.monthly_contribution, 0.0);
        assert!(plan.final_amount > 50_000.0);
    }

    #[test]
    fn test_required_contribution_zero_years_rejected() {
        let err = engine()
            .required_contribution_exact(0.0, 1000.0, 0, 0.05)
            .unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidInput { field: "years", .. }));
    }

    #[test]
    fn test_plan_reaches_goal() {
        let plan = engine().plan_contribution(10_000.0, 1_000_000.0, 20, 0.06).unwrap();
        assert_relative_eq!(plan.final_amount, 1_000_000.0, max_relative = 1e-6);
        assert_relative_eq!(
            plan.total_invested,
            10_000.0 + plan.monthly_contribution * 240.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_time_to_goal() {
        // Zero rate: 1000 + 100/month reaches 2000 after exactly 10 months
        let outcome = engine().time_to_goal(1000.0, 100.0, 0.0, 2000.0).unwrap();
        assert_eq!(outcome.total_months, 10);
        assert_eq!(outcome.years, 0);
        assert_eq!(outcome.months, 10);
        assert_eq!(outcome.total_invested, 2000.0);
        assert_eq!(outcome.total_interest, 0.0);
    }

    #[test]
    fn test_time_to_goal_already_met() {
        let outcome = engine().time_to_goal(5000.0, 0.0, 0.05, 5000.0).unwrap();
        assert_eq!(outcome.total_months, 0);
        assert_eq!(outcome.final_amount, 5000.0);
    }

    #[test]
    fn test_time_to_goal_unreachable() {
        let err = engine().time_to_goal(0.0, 0.0, 0.01, 1_000_000.0).unwrap_err();
        assert_eq!(err, ProjectionError::GoalUnreachable { max_months: 1200 });
    }

    #[test]
    fn test_time_to_goal_matches_timeline() {
        let engine = engine();
        let outcome = engine.time_to_goal(10_000.0, 1500.0, 0.08, 250_000.0).unwrap();
        let series = engine
            .simulate_timeline(10_000.0, 1500.0, outcome.years + 1, 0.08)
            .unwrap();
        assert_eq!(series.first_month_reaching(250_000.0), Some(outcome.total_months));
    }

    #[test]
    fn test_timeline_shape() {
        let series = engine().simulate_timeline(1000.0, 100.0, 2, 0.05).unwrap();
        assert_eq!(series.len(), 25);

        let first = series.points()[0];
        assert_eq!(first.month, 0);
        assert_eq!(first.total_amount, 1000.0);
        assert_eq!(first.total_returns, 0.0);
        assert_eq!(first.monthly_return, 0.0);
    }

    #[test]
    fn test_timeline_matches_closed_form_for_all_configs() {
        for convention in [RateConvention::Effective, RateConvention::Nominal] {
            for timing in [ContributionTiming::EndOfMonth, ContributionTiming::StartOfMonth] {
                let config = ProjectionConfig {
                    rate_convention: convention,
                    contribution_timing: timing,
                    ..Default::default()
                };
                let engine = ProjectionEngine::new(config).unwrap();
                let series = engine.simulate_timeline(25_000.0, 800.0, 15, 0.07).unwrap();
                let fv = engine.future_value(25_000.0, 800.0, 15, 0.07).unwrap();
                let last = series.final_point().unwrap();
                assert_relative_eq!(last.total_amount, fv, max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let engine = engine();
        assert!(engine.future_value(-1.0, 0.0, 1, 0.05).is_err());
        assert!(engine.future_value(0.0, -1.0, 1, 0.05).is_err());
        assert!(engine.future_value(0.0, 0.0, 1, -0.01).is_err());
        assert!(engine.future_value(0.0, 0.0, 1, 1.5).is_err());
        assert!(engine.future_value(0.0, 0.0, 1, f64::NAN).is_err());
        assert!(engine.future_value(0.0, 0.0, MAX_PROJECTION_YEARS + 1, 0.05).is_err());
    }

    #[test]
    fn test_month_horizon_matches_year_horizon() {
        let engine = engine();
        let by_years = engine.future_value(5_000.0, 250.0, 3, 0.08).unwrap();
        let by_months = engine
            .future_value_months(5_000.0, 250.0, 36, 0.08, RatePeriod::Annual)
            .unwrap();
        assert_eq!(by_years, by_months);
    }

    #[test]
    fn test_eighteen_month_timeline() {
        let engine = engine();
        let series = engine
            .simulate_months(1_000.0, 100.0, 18, 0.06, RatePeriod::Annual)
            .unwrap();
        assert_eq!(series.len(), 19);
        assert_eq!(series.final_point().unwrap().month, 18);
        assert_eq!(series.final_point().unwrap().total_invested, 2_800.0);

        let fv = engine
            .future_value_months(1_000.0, 100.0, 18, 0.06, RatePeriod::Annual)
            .unwrap();
        assert_relative_eq!(series.final_point().unwrap().total_amount, fv, max_relative = 1e-9);
    }

    #[test]
    fn test_monthly_rate_used_as_is() {
        // 1% per month on 1000 for 12 months, no contributions
        let fv = engine()
            .future_value_months(1_000.0, 0.0, 12, 0.01, RatePeriod::Monthly)
            .unwrap();
        assert_relative_eq!(fv, 1_000.0 * 1.01f64.powi(12), max_relative = 1e-12);

        // Annuity-due with deposit first, interest after: 100/month at 1% for 2 months
        let config = ProjectionConfig {
            contribution_timing: ContributionTiming::StartOfMonth,
            ..Default::default()
        };
        let series = ProjectionEngine::new(config)
            .unwrap()
            .simulate_months(0.0, 100.0, 2, 0.01, RatePeriod::Monthly)
            .unwrap();
        assert_relative_eq!(series.points()[1].total_amount, 101.0, max_relative = 1e-12);
        assert_relative_eq!(series.points()[2].total_amount, 203.01, max_relative = 1e-12);
    }

    #[test]
    fn test_monthly_rate_bounded_by_annual_equivalent() {
        let engine = engine();
        // 10% per month compounds to over 200% a year
        let err = engine
            .future_value_months(1_000.0, 0.0, 12, 0.10, RatePeriod::Monthly)
            .unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidInput { field: "monthly_rate", .. }));
        assert!(engine
            .future_value_months(1_000.0, 0.0, 12, -0.01, RatePeriod::Monthly)
            .is_err());
        assert!(engine
            .simulate_months(1_000.0, 0.0, MAX_PROJECTION_MONTHS + 1, 0.01, RatePeriod::Monthly)
            .is_err());
    }

    #[test]
    fn test_ceil_to_unit() {
        assert_eq!(ceil_to_unit(2134.64, 100.0), 2200.0);
        assert_eq!(ceil_to_unit(2100.0, 100.0), 2100.0);
        assert_eq!(ceil_to_unit(-250.0, 100.0), -200.0);
    }
}
