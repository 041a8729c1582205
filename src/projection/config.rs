//! Engine configuration and the monthly-rate derivation

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, ProjectionResult};
use super::{DEFAULT_MAX_ANNUAL_RATE, DEFAULT_ROUNDING_UNIT, MAX_PROJECTION_MONTHS, MAX_SIMULATION_MONTHS};

/// How a monthly rate is derived from an annual rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateConvention {
    /// Monthly rate that compounds to the annual rate over twelve months
    #[default]
    Effective,
    /// Annual rate divided by twelve
    Nominal,
}

/// When the monthly contribution lands relative to that month's interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionTiming {
    /// Interest accrues on the opening balance, then the deposit lands
    #[default]
    EndOfMonth,
    /// Deposit first, interest accrues on the post-deposit balance
    StartOfMonth,
}

/// Period a quoted rate applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePeriod {
    #[default]
    Annual,
    /// Rate already quoted per month, used as is
    Monthly,
}

/// Monthly growth rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRate(f64);

impl MonthlyRate {
    /// Derive the monthly rate for an annual rate under a convention
    pub fn from_annual(annual_rate: f64, convention: RateConvention) -> Self {
        let monthly = match convention {
            // (1 + a)^(1/12) - 1, written to keep precision for small rates
            RateConvention::Effective => (annual_rate.ln_1p() / 12.0).exp_m1(),
            RateConvention::Nominal => annual_rate / 12.0,
        };
        Self(monthly)
    }

    /// Use a rate quoted per month directly
    pub fn from_monthly(monthly_rate: f64) -> Self {
        Self(monthly_rate)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Annual rate this monthly rate corresponds to under a convention
    pub fn annual_equivalent(self, convention: RateConvention) -> f64 {
        match convention {
            RateConvention::Effective => (12.0 * self.0.ln_1p()).exp_m1(),
            RateConvention::Nominal => self.0 * 12.0,
        }
    }

    /// Growth factor (1 + r)^months
    pub fn growth(self, months: u32) -> f64 {
        (months as f64 * self.0.ln_1p()).exp()
    }

    /// Future value of one unit contributed every month for `months` months
    pub fn annuity_factor(self, months: u32, timing: ContributionTiming) -> f64 {
        if self.0 == 0.0 {
            return months as f64;
        }
        let ordinary = (months as f64 * self.0.ln_1p()).exp_m1() / self.0;
        match timing {
            ContributionTiming::EndOfMonth => ordinary,
            ContributionTiming::StartOfMonth => ordinary * (1.0 + self.0),
        }
    }
}

/// Request-scoped engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Monthly-rate derivation
    #[serde(default)]
    pub rate_convention: RateConvention,

    /// Deposit timing within each month
    #[serde(default)]
    pub contribution_timing: ContributionTiming,

    /// Granularity for the rounded-up required contribution (default: 100)
    #[serde(default = "default_rounding_unit")]
    pub rounding_unit: f64,

    /// Horizon of the time-to-goal simulation (default: 1200 months, at most 2400)
    #[serde(default = "default_max_months")]
    pub max_months: u32,

    /// Largest accepted annual rate as a decimal (default: 1.0 = 100%)
    #[serde(default = "default_max_annual_rate")]
    pub max_annual_rate: f64,
}

fn default_rounding_unit() -> f64 { DEFAULT_ROUNDING_UNIT }
fn default_max_months() -> u32 { MAX_SIMULATION_MONTHS }
fn default_max_annual_rate() -> f64 { DEFAULT_MAX_ANNUAL_RATE }

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            rate_convention: RateConvention::Effective,
            contribution_timing: ContributionTiming::EndOfMonth,
            rounding_unit: DEFAULT_ROUNDING_UNIT,
            max_months: MAX_SIMULATION_MONTHS,
            max_annual_rate: DEFAULT_MAX_ANNUAL_RATE,
        }
    }
}

impl ProjectionConfig {
    /// Check the configuration itself before any calculation uses it
    pub fn validate(&self) -> ProjectionResult<()> {
        if !(self.rounding_unit.is_finite() && self.rounding_unit > 0.0) {
            return Err(ProjectionError::invalid("rounding_unit", "must be a positive number"));
        }
        if self.max_months == 0 || self.max_months > MAX_PROJECTION_MONTHS {
            return Err(ProjectionError::invalid(
                "max_months",
                format!("must be within 1..={} (got {})", MAX_PROJECTION_MONTHS, self.max_months),
            ));
        }
        if !(self.max_annual_rate.is_finite() && self.max_annual_rate > 0.0) {
            return Err(ProjectionError::invalid("max_annual_rate", "must be a positive number"));
        }
        Ok(())
    }

    /// Monthly rate for an annual rate under this configuration's convention
    pub fn monthly_rate(&self, annual_rate: f64) -> MonthlyRate {
        MonthlyRate::from_annual(annual_rate, self.rate_convention)
    }
}
