//! Projection engine: future value, goal solvers and monthly timelines

mod config;
mod state;
mod engine;
mod timeline;

pub use config::{ProjectionConfig, RateConvention, RatePeriod, ContributionTiming, MonthlyRate};
pub use state::AccumulationState;
pub use engine::{ProjectionEngine, ceil_to_unit};
pub use timeline::{ProjectionPoint, ProjectionSeries, TimeToGoal, ContributionPlan};

// ============================================================================
// Engine limits and defaults
// ============================================================================

/// Time-to-goal simulation horizon (100 years)
pub const MAX_SIMULATION_MONTHS: u32 = 1200;

/// Longest horizon accepted by the closed-form and timeline operations
pub const MAX_PROJECTION_YEARS: u32 = 200;

/// Same limit in months, also the ceiling for a configured simulation horizon
pub const MAX_PROJECTION_MONTHS: u32 = MAX_PROJECTION_YEARS * 12;

/// Required contributions are rounded up to a multiple of this amount
pub const DEFAULT_ROUNDING_UNIT: f64 = 100.0;

/// Largest accepted annual rate (100%)
pub const DEFAULT_MAX_ANNUAL_RATE: f64 = 1.0;
