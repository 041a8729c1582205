//! Goal Projection - compound-interest engine for personal financial goals
//!
//! This library provides:
//! - Future value of a principal plus level monthly contributions
//! - Inverse solvers for the required monthly contribution and the time to goal
//! - Month-by-month projection timelines
//! - Adaptive year ranges and contribution ladders for projection tables
//! - Month-granular projections with annual or monthly quoted rates
//! - Validated budget allocations, transactions and net worth, with CSV persistence

pub mod error;
pub mod projection;
pub mod planning;
pub mod budget;
pub mod storage;

// Re-export commonly used types
pub use error::{ProjectionError, ProjectionResult};
pub use projection::{
    ProjectionEngine, ProjectionConfig, RateConvention, RatePeriod, ContributionTiming,
    ProjectionPoint, ProjectionSeries, TimeToGoal, ContributionPlan,
};
pub use planning::{YearRangeSet, YearRangeParams, ProjectionTable};
pub use budget::{BalanceSheet, BudgetAllocation, BudgetUsage, NetWorth, Transaction};
