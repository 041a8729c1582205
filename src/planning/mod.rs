//! Planning helpers built on the projection engine
//!
//! Generates the inputs of a goal-planner table (year columns, contribution
//! rows) and evaluates the table itself.

pub mod year_range;
pub mod ladder;
pub mod table;

pub use year_range::{YearRangeSet, YearRangeParams, generate_year_range};
pub use ladder::{generate_contribution_ladder, BASELINE_INCOME_PERCENT};
pub use table::{GoalInputs, ProjectionRow, ProjectionTable, build_projection_table, build_goal_table};
