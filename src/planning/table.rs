//! Projection table: future value for every (contribution, horizon) pair

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_amount, ProjectionResult};
use crate::projection::ProjectionEngine;
use super::ladder::generate_contribution_ladder;
use super::year_range::{generate_year_range, YearRangeParams, YearRangeSet};

/// Scalars entered by the user for the goal planner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalInputs {
    pub initial_amount: f64,
    pub desired_amount: f64,
    pub annual_income: f64,
    pub monthly_income: f64,
}

impl GoalInputs {
    /// Inputs with the monthly income derived from the annual income
    pub fn from_annual_income(initial_amount: f64, desired_amount: f64, annual_income: f64) -> Self {
        Self {
            initial_amount,
            desired_amount,
            annual_income,
            monthly_income: annual_income / 12.0,
        }
    }

    /// Every amount must be finite and non-negative
    pub fn validate(&self) -> ProjectionResult<()> {
        ensure_amount("initial_amount", self.initial_amount)?;
        ensure_amount("desired_amount", self.desired_amount)?;
        ensure_amount("annual_income", self.annual_income)?;
        ensure_amount("monthly_income", self.monthly_income)
    }
}

/// One row of the table: a contribution and its value at each horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub monthly_contribution: f64,
    pub values: Vec<f64>,
}

/// Future values laid out as contribution rows by year columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionTable {
    pub years: YearRangeSet,
    pub rows: Vec<ProjectionRow>,
}

impl ProjectionTable {
    /// Value at (row, column)
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.values.get(col).copied())
    }

    /// Cell reaches the goal amount
    pub fn goal_reached(&self, row: usize, col: usize, goal: f64) -> bool {
        self.value(row, col).is_some_and(|v| v >= goal)
    }

    /// Smallest contribution reaching the goal at column `col`
    pub fn cheapest_reaching(&self, col: usize, goal: f64) -> Option<f64> {
        self.rows
            .iter()
            .filter(|r| r.values.get(col).is_some_and(|&v| v >= goal))
            .map(|r| r.monthly_contribution)
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Evaluate the future value of each contribution at each horizon
pub fn build_projection_table(
    engine: &ProjectionEngine,
    initial_amount: f64,
    contributions: &[f64],
    years: &YearRangeSet,
    annual_rate: f64,
) -> ProjectionResult<ProjectionTable> {
    ensure_amount("initial_amount", initial_amount)?;
    for &contribution in contributions {
        ensure_amount("monthly_contribution", contribution)?;
    }
    let rate = engine.rate_for(annual_rate)?;
    let months = years
        .iter()
        .map(|y| engine.months_for(y))
        .collect::<ProjectionResult<Vec<u32>>>()?;

    let rows: Vec<ProjectionRow> = contributions
        .par_iter()
        .map(|&contribution| ProjectionRow {
            monthly_contribution: contribution,
            values: months
                .iter()
                .map(|&m| engine.future_value_unchecked(initial_amount, contribution, m, rate))
                .collect(),
        })
        .collect();

    log::debug!(
        "Built projection table: {} rows x {} columns",
        rows.len(),
        years.len()
    );

    Ok(ProjectionTable {
        years: years.clone(),
        rows,
    })
}

/// Full goal-planner table: adaptive year columns and a contribution ladder
/// topping out at the contribution needed for the shortest shown horizon
pub fn build_goal_table(
    engine: &ProjectionEngine,
    inputs: &GoalInputs,
    params: &YearRangeParams,
    ladder_len: usize,
) -> ProjectionResult<ProjectionTable> {
    inputs.validate()?;
    let years = generate_year_range(
        engine,
        inputs.initial_amount,
        inputs.desired_amount,
        inputs.monthly_income,
        params,
    )?;

    let required = engine.solve_required_contribution(
        inputs.initial_amount,
        inputs.desired_amount,
        years.first(),
        params.annual_rate,
    )?;
    // Negative means the principal alone already gets there
    let min_contribution = required.max(0.0);
    log::debug!(
        "Goal table: {} years needs {:.2}/month (unclamped {:.2})",
        years.first(),
        min_contribution,
        required
    );

    let contributions = generate_contribution_ladder(engine, inputs.monthly_income, min_contribution, ladder_len)?;
    build_projection_table(engine, inputs.initial_amount, &contributions, &years, params.annual_rate)
}
