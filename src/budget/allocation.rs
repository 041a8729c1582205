//! Budget allocation: percentage of income assigned to each spending category

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, ProjectionResult};

/// Validated category -> percentage map.
///
/// Percentages are in 0..=100 and sum to at most 100. A value of this type
/// never exists in a violated state: construction checks everything up front
/// and updates replace the whole allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct BudgetAllocation {
    allocations: BTreeMap<String, f64>,
}

/// Float slack when comparing the total against 100%
const TOTAL_TOLERANCE: f64 = 1e-9;

impl BudgetAllocation {
    /// Build from (category, percentage) pairs; duplicate categories are rejected
    pub fn new<I, S>(entries: I) -> ProjectionResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut allocations = BTreeMap::new();
        for (category, percentage) in entries {
            let category = category.into();
            let trimmed = category.trim();
            if trimmed.is_empty() {
                return Err(ProjectionError::AllocationInvalid(
                    "Category name cannot be empty".into(),
                ));
            }
            if !percentage.is_finite() {
                return Err(ProjectionError::AllocationInvalid(format!(
                    "Allocation for {} must be a finite number",
                    trimmed
                )));
            }
            if percentage < 0.0 {
                return Err(ProjectionError::AllocationInvalid(format!(
                    "Allocation for {} cannot be negative",
                    trimmed
                )));
            }
            if allocations.insert(trimmed.to_string(), percentage).is_some() {
                return Err(ProjectionError::AllocationInvalid(format!(
                    "Duplicate category: {}",
                    trimmed
                )));
            }
        }

        let total: f64 = allocations.values().sum();
        if total > 100.0 + TOTAL_TOLERANCE {
            return Err(ProjectionError::AllocationInvalid(format!(
                "Total allocation cannot exceed 100% (got {:.2}%)",
                total
            )));
        }

        Ok(Self { allocations })
    }

    /// Standard split used when the user has not set goals yet
    pub fn default_template() -> Self {
        Self {
            allocations: [
                ("Housing", 30.0),
                ("Food", 15.0),
                ("Transportation", 10.0),
                ("Utilities", 10.0),
                ("Entertainment", 5.0),
                ("Investment", 20.0),
                ("Travel", 5.0),
                ("Education", 5.0),
            ]
            .into_iter()
            .map(|(c, p)| (c.to_string(), p))
            .collect(),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.allocations.get(category).copied()
    }

    /// Categories with their percentages, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.allocations.iter().map(|(c, p)| (c.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    pub fn total_percentage(&self) -> f64 {
        self.allocations.values().sum()
    }

    /// Percentage not assigned to any category
    pub fn unallocated_percentage(&self) -> f64 {
        (100.0 - self.total_percentage()).max(0.0)
    }

    /// Target amount per category for a monthly income
    pub fn target_amounts(&self, monthly_income: f64) -> BTreeMap<String, f64> {
        self.allocations
            .iter()
            .map(|(c, p)| (c.clone(), monthly_income * p / 100.0))
            .collect()
    }
}

impl TryFrom<BTreeMap<String, f64>> for BudgetAllocation {
    type Error = ProjectionError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<BudgetAllocation> for BTreeMap<String, f64> {
    fn from(allocation: BudgetAllocation) -> Self {
        allocation.allocations
    }
}
