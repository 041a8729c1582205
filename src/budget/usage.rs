//! Spending versus allocation targets

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{ensure_amount, ProjectionResult};
use super::allocation::BudgetAllocation;
use super::transaction::{spending_by_category, Transaction};

/// Usage of one category's target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryUsage {
    pub category: String,
    pub percentage: f64,
    pub target: f64,
    pub spent: f64,
    /// Spent as a percentage of target (0 when the target is 0)
    pub used_percentage: f64,
    pub remaining: f64,
}

impl CategoryUsage {
    /// Spending above target, including any spending against a 0% target
    pub fn over_budget(&self) -> bool {
        self.spent > self.target
    }
}

/// Per-category usage plus totals across the allocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUsage {
    pub categories: Vec<CategoryUsage>,
    pub total_target: f64,
    pub total_spent: f64,
    pub total_used_percentage: f64,
}

impl BudgetUsage {
    /// Compare spending per category against the allocation's targets.
    ///
    /// Spending in categories outside the allocation is ignored.
    pub fn evaluate(
        allocation: &BudgetAllocation,
        monthly_income: f64,
        spent_by_category: &HashMap<String, f64>,
    ) -> ProjectionResult<Self> {
        ensure_amount("monthly_income", monthly_income)?;
        for amount in spent_by_category.values() {
            ensure_amount("spent", *amount)?;
        }

        let mut categories = Vec::with_capacity(allocation.len());
        let mut total_target = 0.0;
        let mut total_spent = 0.0;

        for (category, percentage) in allocation.iter() {
            let target = monthly_income * percentage / 100.0;
            let spent = spent_by_category.get(category).copied().unwrap_or(0.0);
            total_target += target;
            total_spent += spent;

            categories.push(CategoryUsage {
                category: category.to_string(),
                percentage,
                target,
                spent,
                used_percentage: used_percentage(spent, target),
                remaining: target - spent,
            });
        }

        Ok(Self {
            categories,
            total_target,
            total_spent,
            total_used_percentage: used_percentage(total_spent, total_target),
        })
    }

    /// Usage with spending aggregated from expense transactions
    pub fn from_transactions(
        allocation: &BudgetAllocation,
        monthly_income: f64,
        transactions: &[Transaction],
    ) -> ProjectionResult<Self> {
        Self::evaluate(allocation, monthly_income, &spending_by_category(transactions))
    }

    /// Categories whose spending exceeds their target
    pub fn over_budget(&self) -> impl Iterator<Item = &CategoryUsage> {
        self.categories.iter().filter(|c| c.over_budget())
    }
}

fn used_percentage(spent: f64, target: f64) -> f64 {
    if target > 0.0 {
        spent / target * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProjectionError;
    use chrono::NaiveDate;

    #[test]
    fn test_usage() {
        let allocation = BudgetAllocation::new([("Housing", 30.0), ("Food", 15.0), ("Travel", 0.0)]).unwrap();
        let spent: HashMap<String, f64> = [
            ("Housing".to_string(), 1500.0),
            ("Food".to_string(), 300.0),
            ("Travel".to_string(), 50.0),
            ("Gadgets".to_string(), 999.0),
        ]
        .into_iter()
        .collect();

        let usage = BudgetUsage::evaluate(&allocation, 4000.0, &spent).unwrap();
        assert_eq!(usage.categories.len(), 3);

        let housing = usage.categories.iter().find(|c| c.category == "Housing").unwrap();
        assert_eq!(housing.target, 1200.0);
        assert_eq!(housing.remaining, -300.0);
        assert!(housing.over_budget());

        let food = usage.categories.iter().find(|c| c.category == "Food").unwrap();
        assert_eq!(food.used_percentage, 50.0);
        assert!(!food.over_budget());

        // Zero target reports 0% used but any spending is over budget
        let travel = usage.categories.iter().find(|c| c.category == "Travel").unwrap();
        assert_eq!(travel.used_percentage, 0.0);
        assert_eq!(travel.remaining, -50.0);
        assert!(travel.over_budget());

        assert_eq!(usage.total_target, 1800.0);
        assert_eq!(usage.total_spent, 1850.0);
        assert_eq!(usage.over_budget().count(), 2);
    }

    #[test]
    fn test_zero_target_without_spending_is_within_budget() {
        let allocation = BudgetAllocation::new([("Travel", 0.0)]).unwrap();
        let usage = BudgetUsage::evaluate(&allocation, 4000.0, &HashMap::new()).unwrap();
        assert!(!usage.categories[0].over_budget());
    }

    #[test]
    fn test_invalid_spending_rejected() {
        let allocation = BudgetAllocation::new([("Food", 10.0)]).unwrap();
        for amount in [-500.0, f64::NAN, f64::INFINITY] {
            let spent: HashMap<String, f64> = [("Food".to_string(), amount)].into_iter().collect();
            let err = BudgetUsage::evaluate(&allocation, 4000.0, &spent).unwrap_err();
            assert!(matches!(err, ProjectionError::InvalidInput { field: "spent", .. }));
        }
    }

    #[test]
    fn test_usage_from_transactions() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let allocation = BudgetAllocation::new([("Housing", 30.0), ("Food", 15.0)]).unwrap();
        let txs = vec![
            Transaction::expense(date, "Food", 250.0).unwrap(),
            Transaction::expense(date, "Food", 50.0).unwrap(),
            Transaction::income(date, "Food", 1000.0).unwrap(),
            Transaction::expense(date, "Housing", 1300.0).unwrap(),
        ];

        let usage = BudgetUsage::from_transactions(&allocation, 4000.0, &txs).unwrap();
        let food = usage.categories.iter().find(|c| c.category == "Food").unwrap();
        assert_eq!(food.spent, 300.0);
        assert!(!food.over_budget());
        let housing = usage.categories.iter().find(|c| c.category == "Housing").unwrap();
        assert!(housing.over_budget());
    }
}
