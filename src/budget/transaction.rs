//! Income and expense records

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_amount, ProjectionError, ProjectionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A dated income or expense. Amounts are non-negative; the kind carries the sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionFields")]
pub struct Transaction {
    date: NaiveDate,
    kind: TransactionKind,
    category: String,
    amount: f64,
    description: Option<String>,
}

/// Unchecked shape of a stored transaction
#[derive(Deserialize)]
struct TransactionFields {
    date: NaiveDate,
    kind: TransactionKind,
    category: String,
    amount: f64,
    description: Option<String>,
}

impl TryFrom<TransactionFields> for Transaction {
    type Error = ProjectionError;

    fn try_from(f: TransactionFields) -> Result<Self, Self::Error> {
        let mut tx = Transaction::new(f.date, f.kind, f.category, f.amount)?;
        tx.description = f.description.filter(|d| !d.trim().is_empty());
        Ok(tx)
    }
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: f64,
    ) -> ProjectionResult<Self> {
        ensure_amount("amount", amount)?;
        let category = category.into().trim().to_string();
        if category.is_empty() {
            return Err(ProjectionError::invalid("category", "must not be empty"));
        }
        Ok(Self {
            date,
            kind,
            category,
            amount,
            description: None,
        })
    }

    pub fn income(date: NaiveDate, category: impl Into<String>, amount: f64) -> ProjectionResult<Self> {
        Self::new(date, TransactionKind::Income, category, amount)
    }

    pub fn expense(date: NaiveDate, category: impl Into<String>, amount: f64) -> ProjectionResult<Self> {
        Self::new(date, TransactionKind::Expense, category, amount)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// Income against expenses over a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CashFlow {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net: f64,
}

impl CashFlow {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut flow = CashFlow::default();
        for tx in transactions {
            match tx.kind {
                TransactionKind::Income => flow.total_income += tx.amount,
                TransactionKind::Expense => flow.total_expenses += tx.amount,
            }
        }
        flow.net = flow.total_income - flow.total_expenses;
        flow
    }
}

/// Expense totals per category; income is ignored
pub fn spending_by_category<'a, I>(transactions: I) -> HashMap<String, f64>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut spent = HashMap::new();
    for tx in transactions.into_iter().filter(|tx| tx.is_expense()) {
        *spent.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
    }
    spent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = Transaction::expense(day(1), "Food", -10.0).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidInput { field: "amount", .. }));
        assert!(Transaction::expense(day(1), "Food", f64::NAN).is_err());
        assert!(Transaction::income(day(1), "  ", 10.0).is_err());
    }

    #[test]
    fn test_spending_by_category() {
        let txs = vec![
            Transaction::expense(day(1), "Food", 120.0).unwrap(),
            Transaction::expense(day(5), "Food", 80.5).unwrap(),
            Transaction::expense(day(6), "Housing", 1500.0).unwrap(),
            Transaction::income(day(1), "Salary", 5000.0).unwrap(),
        ];
        let spent = spending_by_category(&txs);
        assert_eq!(spent.len(), 2);
        assert_eq!(spent["Food"], 200.5);
        assert_eq!(spent["Housing"], 1500.0);
    }

    #[test]
    fn test_cash_flow() {
        let txs = vec![
            Transaction::income(day(1), "Salary", 5000.0).unwrap(),
            Transaction::income(day(15), "Freelance", 500.0).unwrap(),
            Transaction::expense(day(2), "Housing", 1500.0).unwrap(),
        ];
        let flow = CashFlow::from_transactions(&txs);
        assert_eq!(flow.total_income, 5500.0);
        assert_eq!(flow.total_expenses, 1500.0);
        assert_eq!(flow.net, 4000.0);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Transaction = serde_json::from_str(
            r#"{"date": "2024-03-01", "kind": "expense", "category": "Food", "amount": 12.5, "description": "lunch"}"#,
        )
        .unwrap();
        assert_eq!(ok.description(), Some("lunch"));

        let bad = serde_json::from_str::<Transaction>(
            r#"{"date": "2024-03-01", "kind": "expense", "category": "Food", "amount": -1, "description": null}"#,
        );
        assert!(bad.is_err());
    }
}
