//! Assets, liabilities and net worth

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_amount, ProjectionError, ProjectionResult};

pub const ASSET_CATEGORIES: [&str; 5] = [
    "Cash & Bank",
    "Investments",
    "Real Estate",
    "Vehicles",
    "Other Assets",
];

pub const LIABILITY_CATEGORIES: [&str; 5] = [
    "Credit Cards",
    "Personal Loans",
    "Mortgages",
    "Vehicle Loans",
    "Other Debts",
];

/// One named holding or debt within a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BalanceItemFields")]
pub struct BalanceItem {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Amount")]
    amount: f64,
}

#[derive(Deserialize)]
struct BalanceItemFields {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Amount")]
    amount: f64,
}

impl TryFrom<BalanceItemFields> for BalanceItem {
    type Error = ProjectionError;

    fn try_from(f: BalanceItemFields) -> Result<Self, Self::Error> {
        BalanceItem::new(f.category, f.item, f.amount)
    }
}

impl BalanceItem {
    pub fn new(category: impl Into<String>, item: impl Into<String>, amount: f64) -> ProjectionResult<Self> {
        ensure_amount("amount", amount)?;
        let category = category.into().trim().to_string();
        let item = item.into().trim().to_string();
        if category.is_empty() {
            return Err(ProjectionError::invalid("category", "must not be empty"));
        }
        if item.is_empty() {
            return Err(ProjectionError::invalid("item", "must not be empty"));
        }
        Ok(Self { category, item, amount })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// Everything owned and owed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub assets: Vec<BalanceItem>,
    pub liabilities: Vec<BalanceItem>,
}

/// Totals of a balance sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetWorth {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub assets_by_category: BTreeMap<String, f64>,
    pub liabilities_by_category: BTreeMap<String, f64>,
}

impl BalanceSheet {
    pub fn new(assets: Vec<BalanceItem>, liabilities: Vec<BalanceItem>) -> Self {
        Self { assets, liabilities }
    }

    pub fn net_worth(&self) -> NetWorth {
        let assets_by_category = totals_by_category(&self.assets);
        let liabilities_by_category = totals_by_category(&self.liabilities);
        let total_assets: f64 = assets_by_category.values().sum();
        let total_liabilities: f64 = liabilities_by_category.values().sum();

        NetWorth {
            total_assets,
            total_liabilities,
            net_worth: total_assets - total_liabilities,
            assets_by_category,
            liabilities_by_category,
        }
    }
}

fn totals_by_category(items: &[BalanceItem]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for item in items {
        *totals.entry(item.category.clone()).or_insert(0.0) += item.amount;
    }
    totals
}
