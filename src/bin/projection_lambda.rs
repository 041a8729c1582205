//! AWS Lambda HTTP handler exposing the projection engine as JSON
//!
//! POST body: `{"operation": "<name>", ...inputs, "config": {...}}`.
//! `config` is optional and falls back to the engine defaults.

use std::collections::{BTreeMap, HashMap};

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use goal_projection::budget::{BalanceItem, BalanceSheet, BudgetAllocation, BudgetUsage, CashFlow, Transaction};
use goal_projection::planning::{
    build_goal_table, generate_contribution_ladder, generate_year_range, GoalInputs, YearRangeParams,
};
use goal_projection::projection::{ProjectionConfig, ProjectionEngine, RatePeriod};
use goal_projection::{ProjectionError, ProjectionResult};

#[derive(Debug, Deserialize)]
struct ProjectionRequest {
    #[serde(default)]
    config: ProjectionConfig,
    #[serde(flatten)]
    operation: Operation,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
enum Operation {
    FutureValue {
        initial_amount: f64,
        monthly_contribution: f64,
        years: u32,
        annual_rate: f64,
    },
    RequiredContribution {
        initial_amount: f64,
        goal_amount: f64,
        years: u32,
        annual_rate: f64,
    },
    TimeToGoal {
        initial_amount: f64,
        monthly_contribution: f64,
        annual_rate: f64,
        goal_amount: f64,
    },
    YearRange {
        initial_amount: f64,
        desired_amount: f64,
        monthly_income: f64,
        #[serde(default)]
        params: YearRangeParams,
    },
    ContributionLadder {
        monthly_income: f64,
        min_contribution: f64,
        #[serde(default = "default_rows")]
        count: usize,
    },
    Timeline {
        initial_amount: f64,
        monthly_contribution: f64,
        years: u32,
        annual_rate: f64,
    },
    /// Month-granular timeline with the rate quoted per `rate_period`
    TimelineMonths {
        initial_amount: f64,
        monthly_contribution: f64,
        months: u32,
        rate: f64,
        #[serde(default)]
        rate_period: RatePeriod,
    },
    GoalTable {
        inputs: GoalInputs,
        #[serde(default)]
        params: YearRangeParams,
        #[serde(default = "default_rows")]
        rows: usize,
    },
    BudgetUsage {
        allocation: BTreeMap<String, f64>,
        monthly_income: f64,
        #[serde(default)]
        spent: HashMap<String, f64>,
        /// Expenses aggregated per category, used instead of `spent` when present
        #[serde(default)]
        transactions: Vec<Transaction>,
    },
    CashFlow {
        transactions: Vec<Transaction>,
    },
    NetWorth {
        #[serde(default)]
        assets: Vec<BalanceItem>,
        #[serde(default)]
        liabilities: Vec<BalanceItem>,
    },
}

fn default_rows() -> usize { 10 }

impl ProjectionRequest {
    fn evaluate(self) -> ProjectionResult<Value> {
        let engine = ProjectionEngine::new(self.config)?;

        let value = match self.operation {
            Operation::FutureValue { initial_amount, monthly_contribution, years, annual_rate } => {
                let fv = engine.future_value(initial_amount, monthly_contribution, years, annual_rate)?;
                json!({ "future_value": fv })
            }
            Operation::RequiredContribution { initial_amount, goal_amount, years, annual_rate } => {
                let rounded = engine.solve_required_contribution(initial_amount, goal_amount, years, annual_rate)?;
                let plan = engine.plan_contribution(initial_amount, goal_amount, years, annual_rate)?;
                json!({ "monthly_contribution": rounded, "plan": plan })
            }
            Operation::TimeToGoal { initial_amount, monthly_contribution, annual_rate, goal_amount } => {
                json!(engine.time_to_goal(initial_amount, monthly_contribution, annual_rate, goal_amount)?)
            }
            Operation::YearRange { initial_amount, desired_amount, monthly_income, params } => {
                json!(generate_year_range(&engine, initial_amount, desired_amount, monthly_income, &params)?)
            }
            Operation::ContributionLadder { monthly_income, min_contribution, count } => {
                json!(generate_contribution_ladder(&engine, monthly_income, min_contribution, count)?)
            }
            Operation::Timeline { initial_amount, monthly_contribution, years, annual_rate } => {
                json!(engine.simulate_timeline(initial_amount, monthly_contribution, years, annual_rate)?)
            }
            Operation::TimelineMonths { initial_amount, monthly_contribution, months, rate, rate_period } => {
                json!(engine.simulate_months(initial_amount, monthly_contribution, months, rate, rate_period)?)
            }
            Operation::GoalTable { inputs, params, rows } => {
                json!(build_goal_table(&engine, &inputs, &params, rows)?)
            }
            Operation::BudgetUsage { allocation, monthly_income, spent, transactions } => {
                let allocation = BudgetAllocation::new(allocation)?;
                let usage = if transactions.is_empty() {
                    BudgetUsage::evaluate(&allocation, monthly_income, &spent)?
                } else {
                    BudgetUsage::from_transactions(&allocation, monthly_income, &transactions)?
                };
                json!(usage)
            }
            Operation::CashFlow { transactions } => json!(CashFlow::from_transactions(&transactions)),
            Operation::NetWorth { assets, liabilities } => {
                json!(BalanceSheet::new(assets, liabilities).net_worth())
            }
        };
        Ok(value)
    }
}

fn status_for(err: &ProjectionError) -> u16 {
    match err {
        ProjectionError::InvalidInput { .. } | ProjectionError::AllocationInvalid(_) => 400,
        ProjectionError::GoalUnreachable { .. } => 422,
        ProjectionError::Storage(_) => 500,
    }
}

fn json_response(status: u16, body: &Value) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;
    Ok(response)
}

/// Parse, evaluate and encode one request as (status, JSON body)
fn respond(body: &[u8]) -> (u16, Value) {
    let request: ProjectionRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Malformed request: {}", e);
            return (400, json!({ "error": e.to_string(), "kind": "malformed_request" }));
        }
    };
    log::debug!("Evaluating {:?}", request.operation);

    match request.evaluate() {
        Ok(value) => (200, value),
        Err(e) => {
            log::info!("Request rejected: {}", e);
            (status_for(&e), json!({ "error": e.to_string(), "kind": e.kind() }))
        }
    }
}

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let (status, body) = respond(event.body().as_ref());
    json_response(status, &body)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
