//! Command-line goal planner
//!
//! Thin front end over the projection engine: every subcommand parses scalars,
//! calls one engine operation and prints the result.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

use goal_projection::budget::{spending_by_category, BalanceSheet, BudgetAllocation, BudgetUsage, CashFlow};
use goal_projection::planning::{
    build_goal_table, build_projection_table, generate_contribution_ladder, generate_year_range,
    GoalInputs, YearRangeParams, YearRangeSet,
};
use goal_projection::projection::{ContributionTiming, ProjectionConfig, ProjectionEngine, RateConvention, RatePeriod};
use goal_projection::storage;

#[derive(Parser)]
#[command(
    name = "goal_planner",
    version,
    about = "Project savings growth and solve for financial goals"
)]
struct Cli {
    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct EngineArgs {
    /// Monthly-rate convention
    #[arg(long, global = true, value_enum, default_value_t = ConventionArg::Effective)]
    convention: ConventionArg,

    /// Whether contributions land at the end or the start of each month
    #[arg(long, global = true, value_enum, default_value_t = TimingArg::End)]
    timing: TimingArg,

    /// Granularity for rounded-up contributions
    #[arg(long, global = true, default_value_t = 100.0)]
    rounding_unit: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum ConventionArg {
    Effective,
    Nominal,
}

#[derive(Clone, Copy, ValueEnum)]
enum TimingArg {
    End,
    Start,
}

impl EngineArgs {
    fn to_config(&self) -> ProjectionConfig {
        ProjectionConfig {
            rate_convention: match self.convention {
                ConventionArg::Effective => RateConvention::Effective,
                ConventionArg::Nominal => RateConvention::Nominal,
            },
            contribution_timing: match self.timing {
                TimingArg::End => ContributionTiming::EndOfMonth,
                TimingArg::Start => ContributionTiming::StartOfMonth,
            },
            rounding_unit: self.rounding_unit,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Future value of a principal plus monthly contributions
    #[command(alias = "fv")]
    FutureValue {
        #[arg(long, default_value_t = 0.0)]
        initial: f64,
        #[arg(long, default_value_t = 0.0)]
        contribution: f64,
        #[command(flatten)]
        horizon: HorizonArgs,
        /// Return as a decimal (0.10 = 10%) per --rate-period
        #[arg(long, default_value_t = 0.10)]
        rate: f64,
        #[arg(long, value_enum, default_value_t = PeriodArg::Annual)]
        rate_period: PeriodArg,
    },

    /// Monthly contribution needed to reach a goal in a given time
    Contribution {
        #[arg(long, default_value_t = 0.0)]
        initial: f64,
        #[arg(long)]
        goal: f64,
        #[arg(long)]
        years: u32,
        #[arg(long, default_value_t = 0.10)]
        rate: f64,
    },

    /// Time needed to reach a goal with a given contribution
    TimeToGoal {
        #[arg(long, default_value_t = 0.0)]
        initial: f64,
        #[arg(long)]
        contribution: f64,
        #[arg(long)]
        goal: f64,
        #[arg(long, default_value_t = 0.10)]
        rate: f64,
        /// First month of saving (YYYY-MM-DD), defaults to the current month
        #[arg(long)]
        start: Option<NaiveDate>,
    },

    /// Year columns bracketing the time to goal
    Years {
        #[arg(long, default_value_t = 0.0)]
        initial: f64,
        #[arg(long)]
        goal: f64,
        #[arg(long)]
        monthly_income: f64,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Contribution ladder from 1% of income up to a minimum contribution
    Ladder {
        #[arg(long)]
        monthly_income: f64,
        #[arg(long)]
        min_contribution: f64,
        #[arg(long, default_value_t = 10)]
        count: usize,
    },

    /// Month-by-month projection as CSV
    Timeline {
        #[arg(long, default_value_t = 0.0)]
        initial: f64,
        #[arg(long, default_value_t = 0.0)]
        contribution: f64,
        #[command(flatten)]
        horizon: HorizonArgs,
        #[arg(long, default_value_t = 0.10)]
        rate: f64,
        #[arg(long, value_enum, default_value_t = PeriodArg::Annual)]
        rate_period: PeriodArg,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Projection table of contributions by years
    #[command(group(ArgGroup::new("income_source").required(true).args(["annual_income", "inputs"])))]
    Table {
        #[arg(long, default_value_t = 0.0)]
        initial: f64,
        #[arg(long, required_unless_present = "inputs")]
        goal: Option<f64>,
        /// Annual income; monthly income is derived from it
        #[arg(long, requires = "goal")]
        annual_income: Option<f64>,
        /// Load initial/goal/income from a saved goal file instead
        #[arg(long, conflicts_with = "annual_income")]
        inputs: Option<PathBuf>,
        /// Explicit contributions (comma separated) instead of a ladder
        #[arg(long, value_delimiter = ',')]
        contributions: Vec<f64>,
        /// Explicit years (comma separated) instead of an adaptive range
        #[arg(long, value_delimiter = ',')]
        years: Vec<u32>,
        #[arg(long, default_value_t = 10)]
        rows: usize,
        #[command(flatten)]
        range: RangeArgs,
        /// Save the goal inputs used for this table
        #[arg(long)]
        save_inputs: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a saved allocation and compare spending against it
    Budget {
        /// Allocation CSV (Category,Percentage)
        #[arg(long)]
        allocation: Option<PathBuf>,
        #[arg(long)]
        monthly_income: f64,
        /// Spending as Category=Amount pairs
        #[arg(long, value_parser = parse_spending)]
        spent: Vec<(String, f64)>,
        /// Transactions CSV; its expenses are added to --spent
        #[arg(long)]
        transactions: Option<PathBuf>,
        /// Write the default allocation template to this path
        #[arg(long)]
        write_default: Option<PathBuf>,
    },

    /// Total assets, liabilities and net worth from Category,Item,Amount files
    NetWorth {
        #[arg(long)]
        assets: PathBuf,
        #[arg(long)]
        liabilities: PathBuf,
    },
}

/// Horizon given either in whole years or in months
#[derive(Args)]
#[group(required = true, multiple = false)]
struct HorizonArgs {
    #[arg(long)]
    years: Option<u32>,
    #[arg(long)]
    months: Option<u32>,
}

impl HorizonArgs {
    fn total_months(&self) -> u32 {
        match (self.months, self.years) {
            (Some(months), _) => months,
            // Out-of-range horizons are rejected by the engine
            (None, Some(years)) => years.saturating_mul(12),
            (None, None) => 0,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PeriodArg {
    Annual,
    Monthly,
}

impl From<PeriodArg> for RatePeriod {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Annual => RatePeriod::Annual,
            PeriodArg::Monthly => RatePeriod::Monthly,
        }
    }
}

#[derive(Args)]
struct RangeArgs {
    #[arg(long, default_value_t = 0.10)]
    rate: f64,
    #[arg(long, default_value_t = 5)]
    min_years: u32,
    #[arg(long, default_value_t = 40)]
    max_years: u32,
    #[arg(long, default_value_t = 7)]
    points: usize,
}

impl RangeArgs {
    fn to_params(&self) -> YearRangeParams {
        YearRangeParams {
            annual_rate: self.rate,
            min_years: self.min_years,
            max_years: self.max_years,
            num_points: self.points,
            ..Default::default()
        }
    }
}

fn parse_spending(s: &str) -> Result<(String, f64), String> {
    let (category, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected Category=Amount, got '{}'", s))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid amount '{}': {}", amount, e))?;
    Ok((category.trim().to_string(), amount))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let engine = ProjectionEngine::new(cli.engine.to_config())?;
    log::debug!("Engine config: {:?}", engine.config());

    match cli.command {
        Commands::FutureValue { initial, contribution, horizon, rate, rate_period } => {
            let months = horizon.total_months();
            let fv = engine.future_value_months(initial, contribution, months, rate, rate_period.into())?;
            println!("Future value after {} years and {} months: {:.2}", months / 12, months % 12, fv);
        }

        Commands::Contribution { initial, goal, years, rate } => {
            let rounded = engine.solve_required_contribution(initial, goal, years, rate)?;
            let plan = engine.plan_contribution(initial, goal, years, rate)?;
            if plan.goal_already_met() {
                println!("Goal already reached by the initial amount alone (break-even {:.2}/month)", plan.break_even);
            } else {
                println!("Required monthly contribution: {:.2} (rounded up: {:.2})", plan.break_even, rounded);
            }
            println!("  Final amount:   {:.2}", plan.final_amount);
            println!("  Total invested: {:.2}", plan.total_invested);
            println!("  Total interest: {:.2}", plan.total_interest);
        }

        Commands::TimeToGoal { initial, contribution, goal, rate, start } => {
            let outcome = engine.time_to_goal(initial, contribution, rate, goal)?;
            let start = start.unwrap_or_else(current_month);
            println!("Goal reached in {} years and {} months", outcome.years, outcome.months);
            if let Some(date) = outcome.target_date(start) {
                println!("  Target date:    {}", date.format("%Y-%m"));
            }
            println!("  Final amount:   {:.2}", outcome.final_amount);
            println!("  Total invested: {:.2}", outcome.total_invested);
            println!("  Total interest: {:.2}", outcome.total_interest);
        }

        Commands::Years { initial, goal, monthly_income, range } => {
            let years = generate_year_range(&engine, initial, goal, monthly_income, &range.to_params())?;
            let labels: Vec<String> = years.iter().map(|y| y.to_string()).collect();
            println!("{}", labels.join(", "));
        }

        Commands::Ladder { monthly_income, min_contribution, count } => {
            let ladder = generate_contribution_ladder(&engine, monthly_income, min_contribution, count)?;
            for amount in ladder {
                println!("{:.2}", amount);
            }
        }

        Commands::Timeline { initial, contribution, horizon, rate, rate_period, output } => {
            let months = horizon.total_months();
            let series = engine.simulate_months(initial, contribution, months, rate, rate_period.into())?;
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    storage::write_timeline_csv(file, &series)?;
                    println!("Timeline written to {}", path.display());
                }
                None => storage::write_timeline_csv(io::stdout().lock(), &series)?,
            }
        }

        Commands::Table {
            initial,
            goal,
            annual_income,
            inputs,
            contributions,
            years,
            rows,
            range,
            save_inputs,
            output,
        } => {
            let start = Instant::now();
            let goal_inputs = match inputs {
                Some(path) => storage::load_goal_inputs(&path)?
                    .with_context(|| format!("No goal inputs saved in {}", path.display()))?,
                None => {
                    let goal = goal.context("--goal is required without --inputs")?;
                    let annual_income = annual_income.context("--annual-income or --inputs is required")?;
                    GoalInputs::from_annual_income(initial, goal, annual_income)
                }
            };
            if let Some(path) = save_inputs {
                storage::save_goal_inputs(&path, &goal_inputs)?;
            }

            let params = range.to_params();
            let table = if contributions.is_empty() && years.is_empty() {
                build_goal_table(&engine, &goal_inputs, &params, rows)?
            } else {
                let years = if years.is_empty() {
                    generate_year_range(
                        &engine,
                        goal_inputs.initial_amount,
                        goal_inputs.desired_amount,
                        goal_inputs.monthly_income,
                        &params,
                    )?
                } else {
                    YearRangeSet::new(years)?
                };
                let contributions = if contributions.is_empty() {
                    let required = engine.solve_required_contribution(
                        goal_inputs.initial_amount,
                        goal_inputs.desired_amount,
                        years.first(),
                        params.annual_rate,
                    )?;
                    generate_contribution_ladder(&engine, goal_inputs.monthly_income, required.max(0.0), rows)?
                } else {
                    contributions
                };
                build_projection_table(&engine, goal_inputs.initial_amount, &contributions, &years, params.annual_rate)?
            };

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    storage::write_table_csv(file, &table)?;
                    println!("Table written to {}", path.display());
                }
                None => storage::write_table_csv(io::stdout().lock(), &table)?,
            }

            for (col, years) in table.years.iter().enumerate() {
                match table.cheapest_reaching(col, goal_inputs.desired_amount) {
                    Some(amount) => eprintln!("{:>3} years: goal reached from {:.2}/month", years, amount),
                    None => eprintln!("{:>3} years: goal not reached by any row", years),
                }
            }
            log::info!("Table built in {:?}", start.elapsed());
        }

        Commands::Budget { allocation, monthly_income, spent, transactions, write_default } => {
            if let Some(path) = write_default {
                storage::save_allocation(&path, &BudgetAllocation::default_template())?;
                println!("Default allocation written to {}", path.display());
            }

            let allocation = match allocation {
                Some(path) => storage::load_allocation(&path)?.unwrap_or_else(|| {
                    log::warn!("No allocation in {}, using the default template", path.display());
                    BudgetAllocation::default_template()
                }),
                None => BudgetAllocation::default_template(),
            };

            let mut spent: HashMap<String, f64> = spent.into_iter().collect();
            if let Some(path) = transactions {
                let transactions = storage::load_transactions(&path)?;
                let flow = CashFlow::from_transactions(&transactions);
                println!(
                    "Cash flow: income {:.2}, expenses {:.2}, net {:.2}",
                    flow.total_income, flow.total_expenses, flow.net
                );
                for (category, amount) in spending_by_category(&transactions) {
                    *spent.entry(category).or_insert(0.0) += amount;
                }
            }
            let usage = BudgetUsage::evaluate(&allocation, monthly_income, &spent)?;

            println!("{:<16} {:>8} {:>12} {:>12} {:>8} {:>12}", "Category", "Pct", "Target", "Spent", "Used", "Remaining");
            for row in &usage.categories {
                println!(
                    "{:<16} {:>7.1}% {:>12.2} {:>12.2} {:>7.1}% {:>12.2}{}",
                    row.category,
                    row.percentage,
                    row.target,
                    row.spent,
                    row.used_percentage,
                    row.remaining,
                    if row.over_budget() { "  over" } else { "" }
                );
            }
            println!(
                "{:<16} {:>7.1}% {:>12.2} {:>12.2} {:>7.1}% {:>12.2}",
                "Total",
                allocation.total_percentage(),
                usage.total_target,
                usage.total_spent,
                usage.total_used_percentage,
                usage.total_target - usage.total_spent
            );
        }

        Commands::NetWorth { assets, liabilities } => {
            let sheet = BalanceSheet::new(
                storage::load_balance_items(&assets)?,
                storage::load_balance_items(&liabilities)?,
            );
            let summary = sheet.net_worth();
            for (category, total) in &summary.assets_by_category {
                println!("  {:<20} {:>14.2}", category, total);
            }
            println!("Total assets:      {:>14.2}", summary.total_assets);
            for (category, total) in &summary.liabilities_by_category {
                println!("  {:<20} {:>14.2}", category, total);
            }
            println!("Total liabilities: {:>14.2}", summary.total_liabilities);
            println!("Net worth:         {:>14.2}", summary.net_worth);
        }
    }

    Ok(())
}

fn current_month() -> NaiveDate {
    let today = Local::now().date_naive();
    today.with_day(1).unwrap_or(today)
}
