//! Month-by-month accumulation state shared by the timeline and the time-to-goal solver

use super::config::{ContributionTiming, MonthlyRate};
use super::timeline::ProjectionPoint;

/// Running balance of an account receiving level monthly contributions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccumulationState {
    /// Months elapsed (0 = opening balance)
    pub month: u32,
    /// Current balance including returns
    pub balance: f64,
    /// Principal plus every contribution made so far
    pub invested: f64,
}

impl AccumulationState {
    /// Opening state holding only the principal
    pub fn new(initial_amount: f64) -> Self {
        Self {
            month: 0,
            balance: initial_amount,
            invested: initial_amount,
        }
    }

    /// Advance one month; returns the interest credited in that month
    pub fn advance(&mut self, rate: MonthlyRate, contribution: f64, timing: ContributionTiming) -> f64 {
        let interest = match timing {
            ContributionTiming::EndOfMonth => {
                let interest = self.balance * rate.value();
                self.balance += interest + contribution;
                interest
            }
            ContributionTiming::StartOfMonth => {
                self.balance += contribution;
                let interest = self.balance * rate.value();
                self.balance += interest;
                interest
            }
        };
        self.invested += contribution;
        self.month += 1;
        interest
    }

    /// Returns earned so far
    pub fn returns(&self) -> f64 {
        self.balance - self.invested
    }

    /// Snapshot as a projection point
    pub fn to_point(&self, monthly_return: f64) -> ProjectionPoint {
        ProjectionPoint {
            month: self.month,
            total_invested: self.invested,
            total_amount: self.balance,
            total_returns: self.returns(),
            monthly_return,
        }
    }
}
