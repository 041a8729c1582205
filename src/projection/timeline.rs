//! Projection output types

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// One simulated month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub month: u32,
    pub total_invested: f64,
    pub total_amount: f64,
    pub total_returns: f64,
    /// Interest credited during this month (0 for month 0)
    pub monthly_return: f64,
}

/// Month-indexed projection, month 0 holding the initial principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectionSeries {
    points: Vec<ProjectionPoint>,
}

impl ProjectionSeries {
    pub(crate) fn from_points(points: Vec<ProjectionPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ProjectionPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectionPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last simulated month
    pub fn final_point(&self) -> Option<&ProjectionPoint> {
        self.points.last()
    }

    /// First month whose balance reaches `goal`
    pub fn first_month_reaching(&self, goal: f64) -> Option<u32> {
        self.points
            .iter()
            .find(|p| p.total_amount >= goal)
            .map(|p| p.month)
    }
}

impl<'a> IntoIterator for &'a ProjectionSeries {
    type Item = &'a ProjectionPoint;
    type IntoIter = std::slice::Iter<'a, ProjectionPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Outcome of the time-to-goal simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeToGoal {
    pub total_months: u32,
    pub years: u32,
    /// Months beyond the whole years
    pub months: u32,
    pub final_amount: f64,
    pub total_invested: f64,
    pub total_interest: f64,
}

impl TimeToGoal {
    /// Calendar date the goal is reached when saving starts on `start`
    pub fn target_date(&self, start: NaiveDate) -> Option<NaiveDate> {
        start.checked_add_months(Months::new(self.total_months))
    }
}

/// Required monthly contribution together with the outcome of paying it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionPlan {
    /// Unrounded break-even contribution; negative when the principal alone reaches the goal
    pub break_even: f64,
    /// Contribution actually simulated (break-even floored at zero)
    pub monthly_contribution: f64,
    pub final_amount: f64,
    pub total_invested: f64,
    pub total_interest: f64,
}

impl ContributionPlan {
    /// Principal alone already reaches the goal
    pub fn goal_already_met(&self) -> bool {
        self.break_even <= 0.0
    }
}
