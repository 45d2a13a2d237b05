//! Yearly snapshot records and projection results

use serde::{Deserialize, Serialize};

use super::expenses::ExpenseBreakdown;

/// Unrounded figures behind one snapshot, kept when detailed output is on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearDetail {
    pub income_self: f64,
    pub income_spouse: f64,
    pub investment_return: f64,
    pub expenses: ExpenseBreakdown,
}

/// One year of projected income, expenses and balances.
/// Money fields are truncated toward zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub year: i32,
    pub age: i32,
    pub income: i64,
    pub expenses: i64,
    /// Savings balance after this year's rollforward
    pub savings: i64,
    /// Investment balance after this year's rollforward
    pub investments: i64,
    /// income - expenses + investment return
    pub balance: i64,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<YearDetail>,
}

impl SimulationSnapshot {
    pub fn net_worth(&self) -> i64 {
        self.savings + self.investments
    }
}

/// Series shaped for charting a projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub years: Vec<i32>,
    pub savings: Vec<i64>,
    pub income: Vec<i64>,
    pub expenses: Vec<i64>,
    pub balance: Vec<i64>,
}

/// Complete projection for one plan, snapshots ordered by year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub plan_id: u32,
    pub start_year: i32,
    pub snapshots: Vec<SimulationSnapshot>,
}

impl ProjectionResult {
    pub fn new(plan_id: u32, start_year: i32) -> Self {
        Self {
            plan_id,
            start_year,
            snapshots: Vec::new(),
        }
    }

    pub fn add_snapshot(&mut self, snapshot: SimulationSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn get(&self, year: i32) -> Option<&SimulationSnapshot> {
        self.snapshots
            .binary_search_by_key(&year, |s| s.year)
            .ok()
            .map(|idx| &self.snapshots[idx])
    }

    /// Snapshots with `start <= year <= end`
    pub fn window(&self, start: i32, end: i32) -> &[SimulationSnapshot] {
        let lo = self.snapshots.partition_point(|s| s.year < start);
        let hi = self.snapshots.partition_point(|s| s.year <= end);
        if lo >= hi {
            return &[];
        }
        &self.snapshots[lo..hi]
    }

    pub fn chart_data(&self) -> ChartData {
        ChartData {
            years: self.snapshots.iter().map(|s| s.year).collect(),
            savings: self.snapshots.iter().map(|s| s.savings).collect(),
            income: self.snapshots.iter().map(|s| s.income).collect(),
            expenses: self.snapshots.iter().map(|s| s.expenses).collect(),
            balance: self.snapshots.iter().map(|s| s.balance).collect(),
        }
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_income: i64 = self.snapshots.iter().map(|s| s.income).sum();
        let total_expenses: i64 = self.snapshots.iter().map(|s| s.expenses).sum();

        let peak = self
            .snapshots
            .iter()
            .max_by_key(|s| s.net_worth())
            .map(|s| (s.year, s.net_worth()));

        let depletion_year = self
            .snapshots
            .iter()
            .find(|s| s.savings <= 0 && s.investments <= 0)
            .map(|s| s.year);

        let last = self.snapshots.last();

        ProjectionSummary {
            total_years: self.snapshots.len() as u32,
            first_year: self.snapshots.first().map(|s| s.year),
            last_year: last.map(|s| s.year),
            total_income,
            total_expenses,
            final_savings: last.map(|s| s.savings).unwrap_or(0),
            final_investments: last.map(|s| s.investments).unwrap_or(0),
            peak_net_worth: peak.map(|(_, worth)| worth).unwrap_or(0),
            peak_year: peak.map(|(year, _)| year),
            depletion_year,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub total_income: i64,
    pub total_expenses: i64,
    pub final_savings: i64,
    pub final_investments: i64,
    pub peak_net_worth: i64,
    pub peak_year: Option<i32>,
    /// First year both balances are exhausted
    pub depletion_year: Option<i32>,
}
