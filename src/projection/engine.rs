//! Core projection engine for yearly household balance projections

use std::path::Path;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::events::EventSchedule;
use super::expenses::aggregate_expenses;
use super::income::project_income;
use super::snapshot::{ProjectionResult, SimulationSnapshot, YearDetail};
use super::state::BalanceState;
use crate::education::{self, EducationCostTable};
use crate::error::LoadError;
use crate::plan::{FinancialProfile, PlanInputs};

/// Age of the head of household at which the projection ends
pub const FINAL_AGE: i32 = 100;

/// Which income the flat tax and social insurance rates apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxBasis {
    /// The profile's stored base incomes, the same every year
    #[default]
    ProfileBase,
    /// The year's projected income for both earners
    ProjectedIncome,
}

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Flat income tax rate on gross income
    pub income_tax_rate: f64,

    /// Flat social insurance rate on gross income
    pub social_insurance_rate: f64,

    /// Youngest age (inclusive) that gets a snapshot
    pub min_age: i32,

    /// Oldest age (inclusive) that gets a snapshot
    pub max_age: i32,

    /// First projected year; the current calendar year when `None`
    pub start_year: Option<i32>,

    pub tax_basis: TaxBasis,

    /// Attach unrounded per-year detail to each snapshot
    pub detailed_output: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            income_tax_rate: 0.10,
            social_insurance_rate: 0.15,
            min_age: 20,
            max_age: 100,
            start_year: None,
            tax_basis: TaxBasis::ProfileBase,
            detailed_output: false,
        }
    }
}

impl ProjectionConfig {
    /// Load a config from JSON; missing fields keep their defaults
    pub fn from_json_path(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path).map_err(|e| LoadError::io(path, e))?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Start year of the run: the override, or the current calendar year
    pub fn resolve_start_year(&self) -> i32 {
        self.start_year.unwrap_or_else(|| chrono::Local::now().year())
    }

    pub fn age_in_window(&self, age: i32) -> bool {
        age >= self.min_age && age <= self.max_age
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    costs: EducationCostTable,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with a cost table and config
    pub fn new(costs: EducationCostTable, config: ProjectionConfig) -> Self {
        Self { costs, config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the projection for one plan, from the start year until the head
    /// of household turns 100
    pub fn project_plan(&self, plan: &PlanInputs) -> ProjectionResult {
        let profile = &plan.profile;
        let start_year = self.config.resolve_start_year();
        let end_year = profile.birth_year + FINAL_AGE;

        let schedule = EventSchedule::new(&plan.events);
        let mut result = ProjectionResult::new(profile.plan_id, start_year);
        let mut state = BalanceState::from_profile(profile);

        for year in start_year..=end_year {
            let age = profile.age_in(year);
            if !self.config.age_in_window(age) {
                continue;
            }

            let (next, snapshot) = self.calculate_year(plan, &schedule, start_year, year, state);
            state = next;
            result.add_snapshot(snapshot);
        }

        log::info!(
            "plan {}: projected {} years from {} (final savings {:.0}, investments {:.0})",
            profile.plan_id,
            result.snapshots.len(),
            start_year,
            state.savings,
            state.investments
        );
        result
    }

    /// One year's transition: carried state in, next state and snapshot out
    pub fn calculate_year(
        &self,
        plan: &PlanInputs,
        schedule: &EventSchedule<'_>,
        start_year: i32,
        year: i32,
        state: BalanceState,
    ) -> (BalanceState, SimulationSnapshot) {
        let profile = &plan.profile;
        let age = profile.age_in(year);

        let income_self = project_income(&profile.earner_self, start_year, year, profile.income_increase_rate);
        let income_spouse = project_income(&profile.earner_spouse, start_year, year, profile.income_increase_rate);
        let income = income_self + income_spouse;

        let education = education::total_for_year(&plan.dependents, year, &self.costs);
        let taxable_income = self.taxable_income(profile, income);
        let breakdown = aggregate_expenses(profile, year, age, schedule, education, taxable_income, &self.config);

        let investment_return = state.investment_return(profile.investment_return_rate);
        let balance = income - breakdown.total + investment_return;

        let next = state.roll_forward(balance);

        let snapshot = SimulationSnapshot {
            year,
            age,
            income: income as i64,
            expenses: breakdown.total as i64,
            savings: next.savings as i64,
            investments: next.investments as i64,
            balance: balance as i64,
            detail: self.config.detailed_output.then_some(YearDetail {
                income_self,
                income_spouse,
                investment_return,
                expenses: breakdown,
            }),
        };

        (next, snapshot)
    }

    fn taxable_income(&self, profile: &FinancialProfile, projected: f64) -> f64 {
        match self.config.tax_basis {
            TaxBasis::ProfileBase => profile.earner_self.base_income + profile.earner_spouse.base_income,
            TaxBasis::ProjectedIncome => projected,
        }
    }
}
