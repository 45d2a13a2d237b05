//! Plan runner for batch projections
//!
//! Loads the education cost table once, then runs any number of plans or
//! configurations against it without re-reading CSV files.

use std::path::Path;

use rayon::prelude::*;

use crate::education::EducationCostTable;
use crate::error::LoadError;
use crate::plan::PlanInputs;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Pre-loaded runner for projecting many plans
///
/// # Example
/// ```ignore
/// let runner = PlanRunner::from_csv_path(Path::new("data/education_costs.csv"))?;
/// let results = runner.run_batch(&plans, &ProjectionConfig::default());
/// ```
#[derive(Debug, Clone)]
pub struct PlanRunner {
    costs: EducationCostTable,
}

impl PlanRunner {
    /// Create runner with the standard in-memory cost table
    pub fn new() -> Self {
        Self {
            costs: EducationCostTable::standard(),
        }
    }

    /// Create runner by loading the cost table from a CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            costs: EducationCostTable::from_csv_path(path)?,
        })
    }

    pub fn with_costs(costs: EducationCostTable) -> Self {
        Self { costs }
    }

    /// Project a single plan
    pub fn run(&self, plan: &PlanInputs, config: &ProjectionConfig) -> ProjectionResult {
        ProjectionEngine::new(self.costs.clone(), config.clone()).project_plan(plan)
    }

    /// Project independent plans in parallel; results keep the input order
    pub fn run_batch(&self, plans: &[PlanInputs], config: &ProjectionConfig) -> Vec<ProjectionResult> {
        let engine = ProjectionEngine::new(self.costs.clone(), config.clone());
        plans.par_iter().map(|plan| engine.project_plan(plan)).collect()
    }

    /// Project one plan under several configurations
    pub fn run_scenarios(&self, plan: &PlanInputs, configs: &[ProjectionConfig]) -> Vec<ProjectionResult> {
        configs.iter().map(|config| self.run(plan, config)).collect()
    }

    pub fn costs(&self) -> &EducationCostTable {
        &self.costs
    }

    pub fn costs_mut(&mut self) -> &mut EducationCostTable {
        &mut self.costs
    }
}

impl Default for PlanRunner {
    fn default() -> Self {
        Self::new()
    }
}
