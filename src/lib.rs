//! Lifeplan - year-by-year household financial projection engine
//!
//! This library provides:
//! - Household plan records (profile, dependents, life events) and loaders
//! - Education cost reference data and per-dependent cost resolution
//! - Income, expense and event aggregation per simulated year
//! - Savings/investment rollforward producing yearly snapshots
//! - Snapshot persistence hand-off and parallel batch runs

pub mod error;
pub mod plan;
pub mod education;
pub mod projection;
pub mod scenario;
pub mod sink;

// Re-export commonly used types
pub use error::{LoadError, SinkError};
pub use plan::{Dependent, EducationSelection, FinancialProfile, LifeEvent, PlanInputs};
pub use education::{EducationCost, EducationCostTable, EducationStage};
pub use projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, SimulationSnapshot};
pub use scenario::PlanRunner;
pub use sink::{CsvDirectorySink, MemorySink, SnapshotSink};
