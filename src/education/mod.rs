//! Education reference data and per-dependent cost resolution

mod stage;
mod costs;
mod resolver;
pub mod loader;

pub use stage::{EducationStage, EducationTrack, Institution, StudyField};
pub use costs::EducationCostTable;
pub use resolver::{resolve, total_for_year, EducationCost};
pub use loader::CostRow;
