//! Resolve a dependent's annual education cost for a given year

use super::costs::EducationCostTable;
use super::stage::{EducationStage, EducationTrack};
use crate::plan::Dependent;

/// Outcome of resolving one dependent's education cost for one year
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EducationCost {
    /// Not in any education stage this year
    NotEnrolled,
    /// Cost found for the dependent's recorded selection
    Selected {
        stage: EducationStage,
        track: EducationTrack,
        amount: f64,
    },
    /// No selection recorded; cost found for the default public track
    Defaulted {
        stage: EducationStage,
        track: EducationTrack,
        amount: f64,
    },
    /// The cost table has no row for this stage/track; counts as zero
    Missing {
        stage: EducationStage,
        track: EducationTrack,
    },
}

impl EducationCost {
    /// Annual amount this outcome contributes to expenses
    pub fn amount(&self) -> f64 {
        match self {
            EducationCost::Selected { amount, .. } | EducationCost::Defaulted { amount, .. } => *amount,
            EducationCost::NotEnrolled | EducationCost::Missing { .. } => 0.0,
        }
    }

    pub fn stage(&self) -> Option<EducationStage> {
        match self {
            EducationCost::NotEnrolled => None,
            EducationCost::Selected { stage, .. }
            | EducationCost::Defaulted { stage, .. }
            | EducationCost::Missing { stage, .. } => Some(*stage),
        }
    }
}

/// Resolve the cost attributable to `dependent` in `year`
pub fn resolve(dependent: &Dependent, year: i32, table: &EducationCostTable) -> EducationCost {
    let Some(stage) = dependent.education_stage(year) else {
        return EducationCost::NotEnrolled;
    };

    let (track, defaulted) = match dependent.selection_for(stage) {
        Some(selection) => (selection.track(), false),
        None => (EducationTrack::default_for(stage), true),
    };

    let outcome = match table.lookup(stage, track) {
        Some(amount) if defaulted => EducationCost::Defaulted { stage, track, amount },
        Some(amount) => EducationCost::Selected { stage, track, amount },
        None => {
            log::warn!(
                "no education cost for {} {:?} (dependent {}, year {}); using 0",
                stage.as_str(),
                track,
                dependent.id,
                year
            );
            EducationCost::Missing { stage, track }
        }
    };

    log::debug!(
        "dependent {} year {} age {}: {:?}",
        dependent.id,
        year,
        dependent.age_in(year),
        outcome
    );
    outcome
}

/// Total education cost over all dependents for `year`
pub fn total_for_year(dependents: &[Dependent], year: i32, table: &EducationCostTable) -> f64 {
    dependents
        .iter()
        .map(|d| resolve(d, year, table).amount())
        .sum()
}
