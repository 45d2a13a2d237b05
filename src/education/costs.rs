//! Annual education cost reference table

use std::collections::HashMap;
use std::path::Path;

use super::loader;
use super::stage::{EducationStage, EducationTrack, Institution, StudyField};
use crate::error::LoadError;

/// Annual cost keyed by (stage, institution, field-of-study-or-none)
#[derive(Debug, Clone, Default)]
pub struct EducationCostTable {
    costs: HashMap<(EducationStage, EducationTrack), f64>,
}

impl EducationCostTable {
    /// Empty table: every lookup misses
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard table (annual cost in the plan's unit of account)
    pub fn standard() -> Self {
        use EducationStage::*;
        use Institution::*;
        use StudyField::*;

        let mut table = Self::new();
        table.insert(Preschool, Public, None, 20.0);
        table.insert(Preschool, Private, None, 40.0);
        table.insert(Elementary, Public, None, 15.0);
        table.insert(Elementary, Private, None, 100.0);
        table.insert(Middle, Public, None, 25.0);
        table.insert(Middle, Private, None, 120.0);
        table.insert(High, Public, None, 30.0);
        table.insert(High, Private, None, 100.0);
        table.insert(University, Public, Some(Humanities), 54.0);
        table.insert(University, Private, Some(Humanities), 86.0);
        table.insert(University, Public, Some(Science), 65.0);
        table.insert(University, Private, Some(Science), 120.0);
        table
    }

    /// Load from an `education_costs.csv` file
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        let rows = loader::load_cost_rows(path)?;
        Ok(Self::from_rows(rows))
    }

    /// Build from loaded rows; later duplicates replace earlier ones
    pub fn from_rows(rows: impl IntoIterator<Item = loader::CostRow>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.insert(row.stage, row.institution, row.field, row.annual_cost);
        }
        table
    }

    /// Insert or replace a row. The field is ignored outside university.
    pub fn insert(
        &mut self,
        stage: EducationStage,
        institution: Institution,
        field: Option<StudyField>,
        annual_cost: f64,
    ) {
        let track = EducationTrack::for_stage(stage, institution, field);
        self.costs.insert((stage, track), annual_cost);
    }

    /// Annual cost for a stage/track, if the table has that row
    pub fn lookup(&self, stage: EducationStage, track: EducationTrack) -> Option<f64> {
        let track = EducationTrack::for_stage(stage, track.institution, track.field);
        self.costs.get(&(stage, track)).copied()
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_rows() {
        let table = EducationCostTable::standard();
        assert_eq!(table.len(), 12);

        let elementary_public = EducationTrack::for_stage(EducationStage::Elementary, Institution::Public, None);
        assert_eq!(table.lookup(EducationStage::Elementary, elementary_public), Some(15.0));

        let uni_private_science = EducationTrack::for_stage(
            EducationStage::University,
            Institution::Private,
            Some(StudyField::Science),
        );
        assert_eq!(table.lookup(EducationStage::University, uni_private_science), Some(120.0));
    }

    #[test]
    fn test_field_ignored_below_university() {
        let table = EducationCostTable::standard();
        let with_field = EducationTrack {
            institution: Institution::Private,
            field: Some(StudyField::Science),
        };
        assert_eq!(table.lookup(EducationStage::Middle, with_field), Some(120.0));
    }

    #[test]
    fn test_university_without_field_misses() {
        let table = EducationCostTable::standard();
        let no_field = EducationTrack { institution: Institution::Public, field: None };
        assert_eq!(table.lookup(EducationStage::University, no_field), None);
    }

    #[test]
    fn test_load_default_csv_matches_standard() {
        let loaded = EducationCostTable::from_csv_path(Path::new(loader::DEFAULT_COSTS_PATH))
            .expect("Failed to load education costs");
        let standard = EducationCostTable::standard();
        assert_eq!(loaded.len(), standard.len());

        for stage in EducationStage::ALL {
            for institution in [Institution::Public, Institution::Private] {
                for field in [None, Some(StudyField::Humanities), Some(StudyField::Science)] {
                    let track = EducationTrack { institution, field };
                    assert_eq!(loaded.lookup(stage, track), standard.lookup(stage, track));
                }
            }
        }
    }
}
