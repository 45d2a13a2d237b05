//! Load the education cost table from education_costs.csv

use std::fs::File;
use std::path::Path;

use super::stage::{EducationStage, Institution, StudyField};
use crate::error::LoadError;

/// Default location of the cost table
pub const DEFAULT_COSTS_PATH: &str = "data/education_costs.csv";

/// Raw CSV row matching education_costs.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    education_type: String,
    institution_type: String,
    #[serde(default)]
    academic_field: String,
    annual_cost: f64,
}

/// A validated cost table row
#[derive(Debug, Clone, PartialEq)]
pub struct CostRow {
    pub stage: EducationStage,
    pub institution: Institution,
    pub field: Option<StudyField>,
    pub annual_cost: f64,
}

impl CsvRow {
    fn to_cost_row(self) -> Result<CostRow, LoadError> {
        Ok(CostRow {
            stage: EducationStage::parse(&self.education_type)?,
            institution: Institution::parse(&self.institution_type)?,
            field: StudyField::parse_optional(&self.academic_field)?,
            annual_cost: self.annual_cost,
        })
    }
}

/// Load cost rows from a CSV file
pub fn load_cost_rows(path: &Path) -> Result<Vec<CostRow>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    load_cost_rows_from_reader(file)
}

/// Load cost rows from any reader
pub fn load_cost_rows_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<CostRow>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(row.to_cost_row()?);
    }

    log::debug!("loaded {} education cost rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_reader() {
        let data = "education_type,institution_type,academic_field,annual_cost\n\
                    preschool,public,,20\n\
                    university,private,science,120\n";
        let rows = load_cost_rows_from_reader(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].stage, EducationStage::Preschool);
        assert_eq!(rows[0].field, None);
        assert_eq!(rows[1].field, Some(StudyField::Science));
        assert_eq!(rows[1].annual_cost, 120.0);
    }

    #[test]
    fn test_unknown_institution_rejected() {
        let data = "education_type,institution_type,academic_field,annual_cost\n\
                    high,boarding,,30\n";
        let err = load_cost_rows_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownValue { field: "institution", .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_cost_rows(Path::new("data/does_not_exist.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
