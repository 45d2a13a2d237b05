//! Education stages, institution tracks and the age-to-stage bands

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Stage of schooling, derived purely from a dependent's age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationStage {
    /// Ages 3-5
    Preschool,
    /// Ages 6-11
    Elementary,
    /// Ages 12-14
    Middle,
    /// Ages 15-17
    High,
    /// Ages 18-21
    University,
}

impl EducationStage {
    pub const ALL: [EducationStage; 5] = [
        EducationStage::Preschool,
        EducationStage::Elementary,
        EducationStage::Middle,
        EducationStage::High,
        EducationStage::University,
    ];

    /// Map an age to its stage. `None` before age 3 and from age 22 on.
    pub fn for_age(age: i32) -> Option<Self> {
        match age {
            3..=5 => Some(EducationStage::Preschool),
            6..=11 => Some(EducationStage::Elementary),
            12..=14 => Some(EducationStage::Middle),
            15..=17 => Some(EducationStage::High),
            18..=21 => Some(EducationStage::University),
            _ => None,
        }
    }

    pub fn is_university(&self) -> bool {
        matches!(self, EducationStage::University)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationStage::Preschool => "preschool",
            EducationStage::Elementary => "elementary",
            EducationStage::Middle => "middle",
            EducationStage::High => "high",
            EducationStage::University => "university",
        }
    }

    pub fn parse(value: &str) -> Result<Self, LoadError> {
        match value.trim() {
            "preschool" => Ok(EducationStage::Preschool),
            "elementary" => Ok(EducationStage::Elementary),
            "middle" => Ok(EducationStage::Middle),
            "high" => Ok(EducationStage::High),
            "university" => Ok(EducationStage::University),
            other => Err(LoadError::unknown("education stage", other)),
        }
    }
}

/// Public or private institution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Institution {
    Public,
    Private,
}

impl Institution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Institution::Public => "public",
            Institution::Private => "private",
        }
    }

    pub fn parse(value: &str) -> Result<Self, LoadError> {
        match value.trim() {
            "public" => Ok(Institution::Public),
            "private" => Ok(Institution::Private),
            other => Err(LoadError::unknown("institution", other)),
        }
    }
}

/// Field of study, university only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyField {
    Humanities,
    Science,
}

impl StudyField {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyField::Humanities => "humanities",
            StudyField::Science => "science",
        }
    }

    /// Parse an optional tag; blank means no field
    pub fn parse_optional(value: &str) -> Result<Option<Self>, LoadError> {
        match value.trim() {
            "" => Ok(None),
            "humanities" => Ok(Some(StudyField::Humanities)),
            "science" => Ok(Some(StudyField::Science)),
            other => Err(LoadError::unknown("field of study", other)),
        }
    }
}

/// Institution plus (university only) field of study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EducationTrack {
    pub institution: Institution,
    pub field: Option<StudyField>,
}

impl EducationTrack {
    /// Build a track for a stage, dropping the field outside university
    pub fn for_stage(stage: EducationStage, institution: Institution, field: Option<StudyField>) -> Self {
        Self {
            institution,
            field: if stage.is_university() { field } else { None },
        }
    }

    /// Track used when a dependent has no selection recorded for a stage
    pub fn default_for(stage: EducationStage) -> Self {
        Self::for_stage(stage, Institution::Public, Some(StudyField::Humanities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bands() {
        assert_eq!(EducationStage::for_age(-1), None);
        assert_eq!(EducationStage::for_age(2), None);
        assert_eq!(EducationStage::for_age(3), Some(EducationStage::Preschool));
        assert_eq!(EducationStage::for_age(5), Some(EducationStage::Preschool));
        assert_eq!(EducationStage::for_age(6), Some(EducationStage::Elementary));
        assert_eq!(EducationStage::for_age(11), Some(EducationStage::Elementary));
        assert_eq!(EducationStage::for_age(12), Some(EducationStage::Middle));
        assert_eq!(EducationStage::for_age(14), Some(EducationStage::Middle));
        assert_eq!(EducationStage::for_age(15), Some(EducationStage::High));
        assert_eq!(EducationStage::for_age(17), Some(EducationStage::High));
        assert_eq!(EducationStage::for_age(18), Some(EducationStage::University));
        assert_eq!(EducationStage::for_age(21), Some(EducationStage::University));
        assert_eq!(EducationStage::for_age(22), None);
        assert_eq!(EducationStage::for_age(60), None);
    }

    #[test]
    fn test_field_dropped_outside_university() {
        let track = EducationTrack::for_stage(
            EducationStage::High,
            Institution::Private,
            Some(StudyField::Science),
        );
        assert_eq!(track.field, None);

        let default_uni = EducationTrack::default_for(EducationStage::University);
        assert_eq!(default_uni.institution, Institution::Public);
        assert_eq!(default_uni.field, Some(StudyField::Humanities));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(EducationStage::parse("middle").unwrap(), EducationStage::Middle);
        assert!(EducationStage::parse("college").is_err());
        assert_eq!(StudyField::parse_optional("").unwrap(), None);
        assert_eq!(Institution::parse(" private ").unwrap(), Institution::Private);
    }
}
