//! Load plan inputs from JSON plan files and CSV event lists
//!
//! Plan files hold values the way they are entered: rates in percent and
//! enumerated values as plain tags. Both are converted here, so the engine
//! only ever sees fractions and enums.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use super::{
    Dependent, EducationSelection, Earner, ExpenseUnit, ExpenseValue, FinancialProfile, FixedExpenses,
    LifeEvent, LifeEventType, PlanInputs,
};
use crate::education::{EducationStage, Institution, StudyField};
use crate::error::LoadError;

const DEFAULT_INCOME_INCREASE_PCT: f64 = 2.0;
const DEFAULT_INVESTMENT_RETURN_PCT: f64 = 3.0;

/// Convert a percentage as entered (2.5) into a stored fraction (0.025)
pub fn rate_from_percent(percent: f64) -> f64 {
    percent / 100.0
}

/// Raw plan file
#[derive(Debug, Deserialize)]
struct PlanFile {
    plan_id: u32,
    #[serde(default)]
    name: String,
    birth_year: i32,
    #[serde(default)]
    income_self: f64,
    #[serde(default)]
    income_spouse: f64,
    income_increase_pct: Option<f64>,
    retirement_year_self: Option<i32>,
    retirement_year_spouse: Option<i32>,
    #[serde(default)]
    income_after_retirement_self: f64,
    #[serde(default)]
    income_after_retirement_spouse: f64,
    #[serde(default)]
    savings: f64,
    #[serde(default)]
    investments: f64,
    investment_return_pct: Option<f64>,
    #[serde(default)]
    expense_unit: Option<String>,
    #[serde(default)]
    expenses: FixedExpenses,
    #[serde(default)]
    itemized_expenses: Vec<ExpenseValue>,
    #[serde(default)]
    children: Vec<ChildEntry>,
    #[serde(default)]
    events: Vec<EventEntry>,
}

#[derive(Debug, Deserialize)]
struct ChildEntry {
    id: u32,
    name: Option<String>,
    birth_year: i32,
    #[serde(default)]
    education: Vec<SelectionEntry>,
}

#[derive(Debug, Deserialize)]
struct SelectionEntry {
    stage: String,
    institution: String,
    #[serde(default)]
    field: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    event_type: String,
    event_year: i32,
    #[serde(default)]
    description: String,
    #[serde(default)]
    cost: f64,
    #[serde(default)]
    recurring: bool,
    recurring_end_year: Option<i32>,
}

impl EventEntry {
    fn to_event(self) -> Result<LifeEvent, LoadError> {
        Ok(LifeEvent {
            event_type: LifeEventType::parse(&self.event_type)?,
            year: self.event_year,
            description: self.description,
            cost: self.cost,
            recurring: self.recurring,
            recurring_end_year: if self.recurring { self.recurring_end_year } else { None },
        })
    }
}

impl SelectionEntry {
    fn to_selection(&self) -> Result<EducationSelection, LoadError> {
        let field = match &self.field {
            Some(field) => StudyField::parse_optional(field)?,
            None => None,
        };
        Ok(EducationSelection::new(
            EducationStage::parse(&self.stage)?,
            Institution::parse(&self.institution)?,
            field,
        ))
    }
}

impl ChildEntry {
    fn to_dependent(self) -> Result<Dependent, LoadError> {
        let mut dependent = Dependent::new(self.id, self.birth_year);
        dependent.name = self.name;
        for entry in &self.education {
            dependent.set_selection(entry.to_selection()?);
        }
        Ok(dependent)
    }
}

impl PlanFile {
    fn to_inputs(self) -> Result<PlanInputs, LoadError> {
        let expense_unit = match self.expense_unit.as_deref().map(str::trim) {
            None | Some("") | Some("yearly") => ExpenseUnit::Yearly,
            Some("monthly") => ExpenseUnit::Monthly,
            Some(other) => return Err(LoadError::unknown("expense unit", other)),
        };

        let profile = FinancialProfile {
            plan_id: self.plan_id,
            name: self.name,
            birth_year: self.birth_year,
            earner_self: Earner {
                base_income: self.income_self,
                retirement_year: self.retirement_year_self,
                income_after_retirement: self.income_after_retirement_self,
            },
            earner_spouse: Earner {
                base_income: self.income_spouse,
                retirement_year: self.retirement_year_spouse,
                income_after_retirement: self.income_after_retirement_spouse,
            },
            income_increase_rate: rate_from_percent(
                self.income_increase_pct.unwrap_or(DEFAULT_INCOME_INCREASE_PCT),
            ),
            savings: self.savings,
            investments: self.investments,
            investment_return_rate: rate_from_percent(
                self.investment_return_pct.unwrap_or(DEFAULT_INVESTMENT_RETURN_PCT),
            ),
            expense_unit,
            fixed_expenses: self.expenses,
            itemized_expenses: self.itemized_expenses,
        };

        let dependents = self
            .children
            .into_iter()
            .map(ChildEntry::to_dependent)
            .collect::<Result<Vec<_>, _>>()?;

        let events = self
            .events
            .into_iter()
            .map(EventEntry::to_event)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PlanInputs { profile, dependents, events })
    }
}

/// Load a plan from a JSON file
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<PlanInputs, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    load_plan_from_reader(file)
}

/// Load a plan from any reader
pub fn load_plan_from_reader<R: std::io::Read>(reader: R) -> Result<PlanInputs, LoadError> {
    let raw: PlanFile = serde_json::from_reader(reader)?;
    raw.to_inputs()
}

/// Load life events from a CSV file
pub fn load_events<P: AsRef<Path>>(path: P) -> Result<Vec<LifeEvent>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    load_events_from_reader(file)
}

/// Load life events from any reader (columns match the plan file's event entries)
pub fn load_events_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LifeEvent>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut events = Vec::new();

    for result in csv_reader.deserialize() {
        let row: EventEntry = result?;
        events.push(row.to_event()?);
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN_JSON: &str = r#"{
        "plan_id": 3,
        "name": "family",
        "birth_year": 1990,
        "income_self": 500,
        "income_spouse": 300,
        "income_increase_pct": 1.5,
        "retirement_year_self": 2055,
        "income_after_retirement_self": 200,
        "savings": 800,
        "investments": 200,
        "expense_unit": "monthly",
        "expenses": { "housing": 10, "living": 15 },
        "children": [
            {
                "id": 1,
                "name": "Aki",
                "birth_year": 2020,
                "education": [
                    { "stage": "university", "institution": "private", "field": "science" },
                    { "stage": "high", "institution": "private", "field": "science" }
                ]
            }
        ],
        "events": [
            { "event_type": "home_purchase", "event_year": 2030, "cost": 1000 },
            { "event_type": "other", "event_year": 2031, "cost": 10, "recurring_end_year": 2040 }
        ]
    }"#;

    #[test]
    fn test_load_plan_converts_percentages() {
        let plan = load_plan_from_reader(PLAN_JSON.as_bytes()).unwrap();
        let profile = &plan.profile;

        assert_eq!(profile.plan_id, 3);
        assert!((profile.income_increase_rate - 0.015).abs() < 1e-12);
        // default 3% when absent
        assert!((profile.investment_return_rate - 0.03).abs() < 1e-12);
        assert_eq!(profile.expense_unit, ExpenseUnit::Monthly);
        assert_eq!(profile.earner_self.retirement_year, Some(2055));
        assert_eq!(profile.earner_spouse.retirement_year, None);
        assert_eq!(profile.fixed_expenses.total(), 25.0);
    }

    #[test]
    fn test_load_plan_children_and_events() {
        let plan = load_plan_from_reader(PLAN_JSON.as_bytes()).unwrap();

        let child = &plan.dependents[0];
        assert_eq!(child.name.as_deref(), Some("Aki"));
        assert_eq!(
            child.selection_for(EducationStage::University).and_then(|s| s.field),
            Some(StudyField::Science)
        );
        assert_eq!(child.selection_for(EducationStage::High).and_then(|s| s.field), None);

        assert_eq!(plan.events.len(), 2);
        assert_eq!(plan.events[0].event_type, LifeEventType::HomePurchase);
        // end year dropped on a non-recurring event
        assert_eq!(plan.events[1].recurring_end_year, None);
    }

    #[test]
    fn test_unknown_expense_unit() {
        let json = r#"{ "plan_id": 1, "birth_year": 1980, "expense_unit": "weekly" }"#;
        let err = load_plan_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownValue { field: "expense unit", .. }));
    }

    #[test]
    fn test_load_events_csv() {
        let data = "event_type,event_year,description,cost,recurring,recurring_end_year\n\
                    marriage,2027,wedding,300,false,\n\
                    caregiving,2040,parents,60,true,2045\n\
                    inheritance,2050,,-500,false,\n";
        let events = load_events_from_reader(data.as_bytes()).unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[1].recurring_end_year, Some(2045));
        assert_eq!(events[2].cost, -500.0);
        assert_eq!(events[2].event_type, LifeEventType::Inheritance);
    }

    #[test]
    fn test_load_sample_plan() {
        let plan = load_plan("data/sample_plan.json").expect("Failed to load sample plan");
        assert!(!plan.dependents.is_empty());

        let events = load_events("data/sample_events.csv").expect("Failed to load sample events");
        assert!(!events.is_empty());
    }
}
