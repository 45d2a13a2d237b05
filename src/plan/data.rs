//! Household plan records consumed by the projection engine

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::education::{EducationStage, EducationTrack, Institution, StudyField};

/// Whether fixed expense figures are per year or per month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseUnit {
    #[default]
    Yearly,
    Monthly,
}

impl ExpenseUnit {
    /// Multiplier that turns a figure in this unit into an annual amount
    pub fn annual_factor(&self) -> f64 {
        match self {
            ExpenseUnit::Yearly => 1.0,
            ExpenseUnit::Monthly => 12.0,
        }
    }
}

/// One income earner in the household
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Earner {
    /// Annual income in the start year
    pub base_income: f64,

    /// First year of retirement, if planned
    pub retirement_year: Option<i32>,

    /// Flat annual income from the retirement year on
    pub income_after_retirement: f64,
}

/// Legacy fixed expense categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedExpenses {
    pub housing: f64,
    pub living: f64,
    /// Kept for record only: education is always computed from dependents
    pub education: f64,
    pub insurance: f64,
    pub loan: f64,
    pub entertainment: f64,
    pub transportation: f64,
}

impl FixedExpenses {
    /// Sum of the categories that count towards expenses (education excluded)
    pub fn total(&self) -> f64 {
        self.housing
            + self.living
            + self.insurance
            + self.loan
            + self.entertainment
            + self.transportation
    }
}

/// Amount entered for one itemized expense line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseValue {
    pub category: String,
    pub item: String,
    pub amount: f64,
}

/// Static financial parameters for one household plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub plan_id: u32,
    pub name: String,

    /// Birth year of the head of household
    pub birth_year: i32,

    pub earner_self: Earner,
    pub earner_spouse: Earner,

    /// Annual income growth, as a fraction (0.02 = 2%), shared by both earners
    pub income_increase_rate: f64,

    pub savings: f64,
    pub investments: f64,

    /// Annual investment return, as a fraction
    pub investment_return_rate: f64,

    pub expense_unit: ExpenseUnit,
    pub fixed_expenses: FixedExpenses,

    /// Itemized expense lines. When non-empty these replace `fixed_expenses`.
    pub itemized_expenses: Vec<ExpenseValue>,
}

impl FinancialProfile {
    pub fn new(plan_id: u32, name: impl Into<String>, birth_year: i32) -> Self {
        Self {
            plan_id,
            name: name.into(),
            birth_year,
            earner_self: Earner::default(),
            earner_spouse: Earner::default(),
            income_increase_rate: 0.0,
            savings: 0.0,
            investments: 0.0,
            investment_return_rate: 0.0,
            expense_unit: ExpenseUnit::Yearly,
            fixed_expenses: FixedExpenses::default(),
            itemized_expenses: Vec::new(),
        }
    }

    /// Age of the head of household in a given year (negative before birth)
    pub fn age_in(&self, year: i32) -> i32 {
        year - self.birth_year
    }

    pub fn has_itemized_expenses(&self) -> bool {
        !self.itemized_expenses.is_empty()
    }

    /// Base annual expense in the profile's own unit, before unit conversion
    pub fn base_expense_total(&self) -> f64 {
        if self.has_itemized_expenses() {
            self.itemized_expenses.iter().map(|v| v.amount).sum()
        } else {
            self.fixed_expenses.total()
        }
    }

    /// Itemized totals per category, empty when the legacy categories apply
    pub fn itemized_totals_by_category(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for value in &self.itemized_expenses {
            *totals.entry(value.category.clone()).or_insert(0.0) += value.amount;
        }
        totals
    }
}

/// Institution (and field) chosen for one stage of a dependent's schooling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectionFields")]
pub struct EducationSelection {
    pub stage: EducationStage,
    pub institution: Institution,
    /// Only kept for university; cleared for every other stage
    pub field: Option<StudyField>,
}

impl EducationSelection {
    pub fn new(stage: EducationStage, institution: Institution, field: Option<StudyField>) -> Self {
        let track = EducationTrack::for_stage(stage, institution, field);
        Self {
            stage,
            institution: track.institution,
            field: track.field,
        }
    }

    pub fn track(&self) -> EducationTrack {
        EducationTrack::for_stage(self.stage, self.institution, self.field)
    }
}

/// Serialized shape of [`EducationSelection`], normalized on the way in
#[derive(Deserialize)]
struct SelectionFields {
    stage: EducationStage,
    institution: Institution,
    #[serde(default)]
    field: Option<StudyField>,
}

impl From<SelectionFields> for EducationSelection {
    fn from(fields: SelectionFields) -> Self {
        EducationSelection::new(fields.stage, fields.institution, fields.field)
    }
}

/// A child or ward whose age drives education costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DependentFields")]
pub struct Dependent {
    pub id: u32,
    pub name: Option<String>,
    pub birth_year: i32,
    selections: Vec<EducationSelection>,
}

impl Dependent {
    pub fn new(id: u32, birth_year: i32) -> Self {
        Self {
            id,
            name: None,
            birth_year,
            selections: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder form of [`Dependent::set_selection`]
    pub fn with_selection(mut self, selection: EducationSelection) -> Self {
        self.set_selection(selection);
        self
    }

    /// Record a selection, replacing any earlier one for the same stage
    pub fn set_selection(&mut self, selection: EducationSelection) {
        let selection = EducationSelection::new(selection.stage, selection.institution, selection.field);
        match self.selections.iter_mut().find(|s| s.stage == selection.stage) {
            Some(existing) => *existing = selection,
            None => self.selections.push(selection),
        }
    }

    pub fn selection_for(&self, stage: EducationStage) -> Option<&EducationSelection> {
        self.selections.iter().find(|s| s.stage == stage)
    }

    pub fn selections(&self) -> &[EducationSelection] {
        &self.selections
    }

    pub fn age_in(&self, year: i32) -> i32 {
        year - self.birth_year
    }

    /// Stage the dependent is in during `year`, if any
    pub fn education_stage(&self, year: i32) -> Option<EducationStage> {
        EducationStage::for_age(self.age_in(year))
    }
}

/// Serialized shape of [`Dependent`]; later selections for a stage win
#[derive(Deserialize)]
struct DependentFields {
    id: u32,
    #[serde(default)]
    name: Option<String>,
    birth_year: i32,
    #[serde(default)]
    selections: Vec<EducationSelection>,
}

impl From<DependentFields> for Dependent {
    fn from(fields: DependentFields) -> Self {
        let mut dependent = Dependent::new(fields.id, fields.birth_year);
        dependent.name = fields.name;
        for selection in fields.selections {
            dependent.set_selection(selection);
        }
        dependent
    }
}

/// Kind of life event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeEventType {
    Marriage,
    Birth,
    HomePurchase,
    CarPurchase,
    JobChange,
    ChildSchooling,
    Retirement,
    Caregiving,
    Inheritance,
    #[default]
    Other,
}

impl LifeEventType {
    pub fn parse(value: &str) -> Result<Self, crate::error::LoadError> {
        match value.trim() {
            "marriage" => Ok(LifeEventType::Marriage),
            "birth" => Ok(LifeEventType::Birth),
            "home_purchase" => Ok(LifeEventType::HomePurchase),
            "car_purchase" => Ok(LifeEventType::CarPurchase),
            "job_change" => Ok(LifeEventType::JobChange),
            "child_schooling" => Ok(LifeEventType::ChildSchooling),
            "retirement" => Ok(LifeEventType::Retirement),
            "caregiving" => Ok(LifeEventType::Caregiving),
            "inheritance" => Ok(LifeEventType::Inheritance),
            "other" => Ok(LifeEventType::Other),
            other => Err(crate::error::LoadError::unknown("event type", other)),
        }
    }
}

/// A one-off or recurring cost (positive) or windfall (negative)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub event_type: LifeEventType,
    pub year: i32,
    pub description: String,
    pub cost: f64,
    pub recurring: bool,
    /// Last year (inclusive) of a recurring event; ignored when not recurring
    pub recurring_end_year: Option<i32>,
}

impl LifeEvent {
    /// Single-year event
    pub fn once(event_type: LifeEventType, year: i32, cost: f64) -> Self {
        Self {
            event_type,
            year,
            description: String::new(),
            cost,
            recurring: false,
            recurring_end_year: None,
        }
    }

    /// Event repeating every year from `year`, until `end_year` if given
    pub fn recurring(event_type: LifeEventType, year: i32, cost: f64, end_year: Option<i32>) -> Self {
        Self {
            event_type,
            year,
            description: String::new(),
            cost,
            recurring: true,
            recurring_end_year: end_year,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether this event charges its cost in `year`
    pub fn applies_in(&self, year: i32) -> bool {
        if self.recurring {
            self.year <= year && self.recurring_end_year.map_or(true, |end| end >= year)
        } else {
            self.year == year
        }
    }
}

/// Everything one projection run needs, fully materialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanInputs {
    pub profile: FinancialProfile,
    pub dependents: Vec<Dependent>,
    pub events: Vec<LifeEvent>,
}

impl PlanInputs {
    pub fn new(profile: FinancialProfile) -> Self {
        Self {
            profile,
            dependents: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_dependent(mut self, dependent: Dependent) -> Self {
        self.dependents.push(dependent);
        self
    }

    pub fn with_event(mut self, event: LifeEvent) -> Self {
        self.events.push(event);
        self
    }
}
