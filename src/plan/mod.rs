//! Household plan records and plan loading

mod data;
pub mod loader;

pub use data::{
    Dependent, EducationSelection, Earner, ExpenseUnit, ExpenseValue, FinancialProfile, FixedExpenses,
    LifeEvent, LifeEventType, PlanInputs,
};
pub use loader::{load_events, load_events_from_reader, load_plan, load_plan_from_reader, rate_from_percent};
