//! Yearly projection engine: income, expenses, events and balance rollforward

mod state;
mod engine;
mod events;
mod expenses;
mod income;
mod snapshot;

pub use state::{BalanceState, SURPLUS_INVESTMENT_SHARE};
pub use engine::{ProjectionEngine, ProjectionConfig, TaxBasis, FINAL_AGE};
pub use events::EventSchedule;
pub use expenses::{aggregate_expenses, ExpenseBreakdown, RETIREMENT_EXPENSE_AGE, RETIREMENT_EXPENSE_FACTOR};
pub use income::{compound_income, project_income};
pub use snapshot::{ChartData, ProjectionResult, ProjectionSummary, SimulationSnapshot, YearDetail};
