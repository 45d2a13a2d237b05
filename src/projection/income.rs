//! Per-earner income projection

use crate::plan::Earner;

/// Income compounded once per whole year since `start_year`.
/// Zero for years before the start year.
pub fn compound_income(base_income: f64, start_year: i32, year: i32, growth_rate: f64) -> f64 {
    let years = year - start_year;
    if years < 0 {
        return 0.0;
    }
    base_income * (1.0 + growth_rate).powi(years)
}

/// Income of one earner in `year`: flat after retirement, compounding before
pub fn project_income(earner: &Earner, start_year: i32, year: i32, growth_rate: f64) -> f64 {
    match earner.retirement_year {
        Some(retirement_year) if year >= retirement_year => earner.income_after_retirement,
        _ => compound_income(earner.base_income, start_year, year, growth_rate),
    }
}
