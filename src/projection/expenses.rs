//! Annual expense aggregation

use serde::{Deserialize, Serialize};

use super::engine::ProjectionConfig;
use super::events::EventSchedule;
use crate::plan::FinancialProfile;

/// Age from which the retirement-era reduction applies
pub const RETIREMENT_EXPENSE_AGE: i32 = 65;

/// Multiplier applied to the whole expense total from that age on
pub const RETIREMENT_EXPENSE_FACTOR: f64 = 0.9;

/// Components of one year's expense total
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    /// Itemized or legacy fixed expenses, annualized
    pub base: f64,
    pub education: f64,
    pub income_tax: f64,
    pub social_insurance: f64,
    pub single_events: f64,
    pub recurring_events: f64,
    /// Reduction applied for the retirement era (zero or negative)
    pub retirement_adjustment: f64,
    pub total: f64,
}

/// Sum every expense source for `year`.
///
/// `education` is the already-resolved cost over all dependents and
/// `taxable_income` the gross income the flat tax and insurance rates apply
/// to. The retirement reduction scales the full total, taxes and events
/// included.
pub fn aggregate_expenses(
    profile: &FinancialProfile,
    year: i32,
    age: i32,
    schedule: &EventSchedule<'_>,
    education: f64,
    taxable_income: f64,
    config: &ProjectionConfig,
) -> ExpenseBreakdown {
    let mut breakdown = ExpenseBreakdown {
        base: profile.base_expense_total() * profile.expense_unit.annual_factor(),
        education,
        income_tax: taxable_income * config.income_tax_rate,
        social_insurance: taxable_income * config.social_insurance_rate,
        single_events: schedule.single_year_cost(year),
        recurring_events: schedule.recurring_cost(year),
        ..Default::default()
    };

    let subtotal = breakdown.base
        + breakdown.education
        + breakdown.income_tax
        + breakdown.social_insurance
        + breakdown.single_events
        + breakdown.recurring_events;

    breakdown.total = if age >= RETIREMENT_EXPENSE_AGE {
        subtotal * RETIREMENT_EXPENSE_FACTOR
    } else {
        subtotal
    };
    breakdown.retirement_adjustment = breakdown.total - subtotal;
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{ExpenseUnit, ExpenseValue, LifeEvent, LifeEventType};
    use approx::assert_relative_eq;

    fn zero_tax() -> ProjectionConfig {
        ProjectionConfig {
            income_tax_rate: 0.0,
            social_insurance_rate: 0.0,
            ..Default::default()
        }
    }

    fn profile() -> FinancialProfile {
        let mut profile = FinancialProfile::new(1, "test", 1990);
        profile.fixed_expenses.housing = 120.0;
        profile.fixed_expenses.living = 200.0;
        profile.fixed_expenses.education = 50.0;
        profile.fixed_expenses.transportation = 30.0;
        profile
    }

    #[test]
    fn test_legacy_categories_exclude_education() {
        let schedule = EventSchedule::new(&[]);
        let b = aggregate_expenses(&profile(), 2030, 40, &schedule, 0.0, 0.0, &zero_tax());
        assert_relative_eq!(b.base, 350.0);
        assert_relative_eq!(b.total, 350.0);
    }

    #[test]
    fn test_monthly_unit_annualized() {
        let mut profile = profile();
        profile.expense_unit = ExpenseUnit::Monthly;
        let schedule = EventSchedule::new(&[]);
        let b = aggregate_expenses(&profile, 2030, 40, &schedule, 0.0, 0.0, &zero_tax());
        assert_relative_eq!(b.total, 350.0 * 12.0);
    }

    #[test]
    fn test_itemized_take_precedence() {
        let mut profile = profile();
        profile.itemized_expenses = vec![
            ExpenseValue { category: "food".into(), item: "groceries".into(), amount: 60.0 },
            ExpenseValue { category: "housing".into(), item: "rent".into(), amount: 90.0 },
        ];
        let schedule = EventSchedule::new(&[]);
        let b = aggregate_expenses(&profile, 2030, 40, &schedule, 0.0, 0.0, &zero_tax());
        assert_relative_eq!(b.base, 150.0);
    }

    #[test]
    fn test_itemized_monthly_annualized() {
        let mut profile = profile();
        profile.expense_unit = ExpenseUnit::Monthly;
        profile.itemized_expenses = vec![
            ExpenseValue { category: "food".into(), item: "groceries".into(), amount: 10.0 },
        ];
        let schedule = EventSchedule::new(&[]);
        let b = aggregate_expenses(&profile, 2030, 40, &schedule, 0.0, 0.0, &zero_tax());
        assert_relative_eq!(b.base, 120.0);
        assert_relative_eq!(b.total, 120.0);
    }

    #[test]
    fn test_tax_and_insurance_on_gross_income() {
        let config = ProjectionConfig {
            income_tax_rate: 0.1,
            social_insurance_rate: 0.15,
            ..Default::default()
        };
        let schedule = EventSchedule::new(&[]);
        let b = aggregate_expenses(&FinancialProfile::new(1, "t", 1990), 2030, 40, &schedule, 0.0, 800.0, &config);

        assert_relative_eq!(b.income_tax, 80.0);
        assert_relative_eq!(b.social_insurance, 120.0);
        assert_relative_eq!(b.total, 200.0);
    }

    #[test]
    fn test_events_and_windfalls() {
        let events = vec![
            LifeEvent::once(LifeEventType::HomePurchase, 2030, 1000.0),
            LifeEvent::once(LifeEventType::Inheritance, 2030, -1500.0),
            LifeEvent::recurring(LifeEventType::Caregiving, 2025, 40.0, Some(2030)),
        ];
        let schedule = EventSchedule::new(&events);
        let b = aggregate_expenses(&profile(), 2030, 40, &schedule, 0.0, 0.0, &zero_tax());

        assert_relative_eq!(b.single_events, -500.0);
        assert_relative_eq!(b.recurring_events, 40.0);
        // no clamping at this stage
        assert_relative_eq!(b.total, 350.0 - 500.0 + 40.0);
    }

    #[test]
    fn test_retirement_reduction_applied_last() {
        let config = ProjectionConfig {
            income_tax_rate: 0.1,
            social_insurance_rate: 0.0,
            ..Default::default()
        };
        let events = vec![LifeEvent::once(LifeEventType::Other, 2055, 100.0)];
        let schedule = EventSchedule::new(&events);

        let at_64 = aggregate_expenses(&profile(), 2055, 64, &schedule, 20.0, 500.0, &config);
        let at_65 = aggregate_expenses(&profile(), 2055, 65, &schedule, 20.0, 500.0, &config);

        let subtotal = 350.0 + 20.0 + 50.0 + 100.0;
        assert_relative_eq!(at_64.total, subtotal);
        assert_relative_eq!(at_65.total, subtotal * 0.9);
        assert_relative_eq!(at_65.retirement_adjustment, -subtotal * 0.1, epsilon = 1e-9);
    }
}
