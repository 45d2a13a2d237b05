//! Savings and investment balances carried from year to year

use serde::{Deserialize, Serialize};

use crate::plan::FinancialProfile;

/// Share of a positive yearly balance moved into investments; the rest goes to savings
pub const SURPLUS_INVESTMENT_SHARE: f64 = 0.5;

/// Balances at a point in the projection
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceState {
    pub savings: f64,
    pub investments: f64,
}

impl BalanceState {
    pub fn new(savings: f64, investments: f64) -> Self {
        Self { savings, investments }
    }

    /// Opening balances from a profile, each floored at zero
    pub fn from_profile(profile: &FinancialProfile) -> Self {
        Self::new(profile.savings.max(0.0), profile.investments.max(0.0))
    }

    pub fn net_worth(&self) -> f64 {
        self.savings + self.investments
    }

    /// Return earned this year on the current investment balance
    pub fn investment_return(&self, rate: f64) -> f64 {
        self.investments * rate
    }

    /// Apply one year's balance and return the next state.
    ///
    /// A surplus is split between investments and savings. A deficit is
    /// drawn from savings first, then from investments; balances never go
    /// below zero and any remaining shortfall is dropped.
    pub fn roll_forward(self, balance: f64) -> Self {
        if balance > 0.0 {
            let to_investments = balance * SURPLUS_INVESTMENT_SHARE;
            return Self {
                savings: self.savings + (balance - to_investments),
                investments: self.investments + to_investments,
            };
        }

        let mut next = Self {
            savings: self.savings + balance,
            investments: self.investments,
        };
        if next.savings < 0.0 {
            let shortfall = -next.savings;
            next.savings = 0.0;
            next.investments -= shortfall;
            if next.investments < 0.0 {
                log::warn!(
                    "shortfall of {:.2} exceeds investments; {:.2} unfunded",
                    shortfall,
                    -next.investments
                );
                next.investments = 0.0;
            }
        }
        next
    }

    /// True once both balances are exhausted
    pub fn is_depleted(&self) -> bool {
        self.savings <= 0.0 && self.investments <= 0.0
    }
}
