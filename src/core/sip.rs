//! SIP projection calculations

use anyhow::{Result, anyhow};
use rust_decimal::{Decimal, RoundingStrategy, prelude::*};

/// Inputs for a single SIP projection.
///
/// Negative contribution or return values are clamped to zero on
/// construction; the projection is then monotone non-decreasing in both
/// the period and the contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInput {
    pub period_years: u32,
    pub monthly_contribution: f64,
    pub annual_return_pct: f64,
}

impl ProjectionInput {
    pub fn new(period_years: u32, monthly_contribution: f64, annual_return_pct: f64) -> Self {
        ProjectionInput {
            period_years,
            monthly_contribution: monthly_contribution.max(0.0),
            annual_return_pct: annual_return_pct.max(0.0),
        }
    }

    pub fn total_months(&self) -> u32 {
        self.period_years * 12
    }
}

/// Projected outcome of a SIP, with monetary figures rounded to 2 decimal
/// places.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub months: u32,
    pub invested: Decimal,
    pub future_value: Decimal,
    pub gain: Decimal,
}

/// Computes the future value of a monthly SIP.
///
/// The deposit made in month `i` is compounded by `i` monthly periods and
/// the per-term results are summed over `i = 1..=months`. This exponent
/// convention is load-bearing: normalizing it to a closed-form annuity
/// formula changes the observable output.
pub fn project(input: &ProjectionInput) -> Result<Projection> {
    let months = input.total_months();
    let monthly = Decimal::from_f64(input.monthly_contribution)
        .ok_or_else(|| anyhow!("Invalid monthly contribution: {}", input.monthly_contribution))?;
    let rate_pct = Decimal::from_f64(input.annual_return_pct)
        .ok_or_else(|| anyhow!("Invalid annual return: {}", input.annual_return_pct))?;

    let monthly_rate = rate_pct / Decimal::from(12) / Decimal::from(100);
    let growth = Decimal::ONE + monthly_rate;

    let mut future_value = Decimal::ZERO;
    let mut factor = Decimal::ONE;
    for _ in 0..months {
        factor *= growth;
        future_value += monthly * factor;
    }

    let future_value = round_money(future_value);
    let invested = round_money(monthly * Decimal::from(months));

    Ok(Projection {
        months,
        invested,
        future_value,
        gain: future_value - invested,
    })
}

// Matches the 2-decimal display rounding of the reference output
// (half-away-from-zero, not banker's).
fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
