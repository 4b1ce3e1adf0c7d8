pub mod accrual;

use chrono::NaiveDate;

use crate::decimal::{Money, Rate};
use crate::errors::Result;

pub use accrual::{AccrualEngine, DayCountConvention};

/// interest calculation result for a single sub-interval
#[derive(Debug, Clone, PartialEq)]
pub struct InterestCalculation {
    pub interest_amount: Money,
    pub daily_rate: Rate,
    pub days: i64,
    pub principal_base: Money,
}

impl InterestCalculation {
    /// balance after the interest is credited, `None` on overflow
    pub fn capitalized(&self) -> Option<Money> {
        self.principal_base.checked_add(self.interest_amount)
    }
}

/// trait for interest calculations
pub trait InterestCalculator {
    fn calculate_interest(
        &self,
        principal: Money,
        rate: Rate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<InterestCalculation>;

    fn get_daily_rate(&self, annual_rate: Rate) -> Rate;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalization() {
        let calc = InterestCalculation {
            interest_amount: Money::from_major(500),
            daily_rate: Rate::ZERO,
            days: 30,
            principal_base: Money::from_major(10_000),
        };

        assert_eq!(calc.capitalized(), Some(Money::from_major(10_500)));
    }
}
