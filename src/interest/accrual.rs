use chrono::NaiveDate;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::interest::{InterestCalculation, InterestCalculator};

/// day count convention for interest calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum DayCountConvention {
    /// actual days / 365
    #[default]
    Actual365,
    /// actual days / 360
    Actual360,
}

/// engine for accruing simple interest over calendar-day spans
#[derive(Debug, Clone, Copy, Default)]
pub struct AccrualEngine {
    pub convention: DayCountConvention,
}

impl AccrualEngine {
    pub fn new(convention: DayCountConvention) -> Self {
        Self { convention }
    }

    /// whole calendar days from `start` to `end`, negative when `end` is earlier
    pub fn days_between(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        end.signed_duration_since(start).num_days()
    }

    /// get year basis for the convention
    pub fn year_basis(&self) -> u32 {
        match self.convention {
            DayCountConvention::Actual365 => 365,
            DayCountConvention::Actual360 => 360,
        }
    }

    /// interest on `principal` for `days` at an already-derived daily rate
    pub fn accrue_days(&self, principal: Money, daily_rate: Rate, days: i64) -> Result<InterestCalculation> {
        let interest_amount = principal
            .checked_simple_interest(daily_rate, days)
            .ok_or_else(|| ScheduleError::CalculationError {
                message: format!("interest on {} over {} days overflows", principal, days),
            })?;

        Ok(InterestCalculation {
            interest_amount,
            daily_rate,
            days,
            principal_base: principal,
        })
    }
}

impl InterestCalculator for AccrualEngine {
    fn calculate_interest(
        &self,
        principal: Money,
        rate: Rate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<InterestCalculation> {
        let days = self.days_between(start_date, end_date);
        self.accrue_days(principal, self.get_daily_rate(rate), days)
    }

    fn get_daily_rate(&self, annual_rate: Rate) -> Rate {
        annual_rate.daily_rate(self.year_basis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between() {
        let engine = AccrualEngine::default();

        assert_eq!(engine.days_between(date(2024, 1, 1), date(2024, 2, 1)), 31);
        assert_eq!(engine.days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(engine.days_between(date(2023, 12, 30), date(2024, 1, 2)), 3);
        assert_eq!(engine.days_between(date(2024, 2, 1), date(2024, 1, 1)), -31);
    }

    #[test]
    fn test_year_basis() {
        assert_eq!(AccrualEngine::new(DayCountConvention::Actual365).year_basis(), 365);
        assert_eq!(AccrualEngine::new(DayCountConvention::Actual360).year_basis(), 360);
    }

    #[test]
    fn test_thirty_day_interest() {
        let engine = AccrualEngine::default();
        let principal = Money::from_major(100_000);
        let rate = Rate::from_percentage(12);

        let calc = engine.calculate_interest(principal, rate, date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();

        assert_eq!(calc.days, 30);
        assert_eq!(calc.interest_amount.to_fixed(2), "986.30");
        assert_eq!(calc.capitalized().unwrap().to_fixed(2), "100986.30");
    }

    #[test]
    fn test_actual_360_earns_more() {
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percentage(5);
        let start = date(2024, 1, 1);
        let end = date(2024, 1, 31);

        let a365 = AccrualEngine::new(DayCountConvention::Actual365)
            .calculate_interest(principal, rate, start, end)
            .unwrap();
        let a360 = AccrualEngine::new(DayCountConvention::Actual360)
            .calculate_interest(principal, rate, start, end)
            .unwrap();

        assert!(a360.interest_amount > a365.interest_amount);
        assert_eq!(a360.interest_amount.round_display(2).as_decimal(), dec!(41.67));
    }

    #[test]
    fn test_zero_days_accrue_nothing() {
        let engine = AccrualEngine::default();
        let calc = engine.calculate_interest(
            Money::from_major(5_000),
            Rate::from_percentage(10),
            date(2024, 3, 3),
            date(2024, 3, 3),
        )
        .unwrap();

        assert!(calc.interest_amount.is_zero());
    }

    #[test]
    fn test_overflow_is_calculation_error() {
        let engine = AccrualEngine::default();
        let huge = Money::from_decimal(rust_decimal::Decimal::MAX);
        let result = engine.accrue_days(huge, Rate::from_percentage(100).daily_rate(365), 1_000);

        assert!(matches!(result, Err(ScheduleError::CalculationError { .. })));
    }
}
