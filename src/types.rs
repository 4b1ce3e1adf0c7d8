use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// account terms for one schedule run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountParameters {
    pub principal: Money,
    pub annual_rate: Rate,
    pub open_date: NaiveDate,
    /// `None` means the account is still open; the engine closes it "today"
    pub close_date: Option<NaiveDate>,
}

impl AccountParameters {
    pub fn new(principal: Money, annual_rate: Rate, open_date: NaiveDate) -> Self {
        Self {
            principal,
            annual_rate,
            open_date,
            close_date: None,
        }
    }

    pub fn closed_on(mut self, close_date: NaiveDate) -> Self {
        self.close_date = Some(close_date);
        self
    }
}

/// a dated deposit that reduces the balance once interest up to its date is credited
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub date: NaiveDate,
    pub amount: Money,
}

impl Deposit {
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self { date, amount }
    }
}

/// what produced an accrual row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    /// interest credited at the end of a full period
    PeriodEnd,
    /// interest credited up to a deposit date, deposit applied afterwards
    Deposit,
    /// interest for the trailing partial period
    Closing,
}

/// one accrual event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualRow {
    pub date: NaiveDate,
    pub kind: RowKind,
    pub days: i64,
    pub interest: Money,
    pub running_total: Money,
    /// deposit applied at this row, zero unless `kind` is `Deposit`
    pub deposit: Money,
}

/// the full result of a schedule run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub rows: Vec<AccrualRow>,
    /// internal balance after the last event, deposits included
    pub final_balance: Money,
}

impl Schedule {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn total_interest(&self) -> Money {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_deposits(&self) -> Money {
        self.rows.iter().map(|r| r.deposit).sum()
    }
}
