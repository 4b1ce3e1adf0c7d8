use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{Result, ScheduleError};
use crate::interest::DayCountConvention;

/// how the running balance is carried between accrual events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// keep full precision internally, round only when rendering
    #[default]
    CarryFullPrecision,
    /// round interest and balance to the display scale after every event
    CarryRounded,
}

/// which balance a deposit-date row displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositRowTotal {
    /// balance after interest, before the deposit is subtracted
    #[default]
    BeforeDeposit,
    /// balance after interest and after the deposit
    AfterDeposit,
}

/// schedule configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// length of a compounding period in days
    pub period_days: u32,
    pub day_count: DayCountConvention,
    /// fractional digits in rendered amounts
    pub display_scale: u32,
    pub rounding: RoundingPolicy,
    pub deposit_row_total: DepositRowTotal,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            period_days: 30,
            day_count: DayCountConvention::Actual365,
            display_scale: 2,
            rounding: RoundingPolicy::CarryFullPrecision,
            deposit_row_total: DepositRowTotal::BeforeDeposit,
        }
    }
}

impl ScheduleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.period_days == 0 {
            return Err(ScheduleError::InvalidConfiguration {
                message: "period_days must be greater than zero".to_string(),
            });
        }
        if self.display_scale > 10 {
            return Err(ScheduleError::InvalidConfiguration {
                message: format!("display_scale {} exceeds 10", self.display_scale),
            });
        }
        Ok(())
    }

    /// parse and validate a json configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ScheduleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_period_days(mut self, days: u32) -> Self {
        self.period_days = days;
        self
    }

    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_deposit_row_total(mut self, policy: DepositRowTotal) -> Self {
        self.deposit_row_total = policy;
        self
    }
}
