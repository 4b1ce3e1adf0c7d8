pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod request;
pub mod schedule;
pub mod serialization;
pub mod types;

// re-export key types
pub use config::{DepositRowTotal, RoundingPolicy, ScheduleConfig};
pub use decimal::{Money, Rate};
pub use errors::{Result, ScheduleError};
pub use interest::{AccrualEngine, DayCountConvention, InterestCalculation, InterestCalculator};
pub use request::{ParsedRequest, RawDeposit, ScheduleRequest};
pub use schedule::{compute_schedule, ScheduleEngine};
pub use serialization::{RowView, ScheduleView, SummaryView};
pub use types::{AccountParameters, AccrualRow, Deposit, RowKind, Schedule};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
