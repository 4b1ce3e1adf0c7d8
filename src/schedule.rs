use chrono::{Days, NaiveDate};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use tracing::{debug, info, warn};

use crate::config::{DepositRowTotal, RoundingPolicy, ScheduleConfig};
use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::interest::{AccrualEngine, InterestCalculator};
use crate::request::ScheduleRequest;
use crate::types::{AccountParameters, AccrualRow, Deposit, RowKind, Schedule};

/// Computes accrual schedules: simple daily interest, compounded at the end
/// of every fixed-length period, with deposits splitting the period they
/// fall into.
///
/// The engine holds only configuration and is safe to share between calls.
#[derive(Debug, Clone, Default)]
pub struct ScheduleEngine {
    config: ScheduleConfig,
    accrual: AccrualEngine,
}

impl ScheduleEngine {
    pub fn new(config: ScheduleConfig) -> Self {
        let accrual = AccrualEngine::new(config.day_count);
        Self { config, accrual }
    }

    /// build with a validated configuration
    pub fn try_new(config: ScheduleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// lenient computation against the system clock
    pub fn compute(&self, request: &ScheduleRequest) -> Schedule {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.compute_with_time(request, &time)
    }

    /// Lenient computation; "today" comes from `time`.
    ///
    /// Missing or malformed principal, rate or open date yields an empty
    /// schedule, which callers must read as "insufficient input".
    pub fn compute_with_time(&self, request: &ScheduleRequest, time: &SafeTimeProvider) -> Schedule {
        match request.parse_lenient() {
            Some(parsed) => self.schedule(&parsed.params, &parsed.deposits, time.now().date_naive()),
            None => {
                info!("principal, rate or open date missing or malformed, returning empty schedule");
                Schedule::empty()
            }
        }
    }

    /// strict computation against the system clock
    pub fn compute_strict(&self, request: &ScheduleRequest) -> Result<Schedule> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.compute_strict_with_time(request, &time)
    }

    /// strict computation, any malformed input is an error
    pub fn compute_strict_with_time(
        &self,
        request: &ScheduleRequest,
        time: &SafeTimeProvider,
    ) -> Result<Schedule> {
        let parsed = request.parse_strict()?;
        let today = time.now().date_naive();
        let close = parsed.params.close_date.unwrap_or(today);
        if close < parsed.params.open_date {
            return Err(ScheduleError::InvertedDateRange {
                open: parsed.params.open_date,
                close,
            });
        }
        self.try_schedule(&parsed.params, &parsed.deposits, today)
    }

    /// Schedule for typed input, never fails.
    ///
    /// If the balance overflows the decimal range the rows computed so far
    /// are returned.
    pub fn schedule(&self, params: &AccountParameters, deposits: &[Deposit], today: NaiveDate) -> Schedule {
        let (schedule, error) = self.run(params, deposits, today);
        if let Some(err) = error {
            warn!(error = %err, rows = schedule.len(), "schedule truncated");
        }
        schedule
    }

    /// schedule for typed input, overflow reported as an error
    pub fn try_schedule(
        &self,
        params: &AccountParameters,
        deposits: &[Deposit],
        today: NaiveDate,
    ) -> Result<Schedule> {
        match self.run(params, deposits, today) {
            (schedule, None) => Ok(schedule),
            (_, Some(err)) => Err(err),
        }
    }

    fn run(
        &self,
        params: &AccountParameters,
        deposits: &[Deposit],
        today: NaiveDate,
    ) -> (Schedule, Option<ScheduleError>) {
        let close = params.close_date.unwrap_or(today);
        let period = i64::from(self.config.period_days.max(1));
        let total_days = self.accrual.days_between(params.open_date, close);
        // floor, clamped so an inverted range runs no periods
        let full_periods = total_days.div_euclid(period).max(0);

        // stable: deposits sharing a date keep the caller's order
        let mut ordered = deposits.to_vec();
        ordered.sort_by_key(|d| d.date);

        debug!(
            principal = %params.principal,
            rate = %params.annual_rate,
            open = %params.open_date,
            close = %close,
            total_days,
            full_periods,
            deposits = ordered.len(),
            "computing accrual schedule"
        );

        let mut run = Run {
            engine: self,
            daily_rate: self.accrual.get_daily_rate(params.annual_rate),
            balance: params.principal,
            rows: Vec::new(),
        };

        let error = run.periods(params.open_date, close, period, full_periods, &ordered).err();

        let schedule = Schedule {
            rows: run.rows,
            final_balance: run.balance,
        };
        (schedule, error)
    }
}

/// mutable state of one schedule computation
struct Run<'a> {
    engine: &'a ScheduleEngine,
    daily_rate: Rate,
    balance: Money,
    rows: Vec<AccrualRow>,
}

impl Run<'_> {
    fn periods(
        &mut self,
        open: NaiveDate,
        close: NaiveDate,
        period: i64,
        full_periods: i64,
        deposits: &[Deposit],
    ) -> Result<()> {
        let mut applied = 0usize;

        for i in 0..full_periods {
            let start = offset(open, i * period)?;
            let end = offset(open, (i + 1) * period)?;

            let mut cursor = start;
            for deposit in deposits.iter().filter(|d| d.date > start && d.date <= end) {
                let days = self.engine.accrual.days_between(cursor, deposit.date);
                self.accrue(deposit.date, days, RowKind::Deposit, deposit.amount)?;
                cursor = deposit.date;
                applied += 1;
            }

            let days = self.engine.accrual.days_between(cursor, end);
            self.accrue(end, days, RowKind::PeriodEnd, Money::ZERO)?;
        }

        if applied < deposits.len() {
            debug!(
                ignored = deposits.len() - applied,
                "deposits outside the full periods were not applied"
            );
        }

        let last_accrual = offset(open, full_periods * period)?;
        let remaining_days = self.engine.accrual.days_between(last_accrual, close);
        if remaining_days > 0 {
            self.accrue(close, remaining_days, RowKind::Closing, Money::ZERO)?;
        }

        Ok(())
    }

    /// credit interest since the previous event, then apply `deposit`
    fn accrue(&mut self, date: NaiveDate, days: i64, kind: RowKind, deposit: Money) -> Result<()> {
        let config = &self.engine.config;
        let calc = self.engine.accrual.accrue_days(self.balance, self.daily_rate, days)?;

        let (interest, balance) = match config.rounding {
            RoundingPolicy::CarryFullPrecision => {
                let balance = calc.capitalized().ok_or_else(|| overflow(date))?;
                (calc.interest_amount, balance)
            }
            RoundingPolicy::CarryRounded => {
                let interest = calc.interest_amount.round_display(config.display_scale);
                let balance = self
                    .balance
                    .checked_add(interest)
                    .ok_or_else(|| overflow(date))?
                    .round_display(config.display_scale);
                (interest, balance)
            }
        };

        let after_deposit = balance.checked_sub(deposit).ok_or_else(|| overflow(date))?;
        let running_total = match config.deposit_row_total {
            DepositRowTotal::BeforeDeposit => balance,
            DepositRowTotal::AfterDeposit => after_deposit,
        };

        self.rows.push(AccrualRow {
            date,
            kind,
            days,
            interest,
            running_total,
            deposit,
        });
        self.balance = after_deposit;
        Ok(())
    }
}

fn offset(open: NaiveDate, days: i64) -> Result<NaiveDate> {
    u64::try_from(days)
        .ok()
        .and_then(|d| open.checked_add_days(Days::new(d)))
        .ok_or_else(|| ScheduleError::CalculationError {
            message: format!("{} + {} days is out of the calendar range", open, days),
        })
}

fn overflow(date: NaiveDate) -> ScheduleError {
    ScheduleError::CalculationError {
        message: format!("balance overflows at {}", date),
    }
}

/// Schedule with the default configuration, closing open accounts today.
pub fn compute_schedule(params: &AccountParameters, deposits: &[Deposit]) -> Vec<AccrualRow> {
    let time = SafeTimeProvider::new(TimeSource::System);
    ScheduleEngine::default()
        .schedule(params, deposits, time.now().date_naive())
        .rows
}
