//! Raw caller input and its conversion into typed account parameters.
//!
//! Every field arrives as an optional string, exactly as a form would hand
//! it over. Json numbers are accepted too and kept as their decimal text. [`ScheduleRequest::parse_lenient`] degrades silently the way the
//! calculator always has; [`ScheduleRequest::parse_strict`] reports the first
//! problem instead.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::types::{AccountParameters, Deposit};

/// one deposit line as entered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDeposit {
    #[serde(default, deserialize_with = "text_or_number")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub amount: Option<String>,
}

impl RawDeposit {
    pub fn new(date: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            amount: Some(amount.into()),
        }
    }

    fn is_blank(&self) -> bool {
        is_blank(&self.date) && is_blank(&self.amount)
    }
}

/// unparsed schedule input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default, deserialize_with = "text_or_number")]
    pub principal: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub rate: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub open_date: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub close_date: Option<String>,
    #[serde(default, deserialize_with = "list_or_null")]
    pub deposits: Vec<RawDeposit>,
}

/// string or number as text; null is absent, anything else keeps its json
/// text and fails to parse later like any other malformed entry
fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    })
}

fn list_or_null<'de, D>(deserializer: D) -> std::result::Result<Vec<RawDeposit>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawDeposit>>::deserialize(deserializer)?.unwrap_or_default())
}

/// typed input ready for the engine
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub params: AccountParameters,
    pub deposits: Vec<Deposit>,
}

impl ScheduleRequest {
    pub fn new(principal: impl Into<String>, rate: impl Into<String>, open_date: impl Into<String>) -> Self {
        Self {
            principal: Some(principal.into()),
            rate: Some(rate.into()),
            open_date: Some(open_date.into()),
            close_date: None,
            deposits: Vec::new(),
        }
    }

    pub fn close_date(mut self, date: impl Into<String>) -> Self {
        self.close_date = Some(date.into());
        self
    }

    pub fn deposit(mut self, date: impl Into<String>, amount: impl Into<String>) -> Self {
        self.deposits.push(RawDeposit::new(date, amount));
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse without ever failing.
    ///
    /// Returns `None` when principal, rate or open date is missing or
    /// malformed. An unparseable close date is treated as absent, deposits
    /// without a usable date are dropped, and bad amounts count as zero.
    pub fn parse_lenient(&self) -> Option<ParsedRequest> {
        let principal = self.principal.as_deref().and_then(parse_decimal)?;
        let rate = self.rate.as_deref().and_then(parse_decimal)?;
        let open_date = self.open_date.as_deref().and_then(parse_date)?;

        let close_date = self.close_date.as_deref().and_then(|raw| {
            let parsed = parse_date(raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                debug!(close_date = raw, "unparseable close date, treating account as open");
            }
            parsed
        });

        let deposits = self
            .deposits
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                let Some(date) = raw.date.as_deref().and_then(parse_date) else {
                    if !raw.is_blank() {
                        debug!(index, date = ?raw.date, "skipping deposit without a valid date");
                    }
                    return None;
                };
                let amount = match raw.amount.as_deref().map(str::trim) {
                    None | Some("") => Money::ZERO,
                    Some(text) => match parse_decimal(text) {
                        Some(d) if d.is_sign_negative() => {
                            warn!(index, amount = text, "negative deposit amount treated as zero");
                            Money::ZERO
                        }
                        Some(d) => Money::from_decimal(d),
                        None => {
                            warn!(index, amount = text, "invalid deposit amount treated as zero");
                            Money::ZERO
                        }
                    },
                };
                Some(Deposit::new(date, amount))
            })
            .collect();

        Some(ParsedRequest {
            params: AccountParameters {
                principal: Money::from_decimal(principal),
                annual_rate: Rate::from_percent_decimal(rate),
                open_date,
                close_date,
            },
            deposits,
        })
    }

    /// Parse and reject anything malformed.
    ///
    /// Fully blank deposit lines are still skipped, since an empty row is
    /// what a form produces before anything is typed into it.
    pub fn parse_strict(&self) -> Result<ParsedRequest> {
        let principal = required_decimal("principal", &self.principal)?;
        if principal <= Decimal::ZERO {
            return Err(ScheduleError::InvalidNumber {
                field: "principal",
                value: principal.to_string(),
            });
        }
        let rate = required_decimal("rate", &self.rate)?;
        if rate.is_sign_negative() {
            return Err(ScheduleError::InvalidNumber {
                field: "rate",
                value: rate.to_string(),
            });
        }
        let open_date = required_date("open_date", &self.open_date)?;

        let close_date = match self.close_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_date(raw).ok_or_else(|| ScheduleError::InvalidDate {
                field: "close_date",
                value: raw.to_string(),
            })?),
        };
        if let Some(close) = close_date {
            if close < open_date {
                return Err(ScheduleError::InvertedDateRange {
                    open: open_date,
                    close,
                });
            }
        }

        let mut deposits = Vec::with_capacity(self.deposits.len());
        for (index, raw) in self.deposits.iter().enumerate() {
            if raw.is_blank() {
                continue;
            }
            let date = match raw.date.as_deref().map(str::trim) {
                None | Some("") => {
                    return Err(ScheduleError::InvalidDeposit {
                        index,
                        message: "missing date".to_string(),
                    })
                }
                Some(text) => parse_date(text).ok_or_else(|| ScheduleError::InvalidDeposit {
                    index,
                    message: format!("invalid date {:?}", text),
                })?,
            };
            let amount = match raw.amount.as_deref().map(str::trim) {
                None | Some("") => {
                    return Err(ScheduleError::InvalidDeposit {
                        index,
                        message: "missing amount".to_string(),
                    })
                }
                Some(text) => parse_decimal(text).ok_or_else(|| ScheduleError::InvalidDeposit {
                    index,
                    message: format!("invalid amount {:?}", text),
                })?,
            };
            if amount.is_sign_negative() {
                return Err(ScheduleError::InvalidDeposit {
                    index,
                    message: format!("negative amount {}", amount),
                });
            }
            deposits.push(Deposit::new(date, Money::from_decimal(amount)));
        }

        Ok(ParsedRequest {
            params: AccountParameters {
                principal: Money::from_decimal(principal),
                annual_rate: Rate::from_percent_decimal(rate),
                open_date,
                close_date,
            },
            deposits,
        })
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// decimal or scientific notation, surrounding whitespace ignored
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// `YYYY-MM-DD`, optionally followed by a time component which is ignored
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    let day = s.split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn required_decimal(field: &'static str, raw: &Option<String>) -> Result<Decimal> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Err(ScheduleError::MissingInput { field }),
        Some(text) => parse_decimal(text).ok_or_else(|| ScheduleError::InvalidNumber {
            field,
            value: text.to_string(),
        }),
    }
}

fn required_date(field: &'static str, raw: &Option<String>) -> Result<NaiveDate> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Err(ScheduleError::MissingInput { field }),
        Some(text) => parse_date(text).ok_or_else(|| ScheduleError::InvalidDate {
            field,
            value: text.to_string(),
        }),
    }
}
