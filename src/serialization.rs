//! serialization support for schedules

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::config::ScheduleConfig;
use crate::types::{AccrualRow, Schedule};

/// one rendered row: `{date, interest, total}` with fixed-scale amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    pub date: String,
    pub interest: String,
    pub total: String,
}

impl RowView {
    pub fn from_row(row: &AccrualRow, scale: u32) -> Self {
        RowView {
            date: row.date.format("%Y-%m-%d").to_string(),
            interest: row.interest.to_fixed(scale),
            total: row.running_total.to_fixed(scale),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    pub row_count: usize,
    pub total_interest: String,
    pub total_deposits: String,
    pub final_balance: String,
}

/// serializable view of a computed schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleView {
    pub rows: Vec<RowView>,
    pub summary: SummaryView,
}

impl ScheduleView {
    pub fn from_schedule(schedule: &Schedule, config: &ScheduleConfig) -> Self {
        let scale = config.display_scale;
        ScheduleView {
            rows: schedule.rows.iter().map(|r| RowView::from_row(r, scale)).collect(),
            summary: SummaryView {
                row_count: schedule.len(),
                total_interest: schedule.total_interest().to_fixed(scale),
                total_deposits: schedule.total_deposits().to_fixed(scale),
                final_balance: schedule.final_balance.to_fixed(scale),
            },
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// only the row list, the shape a table renderer consumes
    pub fn rows_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.rows)
    }

    /// plain-text table with a summary line
    pub fn to_table(&self) -> String {
        let interest_width = self
            .rows
            .iter()
            .map(|r| r.interest.len())
            .chain(std::iter::once("Interest".len()))
            .max()
            .unwrap_or(0);
        let total_width = self
            .rows
            .iter()
            .map(|r| r.total.len())
            .chain(std::iter::once("Total Amount".len()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<10}  {:>iw$}  {:>tw$}",
            "Date",
            "Interest",
            "Total Amount",
            iw = interest_width,
            tw = total_width
        );
        let _ = writeln!(out, "{}", "-".repeat(14 + interest_width + total_width));
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{:<10}  {:>iw$}  {:>tw$}",
                row.date,
                row.interest,
                row.total,
                iw = interest_width,
                tw = total_width
            );
        }
        let _ = writeln!(
            out,
            "{} rows, interest {}, deposits {}, balance {}",
            self.summary.row_count,
            self.summary.total_interest,
            self.summary.total_deposits,
            self.summary.final_balance
        );
        out
    }
}
