use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use crate::models::Assignment;

/// Fine charged per day past the due date.
pub const FINE_PER_DAY: i64 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FineDetails {
    pub days: i64,
    pub fine: i64,
}

impl FineDetails {
    pub fn is_overdue(&self) -> bool {
        self.days > 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FineSummary {
    pub active_count: usize,
    pub total_fine: i64,
    pub overdue_count: usize,
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, keeping only the date.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

pub fn fine_details(due_date: Option<&str>, today: NaiveDate) -> FineDetails {
    let Some(due) = due_date.and_then(parse_day) else {
        return FineDetails::default();
    };

    let days = (today - due).num_days();
    if days > 0 {
        FineDetails { days, fine: days * FINE_PER_DAY }
    } else {
        FineDetails::default()
    }
}

pub fn summarize<'a>(assignments: impl IntoIterator<Item = &'a Assignment>, today: NaiveDate) -> FineSummary {
    assignments
        .into_iter()
        .map(|a| fine_details(a.due_date.as_deref(), today))
        .fold(FineSummary::default(), |mut acc, details| {
            acc.active_count += 1;
            acc.total_fine += details.fine;
            if details.is_overdue() {
                acc.overdue_count += 1;
            }
            acc
        })
}
