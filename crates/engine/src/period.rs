//! Reporting window resolution.
//!
//! A [`Period`] is an inclusive `[start, end]` pair of calendar days. Raw
//! inputs come straight from query strings, so anything that does not parse
//! as `YYYY-MM-DD` counts as absent and falls back to the current month.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// Resolve optional raw bounds against `today`.
    ///
    /// `start <= end` is not enforced: an inverted window simply selects
    /// nothing.
    #[must_use]
    pub fn resolve(start_raw: Option<&str>, end_raw: Option<&str>, today: NaiveDate) -> Self {
        let start = start_raw
            .and_then(parse_date)
            .unwrap_or_else(|| first_day_of_month(today));
        let end = end_raw
            .and_then(parse_date)
            .unwrap_or_else(|| last_day_of_month(today));
        Self { start, end }
    }

    /// The calendar month containing `day`.
    #[must_use]
    pub fn month_of(day: NaiveDate) -> Self {
        Self {
            start: first_day_of_month(day),
            end: last_day_of_month(day),
        }
    }

    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// `(year, month)` of the start bound; budgets are matched against it.
    #[must_use]
    pub fn start_month(&self) -> (i32, u32) {
        (self.start.year(), self.start.month())
    }

    #[must_use]
    pub fn spans_multiple_months(&self) -> bool {
        (self.start.year(), self.start.month()) != (self.end.year(), self.end.month())
    }
}

/// Lenient `YYYY-MM-DD` parse: malformed or impossible dates yield `None`.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn first_day_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

fn last_day_of_month(day: NaiveDate) -> NaiveDate {
    first_day_of_month(day)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(day)
}
