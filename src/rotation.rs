use crate::error::{missing_bound, Error, TriageResult};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Parse a date string in YYYY-MM-DD or YYYY-MM form.
///
/// The month-only form normalizes to the first of the month.
pub fn parse_date(text: &str) -> TriageResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }

    // YYYY-MM normalizes to the first of the month
    let padded = format!("{}-01", text);
    if text.matches('-').count() == 1 {
        if let Ok(date) = NaiveDate::parse_from_str(&padded, "%Y-%m-%d") {
            return Ok(date);
        }
    }

    Err(Error::InvalidDate(text.to_string()))
}

/// Format a date in the canonical YYYY-MM-DD form
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// First Monday on or after the given date
pub fn monday_on_or_after(date: NaiveDate) -> NaiveDate {
    let days_until_monday = (7 - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(days_until_monday as i64)
}

pub fn is_monday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

/// Raw window bounds as given on the command line, before resolution
#[derive(Debug, Clone, Default)]
pub struct WindowSpec {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub weeks: Option<u32>,
    pub cycles: Option<u32>,
    pub extend: bool,
}

/// Resolve the effective [min, max] window from the raw bounds.
///
/// `--extend` starts the window at the first Monday after the last known
/// assignment; `--cycles` converts full rotations into a week count;
/// `--weeks` converts the start bound into an end bound. Mutual exclusion
/// of the raw flags is enforced by the CLI arg groups, not here.
pub fn resolve_window(
    spec: &WindowSpec,
    last_assignment: Option<NaiveDate>,
    name_count: usize,
) -> TriageResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    let mut min_date = spec.min_date;
    let mut max_date = spec.max_date;
    let mut weeks = spec.weeks;

    if spec.extend {
        let last = last_assignment.ok_or(Error::NoPriorAssignment)?;
        min_date = Some(monday_on_or_after(last + Duration::days(1)));
    }

    if let Some(cycles) = spec.cycles {
        if name_count == 0 {
            return Err(Error::EmptyNameList);
        }
        weeks = Some(cycles * name_count as u32);
    }

    if let Some(weeks) = weeks {
        let min = min_date.ok_or_else(|| {
            missing_bound("--weeks and --cycles require a start bound (--minDate or --extend)")
        })?;
        max_date = Some(monday_on_or_after(min) + Duration::days((weeks as i64 - 1) * 7));
    }

    Ok((min_date, max_date))
}

/// Lazy sequence of (Monday, name) pairs over a window.
///
/// Starts at the first Monday on or after `min_date`, advances a week at a
/// time, and cycles the name list round-robin until the date passes
/// `max_date`. An empty name list degrades to a single unnamed slot.
#[derive(Debug, Clone)]
pub struct Schedule {
    names: Vec<String>,
    next_date: NaiveDate,
    max_date: NaiveDate,
    index: usize,
}

pub fn schedule(names: &[String], min_date: NaiveDate, max_date: NaiveDate) -> Schedule {
    let names = if names.is_empty() {
        vec![String::new()]
    } else {
        names.to_vec()
    };

    Schedule {
        names,
        next_date: monday_on_or_after(min_date),
        max_date,
        index: 0,
    }
}

impl Iterator for Schedule {
    type Item = (NaiveDate, String);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_date > self.max_date {
            return None;
        }

        let date = self.next_date;
        let name = self.names[self.index % self.names.len()].clone();
        self.next_date += Duration::days(7);
        self.index += 1;

        Some((date, name))
    }
}
