use crate::calendar::{CalendarApi, EventTime, NewEvent};
use crate::error::TriageResult;
use crate::rotation::{format_date, is_monday, parse_date};
use chrono::{Duration, NaiveDate};
use tracing::{info, warn};

/// Summary prefix marking a calendar event as a triage assignment
pub const SUMMARY_PREFIX: &str = "Triage:";

/// One person's Monday-to-Friday triage duty, as read back from the
/// calendar. The calendar remains the system of record; `id` is the
/// event id it assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Textual start value of the backing event (date, or dateTime for
    /// events created by hand)
    pub start: String,
    pub name: String,
    pub id: String,
}

/// Repository of triage assignments on one calendar
pub struct AssignmentRepo<C> {
    api: C,
    calendar_id: String,
}

impl<C: CalendarApi> AssignmentRepo<C> {
    pub fn new(api: C, calendar_id: impl Into<String>) -> Self {
        Self {
            api,
            calendar_id: calendar_id.into(),
        }
    }

    /// List triage assignments, ascending by start date.
    ///
    /// Keeps only events whose summary carries the triage prefix and that
    /// fall inside the inclusive bounds. Bounds compare against the
    /// event's textual start value; both date and dateTime forms open
    /// with YYYY-MM-DD, so fixed-width string comparison is exact.
    pub async fn list(
        &self,
        min_date: Option<NaiveDate>,
        max_date: Option<NaiveDate>,
    ) -> TriageResult<Vec<Assignment>> {
        let events = self.api.list_events(&self.calendar_id).await?;
        let min = min_date.map(format_date);
        let max = max_date.map(format_date);

        let mut assignments = Vec::new();
        for event in events {
            // Events missing any required field are not ours to touch
            let Some(summary) = event.summary.as_deref() else {
                continue;
            };
            let Some(name) = summary.strip_prefix(SUMMARY_PREFIX) else {
                continue;
            };
            let Some(start) = event.start.as_ref().and_then(EventTime::value) else {
                continue;
            };
            if event.id.is_empty() {
                continue;
            }

            if min.as_deref().is_some_and(|m| start < m) {
                continue;
            }
            if max.as_deref().is_some_and(|m| start > m) {
                continue;
            }

            assignments.push(Assignment {
                start: start.to_string(),
                name: name.trim_start().to_string(),
                id: event.id,
            });
        }

        assignments.sort_by(|a, b| a.start.cmp(&b.start));
        Ok(assignments)
    }

    /// Start date of the latest assignment on the calendar, if any
    pub async fn last_assignment_date(&self) -> TriageResult<Option<NaiveDate>> {
        let assignments = self.list(None, None).await?;
        let Some(last) = assignments.last() else {
            return Ok(None);
        };

        // A dateTime start still opens with its date
        let day = last.start.get(..10).unwrap_or(&last.start);
        Ok(parse_date(day).ok())
    }

    /// Create a one-week (Mon-Fri) assignment.
    ///
    /// A non-Monday start is skipped with a warning rather than failing,
    /// so batch loads keep going. Returns the created record, or None for
    /// a skipped one.
    pub async fn create(&self, name: &str, start: NaiveDate) -> TriageResult<Option<Assignment>> {
        if !is_monday(start) {
            warn!("{} is not a Monday, skipping...", format_date(start));
            return Ok(None);
        }

        // All-day events end on the day after the last covered day
        let end = start + Duration::days(5);
        info!("adding assignment: {}: {}", format_date(start), name);

        let event = NewEvent {
            summary: format!("{} {}", SUMMARY_PREFIX, name),
            start: EventTime::all_day(&format_date(start)),
            end: EventTime::all_day(&format_date(end)),
            transparency: "transparent".to_string(),
        };

        let created = self.api.insert_event(&self.calendar_id, &event).await?;
        if let Some(link) = &created.html_link {
            info!("htmlLink: {}", link);
        }

        Ok(Some(Assignment {
            start: format_date(start),
            name: name.to_string(),
            id: created.id,
        }))
    }

    /// Delete one assignment by its event id
    pub async fn delete(&self, assignment: &Assignment) -> TriageResult<()> {
        self.api
            .delete_event(&self.calendar_id, &assignment.id)
            .await
    }

    /// Delete every assignment in the inclusive window, reporting the
    /// count first. Deletions run one at a time; a failure partway leaves
    /// the earlier ones deleted.
    pub async fn delete_in_range(
        &self,
        min_date: NaiveDate,
        max_date: NaiveDate,
    ) -> TriageResult<usize> {
        let matches = self.list(Some(min_date), Some(max_date)).await?;
        let count = matches.len();
        println!(
            "Found {} event{} to delete in time window.",
            count,
            if count == 1 { "" } else { "s" }
        );

        for assignment in &matches {
            println!(
                "Deleting assignment: {}: {}",
                assignment.start, assignment.name
            );
            self.delete(assignment).await?;
        }

        Ok(count)
    }
}
