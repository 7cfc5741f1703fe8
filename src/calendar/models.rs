use serde::{Deserialize, Serialize};

/// Start or end of a calendar event: either an all-day date or a timed
/// dateTime, exactly one of which is set on the wire
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EventTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "dateTime", skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
}

impl EventTime {
    pub fn all_day(date: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            date_time: None,
        }
    }

    /// Textual time value, whichever variant is present.
    ///
    /// Both forms start with YYYY-MM-DD, so the value compares correctly
    /// against date bounds as a plain string.
    pub fn value(&self) -> Option<&str> {
        self.date.as_deref().or(self.date_time.as_deref())
    }
}

/// Calendar event as returned by the events API
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: String,
    pub summary: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    pub transparency: Option<String>,
    #[serde(rename = "htmlLink")]
    pub html_link: Option<String>,
}

/// Body of an event insert call
#[derive(Debug, Clone, Serialize)]
pub struct NewEvent {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
    /// "transparent" so the assignment does not block availability
    pub transparency: String,
}

/// Response envelope of the events list API
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EventList {
    #[serde(default)]
    pub items: Vec<CalendarEvent>,
}
