mod client;
pub mod models;
pub mod token;

pub use client::{CalendarApi, GoogleCalendarClient};
pub use models::{CalendarEvent, EventList, EventTime, NewEvent};
