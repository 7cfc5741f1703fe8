use super::models::{CalendarEvent, EventList, NewEvent};
use super::token::TokenManager;
use crate::config::Config;
use crate::error::{calendar_api_error, Error, TriageResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

/// Operations the calendar service exposes, scoped to a calendar id.
///
/// Production uses `GoogleCalendarClient`; tests substitute an in-memory
/// implementation.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    async fn list_events(&self, calendar_id: &str) -> TriageResult<Vec<CalendarEvent>>;
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &NewEvent,
    ) -> TriageResult<CalendarEvent>;
    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> TriageResult<()>;
}

/// Google Calendar v3 REST client
pub struct GoogleCalendarClient {
    client: Client,
    token_manager: TokenManager,
}

impl GoogleCalendarClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            token_manager: TokenManager::new(config),
        }
    }

    fn events_url(calendar_id: &str) -> TriageResult<Url> {
        let url_str = format!(
            "https://www.googleapis.com/calendar/v3/calendars/{}/events",
            calendar_id
        );
        Url::parse(&url_str)
            .map_err(|e| calendar_api_error(&format!("Failed to parse URL: {}", e)))
    }

    async fn bearer(&self) -> TriageResult<String> {
        let token = self.token_manager.access_token().await?;
        Ok(format!("Bearer {}", token))
    }

    async fn check_status(response: reqwest::Response, what: &str) -> TriageResult<reqwest::Response> {
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::AuthExpired);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(calendar_api_error(&format!(
                "Failed to {}: HTTP {} - {}",
                what, status, body
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl CalendarApi for GoogleCalendarClient {
    async fn list_events(&self, calendar_id: &str) -> TriageResult<Vec<CalendarEvent>> {
        let mut url = Self::events_url(calendar_id)?;
        url.query_pairs_mut()
            .append_pair("singleEvents", "true")
            .append_pair("maxResults", "2500");

        let response = self
            .client
            .get(url)
            .header("Authorization", self.bearer().await?)
            .send()
            .await
            .map_err(|e| calendar_api_error(&format!("Failed to fetch events: {}", e)))?;
        let response = Self::check_status(response, "fetch events").await?;

        let list: EventList = response
            .json()
            .await
            .map_err(|e| calendar_api_error(&format!("Failed to parse events response: {}", e)))?;

        Ok(list.items)
    }

    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &NewEvent,
    ) -> TriageResult<CalendarEvent> {
        let url = Self::events_url(calendar_id)?;

        let response = self
            .client
            .post(url)
            .header("Authorization", self.bearer().await?)
            .json(event)
            .send()
            .await
            .map_err(|e| calendar_api_error(&format!("Failed to insert event: {}", e)))?;
        let response = Self::check_status(response, "insert event").await?;

        response
            .json()
            .await
            .map_err(|e| calendar_api_error(&format!("Failed to parse insert response: {}", e)))
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> TriageResult<()> {
        let mut url = Self::events_url(calendar_id)?;
        url.path_segments_mut()
            .map_err(|_| calendar_api_error("Calendar URL cannot hold an event path"))?
            .push(event_id);

        let response = self
            .client
            .delete(url)
            .header("Authorization", self.bearer().await?)
            .send()
            .await
            .map_err(|e| calendar_api_error(&format!("Failed to delete event: {}", e)))?;
        Self::check_status(response, "delete event").await?;

        Ok(())
    }
}
