use crate::error::{env_error, TriageResult};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Calendar the tool operates on when neither --calendarId nor
/// TRIAGE_CALENDAR_ID is given
pub const DEFAULT_CALENDAR_ID: &str = "h5t4mns6omp49db1e4qtqrrf4g@group.calendar.google.com";

/// Main configuration structure for the tool
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Calendar API client ID
    pub google_client_id: String,
    /// Google Calendar API client secret
    pub google_client_secret: String,
    /// Calendar ID holding the triage assignments
    pub calendar_id: String,
    /// Path of the stored OAuth token JSON
    pub token_file: PathBuf,
    /// Path of the static rotation name list
    pub rotation_file: PathBuf,
}

impl Config {
    /// Load configuration from the environment
    pub fn load() -> TriageResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let google_client_id =
            env::var("GOOGLE_CLIENT_ID").map_err(|_| env_error("GOOGLE_CLIENT_ID"))?;
        let google_client_secret =
            env::var("GOOGLE_CLIENT_SECRET").map_err(|_| env_error("GOOGLE_CLIENT_SECRET"))?;

        let calendar_id =
            env::var("TRIAGE_CALENDAR_ID").unwrap_or_else(|_| DEFAULT_CALENDAR_ID.to_string());

        let token_file = env::var("TRIAGE_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/token.json"));

        let rotation_file = env::var("TRIAGE_ROTATION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("rotation.txt"));

        Ok(Config {
            google_client_id,
            google_client_secret,
            calendar_id,
            token_file,
            rotation_file,
        })
    }
}
