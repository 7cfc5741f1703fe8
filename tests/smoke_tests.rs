use async_trait::async_trait;
use std::path::Path;
use triage_cal::actions;
use triage_cal::assignments::AssignmentRepo;
use triage_cal::calendar::{CalendarApi, CalendarEvent, EventTime, NewEvent};
use triage_cal::cli::{Action, Cli};
use triage_cal::config::Config;
use triage_cal::error::{calendar_api_error, TriageResult};

/// Calendar stub with a fixed event list that rejects every mutation.
/// Generation actions must never write to the calendar.
#[derive(Debug, Clone, Default)]
struct ReadOnlyCalendar {
    events: Vec<CalendarEvent>,
}

#[async_trait]
impl CalendarApi for ReadOnlyCalendar {
    async fn list_events(&self, _calendar_id: &str) -> TriageResult<Vec<CalendarEvent>> {
        Ok(self.events.clone())
    }

    async fn insert_event(
        &self,
        _calendar_id: &str,
        _event: &NewEvent,
    ) -> TriageResult<CalendarEvent> {
        Err(calendar_api_error("unexpected insert"))
    }

    async fn delete_event(&self, _calendar_id: &str, _event_id: &str) -> TriageResult<()> {
        Err(calendar_api_error("unexpected delete"))
    }
}

fn cli(args: &[&str]) -> Cli {
    use clap::Parser;
    Cli::try_parse_from(std::iter::once("triage-cal").chain(args.iter().copied())).unwrap()
}

fn config_with_rotation_file(rotation_file: &Path) -> Config {
    Config {
        google_client_id: "test_client_id".to_string(),
        google_client_secret: "test_client_secret".to_string(),
        calendar_id: "test-calendar".to_string(),
        token_file: "config/token.json".into(),
        rotation_file: rotation_file.to_path_buf(),
    }
}

fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("triage-cal-smoke-tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_cli_actions_map() {
    assert_eq!(cli(&["--list"]).action(), Action::List);
    assert_eq!(
        cli(&["--delete", "2014-07-28"]).action(),
        Action::Delete("2014-07-28".to_string())
    );
    assert_eq!(cli(&["--load", "-"]).action(), Action::Load("-".into()));
    assert_eq!(
        cli(&["--generateRotation"]).action(),
        Action::GenerateRotation
    );
    assert_eq!(
        cli(&["--generateNextRotation"]).action(),
        Action::GenerateNextRotation
    );
}

#[test]
fn test_calendar_id_override() {
    let cli = cli(&["--list", "--calendarId", "primary"]);
    assert_eq!(cli.calendar_id.as_deref(), Some("primary"));
}

#[tokio::test]
async fn test_generate_rotation_reads_rotation_file() {
    let rotation = temp_file("rotation.txt", "# weekly rotation\nFred\nBarney\nDino\n");
    let config = config_with_rotation_file(&rotation);
    let repo = AssignmentRepo::new(ReadOnlyCalendar::default(), "test-calendar");

    let args = ["--generateRotation", "--minDate", "2014-05-05", "--cycles", "1"];
    actions::execute(&cli(&args), &config, &repo).await.unwrap();
}

#[tokio::test]
async fn test_generate_next_rotation_extends_calendar() {
    let rotation = temp_file("next_rotation.txt", "Fred\nBarney\n");
    let config = config_with_rotation_file(&rotation);

    let calendar = ReadOnlyCalendar {
        events: vec![CalendarEvent {
            id: "e1".to_string(),
            summary: Some("Triage: Fred".to_string()),
            start: Some(EventTime::all_day("2014-07-21")),
            ..Default::default()
        }],
    };
    let repo = AssignmentRepo::new(calendar, "test-calendar");

    actions::execute(&cli(&["--generateNextRotation"]), &config, &repo)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_generate_from_is_offline() {
    let listing = temp_file(
        "previous.txt",
        "2014-05-05: Fred\n2014-05-12: Barney\n2014-05-19: Fred\n",
    );
    let config = config_with_rotation_file(Path::new("rotation.txt"));

    // Extending from a listing file must not touch the calendar at all;
    // the stub would fail the run if it were asked anything beyond list
    let repo = AssignmentRepo::new(ReadOnlyCalendar::default(), "test-calendar");
    let args = [
        "--generateFrom",
        listing.to_str().unwrap(),
        "--extend",
        "--cycles", "1",
    ];
    actions::execute(&cli(&args), &config, &repo).await.unwrap();
}
