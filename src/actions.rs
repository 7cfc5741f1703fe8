use crate::assignments::AssignmentRepo;
use crate::calendar::{CalendarApi, GoogleCalendarClient};
use crate::cli::{Action, Cli};
use crate::config::Config;
use crate::error::{missing_bound, TriageResult};
use crate::rotation::{self, format_date, parse_date, WindowSpec};
use crate::roster;
use chrono::NaiveDate;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Run the action selected on the command line against the real calendar
pub async fn run(cli: Cli, config: Config) -> TriageResult<()> {
    let calendar_id = cli
        .calendar_id
        .clone()
        .unwrap_or_else(|| config.calendar_id.clone());
    let client = GoogleCalendarClient::new(&config);
    let repo = AssignmentRepo::new(client, calendar_id);

    execute(&cli, &config, &repo).await
}

/// Dispatch one action onto the rotation engine and the repository
pub async fn execute<C: CalendarApi>(
    cli: &Cli,
    config: &Config,
    repo: &AssignmentRepo<C>,
) -> TriageResult<()> {
    match cli.action() {
        Action::List => list(cli, repo).await,
        Action::Assign { date, name } => {
            repo.create(&name, parse_date(&date)?).await?;
            Ok(())
        }
        Action::Delete(date) => delete(cli, repo, &date).await,
        Action::Load(file) => load(repo, &file).await,
        Action::Generate(names) => {
            generate(cli.window_spec()?, repo, &names, None).await
        }
        Action::GenerateFrom(file) => generate_from(cli, repo, &file).await,
        Action::GenerateRotation => {
            let names = roster::read_names(open_input(&config.rotation_file)?)?;
            generate(cli.window_spec()?, repo, &names, None).await
        }
        Action::GenerateNextRotation => {
            // Sugar for --generateRotation --extend --cycles 1
            let names = roster::read_names(open_input(&config.rotation_file)?)?;
            let spec = WindowSpec {
                extend: true,
                cycles: Some(1),
                ..cli.window_spec()?
            };
            generate(spec, repo, &names, None).await
        }
    }
}

impl Cli {
    /// Raw window bounds with the date flags parsed
    pub fn window_spec(&self) -> TriageResult<WindowSpec> {
        Ok(WindowSpec {
            min_date: self.min_date.as_deref().map(parse_date).transpose()?,
            max_date: self.max_date.as_deref().map(parse_date).transpose()?,
            weeks: self.weeks,
            cycles: self.cycles,
            extend: self.extend,
        })
    }
}

/// Resolve the effective window, asking the calendar for the last
/// assignment only when --extend needs it. `last_known` short-circuits
/// that lookup when the caller already has a later date (--generateFrom).
async fn resolve<C: CalendarApi>(
    repo: &AssignmentRepo<C>,
    spec: &WindowSpec,
    name_count: usize,
    last_known: Option<NaiveDate>,
) -> TriageResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    let last = if spec.extend {
        match last_known {
            Some(date) => Some(date),
            None => repo.last_assignment_date().await?,
        }
    } else {
        None
    };

    rotation::resolve_window(spec, last, name_count)
}

async fn list<C: CalendarApi>(cli: &Cli, repo: &AssignmentRepo<C>) -> TriageResult<()> {
    let (min, max) = resolve(repo, &cli.window_spec()?, 0, None).await?;
    let assignments = repo.list(min, max).await?;

    println!("Triage:");
    for assignment in assignments {
        println!("{}: {}", assignment.start, assignment.name);
    }

    Ok(())
}

async fn delete<C: CalendarApi>(
    cli: &Cli,
    repo: &AssignmentRepo<C>,
    date: &str,
) -> TriageResult<()> {
    if date == "ALL" {
        let (min, max) = resolve(repo, &cli.window_spec()?, 0, None).await?;
        let (Some(min), Some(max)) = (min, max) else {
            return Err(missing_bound("--delete ALL requires --minDate and --maxDate"));
        };
        repo.delete_in_range(min, max).await?;
    } else {
        let date = parse_date(date)?;
        repo.delete_in_range(date, date).await?;
    }

    Ok(())
}

async fn load<C: CalendarApi>(repo: &AssignmentRepo<C>, file: &Path) -> TriageResult<()> {
    let entries = roster::read_assignment_lines(open_input(file)?)?;
    for (date, name) in entries {
        repo.create(&name, date).await?;
    }

    Ok(())
}

async fn generate<C: CalendarApi>(
    spec: WindowSpec,
    repo: &AssignmentRepo<C>,
    names: &[String],
    last_known: Option<NaiveDate>,
) -> TriageResult<()> {
    let (min, max) = resolve(repo, &spec, names.len(), last_known).await?;
    let (Some(min), Some(max)) = (min, max) else {
        return Err(missing_bound(
            "generating a schedule requires both a start bound (--minDate/--extend) \
             and an end bound (--maxDate/--weeks/--cycles)",
        ));
    };

    for (date, name) in rotation::schedule(names, min, max) {
        println!("{}: {}", format_date(date), name);
    }

    Ok(())
}

async fn generate_from<C: CalendarApi>(
    cli: &Cli,
    repo: &AssignmentRepo<C>,
    file: &Path,
) -> TriageResult<()> {
    let entries = roster::read_assignment_lines(open_input(file)?)?;
    let names = roster::rotation_from_schedule(&entries);

    // Extending continues from the listing itself, keeping the action
    // usable offline in a pipe from --list or a previous --generate
    let last_known = entries.last().map(|(date, _)| *date);
    generate(cli.window_spec()?, repo, &names, last_known).await
}

/// Open a line input source; "-" means stdin
fn open_input(path: &Path) -> TriageResult<Box<dyn BufRead>> {
    if path == Path::new("-") {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}
