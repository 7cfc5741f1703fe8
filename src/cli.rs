use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Rotating triage duty manager for a shared Google Calendar.
///
/// Exactly one action flag is given per run. Window bounds feed the
/// listing, deletion, and generation actions; `--minDate`/`--extend` and
/// `--maxDate`/`--weeks`/`--cycles` are mutually exclusive pairs.
#[derive(Debug, Parser)]
#[command(name = "triage-cal", version)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args([
            "list",
            "assign",
            "delete",
            "load",
            "generate",
            "generate_from",
            "generate_rotation",
            "generate_next_rotation",
        ])
))]
#[command(group(
    ArgGroup::new("window_start").args(["min_date", "extend", "generate_next_rotation"])
))]
#[command(group(
    ArgGroup::new("window_end").args(["max_date", "weeks", "cycles", "generate_next_rotation"])
))]
pub struct Cli {
    /// Google calendar id to use. Default is the team triage calendar.
    /// Use 'primary' for the current user's calendar, or an account name
    /// (e.g. user@gmail.com) for another specific calendar.
    #[arg(long = "calendarId", value_name = "CALID")]
    pub calendar_id: Option<String>,

    /// List current assignments
    #[arg(long)]
    pub list: bool,

    /// Don't list assignments starting before date (YYYY-MM[-DD])
    #[arg(long = "minDate", value_name = "DATE")]
    pub min_date: Option<String>,

    /// Don't list assignments starting after date (YYYY-MM[-DD])
    #[arg(long = "maxDate", value_name = "DATE")]
    pub max_date: Option<String>,

    /// Start the window the Monday after the last existing assignment
    #[arg(long)]
    pub extend: bool,

    /// End the window after this many weekly slots
    #[arg(long, value_name = "N")]
    pub weeks: Option<u32>,

    /// End the window after this many full rotations of the name list
    #[arg(long, value_name = "N")]
    pub cycles: Option<u32>,

    /// Assign name for date
    #[arg(long, num_args = 2, value_names = ["DATE", "NAME"])]
    pub assign: Option<Vec<String>>,

    /// Delete assignment for date, or all assignments in the
    /// minDate-maxDate range if date is "ALL"
    #[arg(long, value_name = "DATE")]
    pub delete: Option<String>,

    /// Load "DATE: NAME" lines from file ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// Output a list of "DATE: NAME" lines for Mondays in the window
    #[arg(long, value_name = "NAME", num_args = 0..)]
    pub generate: Option<Vec<String>>,

    /// Like --generate, with the rotation recovered from a previously
    /// generated listing ("-" for stdin)
    #[arg(long = "generateFrom", value_name = "FILE")]
    pub generate_from: Option<PathBuf>,

    /// Like --generate, with names read from the rotation file
    #[arg(long = "generateRotation")]
    pub generate_rotation: bool,

    /// Shorthand for --generateRotation --extend --cycles 1
    #[arg(long = "generateNextRotation")]
    pub generate_next_rotation: bool,
}

/// The single action a run performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Assign { date: String, name: String },
    Delete(String),
    Load(PathBuf),
    Generate(Vec<String>),
    GenerateFrom(PathBuf),
    GenerateRotation,
    GenerateNextRotation,
}

impl Cli {
    pub fn action(&self) -> Action {
        if self.list {
            Action::List
        } else if let Some(pair) = &self.assign {
            Action::Assign {
                date: pair[0].clone(),
                name: pair[1].clone(),
            }
        } else if let Some(date) = &self.delete {
            Action::Delete(date.clone())
        } else if let Some(file) = &self.load {
            Action::Load(file.clone())
        } else if let Some(names) = &self.generate {
            Action::Generate(names.clone())
        } else if let Some(file) = &self.generate_from {
            Action::GenerateFrom(file.clone())
        } else if self.generate_rotation {
            Action::GenerateRotation
        } else {
            // The action arg group guarantees one flag was given
            Action::GenerateNextRotation
        }
    }
}
