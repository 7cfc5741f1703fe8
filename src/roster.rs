use crate::error::TriageResult;
use crate::rotation::parse_date;
use chrono::NaiveDate;
use std::io::BufRead;
use tracing::warn;

/// Read a rotation file: one name per line, `#` comments and blank lines
/// ignored.
pub fn read_names<R: BufRead>(reader: R) -> TriageResult<Vec<String>> {
    let mut names = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        names.push(trimmed.to_string());
    }

    Ok(names)
}

/// Parse a single `YYYY-MM-DD: NAME` assignment line
pub fn parse_assignment_line(line: &str) -> Option<(NaiveDate, String)> {
    let (date_part, name_part) = line.split_once(':')?;
    let date = parse_date(date_part.trim()).ok()?;
    let name = name_part.trim();
    if name.is_empty() {
        return None;
    }
    Some((date, name.to_string()))
}

/// Read `YYYY-MM-DD: NAME` lines from a schedule or listing.
///
/// Blank lines are ignored; anything else that fails to parse is skipped
/// with a warning.
pub fn read_assignment_lines<R: BufRead>(reader: R) -> TriageResult<Vec<(NaiveDate, String)>> {
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_assignment_line(&line) {
            Some(entry) => entries.push(entry),
            None => warn!("skipping line: '{}'", line.trim_end()),
        }
    }

    Ok(entries)
}

/// Recover a rotation from previously generated schedule entries.
///
/// The rotation is the distinct names in order of first appearance,
/// rotated so the cycle continues after the final entry's name.
pub fn rotation_from_schedule(entries: &[(NaiveDate, String)]) -> Vec<String> {
    let mut rotation: Vec<String> = Vec::new();
    for (_, name) in entries {
        if !rotation.contains(name) {
            rotation.push(name.clone());
        }
    }

    if let Some((_, last)) = entries.last() {
        if let Some(pos) = rotation.iter().position(|n| n == last) {
            let shift = (pos + 1) % rotation.len();
            rotation.rotate_left(shift);
        }
    }

    rotation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::format_date;

    #[test]
    fn test_read_names() {
        let input = "# triage rotation\n\nFred\n  Barney \n# Dino is away\nDino\n";
        let names = read_names(input.as_bytes()).unwrap();
        assert_eq!(names, vec!["Fred", "Barney", "Dino"]);
    }

    #[test]
    fn test_parse_assignment_line() {
        let (date, name) = parse_assignment_line("2014-07-28: James Kirk").unwrap();
        assert_eq!(format_date(date), "2014-07-28");
        assert_eq!(name, "James Kirk");

        // Names may contain further colons
        let (_, name) = parse_assignment_line("2014-07-28: Kirk: the captain").unwrap();
        assert_eq!(name, "Kirk: the captain");

        assert!(parse_assignment_line("2014-07-28 James Kirk").is_none());
        assert!(parse_assignment_line("2014-07-28:").is_none());
        assert!(parse_assignment_line("someday: James").is_none());
    }

    #[test]
    fn test_read_assignment_lines_skips_malformed() {
        let input = "2014-07-28: Fred\n\nnot a line\n2014-08-04: Barney\n";
        let entries = read_assignment_lines(input.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].1, "Fred");
        assert_eq!(entries[1].1, "Barney");
    }

    #[test]
    fn test_rotation_from_schedule() {
        let entries = read_assignment_lines(
            "2014-05-05: A\n2014-05-12: B\n2014-05-19: C\n2014-05-26: A\n".as_bytes(),
        )
        .unwrap();

        // Last assignee was A, so the next cycle starts with B
        assert_eq!(rotation_from_schedule(&entries), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_rotation_from_schedule_wraps() {
        // Last assignee closes the cycle, so the order comes back around
        let entries = read_assignment_lines(
            "2014-05-05: A\n2014-05-12: B\n2014-05-19: C\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(rotation_from_schedule(&entries), vec!["A", "B", "C"]);

        // A one-person rotation stays put
        let entries =
            read_assignment_lines("2014-05-05: A\n2014-05-12: A\n".as_bytes()).unwrap();
        assert_eq!(rotation_from_schedule(&entries), vec!["A"]);
    }

    #[test]
    fn test_rotation_from_empty_schedule() {
        assert!(rotation_from_schedule(&[]).is_empty());
    }
}
