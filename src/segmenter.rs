//! Participant segmentation
//!
//! A results file holds the submissions of all participants back to back. Each
//! submission starts with a `# Results on ... GMT` comment.

use crate::types::ParticipantSegment;
use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static RESULTS_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^# Results on (?P<date>.*)GMT$").unwrap());

/// Whether a line opens a new participant segment
pub fn is_results_header(line: &str) -> bool {
    RESULTS_HEADER.is_match(line)
}

/// Split a raw log into participant segments.
///
/// Lines before the first header belong to no participant and are dropped.
pub fn split_participants(raw: &str) -> Vec<ParticipantSegment<'_>> {
    let mut segments: Vec<ParticipantSegment<'_>> = Vec::new();

    for line in raw.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if is_results_header(line) {
            segments.push(ParticipantSegment {
                index: segments.len() + 1,
                lines: Vec::new(),
            });
        }
        if let Some(current) = segments.last_mut() {
            current.lines.push(line);
        }
    }

    segments
}

/// Best-effort reading of the date in a results header comment
pub fn parse_header_date(line: &str) -> Option<DateTime<Utc>> {
    let captures = RESULTS_HEADER.captures(line)?;
    let date = captures.name("date")?.as_str().trim();
    let with_zone = format!("{} GMT", date);

    if let Ok(dt) = DateTime::parse_from_rfc2822(&with_zone) {
        return Some(dt.with_timezone(&Utc));
    }

    // PCIbex also writes `Mon Jan 15 2024 10:30:00` style dates
    NaiveDateTime::parse_from_str(date, "%a %b %d %Y %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_results_header() {
        assert!(is_results_header("# Results on Mon 01 Jan GMT"));
        assert!(is_results_header(
            "# Results on Thu, 14 Sep 2023 12:34:56 GMT"
        ));
        assert!(!is_results_header("# Results on Mon 01 Jan GMT."));
        assert!(!is_results_header("# results on Mon 01 Jan GMT"));
        assert!(!is_results_header(" # Results on Mon 01 Jan GMT"));
    }

    #[test]
    fn test_split_participants() {
        let raw = "preamble\n\
                   # Results on Mon 01 Jan GMT\n\
                   a\n\
                   b\n\
                   # Results on Tue 02 Jan GMT\n\
                   c\n";
        let segments = split_participants(raw);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].index, 1);
        assert_eq!(
            segments[0].lines,
            vec!["# Results on Mon 01 Jan GMT", "a", "b"]
        );
        assert_eq!(segments[1].index, 2);
        assert_eq!(segments[1].lines, vec!["# Results on Tue 02 Jan GMT", "c"]);
    }

    #[test]
    fn test_split_participants_without_header() {
        assert!(split_participants("a\nb\n# comment\n").is_empty());
        assert!(split_participants("").is_empty());
    }

    #[test]
    fn test_split_participants_crlf() {
        let raw = "# Results on Mon 01 Jan GMT\r\nx,y\r\n";
        let segments = split_participants(raw);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].lines, vec!["# Results on Mon 01 Jan GMT", "x,y"]);
    }

    #[test]
    fn test_parse_header_date() {
        let parsed = parse_header_date("# Results on Thu, 14 Sep 2023 12:34:56 GMT");
        assert_eq!(
            parsed,
            Some(Utc.with_ymd_and_hms(2023, 9, 14, 12, 34, 56).unwrap())
        );

        let parsed = parse_header_date("# Results on Mon Jan 15 2024 10:30:00 GMT");
        assert_eq!(
            parsed,
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
        );

        assert_eq!(parse_header_date("# Results on Mon 01 Jan GMT"), None);
        assert_eq!(parse_header_date("not a header"), None);
    }
}
