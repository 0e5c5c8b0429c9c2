//! Comma-delimited assignment feed.
//!
//! # Responsibility
//! - Parse `employeeId, projectId, startDate, endDate` lines into records.
//! - Apply the open-ended fallback for missing or unparsable end dates.
//!
//! # Invariants
//! - Dates use the fixed `YYYY-MM-DD` layout; nothing locale-dependent.
//! - The processing date comes from `LoadOptions`, never from a global.
//! - Blank lines are skipped; every other line yields a record or an error.

use crate::model::assignment::{AssignmentRecord, EmployeeId, ProjectId};
use crate::model::period::days_in_month;
use crate::source::{AssignmentSource, LoadError, LoadResult, RecordField};
use chrono::{Local, NaiveDate};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const FIELD_DELIMITER: char = ',';
const MAX_DAY_OF_MONTH: u32 = 31;
const MIN_FIELDS: usize = 3;
const MAX_FIELDS: usize = 4;
const BYTE_ORDER_MARK: char = '\u{feff}';

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})$").expect("valid date regex")
});

/// Immutable parsing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Substituted for end dates that are missing or unparsable.
    pub today: NaiveDate,
}

impl LoadOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Uses the local calendar date as the processing date.
    pub fn for_today() -> Self {
        Self::new(Local::now().date_naive())
    }
}

/// Parses a strict `YYYY-MM-DD` date after trimming whitespace.
///
/// A day past the end of its month (up to 31) resolves to the month's last
/// day, so `2020-02-30` reads as `2020-02-29`. Day 00, day 32+ and month
/// 00 or 13+ are rejected.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let captures = DATE_RE.captures(raw.trim())?;
    let year: i32 = captures["year"].parse().ok()?;
    let month: u32 = captures["month"].parse().ok()?;
    let day: u32 = captures["day"].parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=MAX_DAY_OF_MONTH).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
}

/// Parses one non-blank feed line. `line` is the 1-based line number used in
/// error reports.
pub fn parse_record(
    raw: &str,
    line: usize,
    options: &LoadOptions,
) -> LoadResult<AssignmentRecord> {
    let fields: Vec<&str> = raw.split(FIELD_DELIMITER).map(str::trim).collect();
    if !(MIN_FIELDS..=MAX_FIELDS).contains(&fields.len()) {
        return Err(LoadError::FieldCount {
            line,
            found: fields.len(),
        });
    }

    let employee_id: EmployeeId = parse_id(fields[0], line, RecordField::EmployeeId)?;
    let project_id: ProjectId = parse_id(fields[1], line, RecordField::ProjectId)?;
    let start_date = parse_date(fields[2]).ok_or_else(|| LoadError::InvalidField {
        line,
        field: RecordField::StartDate,
        value: fields[2].to_string(),
    })?;

    let record = match fields.get(3).and_then(|raw_end| parse_date(raw_end)) {
        Some(end_date) => AssignmentRecord::new(employee_id, project_id, start_date, end_date),
        None => {
            debug!(
                "event=end_date_fallback module=source line={} today={}",
                line, options.today
            );
            AssignmentRecord::open_ended(employee_id, project_id, start_date, options.today)
        }
    };
    Ok(record)
}

/// Reads every record from a buffered text stream.
///
/// Lines end with `\n` or `\r\n`. Bytes that are not valid UTF-8 are
/// decoded lossily rather than aborting the load.
pub fn load_records<R: BufRead>(
    reader: R,
    options: &LoadOptions,
) -> LoadResult<Vec<AssignmentRecord>> {
    let mut records = Vec::new();
    for (index, line_result) in reader.split(b'\n').enumerate() {
        let line = index + 1;
        let bytes = line_result.map_err(|source| LoadError::Read { line, source })?;
        // Invalid UTF-8 becomes U+FFFD; only the field holding it can fail.
        let decoded = String::from_utf8_lossy(&bytes);
        let raw = decoded.strip_suffix('\r').unwrap_or(&*decoded);
        let raw = if index == 0 {
            raw.trim_start_matches(BYTE_ORDER_MARK)
        } else {
            raw
        };
        if raw.trim().is_empty() {
            continue;
        }
        records.push(parse_record(raw, line, options)?);
    }

    let open_ended = records.iter().filter(|record| record.is_open_ended()).count();
    info!(
        "event=records_loaded module=source status=ok count={} open_ended={}",
        records.len(),
        open_ended
    );
    Ok(records)
}

/// Opens `path` and reads every record.
///
/// # Errors
/// - `LoadError::SourceUnavailable` when the file cannot be opened.
/// - Line-level errors from `parse_record`.
pub fn load_file(path: &Path, options: &LoadOptions) -> LoadResult<Vec<AssignmentRecord>> {
    let file = File::open(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    load_records(BufReader::new(file), options)
}

/// File-backed assignment source.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    options: LoadOptions,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AssignmentSource for CsvFileSource {
    fn load(&self) -> LoadResult<Vec<AssignmentRecord>> {
        load_file(&self.path, &self.options)
    }
}

fn parse_id(raw: &str, line: usize, field: RecordField) -> LoadResult<i64> {
    raw.parse::<i64>().map_err(|_| LoadError::InvalidField {
        line,
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{load_records, parse_date, parse_record, LoadOptions};
    use crate::model::assignment::EndDateKind;
    use crate::source::{LoadError, RecordField};
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn options() -> LoadOptions {
        LoadOptions::new(NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"))
    }

    #[test]
    fn parse_date_requires_fixed_layout() {
        assert_eq!(
            parse_date(" 2020-03-01 "),
            NaiveDate::from_ymd_opt(2020, 3, 1)
        );
        assert_eq!(parse_date("2020-3-1"), None);
        assert_eq!(parse_date("2020/03/01"), None);
        assert_eq!(parse_date("2020-02-32"), None);
        assert_eq!(parse_date("2020-00-10"), None);
        assert_eq!(parse_date("2020-13-10"), None);
        assert_eq!(parse_date("2020-04-00"), None);
        assert_eq!(parse_date("NULL"), None);
    }

    #[test]
    fn parse_date_resolves_overflowing_day_to_month_end() {
        assert_eq!(parse_date("2020-02-30"), NaiveDate::from_ymd_opt(2020, 2, 29));
        assert_eq!(parse_date("2021-02-31"), NaiveDate::from_ymd_opt(2021, 2, 28));
        assert_eq!(parse_date("2021-04-31"), NaiveDate::from_ymd_opt(2021, 4, 30));
        assert_eq!(parse_date("2021-05-31"), NaiveDate::from_ymd_opt(2021, 5, 31));
    }

    #[test]
    fn overflowing_end_date_is_explicit_not_open_ended() {
        let record = parse_record("1, 100, 2020-01-01, 2020-02-30", 1, &options()).unwrap();
        assert_eq!(record.end_date, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
        assert_eq!(record.end_kind, EndDateKind::Explicit);

        let record = parse_record("1, 100, 2021-04-31, NULL", 1, &options()).unwrap();
        assert_eq!(record.start_date, NaiveDate::from_ymd_opt(2021, 4, 30).unwrap());
    }

    #[test]
    fn parse_record_trims_every_field() {
        let record = parse_record(" 143 , 12 , 2013-11-01 , 2014-01-05 ", 1, &options())
            .expect("well-formed line");
        assert_eq!(record.employee_id, 143);
        assert_eq!(record.project_id, 12);
        assert_eq!(record.start_date, NaiveDate::from_ymd_opt(2013, 11, 1).unwrap());
        assert_eq!(record.end_date, NaiveDate::from_ymd_opt(2014, 1, 5).unwrap());
        assert_eq!(record.end_kind, EndDateKind::Explicit);
    }

    #[test]
    fn unparsable_end_date_falls_back_to_today() {
        let record = parse_record("218, 10, 2012-05-16, NULL", 3, &options()).unwrap();
        assert_eq!(record.end_date, options().today);
        assert_eq!(record.end_kind, EndDateKind::OpenEnded);
    }

    #[test]
    fn missing_end_date_field_falls_back_to_today() {
        let record = parse_record("218,10,2012-05-16", 1, &options()).unwrap();
        assert!(record.is_open_ended());
        assert_eq!(record.end_date, options().today);
    }

    #[test]
    fn malformed_core_fields_are_reported_with_line_number() {
        let err = parse_record("abc,10,2012-05-16,2013-01-01", 7, &options()).unwrap_err();
        match err {
            LoadError::InvalidField { line, field, value } => {
                assert_eq!(line, 7);
                assert_eq!(field, RecordField::EmployeeId);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_record("1,10,16-05-2012,2013-01-01", 2, &options()).unwrap_err();
        assert!(err.to_string().contains("invalid start date `16-05-2012`"));
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let err = parse_record("1,10", 4, &options()).unwrap_err();
        assert!(matches!(err, LoadError::FieldCount { line: 4, found: 2 }));

        let err = parse_record("1,10,2012-05-16,2013-01-01,extra", 5, &options()).unwrap_err();
        assert!(matches!(err, LoadError::FieldCount { line: 5, found: 5 }));
    }

    #[test]
    fn load_records_skips_blank_lines_and_bom() {
        let input = "\u{feff}1,100,2020-01-01,2020-06-01\n\n   \n2,100,2020-03-01,2020-09-01\n";
        let records = load_records(Cursor::new(input), &options()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].employee_id, 1);
        assert_eq!(records[1].employee_id, 2);
    }

    #[test]
    fn invalid_utf8_in_end_date_falls_back_to_today() {
        let mut input = b"1,100,2020-01-01,2020-06-01\r\n2,100,2020-03-01,".to_vec();
        input.extend_from_slice(&[0xE9, b'\r', b'\n']);

        let records = load_records(Cursor::new(input), &options()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].end_kind, EndDateKind::Explicit);
        assert_eq!(records[0].end_date, NaiveDate::from_ymd_opt(2020, 6, 1).unwrap());
        assert_eq!(records[1].end_kind, EndDateKind::OpenEnded);
        assert_eq!(records[1].end_date, options().today);
    }

    #[test]
    fn invalid_utf8_in_core_field_is_an_invalid_field() {
        let mut input = b"1".to_vec();
        input.extend_from_slice(&[0xFF]);
        input.extend_from_slice(b",100,2020-01-01,2020-06-01\n");

        let err = load_records(Cursor::new(input), &options()).unwrap_err();
        match err {
            LoadError::InvalidField { line, field, .. } => {
                assert_eq!(line, 1);
                assert_eq!(field, RecordField::EmployeeId);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_records_stops_at_first_bad_line() {
        let input = "1,100,2020-01-01,2020-06-01\n2,x,2020-03-01,2020-09-01\n";
        let err = load_records(Cursor::new(input), &options()).unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(!err.is_source_unavailable());
    }
}
