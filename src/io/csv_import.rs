use std::path::Path;

use chrono::NaiveDate;

use crate::io::DataError;
use crate::model::interval::parse_hour;
use crate::model::week::monday_of;
use crate::model::{
    Employee, MarkingEntry, MarkingKind, ScheduleEntry, TimeInterval, WeekDataset, WorkedTimeEntry,
};
use crate::ui::theme;

/// What a data row describes.
enum RowKind {
    Schedule,
    Worked,
    Marking(MarkingKind),
}

fn parse_row_kind(s: &str) -> Option<RowKind> {
    match s.trim().to_lowercase().replace([' ', '-', '_'], "").as_str() {
        "schedule" | "shift" | "planned" | "plan" | "rota" => Some(RowKind::Schedule),
        "worked" | "work" | "actual" | "clocked" | "time" => Some(RowKind::Worked),
        "clockin" | "in" | "signin" => Some(RowKind::Marking(MarkingKind::ClockIn)),
        "clockout" | "out" | "signout" => Some(RowKind::Marking(MarkingKind::ClockOut)),
        "break" | "pause" | "lunch" => Some(RowKind::Marking(MarkingKind::Break)),
        "note" | "marking" | "event" => Some(RowKind::Marking(MarkingKind::Note)),
        _ => None,
    }
}

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

/// Map a normalized header to our column index:
///   0 = employee, 1 = date, 2 = type, 3 = start, 4 = end, 5 = label
fn header_to_col(normalized: &str) -> Option<usize> {
    match normalized {
        "employee" | "employeename" | "name" | "staff" | "person" | "who" => Some(0),

        "date" | "day" | "workday" => Some(1),

        "type" | "kind" | "entrytype" | "record" => Some(2),

        "start" | "starttime" | "from" | "begin" | "time" | "at" => Some(3),

        "end" | "endtime" | "to" | "finish" | "until" => Some(4),

        "label" | "shift" | "shiftname" | "description" | "notes" | "note" | "comment" => Some(5),

        _ => None,
    }
}

/// Import a week of rota entries from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column
/// headers flexibly (e.g. "Employee Name", "Start Time"). Employees
/// are created in order of first appearance. Returns
/// `(dataset, skipped_count)` on success; the caller names the
/// dataset (usually from the file stem).
pub fn import_csv(path: &Path) -> Result<(WeekDataset, usize), DataError> {
    let content = std::fs::read_to_string(path)?;

    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<usize>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    // Employee, date, type and start are the minimum to place a row.
    for (col, what) in [(0, "employee"), (1, "date"), (2, "entry type"), (3, "start time")] {
        if !col_map.iter().any(|c| *c == Some(col)) {
            let found: Vec<&str> = headers.iter().collect();
            return Err(DataError::Format(format!(
                "CSV is missing a {} column. Found headers: {:?}",
                what, found
            )));
        }
    }

    let mut dataset = WeekDataset::default();
    let palette = theme::EMPLOYEE_COLORS;
    let mut skipped = 0usize;
    let mut earliest: Option<NaiveDate> = None;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping CSV row {}: {}", i + 2, e);
                skipped += 1;
                continue;
            }
        };

        let mut employee_val = None;
        let mut date_val = None;
        let mut type_val = None;
        let mut start_val = None;
        let mut end_val = None;
        let mut label_val = None;

        for (col_idx, field) in record.iter().enumerate() {
            if col_idx < col_map.len() {
                match col_map[col_idx] {
                    Some(0) => employee_val = Some(field.trim().to_string()),
                    Some(1) => date_val = Some(field.trim().to_string()),
                    Some(2) => type_val = Some(field.trim().to_string()),
                    Some(3) => start_val = Some(field.trim().to_string()),
                    Some(4) => end_val = Some(field.trim().to_string()),
                    Some(5) => label_val = Some(field.trim().to_string()),
                    _ => {}
                }
            }
        }

        let name = match employee_val {
            Some(n) if !n.is_empty() => n,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let Some(day) = date_val.as_deref().and_then(parse_date) else {
            log::warn!(
                "skipping row {}: invalid date '{}'",
                i + 2,
                date_val.as_deref().unwrap_or("")
            );
            skipped += 1;
            continue;
        };

        let Some(kind) = type_val.as_deref().and_then(parse_row_kind) else {
            log::warn!(
                "skipping row {}: unknown entry type '{}'",
                i + 2,
                type_val.as_deref().unwrap_or("")
            );
            skipped += 1;
            continue;
        };

        let Some(start) = start_val.as_deref().and_then(parse_hour) else {
            log::warn!(
                "skipping row {}: invalid start time '{}'",
                i + 2,
                start_val.as_deref().unwrap_or("")
            );
            skipped += 1;
            continue;
        };

        // Find or create the employee by name (case-insensitive).
        let employee_id = match dataset
            .employees
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(&name))
        {
            Some(e) => e.id,
            None => {
                let color = palette[dataset.employees.len() % palette.len()];
                let employee = Employee::new(name, color);
                let id = employee.id;
                dataset.employees.push(employee);
                id
            }
        };

        match kind {
            RowKind::Schedule | RowKind::Worked => {
                let Some(end) = end_val.as_deref().and_then(parse_hour) else {
                    log::warn!(
                        "skipping row {}: invalid end time '{}'",
                        i + 2,
                        end_val.as_deref().unwrap_or("")
                    );
                    skipped += 1;
                    continue;
                };
                let interval = TimeInterval::new(start, end);
                match kind {
                    RowKind::Schedule => dataset.schedules.push(ScheduleEntry::new(
                        employee_id,
                        day,
                        interval,
                        label_val.unwrap_or_default(),
                    )),
                    _ => dataset
                        .worked
                        .push(WorkedTimeEntry::new(employee_id, day, interval)),
                }
            }
            RowKind::Marking(marking_kind) => {
                dataset
                    .markings
                    .push(MarkingEntry::new(employee_id, day, start, marking_kind));
            }
        }

        earliest = Some(earliest.map_or(day, |e: NaiveDate| e.min(day)));
    }

    if dataset.employees.is_empty() {
        if skipped > 0 {
            return Err(DataError::Format(format!(
                "no valid entries found in CSV ({} rows skipped)",
                skipped
            )));
        }
        return Err(DataError::Format(
            "CSV file is empty or has no data rows".to_string(),
        ));
    }

    if let Some(day) = earliest {
        dataset.week_start = monday_of(day);
    }
    dataset.reindex();

    Ok((dataset, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScheduleSource;
    use std::io::Write;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rota.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn imports_semicolon_delimited_entries() {
        let (_dir, path) = write_csv(
            "Employee;Date;Type;Start;End;Label\n\
             Alice;2025-03-03;Schedule;08:00;16:00;Early\n\
             Alice;2025-03-03;Worked;08:30;18:00;\n\
             Alice;2025-03-03;Clock In;08:30;;\n\
             Bob;2025-03-04;Schedule;12:00;20:00;Late\n",
        );
        let (ds, skipped) = import_csv(&path).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(ds.employees.len(), 2);
        assert_eq!(ds.schedules.len(), 2);
        assert_eq!(ds.worked.len(), 1);
        assert_eq!(ds.markings.len(), 1);
        // Week snaps to the Monday of the earliest entry.
        assert_eq!(ds.week_start, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());

        let alice = ds.employees[0].id;
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let entry = ds.schedule_for((alice, day)).unwrap();
        assert_eq!(entry.label, "Early");
        assert_eq!(entry.interval, TimeInterval::new(8.0, 16.0));
        assert_eq!(ds.markings[0].kind, MarkingKind::ClockIn);
        assert_eq!(ds.markings[0].time, 8.5);
    }

    #[test]
    fn flexible_headers_and_comma_delimiter() {
        let (_dir, path) = write_csv(
            "Staff,Work Day,Entry Type,Start Time,End Time\n\
             Cara,03/03/2025,shift,9,17\n",
        );
        let (ds, skipped) = import_csv(&path).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(ds.employees[0].name, "Cara");
        assert_eq!(ds.schedules[0].interval, TimeInterval::new(9.0, 17.0));
    }

    #[test]
    fn invalid_rows_are_skipped_and_counted() {
        let (_dir, path) = write_csv(
            "Employee;Date;Type;Start;End\n\
             Alice;2025-03-03;Schedule;08:00;16:00\n\
             ;2025-03-03;Schedule;08:00;16:00\n\
             Bob;not-a-date;Schedule;08:00;16:00\n\
             Bob;2025-03-03;Teleport;08:00;16:00\n\
             Bob;2025-03-03;Schedule;late;16:00\n\
             Bob;2025-03-03;Schedule;08:00;early\n",
        );
        let (ds, skipped) = import_csv(&path).unwrap();
        assert_eq!(skipped, 5);
        assert_eq!(ds.schedules.len(), 1);
        // Bob was created before his end time failed to parse; that is
        // fine, he just has no entries yet.
        assert!(ds.employees.len() <= 2);
    }

    #[test]
    fn same_employee_name_is_not_duplicated() {
        let (_dir, path) = write_csv(
            "Employee;Date;Type;Start;End\n\
             Alice;2025-03-03;Schedule;08:00;16:00\n\
             alice;2025-03-04;Worked;08:00;15:00\n",
        );
        let (ds, _) = import_csv(&path).unwrap();
        assert_eq!(ds.employees.len(), 1);
        assert_eq!(ds.worked[0].employee_id, ds.employees[0].id);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let (_dir, path) = write_csv("Employee;Type;Start\nAlice;Schedule;08:00\n");
        let err = import_csv(&path).unwrap_err();
        assert!(matches!(err, DataError::Format(_)));
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn all_rows_invalid_is_an_error() {
        let (_dir, path) = write_csv("Employee;Date;Type;Start\n;;;\n");
        assert!(import_csv(&path).is_err());
    }
}
