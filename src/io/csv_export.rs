use std::path::Path;

use crate::io::DataError;
use crate::model::interval::format_hour;
use crate::model::{MarkingKind, WeekDataset};

fn marking_type(kind: MarkingKind) -> &'static str {
    match kind {
        MarkingKind::ClockIn => "Clock In",
        MarkingKind::ClockOut => "Clock Out",
        MarkingKind::Break => "Break",
        MarkingKind::Note => "Note",
    }
}

/// Export every entry to a semicolon-delimited CSV file matching the
/// import format.
///
/// Columns: Employee ; Date ; Type ; Start ; End ; Label
/// Dates are formatted as YYYY-MM-DD, times as HH:MM.
/// Returns the number of rows written.
pub fn export_csv(dataset: &WeekDataset, path: &Path) -> Result<usize, DataError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record(["Employee", "Date", "Type", "Start", "End", "Label"])?;

    let name_of = |id| {
        dataset
            .employee(id)
            .map(|e| e.name.clone())
            .unwrap_or_default()
    };

    let mut rows = 0usize;
    for entry in &dataset.schedules {
        wtr.write_record([
            name_of(entry.employee_id),
            entry.day.format("%Y-%m-%d").to_string(),
            "Schedule".to_string(),
            format_hour(entry.interval.start),
            format_hour(entry.interval.end),
            entry.label.clone(),
        ])?;
        rows += 1;
    }
    for entry in &dataset.worked {
        wtr.write_record([
            name_of(entry.employee_id),
            entry.day.format("%Y-%m-%d").to_string(),
            "Worked".to_string(),
            format_hour(entry.interval.start),
            format_hour(entry.interval.end),
            String::new(),
        ])?;
        rows += 1;
    }
    for entry in &dataset.markings {
        wtr.write_record([
            name_of(entry.employee_id),
            entry.day.format("%Y-%m-%d").to_string(),
            marking_type(entry.kind).to_string(),
            format_hour(entry.time),
            String::new(),
            String::new(),
        ])?;
        rows += 1;
    }

    wtr.flush().map_err(DataError::Io)?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv_import::import_csv;
    use crate::model::{Employee, MarkingEntry, ScheduleEntry, TimeInterval, WorkedTimeEntry};
    use chrono::NaiveDate;
    use egui::Color32;

    #[test]
    fn exported_file_reimports_cleanly() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let mut ds = WeekDataset::new("Rota", day);
        ds.add_employee(Employee::new("Alice", Color32::WHITE));
        let id = ds.employees[0].id;
        ds.set_schedule(ScheduleEntry::new(id, day, TimeInterval::new(8.0, 16.5), "Early"));
        ds.set_worked(WorkedTimeEntry::new(id, day, TimeInterval::new(8.25, 17.0)));
        ds.add_marking(MarkingEntry::new(id, day, 8.25, MarkingKind::ClockIn));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = export_csv(&ds, &path).unwrap();
        assert_eq!(rows, 3);

        let (back, skipped) = import_csv(&path).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(back.employees.len(), 1);
        assert_eq!(back.schedules[0].interval, TimeInterval::new(8.0, 16.5));
        assert_eq!(back.schedules[0].label, "Early");
        assert_eq!(back.worked[0].interval, TimeInterval::new(8.25, 17.0));
        assert_eq!(back.markings[0].time, 8.25);
        assert_eq!(back.markings[0].kind, MarkingKind::ClockIn);
    }

    #[test]
    fn empty_dataset_exports_only_the_header() {
        let ds = WeekDataset::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        assert_eq!(export_csv(&ds, &path).unwrap(), 0);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Employee;Date;Type"));
    }
}
