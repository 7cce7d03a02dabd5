use std::path::Path;

use crate::io::DataError;
use crate::model::WeekDataset;

/// Save a dataset to a JSON file.
pub fn save_dataset(dataset: &WeekDataset, path: &Path) -> Result<(), DataError> {
    let json = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path, json)?;
    log::info!("saved rota '{}' to {:?}", dataset.name, path);
    Ok(())
}

/// Load a dataset from a JSON file and rebuild its cell indexes.
pub fn load_dataset(path: &Path) -> Result<WeekDataset, DataError> {
    let json = std::fs::read_to_string(path)?;
    let mut dataset: WeekDataset = serde_json::from_str(&json)?;
    dataset.reindex();
    log::info!(
        "loaded rota '{}' ({} employees) from {:?}",
        dataset.name,
        dataset.employees.len(),
        path
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Employee, ScheduleEntry, TimeInterval, WeekDataset};
    use chrono::NaiveDate;
    use egui::Color32;

    #[test]
    fn save_then_load_round_trips_and_reindexes() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let mut ds = WeekDataset::new("Shop Floor", day);
        ds.add_employee(Employee::new("Alice", Color32::from_rgb(66, 133, 244)));
        let id = ds.employees[0].id;
        ds.set_schedule(ScheduleEntry::new(id, day, TimeInterval::new(8.0, 16.0), "Early"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.rota.json");
        save_dataset(&ds, &path).unwrap();

        let loaded = load_dataset(&path).unwrap();
        assert_eq!(loaded.name, "Shop Floor");
        assert_eq!(loaded.employees.len(), 1);
        // The index is rebuilt on load, so cell lookup works immediately.
        use crate::model::ScheduleSource;
        let entry = loaded.schedule_for((id, day)).unwrap();
        assert_eq!(entry.label, "Early");
        assert_eq!(entry.interval, TimeInterval::new(8.0, 16.0));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }
}
