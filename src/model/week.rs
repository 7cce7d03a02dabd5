use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::employee::Employee;
use super::entry::{MarkingEntry, ScheduleEntry, WorkedTimeEntry};
use super::interval::TimeInterval;

pub const DAYS_PER_WEEK: usize = 7;

/// Lookup key for one employee-day cell.
pub type CellKey = (Uuid, NaiveDate);

/// Read access to one week of rota records, injected into the board
/// builder so the computation never touches globals.
pub trait ScheduleSource {
    fn employees(&self) -> &[Employee];

    /// The seven grid days, Monday first.
    fn days(&self) -> Vec<NaiveDate>;

    fn schedule_for(&self, key: CellKey) -> Option<&ScheduleEntry>;
    fn worked_for(&self, key: CellKey) -> Option<&WorkedTimeEntry>;
    /// Markings of the cell, in the order they were recorded.
    fn markings_for(&self, key: CellKey) -> Vec<&MarkingEntry>;

    /// Substitute cell for a day with no real records: the first known
    /// employee, on the data day selected by `day_index mod N`.
    /// `None` when there is no employee or no day carrying data.
    fn fallback_for(&self, day_index: usize) -> Option<CellKey>;
}

/// Per-cell hash indexes over the entry lists. Rebuilt after every
/// mutation and after deserialization; at most one schedule and one
/// worked entry per cell (first one wins), any number of markings.
#[derive(Debug, Default, Clone)]
struct WeekIndex {
    schedule: HashMap<CellKey, usize>,
    worked: HashMap<CellKey, usize>,
    markings: HashMap<CellKey, Vec<usize>>,
    data_days: Vec<NaiveDate>,
}

/// One week of rota data: the employees plus their schedule, worked,
/// and marking entries, with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekDataset {
    pub name: String,
    /// Monday of the displayed week.
    pub week_start: NaiveDate,
    pub employees: Vec<Employee>,
    pub schedules: Vec<ScheduleEntry>,
    pub worked: Vec<WorkedTimeEntry>,
    pub markings: Vec<MarkingEntry>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(skip)]
    index: WeekIndex,
}

impl Default for WeekDataset {
    fn default() -> Self {
        Self {
            name: "Untitled Rota".to_string(),
            week_start: monday_of(chrono::Local::now().date_naive()),
            employees: Vec::new(),
            schedules: Vec::new(),
            worked: Vec::new(),
            markings: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
            index: WeekIndex::default(),
        }
    }
}

/// Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

impl WeekDataset {
    pub fn new(name: impl Into<String>, week_start: NaiveDate) -> Self {
        Self {
            name: name.into(),
            week_start: monday_of(week_start),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Rebuild the cell indexes. Call after bulk edits or load.
    pub fn reindex(&mut self) {
        let mut index = WeekIndex::default();

        for (i, e) in self.schedules.iter().enumerate() {
            index.schedule.entry((e.employee_id, e.day)).or_insert(i);
        }
        for (i, e) in self.worked.iter().enumerate() {
            index.worked.entry((e.employee_id, e.day)).or_insert(i);
        }
        for (i, e) in self.markings.iter().enumerate() {
            index
                .markings
                .entry((e.employee_id, e.day))
                .or_default()
                .push(i);
        }

        let mut days: Vec<NaiveDate> = self
            .schedules
            .iter()
            .map(|e| e.day)
            .chain(self.worked.iter().map(|e| e.day))
            .chain(self.markings.iter().map(|e| e.day))
            .collect();
        days.sort();
        days.dedup();
        index.data_days = days;

        self.index = index;
    }

    pub fn day_index_of(&self, day: NaiveDate) -> Option<usize> {
        let offset = (day - self.week_start).num_days();
        (0..DAYS_PER_WEEK as i64)
            .contains(&offset)
            .then_some(offset as usize)
    }

    pub fn employee(&self, id: Uuid) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn employee_index(&self, id: Uuid) -> Option<usize> {
        self.employees.iter().position(|e| e.id == id)
    }

    // ── Mutations (each reindexes and touches) ──────────────────────

    pub fn add_employee(&mut self, employee: Employee) {
        self.employees.push(employee);
        self.touch();
    }

    /// Remove an employee and every entry referencing them.
    pub fn remove_employee(&mut self, id: Uuid) {
        self.employees.retain(|e| e.id != id);
        self.schedules.retain(|e| e.employee_id != id);
        self.worked.retain(|e| e.employee_id != id);
        self.markings.retain(|e| e.employee_id != id);
        self.reindex();
        self.touch();
    }

    /// Insert or replace the schedule for the entry's cell.
    pub fn set_schedule(&mut self, entry: ScheduleEntry) {
        self.schedules
            .retain(|e| !(e.employee_id == entry.employee_id && e.day == entry.day));
        self.schedules.push(entry);
        self.reindex();
        self.touch();
    }

    pub fn clear_schedule(&mut self, key: CellKey) {
        self.schedules
            .retain(|e| !(e.employee_id == key.0 && e.day == key.1));
        self.reindex();
        self.touch();
    }

    /// Insert or replace the worked span for the entry's cell.
    pub fn set_worked(&mut self, entry: WorkedTimeEntry) {
        self.worked
            .retain(|e| !(e.employee_id == entry.employee_id && e.day == entry.day));
        self.worked.push(entry);
        self.reindex();
        self.touch();
    }

    pub fn clear_worked(&mut self, key: CellKey) {
        self.worked
            .retain(|e| !(e.employee_id == key.0 && e.day == key.1));
        self.reindex();
        self.touch();
    }

    pub fn add_marking(&mut self, entry: MarkingEntry) {
        self.markings.push(entry);
        self.reindex();
        self.touch();
    }

    pub fn remove_marking(&mut self, id: Uuid) {
        self.markings.retain(|e| e.id != id);
        self.reindex();
        self.touch();
    }

    /// Shift the displayed week, keeping entries where they are.
    pub fn scroll_weeks(&mut self, weeks: i64) {
        self.week_start += Duration::days(7 * weeks);
        self.touch();
    }

    // ── Weekly totals (for the employee table) ──────────────────────

    pub fn scheduled_hours(&self, employee_id: Uuid) -> f32 {
        self.days()
            .into_iter()
            .filter_map(|d| self.schedule_for((employee_id, d)))
            .map(|e| e.interval.width())
            .sum()
    }

    pub fn worked_hours(&self, employee_id: Uuid) -> f32 {
        self.days()
            .into_iter()
            .filter_map(|d| self.worked_for((employee_id, d)))
            .map(|e| e.interval.width())
            .sum()
    }

    pub fn schedule_interval(&self, key: CellKey) -> Option<TimeInterval> {
        self.schedule_for(key).map(|e| e.interval)
    }

    pub fn worked_interval(&self, key: CellKey) -> Option<TimeInterval> {
        self.worked_for(key).map(|e| e.interval)
    }
}

impl ScheduleSource for WeekDataset {
    fn employees(&self) -> &[Employee] {
        &self.employees
    }

    fn days(&self) -> Vec<NaiveDate> {
        (0..DAYS_PER_WEEK as i64)
            .map(|d| self.week_start + Duration::days(d))
            .collect()
    }

    fn schedule_for(&self, key: CellKey) -> Option<&ScheduleEntry> {
        self.index.schedule.get(&key).map(|&i| &self.schedules[i])
    }

    fn worked_for(&self, key: CellKey) -> Option<&WorkedTimeEntry> {
        self.index.worked.get(&key).map(|&i| &self.worked[i])
    }

    fn markings_for(&self, key: CellKey) -> Vec<&MarkingEntry> {
        match self.index.markings.get(&key) {
            Some(ids) => ids.iter().map(|&i| &self.markings[i]).collect(),
            None => Vec::new(),
        }
    }

    fn fallback_for(&self, day_index: usize) -> Option<CellKey> {
        let first = self.employees.first()?;
        let days = &self.index.data_days;
        if days.is_empty() {
            return None;
        }
        Some((first.id, days[day_index % days.len()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::MarkingKind;
    use egui::Color32;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap() + Duration::days(offset)
    }

    fn dataset_with(names: &[&str]) -> WeekDataset {
        let mut ds = WeekDataset::new("Test", day(0));
        for n in names {
            ds.add_employee(Employee::new(*n, Color32::WHITE));
        }
        ds
    }

    #[test]
    fn week_start_snaps_to_monday() {
        // 2025-03-03 is a Monday
        assert_eq!(monday_of(day(0)), day(0));
        assert_eq!(monday_of(day(4)), day(0));
        assert_eq!(monday_of(day(6)), day(0));
        let ds = WeekDataset::new("X", day(3));
        assert_eq!(ds.week_start, day(0));
        assert_eq!(ds.days().len(), DAYS_PER_WEEK);
        assert_eq!(ds.days()[0], day(0));
        assert_eq!(ds.days()[6], day(6));
    }

    #[test]
    fn day_index_is_bounded() {
        let ds = dataset_with(&["A"]);
        assert_eq!(ds.day_index_of(day(0)), Some(0));
        assert_eq!(ds.day_index_of(day(6)), Some(6));
        assert_eq!(ds.day_index_of(day(7)), None);
        assert_eq!(ds.day_index_of(day(-1)), None);
    }

    #[test]
    fn indexed_lookup_keeps_first_entry_per_cell() {
        let mut ds = dataset_with(&["A"]);
        let id = ds.employees[0].id;
        ds.schedules
            .push(ScheduleEntry::new(id, day(0), TimeInterval::new(8.0, 16.0), "Early"));
        ds.schedules
            .push(ScheduleEntry::new(id, day(0), TimeInterval::new(10.0, 18.0), "Late"));
        ds.reindex();
        assert_eq!(ds.schedule_for((id, day(0))).unwrap().label, "Early");
    }

    #[test]
    fn set_schedule_replaces_the_cell() {
        let mut ds = dataset_with(&["A"]);
        let id = ds.employees[0].id;
        ds.set_schedule(ScheduleEntry::new(id, day(1), TimeInterval::new(8.0, 16.0), ""));
        ds.set_schedule(ScheduleEntry::new(id, day(1), TimeInterval::new(9.0, 17.0), ""));
        assert_eq!(ds.schedules.len(), 1);
        assert_eq!(
            ds.schedule_interval((id, day(1))),
            Some(TimeInterval::new(9.0, 17.0))
        );
    }

    #[test]
    fn fallback_is_deterministic_modulo_data_days() {
        let mut ds = dataset_with(&["A", "B"]);
        let a = ds.employees[0].id;
        let b = ds.employees[1].id;
        // Three distinct data days: day 0, 1, 2
        ds.set_schedule(ScheduleEntry::new(a, day(0), TimeInterval::new(8.0, 16.0), ""));
        ds.set_worked(WorkedTimeEntry::new(b, day(1), TimeInterval::new(8.0, 12.0)));
        ds.add_marking(MarkingEntry::new(a, day(2), 9.0, MarkingKind::ClockIn));

        // day_index 4 over 3 data days resolves to index 1
        assert_eq!(ds.fallback_for(4), Some((a, day(1))));
        assert_eq!(ds.fallback_for(4), Some((a, day(1))));
        assert_eq!(ds.fallback_for(0), Some((a, day(0))));
        assert_eq!(ds.fallback_for(5), Some((a, day(2))));
    }

    #[test]
    fn fallback_needs_an_employee_and_a_data_day() {
        let ds = WeekDataset::new("Empty", day(0));
        assert_eq!(ds.fallback_for(0), None);

        let ds = dataset_with(&["A"]);
        // Employees but no entries at all
        assert_eq!(ds.fallback_for(3), None);
    }

    #[test]
    fn removing_an_employee_cascades() {
        let mut ds = dataset_with(&["A", "B"]);
        let a = ds.employees[0].id;
        let b = ds.employees[1].id;
        ds.set_schedule(ScheduleEntry::new(a, day(0), TimeInterval::new(8.0, 16.0), ""));
        ds.set_worked(WorkedTimeEntry::new(a, day(0), TimeInterval::new(8.0, 15.0)));
        ds.add_marking(MarkingEntry::new(a, day(0), 8.0, MarkingKind::ClockIn));
        ds.set_schedule(ScheduleEntry::new(b, day(0), TimeInterval::new(9.0, 17.0), ""));

        ds.remove_employee(a);
        assert_eq!(ds.employees.len(), 1);
        assert!(ds.schedules.iter().all(|e| e.employee_id == b));
        assert!(ds.worked.is_empty());
        assert!(ds.markings.is_empty());
        assert!(ds.schedule_for((a, day(0))).is_none());
    }

    #[test]
    fn weekly_totals_sum_interval_widths() {
        let mut ds = dataset_with(&["A"]);
        let a = ds.employees[0].id;
        ds.set_schedule(ScheduleEntry::new(a, day(0), TimeInterval::new(8.0, 16.0), ""));
        ds.set_schedule(ScheduleEntry::new(a, day(1), TimeInterval::new(8.0, 12.5), ""));
        ds.set_worked(WorkedTimeEntry::new(a, day(0), TimeInterval::new(8.0, 17.0)));
        assert_eq!(ds.scheduled_hours(a), 12.5);
        assert_eq!(ds.worked_hours(a), 9.0);
    }

    #[test]
    fn markings_keep_recorded_order() {
        let mut ds = dataset_with(&["A"]);
        let a = ds.employees[0].id;
        ds.add_marking(MarkingEntry::new(a, day(0), 12.0, MarkingKind::Break));
        ds.add_marking(MarkingEntry::new(a, day(0), 8.0, MarkingKind::ClockIn));
        let times: Vec<f32> = ds.markings_for((a, day(0))).iter().map(|m| m.time).collect();
        assert_eq!(times, vec![12.0, 8.0]);
    }
}
