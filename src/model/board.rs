use chrono::NaiveDate;
use uuid::Uuid;

use super::entry::MarkingEntry;
use super::grid::GridGeometry;
use super::segment::{compute_segments, Segment, SegmentKind};
use super::week::ScheduleSource;

/// A segment of one cell, annotated with grid-local pixel geometry.
/// `x`/`width` come from the hour axis, `y` from the cell's row; the
/// renderer only adds the canvas origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CellSegment {
    pub kind: SegmentKind,
    /// Hour-space span (markings: start == end).
    pub start: f32,
    pub end: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// Everything the renderer needs for one employee-day cell.
#[derive(Debug, Clone)]
pub struct BoardCell {
    pub employee_id: Uuid,
    pub employee_index: usize,
    pub day: NaiveDate,
    pub day_index: usize,
    pub row: usize,
    /// True when the cell shows substituted data from the fallback
    /// source; drawn at reduced opacity.
    pub fallback: bool,
    /// The substituted record's key when `fallback` is set.
    pub fallback_from: Option<(Uuid, NaiveDate)>,
    pub schedule_label: Option<String>,
    /// Paint-ordered segments; trailing `Marking` segments align
    /// one-to-one with `markings`.
    pub segments: Vec<CellSegment>,
    pub markings: Vec<MarkingEntry>,
}

#[derive(Debug, Clone)]
pub struct Board {
    pub days: Vec<NaiveDate>,
    pub rows: usize,
    pub cells: Vec<BoardCell>,
}

/// The computed board, or the explicit empty state for a dataset with
/// no employees (never an empty grid).
#[derive(Debug, Clone)]
pub enum BoardView {
    Empty,
    Grid(Board),
}

/// Compute every cell of the week grid. Each cell is independent and
/// stateless; real records win, and only cells with neither a schedule
/// nor a worked span borrow the fallback record.
pub fn build_board<S: ScheduleSource>(source: &S, geometry: &GridGeometry) -> BoardView {
    let employees = source.employees();
    if employees.is_empty() {
        return BoardView::Empty;
    }

    let days = source.days();
    let mut cells = Vec::with_capacity(employees.len() * days.len());

    for (employee_index, employee) in employees.iter().enumerate() {
        for (day_index, &day) in days.iter().enumerate() {
            let Some(row) = geometry.row_index(employee_index, day_index, employees.len()) else {
                continue;
            };

            let real_key = (employee.id, day);
            let has_real_intervals =
                source.schedule_for(real_key).is_some() || source.worked_for(real_key).is_some();

            let (key, fallback) = if has_real_intervals || !source.markings_for(real_key).is_empty()
            {
                (real_key, false)
            } else {
                match source.fallback_for(day_index) {
                    Some(sub) => (sub, true),
                    // No substitute available: an honestly empty cell.
                    None => (real_key, false),
                }
            };

            let schedule = source.schedule_for(key);
            let worked = source.worked_for(key);
            let markings: Vec<MarkingEntry> =
                source.markings_for(key).into_iter().cloned().collect();
            let marking_times: Vec<f32> = markings.iter().map(|m| m.time).collect();

            let segments = compute_segments(
                schedule.map(|e| e.interval),
                worked.map(|e| e.interval),
                &marking_times,
            );
            if segments.is_empty() {
                continue;
            }

            let schedule_label = schedule
                .map(|e| e.label.clone())
                .filter(|l| !l.is_empty());

            let placed = segments
                .iter()
                .map(|s| place(s, row, geometry))
                .collect();

            cells.push(BoardCell {
                employee_id: employee.id,
                employee_index,
                day,
                day_index,
                row,
                fallback,
                fallback_from: fallback.then_some(key),
                schedule_label,
                segments: placed,
                markings,
            });
        }
    }

    BoardView::Grid(Board {
        rows: employees.len() * days.len(),
        days,
        cells,
    })
}

fn place(segment: &Segment, row: usize, geometry: &GridGeometry) -> CellSegment {
    let x = geometry.pixel_x(segment.start);
    CellSegment {
        kind: segment.kind,
        start: segment.start,
        end: segment.end,
        x,
        y: geometry.pixel_y(row),
        width: geometry.pixel_x(segment.end) - x,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::Employee;
    use crate::model::entry::{MarkingKind, ScheduleEntry, WorkedTimeEntry};
    use crate::model::interval::TimeInterval;
    use crate::model::week::WeekDataset;
    use chrono::{Duration, NaiveDate};
    use egui::Color32;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap() + Duration::days(offset)
    }

    fn geometry() -> GridGeometry {
        GridGeometry::new(10.0, 30.0, 44.0, 7)
    }

    fn grid(view: BoardView) -> Board {
        match view {
            BoardView::Grid(b) => b,
            BoardView::Empty => panic!("expected a grid"),
        }
    }

    #[test]
    fn zero_employees_short_circuits_to_empty() {
        let ds = WeekDataset::new("Empty", day(0));
        assert!(matches!(build_board(&ds, &geometry()), BoardView::Empty));
    }

    #[test]
    fn real_cell_is_placed_on_its_row() {
        let mut ds = WeekDataset::new("T", day(0));
        ds.add_employee(Employee::new("A", Color32::WHITE));
        ds.add_employee(Employee::new("B", Color32::WHITE));
        let b = ds.employees[1].id;
        ds.set_schedule(ScheduleEntry::new(b, day(2), TimeInterval::new(8.0, 17.0), "Early"));
        ds.set_worked(WorkedTimeEntry::new(b, day(2), TimeInterval::new(8.5, 18.0)));

        let board = grid(build_board(&ds, &geometry()));
        assert_eq!(board.rows, 14);

        let cell = board
            .cells
            .iter()
            .find(|c| c.employee_id == b && c.day_index == 2 && !c.fallback)
            .expect("cell for employee B on Wednesday");
        // Employee 1, day 2 → row 9
        assert_eq!(cell.row, 9);
        assert_eq!(cell.schedule_label.as_deref(), Some("Early"));

        let regular = cell
            .segments
            .iter()
            .find(|s| s.kind == SegmentKind::Regular)
            .unwrap();
        assert_eq!((regular.start, regular.end), (8.5, 17.0));
        assert_eq!(regular.x, 85.0);
        assert_eq!(regular.width, 85.0);
        assert_eq!(regular.y, 44.0 + 9.0 * 30.0);

        let overtime = cell
            .segments
            .iter()
            .find(|s| s.kind == SegmentKind::Overtime)
            .unwrap();
        assert_eq!((overtime.start, overtime.end), (17.0, 18.0));
    }

    #[test]
    fn empty_cells_borrow_the_fallback_record() {
        let mut ds = WeekDataset::new("T", day(0));
        ds.add_employee(Employee::new("A", Color32::WHITE));
        ds.add_employee(Employee::new("B", Color32::WHITE));
        let a = ds.employees[0].id;
        ds.set_schedule(ScheduleEntry::new(a, day(0), TimeInterval::new(9.0, 15.0), ""));

        let board = grid(build_board(&ds, &geometry()));

        // B has no records anywhere: every one of B's cells substitutes
        // A's Monday schedule, flagged as fallback.
        let b_cells: Vec<&BoardCell> = board
            .cells
            .iter()
            .filter(|c| c.employee_index == 1)
            .collect();
        assert_eq!(b_cells.len(), 7);
        assert!(b_cells.iter().all(|c| c.fallback));
        for c in &b_cells {
            let sched = c
                .segments
                .iter()
                .find(|s| s.kind == SegmentKind::Schedule)
                .unwrap();
            assert_eq!((sched.start, sched.end), (9.0, 15.0));
        }
        // Fallback cells still sit on their own rows.
        assert_eq!(b_cells[0].row, 7);
    }

    #[test]
    fn real_partial_data_wins_over_fallback() {
        let mut ds = WeekDataset::new("T", day(0));
        ds.add_employee(Employee::new("A", Color32::WHITE));
        ds.add_employee(Employee::new("B", Color32::WHITE));
        let a = ds.employees[0].id;
        let b = ds.employees[1].id;
        ds.set_schedule(ScheduleEntry::new(a, day(0), TimeInterval::new(9.0, 15.0), ""));
        // B only clocked time on Tuesday, no schedule.
        ds.set_worked(WorkedTimeEntry::new(b, day(1), TimeInterval::new(10.0, 14.0)));

        let board = grid(build_board(&ds, &geometry()));
        let cell = board
            .cells
            .iter()
            .find(|c| c.employee_id == b && c.day_index == 1)
            .unwrap();
        assert!(!cell.fallback);
        // Unbounded schedule: the whole span is regular, nothing else.
        let kinds: Vec<SegmentKind> = cell.segments.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SegmentKind::Regular]);
        assert_eq!((cell.segments[0].start, cell.segments[0].end), (10.0, 14.0));
    }

    #[test]
    fn marking_only_cell_keeps_its_markings() {
        let mut ds = WeekDataset::new("T", day(0));
        ds.add_employee(Employee::new("A", Color32::WHITE));
        let a = ds.employees[0].id;
        ds.set_schedule(ScheduleEntry::new(a, day(0), TimeInterval::new(8.0, 16.0), ""));
        ds.add_marking(MarkingEntry::new(a, day(3), 11.5, MarkingKind::Note));

        let board = grid(build_board(&ds, &geometry()));
        let cell = board
            .cells
            .iter()
            .find(|c| c.day_index == 3)
            .unwrap();
        assert!(!cell.fallback);
        assert_eq!(cell.markings.len(), 1);
        assert_eq!(cell.segments.len(), 1);
        assert!(cell.segments[0].kind == SegmentKind::Marking);
        assert_eq!(cell.segments[0].x, 115.0);
        assert_eq!(cell.segments[0].width, 0.0);
    }

    #[test]
    fn cells_without_data_or_fallback_are_omitted() {
        let mut ds = WeekDataset::new("T", day(0));
        ds.add_employee(Employee::new("A", Color32::WHITE));
        // One employee, no entries: fallback has no data day, so every
        // cell is empty and the grid carries no cells at all.
        let board = grid(build_board(&ds, &geometry()));
        assert_eq!(board.rows, 7);
        assert!(board.cells.is_empty());
    }
}
