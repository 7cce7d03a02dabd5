use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::interval::TimeInterval;

/// A planned shift for one employee on one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub day: NaiveDate,
    pub interval: TimeInterval,
    /// Shift label shown in tooltips (e.g. "Early", "Close").
    pub label: String,
}

impl ScheduleEntry {
    pub fn new(
        employee_id: Uuid,
        day: NaiveDate,
        interval: TimeInterval,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            day,
            interval,
            label: label.into(),
        }
    }
}

/// The span an employee actually clocked on one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkedTimeEntry {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub day: NaiveDate,
    pub interval: TimeInterval,
}

impl WorkedTimeEntry {
    pub fn new(employee_id: Uuid, day: NaiveDate, interval: TimeInterval) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            day,
            interval,
        }
    }
}

/// The kind of a point-in-time event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkingKind {
    ClockIn,
    ClockOut,
    Break,
    Note,
}

impl MarkingKind {
    pub fn all() -> &'static [MarkingKind] {
        &[
            MarkingKind::ClockIn,
            MarkingKind::ClockOut,
            MarkingKind::Break,
            MarkingKind::Note,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarkingKind::ClockIn => "Clock in",
            MarkingKind::ClockOut => "Clock out",
            MarkingKind::Break => "Break",
            MarkingKind::Note => "Note",
        }
    }

    /// Phosphor glyph drawn as the pin icon.
    pub fn icon(&self) -> &'static str {
        match self {
            MarkingKind::ClockIn => egui_phosphor::regular::SIGN_IN,
            MarkingKind::ClockOut => egui_phosphor::regular::SIGN_OUT,
            MarkingKind::Break => egui_phosphor::regular::COFFEE,
            MarkingKind::Note => egui_phosphor::regular::NOTE_PENCIL,
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            MarkingKind::ClockIn => Color32::from_rgb(52, 168, 83),
            MarkingKind::ClockOut => Color32::from_rgb(229, 57, 53),
            MarkingKind::Break => Color32::from_rgb(255, 193, 7),
            MarkingKind::Note => Color32::from_rgb(3, 169, 244),
        }
    }
}

/// A point event (e.g. a geofenced clock action) pinned to one time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkingEntry {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub day: NaiveDate,
    /// Fractional hour of the event.
    pub time: f32,
    pub kind: MarkingKind,
}

impl MarkingEntry {
    pub fn new(employee_id: Uuid, day: NaiveDate, time: f32, kind: MarkingKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            day,
            time: time.clamp(0.0, 24.0),
            kind,
        }
    }
}
