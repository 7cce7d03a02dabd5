use crate::model::interval::{format_hour, parse_hour};
use crate::model::week::CellKey;
use crate::model::{MarkingKind, ScheduleSource, TimeInterval, WeekDataset};
use crate::ui::theme;
use egui::{Color32, Id, RichText, Ui};
use uuid::Uuid;

/// Actions the editor can request.
pub enum CellEditorAction {
    None,
    SetSchedule(TimeInterval, String),
    SetWorked(TimeInterval),
    SetScheduleAndWorked(TimeInterval, String, TimeInterval),
    /// Clear both the schedule and worked span of the cell.
    ClearIntervals,
    AddMarking(f32, MarkingKind),
    RemoveMarking(Uuid),
}

/// Text buffers for the interval fields, kept per cell in egui temp
/// data so typing survives frames without touching the dataset.
#[derive(Clone)]
struct EditorBuffers {
    schedule_start: String,
    schedule_end: String,
    label: String,
    worked_start: String,
    worked_end: String,
}

impl EditorBuffers {
    fn from_cell(dataset: &WeekDataset, key: CellKey) -> Self {
        let schedule = dataset.schedule_for(key);
        let worked = dataset.worked_for(key);
        Self {
            schedule_start: schedule
                .map(|e| format_hour(e.interval.start))
                .unwrap_or_default(),
            schedule_end: schedule
                .map(|e| format_hour(e.interval.end))
                .unwrap_or_default(),
            label: schedule.map(|e| e.label.clone()).unwrap_or_default(),
            worked_start: worked
                .map(|e| format_hour(e.interval.start))
                .unwrap_or_default(),
            worked_end: worked
                .map(|e| format_hour(e.interval.end))
                .unwrap_or_default(),
        }
    }
}

/// Persistent state for the "add marking" picker.
#[derive(Clone)]
struct MarkingPickerState {
    kind: MarkingKind,
    time: String,
}

fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

fn hour_field(ui: &mut Ui, buffer: &mut String, hint: &str) -> bool {
    let valid = buffer.is_empty() || parse_hour(buffer).is_some();
    let mut edit = egui::TextEdit::singleline(buffer)
        .hint_text(hint)
        .desired_width(52.0)
        .font(egui::FontId::proportional(12.0));
    if !valid {
        edit = edit.text_color(theme::ABSENCE_FILL);
    }
    ui.add(edit).changed()
}

/// Render an inline editor for the selected employee-day cell.
pub fn show_cell_editor(dataset: &WeekDataset, key: CellKey, ui: &mut Ui) -> CellEditorAction {
    let mut action = CellEditorAction::None;
    let (employee_id, day) = key;

    let Some(employee) = dataset.employee(employee_id) else {
        return action;
    };

    // Section header
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{} — {}", employee.name, day.format("%a %-d %b")))
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
    });
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(4.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.visuals_mut().extreme_bg_color = Color32::from_rgb(20, 20, 28);

        let buffers_id = Id::new(("cell-editor", employee_id, day));
        let mut buffers: EditorBuffers = ui.ctx().data_mut(|d| {
            d.get_temp(buffers_id)
                .unwrap_or_else(|| EditorBuffers::from_cell(dataset, key))
        });

        // ── Schedule ──────────────────────────────────────────────────
        section_label(ui, "Schedule");
        ui.horizontal(|ui| {
            hour_field(ui, &mut buffers.schedule_start, "08:00");
            ui.label(RichText::new("–").color(theme::TEXT_DIM));
            hour_field(ui, &mut buffers.schedule_end, "16:00");
            ui.add(
                egui::TextEdit::singleline(&mut buffers.label)
                    .hint_text("Label")
                    .desired_width(ui.available_width() - 4.0)
                    .font(egui::FontId::proportional(12.0)),
            );
        });

        // ── Worked ────────────────────────────────────────────────────
        section_label(ui, "Worked");
        ui.horizontal(|ui| {
            hour_field(ui, &mut buffers.worked_start, "08:00");
            ui.label(RichText::new("–").color(theme::TEXT_DIM));
            hour_field(ui, &mut buffers.worked_end, "17:30");
        });

        ui.add_space(2.0);

        // ── Apply / clear row ─────────────────────────────────────────
        ui.horizontal(|ui| {
            let apply_btn = egui::Button::new(RichText::new("Apply").color(Color32::WHITE).size(11.0))
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
            if ui.add_sized([64.0, 24.0], apply_btn).clicked() {
                action = apply_buffers(&buffers);
            }
            if ui
                .add_sized([64.0, 24.0], egui::Button::new(RichText::new("Clear").size(11.0)))
                .on_hover_text("Remove schedule and worked time for this day")
                .clicked()
            {
                action = CellEditorAction::ClearIntervals;
                buffers = EditorBuffers {
                    schedule_start: String::new(),
                    schedule_end: String::new(),
                    label: String::new(),
                    worked_start: String::new(),
                    worked_end: String::new(),
                };
            }
        });

        ui.ctx().data_mut(|d| d.insert_temp(buffers_id, buffers));

        ui.add_space(4.0);
        ui.separator();
        ui.add_space(2.0);

        // ── Markings ─────────────────────────────────────────────────
        section_label(ui, "Markings");
        let markings = dataset.markings_for(key);
        if markings.is_empty() {
            ui.label(RichText::new("No markings on this day").size(9.5).color(theme::TEXT_DIM));
        } else {
            for marking in markings {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} {} at {}",
                            marking.kind.icon(),
                            marking.kind.label(),
                            format_hour(marking.time)
                        ))
                        .size(11.0)
                        .color(theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let del = ui.add(
                            egui::Button::new(
                                RichText::new(egui_phosphor::regular::X)
                                    .size(9.0)
                                    .color(theme::TEXT_DIM),
                            )
                            .frame(false),
                        );
                        if del.on_hover_text("Remove marking").clicked() {
                            action = CellEditorAction::RemoveMarking(marking.id);
                        }
                    });
                });
            }
        }

        ui.add_space(2.0);

        // ── Add marking picker ────────────────────────────────────────
        let picker_id = Id::new(("marking-picker", employee_id, day));
        let mut state: MarkingPickerState = ui.ctx().data_mut(|d| {
            d.get_temp(picker_id).unwrap_or(MarkingPickerState {
                kind: MarkingKind::ClockIn,
                time: String::new(),
            })
        });

        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("new-marking-kind")
                .selected_text(
                    RichText::new(format!("{} {}", state.kind.icon(), state.kind.label()))
                        .size(11.0),
                )
                .width(100.0)
                .show_ui(ui, |ui| {
                    for kind in MarkingKind::all() {
                        let lbl = format!("{} {}", kind.icon(), kind.label());
                        ui.selectable_value(&mut state.kind, *kind, lbl);
                    }
                });

            hour_field(ui, &mut state.time, "12:00");

            let can_add = parse_hour(&state.time).is_some();
            let btn = egui::Button::new(RichText::new("＋").size(13.0).color(Color32::WHITE))
                .fill(if can_add {
                    theme::ACCENT
                } else {
                    Color32::from_rgb(20, 20, 28)
                })
                .rounding(egui::Rounding::same(4.0));
            if ui.add_enabled(can_add, btn).clicked() {
                if let Some(time) = parse_hour(&state.time) {
                    action = CellEditorAction::AddMarking(time, state.kind);
                    state.time.clear();
                }
            }
        });

        ui.ctx().data_mut(|d| d.insert_temp(picker_id, state));
    });

    action
}

/// Turn the buffers into an action. A pair of fields counts only when
/// both ends parse; a blanked pair removes that interval on apply.
fn apply_buffers(buffers: &EditorBuffers) -> CellEditorAction {
    let schedule = interval_of(&buffers.schedule_start, &buffers.schedule_end);
    let worked = interval_of(&buffers.worked_start, &buffers.worked_end);

    match (schedule, worked) {
        (Some(s), Some(w)) => CellEditorAction::SetScheduleAndWorked(s, buffers.label.clone(), w),
        (Some(s), None) => CellEditorAction::SetSchedule(s, buffers.label.clone()),
        (None, Some(w)) => CellEditorAction::SetWorked(w),
        (None, None) => CellEditorAction::None,
    }
}

fn interval_of(start: &str, end: &str) -> Option<TimeInterval> {
    match (parse_hour(start), parse_hour(end)) {
        (Some(a), Some(b)) => Some(TimeInterval::new(a, b)),
        _ => None,
    }
}
