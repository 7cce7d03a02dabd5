use chrono::NaiveDate;
use std::path::PathBuf;
use uuid::Uuid;

use crate::model::week::{monday_of, CellKey};
use crate::model::{
    Employee, GridGeometry, MarkingEntry, MarkingKind, ScheduleEntry, TimeInterval, WeekDataset,
    WorkedTimeEntry, DAYS_PER_WEEK,
};
use crate::settings::AppSettings;
use crate::ui;
use crate::ui::cell_editor::CellEditorAction;
use crate::ui::theme;

/// Which kind of entry the Add Shift dialog creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewShiftKind {
    Schedule,
    Worked,
}

/// Main application state.
pub struct RotaApp {
    pub dataset: WeekDataset,
    pub geometry: GridGeometry,
    pub file_path: Option<PathBuf>,
    pub selected_cell: Option<CellKey>,
    pub selected_employee: Option<Uuid>,

    // Dialog state
    pub show_add_shift: bool,
    pub show_about: bool,
    pub show_csv_help: bool,
    pub new_shift_employee: Option<Uuid>,
    pub new_shift_day: NaiveDate,
    pub new_shift_kind: NewShiftKind,
    pub new_shift_start: String,
    pub new_shift_end: String,
    pub new_shift_label: String,

    // Status message
    pub status_message: String,

    // Persisted preferences
    pub settings: AppSettings,
}

impl RotaApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings = AppSettings::load();
        let geometry = GridGeometry::new(
            settings.hour_width,
            theme::ROW_HEIGHT,
            theme::HEADER_HEIGHT,
            DAYS_PER_WEEK,
        );

        // Reopen the last dataset when possible, else boot with a sample.
        let (dataset, file_path, status_message) = match settings
            .last_file
            .as_deref()
            .map(|p| (crate::io::load_dataset(p), p.to_path_buf()))
        {
            Some((Ok(dataset), path)) => {
                let msg = format!("Reopened {}", path.display());
                (dataset, Some(path), msg)
            }
            Some((Err(e), path)) => {
                log::warn!("could not reopen {:?}: {}", path, e);
                (Self::sample_dataset(), None, "Ready".to_string())
            }
            None => (Self::sample_dataset(), None, "Ready".to_string()),
        };

        let today = chrono::Local::now().date_naive();

        Self {
            dataset,
            geometry,
            file_path,
            selected_cell: None,
            selected_employee: None,
            show_add_shift: false,
            show_about: false,
            show_csv_help: false,
            new_shift_employee: None,
            new_shift_day: today,
            new_shift_kind: NewShiftKind::Schedule,
            new_shift_start: String::new(),
            new_shift_end: String::new(),
            new_shift_label: String::new(),
            status_message,
            settings,
        }
    }

    /// Generate a sample rota for demonstration.
    fn sample_dataset() -> WeekDataset {
        let monday = monday_of(chrono::Local::now().date_naive());
        let day = |offset: i64| monday + chrono::Duration::days(offset);
        let mut dataset = WeekDataset::new("Sample Rota", monday);

        let alice = Employee::new("Alice", theme::employee_color(0));
        let bob = Employee::new("Bob", theme::employee_color(1));
        let cara = Employee::new("Cara", theme::employee_color(2));
        let dan = Employee::new("Dan", theme::employee_color(3));
        let (a, b, c) = (alice.id, bob.id, cara.id);
        dataset.employees = vec![alice, bob, cara, dan];

        // ── Alice: early shifts, a varied week ──────────────────────
        for offset in 0..5 {
            dataset.schedules.push(ScheduleEntry::new(
                a,
                day(offset),
                TimeInterval::new(8.0, 16.0),
                "Early",
            ));
        }
        // Monday as planned
        dataset
            .worked
            .push(WorkedTimeEntry::new(a, day(0), TimeInterval::new(8.0, 16.0)));
        // Tuesday: late start
        dataset
            .worked
            .push(WorkedTimeEntry::new(a, day(1), TimeInterval::new(8.75, 16.0)));
        // Wednesday: left early
        dataset
            .worked
            .push(WorkedTimeEntry::new(a, day(2), TimeInterval::new(8.0, 14.5)));
        // Thursday: stayed late
        dataset
            .worked
            .push(WorkedTimeEntry::new(a, day(3), TimeInterval::new(8.0, 18.5)));
        // Friday has no worked entry: reads as a full absence.
        dataset
            .markings
            .push(MarkingEntry::new(a, day(0), 8.0, MarkingKind::ClockIn));
        dataset
            .markings
            .push(MarkingEntry::new(a, day(0), 16.0, MarkingKind::ClockOut));
        dataset
            .markings
            .push(MarkingEntry::new(a, day(1), 8.75, MarkingKind::ClockIn));
        dataset
            .markings
            .push(MarkingEntry::new(a, day(3), 12.0, MarkingKind::Break));

        // ── Bob: late shifts ────────────────────────────────────────
        for offset in [1i64, 2, 3, 4, 5] {
            dataset.schedules.push(ScheduleEntry::new(
                b,
                day(offset),
                TimeInterval::new(12.0, 20.0),
                "Late",
            ));
        }
        dataset
            .worked
            .push(WorkedTimeEntry::new(b, day(1), TimeInterval::new(12.0, 20.5)));
        dataset
            .worked
            .push(WorkedTimeEntry::new(b, day(2), TimeInterval::new(13.0, 19.0)));
        dataset
            .markings
            .push(MarkingEntry::new(b, day(2), 13.0, MarkingKind::ClockIn));
        dataset
            .markings
            .push(MarkingEntry::new(b, day(2), 19.0, MarkingKind::ClockOut));

        // ── Cara: part time, worked without a schedule on Saturday ──
        for offset in [0i64, 2, 4] {
            dataset.schedules.push(ScheduleEntry::new(
                c,
                day(offset),
                TimeInterval::new(9.0, 13.0),
                "Morning",
            ));
        }
        dataset
            .worked
            .push(WorkedTimeEntry::new(c, day(0), TimeInterval::new(9.0, 13.0)));
        dataset
            .worked
            .push(WorkedTimeEntry::new(c, day(5), TimeInterval::new(10.0, 14.0)));
        dataset
            .markings
            .push(MarkingEntry::new(c, day(4), 9.1, MarkingKind::Note));

        // Dan has no records at all: his rows show fallback data.

        dataset.reindex();
        dataset
    }

    // --- File operations ---

    pub fn new_dataset(&mut self) {
        self.dataset = WeekDataset::default();
        self.file_path = None;
        self.selected_cell = None;
        self.selected_employee = None;
        self.status_message = "New rota created".to_string();
    }

    pub fn open_dataset(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Rota Files", &["rota.json", "json"])
            .pick_file()
        {
            match crate::io::load_dataset(&path) {
                Ok(dataset) => {
                    self.dataset = dataset;
                    self.file_path = Some(path.clone());
                    self.settings.last_file = Some(path);
                    self.selected_cell = None;
                    self.selected_employee = None;
                    self.status_message = "Rota loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_dataset(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.dataset.touch();
            match crate::io::save_dataset(&self.dataset, &path) {
                Ok(()) => self.status_message = "Rota saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_dataset_as();
        }
    }

    pub fn save_dataset_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Rota Files", &["rota.json", "json"])
            .set_file_name(&format!("{}.rota.json", self.dataset.name))
            .save_file()
        {
            self.dataset.touch();
            match crate::io::save_dataset(&self.dataset, &path) {
                Ok(()) => {
                    self.file_path = Some(path.clone());
                    self.settings.last_file = Some(path);
                    self.status_message = "Rota saved".to_string();
                }
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    pub fn import_csv(&mut self) {
        // Guard: if the current rota has employees, confirm before replacing
        if !self.dataset.employees.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current rota. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::csv_import::import_csv(&path) {
                Ok((mut dataset, skipped)) => {
                    // Derive the rota name from the filename
                    dataset.name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("Imported Rota")
                        .to_string();

                    let employees = dataset.employees.len();
                    let entries =
                        dataset.schedules.len() + dataset.worked.len() + dataset.markings.len();
                    self.dataset = dataset;
                    self.file_path = None;
                    self.selected_cell = None;
                    self.selected_employee = None;

                    if skipped > 0 {
                        self.status_message = format!(
                            "Imported {} entries for {} employees ({} rows skipped)",
                            entries, employees, skipped
                        );
                    } else {
                        self.status_message =
                            format!("Imported {} entries for {} employees", entries, employees);
                    }
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.dataset.employees.is_empty() {
            self.status_message = "Nothing to export — rota has no employees".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.dataset.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match crate::io::csv_export::export_csv(&self.dataset, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} entries to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    // --- View operations ---

    pub fn scroll_week(&mut self, weeks: i64) {
        self.dataset.scroll_weeks(weeks);
        self.selected_cell = None;
        self.status_message = format!(
            "Showing week of {}",
            self.dataset.week_start.format("%-d %b %Y")
        );
    }

    pub fn jump_to_current_week(&mut self) {
        self.dataset.week_start = monday_of(chrono::Local::now().date_naive());
        self.dataset.touch();
        self.selected_cell = None;
        self.status_message = "Showing current week".to_string();
    }

    // --- Rota operations ---

    pub fn add_employee(&mut self) {
        let color = theme::employee_color(self.dataset.employees.len());
        let employee = Employee::new(
            format!("Employee {}", self.dataset.employees.len() + 1),
            color,
        );
        let id = employee.id;
        self.dataset.add_employee(employee);
        self.selected_employee = Some(id);
        self.status_message = "Employee added".to_string();
    }

    pub fn delete_employee(&mut self, id: Uuid) {
        let name = self
            .dataset
            .employee(id)
            .map(|e| e.name.clone())
            .unwrap_or_default();
        self.dataset.remove_employee(id);
        if self.selected_employee == Some(id) {
            self.selected_employee = None;
        }
        if self.selected_cell.map(|(e, _)| e) == Some(id) {
            self.selected_cell = None;
        }
        self.status_message = format!("Removed '{}'", name);
    }

    pub fn create_shift_from_dialog(&mut self) {
        use crate::model::interval::parse_hour;

        let Some(employee_id) = self.new_shift_employee else {
            return;
        };
        let (Some(start), Some(end)) = (
            parse_hour(&self.new_shift_start),
            parse_hour(&self.new_shift_end),
        ) else {
            return;
        };

        let day = self.new_shift_day;
        let interval = TimeInterval::new(start, end);
        match self.new_shift_kind {
            NewShiftKind::Schedule => {
                self.dataset.set_schedule(ScheduleEntry::new(
                    employee_id,
                    day,
                    interval,
                    self.new_shift_label.clone(),
                ));
                self.status_message = "Shift added".to_string();
            }
            NewShiftKind::Worked => {
                self.dataset
                    .set_worked(WorkedTimeEntry::new(employee_id, day, interval));
                self.status_message = "Worked time added".to_string();
            }
        }

        self.selected_cell = Some((employee_id, day));
        self.new_shift_start.clear();
        self.new_shift_end.clear();
        self.new_shift_label.clear();
    }

    fn apply_editor_action(&mut self, key: CellKey, action: CellEditorAction) {
        let (employee_id, day) = key;
        match action {
            CellEditorAction::None => {}
            CellEditorAction::SetSchedule(interval, label) => {
                self.dataset
                    .set_schedule(ScheduleEntry::new(employee_id, day, interval, label));
                self.dataset.clear_worked(key);
                self.status_message = "Cell updated".to_string();
            }
            CellEditorAction::SetWorked(interval) => {
                self.dataset
                    .set_worked(WorkedTimeEntry::new(employee_id, day, interval));
                self.dataset.clear_schedule(key);
                self.status_message = "Cell updated".to_string();
            }
            CellEditorAction::SetScheduleAndWorked(schedule, label, worked) => {
                self.dataset
                    .set_schedule(ScheduleEntry::new(employee_id, day, schedule, label));
                self.dataset
                    .set_worked(WorkedTimeEntry::new(employee_id, day, worked));
                self.status_message = "Cell updated".to_string();
            }
            CellEditorAction::ClearIntervals => {
                self.dataset.clear_schedule(key);
                self.dataset.clear_worked(key);
                self.status_message = "Cell cleared".to_string();
            }
            CellEditorAction::AddMarking(time, kind) => {
                self.dataset
                    .add_marking(MarkingEntry::new(employee_id, day, time, kind));
                self.status_message = "Marking added".to_string();
            }
            CellEditorAction::RemoveMarking(id) => {
                self.dataset.remove_marking(id);
                self.status_message = "Marking removed".to_string();
            }
        }
    }
}

impl eframe::App for RotaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_dataset();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(10.5)
                            .color(theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Employees: {}",
                                self.dataset.employees.len()
                            ))
                            .size(10.5)
                            .color(theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Zoom: {:.0}%",
                                self.geometry.hour_width / theme::DEFAULT_HOUR_WIDTH * 100.0
                            ))
                            .size(10.5)
                            .color(theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: cell editor + employee table
        let mut table_action = ui::employee_table::EmployeeTableAction::None;
        let mut editor_action = CellEditorAction::None;
        let editor_key = self.selected_cell;
        egui::SidePanel::left("employee_panel")
            .default_width(theme::SIDE_PANEL_WIDTH)
            .min_width(220.0)
            .max_width(theme::SIDE_PANEL_WIDTH * 2.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(6.0))
                    .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if let Some(key) = editor_key {
                    editor_action = ui::cell_editor::show_cell_editor(&self.dataset, key, ui);
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);
                }

                table_action = ui::employee_table::show_employee_table(
                    &self.dataset,
                    self.selected_employee,
                    ui,
                );
            });

        if let Some(key) = editor_key {
            self.apply_editor_action(key, editor_action);
        }

        // Handle employee table actions
        match table_action {
            ui::employee_table::EmployeeTableAction::Select(id) => {
                self.selected_employee = Some(id);
            }
            ui::employee_table::EmployeeTableAction::Delete(id) => {
                self.delete_employee(id);
            }
            ui::employee_table::EmployeeTableAction::Add => {
                self.add_employee();
            }
            ui::employee_table::EmployeeTableAction::None => {}
        }

        // Central panel: the week board
        let board_frame = egui::Frame::default()
            .fill(theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(board_frame).show(ctx, |ui| {
            ui::board::show_board(
                &self.dataset,
                &mut self.geometry,
                &mut self.selected_cell,
                ui,
            );
        });

        // Dialogs
        if self.show_add_shift {
            ui::dialogs::show_add_shift_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            ui::dialogs::show_csv_help_dialog(self, ctx);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings.hour_width = self.geometry.hour_width;
        self.settings.save();
    }
}
