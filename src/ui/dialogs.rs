use crate::app::{NewShiftKind, RotaApp};
use crate::model::interval::parse_hour;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the "Add Shift" dialog.
pub fn show_add_shift_dialog(app: &mut RotaApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("Add Shift").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 0.0])
        .show(ctx, |ui| {
            // Force dark backgrounds inside this dialog
            ui.visuals_mut().extreme_bg_color = Color32::from_rgb(20, 20, 28);
            ui.visuals_mut().striped = false;

            ui.add_space(4.0);

            egui::Grid::new("add_shift_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Employee").color(theme::TEXT_SECONDARY));
                    let selected_name = app
                        .new_shift_employee
                        .and_then(|id| app.dataset.employee(id))
                        .map(|e| e.name.clone())
                        .unwrap_or_else(|| "— pick employee —".to_string());
                    egui::ComboBox::from_id_salt("shift_employee_combo")
                        .selected_text(RichText::new(selected_name).size(11.5))
                        .width(180.0)
                        .show_ui(ui, |ui| {
                            for employee in &app.dataset.employees {
                                if ui
                                    .selectable_label(
                                        app.new_shift_employee == Some(employee.id),
                                        &employee.name,
                                    )
                                    .clicked()
                                {
                                    app.new_shift_employee = Some(employee.id);
                                }
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Day").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_shift_day)
                            .id_salt("dlg_dp_day"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Type").color(theme::TEXT_SECONDARY));
                    ui.horizontal(|ui| {
                        ui.radio_value(&mut app.new_shift_kind, NewShiftKind::Schedule, "Schedule");
                        ui.radio_value(&mut app.new_shift_kind, NewShiftKind::Worked, "Worked");
                    });
                    ui.end_row();

                    ui.label(RichText::new("From").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [80.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_shift_start)
                            .hint_text("08:00")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("To").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [80.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_shift_end)
                            .hint_text("16:00")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    if app.new_shift_kind == NewShiftKind::Schedule {
                        ui.label(RichText::new("Label").color(theme::TEXT_SECONDARY));
                        ui.add_sized(
                            [180.0, 24.0],
                            egui::TextEdit::singleline(&mut app.new_shift_label)
                                .hint_text("Early / Late / Close...")
                                .text_color(theme::TEXT_PRIMARY),
                        );
                        ui.end_row();
                    }
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            let can_create = app.new_shift_employee.is_some()
                && parse_hour(&app.new_shift_start).is_some()
                && parse_hour(&app.new_shift_end).is_some();

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_enabled(can_create, create_btn).clicked() {
                    app.create_shift_from_dialog();
                    should_close = true;
                }
                if ui
                    .add_sized([80.0, 28.0], egui::Button::new("Cancel"))
                    .clicked()
                {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_shift = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut RotaApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 170.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Rust Rota App").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("A weekly staff rota board");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Render the "CSV Import Format" help dialog.
pub fn show_csv_help_dialog(app: &mut RotaApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("CSV Import Format").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([560.0, 460.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);

                ui.label(RichText::new("Delimiters").strong());
                ui.label("The delimiter is auto-detected: comma (,), semicolon (;), or tab.");
                ui.add_space(8.0);

                ui.label(RichText::new("Required Columns").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_required")
                    .num_columns(2)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").underline());
                        ui.label(RichText::new("Accepted headers (case-insensitive)").underline());
                        ui.end_row();

                        ui.label(RichText::new("Employee").strong());
                        ui.label("Employee, Employee Name, Name, Staff, Person, Who");
                        ui.end_row();

                        ui.label(RichText::new("Date").strong());
                        ui.label("Date, Day, Work Day");
                        ui.end_row();

                        ui.label(RichText::new("Type").strong());
                        ui.label("Type, Kind, Entry Type, Record");
                        ui.end_row();

                        ui.label(RichText::new("Start").strong());
                        ui.label("Start, Start Time, From, Begin, Time, At");
                        ui.end_row();
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Optional Columns").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_optional")
                    .num_columns(2)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("End").strong());
                        ui.label("End, End Time, To, Finish, Until — required for Schedule and Worked rows");
                        ui.end_row();

                        ui.label(RichText::new("Label").strong());
                        ui.label("Label, Shift, Shift Name, Description, Notes, Comment");
                        ui.end_row();
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Entry Types").strong());
                ui.add_space(2.0);
                let types = [
                    "Schedule  (also: shift, planned, rota) — needs Start and End",
                    "Worked    (also: actual, clocked, time) — needs Start and End",
                    "Clock In / Clock Out / Break / Note — point markings, Start only",
                ];
                for t in &types {
                    ui.label(RichText::new(*t).monospace().size(11.0));
                }
                ui.add_space(8.0);

                ui.label(RichText::new("Formats").strong());
                ui.add_space(2.0);
                for fmt in &[
                    "Dates:  YYYY-MM-DD, DD/MM/YYYY, MM/DD/YYYY, DD-MM-YYYY, DD.MM.YYYY",
                    "Times:  HH:MM (08:30) or decimal hours (8.5)",
                ] {
                    ui.label(RichText::new(*fmt).monospace().size(11.0));
                }
                ui.add_space(8.0);

                ui.label(RichText::new("Notes").strong());
                ui.add_space(2.0);
                let notes = [
                    "• Header matching is case-insensitive and ignores spaces, hyphens and underscores.",
                    "• Employees are created in order of first appearance; names match case-insensitively.",
                    "• The displayed week snaps to the Monday of the earliest imported date.",
                    "• Rows with a missing employee, or an invalid date, type, or time are skipped.",
                ];
                for note in &notes {
                    ui.label(RichText::new(*note).small());
                }
                ui.add_space(10.0);

                ui.label(RichText::new("Minimal Example (semicolon-delimited)").strong());
                ui.add_space(2.0);
                let example = "Employee;Date;Type;Start;End;Label\n\
                               Alice;2025-03-03;Schedule;08:00;16:00;Early\n\
                               Alice;2025-03-03;Worked;08:30;18:00;\n\
                               Alice;2025-03-03;Clock In;08:30;;\n\
                               Bob;2025-03-04;Schedule;12:00;20:00;Late";
                egui::Frame::dark_canvas(ui.style()).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut example.to_string())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .interactive(false),
                    );
                });
                ui.add_space(8.0);
            });

            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_csv_help = false;
    }
}
