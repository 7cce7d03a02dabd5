use crate::app::RotaApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

fn font_menu() -> egui::FontId {
    egui::FontId::proportional(12.5)
}

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut RotaApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(font_menu()), |ui| {
            if ui.button("  New Rota").clicked() {
                app.new_dataset();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_dataset();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_dataset();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_dataset_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Rota  ").font(font_menu()), |ui| {
            if ui.button("  Add Shift...").clicked() {
                app.new_shift_employee = app
                    .new_shift_employee
                    .or_else(|| app.dataset.employees.first().map(|e| e.id));
                app.show_add_shift = true;
                ui.close_menu();
            }
            if ui.button("  Add Employee").clicked() {
                app.add_employee();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(font_menu()), |ui| {
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.geometry.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.geometry.zoom_out();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Previous Week").clicked() {
                app.scroll_week(-1);
                ui.close_menu();
            }
            if ui.button("  Next Week").clicked() {
                app.scroll_week(1);
                ui.close_menu();
            }
            if ui.button("  This Week").clicked() {
                app.jump_to_current_week();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(font_menu()), |ui| {
            if ui.button("CSV Format...").clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
            if ui.button("Open Config Folder").clicked() {
                if let Some(dir) = app.settings.config_dir() {
                    let _ = open::that(&dir);
                }
                ui.close_menu();
            }
            ui.separator();
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned dataset name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.dataset.name, modified))
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
            );
        });
    });
}
