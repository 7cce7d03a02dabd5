use crate::model::WeekDataset;
use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use uuid::Uuid;

/// Actions that the employee table can request.
pub enum EmployeeTableAction {
    None,
    Select(Uuid),
    Delete(Uuid),
    Add,
}

/// Render the left-side employee panel.
pub fn show_employee_table(
    dataset: &WeekDataset,
    selected_employee: Option<Uuid>,
    ui: &mut Ui,
) -> EmployeeTableAction {
    let mut action = EmployeeTableAction::None;

    // Header area
    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Employees")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", dataset.employees.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    // Add employee button, accent styled
    let btn = egui::Button::new(
        RichText::new(format!("{}  Add Employee", egui_phosphor::regular::PLUS))
            .color(Color32::WHITE)
            .size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = EmployeeTableAction::Add;
    }

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    // Column headers
    ui.horizontal(|ui| {
        ui.add_space(12.0);
        ui.label(RichText::new("NAME").size(9.0).color(theme::TEXT_DIM).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new("WORKED / PLANNED")
                    .size(9.0)
                    .color(theme::TEXT_DIM)
                    .strong(),
            );
        });
    });

    ui.add_space(2.0);

    // Employee rows
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, employee) in dataset.employees.iter().enumerate() {
                let is_selected = selected_employee == Some(employee.id);

                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        // Color dot
                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter()
                            .circle_filled(dot_rect.center(), 3.0, employee.color);

                        let name_text =
                            RichText::new(&employee.name)
                                .size(12.0)
                                .color(if is_selected {
                                    Color32::WHITE
                                } else {
                                    theme::TEXT_PRIMARY
                                });
                        ui.add(egui::Label::new(name_text).truncate());

                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.spacing_mut().item_spacing.x = 4.0;

                                // Delete button
                                let del_btn = ui.add(
                                    egui::Button::new(
                                        RichText::new(egui_phosphor::regular::X)
                                            .size(10.0)
                                            .color(theme::TEXT_DIM),
                                    )
                                    .frame(false),
                                );
                                if del_btn.on_hover_text("Remove employee").clicked() {
                                    action = EmployeeTableAction::Delete(employee.id);
                                }

                                // Weekly totals (compact)
                                let worked = dataset.worked_hours(employee.id);
                                let planned = dataset.scheduled_hours(employee.id);
                                ui.label(
                                    RichText::new(format!("{:.1} / {:.1} h", worked, planned))
                                        .size(10.0)
                                        .color(if worked > planned {
                                            theme::OVERTIME_FILL
                                        } else {
                                            theme::TEXT_SECONDARY
                                        }),
                                );
                            },
                        );
                    });
                });

                // Make entire row clickable
                let row_rect = frame_resp.response.rect;
                let row_click = ui.interact(
                    row_rect,
                    egui::Id::new(("employee-row", employee.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = EmployeeTableAction::Select(employee.id);
                }

                ui.add_space(1.0);
            }
        });

    action
}
