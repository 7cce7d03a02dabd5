use crate::model::week::CellKey;
use crate::model::{board, BoardCell, BoardView, GridGeometry, SegmentKind, WeekDataset};
use crate::ui::theme;
use egui::{Align2, Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

/// Render the week board (central panel): hour header, one row per
/// employee-day, layered segment bars, and marking pins.
pub fn show_board(
    dataset: &WeekDataset,
    geometry: &mut GridGeometry,
    selected_cell: &mut Option<CellKey>,
    ui: &mut Ui,
) {
    // Handle zoom with scroll wheel
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            geometry.zoom_in();
        } else if scroll_delta.y < 0.0 {
            geometry.zoom_out();
        }
    }

    let view = board::build_board(dataset, geometry);
    let grid = match view {
        BoardView::Empty => {
            show_empty_state(ui);
            return;
        }
        BoardView::Grid(grid) => grid,
    };

    let available = ui.available_size();
    let board_width = theme::GUTTER_WIDTH + geometry.total_width();
    let board_height = geometry.total_height(grid.rows) + 20.0;

    let employee_colors: Vec<Color32> = dataset.employees.iter().map(|e| e.color).collect();

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(board_width.max(available.x), board_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            // Grid origin: gutter sits left of hour zero.
            let grid_origin = Pos2::new(origin.x + theme::GUTTER_WIDTH, origin.y);
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            draw_rows(&painter, origin, geometry, dataset, &grid, board_width);
            draw_header(&painter, origin, geometry, dataset, grid.rows);

            // Cell bars and interaction, on top of the row chrome
            for cell in &grid.cells {
                let row_rect = Rect::from_min_size(
                    Pos2::new(grid_origin.x, origin.y + geometry.pixel_y(cell.row)),
                    Vec2::new(geometry.total_width(), geometry.row_height),
                );

                draw_cell(&painter, grid_origin, geometry, cell, &employee_colors);

                let is_selected = *selected_cell == Some((cell.employee_id, cell.day));
                if is_selected {
                    painter.rect_stroke(
                        row_rect.shrink(1.0),
                        Rounding::same(theme::BAR_ROUNDING),
                        Stroke::new(1.5, theme::BORDER_ACCENT),
                    );
                }

                let cell_response = ui.interact(
                    row_rect,
                    ui.make_persistent_id(("rota-cell", cell.employee_id, cell.day)),
                    Sense::click(),
                );
                if cell_response.clicked() {
                    *selected_cell = Some((cell.employee_id, cell.day));
                    consumed_click = true;
                }
                if cell_response.hovered() {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("cell-tip", cell.employee_id, cell.day)),
                        |ui| cell_tooltip(ui, dataset, cell),
                    );
                }
            }

            // Empty click on background clears selection
            if response.clicked() && !consumed_click {
                *selected_cell = None;
            }
        });
}

fn show_empty_state(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.4);
        ui.label(
            egui::RichText::new("No employees in this rota")
                .size(15.0)
                .color(theme::TEXT_SECONDARY),
        );
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new("Add an employee or import a CSV to get started")
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
}

/// Hour label spacing that keeps labels readable at any zoom.
fn hour_label_step(hour_width: f32) -> usize {
    if hour_width >= 28.0 {
        1
    } else if hour_width >= 14.0 {
        2
    } else {
        4
    }
}

fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    geometry: &GridGeometry,
    dataset: &WeekDataset,
    rows: usize,
) {
    let header_width = theme::GUTTER_WIDTH + geometry.total_width();
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(header_width, geometry.header_height)),
        0.0,
        theme::BG_HEADER,
    );

    // Week caption over the gutter
    painter.text(
        Pos2::new(origin.x + 8.0, origin.y + 12.0),
        Align2::LEFT_CENTER,
        format!("Week of {}", dataset.week_start.format("%-d %b %Y")),
        theme::font_header(),
        theme::TEXT_PRIMARY,
    );

    let grid_x = origin.x + theme::GUTTER_WIDTH;
    let grid_bottom = origin.y + geometry.total_height(rows);
    let step = hour_label_step(geometry.hour_width);

    for hour in 0..=24usize {
        let x = grid_x + geometry.pixel_x(hour as f32);
        let major = hour % 6 == 0;

        painter.line_segment(
            [
                Pos2::new(x, origin.y + geometry.header_height),
                Pos2::new(x, grid_bottom),
            ],
            Stroke::new(
                0.5,
                if major {
                    theme::GRID_LINE_MAJOR
                } else {
                    theme::GRID_LINE
                },
            ),
        );

        if hour % step == 0 && hour < 24 {
            painter.text(
                Pos2::new(x + 3.0, origin.y + 30.0),
                Align2::LEFT_CENTER,
                format!("{:02}", hour),
                theme::font_sub(),
                if major {
                    theme::TEXT_SECONDARY
                } else {
                    theme::TEXT_DIM
                },
            );
        }
    }

    // Bottom border of header
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + geometry.header_height),
            Pos2::new(origin.x + header_width, origin.y + geometry.header_height),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_rows(
    painter: &egui::Painter,
    origin: Pos2,
    geometry: &GridGeometry,
    dataset: &WeekDataset,
    grid: &board::Board,
    board_width: f32,
) {
    let today = chrono::Local::now().date_naive();

    for (employee_index, employee) in dataset.employees.iter().enumerate() {
        for (day_index, &day) in grid.days.iter().enumerate() {
            let Some(row) = geometry.row_index(employee_index, day_index, dataset.employees.len())
            else {
                continue;
            };
            let y = origin.y + geometry.pixel_y(row);
            let row_rect = Rect::from_min_size(
                Pos2::new(origin.x, y),
                Vec2::new(board_width, geometry.row_height),
            );

            if row % 2 == 0 {
                painter.rect_filled(row_rect, 0.0, theme::BG_PANEL);
            }
            if day == today {
                painter.rect_filled(row_rect, 0.0, theme::TODAY_TINT);
            }

            // Weekday label, right-aligned in the gutter
            painter.text(
                Pos2::new(origin.x + theme::GUTTER_WIDTH - 8.0, y + geometry.row_height / 2.0),
                Align2::RIGHT_CENTER,
                day.format("%a %-d").to_string(),
                theme::font_sub(),
                if day == today {
                    theme::TEXT_PRIMARY
                } else {
                    theme::TEXT_DIM
                },
            );

            // Employee name and color dot on the band's first row
            if day_index == 0 {
                painter.circle_filled(Pos2::new(origin.x + 10.0, y + geometry.row_height / 2.0), 3.0, employee.color);
                let clipped = painter.with_clip_rect(Rect::from_min_size(
                    Pos2::new(origin.x + 16.0, y),
                    Vec2::new(theme::GUTTER_WIDTH - 62.0, geometry.row_height),
                ));
                clipped.text(
                    Pos2::new(origin.x + 18.0, y + geometry.row_height / 2.0),
                    Align2::LEFT_CENTER,
                    &employee.name,
                    theme::font_bar(),
                    theme::TEXT_PRIMARY,
                );

                // Band separator above each employee's block
                painter.line_segment(
                    [Pos2::new(origin.x, y), Pos2::new(origin.x + board_width, y)],
                    Stroke::new(1.0, theme::BORDER_SUBTLE),
                );
            }
        }
    }
}

fn draw_cell(
    painter: &egui::Painter,
    grid_origin: Pos2,
    geometry: &GridGeometry,
    cell: &BoardCell,
    employee_colors: &[Color32],
) {
    let employee_color = employee_colors
        .get(cell.employee_index)
        .copied()
        .unwrap_or(theme::ACCENT);
    let mut marking_index = 0usize;

    for segment in &cell.segments {
        let y = grid_origin.y + segment.y;

        if segment.kind == SegmentKind::Marking {
            let marking = cell.markings.get(marking_index);
            marking_index += 1;
            let center = Pos2::new(grid_origin.x + segment.x, y + geometry.row_height / 2.0);
            let color = marking
                .map(|m| m.kind.color())
                .unwrap_or(theme::TEXT_SECONDARY);

            painter.circle_filled(
                center,
                theme::PIN_RADIUS,
                theme::faded(color, cell.fallback),
            );
            if let Some(marking) = marking {
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    marking.kind.icon(),
                    theme::font_icon(),
                    theme::faded(theme::TEXT_ON_BAR, cell.fallback),
                );
            }
            continue;
        }

        let (fill, inset) = match segment.kind {
            // Schedule is the backdrop: nearly full row height
            SegmentKind::Schedule => (theme::SCHEDULE_FILL, 1.0),
            SegmentKind::Absence => (theme::ABSENCE_FILL, theme::BAR_INSET),
            SegmentKind::Regular => (employee_color, theme::BAR_INSET),
            SegmentKind::Overtime => (theme::OVERTIME_FILL, theme::BAR_INSET),
            SegmentKind::Marking => unreachable!(),
        };

        let bar_rect = Rect::from_min_size(
            Pos2::new(grid_origin.x + segment.x, y + inset),
            Vec2::new(segment.width, geometry.row_height - inset * 2.0),
        );
        painter.rect_filled(
            bar_rect,
            Rounding::same(theme::BAR_ROUNDING),
            theme::faded(fill, cell.fallback),
        );
    }

    // Shift label on the schedule backdrop, clipped to the bar
    if let (Some(label), Some(schedule)) = (
        cell.schedule_label.as_deref(),
        cell.segments
            .iter()
            .find(|s| s.kind == SegmentKind::Schedule),
    ) {
        if schedule.width > 40.0 {
            let y = grid_origin.y + schedule.y;
            let bar_rect = Rect::from_min_size(
                Pos2::new(grid_origin.x + schedule.x, y),
                Vec2::new(schedule.width, geometry.row_height),
            );
            let clipped = painter.with_clip_rect(bar_rect);
            clipped.text(
                Pos2::new(bar_rect.left() + 5.0, bar_rect.top() + 2.0),
                Align2::LEFT_TOP,
                label,
                theme::font_small(),
                theme::faded(theme::TEXT_SECONDARY, cell.fallback),
            );
        }
    }
}

fn cell_tooltip(ui: &mut Ui, dataset: &WeekDataset, cell: &BoardCell) {
    let name = dataset
        .employee(cell.employee_id)
        .map(|e| e.name.as_str())
        .unwrap_or("?");
    ui.strong(name);
    ui.label(cell.day.format("%A %-d %B").to_string());
    if cell.fallback {
        let from = cell
            .fallback_from
            .map(|(id, day)| {
                let who = dataset
                    .employee(id)
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| "?".to_string());
                format!("No records, showing {}'s {}", who, day.format("%a %-d %b"))
            })
            .unwrap_or_else(|| "No records".to_string());
        ui.label(egui::RichText::new(from).size(10.0).color(theme::TEXT_DIM));
    }
    ui.separator();

    for segment in &cell.segments {
        if segment.kind == SegmentKind::Marking {
            continue;
        }
        let span = crate::model::TimeInterval::new(segment.start, segment.end);
        let mut line = format!("{}: {}", segment.kind.label(), span.display());
        if segment.kind != SegmentKind::Schedule {
            line.push_str(&format!("  ({:.1} h)", span.width()));
        } else if let Some(label) = &cell.schedule_label {
            line.push_str(&format!("  · {}", label));
        }
        ui.label(egui::RichText::new(line).size(11.0));
    }

    for marking in &cell.markings {
        ui.label(
            egui::RichText::new(format!(
                "{} {} at {}",
                marking.kind.icon(),
                marking.kind.label(),
                crate::model::interval::format_hour(marking.time)
            ))
            .size(11.0)
            .color(theme::TEXT_SECONDARY),
        );
    }
}
