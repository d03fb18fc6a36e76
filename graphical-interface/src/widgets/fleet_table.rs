use egui::{Color32, RichText};
use egui_extras::{Column, TableBuilder};

use vehicle_feed::Vehicle;

use crate::renderer::occupancy_color;

const ROWS_SHOWN: usize = 10;

/// Fleet status table for the authority dashboard: the first ten vehicles
/// of the latest snapshot with id, kind, route and occupancy.
pub struct WidgetFleetTable;

impl WidgetFleetTable {
    pub fn show(&self, ctx: &egui::Context, vehicles: &[Vehicle]) {
        egui::Window::new("Fleet Status")
            .resizable(false)
            .collapsible(true)
            .fixed_pos([20.0, 60.0])
            .show(ctx, |ui| {
                ui.group(|ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                        .column(Column::remainder().at_least(100.0))
                        .column(Column::remainder().at_least(70.0))
                        .column(Column::remainder().at_least(90.0))
                        .column(Column::remainder().at_least(80.0))
                        .column(Column::remainder().at_least(60.0))
                        .header(25.0, |mut header| {
                            for title in ["Vehicle ID", "Type", "Route", "Occupancy", "Status"] {
                                header.col(|ui| {
                                    ui.strong(RichText::new(title).size(14.0));
                                });
                            }
                        })
                        .body(|mut body| {
                            for vehicle in vehicles.iter().take(ROWS_SHOWN) {
                                body.row(20.0, |mut row| {
                                    row.col(|ui| {
                                        ui.label(RichText::new(&vehicle.id).monospace());
                                    });
                                    row.col(|ui| {
                                        ui.label(vehicle.kind.display_name());
                                    });
                                    row.col(|ui| {
                                        ui.label(&vehicle.route);
                                    });
                                    row.col(|ui| {
                                        ui.label(
                                            RichText::new(vehicle.occupancy.as_str())
                                                .color(occupancy_color(vehicle.occupancy)),
                                        );
                                    });
                                    row.col(|ui| {
                                        ui.label(
                                            RichText::new("Active")
                                                .color(Color32::from_rgb(0x10, 0xb9, 0x81)),
                                        );
                                    });
                                });
                            }
                        });
                });

                if vehicles.len() > ROWS_SHOWN {
                    ui.small(format!(
                        "Showing {} of {} vehicles",
                        ROWS_SHOWN,
                        vehicles.len()
                    ));
                }
            });
    }
}
