use egui::{Color32, RichText};

use vehicle_feed::Vehicle;

use crate::renderer::occupancy_color;

/// Detail window for the selected vehicle: route, eta, occupancy and the
/// current position. The payload is refreshed every frame from the latest
/// snapshot, so the numbers drift live while the window stays open.
pub struct WidgetVehicle {
    pub selected: Vehicle,
}

impl WidgetVehicle {
    pub fn new(selected: Vehicle) -> Self {
        Self { selected }
    }

    pub fn vehicle_id(&self) -> &str {
        &self.selected.id
    }

    pub fn set_vehicle(&mut self, vehicle: Vehicle) {
        self.selected = vehicle;
    }

    /// Shows the window; returns `false` once the user closes it.
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        let mut open = true;
        let screen_width = ctx.screen_rect().width();

        egui::Window::new(format!(
            "{} {}",
            self.selected.kind.display_name(),
            self.selected.route
        ))
        .resizable(false)
        .collapsible(true)
        .open(&mut open)
        .fixed_pos([screen_width - 335., 60.])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("ETA:").strong());
                match &self.selected.eta {
                    Some(eta) => ui.label(RichText::new(eta).color(Color32::LIGHT_BLUE)),
                    None => ui.label("—"),
                };
            });

            ui.horizontal(|ui| {
                ui.label(RichText::new("Occupancy:").strong());
                ui.label(
                    RichText::new(self.selected.occupancy.as_str())
                        .color(occupancy_color(self.selected.occupancy)),
                );
            });

            ui.horizontal(|ui| {
                ui.label(RichText::new("Position:").strong());
                ui.label(format!(
                    "{:.4}, {:.4}",
                    self.selected.latitude, self.selected.longitude
                ));
            });

            ui.horizontal(|ui| {
                ui.label(RichText::new("City:").strong());
                ui.label(self.selected.city.display_name());
            });

            ui.separator();
            ui.small("Click other vehicle markers to see their details");
        });

        open
    }
}
