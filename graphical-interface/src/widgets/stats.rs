use egui::RichText;

use vehicle_feed::Occupancy;

use crate::renderer::occupancy_color;
use crate::state::ViewState;

/// Live stats panel: active vehicle count and the occupancy breakdown of
/// the latest snapshot.
pub struct WidgetStats;

impl WidgetStats {
    pub fn show(&self, ctx: &egui::Context, view: &ViewState) {
        egui::Window::new("Live Stats")
            .resizable(false)
            .collapsible(true)
            .fixed_pos([20.0, 60.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Active Vehicles:");
                    ui.label(RichText::new(view.vehicles.len().to_string()).strong());
                });

                for occupancy in Occupancy::ALL {
                    ui.horizontal(|ui| {
                        ui.label(format!("{} Occupancy:", capitalized(occupancy.as_str())));
                        ui.label(
                            RichText::new(view.occupancy_count(occupancy).to_string())
                                .color(occupancy_color(occupancy))
                                .strong(),
                        );
                    });
                }

                ui.separator();
                ui.small(format!(
                    "Updated {}",
                    chrono::Local::now().format("%H:%M:%S")
                ));
            });
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalization() {
        assert_eq!(capitalized("low"), "Low");
        assert_eq!(capitalized(""), "");
    }
}
