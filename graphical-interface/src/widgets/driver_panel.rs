use egui::{Color32, RichText};

use vehicle_feed::seed;
use vehicle_feed::{City, DriverTrip, Occupancy, VehicleType};

use crate::renderer::occupancy_color;
use crate::session::{DriverProfile, SessionStore, DRIVER_PROFILE_KEY};

/// Driver screen: a one-time profile setup, then the trip dashboard with
/// the start/end toggle, occupancy reporting and the tracked position.
pub struct WidgetDriverPanel {
    name: String,
    vehicle_kind: VehicleType,
    route: String,
}

impl WidgetDriverPanel {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            vehicle_kind: VehicleType::Bus,
            route: String::new(),
        }
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        session: &mut SessionStore,
        trip: &mut DriverTrip,
        city: City,
    ) {
        match session.get_json::<DriverProfile>(DRIVER_PROFILE_KEY) {
            Some(profile) => self.dashboard(ctx, session, trip, &profile),
            None => self.profile_setup(ctx, session, city),
        }
    }

    fn profile_setup(&mut self, ctx: &egui::Context, session: &mut SessionStore, city: City) {
        egui::Window::new("Profile Setup")
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label("Set up your driver profile to start a trip:");
                ui.add_space(6.0);

                ui.horizontal(|ui| {
                    ui.label("Name:");
                    ui.text_edit_singleline(&mut self.name);
                });

                ui.horizontal(|ui| {
                    ui.label("Vehicle:");
                    egui::ComboBox::from_id_salt("driver-vehicle-kind")
                        .selected_text(self.vehicle_kind.display_name())
                        .show_ui(ui, |ui| {
                            for kind in VehicleType::ALL {
                                if ui
                                    .selectable_label(self.vehicle_kind == kind, kind.display_name())
                                    .clicked()
                                {
                                    self.vehicle_kind = kind;
                                    self.route.clear();
                                }
                            }
                        });
                });

                ui.horizontal(|ui| {
                    ui.label("Route:");
                    // Seeded modes offer the canned route list; monorail is free text
                    match self.vehicle_kind.transport_mode() {
                        Some(mode) => {
                            egui::ComboBox::from_id_salt("driver-route")
                                .selected_text(if self.route.is_empty() {
                                    "Pick a route"
                                } else {
                                    self.route.as_str()
                                })
                                .show_ui(ui, |ui| {
                                    for route in seed::route_options(city, mode) {
                                        if ui
                                            .selectable_label(self.route == *route, *route)
                                            .clicked()
                                        {
                                            self.route = route.to_string();
                                        }
                                    }
                                });
                        }
                        None => {
                            ui.text_edit_singleline(&mut self.route);
                        }
                    }
                });

                ui.add_space(6.0);
                let ready = !self.name.trim().is_empty() && !self.route.trim().is_empty();
                if ui.add_enabled(ready, egui::Button::new("Save Profile")).clicked() {
                    let profile = DriverProfile {
                        name: self.name.trim().to_string(),
                        vehicle_kind: self.vehicle_kind.as_str().to_string(),
                        route_id: self.route.clone(),
                        city: city.as_str().to_string(),
                    };
                    if let Err(e) = session.set_json(DRIVER_PROFILE_KEY, &profile) {
                        eprintln!("Failed to save driver profile: {}", e);
                    }
                }
            });
    }

    fn dashboard(
        &mut self,
        ctx: &egui::Context,
        session: &mut SessionStore,
        trip: &mut DriverTrip,
        profile: &DriverProfile,
    ) {
        egui::Window::new("Driver Dashboard")
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("Welcome, {}", profile.name))
                        .strong()
                        .size(18.0),
                );
                ui.label(format!(
                    "{} · {} · {}",
                    profile.city, profile.vehicle_kind, profile.route_id
                ));
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label(RichText::new("Trip:").strong());
                    if trip.is_on_trip() {
                        ui.label(RichText::new("On trip").color(Color32::from_rgb(0x10, 0xb9, 0x81)));
                        if let Some(minutes) = trip.trip_duration_minutes() {
                            ui.label(DriverTrip::format_duration(minutes));
                        }
                    } else {
                        ui.label("Idle");
                    }
                });

                if trip.is_on_trip() {
                    if ui.button("End Trip").clicked() {
                        trip.end_trip();
                    }
                } else if ui.button("Start Trip").clicked() {
                    trip.start_trip();
                }

                ui.separator();
                ui.label(RichText::new("Occupancy").strong());
                ui.horizontal(|ui| {
                    for occupancy in Occupancy::ALL {
                        let label = RichText::new(occupancy.as_str())
                            .color(occupancy_color(occupancy));
                        if ui
                            .selectable_label(trip.occupancy == occupancy, label)
                            .clicked()
                        {
                            trip.set_occupancy(occupancy);
                        }
                    }
                });

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Location:").strong());
                    ui.label(format!("{:.4}, {:.4}", trip.latitude, trip.longitude));
                });

                ui.add_space(6.0);
                if ui.button("Reset Profile").clicked() {
                    trip.end_trip();
                    if let Err(e) = session.remove(DRIVER_PROFILE_KEY) {
                        eprintln!("Failed to reset driver profile: {}", e);
                    }
                }
            });
    }
}
