use std::{cell::RefCell, rc::Rc};

use egui::{Align2, Color32, FontId, Rect, Response, Sense, Stroke, Vec2};
use walkers::{Plugin, Position, Projector};

use vehicle_feed::Vehicle;

use crate::markers::{Marker, MarkerSet};
use crate::renderer::{kind_color, occupancy_color};

const MARKER_RADIUS: f32 = 12.0;
const RING_WIDTH: f32 = 3.0;
const HIT_SIZE: f32 = 30.0;

/// Draws one circular marker per vehicle: fill by kind, ring by occupancy,
/// labeled with the kind's first letter. Clicks land in the shared cell;
/// the renderer dispatches the selection callback afterwards.
pub struct Vehicles<'a> {
    markers: &'a MarkerSet,
    clicked: Rc<RefCell<Option<Vehicle>>>,
}

impl<'a> Vehicles<'a> {
    pub fn new(markers: &'a MarkerSet, clicked: Rc<RefCell<Option<Vehicle>>>) -> Self {
        Self { markers, clicked }
    }
}

impl Plugin for Vehicles<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        for marker in self.markers.iter() {
            draw_marker(ui, projector, marker, &self.clicked);
        }
    }
}

fn draw_marker(
    ui: &mut egui::Ui,
    projector: &Projector,
    marker: &Marker,
    clicked: &Rc<RefCell<Option<Vehicle>>>,
) {
    let vehicle = &marker.vehicle;
    let screen_position = projector
        .project(Position::from_lat_lon(vehicle.latitude, vehicle.longitude))
        .to_pos2();

    let clickable_area = Rect::from_center_size(screen_position, Vec2::splat(HIT_SIZE));
    let response = ui.allocate_rect(clickable_area, Sense::click());

    let painter = ui.painter();
    painter.circle(
        screen_position,
        MARKER_RADIUS,
        kind_color(vehicle.kind),
        Stroke::new(RING_WIDTH, occupancy_color(vehicle.occupancy)),
    );
    painter.text(
        screen_position,
        Align2::CENTER_CENTER,
        vehicle.kind.label(),
        FontId::proportional(10.0),
        Color32::WHITE,
    );

    let response = response.on_hover_ui(|ui| {
        ui.strong(format!("{} {}", vehicle.kind.display_name(), vehicle.route));
        ui.label(format!("Occupancy: {}", vehicle.occupancy.as_str()));
        if let Some(eta) = &vehicle.eta {
            ui.label(format!("ETA: {}", eta));
        }
    });

    if response.clicked() {
        *clicked.borrow_mut() = Some(vehicle.clone());
    }
}
