use std::{cell::RefCell, fmt, rc::Rc};

use egui::{Color32, Context};
use walkers::{HttpOptions, HttpTiles, Map, MapMemory, Position, Tiles};

use vehicle_feed::{Occupancy, Vehicle, VehicleSnapshot, VehicleType, FALLBACK_CENTER};

use crate::markers::MarkerSet;
use crate::plugins;

pub const INITIAL_ZOOM: f64 = 12.0;

/// Marker fill color, keyed by vehicle kind.
pub fn kind_color(kind: VehicleType) -> Color32 {
    match kind {
        VehicleType::Bus => Color32::from_rgb(0xfb, 0x92, 0x3c),
        VehicleType::Metro => Color32::from_rgb(0x3b, 0x82, 0xf6),
        VehicleType::Train => Color32::from_rgb(0x10, 0xb9, 0x81),
        VehicleType::Monorail => Color32::from_rgb(0x8b, 0x5c, 0xf6),
    }
}

/// Marker ring color, keyed by occupancy severity.
pub fn occupancy_color(occupancy: Occupancy) -> Color32 {
    match occupancy {
        Occupancy::Low => Color32::from_rgb(0x10, 0xb9, 0x81),
        Occupancy::Medium => Color32::from_rgb(0xf5, 0x9e, 0x0b),
        Occupancy::Full => Color32::from_rgb(0xef, 0x44, 0x44),
    }
}

/// Failure initializing the underlying map widget.
#[derive(Debug)]
pub enum RendererError {
    InvalidZoom(f64),
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererError::InvalidZoom(zoom) => {
                write!(f, "The map rejected the initial zoom level {}", zoom)
            }
        }
    }
}

impl std::error::Error for RendererError {}

type SelectCallback = Box<dyn FnMut(Vehicle)>;

/// Everything owned while the map is mounted: the tile pipeline, the map
/// memory, the fixed view center and the marker set. Dropped wholesale on
/// unmount so nothing leaks into the next mount.
struct MountedMap {
    tiles: Box<dyn Tiles>,
    map_memory: MapMemory,
    center: Position,
    markers: MarkerSet,
}

/// Keeps one marker per vehicle on a slippy map, in sync with the latest
/// snapshot, and dispatches marker clicks to a selection callback.
///
/// Lifecycle is `Unmounted -> Mounted -> Unmounted`: [`MapRenderer::update`]
/// and [`MapRenderer::show`] are no-ops while unmounted, and
/// [`MapRenderer::mount`] on an already-mounted renderer is a no-op too, so
/// a second tile pipeline can never stack on top of the first. The view
/// center is fixed at mount time; showing another city means unmounting and
/// mounting again.
pub struct MapRenderer {
    mounted: Option<MountedMap>,
    on_select: Option<SelectCallback>,
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            mounted: None,
            on_select: None,
        }
    }

    /// Acquires the map widget: OpenStreetMap tiles, map memory and an
    /// empty marker set, centered on `center` (or the fixed fallback).
    pub fn mount(
        &mut self,
        egui_ctx: &Context,
        center: Option<(f64, f64)>,
        zoom: f64,
    ) -> Result<(), RendererError> {
        if self.mounted.is_some() {
            return Ok(());
        }

        let mut map_memory = MapMemory::default();
        map_memory
            .set_zoom(zoom)
            .map_err(|_| RendererError::InvalidZoom(zoom))?;

        let (lat, lng) = center.unwrap_or(FALLBACK_CENTER);
        let tiles = Box::new(HttpTiles::with_options(
            walkers::sources::OpenStreetMap,
            HttpOptions::default(),
            egui_ctx.clone(),
        ));

        self.mounted = Some(MountedMap {
            tiles,
            map_memory,
            center: Position::from_lat_lon(lat, lng),
            markers: MarkerSet::new(),
        });
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Releases the map widget and every marker. Idempotent.
    pub fn unmount(&mut self) {
        self.mounted = None;
    }

    /// Reconciles the marker set against `snapshot`. No-op while unmounted.
    pub fn update(&mut self, snapshot: &VehicleSnapshot) {
        if let Some(mounted) = &mut self.mounted {
            mounted.markers.sync(snapshot);
        }
    }

    /// Registers the selection callback. One callback is active per
    /// renderer; the last registration wins.
    pub fn on_select(&mut self, callback: impl FnMut(Vehicle) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    pub fn marker_count(&self) -> usize {
        self.mounted
            .as_ref()
            .map_or(0, |mounted| mounted.markers.len())
    }

    /// The map memory of the mounted map, for the zoom controls.
    pub fn map_memory_mut(&mut self) -> Option<&mut MapMemory> {
        self.mounted.as_mut().map(|mounted| &mut mounted.map_memory)
    }

    /// Draws the map with its vehicle markers and dispatches at most one
    /// selection per click. No-op while unmounted.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let mounted = match &mut self.mounted {
            Some(mounted) => mounted,
            None => return,
        };

        let clicked: Rc<RefCell<Option<Vehicle>>> = Rc::new(RefCell::new(None));
        let vehicle_plugin = plugins::Vehicles::new(&mounted.markers, Rc::clone(&clicked));

        let map = Map::new(
            Some(mounted.tiles.as_mut()),
            &mut mounted.map_memory,
            mounted.center,
        )
        .with_plugin(vehicle_plugin);

        ui.add(map);

        let clicked_vehicle = clicked.borrow_mut().take();
        if let Some(vehicle) = clicked_vehicle {
            if let Some(callback) = &mut self.on_select {
                callback(vehicle);
            }
        }
    }
}
