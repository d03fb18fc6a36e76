use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use egui::Context;
use logger::Logger;

use vehicle_feed::types::feed::LIVE_VIEW_JITTER;
use vehicle_feed::{
    fleet, report, City, DriverTrip, FeedConfig, FixedLocation, MockSeeds, TransportMode,
    VehicleFeed, VehicleSnapshot,
};

use crate::renderer::{MapRenderer, INITIAL_ZOOM};
use crate::session::{SessionStore, SELECTED_CITY_KEY, SELECTED_TRANSPORT_KEY};
use crate::state::{SelectionState, ViewState};
use crate::widgets::{WidgetDriverPanel, WidgetFleetTable, WidgetStats, WidgetVehicle};
use crate::windows;

const SESSION_FILE: &str = "transit-sessions.json";
const LOG_DIR: &str = "logs";
const REPAINT_MS: u64 = 1000;
const DRIVER_DRIFT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Traveler,
    Driver,
    Authority,
}

/// The main application struct: owns the map renderer, the running vehicle
/// feed and the per-screen state, and wires snapshots from the feed thread
/// into the UI.
///
/// Snapshots arrive on a channel and are drained to the latest one each
/// frame; switching screen, city or mode stops the feed, unmounts the map
/// and starts over with the new configuration.
pub struct TransitApp {
    egui_ctx: Context,
    screen: Screen,
    city: City,
    mode: Option<TransportMode>,
    renderer: MapRenderer,
    feed: Option<VehicleFeed>,
    snapshots: Option<mpsc::Receiver<VehicleSnapshot>>,
    selection: Rc<RefCell<SelectionState>>,
    view: ViewState,
    vehicle_widget: Option<WidgetVehicle>,
    stats: WidgetStats,
    fleet_table: WidgetFleetTable,
    driver_panel: WidgetDriverPanel,
    trip: DriverTrip,
    session: SessionStore,
    logger: Option<Logger>,
    report_notice: Option<String>,
    last_driver_update: Instant,
}

impl TransitApp {
    /// Creates a new `TransitApp`, restoring the traveler's city and mode
    /// preferences and starting the first feed.
    pub fn new(egui_ctx: Context) -> Self {
        let session = SessionStore::load(Path::new(SESSION_FILE));
        let city = session
            .get(SELECTED_CITY_KEY)
            .and_then(|raw| City::from_str(raw).ok())
            .unwrap_or(City::Mumbai);
        let mode = session
            .get(SELECTED_TRANSPORT_KEY)
            .and_then(|raw| TransportMode::from_str(raw).ok());

        let logger = Logger::new(Path::new(LOG_DIR), "transit-tracker").ok();

        let selection = Rc::new(RefCell::new(SelectionState::new()));
        let mut renderer = MapRenderer::new();
        let shared_selection = Rc::clone(&selection);
        renderer.on_select(move |vehicle| {
            shared_selection
                .borrow_mut()
                .toggle_vehicle_selection(&vehicle);
        });

        let mut app = Self {
            egui_ctx,
            screen: Screen::Traveler,
            city,
            mode,
            renderer,
            feed: None,
            snapshots: None,
            selection,
            view: ViewState::new(),
            vehicle_widget: None,
            stats: WidgetStats,
            fleet_table: WidgetFleetTable,
            driver_panel: WidgetDriverPanel::new(),
            trip: DriverTrip::new(&FixedLocation::fallback()),
            session,
            logger,
            report_notice: None,
            last_driver_update: Instant::now(),
        };
        app.restart_feed();
        app
    }

    /// Tears the current feed and map down and starts over for the active
    /// screen. Selection does not survive a context change.
    fn restart_feed(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.stop();
        }
        self.snapshots = None;
        self.renderer.unmount();
        self.selection.borrow_mut().clear();
        self.view = ViewState::new();
        self.vehicle_widget = None;
        self.report_notice = None;

        if self.screen == Screen::Driver {
            // The driver screen tracks its own trip, there is no feed behind it
            return;
        }

        let (tx, rx) = mpsc::channel();
        let repaint_ctx = self.egui_ctx.clone();
        let on_snapshot = move |snapshot: VehicleSnapshot| {
            if tx.send(snapshot).is_ok() {
                repaint_ctx.request_repaint();
            }
        };

        let result = if self.screen == Screen::Authority {
            VehicleFeed::start_with_vehicles(
                fleet::city_fleet(),
                FeedConfig::dashboard(self.city),
                self.logger.clone(),
                on_snapshot,
            )
        } else {
            VehicleFeed::start(
                &MockSeeds,
                FeedConfig::live_view(self.city, self.mode),
                self.logger.clone(),
                on_snapshot,
            )
        };

        match result {
            Ok(feed) => {
                self.feed = Some(feed);
                self.snapshots = Some(rx);
            }
            Err(e) => self.report_error(&format!("Failed to start the vehicle feed: {}", e)),
        }
    }

    /// Applies the newest pending snapshot, if any, to the map and the
    /// side panels. Intermediate snapshots are skipped; only the latest
    /// matters.
    fn drain_snapshots(&mut self) {
        let latest = match &self.snapshots {
            Some(snapshots) => {
                let mut latest = None;
                while let Ok(snapshot) = snapshots.try_recv() {
                    latest = Some(snapshot);
                }
                latest
            }
            None => None,
        };

        if let Some(snapshot) = latest {
            self.renderer.update(&snapshot);
            self.view.apply_snapshot(&snapshot);
            self.view
                .refresh_selection(&mut self.selection.borrow_mut());
        }
    }

    fn tick_driver_drift(&mut self) {
        if self.screen == Screen::Driver
            && self.trip.is_on_trip()
            && self.last_driver_update.elapsed() >= Duration::from_secs(DRIVER_DRIFT_SECS)
        {
            self.trip.drift(LIVE_VIEW_JITTER);
            self.last_driver_update = Instant::now();
        }
    }

    fn ensure_mounted(&mut self, ctx: &Context, center: Option<(f64, f64)>) {
        if self.feed.is_none() || self.renderer.is_mounted() {
            return;
        }
        if let Err(e) = self.renderer.mount(ctx, center, INITIAL_ZOOM) {
            self.report_error(&format!("Failed to mount the map: {}", e));
            if let Some(feed) = self.feed.take() {
                feed.stop();
            }
            self.snapshots = None;
        }
    }

    fn top_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top-bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Transit Tracker");
                ui.separator();

                for (screen, label) in [
                    (Screen::Traveler, "Traveler"),
                    (Screen::Driver, "Driver"),
                    (Screen::Authority, "Authority"),
                ] {
                    if ui.selectable_label(self.screen == screen, label).clicked()
                        && self.screen != screen
                    {
                        self.screen = screen;
                        self.restart_feed();
                    }
                }

                if self.screen != Screen::Authority {
                    ui.separator();

                    egui::ComboBox::from_id_salt("city-picker")
                        .selected_text(self.city.display_name())
                        .show_ui(ui, |ui| {
                            for city in City::ALL {
                                if ui
                                    .selectable_label(self.city == city, city.display_name())
                                    .clicked()
                                    && self.city != city
                                {
                                    self.city = city;
                                    let _ = self.session.set(SELECTED_CITY_KEY, city.as_str());
                                    self.restart_feed();
                                }
                            }
                        });
                }

                if self.screen == Screen::Traveler {
                    let mode_label = match self.mode {
                        Some(mode) => mode.as_str(),
                        None => "all modes",
                    };
                    egui::ComboBox::from_id_salt("mode-picker")
                        .selected_text(mode_label)
                        .show_ui(ui, |ui| {
                            if ui.selectable_label(self.mode.is_none(), "all modes").clicked()
                                && self.mode.is_some()
                            {
                                self.mode = None;
                                let _ = self.session.remove(SELECTED_TRANSPORT_KEY);
                                self.restart_feed();
                            }
                            for mode in TransportMode::ALL {
                                if ui
                                    .selectable_label(self.mode == Some(mode), mode.as_str())
                                    .clicked()
                                    && self.mode != Some(mode)
                                {
                                    self.mode = Some(mode);
                                    let _ =
                                        self.session.set(SELECTED_TRANSPORT_KEY, mode.as_str());
                                    self.restart_feed();
                                }
                            }
                        });
                }
            });
        });
    }

    fn traveler_view(&mut self, ctx: &Context, ui: &mut egui::Ui) {
        let center = self.city.center();
        self.ensure_mounted(ctx, Some(center));
        self.renderer.show(ui);
        if let Some(map_memory) = self.renderer.map_memory_mut() {
            windows::zoom(ui, map_memory);
        }

        self.stats.show(ctx, &self.view);
        self.show_selection_widget(ctx);
    }

    fn authority_view(&mut self, ctx: &Context, ui: &mut egui::Ui) {
        // The fleet overview is not tied to one city; it centers on the fallback
        self.ensure_mounted(ctx, None);
        self.renderer.show(ui);
        if let Some(map_memory) = self.renderer.map_memory_mut() {
            windows::zoom(ui, map_memory);
        }

        self.fleet_table.show(ctx, &self.view.vehicles);
        self.show_selection_widget(ctx);

        egui::Area::new("download-report".into())
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
            .show(ctx, |ui| {
                if ui
                    .add_sized([150.0, 40.0], egui::Button::new("Download Report"))
                    .clicked()
                {
                    match report::save_fleet_report(&self.view.vehicles, Path::new(".")) {
                        Ok(path) => {
                            self.report_notice =
                                Some(format!("Report saved to {}", path.display()));
                        }
                        Err(e) => {
                            self.report_error(&format!("Failed to write the fleet report: {}", e));
                            self.report_notice = Some("Report failed".to_string());
                        }
                    }
                }
                if let Some(notice) = &self.report_notice {
                    ui.label(notice.clone());
                }
            });
    }

    fn driver_view(&mut self, ctx: &Context, _ui: &mut egui::Ui) {
        self.driver_panel
            .show(ctx, &mut self.session, &mut self.trip, self.city);
    }

    /// Keeps the detail window in lockstep with the selection: opened on
    /// select, payload refreshed every frame, selection cleared when the
    /// user closes the window.
    fn show_selection_widget(&mut self, ctx: &Context) {
        let selected = self.selection.borrow().vehicle.clone();
        match selected {
            Some(vehicle) => {
                let recreate = self
                    .vehicle_widget
                    .as_ref()
                    .map_or(true, |widget| widget.vehicle_id() != vehicle.id);
                if recreate {
                    self.vehicle_widget = Some(WidgetVehicle::new(vehicle));
                } else if let Some(widget) = &mut self.vehicle_widget {
                    widget.set_vehicle(vehicle);
                }

                if let Some(widget) = &mut self.vehicle_widget {
                    if !widget.show(ctx) {
                        self.selection.borrow_mut().clear();
                        self.vehicle_widget = None;
                    }
                }
            }
            None => self.vehicle_widget = None,
        }
    }

    fn report_error(&self, message: &str) {
        match &self.logger {
            Some(logger) => {
                let _ = logger.error(message, true);
            }
            None => eprintln!("{}", message),
        }
    }
}

impl eframe::App for TransitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_snapshots();
        self.tick_driver_drift();

        ctx.request_repaint_after(Duration::from_millis(REPAINT_MS));

        self.top_bar(ctx);

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| match self.screen {
                Screen::Traveler => self.traveler_view(ctx, ui),
                Screen::Driver => self.driver_view(ctx, ui),
                Screen::Authority => self.authority_view(ctx, ui),
            });
    }
}
