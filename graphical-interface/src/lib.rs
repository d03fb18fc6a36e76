mod map;
mod markers;
mod plugins;
mod renderer;
mod session;
mod state;
mod widgets;
mod windows;

use map::TransitApp;

pub fn run() -> Result<(), eframe::Error> {
    eframe::run_native(
        "Transit Tracker",
        Default::default(),
        Box::new(|cc| Ok(Box::new(TransitApp::new(cc.egui_ctx.clone())))),
    )
}
