mod driver_panel;
mod fleet_table;
mod stats;
mod vehicle;

pub use driver_panel::WidgetDriverPanel;
pub use fleet_table::WidgetFleetTable;
pub use stats::WidgetStats;
pub use vehicle::WidgetVehicle;
