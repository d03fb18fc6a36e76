use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use csv::Writer;

use crate::types::sim_error::SimError;
use crate::types::vehicle::Vehicle;

const REPORT_HEADER: [&str; 6] = [
    "Vehicle ID",
    "Type",
    "Route",
    "Occupancy",
    "Last Location",
    "Status",
];

/// Writes the fleet report as CSV: one row per vehicle with its id, kind,
/// route, occupancy and last known location.
pub fn write_fleet_report<W: Write>(vehicles: &[Vehicle], out: W) -> Result<(), SimError> {
    let mut writer = Writer::from_writer(out);

    writer
        .write_record(REPORT_HEADER)
        .map_err(|e| SimError::ReportError(e.to_string()))?;

    for vehicle in vehicles {
        let location = format!("{:.6}, {:.6}", vehicle.latitude, vehicle.longitude);
        writer
            .write_record([
                vehicle.id.as_str(),
                vehicle.kind.as_str(),
                vehicle.route.as_str(),
                vehicle.occupancy.as_str(),
                location.as_str(),
                "Active",
            ])
            .map_err(|e| SimError::ReportError(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| SimError::ReportError(e.to_string()))?;
    Ok(())
}

/// Report file name for a given date, e.g. `fleet-report-2026-08-06.csv`.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("fleet-report-{}.csv", date.format("%Y-%m-%d"))
}

/// Writes today's fleet report into `dir` and returns the full path.
pub fn save_fleet_report(vehicles: &[Vehicle], dir: &Path) -> Result<PathBuf, SimError> {
    let path = dir.join(report_file_name(Utc::now().date_naive()));
    let file = File::create(&path).map_err(|e| SimError::ReportError(e.to_string()))?;
    write_fleet_report(vehicles, file)?;
    Ok(path)
}
