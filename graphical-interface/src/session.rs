use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub const SELECTED_CITY_KEY: &str = "selected-city";
pub const SELECTED_TRANSPORT_KEY: &str = "selected-transport";
pub const DRIVER_PROFILE_KEY: &str = "driver-profile";

/// Local key-value store standing in for per-browser storage: screen
/// preferences and the driver profile live here as JSON strings. The feed
/// core never touches it.
pub struct SessionStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl SessionStore {
    /// Loads the store from `path`; a missing or unreadable file yields an
    /// empty store.
    pub fn load(path: &Path) -> Self {
        let values = fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            values,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> io::Result<()> {
        self.values.remove(key);
        self.save()
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|raw| serde_json::from_str(raw).ok())
    }

    pub fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> io::Result<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.set(key, &raw)
    }

    fn save(&self) -> io::Result<()> {
        let raw = serde_json::to_string_pretty(&self.values)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, raw)
    }
}

/// The driver's stored profile, created once in the profile setup screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverProfile {
    pub name: String,
    pub vehicle_kind: String,
    pub route_id: String,
    pub city: String,
}
