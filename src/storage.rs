use crate::errors::AppError;
use crate::models::RecordMap;
use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
};
use tracing::{debug, error};

/// Key the whole record map is stored under.
pub const STORAGE_KEY: &str = "hospital_daily_data";

/// Read-whole / write-whole persistence for the record map.
///
/// `load` never fails: anything unreadable is reported and treated as an
/// empty map.
pub trait Storage: Send {
    fn load(&self) -> RecordMap;
    fn save(&self, records: &RecordMap) -> Result<(), AppError>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> RecordMap {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(records) => records,
                Err(err) => {
                    error!(path = %self.path.display(), "failed to parse data file: {err}");
                    RecordMap::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => RecordMap::default(),
            Err(err) => {
                error!(path = %self.path.display(), "failed to read data file: {err}");
                RecordMap::default()
            }
        }
    }

    fn save(&self, records: &RecordMap) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_vec_pretty(records)?;
        fs::write(&self.path, payload)?;
        debug!(path = %self.path.display(), days = records.len(), "persisted daily data");
        Ok(())
    }
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Arc<Mutex<RecordMap>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: RecordMap) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn snapshot(&self) -> RecordMap {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> RecordMap {
        self.snapshot()
    }

    fn save(&self, records: &RecordMap) -> Result<(), AppError> {
        *self.records.lock().unwrap_or_else(PoisonError::into_inner) = records.clone();
        Ok(())
    }
}
