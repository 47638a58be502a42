use crate::errors::AppError;
use crate::store::DailyDataStore;
use crate::vitals::VitalsMonitor;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<DailyDataStore>>,
    pub vitals: Arc<Mutex<VitalsMonitor>>,
}

impl AppState {
    pub fn new(store: DailyDataStore, vitals: VitalsMonitor) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            vitals: Arc::new(Mutex::new(vitals)),
        }
    }

    /// Runs `op` against the store on the blocking pool. Storage backends do
    /// synchronous file IO, which must stay off the async workers.
    pub async fn with_store<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut DailyDataStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let mut store = Arc::clone(&self.store).lock_owned().await;
        tokio::task::spawn_blocking(move || op(&mut store))
            .await
            .map_err(AppError::internal)
    }
}
