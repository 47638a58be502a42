pub mod app;
pub mod clock;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod models;
pub mod random;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod ticker;
pub mod ui;
pub mod vitals;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use store::DailyDataStore;
