pub mod app;
pub mod backup;
pub mod dates;
pub mod errors;
pub mod exercises;
pub mod handlers;
pub mod lifts;
pub mod models;
pub mod routines;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tracking;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, persist_data, resolve_data_dir, KvStore};
