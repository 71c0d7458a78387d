pub mod app;
pub mod clock;
pub mod config;
pub mod dice;
pub mod engine;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::Config;
pub use engine::{Rejection, Rules};
pub use models::{Benefit, Ledger};
pub use state::AppState;
pub use storage::{load_ledger, persist_ledger};
