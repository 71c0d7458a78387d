use crate::dice::Dice;
use crate::engine::Rules;
use crate::models::Ledger;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// The ledger together with the dice that feeds it. Both sit behind one lock
/// so an operation and its random draws are never interleaved with another.
pub struct Store {
    pub ledger: Ledger,
    pub dice: Box<dyn Dice + Send + Sync>,
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub rules: Arc<Rules>,
    pub store: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, rules: Rules, ledger: Ledger, dice: Box<dyn Dice + Send + Sync>) -> Self {
        Self {
            data_path,
            rules: Arc::new(rules),
            store: Arc::new(Mutex::new(Store { ledger, dice })),
        }
    }
}
