use crate::errors::AppError;
use crate::models::Ledger;
use std::path::Path;
use tokio::fs;
use tracing::error;

/// Reads the ledger file. A missing file yields a fresh ledger for
/// `username`; anything unreadable, unparsable or inconsistent is logged and
/// replaced the same way.
pub async fn load_ledger(path: &Path, username: &str) -> Ledger {
    match fs::read(path).await {
        Ok(bytes) => parse_ledger(&bytes).unwrap_or_else(|| Ledger::with_username(username)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ledger::with_username(username),
        Err(err) => {
            error!("failed to read ledger file: {err}");
            Ledger::with_username(username)
        }
    }
}

fn parse_ledger(bytes: &[u8]) -> Option<Ledger> {
    let ledger: Ledger = match serde_json::from_slice(bytes) {
        Ok(ledger) => ledger,
        Err(err) => {
            error!("failed to parse ledger file: {err}");
            return None;
        }
    };
    if let Err(reason) = ledger.validate() {
        error!("ignoring inconsistent ledger file: {reason}");
        return None;
    }
    Some(ledger)
}

pub async fn persist_ledger(path: &Path, ledger: &Ledger) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(ledger).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
