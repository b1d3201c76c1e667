//! Server state and configuration.

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{Mutex, RwLock};

use crate::invoice::InvoiceEditor;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// The session's invoice; all mutations go through the editor under
    /// the write lock, preserving single-writer semantics.
    pub editor: RwLock<InvoiceEditor>,
    /// Held for the duration of an export; a second trigger while an
    /// export is in flight is rejected instead of queued.
    pub export_guard: Mutex<()>,
    /// Unix timestamp of server boot for cache busting.
    pub boot_time: u64,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        Self {
            config,
            editor: RwLock::new(InvoiceEditor::new()),
            export_guard: Mutex::new(()),
            boot_time,
        }
    }
}
