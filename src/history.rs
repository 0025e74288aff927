//! Session history log
//!
//! Persisted to LocalStorage as a bare JSON array, the exact shape the
//! history page has always read. Only Schulte sessions are recorded;
//! memory games come and go without a trace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::games::schulte::{Outcome, SessionOutcome};

/// A recorded session, one per terminated Schulte run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    /// Level reached, 1-based
    pub level: u32,
    pub points: u32,
    pub result: Outcome,
    /// Local time string captured when the session was recorded
    pub timestamp: String,
}

impl SessionResult {
    /// Stamp an engine outcome with the current local time
    pub fn from_outcome(outcome: SessionOutcome) -> Self {
        Self {
            level: outcome.level,
            points: outcome.points,
            result: outcome.result,
            timestamp: local_timestamp(),
        }
    }
}

impl fmt::Display for SessionResult {
    /// The line the history page renders for each entry
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level {}: {} - Reward: {} - Time: {}",
            self.level,
            self.result.as_str(),
            self.points,
            self.timestamp
        )
    }
}

/// Full session history, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHistory {
    pub entries: Vec<SessionResult>,
}

impl SessionHistory {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gameHistory";

    /// Create an empty log
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, result: SessionResult) {
        self.entries.push(result);
    }

    /// Parse a persisted log. Anything unreadable degrades to an empty
    /// log; the stored data has no schema version to migrate.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(history) => history,
            Err(err) => {
                log::warn!("Discarding unreadable game history: {}", err);
                Self::new()
            }
        }
    }

    /// Record one result: load the persisted log, push, write back
    pub fn append(result: SessionResult) {
        let mut history = Self::load();
        history.push(result);
        history.save();
    }

    /// Load history from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let history = Self::from_json(&json);
                log::info!("Loaded {} history entries", history.len());
                return history;
            }
        }

        log::info!("No game history found, starting fresh");
        Self::new()
    }

    /// Save history to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Game history saved ({} entries)", self.len());
            }
        }
    }

    /// Delete the persisted history (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn clear() {
        if let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        {
            let _ = storage.remove_item(Self::STORAGE_KEY);
            log::info!("Game history cleared");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn clear() {
        // No-op for native
    }
}

/// Current local time in the format history entries store
#[cfg(target_arch = "wasm32")]
pub fn local_timestamp() -> String {
    js_sys::Date::new_0()
        .to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED)
        .into()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn local_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
        .to_string()
}
