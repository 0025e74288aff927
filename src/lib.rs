//! Mind Gym - attention training mini games for the browser
//!
//! Core modules:
//! - `games`: Deterministic game engines (memory match, Schulte table)
//! - `history`: Session history log persisted to LocalStorage
//! - `web`: Browser bindings the host page drives (wasm32 only)

pub mod games;
pub mod history;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use games::memory::{MemoryGame, MemoryPhase};
pub use games::schulte::{Outcome, SchulteGame, SchultePhase};
pub use history::{SessionHistory, SessionResult};

/// Format whole seconds as the M:SS countdown the HUD shows
pub fn format_clock(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
