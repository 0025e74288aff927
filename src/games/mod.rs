//! Deterministic game engines
//!
//! All gameplay logic lives here. These modules must stay pure:
//! - Discrete input events plus a millisecond `tick`, no wall clocks
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod memory;
pub mod schulte;

pub use memory::{FaceId, MemoryGame, MemoryPhase};
pub use schulte::{LEVELS, LevelSpec, Outcome, SchulteGame, SchultePhase, SessionOutcome};
