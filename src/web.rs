//! Browser event surface
//!
//! wasm-bindgen wrappers the host page drives: one class per game
//! forwarding input events to its engine, plus the history page
//! bindings. Finished Schulte sessions are appended to the history log
//! here, the moment the one-shot outcome is collected, so a page that
//! merely re-renders can never double-record.

use wasm_bindgen::prelude::*;

use crate::format_clock;
use crate::games::memory::MemoryGame;
use crate::games::schulte::SchulteGame;
use crate::history::{SessionHistory, SessionResult};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Mind Gym loaded");
}

/// One memory match board
#[wasm_bindgen]
pub struct MemorySession {
    game: MemoryGame,
}

#[wasm_bindgen]
impl MemorySession {
    /// Deal a fresh board, seeded from the clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let seed = js_sys::Date::now() as u64;
        log::info!("Memory session seeded with {}", seed);

        let mut game = MemoryGame::new(seed);
        game.new_game();
        Self { game }
    }

    pub fn new_game(&mut self) {
        self.game.new_game();
    }

    pub fn flip(&mut self, index: usize) {
        self.game.flip(index);
    }

    /// Advance the countdown and the reveal lock
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.game.tick(elapsed_ms);
    }

    pub fn phase(&self) -> String {
        self.game.phase().as_str().to_string()
    }

    pub fn tile_count(&self) -> usize {
        self.game.tile_count()
    }

    pub fn moves(&self) -> u32 {
        self.game.moves()
    }

    pub fn time_left_secs(&self) -> u32 {
        self.game.time_left_secs()
    }

    /// Countdown formatted for the HUD
    pub fn clock(&self) -> String {
        format_clock(self.game.time_left_secs())
    }

    pub fn is_face_up(&self, index: usize) -> bool {
        self.game.is_face_up(index)
    }

    pub fn is_matched(&self, index: usize) -> bool {
        self.game.is_matched(index)
    }

    /// Artwork id for a tile, resolved to an image by the page
    pub fn face(&self, index: usize) -> Option<u16> {
        self.game.face(index).map(|f| f.0)
    }
}

/// One Schulte table session
#[wasm_bindgen]
pub struct SchulteSession {
    game: SchulteGame,
}

#[wasm_bindgen]
impl SchulteSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let seed = js_sys::Date::now() as u64;
        log::info!("Schulte session seeded with {}", seed);

        Self {
            game: SchulteGame::new(seed),
        }
    }

    pub fn start(&mut self) {
        self.game.start();
    }

    pub fn click(&mut self, number: u32) {
        self.game.click(number);
        self.record_finished();
    }

    /// Advance the level countdown
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.game.tick(elapsed_ms);
        self.record_finished();
    }

    pub fn end_early(&mut self) {
        self.game.end_early();
        self.record_finished();
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    pub fn phase(&self) -> String {
        self.game.phase().as_str().to_string()
    }

    pub fn display_level(&self) -> u32 {
        self.game.display_level()
    }

    pub fn points(&self) -> u32 {
        self.game.points()
    }

    pub fn size(&self) -> u32 {
        self.game.size()
    }

    pub fn expected_number(&self) -> u32 {
        self.game.expected_number()
    }

    /// Current cell values in display order
    pub fn grid(&self) -> Vec<u32> {
        self.game.grid().to_vec()
    }

    pub fn is_cleared(&self, number: u32) -> bool {
        self.game.is_cleared(number)
    }

    pub fn time_left_secs(&self) -> u32 {
        self.game.time_left_secs()
    }

    /// Countdown formatted for the HUD
    pub fn clock(&self) -> String {
        format_clock(self.game.time_left_secs())
    }

    pub fn cell_width(&self) -> u32 {
        self.game.level_spec().cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.game.level_spec().cell_height
    }
}

impl SchulteSession {
    /// Collect the one-shot outcome, stamp it and persist it
    fn record_finished(&mut self) {
        if let Some(outcome) = self.game.take_result() {
            let entry = SessionResult::from_outcome(outcome);
            log::info!("Session over: {}", entry);
            SessionHistory::append(entry);
        }
    }
}

/// Persisted history as JSON for the history page, oldest first
#[wasm_bindgen]
pub fn load_history_json() -> String {
    let history = SessionHistory::load();
    serde_json::to_string(&history).unwrap_or_else(|_| "[]".to_string())
}

/// Wipe the persisted history
#[wasm_bindgen]
pub fn clear_history() {
    SessionHistory::clear();
}
