//! Schulte table attention game
//!
//! Find the numbers of a shuffled grid in ascending order before the
//! level countdown runs out. Every correct click re-permutes the whole
//! grid, so the eyes can never settle. Four levels of growing grids;
//! each cleared level pays a fixed reward.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Grid side length, countdown length, and the cell layout hints the
/// page applies verbatim
#[derive(Debug, Clone, Copy)]
pub struct LevelSpec {
    pub size: u32,
    pub time_secs: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

/// Level progression, easiest first
pub const LEVELS: [LevelSpec; 4] = [
    LevelSpec { size: 3, time_secs: 20, cell_width: 90, cell_height: 85 },
    LevelSpec { size: 4, time_secs: 60, cell_width: 68, cell_height: 70 },
    LevelSpec { size: 5, time_secs: 80, cell_width: 53, cell_height: 53 },
    LevelSpec { size: 6, time_secs: 120, cell_width: 43, cell_height: 40 },
];

/// Points per cleared level, the final one included
pub const LEVEL_REWARD: u32 = 10;

/// Current phase of a Schulte session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchultePhase {
    /// Waiting on the start screen
    NotStarted,
    /// Level underway, countdown running
    InProgress,
    /// All levels cleared
    Won,
    /// Timed out or abandoned
    Lost,
}

impl SchultePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchultePhase::NotStarted => "NotStarted",
            SchultePhase::InProgress => "InProgress",
            SchultePhase::Won => "Won",
            SchultePhase::Lost => "Lost",
        }
    }
}

/// How a finished session ended. Serialized with the exact strings the
/// history storage has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    #[serde(rename = "lose")]
    Lose,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "Win",
            Outcome::Lose => "lose",
        }
    }
}

/// One-shot summary a terminated session leaves behind for the
/// history recorder. The timestamp is stamped on at append time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Level reached, 1-based as the page displays it
    pub level: u32,
    pub points: u32,
    pub result: Outcome,
}

/// Schulte session engine. Owns the grid, the level counter and the
/// per-level countdown for exactly one session.
#[derive(Debug, Clone)]
pub struct SchulteGame {
    seed: u64,
    rng: Pcg32,
    phase: SchultePhase,
    /// Current level index into `LEVELS`
    level: usize,
    /// Cell values in display order, re-permuted on every correct click
    grid: Vec<u32>,
    /// Next number the player must find
    expected: u32,
    points: u32,
    time_left_ms: u32,
    /// Terminal result waiting to be collected, at most once
    pending: Option<SessionOutcome>,
}

impl SchulteGame {
    pub fn new(seed: u64) -> Self {
        let mut game = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SchultePhase::NotStarted,
            level: 0,
            grid: Vec::new(),
            expected: 1,
            points: 0,
            time_left_ms: LEVELS[0].time_secs * 1000,
            pending: None,
        };
        game.deal_grid();
        game
    }

    /// Fresh permutation of `1..=size²` for the current level
    fn deal_grid(&mut self) {
        let size = LEVELS[self.level].size;
        self.grid = (1..=size * size).collect();
        self.grid.shuffle(&mut self.rng);
    }

    /// Leave the start screen. No-op in any other phase.
    pub fn start(&mut self) {
        if self.phase == SchultePhase::NotStarted {
            self.phase = SchultePhase::InProgress;
        }
    }

    /// Handle a cell click. Only the expected number does anything;
    /// every other click is ignored without penalty.
    pub fn click(&mut self, number: u32) {
        if self.phase != SchultePhase::InProgress || number != self.expected {
            return;
        }

        let last = self.level_spec().size.pow(2);
        self.expected += 1;
        self.grid.shuffle(&mut self.rng);

        if number == last {
            self.level_cleared();
        }
    }

    fn level_cleared(&mut self) {
        self.points += LEVEL_REWARD;

        if self.level + 1 < LEVELS.len() {
            self.level += 1;
            self.expected = 1;
            self.time_left_ms = LEVELS[self.level].time_secs * 1000;
            self.deal_grid();
        } else {
            self.finish(Outcome::Win);
        }
    }

    fn finish(&mut self, result: Outcome) {
        self.phase = match result {
            Outcome::Win => SchultePhase::Won,
            Outcome::Lose => SchultePhase::Lost,
        };
        self.pending = Some(SessionOutcome {
            level: self.display_level(),
            points: self.points,
            result,
        });
    }

    /// Advance the level countdown by `elapsed_ms`. Hitting zero loses
    /// the whole session with points frozen at the last award.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.phase != SchultePhase::InProgress {
            return;
        }
        if elapsed_ms >= self.time_left_ms {
            self.time_left_ms = 0;
            self.finish(Outcome::Lose);
        } else {
            self.time_left_ms -= elapsed_ms;
        }
    }

    /// Abandon the session early. Counts as a loss; no-op unless a
    /// level is underway.
    pub fn end_early(&mut self) {
        if self.phase == SchultePhase::InProgress {
            self.finish(Outcome::Lose);
        }
    }

    /// Back to the start screen with level, points and countdown reset.
    /// Callable from any phase.
    pub fn restart(&mut self) {
        self.phase = SchultePhase::NotStarted;
        self.level = 0;
        self.expected = 1;
        self.points = 0;
        self.time_left_ms = LEVELS[0].time_secs * 1000;
        self.pending = None;
        self.deal_grid();
    }

    /// Collect the terminal result. Yields at most once per terminated
    /// session, so repeated polling can never duplicate a record.
    pub fn take_result(&mut self) -> Option<SessionOutcome> {
        self.pending.take()
    }

    pub fn phase(&self) -> SchultePhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current level index, 0-based
    pub fn level(&self) -> usize {
        self.level
    }

    /// Level number as the page shows it, 1-based
    pub fn display_level(&self) -> u32 {
        self.level as u32 + 1
    }

    pub fn level_spec(&self) -> LevelSpec {
        LEVELS[self.level]
    }

    pub fn size(&self) -> u32 {
        self.level_spec().size
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn expected_number(&self) -> u32 {
        self.expected
    }

    /// Cell values in display order
    pub fn grid(&self) -> &[u32] {
        &self.grid
    }

    /// Whether a number has already been found this level
    pub fn is_cleared(&self, number: u32) -> bool {
        (1..self.expected).contains(&number)
    }

    pub fn time_left_ms(&self) -> u32 {
        self.time_left_ms
    }

    /// Remaining whole seconds as the HUD counts them
    pub fn time_left_secs(&self) -> u32 {
        self.time_left_ms.div_ceil(1000)
    }
}
