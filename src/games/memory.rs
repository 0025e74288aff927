//! Memory match card game
//!
//! A board of face-down tile pairs played against a two minute countdown.
//! Flipping two equal faces locks them in; the win/timeout outcome is
//! decided the instant the second tile turns, never by the reveal delay.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

/// Distinct faces in the standard deck (two tiles each)
pub const DEFAULT_PAIRS: usize = 10;

/// Countdown for a full session
pub const TIME_LIMIT_MS: u32 = 120_000;

/// How long the board stays locked after a second flip
pub const REVEAL_DELAY_MS: u32 = 800;

/// Opaque artwork identifier. The engine only compares these for
/// equality; the host page maps them to images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceId(pub u16);

/// Current phase of a memory session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryPhase {
    /// Constructed, deck not yet shuffled
    Idle,
    /// Board live, no tile face up
    Ready,
    /// One tile face up, waiting for its candidate pair
    OneFlipped,
    /// Second tile flipped; input ignored until the reveal lock expires
    Resolving,
    /// Every pair matched
    Won,
    /// Countdown hit zero first
    TimedOut,
}

impl MemoryPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryPhase::Idle => "Idle",
            MemoryPhase::Ready => "Ready",
            MemoryPhase::OneFlipped => "OneFlipped",
            MemoryPhase::Resolving => "Resolving",
            MemoryPhase::Won => "Won",
            MemoryPhase::TimedOut => "TimedOut",
        }
    }
}

/// A single card on the board
#[derive(Debug, Clone)]
struct Tile {
    face: FaceId,
    matched: bool,
}

/// Memory match engine. One instance owns one board; `new_game`
/// replaces the session wholesale.
#[derive(Debug, Clone)]
pub struct MemoryGame {
    seed: u64,
    rng: Pcg32,
    deck: Vec<Tile>,
    /// Face-up unmatched tile indices, at most two
    revealed: Vec<usize>,
    phase: MemoryPhase,
    moves: u32,
    time_left_ms: u32,
    /// Reveal lock countdown, nonzero only while resolving
    lock_ms: u32,
}

impl MemoryGame {
    /// Standard board with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_pairs(seed, DEFAULT_PAIRS)
    }

    /// Board with a custom pair count (small boards for tests)
    pub fn with_pairs(seed: u64, pairs: usize) -> Self {
        let deck = (0..pairs)
            .flat_map(|face| {
                let face = FaceId(face as u16);
                [Tile { face, matched: false }, Tile { face, matched: false }]
            })
            .collect();

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            deck,
            revealed: Vec::new(),
            phase: MemoryPhase::Idle,
            moves: 0,
            time_left_ms: TIME_LIMIT_MS,
            lock_ms: 0,
        }
    }

    /// Reshuffle the deck and reset the session. Callable from any phase.
    pub fn new_game(&mut self) {
        for tile in &mut self.deck {
            tile.matched = false;
        }
        self.deck.shuffle(&mut self.rng);
        self.revealed.clear();
        self.moves = 0;
        self.time_left_ms = TIME_LIMIT_MS;
        self.lock_ms = 0;
        self.phase = MemoryPhase::Ready;
    }

    /// Turn a tile face up. Invalid flips (wrong phase, out of range,
    /// already face up or matched) are silently ignored.
    pub fn flip(&mut self, index: usize) {
        match self.phase {
            MemoryPhase::Ready | MemoryPhase::OneFlipped => {}
            _ => return,
        }
        if index >= self.deck.len() || self.deck[index].matched || self.revealed.contains(&index) {
            return;
        }

        self.revealed.push(index);
        self.moves += 1;

        if self.revealed.len() == 2 {
            self.resolve_pair();
        } else {
            self.phase = MemoryPhase::OneFlipped;
        }
    }

    /// Decide the pair outcome immediately. The reveal lock that follows
    /// only gates input; it never changes what was decided here.
    fn resolve_pair(&mut self) {
        let (a, b) = (self.revealed[0], self.revealed[1]);
        if self.deck[a].face == self.deck[b].face {
            self.deck[a].matched = true;
            self.deck[b].matched = true;
            self.revealed.clear();
            if self.deck.iter().all(|t| t.matched) {
                self.phase = MemoryPhase::Won;
                return;
            }
        }
        self.phase = MemoryPhase::Resolving;
        self.lock_ms = REVEAL_DELAY_MS;
    }

    /// Advance the countdown and the reveal lock by `elapsed_ms`.
    /// No-op in `Idle` and in terminal phases, so the clock freezes
    /// the moment a session is won.
    pub fn tick(&mut self, elapsed_ms: u32) {
        match self.phase {
            MemoryPhase::Idle | MemoryPhase::Won | MemoryPhase::TimedOut => return,
            _ => {}
        }

        if elapsed_ms >= self.time_left_ms {
            self.time_left_ms = 0;
            self.phase = MemoryPhase::TimedOut;
            return;
        }
        self.time_left_ms -= elapsed_ms;

        if self.phase == MemoryPhase::Resolving {
            if elapsed_ms >= self.lock_ms {
                self.lock_ms = 0;
                self.revealed.clear();
                self.phase = MemoryPhase::Ready;
            } else {
                self.lock_ms -= elapsed_ms;
            }
        }
    }

    pub fn phase(&self) -> MemoryPhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tile_count(&self) -> usize {
        self.deck.len()
    }

    /// Accepted flips this session (counted per tile, not per pair)
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn time_left_ms(&self) -> u32 {
        self.time_left_ms
    }

    /// Remaining whole seconds as the HUD counts them; a fresh board
    /// reads the full two minutes
    pub fn time_left_secs(&self) -> u32 {
        self.time_left_ms.div_ceil(1000)
    }

    /// A tile shows its face while matched or currently revealed
    pub fn is_face_up(&self, index: usize) -> bool {
        self.deck.get(index).map(|t| t.matched).unwrap_or(false) || self.revealed.contains(&index)
    }

    pub fn is_matched(&self, index: usize) -> bool {
        self.deck.get(index).map(|t| t.matched).unwrap_or(false)
    }

    pub fn face(&self, index: usize) -> Option<FaceId> {
        self.deck.get(index).map(|t| t.face)
    }

    pub fn matched_count(&self) -> usize {
        self.deck.iter().filter(|t| t.matched).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Tile indices grouped into pairs by face
    fn pairs_by_face(game: &MemoryGame) -> Vec<(usize, usize)> {
        let mut positions: HashMap<FaceId, Vec<usize>> = HashMap::new();
        for i in 0..game.tile_count() {
            positions.entry(game.face(i).unwrap()).or_default().push(i);
        }
        positions.into_values().map(|v| (v[0], v[1])).collect()
    }

    #[test]
    fn test_new_game_deals_every_face_twice() {
        let mut game = MemoryGame::new(12345);
        game.new_game();
        assert_eq!(game.phase(), MemoryPhase::Ready);
        assert_eq!(game.tile_count(), DEFAULT_PAIRS * 2);

        let mut counts: HashMap<FaceId, usize> = HashMap::new();
        for i in 0..game.tile_count() {
            *counts.entry(game.face(i).unwrap()).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), DEFAULT_PAIRS);
        assert!(counts.values().all(|&c| c == 2));
    }

    #[test]
    fn test_matching_pair_locks_in_before_any_tick() {
        let mut game = MemoryGame::with_pairs(42, 3);
        game.new_game();
        let (a, b) = pairs_by_face(&game)[0];

        game.flip(a);
        assert_eq!(game.phase(), MemoryPhase::OneFlipped);
        game.flip(b);

        // Outcome decided at flip time, not when the lock expires
        assert!(game.is_matched(a));
        assert!(game.is_matched(b));
        assert_eq!(game.phase(), MemoryPhase::Resolving);
        assert_eq!(game.matched_count(), 2);
    }

    #[test]
    fn test_mismatch_stays_revealed_until_delay_expires() {
        let mut game = MemoryGame::with_pairs(42, 3);
        game.new_game();
        let pairs = pairs_by_face(&game);
        let (a, b) = (pairs[0].0, pairs[1].0);

        game.flip(a);
        game.flip(b);
        assert_eq!(game.phase(), MemoryPhase::Resolving);
        assert!(game.is_face_up(a));
        assert!(game.is_face_up(b));
        assert!(!game.is_matched(a));

        game.tick(REVEAL_DELAY_MS - 1);
        assert_eq!(game.phase(), MemoryPhase::Resolving);
        assert!(game.is_face_up(a));

        game.tick(1);
        assert_eq!(game.phase(), MemoryPhase::Ready);
        assert!(!game.is_face_up(a));
        assert!(!game.is_face_up(b));
    }

    #[test]
    fn test_flips_ignored_while_resolving() {
        let mut game = MemoryGame::with_pairs(42, 3);
        game.new_game();
        let pairs = pairs_by_face(&game);
        let (a, b) = (pairs[0].0, pairs[1].0);
        let c = pairs[2].0;

        game.flip(a);
        game.flip(b);
        let moves = game.moves();

        game.flip(c);
        assert_eq!(game.moves(), moves);
        assert!(!game.is_face_up(c));
    }

    #[test]
    fn test_invalid_flips_are_silent_noops() {
        let mut game = MemoryGame::with_pairs(7, 2);

        // Pre-shuffle: nothing happens
        game.flip(0);
        assert_eq!(game.phase(), MemoryPhase::Idle);
        assert_eq!(game.moves(), 0);

        game.new_game();

        // Out of range
        game.flip(99);
        assert_eq!(game.moves(), 0);

        // Same tile twice counts once
        game.flip(0);
        game.flip(0);
        assert_eq!(game.moves(), 1);
        assert_eq!(game.phase(), MemoryPhase::OneFlipped);
    }

    #[test]
    fn test_matched_tiles_cannot_be_reflipped() {
        let mut game = MemoryGame::with_pairs(42, 2);
        game.new_game();
        let (a, b) = pairs_by_face(&game)[0];

        game.flip(a);
        game.flip(b);
        game.tick(REVEAL_DELAY_MS);
        assert_eq!(game.phase(), MemoryPhase::Ready);

        let moves = game.moves();
        game.flip(a);
        assert_eq!(game.moves(), moves);
        assert_eq!(game.phase(), MemoryPhase::Ready);
    }

    #[test]
    fn test_final_match_wins_instantly() {
        let mut game = MemoryGame::with_pairs(9, 1);
        game.new_game();

        game.flip(0);
        game.flip(1);
        assert_eq!(game.phase(), MemoryPhase::Won);
        assert_eq!(game.matched_count(), 2);
    }

    #[test]
    fn test_full_board_win_within_the_countdown() {
        let mut game = MemoryGame::new(2024);
        game.new_game();
        for (a, b) in pairs_by_face(&game) {
            game.flip(a);
            game.flip(b);
            game.tick(REVEAL_DELAY_MS);
        }

        assert_eq!(game.phase(), MemoryPhase::Won);
        assert_eq!(game.moves(), DEFAULT_PAIRS as u32 * 2);
        assert!(game.time_left_ms() > 0);
    }

    #[test]
    fn test_win_freezes_the_countdown() {
        let mut game = MemoryGame::with_pairs(9, 1);
        game.new_game();
        game.tick(5_000);
        game.flip(0);
        game.flip(1);
        assert_eq!(game.phase(), MemoryPhase::Won);

        let left = game.time_left_ms();
        game.tick(10 * TIME_LIMIT_MS);
        assert_eq!(game.phase(), MemoryPhase::Won);
        assert_eq!(game.time_left_ms(), left);
    }

    #[test]
    fn test_timeout_fires_even_mid_resolve() {
        let mut game = MemoryGame::with_pairs(42, 3);
        game.new_game();
        let pairs = pairs_by_face(&game);
        game.flip(pairs[0].0);
        game.flip(pairs[1].0);
        assert_eq!(game.phase(), MemoryPhase::Resolving);

        game.tick(TIME_LIMIT_MS);
        assert_eq!(game.phase(), MemoryPhase::TimedOut);
        assert_eq!(game.time_left_secs(), 0);

        // Terminal: flips and further time are ignored
        game.flip(pairs[2].0);
        game.tick(1_000);
        assert_eq!(game.phase(), MemoryPhase::TimedOut);
    }

    #[test]
    fn test_new_game_resets_everything() {
        let mut game = MemoryGame::with_pairs(42, 3);
        game.new_game();
        let (a, b) = pairs_by_face(&game)[0];
        game.flip(a);
        game.flip(b);
        game.tick(30_000);

        game.new_game();
        assert_eq!(game.phase(), MemoryPhase::Ready);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.matched_count(), 0);
        assert_eq!(game.time_left_secs(), TIME_LIMIT_MS / 1000);
        assert!((0..game.tile_count()).all(|i| !game.is_face_up(i)));
    }

    #[test]
    fn test_new_game_escapes_timeout() {
        let mut game = MemoryGame::with_pairs(42, 2);
        game.new_game();
        game.tick(TIME_LIMIT_MS);
        assert_eq!(game.phase(), MemoryPhase::TimedOut);

        game.new_game();
        assert_eq!(game.phase(), MemoryPhase::Ready);
        game.flip(0);
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn test_countdown_display_rounds_up() {
        let mut game = MemoryGame::new(1);
        game.new_game();
        assert_eq!(game.time_left_secs(), 120);
        game.tick(500);
        assert_eq!(game.time_left_secs(), 120);
        game.tick(500);
        assert_eq!(game.time_left_secs(), 119);
    }

    #[test]
    fn test_same_seed_same_deal() {
        let mut a = MemoryGame::new(777);
        let mut b = MemoryGame::new(777);
        a.new_game();
        b.new_game();
        for i in 0..a.tile_count() {
            assert_eq!(a.face(i), b.face(i));
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_deck_always_paired(seed in any::<u64>(), pairs in 1usize..8) {
                let mut game = MemoryGame::with_pairs(seed, pairs);
                game.new_game();

                let mut counts: HashMap<FaceId, usize> = HashMap::new();
                for i in 0..game.tile_count() {
                    *counts.entry(game.face(i).unwrap()).or_insert(0) += 1;
                }
                prop_assert_eq!(counts.len(), pairs);
                prop_assert!(counts.values().all(|&c| c == 2));
            }

            #[test]
            fn test_matched_count_is_monotonic(seed in any::<u64>(), flips in prop::collection::vec(0usize..6, 0..24)) {
                let mut game = MemoryGame::with_pairs(seed, 3);
                game.new_game();

                let mut last = 0;
                for index in flips {
                    game.flip(index);
                    game.tick(REVEAL_DELAY_MS);
                    let now = game.matched_count();
                    prop_assert!(now >= last);
                    // A full board and a won game are the same thing
                    prop_assert_eq!(now == game.tile_count(), game.phase() == MemoryPhase::Won);
                    last = now;
                }
            }
        }
    }
}
