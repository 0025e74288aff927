//! Mind Gym entry point
//!
//! The browser build is driven entirely through the `mind_gym::web`
//! bindings; its module initializer installs the panic and console log
//! hooks. Native builds have no UI and run a scripted pass over both
//! engines instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();
    log::info!("Mind Gym (native) starting...");
    log::info!("Native mode has no UI - run with `trunk serve` for the web version");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64);
    log::info!("Demo seed: {}", seed);

    println!("\nRunning memory match demo...");
    demo_memory(seed);

    println!("\nRunning Schulte table demo...");
    demo_schulte(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM initialization happens in mind_gym::web, this is just to
    // satisfy the compiler
}

/// Solve a full board by peeking at the faces
#[cfg(not(target_arch = "wasm32"))]
fn demo_memory(seed: u64) {
    use mind_gym::format_clock;
    use mind_gym::games::memory::{FaceId, MemoryGame, MemoryPhase, REVEAL_DELAY_MS};
    use std::collections::HashMap;

    let mut game = MemoryGame::new(seed);
    game.new_game();

    let mut positions: HashMap<FaceId, Vec<usize>> = HashMap::new();
    for i in 0..game.tile_count() {
        if let Some(face) = game.face(i) {
            positions.entry(face).or_default().push(i);
        }
    }

    for indices in positions.values() {
        game.flip(indices[0]);
        game.flip(indices[1]);
        game.tick(REVEAL_DELAY_MS);
    }

    assert_eq!(game.phase(), MemoryPhase::Won);
    println!(
        "✓ Solved {} tiles in {} moves with {} on the clock",
        game.tile_count(),
        game.moves(),
        format_clock(game.time_left_secs())
    );
}

/// Clear every level in order and print the recorded session line
#[cfg(not(target_arch = "wasm32"))]
fn demo_schulte(seed: u64) {
    use mind_gym::games::schulte::{LEVELS, SchulteGame, SchultePhase};
    use mind_gym::history::{SessionHistory, SessionResult};

    let mut game = SchulteGame::new(seed);
    game.start();

    for level in &LEVELS {
        for number in 1..=level.size * level.size {
            game.click(number);
        }
    }

    assert_eq!(game.phase(), SchultePhase::Won);

    let mut history = SessionHistory::new();
    if let Some(outcome) = game.take_result() {
        history.push(SessionResult::from_outcome(outcome));
    }
    for entry in &history.entries {
        println!("✓ {}", entry);
    }
}
