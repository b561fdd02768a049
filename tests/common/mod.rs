//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

use cup_shuffle::{
    GameConfig, GameEvent, GameSession, MemoryWinnerStore, SessionStatus, SlotId, SwapPair,
};

static INIT: Once = Once::new();

/// Initialize test logging once. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub type TestSession = GameSession<Vec<GameEvent>, MemoryWinnerStore>;

/// A session with the standard levels and pacing and a fixed seed.
pub fn session(seed: u64) -> TestSession {
    init_logging();
    GameSession::new(
        GameConfig::default().with_seed(seed),
        Vec::new(),
        MemoryWinnerStore::new(),
    )
}

/// Run until the active round awaits a pick. Panics if the run ends first.
pub fn play_to_selection(session: &mut TestSession) {
    session.run_until_idle();
    assert!(
        session.accepts_choice(),
        "expected selection window, status {:?}",
        session.status()
    );
}

/// Pick the ball's slot in every round until the run ends.
pub fn play_perfect_run(session: &mut TestSession) {
    loop {
        session.run_until_idle();
        if session.status() != SessionStatus::Playing {
            return;
        }
        let ball = session.round().map(|r| r.ball_slot()).expect("active round");
        assert!(session.choose(ball));
    }
}

/// A slot other than the ball's.
pub fn wrong_slot(session: &TestSession) -> SlotId {
    let round = session.round().expect("active round");
    let cups = round.level().cup_count;
    SlotId::new((round.ball_slot().0 + 1) % cups)
}

/// Swaps reported to the presentation layer, in order.
pub fn swap_events(events: &[GameEvent]) -> Vec<SwapPair> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Swapped { a, b, .. } => Some(SwapPair::new(*a, *b)),
            _ => None,
        })
        .collect()
}

pub fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}
