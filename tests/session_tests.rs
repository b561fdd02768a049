//! Session-level flow tests: level progression, outcomes, winner records.

mod common;

use common::{count, play_perfect_run, play_to_selection, session, swap_events, wrong_slot};
use cup_shuffle::{
    Cue, GameConfig, GameEvent, GameSession, Level, LevelTable, MemoryWinnerStore, Outcome,
    Pacing, RoundPhase, RunOutcome, SessionStatus, SlotId, WinnerStore,
};

// =============================================================================
// Run Outcomes
// =============================================================================

#[test]
fn test_perfect_run_wins() {
    let mut s = session(42);
    s.start("Mina");
    play_perfect_run(&mut s);

    assert_eq!(s.status(), SessionStatus::Finished(RunOutcome::Won));
    assert_eq!(s.level_index(), 4, "level index stays on the last stage");

    let events = s.sink();
    assert_eq!(count(events, |e| matches!(e, GameEvent::RoundStarted { .. })), 5);
    assert_eq!(count(events, |e| matches!(e, GameEvent::Won { .. })), 1);
    assert_eq!(count(events, |e| *e == GameEvent::Lost), 0);
    assert_eq!(events.last(), Some(&GameEvent::Won { player: "Mina".into() }));

    let board = s.store().load();
    assert_eq!(board.len(), 1);
    assert_eq!(board.records()[0].name, "Mina");
}

#[test]
fn test_wrong_pick_on_first_stage_loses() {
    let mut s = session(7);
    s.start("Bo");
    play_to_selection(&mut s);

    let wrong = wrong_slot(&s);
    assert!(s.choose(wrong));
    assert_eq!(
        s.round().map(|r| r.phase()),
        Some(RoundPhase::Resolving(Outcome::Incorrect))
    );

    s.run_until_idle();
    assert_eq!(s.status(), SessionStatus::Finished(RunOutcome::Lost));
    assert_eq!(s.sink().last(), Some(&GameEvent::Lost));
    assert_eq!(count(s.sink(), |e| matches!(e, GameEvent::Won { .. })), 0);
    assert!(s.store().load().is_empty());
}

#[test]
fn test_wrong_pick_on_third_stage_loses() {
    let mut s = session(11);
    s.start("Cy");

    for _ in 0..2 {
        play_to_selection(&mut s);
        let ball = s.round().unwrap().ball_slot();
        assert!(s.choose(ball));
    }
    play_to_selection(&mut s);
    assert_eq!(s.level_index(), 2);
    assert_eq!(s.round().unwrap().level().stage, 3);

    let wrong = wrong_slot(&s);
    s.choose(wrong);
    s.run_until_idle();

    assert_eq!(s.status(), SessionStatus::Finished(RunOutcome::Lost));
    assert!(s.store().load().is_empty());
    assert_eq!(count(s.sink(), |e| *e == GameEvent::Lost), 1);
}

#[test]
fn test_outcome_matches_ball_slot() {
    for seed in 0..20 {
        let mut s = session(seed);
        s.start("p");
        play_to_selection(&mut s);

        let ball = s.round().unwrap().ball_slot();
        let pick = SlotId::new((seed % 3) as u8);
        s.choose(pick);

        let expected = if pick == ball {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        assert_eq!(
            s.round().unwrap().phase(),
            RoundPhase::Resolving(expected),
            "seed {seed}"
        );
    }
}

#[test]
fn test_finished_run_ignores_picks() {
    let mut s = session(3);
    s.start("p");
    play_to_selection(&mut s);
    let wrong = wrong_slot(&s);
    s.choose(wrong);
    s.run_until_idle();

    let before = s.sink().len();
    assert!(!s.choose(SlotId::new(0)));
    s.run_until_idle();
    assert_eq!(s.sink().len(), before);
}

// =============================================================================
// Progression
// =============================================================================

#[test]
fn test_levels_follow_table() {
    let mut s = session(5);
    s.start("p");
    play_perfect_run(&mut s);

    let rounds: Vec<_> = s
        .sink()
        .iter()
        .filter_map(|e| match e {
            GameEvent::RoundStarted { stage, stage_count, cup_count } => {
                Some((*stage, *stage_count, *cup_count))
            }
            _ => None,
        })
        .collect();
    assert_eq!(rounds, vec![(1, 5, 3), (2, 5, 3), (3, 5, 3), (4, 5, 4), (5, 5, 5)]);

    // 4 + 6 + 10 + 12 + 14 swaps
    assert_eq!(swap_events(s.sink()).len(), 46);
}

#[test]
fn test_next_round_after_inter_round_pause() {
    let mut s = session(8);
    s.start("p");
    play_to_selection(&mut s);
    let ball = s.round().unwrap().ball_slot();
    s.choose(ball);

    // 520 + 600 + 420 resolution, then 900 before the next round.
    s.advance_by(1540);
    assert_eq!(s.level_index(), 1);
    assert_eq!(s.round().unwrap().phase(), RoundPhase::Advancing);

    s.advance_by(899);
    assert_eq!(s.round().unwrap().level().stage, 1);
    s.advance_by(1);
    assert_eq!(s.round().unwrap().level().stage, 2);
    assert_eq!(s.round().unwrap().phase(), RoundPhase::Revealing);
}

#[test]
fn test_first_stage_timing() {
    let mut s = session(9);
    s.start("p");
    play_to_selection(&mut s);
    // 1100 reveal + 360 settle + 4 * (700 swap + 175 pause)
    assert_eq!(s.now_ms(), 4960);
}

#[test]
fn test_events_replay_to_ball_slot() {
    let mut s = session(21);
    s.start("p");

    for _ in 0..5 {
        let mark = s.sink().len();
        s.run_until_idle();
        if s.status() != SessionStatus::Playing {
            break;
        }
        let round_events = &s.sink()[mark..];

        let mut slot = round_events
            .iter()
            .find_map(|e| match e {
                GameEvent::BallShown { slot } => Some(*slot),
                _ => None,
            })
            .or_else(|| {
                s.sink()[..mark].iter().rev().find_map(|e| match e {
                    GameEvent::BallShown { slot } => Some(*slot),
                    _ => None,
                })
            })
            .unwrap();
        for swap in swap_events(round_events) {
            slot = swap.follow(slot);
        }
        assert_eq!(slot, s.round().unwrap().ball_slot());

        let ball = s.round().unwrap().ball_slot();
        s.choose(ball);
    }
}

#[test]
fn test_custom_two_stage_table() {
    let levels = LevelTable::new(vec![Level::new(1, 2, 1, 100), Level::new(2, 2, 2, 100)]).unwrap();
    let mut s = GameSession::new(
        GameConfig::default()
            .with_levels(levels)
            .with_pacing(Pacing::instant())
            .with_seed(1),
        Vec::new(),
        MemoryWinnerStore::new(),
    );
    s.start("");
    play_perfect_run(&mut s);

    assert_eq!(s.status(), SessionStatus::Finished(RunOutcome::Won));
    assert_eq!(s.level_index(), 1);
    assert_eq!(
        s.sink().last(),
        Some(&GameEvent::Won { player: "High Roller".into() })
    );
}

#[test]
fn test_second_run_after_win() {
    let mut s = session(13);
    s.start("first");
    play_perfect_run(&mut s);
    s.reset_to_menu();
    s.run_until_idle();

    s.start("second");
    assert_eq!(s.level_index(), 0);
    assert_eq!(s.status(), SessionStatus::Playing);
    play_perfect_run(&mut s);

    let names: Vec<_> = s
        .store()
        .load()
        .records()
        .iter()
        .map(|r| r.name.clone())
        .collect();
    assert_eq!(names, vec!["second", "first"]);
}

// =============================================================================
// Selection Window
// =============================================================================

#[test]
fn test_double_pick_resolves_once() {
    let mut s = session(17);
    s.start("p");
    play_to_selection(&mut s);
    let ball = s.round().unwrap().ball_slot();

    assert!(s.choose(ball));
    assert!(!s.choose(ball));
    assert!(!s.choose(wrong_slot(&s)));
    s.run_until_idle();

    assert_eq!(count(s.sink(), |e| *e == GameEvent::Cue(Cue::Success)), 1);
    assert_eq!(count(s.sink(), |e| *e == GameEvent::Cue(Cue::Fail)), 0);
}

#[test]
fn test_pick_during_shuffle_is_ignored() {
    let mut s = session(19);
    s.start("p");
    while swap_events(s.sink()).is_empty() {
        assert!(s.advance());
    }
    assert!(s.is_animating());
    assert!(s.selection_locked());

    let phase = s.round().unwrap().phase();
    let before = s.sink().len();
    assert!(!s.choose(SlotId::new(0)));
    assert_eq!(s.round().unwrap().phase(), phase);
    assert_eq!(s.round().unwrap().chosen(), None);
    assert_eq!(s.sink().len(), before);
}

#[test]
fn test_out_of_range_pick_is_ignored() {
    let mut s = session(23);
    s.start("p");
    play_to_selection(&mut s);
    assert!(!s.choose(SlotId::new(3)));
    assert!(s.accepts_choice());
}

#[test]
fn test_flags_during_round() {
    let mut s = session(29);
    s.start("p");
    assert!(s.ball_visible());
    assert!(s.selection_locked());
    assert!(!s.is_animating());

    play_to_selection(&mut s);
    assert!(!s.ball_visible());
    assert!(!s.selection_locked());
    assert!(!s.is_animating());

    let ball = s.round().unwrap().ball_slot();
    s.choose(ball);
    assert!(s.ball_visible());
    assert!(s.selection_locked());
    assert_eq!(
        s.sink().iter().rev().find(|e| matches!(e, GameEvent::BallShown { .. })),
        Some(&GameEvent::BallShown { slot: ball })
    );
}
