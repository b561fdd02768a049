//! Top-level game controller.
//!
//! `GameSession` owns the epoch counter, the timeline, the RNG, and the
//! one active round. The host feeds it time (`advance`, `advance_by`,
//! `run_until_idle`) and player input (`choose`, `start`,
//! `reset_to_menu`). Every timed continuation is checked against the
//! live epoch before it touches anything.

use tracing::{debug, error, info, trace, warn};

use crate::core::{GameConfig, GameRng, SlotId};
use crate::events::{EventSink, GameEvent};
use crate::round::{RoundContext, RoundMachine, RoundProgress, RoundStep};
use crate::timeline::{EpochToken, Scheduled, SessionEpoch, Timeline};
use crate::winners::WinnerStore;

use super::PlayerName;

/// A continuation queued on the session timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wake {
    /// Resume the active round.
    Round(RoundStep),
    /// Inter-round pause elapsed: start level `level_index`.
    StartRound { level_index: usize },
    /// Menu delay after a reset elapsed.
    ShowMenu,
}

impl From<RoundStep> for Wake {
    fn from(step: RoundStep) -> Self {
        Wake::Round(step)
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunOutcome {
    Won,
    Lost,
}

/// Coarse session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// At (or returning to) the menu. No run in progress.
    Menu,
    /// A run is in progress.
    Playing,
    /// The run ended; waiting for a reset or a new start.
    Finished(RunOutcome),
}

/// Game controller for one player at a time.
pub struct GameSession<S: EventSink, W: WinnerStore> {
    config: GameConfig,
    epoch: SessionEpoch,
    timeline: Timeline<Wake>,
    rng: GameRng,
    sink: S,
    store: W,
    player: Option<PlayerName>,
    level_index: usize,
    round: Option<RoundMachine>,
    status: SessionStatus,
}

impl<S: EventSink, W: WinnerStore> GameSession<S, W> {
    /// Create an idle session.
    pub fn new(config: GameConfig, sink: S, store: W) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self {
            config,
            epoch: SessionEpoch::new(),
            timeline: Timeline::new(),
            rng,
            sink,
            store,
            player: None,
            level_index: 0,
            round: None,
            status: SessionStatus::Menu,
        }
    }

    /// Begin a new run from the first level.
    ///
    /// Supersedes anything in flight, including a previous run or a
    /// pending return to the menu.
    pub fn start(&mut self, raw_name: &str) {
        let player = PlayerName::normalize(raw_name);
        let token = self.epoch.begin_new_epoch();
        info!(%player, %token, "Run starting");

        self.player = Some(player);
        self.level_index = 0;
        self.round = None;
        self.status = SessionStatus::Playing;
        self.start_round(0, token);
    }

    /// Abandon whatever is in flight and return to the menu.
    ///
    /// The menu appears after the configured delay.
    pub fn reset_to_menu(&mut self) {
        let token = self.epoch.begin_new_epoch();
        debug!(%token, "Reset to menu");

        self.level_index = 0;
        self.round = None;
        self.status = SessionStatus::Menu;
        self.sink.emit(GameEvent::SelectionLocked);
        self.sink.emit(GameEvent::BallHidden);
        self.sink.emit(GameEvent::HudHidden);
        self.timeline
            .schedule(self.config.pacing.menu_delay_ms, token, Wake::ShowMenu);
    }

    /// Player picks `slot`. Returns whether the pick was accepted.
    ///
    /// Picks outside a round's selection window, repeated picks, and
    /// slots not on the table are ignored.
    pub fn choose(&mut self, slot: SlotId) -> bool {
        let Some(round) = self.round.as_mut() else {
            debug!(%slot, "Pick ignored: no round");
            return false;
        };
        let mut ctx = RoundContext {
            timeline: &mut self.timeline,
            rng: &mut self.rng,
            sink: &mut self.sink,
            pacing: &self.config.pacing,
        };
        round.choose(slot, &mut ctx)
    }

    /// Dispatch the next pending continuation, moving the clock to it.
    ///
    /// Returns `false` when nothing is pending.
    pub fn advance(&mut self) -> bool {
        match self.timeline.pop_next() {
            Some(scheduled) => {
                self.dispatch(scheduled);
                true
            }
            None => false,
        }
    }

    /// Let `ms` of virtual time pass, dispatching everything due.
    pub fn advance_by(&mut self, ms: u64) {
        let until = self.timeline.now_ms().saturating_add(ms);
        while let Some(scheduled) = self.timeline.pop_due(until) {
            self.dispatch(scheduled);
        }
        self.timeline.advance_clock_to(until);
    }

    /// Dispatch until nothing is pending: the round is awaiting a pick,
    /// the run has ended, or the menu is showing.
    pub fn run_until_idle(&mut self) {
        while self.advance() {}
    }

    fn dispatch(&mut self, scheduled: Scheduled<Wake>) {
        if !self.epoch.is_current(scheduled.token) {
            trace!(
                token = %scheduled.token,
                live = %self.epoch.current(),
                wake = ?scheduled.wake,
                "Dropping stale continuation"
            );
            return;
        }

        match scheduled.wake {
            Wake::Round(step) => {
                let Some(round) = self.round.as_mut() else {
                    return;
                };
                let mut ctx = RoundContext {
                    timeline: &mut self.timeline,
                    rng: &mut self.rng,
                    sink: &mut self.sink,
                    pacing: &self.config.pacing,
                };
                let progress = round.on_wake(step, &mut ctx);
                match progress {
                    RoundProgress::Pending => {}
                    RoundProgress::Advance => self.on_round_advance(scheduled.token),
                    RoundProgress::End => self.finish_run(RunOutcome::Lost),
                }
            }
            Wake::StartRound { level_index } => {
                let token = self.epoch.begin_new_epoch();
                self.start_round(level_index, token);
            }
            Wake::ShowMenu => self.sink.emit(GameEvent::MenuShown),
        }
    }

    fn start_round(&mut self, level_index: usize, token: EpochToken) {
        let Some(&level) = self.config.levels.get(level_index) else {
            error!(level_index, "No such level");
            self.abort_to_menu(token);
            return;
        };
        let stage_count = u8::try_from(self.config.levels.len()).unwrap_or(u8::MAX);

        let mut ctx = RoundContext {
            timeline: &mut self.timeline,
            rng: &mut self.rng,
            sink: &mut self.sink,
            pacing: &self.config.pacing,
        };
        let started = RoundMachine::start(level, stage_count, token, &mut ctx);
        match started {
            Ok(round) => self.round = Some(round),
            Err(e) => {
                error!(stage = level.stage, error = %e, "Level cannot be played");
                self.abort_to_menu(token);
            }
        }
    }

    fn abort_to_menu(&mut self, token: EpochToken) {
        self.round = None;
        self.status = SessionStatus::Menu;
        self.sink.emit(GameEvent::HudHidden);
        self.timeline
            .schedule(self.config.pacing.menu_delay_ms, token, Wake::ShowMenu);
    }

    fn on_round_advance(&mut self, token: EpochToken) {
        if self.config.levels.is_last(self.level_index) {
            self.finish_run(RunOutcome::Won);
            return;
        }
        self.level_index += 1;
        debug!(level_index = self.level_index, "Advancing to next stage");
        self.timeline.schedule(
            self.config.pacing.inter_round_ms,
            token,
            Wake::StartRound {
                level_index: self.level_index,
            },
        );
    }

    fn finish_run(&mut self, outcome: RunOutcome) {
        self.status = SessionStatus::Finished(outcome);
        let player = self.player.clone().unwrap_or_else(|| PlayerName::normalize(""));
        info!(%player, stage = self.level_index + 1, ?outcome, "Run finished");

        match outcome {
            RunOutcome::Won => {
                if let Err(e) = self.store.record_win(player.as_str()) {
                    warn!(error = %e, "Failed to record win");
                }
                self.sink.emit(GameEvent::Won {
                    player: player.to_string(),
                });
            }
            RunOutcome::Lost => self.sink.emit(GameEvent::Lost),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// 0-based index of the current level.
    #[must_use]
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    #[must_use]
    pub fn player(&self) -> Option<&PlayerName> {
        self.player.as_ref()
    }

    /// The active round, if one has started since the last reset.
    #[must_use]
    pub fn round(&self) -> Option<&RoundMachine> {
        self.round.as_ref()
    }

    /// Input is locked whenever no round is accepting a pick.
    #[must_use]
    pub fn selection_locked(&self) -> bool {
        self.round.as_ref().map_or(true, RoundMachine::selection_locked)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.round.as_ref().is_some_and(RoundMachine::is_animating)
    }

    #[must_use]
    pub fn ball_visible(&self) -> bool {
        self.round.as_ref().is_some_and(RoundMachine::ball_visible)
    }

    #[must_use]
    pub fn accepts_choice(&self) -> bool {
        self.round.as_ref().is_some_and(RoundMachine::accepts_choice)
    }

    #[must_use]
    pub fn epoch(&self) -> EpochToken {
        self.epoch.current()
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.timeline.now_ms()
    }

    /// Virtual time of the next pending continuation.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.timeline.next_due()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[must_use]
    pub fn store(&self) -> &W {
        &self.store
    }
}
