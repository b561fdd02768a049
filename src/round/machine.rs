//! The round state machine.
//!
//! One `RoundMachine` lives for exactly one round. It never sleeps: each
//! delay is a [`RoundStep`] queued on the session's timeline, and the
//! session feeds the step back through [`RoundMachine::on_wake`] once it
//! has confirmed the step's epoch is still live. Player input arrives
//! through [`RoundMachine::choose`].

use tracing::{debug, info};

use crate::core::{GameRng, Level, Pacing, SlotId, SwapPair};
use crate::error::ConfigError;
use crate::events::{Cue, EventSink, GameEvent};
use crate::session::Wake;
use crate::shuffle::{RandomSwapGenerator, ShuffleState, SwapSequence};
use crate::timeline::{EpochToken, Timeline};

use super::{Outcome, RoundPhase, RoundProgress, RoundStep};

/// Everything a round needs from its session while handling one event.
pub struct RoundContext<'a, S: EventSink + ?Sized> {
    pub timeline: &'a mut Timeline<Wake>,
    pub rng: &'a mut GameRng,
    pub sink: &'a mut S,
    pub pacing: &'a Pacing,
}

/// State of the round in progress.
#[derive(Clone, Debug)]
pub struct RoundMachine {
    level: Level,
    stage_count: u8,
    token: EpochToken,
    phase: RoundPhase,
    generator: RandomSwapGenerator,
    shuffle: ShuffleState,
    swaps: SwapSequence,
    selection_locked: bool,
    animating: bool,
    ball_visible: bool,
    chosen: Option<SlotId>,
}

impl RoundMachine {
    /// Start a round: fresh arrangement, ball placed uniformly at random
    /// and revealed, cups lifted. Schedules the end of the reveal dwell.
    pub fn start<S: EventSink + ?Sized>(
        level: Level,
        stage_count: u8,
        token: EpochToken,
        ctx: &mut RoundContext<'_, S>,
    ) -> Result<Self, ConfigError> {
        let generator = RandomSwapGenerator::new(level.cup_count)?;
        let ball_slot = SlotId::new(ctx.rng.gen_index(level.cup_count as usize) as u8);

        info!(
            stage = level.stage,
            cups = level.cup_count,
            swaps = level.swap_count,
            %token,
            "Round starting"
        );

        let mut round = Self {
            level,
            stage_count,
            token,
            phase: RoundPhase::Revealing,
            generator,
            shuffle: ShuffleState::new(level.cup_count, ball_slot),
            swaps: SwapSequence::new(),
            selection_locked: false,
            animating: false,
            ball_visible: false,
            chosen: None,
        };

        ctx.sink.emit(GameEvent::RoundStarted {
            stage: level.stage,
            stage_count,
            cup_count: level.cup_count,
        });
        round.lock(ctx);
        round.show_ball(ctx);
        ctx.sink.emit(GameEvent::CupsLifted {
            lifted: true,
            duration_ms: ctx.pacing.reveal_lift_ms,
        });
        round.schedule(ctx.pacing.reveal_dwell_ms, RoundStep::EndReveal, ctx);

        Ok(round)
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Total stages in the run this round belongs to.
    #[must_use]
    pub fn stage_count(&self) -> u8 {
        self.stage_count
    }

    #[must_use]
    pub fn token(&self) -> EpochToken {
        self.token
    }

    /// Ground-truth ball slot. Not something to show the player.
    #[must_use]
    pub fn ball_slot(&self) -> SlotId {
        self.shuffle.ball_slot()
    }

    #[must_use]
    pub fn shuffle(&self) -> &ShuffleState {
        &self.shuffle
    }

    /// Swaps drawn for this round, in application order.
    #[must_use]
    pub fn swaps(&self) -> &[SwapPair] {
        &self.swaps
    }

    #[must_use]
    pub fn selection_locked(&self) -> bool {
        self.selection_locked
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    #[must_use]
    pub fn ball_visible(&self) -> bool {
        self.ball_visible
    }

    /// The slot the player picked, once they have.
    #[must_use]
    pub fn chosen(&self) -> Option<SlotId> {
        self.chosen
    }

    /// Would a pick be accepted right now?
    #[must_use]
    pub fn accepts_choice(&self) -> bool {
        self.phase == RoundPhase::AwaitingSelection && !self.selection_locked && !self.animating
    }

    /// Resume after a delay. The caller has already checked the epoch.
    pub fn on_wake<S: EventSink + ?Sized>(
        &mut self,
        step: RoundStep,
        ctx: &mut RoundContext<'_, S>,
    ) -> RoundProgress {
        debug!(?step, phase = ?self.phase, "Round continuation");

        match step {
            RoundStep::EndReveal => {
                ctx.sink.emit(GameEvent::CupsLifted {
                    lifted: false,
                    duration_ms: ctx.pacing.reveal_lower_ms,
                });
                self.hide_ball(ctx);
                self.schedule(ctx.pacing.reveal_settle_ms, RoundStep::BeginShuffle, ctx);
            }
            RoundStep::BeginShuffle => {
                self.animating = true;
                self.lock(ctx);
                self.swaps = self.generator.sequence(ctx.rng, self.level.swap_count);
                self.perform_swap(0, ctx);
            }
            RoundStep::SwapSettled { step } => {
                let pause = ctx.pacing.step_pause_ms(self.level.swap_speed_ms);
                self.schedule(pause, RoundStep::NextSwap { step: step + 1 }, ctx);
            }
            RoundStep::NextSwap { step } => self.perform_swap(step, ctx),
            RoundStep::OutcomeCue => {
                let cue = match self.phase {
                    RoundPhase::Resolving(Outcome::Correct) => Cue::Success,
                    _ => Cue::Fail,
                };
                ctx.sink.emit(GameEvent::Cue(cue));
                self.schedule(ctx.pacing.resolve_cue_ms, RoundStep::LowerCups, ctx);
            }
            RoundStep::LowerCups => {
                ctx.sink.emit(GameEvent::CupsLifted {
                    lifted: false,
                    duration_ms: ctx.pacing.resolve_drop_ms,
                });
                self.schedule(ctx.pacing.resolve_lower_ms, RoundStep::Finish, ctx);
            }
            RoundStep::Finish => {
                self.hide_ball(ctx);
                return match self.phase {
                    RoundPhase::Resolving(Outcome::Correct) => {
                        self.phase = RoundPhase::Advancing;
                        RoundProgress::Advance
                    }
                    _ => {
                        self.phase = RoundPhase::Ending;
                        RoundProgress::End
                    }
                };
            }
        }

        RoundProgress::Pending
    }

    /// Player picks `slot`.
    ///
    /// Ignored unless the round is awaiting a selection with input
    /// unlocked and `slot` is on the table. An accepted pick locks
    /// selection immediately, so repeats are no-ops. Returns whether the
    /// pick was accepted.
    pub fn choose<S: EventSink + ?Sized>(
        &mut self,
        slot: SlotId,
        ctx: &mut RoundContext<'_, S>,
    ) -> bool {
        if !self.accepts_choice() {
            debug!(%slot, phase = ?self.phase, "Pick ignored: selection locked");
            return false;
        }
        if !self.shuffle.contains(slot) {
            debug!(%slot, cups = self.level.cup_count, "Pick ignored: no such slot");
            return false;
        }

        self.lock(ctx);
        self.chosen = Some(slot);

        let outcome = if slot == self.shuffle.ball_slot() {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        self.phase = RoundPhase::Resolving(outcome);
        info!(stage = self.level.stage, %slot, ball = %self.shuffle.ball_slot(), ?outcome, "Pick resolved");

        self.show_ball(ctx);
        ctx.sink.emit(GameEvent::CupsLifted {
            lifted: true,
            duration_ms: ctx.pacing.resolve_lift_ms,
        });
        self.schedule(ctx.pacing.resolve_reveal_ms, RoundStep::OutcomeCue, ctx);
        true
    }

    fn perform_swap<S: EventSink + ?Sized>(&mut self, step: u32, ctx: &mut RoundContext<'_, S>) {
        let Some(&swap) = self.swaps.get(step as usize) else {
            self.finish_shuffle(ctx);
            return;
        };

        self.phase = RoundPhase::Shuffling { step };
        self.shuffle.apply_swap(swap);
        ctx.sink.emit(GameEvent::Swapped {
            a: swap.a,
            b: swap.b,
            duration_ms: self.level.swap_speed_ms,
        });
        if !swap.is_identity() {
            ctx.sink.emit(GameEvent::Cue(Cue::ShuffleStep));
        }
        self.schedule(self.level.swap_speed_ms, RoundStep::SwapSettled { step }, ctx);
    }

    fn finish_shuffle<S: EventSink + ?Sized>(&mut self, ctx: &mut RoundContext<'_, S>) {
        self.animating = false;
        self.phase = RoundPhase::AwaitingSelection;
        self.unlock(ctx);
        debug!(stage = self.level.stage, swaps = self.swaps.len(), "Awaiting selection");
    }

    fn schedule<S: EventSink + ?Sized>(
        &self,
        delay_ms: u64,
        step: RoundStep,
        ctx: &mut RoundContext<'_, S>,
    ) {
        ctx.timeline.schedule(delay_ms, self.token, step.into());
    }

    fn lock<S: EventSink + ?Sized>(&mut self, ctx: &mut RoundContext<'_, S>) {
        if !self.selection_locked {
            self.selection_locked = true;
            ctx.sink.emit(GameEvent::SelectionLocked);
        }
    }

    fn unlock<S: EventSink + ?Sized>(&mut self, ctx: &mut RoundContext<'_, S>) {
        if self.selection_locked {
            self.selection_locked = false;
            ctx.sink.emit(GameEvent::SelectionUnlocked);
        }
    }

    fn show_ball<S: EventSink + ?Sized>(&mut self, ctx: &mut RoundContext<'_, S>) {
        self.ball_visible = true;
        ctx.sink.emit(GameEvent::BallShown {
            slot: self.shuffle.ball_slot(),
        });
    }

    fn hide_ball<S: EventSink + ?Sized>(&mut self, ctx: &mut RoundContext<'_, S>) {
        self.ball_visible = false;
        ctx.sink.emit(GameEvent::BallHidden);
    }
}
