//! Game stage machine
//!
//! Owns the state, the RNG and the collaborators. Every operation runs to
//! completion synchronously; the only deferred event is the learning timer,
//! which the host reports back through `on_timer`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::itinerary::{generate_itinerary, tile_rng};
use super::services::{Animator, BoundingBox, Layout, Target, TimerHandle, Timers};
use super::state::{ClickOutcome, GameState, Outcome, Stage};
use crate::config::{GameConfig, validate_tile_count};
use crate::error::GameError;

pub struct Game<A: Animator, T: Timers> {
    state: GameState,
    config: GameConfig,
    rng: Pcg32,
    animator: A,
    timers: T,
}

impl<A: Animator, T: Timers> Game<A, T> {
    pub fn new(config: GameConfig, seed: u64, animator: A, timers: T) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            state: GameState::new(config.tile_count),
            config,
            rng: Pcg32::seed_from_u64(seed),
            animator,
            timers,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    /// Start (or restart) a round: send every tile on its way and arm the
    /// learning countdown. Leaves the state untouched if layout fails.
    pub fn start<L: Layout>(&mut self, layout: &L) -> Result<(), GameError> {
        let container = layout
            .measure(Target::Boundary)
            .ok_or(GameError::MissingElement(Target::Boundary))?;
        let tile = layout
            .measure(Target::Tile(1))
            .ok_or(GameError::MissingElement(Target::Tile(1)))?;
        let bounds = BoundingBox::from_measurements(container, tile);

        // Old timer must be gone before a new one is armed
        self.cancel_timer();
        self.animator.cancel_all();

        let game_seed: u64 = self.rng.random();
        for number in 1..=self.state.tile_count {
            let itinerary =
                generate_itinerary(&mut tile_rng(game_seed, number), bounds, self.config.durations);

            self.animator
                .place(number, itinerary.start.x, itinerary.start.y);
            self.animator.set_repeat(number, self.config.repeat);
            for step in &itinerary.steps {
                self.animator.enqueue(number, *step);
            }
        }

        self.state.stage = Stage::Learning;
        self.state.expected = 1;
        self.state.outcome = Outcome::Undecided;
        self.state.pending_timer = Some(self.timers.schedule(self.config.learn_delay()));

        log::info!(
            "Round started: {} tiles in {}x{}, seed {}",
            self.state.tile_count,
            bounds.width,
            bounds.height,
            game_seed
        );
        Ok(())
    }

    /// A timer fired. Only the currently pending learning timer counts.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.state.pending_timer != Some(handle) {
            log::debug!("Ignoring stale timer {:?}", handle);
            return false;
        }
        self.state.pending_timer = None;

        if self.state.stage != Stage::Learning {
            return false;
        }
        self.state.stage = Stage::Playing;
        log::info!("Learning over, numbers hidden");
        true
    }

    pub fn handle_click(&mut self, number: u32) -> ClickOutcome {
        if self.state.stage == Stage::Postgame {
            return ClickOutcome::Ignored;
        }

        let expected = self.state.expected;
        let count = self.state.tile_count;

        if number == expected && expected < count {
            self.state.expected += 1;
            log::debug!("Correct: {}", number);
            ClickOutcome::Advanced {
                next: self.state.expected,
            }
        } else if number == expected && expected == count {
            self.finish(Outcome::Passed);
            log::info!("Finished! All {} tiles in order", count);
            ClickOutcome::Passed
        } else if number > expected {
            self.finish(Outcome::Failed);
            log::info!("Wrong: clicked {} while {} was expected", number, expected);
            ClickOutcome::Failed
        } else {
            log::debug!("Repeat click on {} ignored", number);
            ClickOutcome::Ignored
        }
    }

    /// Change the tile count for the next round. Resets first since running
    /// itineraries are sized to the old count.
    pub fn change_tile_count(&mut self, count: u32) -> Result<(), GameError> {
        let count = validate_tile_count(count as i64)?;
        self.reset();
        self.animator.retain_tiles(count);
        self.state.tile_count = count;
        self.config.tile_count = count;
        log::info!("Tile count set to {}", count);
        Ok(())
    }

    /// Back to pregame from anywhere. Safe to call repeatedly.
    pub fn reset(&mut self) {
        self.cancel_timer();
        self.animator.cancel_all();

        self.state.stage = Stage::Pregame;
        self.state.outcome = Outcome::Undecided;
        self.state.expected = 1;

        log::info!("=== RESET GAME ===");
    }

    /// Suspend tile movement. The learning countdown keeps running.
    pub fn pause(&mut self) {
        self.animator.pause_all();
    }

    pub fn resume(&mut self) {
        self.animator.resume_all();
    }

    fn finish(&mut self, outcome: Outcome) {
        self.cancel_timer();
        self.animator.cancel_all();
        self.state.outcome = outcome;
        self.state.stage = Stage::Postgame;
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.state.pending_timer.take() {
            self.timers.cancel(handle);
        }
    }
}
