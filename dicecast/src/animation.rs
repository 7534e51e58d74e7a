use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::{
    animation::hook::RollHook,
    rules::dice::{DiceCount, DiceCountError, MAX_DICE, MIN_DICE, Roll},
    settings::Settings,
    statistics::{
        rarity::{Rarity, RarityEstimator},
        roller::Roller,
    },
};

pub mod hook;

pub type Timestamp = chrono::DateTime<chrono::Utc>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("invalid dice count: {0}")]
    InvalidDiceCount(#[from] DiceCountError),
    #[error("a roll is already in progress")]
    AlreadyRolling,
}

/// The settled result of a roll sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub roll: Roll,
    pub total: u32,
    pub rarity: Rarity,
    pub settled_at: Timestamp,
}

impl Outcome {
    pub fn new(roll: Roll, rarity: Rarity) -> Self {
        Self {
            total: roll.total(),
            roll,
            rarity,
            settled_at: chrono::Utc::now(),
        }
    }

    pub fn pretty_print(&self, f: &mut impl std::fmt::Write) -> std::fmt::Result {
        self.roll.pretty_print(f)?;
        write!(f, " ({} of throws)", self.rarity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Animating { dice: DiceCount, ticks: u32 },
    Settled(Outcome),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    Frame(Roll),
    Settled(Outcome),
}

/// What the status line under the dice should say.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Waiting,
    Rolling,
    Result { total: u32, rarity: Rarity },
    InvalidInput,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Waiting => write!(f, "Waiting for cast..."),
            Status::Rolling => write!(f, "Rolling..."),
            Status::Result { total, rarity } => {
                write!(f, "TOTAL: {total}  |  RARITY: {rarity}")
            }
            Status::InvalidInput => write!(f, "Error: Enter {MIN_DICE} to {MAX_DICE} dice."),
        }
    }
}

/// Drives one cast of the dice from trigger to settled result.
///
/// The machine never schedules anything itself: whoever owns it calls
/// [`RollAnimation::tick`] once every [`RollAnimation::tick_interval`] while
/// [`RollAnimation::is_rolling`] holds, from the same thread that started it.
pub struct RollAnimation {
    phase: Phase,
    status: Status,
    current: Option<Roll>,
    tick_count: u32,
    tick_interval: Duration,
    hooks: Vec<Box<dyn RollHook>>,
}

impl RollAnimation {
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: Phase::Idle,
            status: Status::Waiting,
            current: None,
            tick_count: settings.tick_count.max(1),
            tick_interval: settings.tick_interval(),
            hooks: Vec::new(),
        }
    }

    pub fn add_hook<H: RollHook + 'static>(&mut self, hook: H) {
        self.hooks.push(Box::new(hook));
    }

    pub fn reset_hooks(&mut self) {
        for hook in &mut self.hooks {
            hook.reset();
        }
    }

    pub fn metrics(&self) -> Vec<(String, f64)> {
        self.hooks.iter().flat_map(|hook| hook.metrics()).collect()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    /// The roll currently on display, if anything has been rolled yet.
    pub fn current_roll(&self) -> Option<&Roll> {
        self.current.as_ref()
    }

    /// Validates the dice count and begins animating.
    ///
    /// On invalid input the machine rests in `Idle` with an error status. A
    /// start while a sequence is running is refused and changes nothing.
    pub fn start(&mut self, input: &str) -> Result<DiceCount, StartError> {
        if self.is_rolling() {
            return Err(StartError::AlreadyRolling);
        }
        self.phase = Phase::Idle;

        let dice = match input.parse::<DiceCount>() {
            Ok(dice) => dice,
            Err(e) => {
                let error = StartError::from(e);
                self.status = Status::InvalidInput;
                for hook in &mut self.hooks {
                    hook.on_rejected(input, &error);
                }
                return Err(error);
            }
        };

        self.phase = Phase::Animating { dice, ticks: 0 };
        self.status = Status::Rolling;
        for hook in &mut self.hooks {
            hook.on_roll_start(dice);
        }
        Ok(dice)
    }

    /// Advances the animation by one frame.
    ///
    /// Every tick before the last draws a fresh roll to show. The last tick
    /// draws the final roll, estimates its rarity and settles. Returns `None`
    /// when nothing is animating.
    pub fn tick(&mut self, roller: &mut Roller, estimator: &RarityEstimator) -> Option<TickEvent> {
        let Phase::Animating { dice, ticks } = self.phase else {
            return None;
        };
        let ticks = ticks + 1;

        if ticks < self.tick_count {
            let roll = Roll::random(dice, roller);
            self.phase = Phase::Animating { dice, ticks };
            self.current = Some(roll.clone());
            for hook in &mut self.hooks {
                hook.on_frame(&roll, ticks);
            }
            return Some(TickEvent::Frame(roll));
        }

        let roll = Roll::random(dice, roller);
        let rarity = estimator.estimate(dice, roll.total(), roller);
        let outcome = Outcome::new(roll, rarity);
        self.current = Some(outcome.roll.clone());
        self.status = Status::Result {
            total: outcome.total,
            rarity: outcome.rarity,
        };
        self.phase = Phase::Settled(outcome.clone());
        for hook in &mut self.hooks {
            hook.on_settled(&outcome);
        }
        Some(TickEvent::Settled(outcome))
    }

    /// Ticks until the current sequence settles, without waiting between frames.
    pub fn run_to_completion(
        &mut self,
        roller: &mut Roller,
        estimator: &RarityEstimator,
    ) -> Option<Outcome> {
        while let Some(event) = self.tick(roller, estimator) {
            if let TickEvent::Settled(outcome) = event {
                return Some(outcome);
            }
        }
        None
    }
}

impl Default for RollAnimation {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
