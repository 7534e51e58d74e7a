use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};
use serde::Serialize;

use crate::{
    rules::dice::{DiceCount, SIDES},
    statistics::roller::Roller,
};

/// Trials drawn per estimate unless configured otherwise.
pub const DEFAULT_TRIALS: usize = 100_000;

/// How often a total comes up, as a percentage in `0.0..=100.0`.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Rarity(f64);

impl Rarity {
    pub fn from_counts(hits: u64, trials: u64) -> Self {
        if trials == 0 {
            return Rarity(0.0);
        }
        Rarity(hits as f64 / trials as f64 * 100.0)
    }

    pub fn from_probability(p: f64) -> Self {
        Rarity(p.clamp(0.0, 1.0) * 100.0)
    }

    pub fn percent(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

/// Monte-Carlo estimate of how likely a given total is.
///
/// Every trial throws the dice afresh and sums them; the rarity of a total is
/// the share of trials that landed on it.
#[derive(Debug, Clone)]
pub struct RarityEstimator {
    trials: usize,
    die: Uniform<u32>,
}

impl RarityEstimator {
    pub fn new(trials: usize) -> anyhow::Result<Self> {
        if trials == 0 {
            anyhow::bail!("Rarity estimator needs at least one trial");
        }
        let die = Uniform::new_inclusive(1, SIDES)?;
        Ok(Self { trials, die })
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    fn trial(&self, dice: DiceCount, rng: &mut StdRng) -> u32 {
        (0..dice.get()).map(|_| self.die.sample(rng)).sum()
    }

    pub fn estimate(&self, dice: DiceCount, target: u32, roller: &mut Roller) -> Rarity {
        if target < dice.min_total() || target > dice.max_total() {
            return Rarity::default();
        }
        let start = chrono::Utc::now();
        let rng = roller.rng();
        let hits = (0..self.trials)
            .filter(|_| self.trial(dice, rng) == target)
            .count();
        let rarity = Rarity::from_counts(hits as u64, self.trials as u64);
        log::debug!(
            "Estimated {}d{} = {} at {} over {} trials in {} ms",
            dice,
            SIDES,
            target,
            rarity,
            self.trials,
            (chrono::Utc::now() - start).num_milliseconds()
        );
        rarity
    }

    /// Runs one batch of trials and keeps the frequency of every total.
    pub fn histogram(&self, dice: DiceCount, roller: &mut Roller) -> SumHistogram {
        let mut counts = vec![0u64; dice.max_total() as usize + 1];
        let rng = roller.rng();
        for _ in 0..self.trials {
            counts[self.trial(dice, rng) as usize] += 1;
        }
        SumHistogram {
            dice,
            trials: self.trials as u64,
            counts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SumHistogram {
    pub dice: DiceCount,
    pub trials: u64,
    counts: Vec<u64>,
}

impl SumHistogram {
    pub fn count(&self, total: u32) -> u64 {
        self.counts.get(total as usize).copied().unwrap_or(0)
    }

    pub fn rarity(&self, total: u32) -> Rarity {
        Rarity::from_counts(self.count(total), self.trials)
    }

    /// Every reachable total with its observed count, smallest total first.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        (self.dice.min_total()..=self.dice.max_total()).map(|total| (total, self.count(total)))
    }

    /// The total seen most often. Ties go to the smaller total.
    pub fn mode(&self) -> u32 {
        self.iter()
            .fold((self.dice.min_total(), 0), |best, (total, count)| {
                if count > best.1 { (total, count) } else { best }
            })
            .0
    }
}
