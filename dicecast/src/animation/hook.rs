use crate::{
    animation::{Outcome, StartError},
    rules::dice::{DiceCount, Roll, SIDES},
};

/// Observer of a [`crate::animation::RollAnimation`]'s lifecycle.
#[allow(unused)]
pub trait RollHook: Send + Sync {
    fn on_roll_start(&mut self, dice: DiceCount) {}
    fn on_frame(&mut self, roll: &Roll, tick: u32) {}
    fn on_settled(&mut self, outcome: &Outcome) {}
    fn on_rejected(&mut self, input: &str, error: &StartError) {}

    /// Forgets whatever the hook has accumulated.
    fn reset(&mut self) {}

    fn metrics(&self) -> Vec<(String, f64)> {
        vec![]
    }
}

/// Writes every lifecycle event to the `log` facade.
#[derive(Debug, Default)]
pub struct LoggingHook;

impl RollHook for LoggingHook {
    fn on_roll_start(&mut self, dice: DiceCount) {
        log::info!("Casting {}d{}", dice, SIDES);
    }

    fn on_frame(&mut self, roll: &Roll, tick: u32) {
        let mut buf = String::new();
        roll.pretty_print(&mut buf).ok();
        log::debug!("Frame {}: {}", tick, buf);
    }

    fn on_settled(&mut self, outcome: &Outcome) {
        let mut buf = String::new();
        outcome.pretty_print(&mut buf).ok();
        log::info!("{}", buf);
    }

    fn on_rejected(&mut self, input: &str, error: &StartError) {
        log::warn!("Rejected dice count {:?}: {}", input, error);
    }
}

/// Running totals over every settled cast in a session.
#[derive(Debug, Default, Clone)]
pub struct TallyHook {
    casts: u64,
    rejected: u64,
    sum_of_totals: u64,
    rarest: Option<Outcome>,
}

impl TallyHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn casts(&self) -> u64 {
        self.casts
    }

    pub fn mean_total(&self) -> Option<f64> {
        (self.casts > 0).then(|| self.sum_of_totals as f64 / self.casts as f64)
    }

    /// The settled outcome with the lowest rarity seen so far. Earlier outcomes win ties.
    pub fn rarest(&self) -> Option<&Outcome> {
        self.rarest.as_ref()
    }
}

impl RollHook for TallyHook {
    fn on_settled(&mut self, outcome: &Outcome) {
        self.casts += 1;
        self.sum_of_totals += outcome.total as u64;
        let is_rarer = self
            .rarest
            .as_ref()
            .is_none_or(|rarest| outcome.rarity < rarest.rarity);
        if is_rarer {
            self.rarest = Some(outcome.clone());
        }
    }

    fn on_rejected(&mut self, _input: &str, _error: &StartError) {
        self.rejected += 1;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn metrics(&self) -> Vec<(String, f64)> {
        let mut metrics = vec![
            ("Casts".to_string(), self.casts as f64),
            ("Rejected inputs".to_string(), self.rejected as f64),
        ];
        if let Some(mean) = self.mean_total() {
            metrics.push(("Mean total".to_string(), mean));
        }
        if let Some(rarest) = &self.rarest {
            metrics.push(("Rarest rarity (%)".to_string(), rarest.rarity.percent()));
        }
        metrics
    }
}

#[cfg(test)]
mod tests {
    use statrs::assert_almost_eq;

    use super::*;
    use crate::{
        rules::dice::{DiceCountError, Face},
        statistics::rarity::Rarity,
    };

    fn outcome(values: &[u32], rarity: Rarity) -> Outcome {
        let roll: Roll = values.iter().copied().filter_map(Face::new).collect();
        Outcome::new(roll, rarity)
    }

    #[test]
    fn test_tally_starts_empty() {
        let tally = TallyHook::new();
        assert_eq!(tally.casts(), 0);
        assert!(tally.mean_total().is_none());
        assert!(tally.rarest().is_none());
        assert_eq!(tally.metrics().len(), 2);
    }

    #[test]
    fn test_tally_tracks_outcomes() {
        let mut tally = TallyHook::new();
        tally.on_settled(&outcome(&[3, 4], Rarity::from_counts(6, 36)));
        tally.on_settled(&outcome(&[6, 6], Rarity::from_counts(1, 36)));
        tally.on_settled(&outcome(&[1, 1], Rarity::from_counts(1, 36)));
        let error = StartError::InvalidDiceCount(DiceCountError::NotANumber("abc".into()));
        tally.on_rejected("abc", &error);

        assert_eq!(tally.casts(), 3);
        assert_almost_eq!(tally.mean_total().unwrap(), 7.0, 1e-12);
        assert_eq!(tally.rarest().unwrap().total, 12);

        let metrics = tally.metrics();
        assert_eq!(metrics[0], ("Casts".to_string(), 3.0));
        assert_eq!(metrics[1], ("Rejected inputs".to_string(), 1.0));
        assert_eq!(metrics.len(), 4);
    }

    #[test]
    fn test_tally_reset_forgets_everything() {
        let mut tally = TallyHook::new();
        tally.on_settled(&outcome(&[2, 5], Rarity::from_counts(6, 36)));
        tally.on_rejected("9", &StartError::AlreadyRolling);
        tally.reset();

        assert_eq!(tally.casts(), 0);
        assert!(tally.mean_total().is_none());
        assert!(tally.rarest().is_none());
        assert_eq!(
            tally.metrics(),
            vec![
                ("Casts".to_string(), 0.0),
                ("Rejected inputs".to_string(), 0.0),
            ]
        );
    }
}
