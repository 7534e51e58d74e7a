pub mod animation;
pub mod render;
pub mod rules;
pub mod settings;
pub mod statistics;

pub mod prelude {
    pub use crate::{
        animation::{
            Outcome, Phase, RollAnimation, StartError, Status, TickEvent,
            hook::{LoggingHook, RollHook, TallyHook},
        },
        render::{render_placeholder, render_roll},
        rules::dice::{DiceCount, DiceCountError, Face, MAX_DICE, MIN_DICE, Roll, SIDES},
        settings::{Settings, SettingsError},
        statistics::{
            pmf::{exact_rarity, sum_distribution},
            rarity::{DEFAULT_TRIALS, Rarity, RarityEstimator, SumHistogram},
            roller::Roller,
        },
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_demo() -> anyhow::Result<()> {
        let settings = Settings {
            trials: 20_000,
            ..Settings::default()
        };
        let estimator = RarityEstimator::new(settings.trials)?;
        let mut roller = Roller::test_rng();
        let mut animation = RollAnimation::new(&settings);
        animation.add_hook(LoggingHook);
        animation.add_hook(TallyHook::new());

        for input in ["0", "6", "abc", "-1"] {
            assert!(animation.start(input).is_err());
            assert!(!animation.is_rolling());
        }

        for dice in DiceCount::all() {
            animation.start(&dice.to_string())?;
            let mut shown = render_placeholder().to_string();
            let outcome = loop {
                match animation.tick(&mut roller, &estimator) {
                    Some(TickEvent::Frame(roll)) => shown = render_roll(&roll),
                    Some(TickEvent::Settled(outcome)) => break outcome,
                    None => anyhow::bail!("animation stopped before settling"),
                }
            };
            assert_ne!(shown, render_placeholder());

            // The glyphs on screen must add up to the total on the status line.
            let displayed = render_roll(&outcome.roll);
            let pips = displayed.matches('●').count() as u32;
            assert_eq!(pips, outcome.total);
            assert_eq!(outcome.total, outcome.roll.total());
            assert_eq!(outcome.roll.len(), dice.get() as usize);

            let exact = exact_rarity(dice, outcome.total).percent();
            assert!((outcome.rarity.percent() - exact).abs() < 1.5);
        }

        let metrics = animation.metrics();
        let casts = metrics
            .iter()
            .find(|(name, _)| name == "Casts")
            .map(|(_, value)| *value);
        assert_eq!(casts, Some(5.0));
        let rejected = metrics
            .iter()
            .find(|(name, _)| name == "Rejected inputs")
            .map(|(_, value)| *value);
        assert_eq!(rejected, Some(4.0));

        Ok(())
    }
}
