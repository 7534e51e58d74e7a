use std::path::PathBuf;

use clap::Parser;
use dicecast::prelude::*;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of dice to cast (1 to 5)
    #[arg(allow_hyphen_values = true)]
    dice: String,

    /// Settings JSON file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of trials behind the rarity estimate
    #[arg(short, long)]
    trials: Option<usize>,

    /// Random seed for reproducibility
    #[arg(short, long, default_value = None)]
    seed: Option<u64>,

    /// Print every animation frame, pausing between them
    #[arg(long, default_value_t = false)]
    animate: bool,

    /// Also report the exact probability of the total
    #[arg(long, default_value_t = false)]
    exact: bool,

    /// Print the estimated and exact distribution of every total
    #[arg(long, default_value_t = false)]
    histogram: bool,

    /// Print the outcome as JSON instead of dice glyphs
    #[arg(long, default_value_t = false, conflicts_with = "animate")]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    outcome: Outcome,
    exact: Option<Rarity>,
    histogram: Option<Vec<HistogramRow>>,
    metrics: Vec<(String, f64)>,
}

#[derive(Debug, Serialize)]
struct HistogramRow {
    total: u32,
    estimated: Rarity,
    exact: Rarity,
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(trials) = args.trials {
        settings.trials = trials;
    }
    Ok(settings.validate()?)
}

fn histogram_rows(
    estimator: &RarityEstimator,
    dice: DiceCount,
    roller: &mut Roller,
) -> Vec<HistogramRow> {
    let histogram = estimator.histogram(dice, roller);
    let exact = sum_distribution(dice);
    histogram
        .iter()
        .map(|(total, _)| HistogramRow {
            total,
            estimated: histogram.rarity(total),
            exact: Rarity::from_probability(exact[total as usize]),
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::builder()
        .format_timestamp_secs()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    log::debug!("Starting with args: {:?}", args);

    let settings = load_settings(&args)?;
    let mut roller = match args.seed {
        Some(seed) => Roller::from_seed(seed),
        None => Roller::new(),
    };
    let mut trial_roller = roller.fork();
    let estimator = RarityEstimator::new(settings.trials)?;

    let mut animation = RollAnimation::new(&settings);
    animation.add_hook(LoggingHook);
    animation.add_hook(TallyHook::new());

    let dice = animation
        .start(&args.dice)
        .map_err(|e| anyhow::anyhow!("{} ({})", animation.status(), e))?;

    let outcome = loop {
        let Some(event) = animation.tick(&mut roller, &estimator) else {
            anyhow::bail!("Roll stopped before settling");
        };
        match event {
            TickEvent::Frame(roll) => {
                if args.animate {
                    println!("{}\n", render_roll(&roll));
                    std::thread::sleep(animation.tick_interval());
                }
            }
            TickEvent::Settled(outcome) => break outcome,
        }
    };

    let exact = args.exact.then(|| exact_rarity(dice, outcome.total));
    let histogram = args
        .histogram
        .then(|| histogram_rows(&estimator, dice, &mut trial_roller));

    if args.json {
        let report = Report {
            outcome,
            exact,
            histogram,
            metrics: animation.metrics(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", render_roll(&outcome.roll));
    println!();
    println!("{}", animation.status());
    if let Some(exact) = exact {
        println!("EXACT: {}", exact);
    }
    if let Some(rows) = histogram {
        println!();
        println!("{:>5}  {:>9}  {:>9}", "TOTAL", "ESTIMATED", "EXACT");
        for row in rows {
            let marker = if row.total == outcome.total { " <" } else { "" };
            println!(
                "{:>5}  {:>9}  {:>9}{}",
                row.total,
                row.estimated.to_string(),
                row.exact.to_string(),
                marker
            );
        }
    }

    Ok(())
}
