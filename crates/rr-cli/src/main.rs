//! Рандом Рандомыч — terminal decision randomizer
//!
//! Usage:
//!   randomych numbers --min 1 --max 6          - Random number in a range
//!   randomych options Чай Кофе Сок --spins 3   - Pick from a list, best of 3
//!   randomych yes-no --spins 5                 - Coin flip, best of 5
//!
//! Last-used bounds, options and spin count are remembered between runs.

mod render;

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use rr_core::ModeKind;
use rr_spin::{PlayoutStage, RandomSource, SpinSession, TimingConfig, TimingProfile};
use rr_state::LastUsedConfig;

#[derive(Parser)]
#[command(name = "randomych", about = "Рандом Рандомыч — decision randomizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Seed for reproducible draws
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Playout speed
    #[arg(long, value_enum, default_value = "normal", global = true)]
    timing: TimingArg,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Do not remember this run's settings
    #[arg(long, global = true)]
    no_save: bool,

    /// Spin again this many times after the first result
    #[arg(long, default_value_t = 0, global = true)]
    again: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Random number in a range
    Numbers {
        /// Lower bound
        #[arg(long, allow_hyphen_values = true)]
        min: Option<String>,
        /// Upper bound
        #[arg(long, allow_hyphen_values = true)]
        max: Option<String>,
        /// Carousels to spin (1, 3 or 5)
        #[arg(short, long)]
        spins: Option<usize>,
    },
    /// Random pick from a list
    Options {
        /// Options (previous list is used when omitted)
        options: Vec<String>,
        /// Carousels to spin (1, 3 or 5)
        #[arg(short, long)]
        spins: Option<usize>,
    },
    /// Yes or no
    YesNo {
        /// Carousels to spin (1, 3 or 5)
        #[arg(short, long)]
        spins: Option<usize>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TimingArg {
    Normal,
    Turbo,
    Instant,
}

impl From<TimingArg> for TimingProfile {
    fn from(arg: TimingArg) -> Self {
        match arg {
            TimingArg::Normal => TimingProfile::Normal,
            TimingArg::Turbo => TimingProfile::Turbo,
            TimingArg::Instant => TimingProfile::Instant,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(LastUsedConfig::default_path);
    let mut config = LastUsedConfig::load_from(&config_path);
    let kind = apply_command(&mut config, &cli.command)?;

    if !cli.no_save {
        config
            .save_to(&config_path)
            .with_context(|| format!("saving {}", config_path.display()))?;
    }

    let mut session = match cli.seed {
        Some(seed) => SpinSession::with_source(RandomSource::seeded(seed)),
        None => SpinSession::new(),
    };
    let timing = TimingConfig::from_profile(cli.timing.into());

    session
        .start(config.mode_for(kind), config.spin_count)
        .context("starting session")?;

    for round in 0..=cli.again {
        if round > 0 {
            println!();
            session.restart().context("spinning again")?;
        }
        play(&mut session, &timing, kind)?;
    }

    Ok(())
}

/// Apply command-line input the way the configuration screen does
fn apply_command(config: &mut LastUsedConfig, command: &Commands) -> Result<ModeKind> {
    let (kind, spins) = match command {
        Commands::Numbers { min, max, spins } => {
            let min_text = min.clone().unwrap_or_else(|| config.min_number.to_string());
            let max_text = max.clone().unwrap_or_else(|| config.max_number.to_string());
            config.apply_numeric_input(&min_text, &max_text);
            (ModeKind::Numbers, spins)
        }
        Commands::Options { options, spins } => {
            if !options.is_empty() {
                config.apply_options_input(options.as_slice());
            }
            (ModeKind::Options, spins)
        }
        Commands::YesNo { spins } => (ModeKind::YesNo, spins),
    };

    if let Some(count) = *spins {
        config
            .set_spin_count(count)
            .with_context(|| format!("--spins {count}"))?;
    }
    Ok(kind)
}

/// Follow the playout schedule, reporting each carousel as it lands
fn play(session: &mut SpinSession, timing: &TimingConfig, kind: ModeKind) -> Result<()> {
    let multi = session.spin_count() > 1;
    println!("{} — Крутим...", kind.title());

    let mut elapsed_ms = 0.0;
    for event in session.playout_schedule(timing) {
        wait(event.timestamp_ms - elapsed_ms);
        elapsed_ms = event.timestamp_ms;

        match event.stage {
            PlayoutStage::SessionStart => {}
            PlayoutStage::CarouselSpinStart { index, landing_offset } => {
                log::debug!("carousel {index} scrolling to {landing_offset}");
                if multi {
                    print!("{:>5}  ", session.progress_label());
                    io::stdout().flush().context("flushing stdout")?;
                }
            }
            PlayoutStage::CarouselStop { index, .. } => {
                if let Err(e) = session.report_carousel_complete(index) {
                    session.abort();
                    return Err(e).context("carousel playout");
                }
                if let Some(carousel) = session.carousels().get(index) {
                    println!("{}", render::carousel_line(carousel));
                }
            }
            PlayoutStage::ResultReady => print_result(session),
        }
    }
    Ok(())
}

fn print_result(session: &SpinSession) {
    let Some(result) = session.result() else {
        return;
    };

    println!();
    println!("Результат");
    if session.spin_count() > 1 {
        for line in render::breakdown_lines(result) {
            println!("  {line}");
        }
        println!("Победитель:");
    }
    println!("  {}", result.winner());
}

fn wait(ms: f64) {
    if ms > 0.0 {
        thread::sleep(Duration::from_secs_f64(ms / 1000.0));
    }
}
