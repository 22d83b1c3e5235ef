//! Command-line front end.
//!
//! - `tsp`: anneal a tour from a point file and write `step length temperature` rows.
//! - `boltzmann`: run the walker at one temperature and write a frequency trace.
//! - `scan`: run the walker over doubling temperatures.
//!
//! Logging is controlled with `RUST_LOG`, e.g.
//! `RUST_LOG=debug u-anneal tsp --points points.txt --start extent`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use u_anneal::io::{load_points, write_frequency_trace, write_progress};
use u_anneal::random::create_rng;
use u_anneal::tsp::{AnnealConfig, AnnealRunner, Progress, StartTemperature};
use u_anneal::walker::{doubling_temperatures, temperature_scan, FiniteTemperatureWalker};

#[derive(Parser)]
#[command(name = "u-anneal", about = "Metropolis annealing for the TSP")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Anneal a tour through the cities in a point file
    Tsp {
        /// File with one `x y` integer pair per line
        #[arg(short, long, default_value = "points.txt")]
        points: PathBuf,

        /// Number of temperature levels
        #[arg(long, default_value_t = 200)]
        steps: usize,

        /// Sweeps at each temperature level
        #[arg(long, default_value_t = 1000)]
        sweeps: usize,

        /// Geometric cooling factor in (0, 1)
        #[arg(long, default_value_t = 0.9)]
        cooling: f64,

        /// Start temperature: `scaled-extent` (n * max extent), `extent`, or a number
        #[arg(long, default_value = "scaled-extent")]
        start: StartTemperature,

        /// Stop once the temperature falls to this value
        #[arg(long)]
        min_temperature: Option<f64>,

        /// Random seed
        #[arg(long, default_value_t = 48)]
        seed: u64,

        /// Output file for progress rows (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Sample a discrete spectrum at one temperature
    Boltzmann {
        /// Comma-separated energy levels
        #[arg(long, value_delimiter = ',', default_values_t = [0.0, 1.0, 2.0, 4.0])]
        energies: Vec<f64>,

        #[arg(short, long, default_value_t = 10.0)]
        temperature: f64,

        /// Number of steps
        #[arg(long, default_value_t = 50_000)]
        steps: usize,

        /// Record frequencies every this many steps
        #[arg(long, default_value_t = 100)]
        every: usize,

        #[arg(long, default_value_t = 48)]
        seed: u64,

        /// Output file for the frequency trace (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Equilibrium frequencies over doubling temperatures
    Scan {
        #[arg(long, value_delimiter = ',', default_values_t = [0.0, 1.0, 2.0])]
        energies: Vec<f64>,

        /// Lowest temperature
        #[arg(long, default_value_t = 1.0)]
        from: f64,

        /// Highest temperature
        #[arg(long, default_value_t = 1024.0)]
        to: f64,

        /// Steps at each temperature
        #[arg(long, default_value_t = 100_000)]
        steps: usize,

        #[arg(long, default_value_t = 48)]
        seed: u64,
    },
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("creating {}", p.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}

fn format_frequencies(freqs: &[f64]) -> String {
    let items: Vec<String> = freqs.iter().map(|f| format!("{f:.5}")).collect();
    format!("[{}]", items.join(","))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Tsp {
            points,
            steps,
            sweeps,
            cooling,
            start,
            min_temperature,
            seed,
            output,
        } => {
            let cities = load_points(&points)?;
            let mut config = AnnealConfig::default()
                .with_temperature_steps(steps)
                .with_sweeps_per_step(sweeps)
                .with_cooling_factor(cooling)
                .with_start_temperature(start)
                .with_seed(seed);
            if let Some(t) = min_temperature {
                config = config.with_min_temperature(t);
            }
            let mut history: Vec<Progress> = Vec::with_capacity(steps);
            let result = AnnealRunner::run_with_sink(cities, &config, &mut history)?;
            write_progress(open_output(output.as_ref())?, &history)?;
            eprintln!("best: {}", result.best);
        }

        Command::Boltzmann {
            energies,
            temperature,
            steps,
            every,
            seed,
            output,
        } => {
            if every == 0 {
                bail!("--every must be at least 1");
            }
            let mut walker = FiniteTemperatureWalker::new(energies, create_rng(seed))?;
            walker.restart(temperature)?;
            let mut trace = Vec::with_capacity(steps / every + 1);
            for t in 0..steps {
                walker.step();
                if t % every == 0 {
                    trace.push((t, walker.empirical_frequencies()));
                }
            }
            write_frequency_trace(open_output(output.as_ref())?, &trace)?;
            eprintln!(
                "simulated:   {}",
                format_frequencies(&walker.empirical_frequencies())
            );
            eprintln!(
                "theoretical: {}",
                format_frequencies(&walker.theoretical_frequencies())
            );
        }

        Command::Scan {
            energies,
            from,
            to,
            steps,
            seed,
        } => {
            let temperatures = doubling_temperatures(from, to);
            if temperatures.is_empty() {
                bail!("no temperatures between {from} and {to}");
            }
            let points = temperature_scan(energies, &temperatures, steps, create_rng(seed))?;
            let mut out = io::stdout().lock();
            for p in &points {
                writeln!(
                    out,
                    "{} {} {}",
                    p.temperature,
                    format_frequencies(&p.empirical),
                    format_frequencies(&p.theoretical)
                )?;
            }
        }
    }

    Ok(())
}
