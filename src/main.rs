use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufWriter, Write};
use lfsr::{
    output_format::{parse_state, parse_taps},
    survey::{exhaustive_seeds, sample_seeds},
    Feedback, SimulationOptions, StateFormat, SurveyReport, Trajectory,
};

#[derive(Parser)]
#[command(name = "lfsr")]
#[command(about = "Fibonacci LFSR cycle simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Step a register from a seed until the seed recurs
    Run {
        /// Nonzero start state (decimal, 0x hex or 0b binary)
        #[arg(short, long)]
        seed: String,

        /// Comma-separated tap positions, 1-indexed from the LSB (position 1 is implicit)
        #[arg(short, long, default_value = "")]
        taps: String,

        /// Register width in bits
        #[arg(short, long)]
        width: u32,

        /// Feedback rule
        #[arg(long, default_value = "source")]
        feedback: FeedbackEnum,

        /// State output format
        #[arg(short, long, default_value = "decimal")]
        format: StateFormatEnum,

        /// Print the cycle length after the trajectory
        #[arg(short = 'c', long)]
        print_cycle_len: bool,

        /// Give up after this many transitions
        #[arg(long)]
        max_steps: Option<u64>,

        /// Do not print the trajectory
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run many seeds against one tap configuration
    Survey {
        /// Comma-separated tap positions, 1-indexed from the LSB (position 1 is implicit)
        #[arg(short, long, default_value = "")]
        taps: String,

        /// Register width in bits
        #[arg(short, long)]
        width: u32,

        /// Feedback rule
        #[arg(long, default_value = "source")]
        feedback: FeedbackEnum,

        /// Sample this many seeds instead of enumerating all of them
        #[arg(long)]
        sample: Option<usize>,

        /// PRNG seed used with --sample
        #[arg(long, default_value = "0x9E3779B97F4A7C15")]
        prng_seed: String,

        /// Give up on a seed after this many transitions
        #[arg(long)]
        max_steps: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FeedbackEnum {
    Source,
    Standard,
}

impl From<FeedbackEnum> for Feedback {
    fn from(val: FeedbackEnum) -> Self {
        match val {
            FeedbackEnum::Source => Feedback::SourceCompatible,
            FeedbackEnum::Standard => Feedback::Standard,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StateFormatEnum {
    Decimal,
    Hex,
    HexUpper,
    Binary,
}

impl From<StateFormatEnum> for StateFormat {
    fn from(val: StateFormatEnum) -> Self {
        match val {
            StateFormatEnum::Decimal => StateFormat::Decimal,
            StateFormatEnum::Hex => StateFormat::HexLowercase,
            StateFormatEnum::HexUpper => StateFormat::HexUppercase,
            StateFormatEnum::Binary => StateFormat::Binary,
        }
    }
}

fn build_options(feedback: FeedbackEnum, max_steps: Option<u64>) -> SimulationOptions {
    let options = SimulationOptions::new().with_feedback(feedback.into());
    match max_steps {
        Some(limit) => options.with_max_steps(limit),
        None => options,
    }
}

fn write_trajectory(
    trajectory: &Trajectory,
    format: StateFormat,
    quiet: bool,
    print_cycle_len: bool,
) -> Result<(), String> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if !quiet {
        for &state in trajectory {
            writeln!(out, "{}", format.encode(state, trajectory.width()))
                .map_err(|e| format!("Failed to write to stdout: {}", e))?;
        }
    }
    if print_cycle_len {
        writeln!(out, "{}", trajectory.cycle_length())
            .map_err(|e| format!("Failed to write to stdout: {}", e))?;
    }
    out.flush().map_err(|e| format!("Failed to write to stdout: {}", e))
}

fn write_survey(report: &SurveyReport) -> Result<(), String> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let write_err = |e: io::Error| format!("Failed to write to stdout: {}", e);

    writeln!(
        out,
        "taps {:?}, width {}, {} seeds",
        report.taps,
        report.width,
        report.seeds.len()
    )
    .map_err(write_err)?;
    writeln!(out, "recurring: {}", report.recurring()).map_err(write_err)?;
    writeln!(out, "not recurring: {}", report.non_recurring()).map_err(write_err)?;
    if let Some(longest) = report.longest() {
        writeln!(
            out,
            "longest cycle: {} (seed {:#x}){}",
            longest.cycle_length().unwrap_or_default(),
            longest.seed,
            if report.has_maximal_cycle() { ", maximal" } else { "" }
        )
        .map_err(write_err)?;
    }
    writeln!(out, "cycle length histogram:").map_err(write_err)?;
    for (length, count) in report.histogram() {
        writeln!(out, "  {:>8}: {}", length, count).map_err(write_err)?;
    }
    out.flush().map_err(write_err)
}

fn run_command(command: Commands) -> Result<(), String> {
    match command {
        Commands::Run {
            seed,
            taps,
            width,
            feedback,
            format,
            print_cycle_len,
            max_steps,
            quiet,
        } => {
            let seed = parse_state(&seed)?;
            let taps = parse_taps(&taps)?;
            let options = build_options(feedback, max_steps);
            let trajectory =
                lfsr::simulate_with(seed, &taps, width, &options).map_err(|e| e.to_string())?;
            write_trajectory(&trajectory, format.into(), quiet, print_cycle_len)
        }
        Commands::Survey {
            taps,
            width,
            feedback,
            sample,
            prng_seed,
            max_steps,
        } => {
            let taps = parse_taps(&taps)?;
            let options = build_options(feedback, max_steps);
            let seeds = match sample {
                Some(count) => {
                    let prng_seed = parse_state(&prng_seed)?;
                    sample_seeds(width, count, prng_seed)
                }
                None => exhaustive_seeds(width),
            }
            .map_err(|e| e.to_string())?;
            if seeds.len() > 1 << 20 {
                eprintln!("Warning: surveying {} seeds, this may take a while", seeds.len());
            }
            let report = lfsr::survey(&taps, width, &seeds, &options).map_err(|e| e.to_string())?;
            write_survey(&report)
        }
    }
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let cli = Cli::parse();

    if let Err(e) = run_command(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
