use std::path::PathBuf;

use clap::Parser;

use chip8_core::constants::{INSTRUCTION_HZ, TIMER_HZ};
use chip8_core::Config;

mod run;

/// Run a Chip-8 ROM headlessly.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = INSTRUCTION_HZ, value_parser = clap::value_parser!(u32).range(1..=1_000_000))]
    ips: u32,

    /// Rate at which the delay and sound timers count down
    #[arg(long, default_value_t = TIMER_HZ, value_parser = clap::value_parser!(u32).range(1..=1_000_000))]
    timer_hz: u32,

    /// Stop on unknown opcodes and stack faults instead of logging them
    #[arg(long)]
    strict: bool,

    /// Stop after this many 60Hz frames
    #[arg(long)]
    frames: Option<u64>,

    /// Seed for RND, making runs reproducible
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final frame as text
    #[arg(long)]
    dump: bool,

    /// Log at info level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::default()
        .with_instruction_hz(args.ips)
        .with_timer_hz(args.timer_hz)
        .with_strict(args.strict);

    run::run(
        args.rom,
        config,
        run::Options {
            frames: args.frames,
            seed: args.seed,
            dump: args.dump,
        },
    )
}
