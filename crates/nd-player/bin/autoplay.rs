//! Autoplay CLI: drive seeded Neon Descent runs and report summaries.

use anyhow::Result;
use clap::Parser;

use nd_player::{RunSummary, SessionConfig, run_session};

#[derive(Parser, Debug)]
#[command(name = "nd-autoplay", about = "Autoplay seeded Neon Descent runs")]
struct Args {
    /// Base RNG seed; run i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of sessions to drive
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Stop a session once this floor is reached
    #[arg(long, default_value_t = 60)]
    max_floors: u32,

    /// Emit one JSON summary per line instead of text
    #[arg(long)]
    json: bool,

    /// Print the full run log after each session
    #[arg(long)]
    verbose: bool,
}

fn print_text(summary: &RunSummary) {
    let outcome = if summary.died { "TERMINATED" } else { "survived" };
    println!(
        "seed {:>6}  depth {:>3}  {}  hp {:>3}  power {:>3}  crypto {:>5}  alert {:>3}%  modules {}",
        summary.seed,
        summary.floors_reached,
        outcome,
        summary.final_hp,
        summary.final_power,
        summary.final_credits,
        summary.final_alert,
        summary.modules_owned,
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    for i in 0..args.runs {
        let config = SessionConfig {
            seed: args.seed + u64::from(i),
            max_floors: args.max_floors,
            ..SessionConfig::default()
        };
        let (state, summary) = run_session(&config);

        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            print_text(&summary);
        }

        if args.verbose {
            println!("  advisor: {}", summary.opening_advice);
            for entry in &state.log {
                println!("  [{:>3}] {} {}", entry.floor, entry.kind, entry.message);
            }
        }
    }

    Ok(())
}
