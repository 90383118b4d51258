//! Bricker entry point
//!
//! Parses the grid size, then runs the game headless with the paddle on
//! autopilot until the player declines another run. There is no keyboard in
//! headless mode, so the arrow keys and the debug win key are not read.

use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;

use bricker::Settings;
use bricker::platform::HeadlessWindow;
use bricker::session::Session;
use bricker::sim::TickInput;

#[derive(Parser)]
#[command(name = "bricker")]
#[command(about = "Breakout with randomized brick powers", long_about = None)]
struct Cli {
    /// `[rows]` or `[bricks_per_row rows]` (further values are ignored)
    counts: Vec<u32>,

    /// Seed for the brick grid and ball directions (defaults to the clock)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match Settings::from_positional(&cli.counts) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Invalid grid: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Bricker (headless) starting...");

    let mut session = Session::new(settings, seed, HeadlessWindow::default());
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let frame = Duration::from_secs_f32(bricker::consts::SIM_DT);
    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        if !session.advance(dt, &input) {
            break;
        }
        thread::sleep(frame);
    }

    log::info!("Bricker closed after {} restarts", session.restarts());
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_counts_are_ignored() {
        let cli = Cli::try_parse_from(["bricker", "5", "2", "99"]).unwrap();
        let settings = Settings::from_positional(&cli.counts).unwrap();
        assert_eq!(settings.bricks_in_row, 5);
        assert_eq!(settings.rows_of_bricks, 2);
    }

    #[test]
    fn test_negative_count_is_a_parse_error() {
        assert!(Cli::try_parse_from(["bricker", "--", "-3"]).is_err());
    }
}
