use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use rusty_hands::cursor::DEFAULT_ALPHA;
use rusty_hands::debounce::DEFAULT_STABLE_THRESHOLD;
use rusty_hands::{ControlEvent, HandController, Landmarks, Surface};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Feed recorded hand landmarks through the controller and print the events.
///
/// Input is a JSON array of frames; each frame is an array of hands, each
/// hand an array of `{"x", "y", "z"}` points normalized to the frame.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded frames (JSON)
    input: PathBuf,

    #[arg(long, default_value_t = 1920, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    #[arg(long, default_value_t = 1080, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Frames a label must repeat before it is confirmed
    #[arg(long, default_value_t = DEFAULT_STABLE_THRESHOLD, value_parser = clap::value_parser!(u32).range(1..))]
    threshold: u32,

    /// Cursor inertia, strictly between 0 and 1
    #[arg(long, default_value_t = DEFAULT_ALPHA, value_parser = parse_alpha)]
    alpha: f32,
}

fn parse_alpha(s: &str) -> Result<f32, String> {
    let alpha: f32 = s.parse().map_err(|e| format!("{}", e))?;
    if alpha > 0.0 && alpha < 1.0 {
        Ok(alpha)
    } else {
        Err(format!("must be between 0 and 1 (exclusive), got {}", alpha))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = File::open(&args.input).with_context(|| format!("Failed to open {}", args.input.display()))?;
    let frames: Vec<Vec<Landmarks>> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    let mut controller = HandController::new(Surface::new(args.width, args.height), args.threshold, args.alpha);

    println!("{:<6} | {:<7} | {:<9} | {}", "Frame", "Raw", "Confirmed", "Events");
    println!("{}", "-".repeat(60));
    for (i, hands) in frames.iter().enumerate() {
        let report = controller.process_frame(hands);
        let raw = report.raw_label.map_or("-".to_string(), |l| l.to_string());
        let confirmed = report.confirmed_change.map_or("".to_string(), |l| l.to_string());
        let events: Vec<String> = report
            .events
            .iter()
            .map(|e| match e {
                ControlEvent::MoveTo(..) => e.to_string(),
                _ => e.to_string().bold().to_string(),
            })
            .collect();
        println!("{:<6} | {:<7} | {:<9} | {}", i + 1, raw, confirmed, events.join(", "));
    }

    if let Some(release) = controller.finish() {
        println!("{:<6} | {:<7} | {:<9} | {}", "end", "", "", release);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_accepted() {
        let args = Args::try_parse_from(["replay_landmarks", "frames.json"]).unwrap();
        assert_eq!((args.width, args.height), (1920, 1080));
        assert_eq!(args.threshold, DEFAULT_STABLE_THRESHOLD);
        assert_eq!(args.alpha, DEFAULT_ALPHA);
    }

    #[test]
    fn test_alpha_outside_unit_interval_rejected() {
        for bad in ["0", "1", "1.5", "-0.2", "NaN", "abc"] {
            assert!(
                Args::try_parse_from(["replay_landmarks", "frames.json", "--alpha", bad]).is_err(),
                "alpha {} accepted",
                bad
            );
        }
        let args = Args::try_parse_from(["replay_landmarks", "frames.json", "--alpha", "0.3"]).unwrap();
        assert_eq!(args.alpha, 0.3);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        for flag in ["--width", "--height", "--threshold"] {
            assert!(Args::try_parse_from(["replay_landmarks", "frames.json", flag, "0"]).is_err());
        }
    }
}
