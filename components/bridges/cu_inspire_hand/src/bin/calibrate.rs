//! Calibration tool for Inspire hands.
//!
//! ```sh
//! cargo run --bin inspire-calibrate -- recording.jsonl
//! cargo run --bin inspire-calibrate -- recording.jsonl calibration_left.json
//! ```
//!
//! Record hand-state messages (one JSON [`HandStateMessage`] per line) while
//! opening and closing every finger through its full range. The tool replays
//! the recording, tracks the min and max of each joint group and writes the
//! result. Output file defaults to `calibration.json`; pass a path as the
//! second argument to override.

use cu_inspire_hand::calibration::{Calibration, RangeRecorder};
use cu_inspire_hand::error::HandResult;
use cu_inspire_hand::messages::HandStateMessage;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Replays `input`; also reports whether any FTP message was seen.
fn replay(input: &Path) -> HandResult<(RangeRecorder, usize, bool)> {
    let reader = BufReader::new(std::fs::File::open(input)?);
    let mut recorder = RangeRecorder::new();
    let mut skipped = 0;
    let mut saw_ftp = false;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let msg: HandStateMessage = match serde_json::from_str(&line) {
            Ok(msg) => msg,
            Err(e) => {
                eprintln!("  line {}: {e}", lineno + 1);
                skipped += 1;
                continue;
            }
        };
        saw_ftp |= matches!(msg, HandStateMessage::Ftp { .. });
        match msg.hand_updates() {
            Ok(updates) => {
                for (_, values) in &updates {
                    recorder.record_hand(values);
                }
            }
            Err(defect) => {
                eprintln!("  line {}: {defect}", lineno + 1);
                skipped += 1;
            }
        }
    }
    Ok((recorder, skipped, saw_ftp))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: inspire-calibrate <recording.jsonl> [output.json]");
        std::process::exit(1);
    }
    let input = Path::new(&args[1]);
    let output_path = args.get(2).map(String::as_str).unwrap_or("calibration.json");

    let (recorder, skipped, saw_ftp) = match replay(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to replay {}: {e}", input.display());
            std::process::exit(1);
        }
    };
    if recorder.samples() == 0 {
        eprintln!("No usable hand state in {}.", input.display());
        std::process::exit(1);
    }

    // Groups never exercised keep the default of the recorded schema.
    let fallback = if saw_ftp {
        Calibration::ftp()
    } else {
        Calibration::default()
    };
    let calibration = recorder.finish(&fallback);
    if let Err(e) = calibration.save(Path::new(output_path)) {
        eprintln!("Failed to save calibration: {e}");
        std::process::exit(1);
    }

    println!(
        "Replayed {} hand readings ({} lines skipped), saved to {}:",
        recorder.samples(),
        skipped,
        output_path
    );
    for (group, range) in [
        ("curl", calibration.curl),
        ("thumb_bend", calibration.thumb_bend),
        ("thumb_rotation", calibration.thumb_rotation),
    ] {
        println!(
            "  {group:>14}: min={:>7.3}  max={:>7.3}  span={:>7.3}",
            range.min,
            range.max,
            range.span()
        );
    }
}
