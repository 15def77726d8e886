//! Example application for the `cu_inspire_hand` bridge.
//!
//! A simulated hand publishes telemetry on the in-process loopback bus, the
//! controller normalizes it, and every publish period the named joint values
//! are overlaid on the model's neutral pose and written to stdout as one JSON
//! line for a viewer to pick up.
//!
//! ```sh
//! cargo run -p cu-inspire-hand-demo -- --variant mimic --ticks 50
//! cargo run -p cu-inspire-hand-demo -- --schema ftp --config hand.json
//! cargo run -p cu-inspire-hand-demo -- --variant mimic --urdf g1.urdf
//! ```

use anyhow::Context;
use clap::Parser;
use cu_inspire_hand::prelude::*;
use cu_inspire_hand::transport::{LoopbackPublisher, loopback};
use log::{LevelFilter, debug, info, warn};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(about = "Stream simulated Inspire hand joints as JSON lines")]
struct Args {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Message schema: ftp or dfx.
    #[arg(long)]
    schema: Option<String>,

    /// Joint name space: direct or mimic.
    #[arg(long)]
    variant: Option<String>,

    /// Calibration file written by inspire-calibrate.
    #[arg(long)]
    calibration: Option<PathBuf>,

    /// Robot URDF; its movable joints seed the model's neutral pose.
    #[arg(long)]
    urdf: Option<PathBuf>,

    /// Stop after this many viewer ticks.
    #[arg(long)]
    ticks: Option<u64>,

    /// Simulated publish rate of the hand, in Hz.
    #[arg(long, default_value_t = 100.0)]
    hand_rate: f64,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays a clean JSON-lines feed.
    TermLogger::init(
        args.log_level,
        ConfigBuilder::new().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to setup logger.")?;

    let mut config = match &args.config {
        Some(path) => HandConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => HandConfig::default(),
    };
    if let Some(schema) = &args.schema {
        config.set_schema(schema)?;
    }
    if let Some(variant) = &args.variant {
        config.set_variant(variant)?;
    }
    if let Some(path) = &args.calibration {
        config.calibration = Some(
            Calibration::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
        );
    }

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || running.store(false, Ordering::Relaxed))
            .context("Failed to install Ctrl-C handler")?;
    }

    let topics = config.topics();
    let mut publishers = Vec::new();
    let mut subscribers: Vec<Box<dyn HandStateSubscriber>> = Vec::new();
    for topic in &topics.state {
        let (publisher, subscriber) = loopback(topic);
        publishers.push(publisher);
        subscribers.push(Box::new(subscriber));
    }

    let hand_period = Duration::from_secs_f64(1.0 / args.hand_rate.max(1.0));
    let simulator = {
        let running = running.clone();
        let schema = config.schema;
        let calibration = config.calibration();
        thread::spawn(move || {
            simulate_hand(schema, &calibration, &publishers, hand_period, &running)
        })
    };

    let mut hand = HandController::start(config, subscribers)?;
    let mut model = match &args.urdf {
        Some(path) => JointConfiguration::from_urdf(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => JointConfiguration::for_variant(hand.config().variant),
    };
    info!("Model has {} joints", model.len());
    let mut sink = JsonLinesSink::new(std::io::stdout().lock());
    let period = hand.config().publish_period();

    let mut tick = 0u64;
    while running.load(Ordering::Relaxed) && args.ticks.is_none_or(|max| tick < max) {
        let started = Instant::now();
        let state = hand.get_state();
        let applied = model.apply(&state);
        debug!("Tick {tick}: applied {applied} joints");
        sink.publish(&model.joint_values())?;
        tick += 1;
        thread::sleep(period.saturating_sub(started.elapsed()));
    }

    running.store(false, Ordering::Relaxed);
    hand.shutdown();
    if simulator.join().is_err() {
        warn!("Hand simulator panicked");
    }
    info!("Streamed {tick} ticks");
    Ok(())
}

/// Sweep every joint through its calibrated range until `running` clears.
fn simulate_hand(
    schema: Schema,
    calibration: &Calibration,
    publishers: &[LoopbackPublisher],
    period: Duration,
    running: &AtomicBool,
) {
    let started = Instant::now();
    while running.load(Ordering::Relaxed) {
        let t = started.elapsed().as_secs_f64();
        let mut right = [0.0f64; 6];
        let mut left = [0.0f64; 6];
        for joint in Joint::ALL {
            let range = calibration.range_for(joint);
            let phase = joint.index() as f64 * 0.4;
            let wave = |offset: f64| 0.5 + 0.5 * (t * 1.5 + phase + offset).sin();
            right[joint.index()] = range.min + range.span() * wave(0.0);
            left[joint.index()] = range.min + range.span() * wave(std::f64::consts::PI);
        }

        match schema {
            Schema::Dfx => {
                let states = right
                    .iter()
                    .chain(left.iter())
                    .map(|&q| MotorState {
                        q: q as f32,
                        ..MotorState::default()
                    })
                    .collect();
                let msg = HandStateMessage::Dfx(MotorStates { states });
                for publisher in publishers {
                    publisher.publish(msg.clone());
                }
            }
            Schema::Ftp => {
                for (publisher, (hand, values)) in publishers
                    .iter()
                    .zip([(Hand::Right, right), (Hand::Left, left)])
                {
                    let state = InspireHandState {
                        angle_act: values.iter().map(|v| (v * 1000.0).round() as i16).collect(),
                        ..InspireHandState::default()
                    };
                    publisher.publish(HandStateMessage::Ftp { hand, state });
                }
            }
        }
        thread::sleep(period);
    }
}
