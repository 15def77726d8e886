//! Telemetry receiver: subscribers → shared joint buffer.

use crate::buffer::SharedJointBuffer;
use crate::transport::HandStateSubscriber;
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// What one poll of one subscriber did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    NoMessage,
    Updated,
    /// A message arrived but was malformed; the buffer kept its values.
    Rejected,
}

/// Summary of one [`TelemetryReceiver::poll_once`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub updated: usize,
    pub rejected: usize,
}

impl PollStats {
    pub fn any_updated(&self) -> bool {
        self.updated > 0
    }
}

pub struct TelemetryReceiver {
    subscribers: Vec<Box<dyn HandStateSubscriber>>,
    buffer: Arc<SharedJointBuffer>,
}

impl TelemetryReceiver {
    pub fn new(
        subscribers: Vec<Box<dyn HandStateSubscriber>>,
        buffer: Arc<SharedJointBuffer>,
    ) -> Self {
        Self {
            subscribers,
            buffer,
        }
    }

    pub fn buffer(&self) -> &Arc<SharedJointBuffer> {
        &self.buffer
    }

    /// Read one subscriber and apply what it returned.
    pub fn poll_subscriber(
        sub: &mut dyn HandStateSubscriber,
        buffer: &SharedJointBuffer,
    ) -> PollOutcome {
        let Some(msg) = sub.read() else {
            return PollOutcome::NoMessage;
        };
        match msg.hand_updates() {
            Ok(updates) => {
                buffer.write_hands(updates.iter().map(|(hand, values)| (*hand, values)));
                PollOutcome::Updated
            }
            Err(defect) => {
                warn!("Skipping hand state on '{}': {}", sub.topic(), defect);
                PollOutcome::Rejected
            }
        }
    }

    /// Non-blocking pass over every subscriber.
    pub fn poll_once(&mut self) -> PollStats {
        let mut stats = PollStats::default();
        for sub in &mut self.subscribers {
            match Self::poll_subscriber(&mut **sub, &self.buffer) {
                PollOutcome::Updated => stats.updated += 1,
                PollOutcome::Rejected => stats.rejected += 1,
                PollOutcome::NoMessage => {}
            }
        }
        stats
    }

    /// Poll until the first valid message lands or `timeout` expires.
    ///
    /// Returns `false` on timeout; the buffer then stays all-zero until
    /// telemetry arrives.
    pub fn wait_for_first(&mut self, timeout: Duration, interval: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.poll_once().any_updated() {
                debug!("First hand state received");
                return true;
            }
            if Instant::now() >= deadline {
                warn!(
                    "No hand state within {:?}; continuing with zeroed joints",
                    timeout
                );
                return false;
            }
            thread::sleep(interval);
        }
    }

    /// Move the receiver onto a background polling thread.
    pub fn spawn(self, interval: Duration) -> std::io::Result<ReceiverHandle> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();
        let mut receiver = self;
        let join = thread::Builder::new()
            .name("inspire-hand-rx".into())
            .spawn(move || {
                let mut polls = 0u64;
                while !stop2.load(Ordering::Relaxed) {
                    receiver.poll_once();
                    polls += 1;
                    thread::sleep(interval);
                }
                debug!("Hand state polling stopped after {} polls", polls);
            })?;
        info!("Hand state polling every {:?}", interval);
        Ok(ReceiverHandle {
            stop,
            join: Some(join),
        })
    }
}

/// Owner of the background polling thread.
///
/// Dropping the handle stops and joins the thread.
#[derive(Debug)]
pub struct ReceiverHandle {
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl ReceiverHandle {
    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|j| !j.is_finished())
    }

    /// Signal the loop and wait for it to exit.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                warn!("Hand state polling thread panicked");
            }
        }
    }
}

impl Drop for ReceiverHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joints::Hand;
    use crate::messages::{HandStateMessage, InspireHandState};
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Keeps every log record emitted by the test binary.
    struct Recorder;

    static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
    static RECORDER: Recorder = Recorder;

    impl Log for Recorder {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            RECORDS
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    fn install_recorder() {
        // Another test may have installed it already.
        let _ = log::set_logger(&RECORDER);
        log::set_max_level(LevelFilter::Trace);
    }

    /// Records mentioning `topic`. Tests share the logger, so each uses its own topic.
    fn records_for(topic: &str) -> Vec<(Level, String)> {
        RECORDS
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, msg)| msg.contains(topic))
            .cloned()
            .collect()
    }

    /// Subscriber replaying a fixed script, one entry per read.
    struct Scripted {
        topic: &'static str,
        script: VecDeque<Option<HandStateMessage>>,
    }

    impl HandStateSubscriber for Scripted {
        fn topic(&self) -> &str {
            self.topic
        }

        fn read(&mut self) -> Option<HandStateMessage> {
            self.script.pop_front().flatten()
        }
    }

    fn ftp(hand: Hand, angles: Vec<i16>) -> HandStateMessage {
        HandStateMessage::Ftp {
            hand,
            state: InspireHandState {
                angle_act: angles,
                ..InspireHandState::default()
            },
        }
    }

    fn receiver_on(
        topic: &'static str,
        script: Vec<Option<HandStateMessage>>,
    ) -> TelemetryReceiver {
        TelemetryReceiver::new(
            vec![Box::new(Scripted {
                topic,
                script: script.into(),
            })],
            Arc::new(SharedJointBuffer::new()),
        )
    }

    fn receiver(script: Vec<Option<HandStateMessage>>) -> TelemetryReceiver {
        receiver_on("test/scripted", script)
    }

    #[test]
    fn malformed_message_keeps_previous_values() {
        let mut rx = receiver(vec![
            Some(ftp(Hand::Right, vec![100, 200, 300, 400, 500, 600])),
            Some(ftp(Hand::Right, vec![1, 2, 3])),
        ]);
        assert_eq!(rx.poll_once(), PollStats { updated: 1, rejected: 0 });
        let before = rx.buffer().snapshot();
        assert_eq!(rx.poll_once(), PollStats { updated: 0, rejected: 1 });
        assert_eq!(rx.buffer().snapshot(), before);
    }

    #[test]
    fn malformed_message_logs_one_warning_naming_the_topic() {
        const TOPIC: &str = "test/short-angles";
        install_recorder();
        let mut rx = receiver_on(
            TOPIC,
            vec![
                Some(ftp(Hand::Left, vec![1000; 6])),
                None,
                Some(ftp(Hand::Left, vec![1, 2, 3])),
            ],
        );
        rx.poll_once();
        rx.poll_once();
        assert!(records_for(TOPIC).is_empty());

        assert_eq!(rx.poll_once().rejected, 1);
        let records = records_for(TOPIC);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, Level::Warn);
        assert!(records[0].1.contains("'angle_act' has 3 entries, expected 6"));
    }

    #[test]
    fn missing_message_is_benign() {
        let mut rx = receiver(vec![None]);
        assert_eq!(rx.poll_once(), PollStats::default());
        assert_eq!(rx.buffer().snapshot(), Default::default());
    }

    #[test]
    fn wait_for_first_times_out_with_zeroed_buffer() {
        let mut rx = receiver(vec![]);
        let started = Instant::now();
        assert!(!rx.wait_for_first(Duration::from_millis(20), Duration::from_millis(2)));
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(rx.buffer().snapshot(), Default::default());
    }

    #[test]
    fn wait_for_first_skips_bad_messages() {
        let mut rx = receiver(vec![
            Some(ftp(Hand::Left, vec![])),
            None,
            Some(ftp(Hand::Left, vec![1000; 6])),
        ]);
        assert!(rx.wait_for_first(Duration::from_secs(5), Duration::from_millis(1)));
        assert_eq!(rx.buffer().read_hand(Hand::Left), [1.0; 6]);
    }

    #[test]
    fn spawned_loop_stops_on_shutdown() {
        let rx = receiver(vec![Some(ftp(Hand::Right, vec![500; 6]))]);
        let buffer = rx.buffer().clone();
        let mut handle = rx.spawn(Duration::from_millis(1)).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while buffer.read_hand(Hand::Right) != [0.5; 6] && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(buffer.read_hand(Hand::Right), [0.5; 6]);
        assert!(handle.is_running());
        handle.shutdown();
        assert!(!handle.is_running());
    }
}
