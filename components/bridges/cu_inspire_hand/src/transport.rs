//! Subscriber seam towards the middleware bus.
//!
//! The bus itself lives outside this crate. Anything that can hand back the
//! latest [`HandStateMessage`] without blocking can feed the receiver; the
//! in-process loopback here backs the demo and the tests.

use crate::messages::HandStateMessage;
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};

pub const TOPIC_FTP_LEFT_COMMAND: &str = "rt/inspire_hand/ctrl/l";
pub const TOPIC_FTP_RIGHT_COMMAND: &str = "rt/inspire_hand/ctrl/r";
pub const TOPIC_FTP_LEFT_STATE: &str = "rt/inspire_hand/state/l";
pub const TOPIC_FTP_RIGHT_STATE: &str = "rt/inspire_hand/state/r";

pub const TOPIC_DFX_COMMAND: &str = "rt/inspire/cmd";
pub const TOPIC_DFX_STATE: &str = "rt/inspire/state";

/// A bound subscription to one hand-state topic.
pub trait HandStateSubscriber: Send {
    fn topic(&self) -> &str;

    /// Latest unread message, or `None` when nothing new arrived.
    ///
    /// Must not block.
    fn read(&mut self) -> Option<HandStateMessage>;
}

// Only the newest sample matters; anything older is dropped on read.
const LOOPBACK_DEPTH: usize = 16;

/// Publishing end of an in-process topic.
#[derive(Debug, Clone)]
pub struct LoopbackPublisher {
    topic: String,
    tx: Sender<HandStateMessage>,
    rx: Receiver<HandStateMessage>,
}

/// Subscribing end of an in-process topic.
#[derive(Debug)]
pub struct LoopbackSubscriber {
    topic: String,
    rx: Receiver<HandStateMessage>,
}

/// Bind a publisher and a subscriber to `topic`.
pub fn loopback(topic: &str) -> (LoopbackPublisher, LoopbackSubscriber) {
    let (tx, rx) = bounded(LOOPBACK_DEPTH);
    (
        LoopbackPublisher {
            topic: topic.to_owned(),
            tx,
            rx: rx.clone(),
        },
        LoopbackSubscriber {
            topic: topic.to_owned(),
            rx,
        },
    )
}

impl LoopbackPublisher {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Publish without blocking. When the queue is full the oldest message
    /// is evicted.
    pub fn publish(&self, msg: HandStateMessage) {
        let mut msg = msg;
        while let Err(TrySendError::Full(back)) = self.tx.try_send(msg) {
            let _ = self.rx.try_recv();
            msg = back;
        }
    }
}

impl HandStateSubscriber for LoopbackSubscriber {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn read(&mut self) -> Option<HandStateMessage> {
        self.rx.try_iter().last()
    }
}
