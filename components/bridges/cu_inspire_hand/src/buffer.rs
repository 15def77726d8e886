//! Shared joint buffer between the receiver task and its readers.

use crate::joints::Hand;
use crate::sample::{HandJoints, RawJointSample};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Latest raw readings of both hands behind a single lock.
///
/// Starts all-zero. Every write replaces whole hands under one lock
/// acquisition, so readers never observe a partially applied message.
#[derive(Debug, Default)]
pub struct SharedJointBuffer {
    inner: Mutex<RawJointSample>,
}

impl SharedJointBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking writer cannot leave a half-written hand behind, so a
    // poisoned lock still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, RawJointSample> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write_hand(&self, hand: Hand, values: &HandJoints) {
        *self.lock().hand_mut(hand) = *values;
    }

    /// Apply several hand updates atomically.
    pub fn write_hands<'a, I>(&self, updates: I)
    where
        I: IntoIterator<Item = (Hand, &'a HandJoints)>,
    {
        let mut guard = self.lock();
        for (hand, values) in updates {
            *guard.hand_mut(hand) = *values;
        }
    }

    pub fn read_hand(&self, hand: Hand) -> HandJoints {
        *self.lock().hand(hand)
    }

    /// Copy of both hands taken under one lock.
    pub fn snapshot(&self) -> RawJointSample {
        *self.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_zeroed() {
        let buf = SharedJointBuffer::new();
        assert_eq!(buf.snapshot(), RawJointSample::default());
    }

    #[test]
    fn hand_writes_are_independent() {
        let buf = SharedJointBuffer::new();
        buf.write_hand(Hand::Left, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(buf.read_hand(Hand::Right), [0.0; 6]);
        assert_eq!(buf.read_hand(Hand::Left), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn readers_never_see_mixed_messages() {
        let buf = Arc::new(SharedJointBuffer::new());
        let writer = {
            let buf = Arc::clone(&buf);
            thread::spawn(move || {
                for i in 0..2000 {
                    let v = [f64::from(i); 6];
                    buf.write_hands([(Hand::Right, &v), (Hand::Left, &v)]);
                }
            })
        };
        for _ in 0..2000 {
            let snap = buf.snapshot();
            let first = snap.right[0];
            assert!(snap.right.iter().chain(snap.left.iter()).all(|&v| v == first));
        }
        writer.join().unwrap();
    }
}
