//! Raw and normalized two-hand samples.

use crate::joints::{HAND_JOINTS, Hand, Joint, TOTAL_JOINTS};
use serde::{Deserialize, Serialize};

/// Per-hand joint readings in reporting order (see [`crate::joints`]).
pub type HandJoints = [f64; HAND_JOINTS];

/// Actuator readings for both hands, as last written by the receiver.
///
/// Values are in whatever unit the hand reports; the normalizer maps them
/// into `[0, 1]` with [`crate::calibration::Calibration`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawJointSample {
    pub right: HandJoints,
    pub left: HandJoints,
}

/// Calibrated readings for both hands. Every value lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedSample {
    pub right: HandJoints,
    pub left: HandJoints,
}

macro_rules! impl_hand_access {
    ($ty:ty) => {
        impl $ty {
            /// Build from the flat 12-joint ordering (right 0–5, left 6–11).
            pub fn from_flat(values: [f64; TOTAL_JOINTS]) -> Self {
                let mut right = [0.0; HAND_JOINTS];
                let mut left = [0.0; HAND_JOINTS];
                right.copy_from_slice(&values[..HAND_JOINTS]);
                left.copy_from_slice(&values[HAND_JOINTS..]);
                Self { right, left }
            }

            pub fn to_flat(&self) -> [f64; TOTAL_JOINTS] {
                let mut out = [0.0; TOTAL_JOINTS];
                out[..HAND_JOINTS].copy_from_slice(&self.right);
                out[HAND_JOINTS..].copy_from_slice(&self.left);
                out
            }

            pub fn hand(&self, hand: Hand) -> &HandJoints {
                match hand {
                    Hand::Right => &self.right,
                    Hand::Left => &self.left,
                }
            }

            pub fn hand_mut(&mut self, hand: Hand) -> &mut HandJoints {
                match hand {
                    Hand::Right => &mut self.right,
                    Hand::Left => &mut self.left,
                }
            }

            pub fn get(&self, hand: Hand, joint: Joint) -> f64 {
                self.hand(hand)[joint.index()]
            }
        }
    };
}

impl_hand_access!(RawJointSample);
impl_hand_access!(NormalizedSample);
