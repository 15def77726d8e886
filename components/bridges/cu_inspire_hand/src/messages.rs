//! Hand-state message schemas.
//!
//! Two firmware flavours publish hand state:
//!
//! - FTP: one [`InspireHandState`] per hand, on its own topic. Every field is
//!   a 6-long sequence; the joint reading is `angle_act` divided by
//!   [`FTP_ANGLE_DIVISOR`].
//! - DFX: one [`MotorStates`] carrying 12 motors for both hands; the joint
//!   reading is each motor's `q`.
//!
//! Sequences are plain `Vec`s because the transport may hand us anything;
//! [`HandStateMessage::hand_updates`] checks their shape before the receiver
//! touches the shared buffer.

use crate::joints::{HAND_JOINTS, Hand, Joint, TOTAL_JOINTS, global_index};
use crate::sample::HandJoints;
use serde::{Deserialize, Serialize};

/// FTP `angle_act` registers per unit of raw joint reading.
pub const FTP_ANGLE_DIVISOR: f64 = 1000.0;

/// Per-hand state of an FTP hand (`inspire.inspire_hand_state`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InspireHandState {
    pub pos_act: Vec<i16>,
    pub angle_act: Vec<i16>,
    pub force_act: Vec<i16>,
    pub current: Vec<i16>,
    pub err: Vec<u8>,
    pub status: Vec<u8>,
    pub temperature: Vec<u8>,
}

/// One motor of a DFX hand.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotorState {
    pub mode: u8,
    pub q: f32,
    pub dq: f32,
    pub ddq: f32,
    pub tau_est: f32,
    pub temperature: u8,
    pub lost: u32,
}

/// Both DFX hands, 12 motors in joint-id order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotorStates {
    pub states: Vec<MotorState>,
}

/// A message read from a hand-state topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "lowercase")]
pub enum HandStateMessage {
    Ftp { hand: Hand, state: InspireHandState },
    Dfx(MotorStates),
}

/// Why a message could not be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageDefect {
    MissingField(&'static str),
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl core::fmt::Display for MessageDefect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing field '{field}'"),
            Self::WrongLength {
                field,
                expected,
                actual,
            } => write!(f, "'{field}' has {actual} entries, expected {expected}"),
        }
    }
}

/// Hands carried by one message, at most two.
pub type HandUpdates = Vec<(Hand, HandJoints)>;

fn check_len(field: &'static str, actual: usize, expected: usize) -> Result<(), MessageDefect> {
    match actual {
        0 => Err(MessageDefect::MissingField(field)),
        n if n != expected => Err(MessageDefect::WrongLength {
            field,
            expected,
            actual: n,
        }),
        _ => Ok(()),
    }
}

impl InspireHandState {
    /// Raw joint readings of this hand.
    pub fn joint_readings(&self) -> Result<HandJoints, MessageDefect> {
        check_len("angle_act", self.angle_act.len(), HAND_JOINTS)?;
        let mut out = [0.0; HAND_JOINTS];
        for (dst, &src) in out.iter_mut().zip(&self.angle_act) {
            *dst = f64::from(src) / FTP_ANGLE_DIVISOR;
        }
        Ok(out)
    }
}

impl MotorStates {
    /// Raw joint readings of one hand.
    pub fn joint_readings(&self, hand: Hand) -> Result<HandJoints, MessageDefect> {
        check_len("states", self.states.len(), TOTAL_JOINTS)?;
        let mut out = [0.0; HAND_JOINTS];
        for joint in Joint::ALL {
            out[joint.index()] = f64::from(self.states[global_index(hand, joint)].q);
        }
        Ok(out)
    }
}

impl HandStateMessage {
    /// Validate the message and extract the readings it carries.
    ///
    /// All-or-nothing: a defect in any hand rejects the whole message.
    pub fn hand_updates(&self) -> Result<HandUpdates, MessageDefect> {
        match self {
            Self::Ftp { hand, state } => Ok(vec![(*hand, state.joint_readings()?)]),
            Self::Dfx(states) => Ok(vec![
                (Hand::Right, states.joint_readings(Hand::Right)?),
                (Hand::Left, states.joint_readings(Hand::Left)?),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ftp(angles: Vec<i16>) -> InspireHandState {
        InspireHandState {
            angle_act: angles,
            ..InspireHandState::default()
        }
    }

    #[test]
    fn ftp_angles_are_scaled() {
        let state = ftp(vec![1000, 500, 0, 1700, 250, -100]);
        let r = state.joint_readings().unwrap();
        assert_eq!(r, [1.0, 0.5, 0.0, 1.7, 0.25, -0.1]);
    }

    #[test]
    fn ftp_wrong_length_is_a_defect() {
        assert_eq!(
            ftp(vec![1, 2, 3]).joint_readings(),
            Err(MessageDefect::WrongLength {
                field: "angle_act",
                expected: 6,
                actual: 3
            })
        );
        assert_eq!(
            ftp(vec![]).joint_readings(),
            Err(MessageDefect::MissingField("angle_act"))
        );
    }

    #[test]
    fn dfx_splits_hands_by_joint_id() {
        let states = MotorStates {
            states: (0..12)
                .map(|i| MotorState {
                    q: i as f32,
                    ..MotorState::default()
                })
                .collect(),
        };
        let updates = HandStateMessage::Dfx(states).hand_updates().unwrap();
        assert_eq!(updates[0], (Hand::Right, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(updates[1], (Hand::Left, [6.0, 7.0, 8.0, 9.0, 10.0, 11.0]));
    }

    #[test]
    fn dfx_short_message_is_rejected_whole() {
        let msg = HandStateMessage::Dfx(MotorStates {
            states: vec![MotorState::default(); 6],
        });
        assert!(msg.hand_updates().is_err());
    }

    #[test]
    fn messages_deserialize_from_tagged_json() {
        let json = r#"{"schema":"ftp","hand":"left","state":{
            "pos_act":[0,0,0,0,0,0],"angle_act":[1,2,3,4,5,6],"force_act":[0,0,0,0,0,0],
            "current":[0,0,0,0,0,0],"err":[0,0,0,0,0,0],"status":[0,0,0,0,0,0],
            "temperature":[30,30,30,30,30,30]}}"#;
        let msg: HandStateMessage = serde_json::from_str(json).unwrap();
        let updates = msg.hand_updates().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, Hand::Left);
    }
}
