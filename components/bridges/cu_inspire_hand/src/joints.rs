//! Joint indexing and naming for the Inspire hand.
//!
//! Both hand schemas report the same 12 joints in a fixed order:
//!
//! | Id    | 0     | 1    | 2      | 3     | 4          | 5              |
//! |-------|-------|------|--------|-------|------------|----------------|
//! | Right | pinky | ring | middle | index | thumb-bend | thumb-rotation |
//!
//! and ids 6–11 repeat the same joints for the left hand.

use serde::{Deserialize, Serialize};

/// Number of actuated joints per hand.
pub const HAND_JOINTS: usize = 6;

/// Number of actuated joints over both hands.
pub const TOTAL_JOINTS: usize = 2 * HAND_JOINTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Right,
    Left,
}

impl Hand {
    pub const ALL: [Hand; 2] = [Hand::Right, Hand::Left];

    /// Offset of this hand's first joint in the 12-joint ordering.
    pub const fn offset(self) -> usize {
        match self {
            Hand::Right => 0,
            Hand::Left => HAND_JOINTS,
        }
    }

    /// Prefix used by the URDF joint names (`R_` / `L_`).
    pub const fn urdf_prefix(self) -> &'static str {
        match self {
            Hand::Right => "R",
            Hand::Left => "L",
        }
    }

    fn control_prefix(self) -> &'static str {
        match self {
            Hand::Right => "kRightHand",
            Hand::Left => "kLeftHand",
        }
    }
}

/// One actuated joint of a hand, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Pinky,
    Ring,
    Middle,
    Index,
    ThumbBend,
    ThumbRotation,
}

impl Joint {
    pub const ALL: [Joint; HAND_JOINTS] = [
        Joint::Pinky,
        Joint::Ring,
        Joint::Middle,
        Joint::Index,
        Joint::ThumbBend,
        Joint::ThumbRotation,
    ];

    /// The four fingers that only curl.
    pub const CURL: [Joint; 4] = [Joint::Pinky, Joint::Ring, Joint::Middle, Joint::Index];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Finger name as it appears inside URDF joint names.
    pub const fn finger(self) -> &'static str {
        match self {
            Joint::Pinky => "pinky",
            Joint::Ring => "ring",
            Joint::Middle => "middle",
            Joint::Index => "index",
            Joint::ThumbBend | Joint::ThumbRotation => "thumb",
        }
    }

    fn control_suffix(self) -> &'static str {
        match self {
            Joint::Pinky => "Pinky",
            Joint::Ring => "Ring",
            Joint::Middle => "Middle",
            Joint::Index => "Index",
            Joint::ThumbBend => "ThumbBend",
            Joint::ThumbRotation => "ThumbRotation",
        }
    }
}

/// Controller-side name of a joint, e.g. `kRightHandThumbBend`.
pub fn control_name(hand: Hand, joint: Joint) -> String {
    format!("{}{}", hand.control_prefix(), joint.control_suffix())
}

/// Global id (0–11) of a joint in the two-hand ordering.
pub const fn global_index(hand: Hand, joint: Joint) -> usize {
    hand.offset() + joint.index()
}

/// Control name → proximal URDF joint name.
const URDF_JOINT_MAP: [(&str, &str); TOTAL_JOINTS] = [
    ("kRightHandPinky", "R_pinky_proximal_joint"),
    ("kRightHandRing", "R_ring_proximal_joint"),
    ("kRightHandMiddle", "R_middle_proximal_joint"),
    ("kRightHandIndex", "R_index_proximal_joint"),
    ("kRightHandThumbBend", "R_thumb_proximal_pitch_joint"),
    ("kRightHandThumbRotation", "R_thumb_proximal_yaw_joint"),
    ("kLeftHandPinky", "L_pinky_proximal_joint"),
    ("kLeftHandRing", "L_ring_proximal_joint"),
    ("kLeftHandMiddle", "L_middle_proximal_joint"),
    ("kLeftHandIndex", "L_index_proximal_joint"),
    ("kLeftHandThumbBend", "L_thumb_proximal_pitch_joint"),
    ("kLeftHandThumbRotation", "L_thumb_proximal_yaw_joint"),
];

/// Look up the URDF joint driven by a control name.
pub fn urdf_joint_name(control: &str) -> Option<&'static str> {
    URDF_JOINT_MAP
        .iter()
        .find(|(ctrl, _)| *ctrl == control)
        .map(|(_, urdf)| *urdf)
}

/// URDF name for a control name, falling back to the control name itself.
pub fn remap_or_identity(control: &str) -> String {
    urdf_joint_name(control)
        .map(str::to_owned)
        .unwrap_or_else(|| control.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_names_follow_reporting_order() {
        assert_eq!(control_name(Hand::Right, Joint::Pinky), "kRightHandPinky");
        assert_eq!(
            control_name(Hand::Left, Joint::ThumbRotation),
            "kLeftHandThumbRotation"
        );
        assert_eq!(global_index(Hand::Left, Joint::Pinky), 6);
        assert_eq!(global_index(Hand::Right, Joint::ThumbRotation), 5);
    }

    #[test]
    fn every_control_name_has_a_urdf_joint() {
        for hand in Hand::ALL {
            for joint in Joint::ALL {
                let ctrl = control_name(hand, joint);
                let urdf = urdf_joint_name(&ctrl).expect("missing remap entry");
                assert!(urdf.starts_with(hand.urdf_prefix()));
                assert!(urdf.contains(joint.finger()));
            }
        }
    }

    #[test]
    fn unknown_names_fall_back_to_identity() {
        assert_eq!(remap_or_identity("kRightHandWrist"), "kRightHandWrist");
        assert_eq!(
            remap_or_identity("kLeftHandIndex"),
            "L_index_proximal_joint"
        );
    }
}
