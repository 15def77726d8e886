//! Mimic-joint synthesis for the detailed hand model.
//!
//! The detailed URDF has 12 joints per hand but only 6 actuators. The extra
//! joints follow a driving actuator through a fixed linear ratio:
//!
//! - thumb yaw follows thumb rotation, thumb pitch follows thumb bend;
//! - thumb intermediate = 1.6 × pitch, thumb distal = 2.4 × pitch;
//! - every curl finger's intermediate joint equals its proximal joint.
//!
//! This is an approximation of the linkage, not a measured constraint, and
//! derived values are not clamped again.

use crate::joints::{HAND_JOINTS, Hand, Joint};
use crate::sample::HandJoints;

/// Joints synthesized per hand.
pub const MIMIC_JOINTS: usize = 2 * HAND_JOINTS;

pub const THUMB_INTERMEDIATE_RATIO: f64 = 1.6;
pub const THUMB_DISTAL_RATIO: f64 = 2.4;
pub const FINGER_INTERMEDIATE_RATIO: f64 = 1.0;

/// A joint driven by one actuator through `value = ratio × driver`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MimicRule {
    /// URDF joint name without the `R_`/`L_` prefix.
    pub joint: &'static str,
    pub driver: Joint,
    pub ratio: f64,
}

impl MimicRule {
    const fn new(joint: &'static str, driver: Joint, ratio: f64) -> Self {
        Self {
            joint,
            driver,
            ratio,
        }
    }

    #[inline]
    pub fn apply(&self, hand: &HandJoints) -> f64 {
        self.ratio * hand[self.driver.index()]
    }

    pub fn joint_name(&self, hand: Hand) -> String {
        format!("{}_{}", hand.urdf_prefix(), self.joint)
    }
}

pub const MIMIC_RULES: [MimicRule; MIMIC_JOINTS] = [
    MimicRule::new("thumb_proximal_yaw_joint", Joint::ThumbRotation, 1.0),
    MimicRule::new("thumb_proximal_pitch_joint", Joint::ThumbBend, 1.0),
    MimicRule::new("thumb_intermediate_joint", Joint::ThumbBend, THUMB_INTERMEDIATE_RATIO),
    MimicRule::new("thumb_distal_joint", Joint::ThumbBend, THUMB_DISTAL_RATIO),
    MimicRule::new("index_proximal_joint", Joint::Index, 1.0),
    MimicRule::new("index_intermediate_joint", Joint::Index, FINGER_INTERMEDIATE_RATIO),
    MimicRule::new("middle_proximal_joint", Joint::Middle, 1.0),
    MimicRule::new("middle_intermediate_joint", Joint::Middle, FINGER_INTERMEDIATE_RATIO),
    MimicRule::new("ring_proximal_joint", Joint::Ring, 1.0),
    MimicRule::new("ring_intermediate_joint", Joint::Ring, FINGER_INTERMEDIATE_RATIO),
    MimicRule::new("pinky_proximal_joint", Joint::Pinky, 1.0),
    MimicRule::new("pinky_intermediate_joint", Joint::Pinky, FINGER_INTERMEDIATE_RATIO),
];

/// Expand one hand's 6 normalized values into the 12 model joints.
pub fn expand_hand(hand: Hand, normalized: &HandJoints) -> Vec<(String, f64)> {
    MIMIC_RULES
        .iter()
        .map(|rule| (rule.joint_name(hand), rule.apply(normalized)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(out: &[(String, f64)], name: &str) -> f64 {
        out.iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .unwrap_or_else(|| panic!("{name} missing"))
    }

    #[test]
    fn thumb_chain_uses_fixed_ratios() {
        for p in [0.0, 0.25, 0.5, 0.8, 1.0] {
            let hand = [0.0, 0.0, 0.0, 0.0, p, 0.3];
            let out = expand_hand(Hand::Right, &hand);
            assert_eq!(lookup(&out, "R_thumb_proximal_pitch_joint"), p);
            assert_eq!(lookup(&out, "R_thumb_intermediate_joint"), 1.6 * p);
            assert_eq!(lookup(&out, "R_thumb_distal_joint"), 2.4 * p);
            assert_eq!(lookup(&out, "R_thumb_proximal_yaw_joint"), 0.3);
        }
    }

    #[test]
    fn curl_fingers_copy_into_intermediate() {
        let hand = [0.1, 0.2, 0.3, 0.4, 0.0, 0.0];
        let out = expand_hand(Hand::Left, &hand);
        assert_eq!(out.len(), MIMIC_JOINTS);
        for (finger, v) in [("pinky", 0.1), ("ring", 0.2), ("middle", 0.3), ("index", 0.4)] {
            assert_eq!(lookup(&out, &format!("L_{finger}_proximal_joint")), v);
            assert_eq!(lookup(&out, &format!("L_{finger}_intermediate_joint")), v);
        }
    }

    #[test]
    fn derived_values_are_not_clamped() {
        let out = expand_hand(Hand::Right, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(lookup(&out, "R_thumb_distal_joint"), 2.4);
    }
}
