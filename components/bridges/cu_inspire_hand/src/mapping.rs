//! Normalized sample → named joint values.
//!
//! Two pure mappings share the same [`NormalizedSample`] input; the
//! [`Variant`] in the configuration picks one.

use crate::joints::{Hand, Joint, control_name, remap_or_identity};
use crate::mimic::expand_hand;
use crate::sample::NormalizedSample;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Joint name → value, ordered by name.
pub type JointValues = BTreeMap<String, f64>;

/// Target joint name space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// 6 proximal joints per hand, one per actuator.
    #[default]
    Direct,
    /// 12 joints per hand, dependent joints synthesized from the actuators.
    Mimic,
}

impl Variant {
    /// Parse from a config string.  Returns `None` for unrecognised values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "direct" => Some(Self::Direct),
            "mimic" | "mimic-expansion" => Some(Self::Mimic),
            _ => None,
        }
    }

    /// Number of joints the variant produces over both hands.
    pub const fn joint_count(self) -> usize {
        match self {
            Self::Direct => 12,
            Self::Mimic => 24,
        }
    }
}

/// One value per actuator, named through the URDF remap table.
pub fn direct_map(normalized: &NormalizedSample) -> JointValues {
    let mut out = JointValues::new();
    for hand in Hand::ALL {
        for joint in Joint::ALL {
            let name = remap_or_identity(&control_name(hand, joint));
            out.insert(name, normalized.get(hand, joint));
        }
    }
    out
}

/// Both hands expanded into the detailed model's joints.
pub fn expand_mimic(normalized: &NormalizedSample) -> JointValues {
    Hand::ALL
        .into_iter()
        .flat_map(|hand| expand_hand(hand, normalized.hand(hand)))
        .collect()
}

pub fn to_named_joints(normalized: &NormalizedSample, variant: Variant) -> JointValues {
    match variant {
        Variant::Direct => direct_map(normalized),
        Variant::Mimic => expand_mimic(normalized),
    }
}
