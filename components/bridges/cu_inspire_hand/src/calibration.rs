//! Calibration ranges and normalization for Inspire hand joints.
//!
//! Each joint group has a recorded `(min, max)` actuator range. Readings are
//! mapped into `[0, 1]` with the direction reversed: a reading at `max` (hand
//! open) maps to `0.0` and a reading at `min` maps to `1.0`. Readings outside
//! the range are clamped, never rejected.
//!
//! Run the `inspire-calibrate` binary on a telemetry recording to generate a
//! `calibration.json`.

use crate::error::HandResult;
use crate::joints::{HAND_JOINTS, Joint};
use crate::sample::{HandJoints, NormalizedSample, RawJointSample};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Joints that share one calibration range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointGroup {
    /// Pinky, ring, middle and index.
    Curl,
    ThumbBend,
    ThumbRotation,
}

impl JointGroup {
    pub const fn of(joint: Joint) -> Self {
        match joint {
            Joint::Pinky | Joint::Ring | Joint::Middle | Joint::Index => Self::Curl,
            Joint::ThumbBend => Self::ThumbBend,
            Joint::ThumbRotation => Self::ThumbRotation,
        }
    }
}

// =========================================================================
// Per-group range
// =========================================================================

/// Actuator range of one joint group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRange {
    pub min: f64,
    pub max: f64,
}

impl CalibrationRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `clip((max - raw) / (max - min), 0, 1)`.
    ///
    /// A degenerate range (`min == max`) yields `0.0` for readings at or
    /// above `max` and `1.0` below it.
    #[inline]
    pub fn normalize(&self, raw: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return if raw < self.max { 1.0 } else { 0.0 };
        }
        let v = (self.max - raw) / span;
        // NaN readings land on the open-hand end.
        if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

// =========================================================================
// Calibration for a whole hand
// =========================================================================

/// Curl joints: `[0.0, 1.7]`.
pub const DEFAULT_CURL_RANGE: CalibrationRange = CalibrationRange::new(0.0, 1.7);
/// Thumb bend: `[0.0, 0.5]`.
pub const DEFAULT_THUMB_BEND_RANGE: CalibrationRange = CalibrationRange::new(0.0, 0.5);
/// Thumb rotation: `[-0.1, 1.3]`.
pub const DEFAULT_THUMB_ROTATION_RANGE: CalibrationRange = CalibrationRange::new(-0.1, 1.3);

/// FTP hands report `angle_act / 1000`: `0.0` closed, `1.0` open, every joint.
pub const FTP_RANGE: CalibrationRange = CalibrationRange::new(0.0, 1.0);

/// Calibration ranges applied identically to both hands.
///
/// [`Default`] holds the DFX ranges, in motor `q` radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub curl: CalibrationRange,
    pub thumb_bend: CalibrationRange,
    pub thumb_rotation: CalibrationRange,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            curl: DEFAULT_CURL_RANGE,
            thumb_bend: DEFAULT_THUMB_BEND_RANGE,
            thumb_rotation: DEFAULT_THUMB_ROTATION_RANGE,
        }
    }
}

impl Calibration {
    /// Ranges for the FTP register scale.
    pub const fn ftp() -> Self {
        Self {
            curl: FTP_RANGE,
            thumb_bend: FTP_RANGE,
            thumb_rotation: FTP_RANGE,
        }
    }

    pub fn load(path: &Path) -> HandResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> HandResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn range(&self, group: JointGroup) -> &CalibrationRange {
        match group {
            JointGroup::Curl => &self.curl,
            JointGroup::ThumbBend => &self.thumb_bend,
            JointGroup::ThumbRotation => &self.thumb_rotation,
        }
    }

    /// Range used for `joint`.
    pub fn range_for(&self, joint: Joint) -> &CalibrationRange {
        self.range(JointGroup::of(joint))
    }

    pub fn normalize_joint(&self, joint: Joint, raw: f64) -> f64 {
        self.range_for(joint).normalize(raw)
    }

    pub fn normalize_hand(&self, raw: &HandJoints) -> HandJoints {
        let mut out = [0.0; HAND_JOINTS];
        for (joint, (dst, &src)) in Joint::ALL.iter().zip(out.iter_mut().zip(raw.iter())) {
            *dst = self.normalize_joint(*joint, src);
        }
        out
    }

    /// Normalize both hands of a raw sample.
    pub fn normalize(&self, raw: &RawJointSample) -> NormalizedSample {
        NormalizedSample {
            right: self.normalize_hand(&raw.right),
            left: self.normalize_hand(&raw.left),
        }
    }
}

// =========================================================================
// Range recording
// =========================================================================

/// Tracks the observed min and max of every joint group.
#[derive(Debug, Clone, Default)]
pub struct RangeRecorder {
    curl: Option<CalibrationRange>,
    thumb_bend: Option<CalibrationRange>,
    thumb_rotation: Option<CalibrationRange>,
    samples: u64,
}

impl RangeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one hand's readings. Non-finite values are ignored.
    pub fn record_hand(&mut self, hand: &HandJoints) {
        for joint in Joint::ALL {
            let v = hand[joint.index()];
            if !v.is_finite() {
                continue;
            }
            let slot = match JointGroup::of(joint) {
                JointGroup::Curl => &mut self.curl,
                JointGroup::ThumbBend => &mut self.thumb_bend,
                JointGroup::ThumbRotation => &mut self.thumb_rotation,
            };
            let r = slot.get_or_insert(CalibrationRange::new(v, v));
            r.min = r.min.min(v);
            r.max = r.max.max(v);
        }
        self.samples += 1;
    }

    pub fn record(&mut self, raw: &RawJointSample) {
        self.record_hand(&raw.right);
        self.record_hand(&raw.left);
    }

    /// Hand readings recorded so far.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Recorded ranges, keeping `fallback` for groups that never saw a value.
    pub fn finish(&self, fallback: &Calibration) -> Calibration {
        Calibration {
            curl: self.curl.unwrap_or(fallback.curl),
            thumb_bend: self.thumb_bend.unwrap_or(fallback.thumb_bend),
            thumb_rotation: self.thumb_rotation.unwrap_or(fallback.thumb_rotation),
        }
    }
}
