//! Joint configuration handed to a kinematic model.
//!
//! The model itself is external. This keeps a named configuration vector at
//! its neutral pose and overlays the joint values the bridge produces; names
//! the model does not know are ignored.

use crate::error::HandResult;
use crate::mapping::{JointValues, Variant, to_named_joints};
use crate::sample::NormalizedSample;
use std::path::Path;

/// Names of the movable (non-`fixed`) joints of a URDF robot, in file order.
pub fn urdf_movable_joint_names(urdf: &str) -> HandResult<Vec<String>> {
    let doc = roxmltree::Document::parse(urdf)?;
    Ok(doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("joint"))
        .filter(|n| n.attribute("type") != Some("fixed"))
        .filter_map(|n| n.attribute("name"))
        .map(str::to_owned)
        .collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct JointConfiguration {
    names: Vec<String>,
    q: Vec<f64>,
}

impl JointConfiguration {
    /// Neutral configuration (all zeros) over `names`.
    pub fn neutral<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let q = vec![0.0; names.len()];
        Self { names, q }
    }

    /// Neutral configuration over the movable joints of a URDF file.
    pub fn from_urdf(path: &Path) -> HandResult<Self> {
        let urdf = std::fs::read_to_string(path)?;
        Ok(Self::neutral(urdf_movable_joint_names(&urdf)?))
    }

    /// Neutral configuration over exactly the joints `variant` produces.
    pub fn for_variant(variant: Variant) -> Self {
        Self::neutral(to_named_joints(&NormalizedSample::default(), variant).into_keys())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.position(name).map(|i| self.q[i])
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Overlay `values`; returns how many of them matched a model joint.
    pub fn apply(&mut self, values: &JointValues) -> usize {
        let mut applied = 0;
        for (name, &value) in values {
            if let Some(i) = self.position(name) {
                self.q[i] = value;
                applied += 1;
            }
        }
        applied
    }

    /// Reset to the neutral pose.
    pub fn reset(&mut self) {
        self.q.iter_mut().for_each(|v| *v = 0.0);
    }

    pub fn joint_values(&self) -> JointValues {
        self.names.iter().cloned().zip(self.q.iter().copied()).collect()
    }
}
