//! Inspire dexterous-hand telemetry bridge.
//!
//! A background [`receiver::TelemetryReceiver`] polls hand-state topics and
//! keeps the latest readings in a [`buffer::SharedJointBuffer`]. On demand
//! the readings are normalized into `[0, 1]` with a
//! [`calibration::Calibration`] and named for a kinematic model, either one
//! proximal joint per actuator ([`mapping::Variant::Direct`]) or the full
//! 12-joint-per-hand chain with synthesized mimic joints
//! ([`mapping::Variant::Mimic`]).
//!
//! [`controller::HandController`] wires it all together:
//!
//! ```no_run
//! use cu_inspire_hand::config::HandConfig;
//! use cu_inspire_hand::controller::HandController;
//! use cu_inspire_hand::transport::{loopback, TOPIC_DFX_STATE};
//!
//! let (_publisher, subscriber) = loopback(TOPIC_DFX_STATE);
//! let mut hand = HandController::start(HandConfig::default(), vec![Box::new(subscriber)])?;
//! let joints = hand.get_state();
//! println!("{joints:?}");
//! hand.shutdown();
//! # Ok::<(), cu_inspire_hand::error::HandError>(())
//! ```

pub mod buffer;
pub mod calibration;
pub mod config;
pub mod controller;
pub mod error;
pub mod joints;
pub mod mapping;
pub mod messages;
pub mod mimic;
pub mod model;
pub mod receiver;
pub mod sample;
pub mod sink;
pub mod transport;

pub mod prelude {
    pub use crate::calibration::{Calibration, CalibrationRange};
    pub use crate::config::{HandConfig, Schema};
    pub use crate::controller::HandController;
    pub use crate::error::{HandError, HandResult};
    pub use crate::joints::{Hand, Joint};
    pub use crate::mapping::{JointValues, Variant, to_named_joints};
    pub use crate::messages::{HandStateMessage, InspireHandState, MotorState, MotorStates};
    pub use crate::model::JointConfiguration;
    pub use crate::sample::{NormalizedSample, RawJointSample};
    pub use crate::sink::{JointSink, JsonLinesSink};
    pub use crate::transport::HandStateSubscriber;
}
