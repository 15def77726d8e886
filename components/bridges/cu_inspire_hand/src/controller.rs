//! Hand controller: receiver task plus on-demand normalization.

use crate::buffer::SharedJointBuffer;
use crate::calibration::Calibration;
use crate::config::HandConfig;
use crate::error::HandResult;
use crate::mapping::{JointValues, to_named_joints};
use crate::receiver::{ReceiverHandle, TelemetryReceiver};
use crate::sample::{NormalizedSample, RawJointSample};
use crate::transport::HandStateSubscriber;
use log::info;
use std::sync::Arc;

pub struct HandController {
    config: HandConfig,
    calibration: Calibration,
    buffer: Arc<SharedJointBuffer>,
    receiver: ReceiverHandle,
}

impl HandController {
    /// Start polling `subscribers` in the background.
    ///
    /// With `connect_timeout_ms` set, first waits that long for a valid
    /// message; a timeout only logs a warning.
    pub fn start(
        config: HandConfig,
        subscribers: Vec<Box<dyn HandStateSubscriber>>,
    ) -> HandResult<Self> {
        info!(
            "Initialize Inspire hand controller ({:?} schema, {:?} joints, {} topic(s))",
            config.schema,
            config.variant,
            subscribers.len()
        );
        let buffer = Arc::new(SharedJointBuffer::new());
        let mut receiver = TelemetryReceiver::new(subscribers, buffer.clone());
        if let Some(timeout) = config.connect_timeout() {
            receiver.wait_for_first(timeout, config.poll_interval());
        }
        let receiver = receiver.spawn(config.poll_interval())?;
        Ok(Self {
            calibration: config.calibration(),
            config,
            buffer,
            receiver,
        })
    }

    pub fn config(&self) -> &HandConfig {
        &self.config
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn raw_state(&self) -> RawJointSample {
        self.buffer.snapshot()
    }

    pub fn normalized_state(&self) -> NormalizedSample {
        self.calibration.normalize(&self.raw_state())
    }

    /// Current joint values in the configured name space.
    pub fn get_state(&self) -> JointValues {
        to_named_joints(&self.normalized_state(), self.config.variant)
    }

    pub fn is_running(&self) -> bool {
        self.receiver.is_running()
    }

    pub fn shutdown(&mut self) {
        self.receiver.shutdown();
        info!("Inspire hand controller stopped");
    }
}
