//! Viewer-facing output of joint values.

use crate::error::{HandError, HandResult};
use crate::mapping::JointValues;
use serde::Serialize;
use std::io::Write;

/// Consumer of one joint-value mapping per render tick.
pub trait JointSink {
    fn publish(&mut self, values: &JointValues) -> HandResult<()>;
}

#[derive(Serialize)]
struct Frame<'a> {
    tick: u64,
    joints: &'a JointValues,
}

/// Writes one JSON object per tick: `{"tick":N,"joints":{...}}`.
pub struct JsonLinesSink<W: Write> {
    out: W,
    tick: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, tick: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> JointSink for JsonLinesSink<W> {
    fn publish(&mut self, values: &JointValues) -> HandResult<()> {
        let frame = Frame {
            tick: self.tick,
            joints: values,
        };
        serde_json::to_writer(&mut self.out, &frame)?;
        self.out
            .write_all(b"\n")
            .and_then(|()| self.out.flush())
            .map_err(|e| HandError::Sink(e.to_string()))?;
        self.tick += 1;
        Ok(())
    }
}
