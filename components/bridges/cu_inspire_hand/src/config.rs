//! Bridge configuration.
//!
//! Loaded from JSON; every key is optional and falls back to the values the
//! Inspire hands ship with:
//!
//! ```json
//! {
//!   "schema": "dfx",
//!   "variant": "mimic",
//!   "poll_interval_ms": 2,
//!   "connect_timeout_ms": 1000,
//!   "publish_period_ms": 100
//! }
//! ```
//!
//! Without a `calibration` key the ranges follow the schema: motor radians
//! for DFX, the `0..1000` register scale for FTP.

use crate::calibration::Calibration;
use crate::error::{HandError, HandResult};
use crate::mapping::Variant;
use crate::transport::{
    TOPIC_DFX_COMMAND, TOPIC_DFX_STATE, TOPIC_FTP_LEFT_COMMAND, TOPIC_FTP_LEFT_STATE,
    TOPIC_FTP_RIGHT_COMMAND, TOPIC_FTP_RIGHT_STATE,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Which firmware message layout the hands publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// One state topic per hand.
    Ftp,
    /// One state topic for both hands.
    #[default]
    Dfx,
}

impl Schema {
    /// Parse from a config string.  Returns `None` for unrecognised values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ftp" => Some(Self::Ftp),
            "dfx" => Some(Self::Dfx),
            _ => None,
        }
    }
}

/// Topic names per channel. Defaults depend on the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topics {
    pub state: Vec<String>,
    pub command: Vec<String>,
}

fn owned(topics: &[&str]) -> Vec<String> {
    topics.iter().map(|t| (*t).to_owned()).collect()
}

impl Topics {
    pub fn for_schema(schema: Schema) -> Self {
        match schema {
            Schema::Ftp => Self {
                state: owned(&[TOPIC_FTP_RIGHT_STATE, TOPIC_FTP_LEFT_STATE]),
                command: owned(&[TOPIC_FTP_RIGHT_COMMAND, TOPIC_FTP_LEFT_COMMAND]),
            },
            Schema::Dfx => Self {
                state: owned(&[TOPIC_DFX_STATE]),
                command: owned(&[TOPIC_DFX_COMMAND]),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandConfig {
    pub schema: Schema,
    /// Overrides the schema's default topics.
    pub topics: Option<Topics>,
    pub variant: Variant,
    pub poll_interval_ms: u64,
    /// Wait this long for the first valid message before starting.
    pub connect_timeout_ms: Option<u64>,
    /// Consumer cadence.
    pub publish_period_ms: u64,
    /// Overrides the schema's default ranges.
    pub calibration: Option<Calibration>,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            topics: None,
            variant: Variant::default(),
            poll_interval_ms: 2,
            connect_timeout_ms: None,
            publish_period_ms: 100,
            calibration: None,
        }
    }
}

impl HandConfig {
    pub fn load(path: &Path) -> HandResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> HandResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn topics(&self) -> Topics {
        self.topics
            .clone()
            .unwrap_or_else(|| Topics::for_schema(self.schema))
    }

    /// Ranges matching the schema's reading scale, unless overridden.
    pub fn calibration(&self) -> Calibration {
        self.calibration.unwrap_or_else(|| match self.schema {
            Schema::Ftp => Calibration::ftp(),
            Schema::Dfx => Calibration::default(),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    pub fn publish_period(&self) -> Duration {
        Duration::from_millis(self.publish_period_ms)
    }

    /// Set the variant from a command-line string.
    pub fn set_variant(&mut self, s: &str) -> HandResult<()> {
        self.variant =
            Variant::from_str(s).ok_or_else(|| HandError::UnknownVariant(s.to_owned()))?;
        Ok(())
    }

    /// Set the schema from a command-line string.
    pub fn set_schema(&mut self, s: &str) -> HandResult<()> {
        self.schema =
            Schema::from_str(s).ok_or_else(|| HandError::UnknownSchema(s.to_owned()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationRange;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg: HandConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, HandConfig::default());
        assert_eq!(cfg.poll_interval(), Duration::from_millis(2));
        assert_eq!(cfg.publish_period(), Duration::from_millis(100));
        assert_eq!(cfg.connect_timeout(), None);
        assert_eq!(cfg.topics().state, vec![TOPIC_DFX_STATE.to_owned()]);
        assert_eq!(cfg.calibration(), Calibration::default());
    }

    #[test]
    fn ftp_schema_subscribes_to_both_hands() {
        let cfg: HandConfig = serde_json::from_str(r#"{"schema":"ftp"}"#).unwrap();
        assert_eq!(cfg.calibration(), Calibration::ftp());
        assert_eq!(
            cfg.topics().state,
            vec![
                TOPIC_FTP_RIGHT_STATE.to_owned(),
                TOPIC_FTP_LEFT_STATE.to_owned()
            ]
        );
    }

    #[test]
    fn partial_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hand.json");
        std::fs::write(
            &path,
            r#"{"variant":"mimic","connect_timeout_ms":500,
                "calibration":{"curl":{"min":0.0,"max":1.5},
                               "thumb_bend":{"min":0.0,"max":0.5},
                               "thumb_rotation":{"min":-0.1,"max":1.3}}}"#,
        )
        .unwrap();
        let cfg = HandConfig::load(&path).unwrap();
        assert_eq!(cfg.variant, Variant::Mimic);
        assert_eq!(cfg.connect_timeout(), Some(Duration::from_millis(500)));
        assert_eq!(cfg.calibration().curl, CalibrationRange::new(0.0, 1.5));

        let out = dir.path().join("saved.json");
        cfg.save(&out).unwrap();
        assert_eq!(HandConfig::load(&out).unwrap(), cfg);
    }

    #[test]
    fn bad_cli_strings_are_errors() {
        let mut cfg = HandConfig::default();
        assert!(matches!(
            cfg.set_variant("urdf"),
            Err(HandError::UnknownVariant(_))
        ));
        assert!(matches!(
            cfg.set_schema("usb"),
            Err(HandError::UnknownSchema(_))
        ));
        cfg.set_schema("ftp").unwrap();
        assert_eq!(cfg.schema, Schema::Ftp);
    }
}
