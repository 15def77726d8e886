//! Error type for the fallible edges of the bridge.
//!
//! The telemetry path itself never fails: malformed messages are skipped and
//! out-of-range readings are clamped. Only file I/O, configuration parsing and
//! sink writes surface a [`HandError`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad URDF: {0}")]
    Urdf(#[from] roxmltree::Error),

    #[error("unknown joint variant '{0}' (expected 'direct' or 'mimic')")]
    UnknownVariant(String),

    #[error("unknown hand schema '{0}' (expected 'ftp' or 'dfx')")]
    UnknownSchema(String),

    #[error("joint sink failed: {0}")]
    Sink(String),
}

pub type HandResult<T> = Result<T, HandError>;
