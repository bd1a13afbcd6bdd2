//! Error type for fallible constructors and parsers.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A frame sequence needs at least one resource.
    #[error("frame sequence is empty")]
    EmptyFrameSequence,

    #[error("invalid scroll edge '{input}': {reason}")]
    InvalidScrollEdge { input: String, reason: String },

    #[error("config parse error: {0}")]
    Config(String),
}
