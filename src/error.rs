//! Error type for spark-reveal.

use thiserror::Error;

use crate::types::ElementId;

#[derive(Debug, Error)]
pub enum AnimateError {
    #[error("count-up target must be >= 0, got {0}")]
    NegativeTarget(i64),
    #[error("animation duration must be > 0 ms, got {0}")]
    InvalidDuration(i64),
    #[error("element {0:?} is not registered with the surface")]
    UnknownElement(ElementId),
    #[error("unknown number-format locale {0:?}")]
    UnknownLocale(String),
    #[error("invalid animation config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AnimateError>;
