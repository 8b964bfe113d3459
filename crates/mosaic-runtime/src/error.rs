#![forbid(unsafe_code)]

//! Engine error taxonomy.
//!
//! Every variant is a contract violation detected synchronously; none is
//! retried. The frame loop stops at the first one and hands it back.

use std::fmt;
use std::io;

use mosaic_render::{ShapeError, TextError};
use mosaic_render::asset::AssetError;

/// Engine error.
#[derive(Debug)]
pub enum EngineError {
    /// A layer or screen name is already registered.
    DuplicateName(String),
    /// Missing layer or component.
    NotFound(String),
    /// Transition target was never registered.
    ScreenNotFound(String),
    /// Pixel geometry mismatch.
    Shape(ShapeError),
    /// Text with a missing glyph, or too large for its target.
    Text(TextError),
    /// Asset loader failure, passed through.
    Asset(AssetError),
    /// Host backend I/O failure.
    Io(io::Error),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "duplicate name: {name}"),
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::ScreenNotFound(name) => write!(f, "screen not registered: {name}"),
            Self::Shape(err) => write!(f, "shape error: {err}"),
            Self::Text(err) => write!(f, "text error: {err}"),
            Self::Asset(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "backend I/O error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shape(err) => Some(err),
            Self::Text(err) => Some(err),
            Self::Asset(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShapeError> for EngineError {
    fn from(err: ShapeError) -> Self {
        Self::Shape(err)
    }
}

impl From<TextError> for EngineError {
    fn from(err: TextError) -> Self {
        Self::Text(err)
    }
}

impl From<AssetError> for EngineError {
    fn from(err: AssetError) -> Self {
        Self::Asset(err)
    }
}

impl From<io::Error> for EngineError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
