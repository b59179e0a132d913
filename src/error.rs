//! Library error type
//!
//! Only setup can fail. Stepping the simulation never returns an error.

use thiserror::Error;

/// Errors raised while configuring or driving the simulation
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid simulation parameter `{name}`: {reason}")]
    InvalidParams { name: &'static str, reason: String },
    #[error("palette must have {expected} colors (background + one per kind), found {found}")]
    Palette { expected: usize, found: usize },
    #[error("display surface has no addressable cells ({height}x{width})")]
    EmptySurface { height: usize, width: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
