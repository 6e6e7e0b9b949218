//! Error types.
//!
//! The rolling machinery itself never fails: a missing cell, an empty data
//! source or a zero-sized viewport are all expressed as "nothing happens".
//! Errors only surface when building the pieces.

use thiserror::Error;

/// Errors raised while configuring or spawning notice components.
#[derive(Error, Debug)]
pub enum Error {
    /// The stay interval between rolls must be non-zero.
    #[error("stay interval must be greater than zero")]
    ZeroStayInterval,

    /// The slide transition must take some time.
    #[error("transition duration must be greater than zero")]
    ZeroTransition,

    /// The frame pacer thread could not be started.
    #[error("failed to spawn frame pacer thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
