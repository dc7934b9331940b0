// error.rs - Error types for the banner core

use std::net::Ipv4Addr;

use thiserror::Error;

/// A received buffer that cannot be a banner frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Datagram size differs from `WIDTH * HEIGHT * 2`.
    #[error("unexpected frame size: {actual} bytes (expected {expected})")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Invalid transport or pacing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "address {0} is not a valid IPv4 multicast address (expected 224.0.0.0-239.255.255.255)"
    )]
    NotMulticast(Ipv4Addr),

    #[error("invalid multicast port: {0} (must be 1-65535)")]
    InvalidPort(u16),

    #[error("frame rate must be at least 1 FPS")]
    ZeroFrameRate,

    #[error("frame rate {0} FPS is above the 1000 FPS limit")]
    FrameRateTooHigh(u32),

    #[error("rainbow period must be at least 1 second")]
    ZeroRainbowPeriod,

    #[error("display scale must be at least 1")]
    ZeroScale,
}
