//! Simulation and telemetry core for an 80x8 RGB565 LED banner.
//!
//! The sender drives a [`LifeEngine`], encodes each generation with
//! [`codec::encode`] and broadcasts it; the display checks and decodes frames
//! with [`codec::decode`] and feeds datagram sizes to a [`StatsTracker`].

pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod life;
pub mod patterns;
pub mod rainbow;
pub mod stats;

pub use codec::{FRAME_SIZE, Frame, Rgb565, Rgb8};
pub use config::{BannerConfig, Multicast, SenderConfig};
pub use error::{ConfigError, FrameError};
pub use grid::{CELLS, Grid, HEIGHT, WIDTH};
pub use life::{Classification, FreezePolicy, GameReport, LifeEngine, PolicyEvent, TickOutcome};
pub use rainbow::Rainbow;
pub use stats::{FrameRates, StatsTracker};
