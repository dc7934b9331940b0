// config.rs - Transport and display settings shared by the sender and the display

use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use crate::error::ConfigError;
use crate::grid::{HEIGHT, WIDTH};
use crate::life::FreezePolicy;
use crate::rainbow::Rainbow;

pub const MC_GROUP: Ipv4Addr = Ipv4Addr::new(239, 0, 0, 1);
pub const MC_PORT: u16 = 1565;

/// Highest send rate whose frame interval is still a whole millisecond.
pub const MAX_FPS: u32 = 1000;

/// Multicast endpoint both sides agree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multicast {
    pub group: Ipv4Addr,
    pub port: u16,
}

impl Default for Multicast {
    fn default() -> Self {
        Self {
            group: MC_GROUP,
            port: MC_PORT,
        }
    }
}

impl Multicast {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }
        if !self.group.is_multicast() {
            return Err(ConfigError::NotMulticast(self.group));
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.group, self.port)
    }
}

/// Receiving window settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerConfig {
    pub title: String,
    /// Initial window size in LEDs-to-pixels.
    pub scale: u32,
    pub multicast: Multicast,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            title: "80x8 LedBanner".to_string(),
            scale: 8,
            multicast: Multicast::default(),
        }
    }
}

impl BannerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        self.multicast.validate()
    }

    pub fn initial_window_size(&self) -> [f32; 2] {
        [
            (WIDTH as u32 * self.scale) as f32,
            (HEIGHT as u32 * self.scale) as f32,
        ]
    }

    pub fn min_window_size(&self) -> [f32; 2] {
        [WIDTH as f32, HEIGHT as f32]
    }
}

/// Game of Life broadcaster settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderConfig {
    pub multicast: Multicast,
    pub fps: u32,
    /// Seconds for one full rainbow cycle.
    pub rainbow_period_secs: u32,
    /// Outbound multicast TTL; 0 keeps traffic on the local host.
    pub ttl: u32,
    pub seed: Option<u64>,
    pub policy: FreezePolicy,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            multicast: Multicast::default(),
            fps: 10,
            rainbow_period_secs: 17,
            ttl: 0,
            seed: None,
            policy: FreezePolicy::default(),
        }
    }
}

impl SenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.fps > MAX_FPS {
            return Err(ConfigError::FrameRateTooHigh(self.fps));
        }
        if self.rainbow_period_secs == 0 {
            return Err(ConfigError::ZeroRainbowPeriod);
        }
        self.multicast.validate()
    }

    pub fn frame_interval(&self) -> Duration {
        // tokio intervals panic on a zero period
        Duration::from_millis(1000 / u64::from(self.fps.max(1))).max(Duration::from_millis(1))
    }

    pub fn rainbow(&self) -> Rainbow {
        Rainbow::new(self.rainbow_period_secs, self.fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_banner() {
        let config = BannerConfig::default();
        assert_eq!(config.initial_window_size(), [640.0, 64.0]);
        assert_eq!(config.multicast.addr().to_string(), "239.0.0.1:1565");
        assert!(config.validate().is_ok());

        let sender = SenderConfig::default();
        assert_eq!(sender.frame_interval(), Duration::from_millis(100));
        assert_eq!(sender.rainbow().period_ticks(), 170);
        assert!(sender.validate().is_ok());
    }

    #[test]
    fn rejects_unicast_group_and_zero_port() {
        let mut mc = Multicast {
            group: Ipv4Addr::new(192, 168, 1, 10),
            port: MC_PORT,
        };
        assert_eq!(mc.validate(), Err(ConfigError::NotMulticast(mc.group)));
        mc.group = Ipv4Addr::new(224, 0, 0, 0);
        assert!(mc.validate().is_ok());
        mc.group = Ipv4Addr::new(239, 255, 255, 255);
        assert!(mc.validate().is_ok());
        mc.port = 0;
        assert_eq!(mc.validate(), Err(ConfigError::InvalidPort(0)));
    }

    #[test]
    fn rejects_zero_rates() {
        let sender = SenderConfig {
            fps: 0,
            ..SenderConfig::default()
        };
        assert_eq!(sender.validate(), Err(ConfigError::ZeroFrameRate));
        let sender = SenderConfig {
            rainbow_period_secs: 0,
            ..SenderConfig::default()
        };
        assert_eq!(sender.validate(), Err(ConfigError::ZeroRainbowPeriod));
    }

    #[test]
    fn fastest_accepted_rate_keeps_a_nonzero_interval() {
        let sender = SenderConfig {
            fps: MAX_FPS,
            ..SenderConfig::default()
        };
        assert!(sender.validate().is_ok());
        assert_eq!(sender.frame_interval(), Duration::from_millis(1));

        let sender = SenderConfig {
            fps: MAX_FPS + 1,
            ..SenderConfig::default()
        };
        assert_eq!(sender.validate(), Err(ConfigError::FrameRateTooHigh(1001)));
        assert_eq!(sender.frame_interval(), Duration::from_millis(1));
    }
}
