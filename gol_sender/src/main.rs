// main.rs - Game of Life multicast test sender for the 80x8 banner

use std::net::Ipv4Addr;

use anyhow::{Context, Result};
use clap::Parser;
use ledbanner::config::{MC_GROUP, MC_PORT, Multicast, SenderConfig};
use ledbanner::{FRAME_SIZE, FreezePolicy, HEIGHT, WIDTH};
use tracing::info;

mod sender;

/// Broadcasts a colored Game of Life to the LED banner over UDP multicast.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Multicast group to send to
    #[arg(long, env = "LEDBANNER_GROUP", default_value_t = MC_GROUP)]
    group: Ipv4Addr,

    /// UDP port
    #[arg(long, env = "LEDBANNER_PORT", default_value_t = MC_PORT)]
    port: u16,

    /// Frames per second
    #[arg(long, default_value_t = 10)]
    fps: u32,

    /// Seconds for one full rainbow cycle
    #[arg(long, default_value_t = 17)]
    rainbow_period: u32,

    /// Multicast TTL; 0 keeps traffic on this host
    #[arg(long, default_value_t = 0)]
    ttl: u32,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Start from a named pattern instead of a random field
    #[arg(long)]
    pattern: Option<String>,
}

impl Args {
    fn sender_config(&self) -> SenderConfig {
        SenderConfig {
            multicast: Multicast {
                group: self.group,
                port: self.port,
            },
            fps: self.fps,
            rainbow_period_secs: self.rainbow_period,
            ttl: self.ttl,
            seed: self.seed,
            policy: FreezePolicy::default(),
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = args.sender_config();
    config.validate().context("invalid sender configuration")?;

    info!(
        target_addr = %config.multicast.addr(),
        width = WIDTH,
        height = HEIGHT,
        frame_size = FRAME_SIZE,
        fps = config.fps,
        "Game of Life multicast test sender"
    );

    sender::run(&config, args.pattern.as_deref()).await
}
