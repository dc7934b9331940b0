// sender.rs - Paced broadcast loop

use std::net::Ipv4Addr;

use anyhow::{Context, Result};
use ledbanner::config::SenderConfig;
use ledbanner::{FRAME_SIZE, HEIGHT, LifeEngine, WIDTH, patterns};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::net::UdpSocket;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Builds the engine from a named pattern, or a random field when `pattern`
/// is `None`.
pub fn build_engine(config: &SenderConfig, pattern: Option<&str>) -> Result<LifeEngine<SmallRng>> {
    let seed = config.seed.unwrap_or_else(rand::random);
    debug!(seed, "rng seeded");
    let rng = SmallRng::seed_from_u64(seed);

    let engine = match pattern {
        Some(name) => {
            let pattern = patterns::find(name).with_context(|| {
                let known: Vec<_> = patterns::PATTERNS.iter().map(|p| p.name).collect();
                format!("unknown pattern {name:?} (known: {})", known.join(", "))
            })?;
            let origin = (WIDTH / 2 - 2, HEIGHT / 2 - 2);
            LifeEngine::from_pattern(pattern, origin, config.rainbow(), rng)
        }
        None => LifeEngine::new(config.rainbow(), rng),
    };
    Ok(engine.with_policy(config.policy))
}

pub async fn run(config: &SenderConfig, pattern: Option<&str>) -> Result<()> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
        .await
        .context("socket")?;
    socket
        .set_multicast_ttl_v4(config.ttl)
        .context("setsockopt(IP_MULTICAST_TTL)")?;
    let target = config.multicast.addr();

    let mut engine = build_engine(config, pattern)?;

    let mut ticker = time::interval(config.frame_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => {
                info!(
                    generations = engine.session().generation_count(),
                    "Interrupted, stopping sender"
                );
                return Ok(());
            }
        }

        let (_, frame) = engine.next_frame();

        let sent = socket
            .send_to(frame.as_bytes(), target)
            .await
            .context("sendto")?;
        if sent != FRAME_SIZE {
            warn!(sent, expected = FRAME_SIZE, "Partial send");
        }
    }
}
