// receiver.rs - Multicast ingestion: stats for every datagram, pixels for valid frames

use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use eframe::egui;
use ledbanner::codec::{self, RgbPixels};
use ledbanner::{FrameError, FrameRates, Multicast, StatsTracker};
use tokio::net::UdpSocket;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{info, warn};

const MC_BUF_SIZE: usize = 2048;
const RECV_RETRY_DELAY: Duration = Duration::from_millis(10);
const RECV_RETRY_MAX: Duration = Duration::from_secs(1);

/// Binds the port and subscribes to the group on the default interface.
pub async fn join_multicast(multicast: &Multicast) -> Result<UdpSocket> {
    multicast.validate()?;
    info!(group = %multicast.group, port = multicast.port, "Initializing multicast receiver");

    let socket = UdpSocket::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, multicast.port))
        .await
        .with_context(|| format!("bind 0.0.0.0:{}", multicast.port))?;
    socket
        .join_multicast_v4(multicast.group, Ipv4Addr::UNSPECIFIED)
        .context("setsockopt(IP_ADD_MEMBERSHIP)")?;

    info!(
        group = %multicast.group,
        port = multicast.port,
        "Subscribed to multicast group, ready to receive data"
    );
    Ok(socket)
}

/// Joins the group and starts the receive loop on `runtime`. Decoded frames
/// arrive on the returned channel.
pub fn spawn(
    runtime: &Runtime,
    multicast: &Multicast,
    ctx: egui::Context,
) -> Result<mpsc::UnboundedReceiver<RgbPixels>> {
    let socket = runtime.block_on(join_multicast(multicast))?;
    let (tx, rx) = mpsc::unbounded_channel();
    runtime.spawn(receive_loop(socket, tx, ctx));
    Ok(rx)
}

/// Pause after the `failures`-th consecutive receive error: 10 ms, doubling,
/// capped at one second.
pub fn retry_delay(failures: u32) -> Duration {
    let doublings = failures.saturating_sub(1).min(16);
    RECV_RETRY_DELAY
        .saturating_mul(1 << doublings)
        .min(RECV_RETRY_MAX)
}

/// Updates the stats for one datagram and decodes it if it is a full frame.
pub fn ingest(
    stats: &mut StatsTracker,
    datagram: &[u8],
    now: Instant,
) -> (FrameRates, Result<RgbPixels, FrameError>) {
    let rates = stats.update(datagram.len(), now);
    (rates, codec::decode(datagram))
}

pub async fn receive_loop(
    socket: UdpSocket,
    tx: mpsc::UnboundedSender<RgbPixels>,
    ctx: egui::Context,
) {
    let mut stats = StatsTracker::new();
    let mut buf = [0u8; MC_BUF_SIZE];
    let mut failures = 0u32;

    loop {
        let n = match socket.recv(&mut buf).await {
            Ok(0) => continue,
            Ok(n) => n,
            Err(err) => {
                failures = failures.saturating_add(1);
                let delay = retry_delay(failures);
                warn!(%err, failures, ?delay, "recv failed");
                tokio::time::sleep(delay).await;
                continue;
            }
        };
        failures = 0;

        let (rates, decoded) = ingest(&mut stats, &buf[..n], Instant::now());
        info!(
            "received {n} bytes, {:6.2} FPS, {:6.2} FPS (avg), {:7.2} kB/s",
            rates.instant_fps, rates.windowed_fps, rates.kbps
        );

        match decoded {
            Ok(pixels) => {
                if tx.send(pixels).is_err() {
                    // Window is gone
                    break;
                }
                ctx.request_repaint();
            }
            Err(err) => warn!("{err}, frame ignored"),
        }
    }
}
