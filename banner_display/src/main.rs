// main.rs - 80x8 LED banner display fed by UDP multicast

use std::net::Ipv4Addr;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;
use ledbanner::config::{MC_GROUP, MC_PORT, Multicast};
use ledbanner::BannerConfig;

mod layout;
mod receiver;
mod ui;

use ui::BannerApp;

/// Shows frames broadcast to the LED banner and logs receive rates.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Multicast group to join
    #[arg(long, env = "LEDBANNER_GROUP", default_value_t = MC_GROUP)]
    group: Ipv4Addr,

    /// UDP port
    #[arg(long, env = "LEDBANNER_PORT", default_value_t = MC_PORT)]
    port: u16,

    /// Initial window pixels per LED
    #[arg(long, default_value_t = 8)]
    scale: u32,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = BannerConfig {
        scale: args.scale,
        multicast: Multicast {
            group: args.group,
            port: args.port,
        },
        ..BannerConfig::default()
    };
    if config.scale == 0 {
        return Err(ledbanner::ConfigError::ZeroScale).context("invalid display configuration");
    }

    let runtime = tokio::runtime::Runtime::new().context("starting network runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_window_size())
            .with_min_inner_size(config.min_window_size()),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Box::new(BannerApp::new(cc, &config, runtime))),
    )
    .map_err(|err| anyhow!("display init failed: {err}"))
}
