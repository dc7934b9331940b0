// ui.rs - Paints the latest received frame, scaled and centered

use eframe::egui;
use egui::{Color32, Rect, Vec2};
use ledbanner::codec::RgbPixels;
use ledbanner::{BannerConfig, Grid, HEIGHT, WIDTH, patterns};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::warn;

use crate::layout::{self, Layout};
use crate::receiver;

pub struct BannerApp {
    pub pixels: RgbPixels,
    pub title: String,
    frames: Option<mpsc::UnboundedReceiver<RgbPixels>>,
    last_title: String,
    // Keeps the receive task alive for the lifetime of the window
    _runtime: Runtime,
}

impl BannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &BannerConfig, runtime: Runtime) -> Self {
        let frames = match receiver::spawn(&runtime, &config.multicast, cc.egui_ctx.clone()) {
            Ok(rx) => Some(rx),
            Err(err) => {
                warn!("{err:#}");
                warn!("multicast setup failed, continuing without UDP");
                None
            }
        };

        Self {
            pixels: patterns::ready_frame().to_rgb8(),
            title: config.title.clone(),
            frames,
            last_title: String::new(),
            _runtime: runtime,
        }
    }

    /// Keeps only the newest frame that arrived since the last paint.
    fn drain_frames(&mut self) {
        let Some(rx) = self.frames.as_mut() else {
            return;
        };
        while let Ok(pixels) = rx.try_recv() {
            self.pixels = pixels;
        }
    }
}

impl eframe::App for BannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        self.drain_frames();

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let area = ui.max_rect();
                let Some(layout) = Layout::fit(area.width(), area.height()) else {
                    return;
                };

                // Title shows the physical window size
                let ppp = ctx.pixels_per_point();
                let title = layout::window_title(
                    &self.title,
                    &layout,
                    (area.width() * ppp).round() as u32,
                    (area.height() * ppp).round() as u32,
                );
                if title != self.last_title {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
                    self.last_title = title;
                }

                let painter = ui.painter();
                for y in 0..HEIGHT {
                    for x in 0..WIDTH {
                        let px = self.pixels[Grid::index(x, y)];
                        let (left, top) = layout.cell_origin(x, y);
                        let rect = Rect::from_min_size(
                            egui::pos2(area.min.x + left, area.min.y + top),
                            Vec2::splat(layout.pixel_size),
                        );
                        painter.rect_filled(rect, 0.0, Color32::from_rgb(px.r, px.g, px.b));
                    }
                }
            });
    }
}
