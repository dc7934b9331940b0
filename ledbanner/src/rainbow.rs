// rainbow.rs - Horizontal scrolling rainbow for live cells

use crate::codec::{Rgb565, Rgb8};
use crate::grid::WIDTH;

/// Hue rotation settings: one full cycle every `period_secs` seconds when
/// ticking at `fps`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rainbow {
    period_ticks: u64,
}

impl Default for Rainbow {
    fn default() -> Self {
        Self::new(17, 10)
    }
}

impl Rainbow {
    pub fn new(period_secs: u32, fps: u32) -> Self {
        Self {
            period_ticks: (u64::from(period_secs) * u64::from(fps)).max(1),
        }
    }

    pub fn period_ticks(&self) -> u64 {
        self.period_ticks
    }

    /// Position of column `x` on the hue wheel at `tick`, in `[0, 1)`.
    ///
    /// The phase is subtracted so colors travel left to right on screen.
    pub fn hue(&self, x: usize, tick: u64) -> f32 {
        if WIDTH <= 1 {
            return 0.0;
        }
        let base = x as f32 / WIDTH as f32;
        let phase = (tick % self.period_ticks) as f32 / self.period_ticks as f32;
        let t = (base - phase).rem_euclid(1.0);
        // rem_euclid can round up to exactly 1.0 for tiny negatives
        if t >= 1.0 { 0.0 } else { t }
    }

    pub fn color(&self, x: usize, tick: u64) -> Rgb565 {
        let rgb = hue_to_rgb8(self.hue(x, tick));
        rgb.to_rgb565()
    }
}

/// Six-segment hue wheel: red, yellow, green, cyan, blue, magenta.
pub fn hue_to_rgb8(t: f32) -> Rgb8 {
    let segment = (t * 6.0).clamp(0.0, 5.999_999);
    let u = segment.fract();
    let (r, g, b) = match segment as u8 {
        0 => (1.0, u, 0.0),
        1 => (1.0 - u, 1.0, 0.0),
        2 => (0.0, 1.0, u),
        3 => (0.0, 1.0 - u, 1.0),
        4 => (u, 0.0, 1.0),
        _ => (1.0, 0.0, 1.0 - u),
    };
    Rgb8::new(
        (r * 255.0) as u8,
        (g * 255.0) as u8,
        (b * 255.0) as u8,
    )
}
