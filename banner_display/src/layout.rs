// layout.rs - Fit the 80x8 matrix into the window

use ledbanner::{HEIGHT, WIDTH};

/// Square LED size and the offset that centers the matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub pixel_size: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Layout {
    /// Largest square pixel that keeps the 80x8 aspect inside `win_w` x `win_h`.
    /// `None` when the window is too small to draw anything useful.
    pub fn fit(win_w: f32, win_h: f32) -> Option<Self> {
        if win_w <= 0.0 || win_h <= 0.0 {
            return None;
        }

        let mut pixel_size = win_w / WIDTH as f32;
        if pixel_size * HEIGHT as f32 > win_h {
            pixel_size = win_h / HEIGHT as f32;
        }
        if pixel_size <= 0.1 {
            return None;
        }

        let used_w = pixel_size * WIDTH as f32;
        let used_h = pixel_size * HEIGHT as f32;
        Some(Self {
            pixel_size,
            offset_x: (win_w - used_w) * 0.5,
            offset_y: (win_h - used_h) * 0.5,
        })
    }

    /// Top-left corner of LED `(x, y)`.
    pub fn cell_origin(&self, x: usize, y: usize) -> (f32, f32) {
        (
            self.offset_x + x as f32 * self.pixel_size,
            self.offset_y + y as f32 * self.pixel_size,
        )
    }
}

pub fn window_title(title: &str, layout: &Layout, win_w: u32, win_h: u32) -> String {
    format!("{title} - scale {:.2} - {win_w}x{win_h}", layout.pixel_size)
}
