// codec.rs - RGB565 wire frames for the banner
//
// Each pixel is two big-endian bytes, RRRRRGGG GGGBBBBB, at offset
// (y * WIDTH + x) * 2.

use crate::error::FrameError;
use crate::grid::{CELLS, Grid, WIDTH};

pub const FRAME_SIZE: usize = CELLS * 2;

/// A packed 5-6-5 color as it travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(pub u16);

/// An 8-bit-per-channel color, ready for a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Background for dead cells.
pub const COLOR_BG: Rgb565 = Rgb565(0x0000);

pub type Pixels = [Rgb565; CELLS];
pub type RgbPixels = [Rgb8; CELLS];

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const GREEN: Self = Self(0x07E0);

    /// Quantizes by keeping the top 5/6/5 bits of each channel.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | ((b as u16 & 0xF8) >> 3))
    }

    /// Raw `(r5, g6, b5)` channel values.
    pub fn channels(self) -> (u8, u8, u8) {
        let raw = self.0;
        (
            ((raw >> 11) & 0x1F) as u8,
            ((raw >> 5) & 0x3F) as u8,
            (raw & 0x1F) as u8,
        )
    }

    /// Scales each channel to 8 bits, rounding to nearest.
    pub fn to_rgb8(self) -> Rgb8 {
        let (r5, g6, b5) = self.channels();
        Rgb8 {
            r: ((r5 as u16 * 255 + 15) / 31) as u8,
            g: ((g6 as u16 * 255 + 31) / 63) as u8,
            b: ((b5 as u16 * 255 + 15) / 31) as u8,
        }
    }

    pub fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb565(self) -> Rgb565 {
        Rgb565::from_rgb8(self.r, self.g, self.b)
    }
}

/// An encoded frame, exactly `FRAME_SIZE` bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Box<[u8; FRAME_SIZE]>,
}

impl Frame {
    /// Packs a full set of pixel colors in wire order.
    pub fn from_pixels(pixels: &Pixels) -> Self {
        let mut bytes = Box::new([0u8; FRAME_SIZE]);
        for (chunk, color) in bytes.chunks_exact_mut(2).zip(pixels.iter()) {
            chunk.copy_from_slice(&color.to_be_bytes());
        }
        Self { bytes }
    }

    /// Accepts a received buffer only if it has the exact frame length.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, FrameError> {
        let bytes: [u8; FRAME_SIZE] = buf.try_into().map_err(|_| FrameError::LengthMismatch {
            expected: FRAME_SIZE,
            actual: buf.len(),
        })?;
        Ok(Self {
            bytes: Box::new(bytes),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb565 {
        let idx = (y * WIDTH + x) * 2;
        Rgb565(u16::from_be_bytes([self.bytes[idx], self.bytes[idx + 1]]))
    }

    /// Upscaled colors for every pixel, row-major.
    pub fn to_rgb8(&self) -> RgbPixels {
        let mut out = [Rgb8::default(); CELLS];
        for (px, chunk) in out.iter_mut().zip(self.bytes.chunks_exact(2)) {
            *px = Rgb565(u16::from_be_bytes([chunk[0], chunk[1]])).to_rgb8();
        }
        out
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame").field("len", &FRAME_SIZE).finish()
    }
}

/// Encodes a grid, coloring live cells with `color(x, y)` and dead cells
/// with `COLOR_BG`.
pub fn encode<F>(grid: &Grid, mut color: F) -> Frame
where
    F: FnMut(usize, usize) -> Rgb565,
{
    let mut pixels = [COLOR_BG; CELLS];
    for (px, (x, y, alive)) in pixels.iter_mut().zip(grid.iter()) {
        if alive {
            *px = color(x, y);
        }
    }
    Frame::from_pixels(&pixels)
}

/// Decodes a received buffer into 8-bit RGB. Buffers of any other length
/// than `FRAME_SIZE` are rejected.
pub fn decode(buf: &[u8]) -> Result<RgbPixels, FrameError> {
    Frame::from_bytes(buf).map(|frame| frame.to_rgb8())
}

/// Re-quantizes decoded colors back onto the wire.
pub fn reencode(pixels: &RgbPixels) -> Frame {
    let mut packed = [COLOR_BG; CELLS];
    for (dst, src) in packed.iter_mut().zip(pixels.iter()) {
        *dst = src.to_rgb565();
    }
    Frame::from_pixels(&packed)
}
