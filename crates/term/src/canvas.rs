//! Pixel surfaces.
//!
//! [`Surface`] is the drawing contract the frame renderer targets: a solid
//! fill plus sprite blits addressed by atlas rectangle. [`Canvas`] is the
//! software implementation that rasterizes into RGB pixels and presents them
//! into a terminal [`FrameBuffer`] two pixels per cell.

use std::rc::Rc;

use crate::atlas::SpriteSheet;
use crate::fb::{Cell, FrameBuffer, Rgb};

/// Which atlas a draw call samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    /// Ground with empty space above it.
    GroundTop,
    /// Ground buried under another tile.
    GroundFill,
    Lava,
    Player,
    Coin,
}

/// Axis-aligned rectangle in pixels. Coordinates may be fractional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Paint every pixel.
    fn fill(&mut self, color: Rgb);

    /// Copy `src` (atlas pixels) of `sprite` onto `dst` (surface pixels),
    /// mirrored around the vertical center line of `dst` when `flip_x`.
    fn draw_sprite(&mut self, sprite: Sprite, src: Rect, dst: Rect, flip_x: bool);
}

/// Software RGB surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    sheet: Rc<SpriteSheet>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, sheet: Rc<SpriteSheet>) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; (width as usize) * (height as usize)],
            sheet,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Terminal size needed to present this canvas.
    pub fn cell_size(&self) -> (u16, u16) {
        let cols = self.width.min(u16::MAX as u32) as u16;
        let rows = self.height.div_ceil(2).min(u16::MAX as u32) as u16;
        (cols, rows)
    }

    /// Write the canvas into `fb` as half-block cells, one column per pixel
    /// and one row per pixel pair. An odd last pixel row sits on black.
    pub fn present_into(&self, fb: &mut FrameBuffer) {
        let (cols, rows) = self.cell_size();
        fb.resize(cols, rows);
        for row in 0..rows {
            let top_y = row as u32 * 2;
            for col in 0..cols {
                let top = self.pixel(col as u32, top_y).unwrap_or(Rgb::BLACK);
                let bottom = self.pixel(col as u32, top_y + 1).unwrap_or(Rgb::BLACK);
                fb.set(col, row, Cell::half_block(top, bottom));
            }
        }
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    fn draw_sprite(&mut self, sprite: Sprite, src: Rect, dst: Rect, flip_x: bool) {
        if dst.w <= 0.0 || dst.h <= 0.0 {
            return;
        }

        let x_start = dst.x.floor().max(0.0) as i64;
        let x_end = ((dst.x + dst.w).ceil() as i64).min(self.width as i64);
        let y_start = dst.y.floor().max(0.0) as i64;
        let y_end = ((dst.y + dst.h).ceil() as i64).min(self.height as i64);

        let width = self.width as usize;
        let atlas = self.sheet.atlas(sprite);

        for py in y_start..y_end {
            // Sample at pixel centers.
            let v = (py as f64 + 0.5 - dst.y) / dst.h;
            if !(0.0..1.0).contains(&v) {
                continue;
            }
            let sy = (src.y + v * src.h).floor();
            for px in x_start..x_end {
                let mut u = (px as f64 + 0.5 - dst.x) / dst.w;
                if !(0.0..1.0).contains(&u) {
                    continue;
                }
                if flip_x {
                    u = 1.0 - u;
                }
                let sx = (src.x + u * src.w).floor();
                if sx < 0.0 || sy < 0.0 {
                    continue;
                }
                if let Some(color) = atlas.pixel(sx as u32, sy as u32) {
                    self.pixels[(py as usize) * width + px as usize] = color;
                }
            }
        }
    }
}
