//! Drawing surface contract

use bevy::math::DVec2;
use image::Rgba;

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl SurfaceRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }
}

/// The primitive operations the course renderer needs
pub trait Surface {
    /// Size in pixels
    fn size(&self) -> (u32, u32);

    /// Erase everything to transparent
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: SurfaceRect, color: Rgba<u8>);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba<u8>);

    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: Rgba<u8>);

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba<u8>, width: f32);
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect(SurfaceRect, Rgba<u8>),
    FillCircle(DVec2, f64, Rgba<u8>),
    StrokeCircle(DVec2, f64, Rgba<u8>),
    StrokeLine(DVec2, DVec2, Rgba<u8>, f32),
}

/// Surface that records calls instead of drawing
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }
}

impl Surface for DrawList {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: SurfaceRect, color: Rgba<u8>) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba<u8>) {
        self.commands.push(DrawCommand::FillCircle(center, radius, color));
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: Rgba<u8>) {
        self.commands.push(DrawCommand::StrokeCircle(center, radius, color));
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba<u8>, width: f32) {
        self.commands.push(DrawCommand::StrokeLine(from, to, color, width));
    }
}
