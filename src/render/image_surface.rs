//! Surface backed by an RGBA image buffer

use bevy::math::DVec2;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut,
    draw_polygon_mut,
};
use imageproc::point::Point;
use imageproc::rect::Rect;

use super::surface::{Surface, SurfaceRect};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Software canvas drawn with imageproc primitives
#[derive(Debug, Clone)]
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.image.width() && y < self.image.height()).then(|| *self.image.get_pixel(x, y))
    }

    pub fn save(&self, path: &std::path::Path) -> Result<(), image::ImageError> {
        self.image.save(path)
    }
}

fn to_i32_point(p: DVec2) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

impl Surface for ImageSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = TRANSPARENT;
        }
    }

    fn fill_rect(&mut self, rect: SurfaceRect, color: Rgba<u8>) {
        let width = rect.size.x.round();
        let height = rect.size.y.round();
        if width < 1.0 || height < 1.0 {
            return;
        }
        let (x, y) = to_i32_point(rect.origin);
        draw_filled_rect_mut(
            &mut self.image,
            Rect::at(x, y).of_size(width as u32, height as u32),
            color,
        );
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba<u8>) {
        draw_filled_circle_mut(&mut self.image, to_i32_point(center), radius.round() as i32, color);
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: Rgba<u8>) {
        draw_hollow_circle_mut(&mut self.image, to_i32_point(center), radius.round() as i32, color);
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba<u8>, width: f32) {
        let delta = to - from;
        let length = delta.length();
        if width <= 1.0 || length < 1.0 {
            draw_line_segment_mut(
                &mut self.image,
                (from.x as f32, from.y as f32),
                (to.x as f32, to.y as f32),
                color,
            );
            return;
        }

        // Thick line as a quad around the segment
        let normal = DVec2::new(-delta.y, delta.x) / length * (width as f64 / 2.0);
        let corners = [from + normal, to + normal, to - normal, from - normal];
        let points: Vec<Point<i32>> = corners
            .iter()
            .map(|c| {
                let (x, y) = to_i32_point(*c);
                Point::new(x, y)
            })
            .collect();
        // A degenerate quad (all corners rounding together) would panic
        if points.first() == points.last() {
            return;
        }
        draw_polygon_mut(&mut self.image, &points, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_fill_rect_covers_area() {
        let mut surface = ImageSurface::new(20, 20);
        surface.fill_rect(SurfaceRect::new(0.0, 0.0, 10.0, 10.0), RED);
        assert_eq!(surface.pixel(5, 5), Some(RED));
        assert_eq!(surface.pixel(15, 15), Some(TRANSPARENT));
    }

    #[test]
    fn test_fill_circle_center() {
        let mut surface = ImageSurface::new(40, 40);
        surface.fill_circle(DVec2::new(20.0, 20.0), 5.0, RED);
        assert_eq!(surface.pixel(20, 20), Some(RED));
        assert_eq!(surface.pixel(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn test_clear_erases() {
        let mut surface = ImageSurface::new(8, 8);
        surface.fill_rect(SurfaceRect::new(0.0, 0.0, 8.0, 8.0), RED);
        surface.clear();
        assert!(surface.image().pixels().all(|p| *p == TRANSPARENT));
    }

    #[test]
    fn test_thick_line_midpoint() {
        let mut surface = ImageSurface::new(50, 50);
        surface.stroke_line(DVec2::new(5.0, 25.0), DVec2::new(45.0, 25.0), RED, 4.0);
        assert_eq!(surface.pixel(25, 25), Some(RED));
        assert_eq!(surface.pixel(25, 10), Some(TRANSPARENT));
    }

    #[test]
    fn test_shapes_off_canvas_do_not_panic() {
        let mut surface = ImageSurface::new(10, 10);
        surface.fill_circle(DVec2::new(-500.0, 900.0), 10.0, RED);
        surface.stroke_circle(DVec2::new(300.0, -20.0), 10.0, RED);
        surface.stroke_line(DVec2::new(-100.0, -100.0), DVec2::new(200.0, 300.0), RED, 3.0);
        surface.fill_rect(SurfaceRect::new(-50.0, -50.0, 5.0, 5.0), RED);
    }
}
