//! Raster back-buffer and paint operations
//!
//! The texture is equirectangular, so painting wraps horizontally (a shape
//! crossing the right edge continues on the left) and clips vertically.

use std::path::Path;

use glam::Vec2;

use super::color::{Color, Rgba8};
use crate::error::{Error, Result};

/// Fixed-size RGBA pixel grid
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRaster {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl SurfaceRaster {
    /// Create a raster filled with one color
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![fill.to_rgba8(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel area
    #[inline]
    pub fn area(&self) -> f32 {
        self.width as f32 * self.height as f32
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major, ready for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if y < 0 || y >= self.height as i64 {
            return None;
        }
        let x = x.rem_euclid(self.width as i64);
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Pixel at (x, y); x wraps, y outside the raster returns None
    pub fn get(&self, x: i64, y: i64) -> Option<Rgba8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Composite a color onto one pixel
    #[inline]
    pub fn blend(&mut self, x: i64, y: i64, color: Color) {
        if color.a <= 0.0 {
            return;
        }
        if let Some(i) = self.index(x, y) {
            let dst = Color::from_rgba8(self.pixels[i]);
            self.pixels[i] = color.over(dst).to_rgba8();
        }
    }

    /// Overwrite every pixel
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.to_rgba8());
    }

    /// Fill a closed polygon (even-odd rule), coloring each covered pixel
    /// with `shader(pixel_center)`. Returns the number of pixels painted.
    pub fn fill_polygon_with(&mut self, points: &[Vec2], shader: impl Fn(Vec2) -> Color) -> usize {
        if points.len() < 3 {
            return 0;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        let row_start = (min_y.floor() as i64).max(0);
        let row_end = (max_y.ceil() as i64).min(self.height as i64);

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        let mut painted = 0;
        for row in row_start..row_end {
            let yc = row as f32 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                // Half-open so shared vertices count once
                if (a.y <= yc && b.y > yc) || (b.y <= yc && a.y > yc) {
                    let t = (yc - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            for span in crossings.chunks_exact(2) {
                // Pixel centers inside [x0, x1)
                let first = (span[0] - 0.5).ceil() as i64;
                let last = (span[1] - 0.5).ceil() as i64;
                // Never paint the same wrapped column twice per row
                let last = last.min(first + self.width as i64);
                for col in first..last {
                    let center = Vec2::new(col as f32 + 0.5, yc);
                    self.blend(col, row, shader(center));
                    painted += 1;
                }
            }
        }
        painted
    }

    /// Fill a polygon with a radial gradient from `inner` at `center` to
    /// `outer` at `radius`
    pub fn radial_gradient_polygon(
        &mut self,
        points: &[Vec2],
        center: Vec2,
        radius: f32,
        inner: Color,
        outer: Color,
    ) -> usize {
        let radius = radius.max(f32::EPSILON);
        self.fill_polygon_with(points, |p| inner.lerp(outer, p.distance(center) / radius))
    }

    /// Solid disc (texture specks)
    pub fn stipple(&mut self, center: Vec2, radius: f32, color: Color) {
        let r = radius.max(0.5);
        let x0 = (center.x - r).floor() as i64;
        let x1 = (center.x + r).ceil() as i64;
        let y0 = (center.y - r).floor() as i64;
        let y1 = (center.y + r).ceil() as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if p.distance_squared(center) <= r * r {
                    self.blend(x, y, color);
                }
            }
        }
    }

    /// Soft disc whose alpha falls linearly from `color.a` at the center to
    /// zero at `radius`
    pub fn radial_blob(&mut self, center: Vec2, radius: f32, color: Color) {
        let r = radius.max(1.0);
        let x0 = (center.x - r).floor() as i64;
        let x1 = (center.x + r).ceil() as i64;
        let y0 = (center.y - r).floor() as i64;
        let y1 = (center.y + r).ceil() as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = p.distance(center) / r;
                if d < 1.0 {
                    self.blend(x, y, color.with_alpha(color.a * (1.0 - d)));
                }
            }
        }
    }

    /// Paint full-width rows `[y0, y1)`, colored per row by `shader(row)`
    pub fn fill_rows(&mut self, y0: u32, y1: u32, shader: impl Fn(u32) -> Color) {
        let y1 = y1.min(self.height);
        for y in y0..y1 {
            let color = shader(y);
            for x in 0..self.width {
                self.blend(x as i64, y as i64, color);
            }
        }
    }

    /// Convert to an `image` buffer
    pub fn to_image(&self) -> Result<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
            .ok_or_else(|| Error::Storage("raster size does not match pixel buffer".to_string()))
    }

    /// Write the raster as a PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_image()?.save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Wrote {}x{} texture to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEA: Color = Color::hex(0x1E4D6B);
    const LAND: Color = Color::hex(0x2D6A27);

    fn count(raster: &SurfaceRaster, color: Color) -> usize {
        let px = color.to_rgba8();
        raster.pixels().iter().filter(|p| **p == px).count()
    }

    #[test]
    fn test_new_and_bytes() {
        let raster = SurfaceRaster::new(4, 2, SEA);
        assert_eq!(raster.as_bytes().len(), 4 * 2 * 4);
        assert_eq!(&raster.as_bytes()[..4], &[0x1E, 0x4D, 0x6B, 0xFF]);
    }

    #[test]
    fn test_fill_square() {
        let mut raster = SurfaceRaster::new(20, 20, SEA);
        let square = [
            Vec2::new(5.0, 5.0),
            Vec2::new(15.0, 5.0),
            Vec2::new(15.0, 15.0),
            Vec2::new(5.0, 15.0),
        ];
        let painted = raster.fill_polygon_with(&square, |_| LAND);
        assert_eq!(painted, 100);
        assert_eq!(count(&raster, LAND), 100);
        assert_eq!(raster.get(5, 5), Some(LAND.to_rgba8()));
        assert_eq!(raster.get(15, 15), Some(SEA.to_rgba8()));
    }

    #[test]
    fn test_fill_wraps_horizontally() {
        let mut raster = SurfaceRaster::new(20, 10, SEA);
        let square = [
            Vec2::new(18.0, 0.0),
            Vec2::new(22.0, 0.0),
            Vec2::new(22.0, 2.0),
            Vec2::new(18.0, 2.0),
        ];
        raster.fill_polygon_with(&square, |_| LAND);
        assert_eq!(raster.get(19, 0), Some(LAND.to_rgba8()));
        assert_eq!(raster.get(0, 1), Some(LAND.to_rgba8()));
        assert_eq!(raster.get(1, 1), Some(LAND.to_rgba8()));
        assert_eq!(raster.get(2, 1), Some(SEA.to_rgba8()));
    }

    #[test]
    fn test_clip_vertically() {
        let mut raster = SurfaceRaster::new(10, 10, SEA);
        let tall = [
            Vec2::new(2.0, -50.0),
            Vec2::new(4.0, -50.0),
            Vec2::new(4.0, 50.0),
            Vec2::new(2.0, 50.0),
        ];
        assert_eq!(raster.fill_polygon_with(&tall, |_| LAND), 20);
    }

    #[test]
    fn test_gradient_darkens_outward() {
        let mut raster = SurfaceRaster::new(40, 40, SEA);
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(40.0, 0.0),
            Vec2::new(40.0, 40.0),
            Vec2::new(0.0, 40.0),
        ];
        raster.radial_gradient_polygon(&square, Vec2::new(20.0, 20.0), 20.0, LAND, LAND.shade(0.6));
        let center = raster.get(20, 20).unwrap();
        let corner = raster.get(0, 0).unwrap();
        assert!(corner.g < center.g);
    }

    #[test]
    fn test_blob_fades() {
        let mut raster = SurfaceRaster::new(40, 40, Color::BLACK);
        raster.radial_blob(Vec2::new(20.0, 20.0), 10.0, Color::WHITE.with_alpha(0.5));
        let center = raster.get(20, 20).unwrap();
        let edge = raster.get(29, 20).unwrap();
        assert!(center.r > edge.r);
        assert_eq!(raster.get(35, 20), Some(Color::BLACK.to_rgba8()));
    }

    #[test]
    fn test_to_image() {
        let raster = SurfaceRaster::new(8, 4, LAND);
        let img = raster.to_image().unwrap();
        assert_eq!(img.dimensions(), (8, 4));
        assert_eq!(img.get_pixel(3, 2).0, [0x2D, 0x6A, 0x27, 0xFF]);
    }
}
