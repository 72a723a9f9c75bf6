use anyhow::{Context, Result, anyhow};
use image::{Rgba, RgbaImage};
use font8x8::{BASIC_FONTS, UnicodeFonts};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::f64::consts::PI;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

use super::{MapCanvas, Projection};
use crate::marker::Marker;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const MAP_FILL: Rgba<u8> = Rgba([77, 77, 77, 255]);
const GRATICULE: Rgba<u8> = Rgba([0, 0, 0, 255]);
const TITLE_INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Side of a font8x8 glyph, in font pixels.
const GLYPH: u32 = 8;

/// Fraction of the shorter image side left blank around the map.
const MARGIN: f64 = 0.05;

/// In-memory bitmap map, saved as PNG. The title is drawn above the map
/// and also stored in a `Title` text chunk.
pub struct RasterMap {
    image: RgbaImage,
    projection: Option<Projection>,
    title: Option<String>,
}

impl RasterMap {
    pub const DEFAULT_WIDTH: u32 = 1600;
    pub const DEFAULT_HEIGHT: u32 = 1200;
    /// Pixels per inch; marker sizes are in points (1/72 inch).
    pub const DPI: f64 = 100.0;

    pub fn new(width: u32, height: u32) -> Self {
        RasterMap {
            image: RgbaImage::from_pixel(width.max(1), height.max(1), BACKGROUND),
            projection: None,
            title: None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Map units per pixel scale, chosen so the whole map fits.
    fn scale(&self, projection: &Projection) -> f64 {
        let (w, h) = (self.image.width() as f64, self.image.height() as f64);
        let margin = w.min(h) * MARGIN;
        let (half_x, half_y) = projection.extent();
        ((w - 2.0 * margin) / (2.0 * half_x)).min((h - 2.0 * margin) / (2.0 * half_y))
    }

    fn to_pixel(&self, projection: &Projection, x: f64, y: f64) -> (f32, f32) {
        let scale = self.scale(projection);
        let cx = self.image.width() as f64 / 2.0;
        let cy = self.image.height() as f64 / 2.0;
        ((cx + x * scale) as f32, (cy - y * scale) as f32)
    }

    /// Pixel row of the map's north edge.
    fn map_top(&self) -> f64 {
        let projection = self.projection.unwrap_or_default();
        self.image.height() as f64 / 2.0 - projection.extent().1 * self.scale(&projection)
    }

    /// Draws `title` centered in the band above the map with the font8x8
    /// bitmap glyphs, scaled up on wide images. Characters without a glyph
    /// are skipped.
    fn draw_title(&mut self, title: &str) {
        let px = (self.image.width() / 800).max(1);
        let glyphs: Vec<[u8; 8]> = title.chars().filter_map(|c| BASIC_FONTS.get(c)).collect();

        let text_width = (GLYPH * px) as i64 * glyphs.len() as i64;
        let x0 = (self.image.width() as i64 - text_width) / 2;
        let y0 = ((self.map_top() - (GLYPH * px) as f64) / 2.0).max(0.0) as i64;

        for (i, rows) in glyphs.iter().enumerate() {
            let left = x0 + (i as i64) * (GLYPH * px) as i64;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH {
                    // Bit 0 is the leftmost pixel.
                    if bits >> col & 1 == 1 {
                        let x = left + (col * px) as i64;
                        let y = y0 + (row as i64) * px as i64;
                        draw_filled_rect_mut(
                            &mut self.image,
                            Rect::at(x as i32, y as i32).of_size(px, px),
                            TITLE_INK,
                        );
                    }
                }
            }
        }
    }

    fn fill_boundary(&mut self, projection: &Projection) {
        let scale = self.scale(projection);
        let cx = self.image.width() as f64 / 2.0;
        let cy = self.image.height() as f64 / 2.0;

        for py in 0..self.image.height() {
            let y = (cy - (py as f64 + 0.5)) / scale;
            if y.abs() > PI / 2.0 {
                continue;
            }
            let half = projection.half_width(y);
            for px in 0..self.image.width() {
                let x = (px as f64 + 0.5 - cx) / scale;
                if x.abs() <= half {
                    self.image.put_pixel(px, py, MAP_FILL);
                }
            }
        }
    }

    fn draw_polyline(&mut self, points: &[(f32, f32)]) {
        for pair in points.windows(2) {
            draw_line_segment_mut(&mut self.image, pair[0], pair[1], GRATICULE);
        }
    }

    fn draw_graticule(&mut self, projection: &Projection) {
        // Parallels every 30 degrees, poles included.
        for lat in (-90..=90).step_by(30) {
            let phi = (lat as f64).to_radians();
            let half = projection.half_width(phi);
            let start = self.to_pixel(projection, -half, phi);
            let end = self.to_pixel(projection, half, phi);
            draw_line_segment_mut(&mut self.image, start, end, GRATICULE);
        }

        // Meridians every 60 degrees.
        for lon in (-180..180).step_by(60) {
            let points: Vec<_> = (-90..=90)
                .map(|lat| {
                    let (x, y) = projection.project(lon as f64, lat as f64);
                    self.to_pixel(projection, x, y)
                })
                .collect();
            self.draw_polyline(&points);
        }

        // Left and right map edges.
        for side in [-1.0, 1.0] {
            let points: Vec<_> = (-90..=90)
                .map(|lat| {
                    let phi = (lat as f64).to_radians();
                    self.to_pixel(projection, side * projection.half_width(phi), phi)
                })
                .collect();
            self.draw_polyline(&points);
        }
    }
}

impl Default for RasterMap {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

impl MapCanvas for RasterMap {
    fn draw_base_map(&mut self, projection: &Projection) -> Result<()> {
        self.fill_boundary(projection);
        self.draw_graticule(projection);
        self.projection = Some(*projection);
        debug!(
            width = self.image.width(),
            height = self.image.height(),
            "Base map drawn"
        );
        Ok(())
    }

    fn plot_marker(&mut self, longitude: f64, latitude: f64, marker: Marker) -> Result<()> {
        let projection = self
            .projection
            .ok_or_else(|| anyhow!("base map must be drawn before plotting markers"))?;

        let (x, y) = projection.project(longitude, latitude);
        let (px, py) = self.to_pixel(&projection, x, y);
        // Bounded by the image diagonal; a larger circle covers nothing more.
        let (w, h) = (self.image.width() as f64, self.image.height() as f64);
        let radius = (marker.size * Self::DPI / 72.0 / 2.0).round();
        let radius = if radius.is_nan() {
            1
        } else {
            radius.clamp(1.0, (w * w + h * h).sqrt().ceil()) as i32
        };
        let [r, g, b] = marker.class.rgb();

        draw_filled_circle_mut(
            &mut self.image,
            (px.round() as i32, py.round() as i32),
            radius,
            Rgba([r, g, b, 255]),
        );
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.draw_title(title);
        self.title = Some(title.to_string());
    }

    fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create image file {}", path.display()))?;

        let mut encoder = png::Encoder::new(
            BufWriter::new(file),
            self.image.width(),
            self.image.height(),
        );
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        if let Some(title) = &self.title {
            if title.is_ascii() {
                encoder.add_text_chunk("Title".to_string(), title.clone())?;
            } else {
                encoder.add_itxt_chunk("Title".to_string(), title.clone())?;
            }
        }

        let mut writer = encoder.write_header()?;
        writer.write_image_data(self.image.as_raw())?;
        writer.finish()?;

        debug!(path = %path.display(), "Map image written");
        Ok(())
    }
}
