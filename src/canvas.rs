use std::io::Cursor;

use egui::{Color32, ColorImage, Pos2};

use crate::error::{WhiteboardError, WhiteboardResult};
use crate::tool::Brush;

/// Opaque raster the whiteboard draws into, stored row-major
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
}

impl CanvasBuffer {
    pub fn new(width: usize, height: usize, background: Color32) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// [width, height], the order egui uses for image sizes
    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    /// Memory held by the pixel data
    pub fn byte_len(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Color32>()
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color32) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn fill(&mut self, color: Color32) {
        self.pixels.fill(color);
    }

    /// Rasterize one segment of a stroke.
    ///
    /// A pixel is painted when its centre lies within half the brush width
    /// of the segment, which gives round caps. Consecutive segments share an
    /// endpoint, so the caps also act as round joins.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, brush: Brush) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let radius = (brush.width * 0.5).max(0.5);

        let min_x = (from.x.min(to.x) - radius).floor().max(0.0);
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0);
        let max_x = (from.x.max(to.x) + radius).ceil().min(self.width as f32 - 1.0);
        let max_y = (from.y.max(to.y) + radius).ceil().min(self.height as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let radius_sq = radius * radius;
        for y in min_y as usize..=max_y as usize {
            for x in min_x as usize..=max_x as usize {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_sq_to_segment(center, from, to) <= radius_sq {
                    self.pixels[y * self.width + x] = brush.color;
                }
            }
        }
    }

    /// Encode the buffer as an RGBA PNG
    pub fn to_png(&self) -> WhiteboardResult<Vec<u8>> {
        let raw: Vec<u8> = self.pixels.iter().flat_map(|c| c.to_array()).collect();
        let image = image::RgbaImage::from_raw(self.width as u32, self.height as u32, raw)
            .ok_or(WhiteboardError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;

        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    pub fn to_color_image(&self) -> ColorImage {
        let mut image = ColorImage::new(self.size(), Color32::TRANSPARENT);
        image.pixels.copy_from_slice(&self.pixels);
        image
    }
}

fn distance_sq_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance_sq(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_sq(a + ab * t)
}
