use crate::color::Color;
use crate::error::{BackendError, BackendResult};
use crate::geom::{Rect, Size};

/// CPU-side RGBA image used as a paint source.
///
/// Callers build a texture, wrap it in `Arc` and hand it to the host; the host
/// only reads it during paint and never outlives the caller's ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    size: Size,
    /// `0xAARRGGBB`, row-major.
    pixels: Vec<u32>,
}

impl Texture {
    /// Fully transparent texture of `size`.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![0; size.area()],
        }
    }

    /// Build from tightly packed RGBA8 bytes (`width * height * 4`).
    pub fn from_rgba8(size: Size, rgba8: &[u8]) -> BackendResult<Self> {
        let expected = size.area() * 4;
        if rgba8.len() != expected {
            return Err(BackendError::TextureData(format!(
                "{} bytes for {} texture, expected {}",
                rgba8.len(),
                size,
                expected
            )));
        }

        let pixels = rgba8
            .chunks_exact(4)
            .map(|p| Color::rgba(p[0], p[1], p[2], p[3]).to_argb())
            .collect();
        Ok(Self { size, pixels })
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.size.bounds()
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the texture.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = y as usize * self.size.width as usize + x as usize;
        Some(Color::from_argb(self.pixels[idx]))
    }

    #[inline]
    pub(crate) fn argb_at(&self, x: u32, y: u32) -> u32 {
        self.pixels[y as usize * self.size.width as usize + x as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, c: Color) {
        if x < self.size.width && y < self.size.height {
            let idx = y as usize * self.size.width as usize + x as usize;
            self.pixels[idx] = c.to_argb();
        }
    }

    /// Replace every pixel in `r` (clipped to the texture) with `c`.
    pub fn fill(&mut self, r: Rect, c: Color) {
        let r = r.intersect(&self.bounds());
        if r.is_empty() {
            return;
        }
        let v = c.to_argb();
        let stride = self.size.width as usize;
        for y in r.min.y..r.max.y {
            let row = y as usize * stride;
            self.pixels[row + r.min.x as usize..row + r.max.x as usize].fill(v);
        }
    }
}
