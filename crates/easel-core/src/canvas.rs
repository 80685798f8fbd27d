use crate::color::Color;
use crate::geom::{Rect, Size};
use crate::screen::DrawOp;
use crate::texture::Texture;

/// Window-sized `0xAARRGGBB` pixel buffer that backends draw into before publishing.
///
/// All operations clip to the canvas bounds, so drawing never fails.
#[derive(Debug, Clone)]
pub struct Canvas {
    size: Size,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Color::BLACK.to_argb(); size.area()],
        }
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

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(Color::from_argb(
            self.pixels[y as usize * self.size.width as usize + x as usize],
        ))
    }

    /// Reallocate to `size`. Contents are reset to opaque black.
    pub fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.area(), Color::BLACK.to_argb());
    }

    pub fn fill(&mut self, r: Rect, c: Color, op: DrawOp) {
        let r = r.intersect(&self.bounds());
        if r.is_empty() {
            return;
        }

        let stride = self.size.width as usize;
        for y in r.min.y..r.max.y {
            let row = y as usize * stride;
            let span = &mut self.pixels[row + r.min.x as usize..row + r.max.x as usize];
            match op {
                DrawOp::Src => span.fill(c.to_argb()),
                DrawOp::Over => {
                    for px in span {
                        *px = c.over(Color::from_argb(*px)).to_argb();
                    }
                }
            }
        }
    }

    /// Nearest-neighbour scale of `src` (in texture space) onto `dst` (in canvas space).
    ///
    /// Samples falling outside the texture leave the destination untouched.
    pub fn scale(&mut self, dst: Rect, tex: &Texture, src: Rect, op: DrawOp) {
        if dst.is_empty() || src.is_empty() {
            return;
        }
        let clip = dst.intersect(&self.bounds());
        if clip.is_empty() {
            return;
        }

        let (dw, dh) = (dst.width() as i64, dst.height() as i64);
        let (sw, sh) = (src.width() as i64, src.height() as i64);
        let tex_bounds = tex.bounds();
        let stride = self.size.width as usize;

        for y in clip.min.y..clip.max.y {
            let sy = src.min.y as i64 + (y - dst.min.y) as i64 * sh / dh;
            let row = y as usize * stride;
            for x in clip.min.x..clip.max.x {
                let sx = src.min.x as i64 + (x - dst.min.x) as i64 * sw / dw;
                if sx < tex_bounds.min.x as i64
                    || sy < tex_bounds.min.y as i64
                    || sx >= tex_bounds.max.x as i64
                    || sy >= tex_bounds.max.y as i64
                {
                    continue;
                }

                let s = tex.argb_at(sx as u32, sy as u32);
                let px = &mut self.pixels[row + x as usize];
                *px = match op {
                    DrawOp::Src => s,
                    DrawOp::Over => Color::from_argb(s).over(Color::from_argb(*px)).to_argb(),
                };
            }
        }
    }

    /// Copy into a `0x00RRGGBB` buffer (the layout presentation surfaces expect).
    /// Copies `min(len)` pixels.
    pub fn copy_xrgb_into(&self, out: &mut [u32]) {
        for (o, p) in out.iter_mut().zip(self.pixels.iter()) {
            *o = p & 0x00ff_ffff;
        }
    }
}
