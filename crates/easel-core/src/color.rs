/// Straight (non-premultiplied) RGBA8 color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packed `0xAARRGGBB`, the canvas pixel layout.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn from_argb(v: u32) -> Self {
        Self {
            a: (v >> 24) as u8,
            r: (v >> 16) as u8,
            g: (v >> 8) as u8,
            b: v as u8,
        }
    }

    /// Porter-Duff "over": `self` composited on top of `dst`.
    pub fn over(self, dst: Color) -> Color {
        match self.a {
            0xff => return self,
            0 => return dst,
            _ => {}
        }

        let sa = self.a as u32;
        let da = dst.a as u32 * (255 - sa) / 255;
        let out_a = sa + da;
        if out_a == 0 {
            return Color::TRANSPARENT;
        }

        let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da) / out_a) as u8;
        Color::rgba(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            out_a as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_packing_matches_channels() {
        let c = Color::rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.to_argb(), 0x7812_3456);
        assert_eq!(Color::from_argb(0x7812_3456), c);
    }

    #[test]
    fn over_with_opaque_or_clear_source() {
        assert_eq!(Color::WHITE.over(Color::BLACK), Color::WHITE);
        assert_eq!(Color::TRANSPARENT.over(Color::BLACK), Color::BLACK);
    }

    #[test]
    fn over_blends_half_alpha_on_opaque() {
        let out = Color::rgba(255, 0, 0, 128).over(Color::rgb(0, 0, 255));
        assert_eq!(out.a, 255);
        assert!(out.r > 120 && out.r < 135);
        assert!(out.b > 120 && out.b < 135);
    }
}
