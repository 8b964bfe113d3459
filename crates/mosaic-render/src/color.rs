#![forbid(unsafe_code)]

//! RGBA colour with straight (non-premultiplied) alpha.

/// An 8-bit RGBA colour.
///
/// Channels are stored straight; compositing uses Porter-Duff source-over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque colour.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Colour with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from a 4-byte RGBA slice.
    #[inline]
    pub const fn from_bytes(px: [u8; 4]) -> Self {
        Self::rgba(px[0], px[1], px[2], px[3])
    }

    /// The four channels in RGBA order.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same colour with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    #[inline]
    const fn div_round(numer: u64, denom: u64) -> u8 {
        let v = (numer + denom / 2) / denom;
        if v > 255 { 255 } else { v as u8 }
    }

    /// Composite `self` over `dst`.
    ///
    /// `out_a = a_s + a_d * (1 - a_s)`. Colour is the premultiplied blend
    /// divided back by `out_a`, evaluated as one exact rational per channel
    /// and rounded once.
    #[inline]
    pub fn over(self, dst: Self) -> Self {
        let sa = self.a as u64;
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }

        let da = dst.a as u64;
        let rest = 255 - sa;

        // Everything below lives in the 255^2 domain.
        let alpha_num = 255 * sa + da * rest;
        if alpha_num == 0 {
            return Self::TRANSPARENT;
        }

        let blend = |s: u8, d: u8| {
            Self::div_round(s as u64 * sa * 255 + d as u64 * da * rest, alpha_num)
        };

        Self::rgba(
            blend(self.r, dst.r),
            blend(self.g, dst.g),
            blend(self.b, dst.b),
            Self::div_round(alpha_num, 255),
        )
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(px: [u8; 4]) -> Self {
        Self::from_bytes(px)
    }
}

impl From<(u8, u8, u8)> for Rgba {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::Rgba;

    #[test]
    fn opaque_source_wins() {
        let red = Rgba::rgb(255, 0, 0);
        assert_eq!(red.over(Rgba::WHITE), red);
    }

    #[test]
    fn transparent_source_keeps_destination() {
        let dst = Rgba::rgba(10, 20, 30, 40);
        assert_eq!(Rgba::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn half_alpha_over_opaque_blends_evenly() {
        let src = Rgba::rgba(255, 0, 0, 128);
        let out = src.over(Rgba::rgb(0, 0, 255));
        assert_eq!(out.a, 255);
        assert_eq!(out.r, 128);
        assert_eq!(out.g, 0);
        assert_eq!(out.b, 127);
    }

    #[test]
    fn alpha_is_union_of_coverages() {
        // 1 - (1 - 0.5)(1 - 0.5) = 0.75
        let half = Rgba::rgba(0, 0, 0, 128);
        let out = half.over(half);
        assert_eq!(out.a, 192);
    }

    #[test]
    fn both_transparent_stays_transparent() {
        let src = Rgba::rgba(9, 9, 9, 0);
        assert_eq!(src.over(Rgba::TRANSPARENT), Rgba::TRANSPARENT);
    }
}
