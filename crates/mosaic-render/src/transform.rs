#![forbid(unsafe_code)]

//! Lossless geometric transforms and colour filters.

use std::fmt;

use crate::color::Rgba;

/// Counter-clockwise rotation in quarter turns.
///
/// Every value is a multiple of 90 degrees; 360 normalises to the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rotation(u8);

impl Rotation {
    pub const IDENTITY: Self = Self(0);
    pub const R90: Self = Self(1);
    pub const R180: Self = Self(2);
    pub const R270: Self = Self(3);

    /// Rotation by `turns` quarter turns (any integer, wrapped).
    #[inline]
    pub const fn quarter_turns(turns: i32) -> Self {
        Self(turns.rem_euclid(4) as u8)
    }

    /// Rotation by `degrees`, which must be a multiple of 90.
    pub const fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        Some(Self::quarter_turns(degrees / 90))
    }

    /// Angle in degrees, in `[0, 360)`.
    #[inline]
    pub const fn degrees(self) -> u16 {
        self.0 as u16 * 90
    }

    /// Number of counter-clockwise quarter turns, in `[0, 4)`.
    #[inline]
    pub const fn turns(self) -> u8 {
        self.0
    }

    /// The rotation that undoes this one (`360 - θ`).
    #[inline]
    pub const fn inverse(self) -> Self {
        Self((4 - self.0) % 4)
    }

    /// Rotation equal to applying `self` then `other`.
    #[inline]
    pub const fn then(self, other: Self) -> Self {
        Self((self.0 + other.0) % 4)
    }

    #[inline]
    pub const fn is_identity(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left-right mirror (x is reflected).
    Horizontal,
    /// Top-bottom mirror (y is reflected).
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        })
    }
}

/// Per-pixel colour filter. Alpha is never touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    /// Replace RGB with their mean.
    Grayscale,
    /// Add `color * strength` to RGB, clamped to `[0, 255]`.
    Tint { color: Rgba, strength: f32 },
}

impl Filter {
    /// Apply the filter to one pixel.
    pub fn apply(&self, px: Rgba) -> Rgba {
        match *self {
            Self::Grayscale => {
                let sum = px.r as u16 + px.g as u16 + px.b as u16;
                let mean = ((sum + 1) / 3) as u8;
                Rgba::rgba(mean, mean, mean, px.a)
            }
            Self::Tint { color, strength } => {
                let add = |c: u8, t: u8| {
                    (c as f32 + t as f32 * strength).round().clamp(0.0, 255.0) as u8
                };
                Rgba::rgba(
                    add(px.r, color.r),
                    add(px.g, color.g),
                    add(px.b, color.b),
                    px.a,
                )
            }
        }
    }
}
