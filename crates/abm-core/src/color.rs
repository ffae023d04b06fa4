//! RGBA color with fail-fast name lookup.
//!
//! The drawing surface is an external collaborator; the core only needs a
//! compact value type and the handful of operations models actually use:
//! construction, a small named table, random colors, and brightness scaling
//! for field visualization (`diffuse`).
//!
//! An unknown color name is a configuration error, never a silent default.

use crate::error::{AbmError, AbmResult};
use crate::rng::SimRng;

/// An RGBA color, one byte per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0, 255]);
    pub const WHITE: Color = Color([255, 255, 255, 255]);
    pub const RED: Color = Color([255, 0, 0, 255]);
    pub const GREEN: Color = Color([0, 128, 0, 255]);
    pub const BLUE: Color = Color([0, 0, 255, 255]);
    pub const YELLOW: Color = Color([255, 255, 0, 255]);
    pub const GRAY: Color = Color([128, 128, 128, 255]);
    pub const LIGHT_GRAY: Color = Color([211, 211, 211, 255]);

    #[inline]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b, 255])
    }

    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color([r, g, b, a])
    }

    /// Look up a color by name.
    ///
    /// Fails with [`AbmError::Config`] on an unknown name so a typo in model
    /// configuration surfaces at construction time.
    pub fn named(name: &str) -> AbmResult<Color> {
        match name {
            "black" => Ok(Self::BLACK),
            "white" => Ok(Self::WHITE),
            "red" => Ok(Self::RED),
            "green" => Ok(Self::GREEN),
            "blue" => Ok(Self::BLUE),
            "yellow" => Ok(Self::YELLOW),
            "gray" | "grey" => Ok(Self::GRAY),
            "lightgray" | "lightgrey" => Ok(Self::LIGHT_GRAY),
            other => Err(AbmError::Config(format!("unknown color name {other:?}"))),
        }
    }

    /// A random opaque color.
    pub fn random(rng: &mut SimRng) -> Color {
        Color::rgb(rng.gen_range(0..=255), rng.gen_range(0..=255), rng.gen_range(0..=255))
    }

    /// Scale the RGB channels by `fraction` (clamped to `[0, 1]`), keeping
    /// alpha.  Used to render scalar patch fields as brightness.
    pub fn fraction(self, fraction: f64) -> Color {
        let f = fraction.clamp(0.0, 1.0);
        let [r, g, b, a] = self.0;
        Color([
            (r as f64 * f) as u8,
            (g as f64 * f) as u8,
            (b as f64 * f) as u8,
            a,
        ])
    }
}
