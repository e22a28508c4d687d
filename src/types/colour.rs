//! Colour type, hex parsing and alpha compositing.
//!
//! Colours are straight (non-premultiplied) RGBA with 8-bit channels. Every
//! buffer in the crate stores them this way.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{DrawError, Result};

/// An RGBA colour value with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`; the leading `#`
    /// is optional.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        let invalid = || DrawError::Config {
            message: format!("Invalid hex colour: '{}'", s),
            help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
        };

        if !hex.is_ascii() {
            return Err(invalid());
        }

        match hex.len() {
            3 | 4 => {
                let mut channels = [255u8; 4];
                for (slot, c) in channels.iter_mut().zip(hex.chars()) {
                    let d = parse_hex_digit(c)?;
                    *slot = d << 4 | d;
                }
                Ok(Self::new(channels[0], channels[1], channels[2], channels[3]))
            }
            6 | 8 => {
                let mut channels = [255u8; 4];
                for (i, slot) in channels.iter_mut().enumerate().take(hex.len() / 2) {
                    *slot = parse_hex_byte(&hex[i * 2..i * 2 + 2])?;
                }
                Ok(Self::new(channels[0], channels[1], channels[2], channels[3]))
            }
            _ => Err(invalid()),
        }
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from an RGBA array.
    pub fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Porter-Duff "source over destination" for straight alpha.
    pub fn over(self, dst: Colour) -> Colour {
        if self.a == 255 || dst.a == 0 {
            return self;
        }
        if self.a == 0 {
            return dst;
        }

        let sa = self.a as f32 / 255.0;
        let da = dst.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);

        let channel = |s: u8, d: u8| -> u8 {
            let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };

        Colour::new(
            channel(self.r, dst.r),
            channel(self.g, dst.g),
            channel(self.b, dst.b),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        )
    }
}

impl FromStr for Colour {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = DrawError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| DrawError::Config {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| DrawError::Config {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#FF0000").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));

        let c = Colour::from_hex("#1a1a2e").unwrap();
        assert_eq!(c, Colour::rgb(0x1a, 0x1a, 0x2e));
    }

    #[test]
    fn test_from_hex_short_forms() {
        assert_eq!(Colour::from_hex("#ABC").unwrap(), Colour::rgb(0xAA, 0xBB, 0xCC));
        assert_eq!(Colour::from_hex("#F008").unwrap(), Colour::new(255, 0, 0, 0x88));
    }

    #[test]
    fn test_from_hex_8digit_no_hash() {
        let c = Colour::from_hex("FF000080").unwrap();
        assert_eq!(c, Colour::new(255, 0, 0, 128));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Colour::rgb(255, 0, 0)), "#FF0000");
        assert_eq!(format!("{}", Colour::new(255, 0, 0, 128)), "#FF000080");
    }

    #[test]
    fn test_over_opaque_source_replaces() {
        let src = Colour::rgb(10, 20, 30);
        assert_eq!(src.over(Colour::WHITE), src);
    }

    #[test]
    fn test_over_transparent_source_is_noop() {
        let dst = Colour::new(1, 2, 3, 200);
        assert_eq!(Colour::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn test_over_half_alpha_on_opaque() {
        let out = Colour::new(255, 0, 0, 128).over(Colour::rgb(0, 0, 255));
        assert_eq!(out.a, 255);
        assert!((out.r as i32 - 128).abs() <= 1);
        assert!((out.b as i32 - 127).abs() <= 1);
        assert_eq!(out.g, 0);
    }

    #[test]
    fn test_deserialize_from_string() {
        let c: Colour = serde_yaml::from_str("\"#00FF00\"").unwrap();
        assert_eq!(c, Colour::rgb(0, 255, 0));
        assert!(serde_yaml::from_str::<Colour>("\"nope\"").is_err());
    }
}
