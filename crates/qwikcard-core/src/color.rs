use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour {0:?}: expected #RGB or #RRGGBB")]
pub struct ColorError(pub String);

/// Opaque sRGB colour written as `#RGB` or `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor::rgb(0, 0, 0);
    pub const WHITE: HexColor = HexColor::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let err = || ColorError(input.to_string());
        let hex = input.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| err());
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        match hex.len() {
            3 => Ok(Self::rgb(
                nibble(0)? * 0x11,
                nibble(1)? * 0x11,
                nibble(2)? * 0x11,
            )),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            _ => Err(err()),
        }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(HexColor::parse("#FFFFFF"), Ok(HexColor::WHITE));
        assert_eq!(HexColor::parse("#000"), Ok(HexColor::BLACK));
        assert_eq!(HexColor::parse("#1a2B3c"), Ok(HexColor::rgb(0x1a, 0x2b, 0x3c)));
        assert_eq!(HexColor::parse("#f80"), Ok(HexColor::rgb(0xff, 0x88, 0x00)));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["FFFFFF", "#FFFF", "#GGGGGG", "", "#", "#ééé"] {
            assert!(HexColor::parse(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn displays_uppercase_hex() {
        assert_eq!(HexColor::rgb(10, 171, 255).to_string(), "#0AABFF");
    }
}
