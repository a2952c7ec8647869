use serde::{Deserialize, Serialize};

use crate::error::{RulerError, RulerResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const GREY: Self = Self::rgb(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses a CSS-like color: a basic named color, `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse(raw: &str) -> RulerResult<Self> {
        let value = raw.trim().to_ascii_lowercase();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| {
                RulerError::InvalidData(format!("color `{raw}` is not a valid hex color"))
            });
        }
        let named = match value.as_str() {
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            "grey" | "gray" => Self::GREY,
            "silver" => Self::rgb(0.75, 0.75, 0.75),
            "red" => Self::rgb(1.0, 0.0, 0.0),
            "green" => Self::rgb(0.0, 128.0 / 255.0, 0.0),
            "blue" => Self::rgb(0.0, 0.0, 1.0),
            "yellow" => Self::rgb(1.0, 1.0, 0.0),
            "orange" => Self::rgb(1.0, 165.0 / 255.0, 0.0),
            "transparent" => Self::rgba(0.0, 0.0, 0.0, 0.0),
            _ => {
                return Err(RulerError::InvalidData(format!(
                    "color `{raw}` is not a known color name"
                )));
            }
        };
        Ok(named)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |pair: &str| u8::from_str_radix(pair, 16).ok().map(|v| f64::from(v) / 255.0);
    match hex.len() {
        3 => {
            let mut doubled = String::with_capacity(6);
            for ch in hex.chars() {
                doubled.push(ch);
                doubled.push(ch);
            }
            parse_hex(&doubled)
        }
        6 | 8 => {
            if !hex.is_ascii() {
                return None;
            }
            let alpha = if hex.len() == 8 {
                channel(&hex[6..8])?
            } else {
                1.0
            };
            Some(Color::rgba(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                alpha,
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn parses_names_and_hex() {
        assert_eq!(Color::parse("White").expect("named"), Color::WHITE);
        assert_eq!(Color::parse("#fff").expect("short hex"), Color::WHITE);
        let translucent = Color::parse("#00000080").expect("hex with alpha");
        assert!((translucent.alpha - 128.0 / 255.0).abs() <= 1e-12);
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("chartreuse-ish").is_err());
    }
}
