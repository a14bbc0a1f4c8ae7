//! Shared spacing, size and color scales.
//!
//! Style values reach the backends as resolved literals: numbers in points,
//! or strings such as `"16px"`, `"1.5rem"`, `"50%"`, `"auto"` and colors.
//! Each backend maps the parsed form into its own units.

use screenspec_core::{format_number, StyleValue};

/// Pixels per `rem`.
pub const REM_PX: f64 = 16.0;

/// Tailwind spacing steps keyed by pixel value.
pub const SPACING_SCALE: &[(f64, &str)] = &[
    (0.0, "0"),
    (1.0, "px"),
    (2.0, "0.5"),
    (4.0, "1"),
    (6.0, "1.5"),
    (8.0, "2"),
    (10.0, "2.5"),
    (12.0, "3"),
    (14.0, "3.5"),
    (16.0, "4"),
    (20.0, "5"),
    (24.0, "6"),
    (28.0, "7"),
    (32.0, "8"),
    (36.0, "9"),
    (40.0, "10"),
    (44.0, "11"),
    (48.0, "12"),
    (56.0, "14"),
    (64.0, "16"),
    (80.0, "20"),
    (96.0, "24"),
    (112.0, "28"),
    (128.0, "32"),
    (144.0, "36"),
    (160.0, "40"),
    (176.0, "44"),
    (192.0, "48"),
    (208.0, "52"),
    (224.0, "56"),
    (240.0, "60"),
    (256.0, "64"),
    (288.0, "72"),
    (320.0, "80"),
    (384.0, "96"),
];

/// Tailwind font size steps keyed by pixel value.
pub const FONT_SIZE_SCALE: &[(f64, &str)] = &[
    (12.0, "xs"),
    (14.0, "sm"),
    (16.0, "base"),
    (18.0, "lg"),
    (20.0, "xl"),
    (24.0, "2xl"),
    (30.0, "3xl"),
    (36.0, "4xl"),
    (48.0, "5xl"),
    (60.0, "6xl"),
    (72.0, "7xl"),
    (96.0, "8xl"),
    (128.0, "9xl"),
];

/// Tailwind border radius steps keyed by pixel value.
pub const RADIUS_SCALE: &[(f64, &str)] = &[
    (0.0, "rounded-none"),
    (2.0, "rounded-sm"),
    (4.0, "rounded"),
    (6.0, "rounded-md"),
    (8.0, "rounded-lg"),
    (12.0, "rounded-xl"),
    (16.0, "rounded-2xl"),
    (24.0, "rounded-3xl"),
    (9999.0, "rounded-full"),
];

fn lookup(scale: &[(f64, &'static str)], px: f64) -> Option<&'static str> {
    scale
        .iter()
        .find(|(value, _)| (value - px).abs() < f64::EPSILON)
        .map(|(_, step)| *step)
}

/// Spacing step for an exact pixel value.
pub fn spacing_step(px: f64) -> Option<&'static str> {
    lookup(SPACING_SCALE, px)
}

/// Font size step for an exact pixel value.
pub fn font_size_step(px: f64) -> Option<&'static str> {
    lookup(FONT_SIZE_SCALE, px)
}

/// Border radius class for an exact pixel value.
pub fn radius_class(px: f64) -> Option<&'static str> {
    lookup(RADIUS_SCALE, px)
}

/// A parsed length.
#[derive(Debug, Clone, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
    Auto,
    /// Anything else, passed through verbatim.
    Raw(String),
}

impl Length {
    pub fn parse(value: &StyleValue) -> Self {
        match value {
            StyleValue::Number(n) => Self::Px(*n),
            StyleValue::Text(text) => Self::parse_str(text),
        }
    }

    fn parse_str(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case("auto") {
            return Self::Auto;
        }
        if text.eq_ignore_ascii_case("full") {
            return Self::Percent(100.0);
        }
        let parsed = if let Some(n) = text.strip_suffix("px") {
            n.trim().parse().ok().map(Self::Px)
        } else if let Some(n) = text.strip_suffix("rem") {
            n.trim().parse::<f64>().ok().map(|n| Self::Px(n * REM_PX))
        } else if let Some(n) = text.strip_suffix('%') {
            n.trim().parse().ok().map(Self::Percent)
        } else {
            text.parse().ok().map(Self::Px)
        };
        parsed.unwrap_or_else(|| Self::Raw(text.to_string()))
    }

    pub fn as_px(&self) -> Option<f64> {
        match self {
            Self::Px(px) => Some(*px),
            _ => None,
        }
    }

    /// CSS text for this length.
    pub fn to_css(&self) -> String {
        match self {
            Self::Px(px) => format!("{}px", format_number(*px)),
            Self::Percent(p) => format!("{}%", format_number(*p)),
            Self::Auto => "auto".to_string(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

/// Numeric font weight for a weight value.
pub fn font_weight(value: &StyleValue) -> Option<u16> {
    match value {
        StyleValue::Number(n) => Some(n.round().clamp(100.0, 900.0) as u16),
        StyleValue::Text(text) => {
            let text = text.trim().to_ascii_lowercase();
            if let Ok(n) = text.parse::<f64>() {
                return Some(n.round().clamp(100.0, 900.0) as u16);
            }
            let weight = match text.as_str() {
                "thin" => 100,
                "extralight" => 200,
                "light" => 300,
                "normal" | "regular" => 400,
                "medium" => 500,
                "semibold" => 600,
                "bold" => 700,
                "extrabold" => 800,
                "black" => 900,
                _ => return None,
            };
            Some(weight)
        }
    }
}

/// Weight name shared by Tailwind, SwiftUI and Compose.
pub fn weight_name(weight: u16) -> &'static str {
    match weight {
        0..=149 => "thin",
        150..=249 => "extralight",
        250..=349 => "light",
        350..=449 => "normal",
        450..=549 => "medium",
        550..=649 => "semibold",
        650..=749 => "bold",
        750..=849 => "extrabold",
        _ => "black",
    }
}

/// A named elevation preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub name: &'static str,
    pub css: &'static str,
    /// Android elevation and compose shadow, in dp.
    pub elevation: f64,
    /// SwiftUI shadow radius.
    pub radius: f64,
}

pub const SHADOWS: &[Shadow] = &[
    Shadow { name: "none", css: "none", elevation: 0.0, radius: 0.0 },
    Shadow { name: "sm", css: "0 1px 2px 0 rgba(0, 0, 0, 0.05)", elevation: 1.0, radius: 1.0 },
    Shadow { name: "md", css: "0 4px 6px -1px rgba(0, 0, 0, 0.1)", elevation: 4.0, radius: 3.0 },
    Shadow { name: "lg", css: "0 10px 15px -3px rgba(0, 0, 0, 0.1)", elevation: 8.0, radius: 8.0 },
    Shadow { name: "xl", css: "0 20px 25px -5px rgba(0, 0, 0, 0.1)", elevation: 12.0, radius: 12.0 },
];

/// Shadow preset by name.
pub fn shadow(value: &StyleValue) -> Option<&'static Shadow> {
    let name = value.as_text()?.trim();
    SHADOWS.iter().find(|s| s.name == name)
}

/// An sRGB color with alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// `0xAARRGGBB` literal for Compose.
    pub fn to_argb_hex(self) -> String {
        let alpha = (self.a * 255.0).round().clamp(0.0, 255.0) as u8;
        format!("0x{alpha:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channel values in `0.0..=1.0` for SwiftUI.
    pub fn unit_channels(self) -> [f64; 3] {
        [self.r, self.g, self.b].map(|c| (f64::from(c) / 255.0 * 1000.0).round() / 1000.0)
    }
}

/// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(...)` and `rgba(...)`.
pub fn parse_color(text: &str) -> Option<Rgba> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }
    let inner = text
        .strip_prefix("rgba(")
        .or_else(|| text.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let channel = |s: &str| s.parse::<f64>().ok().map(|c| c.round().clamp(0.0, 255.0) as u8);
    match parts.as_slice() {
        [r, g, b] => Some(Rgba { r: channel(r)?, g: channel(g)?, b: channel(b)?, a: 1.0 }),
        [r, g, b, a] => Some(Rgba {
            r: channel(r)?,
            g: channel(g)?,
            b: channel(b)?,
            a: a.parse::<f64>().ok()?.clamp(0.0, 1.0),
        }),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digits: Vec<u8> = match hex.len() {
        3 | 4 => hex
            .chars()
            .map(|c| u8::from_str_radix(&format!("{c}{c}"), 16).ok())
            .collect::<Option<_>>()?,
        6 | 8 => (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
            .collect::<Option<_>>()?,
        _ => return None,
    };
    let alpha = digits.get(3).map_or(1.0, |a| f64::from(*a) / 255.0);
    Some(Rgba { r: digits[0], g: digits[1], b: digits[2], a: alpha })
}
