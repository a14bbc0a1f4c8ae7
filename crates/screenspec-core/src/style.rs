//! The typed style bag.
//!
//! Only a fixed set of visual properties is modeled. Values are numbers or
//! strings; a string starting with [`TOKEN_SIGIL`](crate::TOKEN_SIGIL) is a
//! design token reference that is resolved at compile time.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tokens::TOKEN_SIGIL;

/// A style property name.
///
/// Declaration order is the canonical order used for serialization and
/// emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleProperty {
    Padding,
    PaddingX,
    PaddingY,
    Margin,
    MarginX,
    MarginY,
    Gap,
    Width,
    Height,
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
    BackgroundColor,
    Color,
    BorderColor,
    BorderWidth,
    BorderRadius,
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
    LetterSpacing,
    TextAlign,
    Shadow,
    Opacity,
    FlexDirection,
    AlignItems,
    JustifyContent,
    Flex,
}

impl StyleProperty {
    /// Every property, in canonical order.
    pub const ALL: [StyleProperty; 30] = [
        Self::Padding,
        Self::PaddingX,
        Self::PaddingY,
        Self::Margin,
        Self::MarginX,
        Self::MarginY,
        Self::Gap,
        Self::Width,
        Self::Height,
        Self::MinWidth,
        Self::MaxWidth,
        Self::MinHeight,
        Self::MaxHeight,
        Self::BackgroundColor,
        Self::Color,
        Self::BorderColor,
        Self::BorderWidth,
        Self::BorderRadius,
        Self::FontFamily,
        Self::FontSize,
        Self::FontWeight,
        Self::LineHeight,
        Self::LetterSpacing,
        Self::TextAlign,
        Self::Shadow,
        Self::Opacity,
        Self::FlexDirection,
        Self::AlignItems,
        Self::JustifyContent,
        Self::Flex,
    ];

    /// The camelCase key used in JSON documents.
    pub fn key(self) -> &'static str {
        match self {
            Self::Padding => "padding",
            Self::PaddingX => "paddingX",
            Self::PaddingY => "paddingY",
            Self::Margin => "margin",
            Self::MarginX => "marginX",
            Self::MarginY => "marginY",
            Self::Gap => "gap",
            Self::Width => "width",
            Self::Height => "height",
            Self::MinWidth => "minWidth",
            Self::MaxWidth => "maxWidth",
            Self::MinHeight => "minHeight",
            Self::MaxHeight => "maxHeight",
            Self::BackgroundColor => "backgroundColor",
            Self::Color => "color",
            Self::BorderColor => "borderColor",
            Self::BorderWidth => "borderWidth",
            Self::BorderRadius => "borderRadius",
            Self::FontFamily => "fontFamily",
            Self::FontSize => "fontSize",
            Self::FontWeight => "fontWeight",
            Self::LineHeight => "lineHeight",
            Self::LetterSpacing => "letterSpacing",
            Self::TextAlign => "textAlign",
            Self::Shadow => "shadow",
            Self::Opacity => "opacity",
            Self::FlexDirection => "flexDirection",
            Self::AlignItems => "alignItems",
            Self::JustifyContent => "justifyContent",
            Self::Flex => "flex",
        }
    }

    /// Look up a property by its JSON key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.key() == key)
    }

    /// Properties whose values are lengths on the shared spacing scale.
    pub fn is_spacing(self) -> bool {
        matches!(
            self,
            Self::Padding
                | Self::PaddingX
                | Self::PaddingY
                | Self::Margin
                | Self::MarginX
                | Self::MarginY
                | Self::Gap
        )
    }

    /// Properties whose values are lengths on the shared size scale.
    pub fn is_size(self) -> bool {
        matches!(
            self,
            Self::Width
                | Self::Height
                | Self::MinWidth
                | Self::MaxWidth
                | Self::MinHeight
                | Self::MaxHeight
        )
    }

    /// Properties whose values are colors.
    pub fn is_color(self) -> bool {
        matches!(self, Self::BackgroundColor | Self::Color | Self::BorderColor)
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single style value: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// The token path if this value is a `$`-prefixed reference.
    pub fn as_token_ref(&self) -> Option<&str> {
        match self {
            Self::Text(s) => s.strip_prefix(TOKEN_SIGIL),
            Self::Number(_) => None,
        }
    }

    /// Whether this value is a token reference.
    pub fn is_token_ref(&self) -> bool {
        self.as_token_ref().is_some()
    }

    /// Try to get as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Try to get as a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Convert a JSON primitive into a style value.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map(Self::Number),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Bool(b) => Some(Self::Text(b.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Format a number without a trailing `.0` for integral values.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A typed style bag keyed by [`StyleProperty`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<StyleProperty, StyleValue>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value.
    pub fn get(&self, property: StyleProperty) -> Option<&StyleValue> {
        self.0.get(&property)
    }

    /// Set a property value, returning the previous one.
    pub fn insert(&mut self, property: StyleProperty, value: impl Into<StyleValue>) -> Option<StyleValue> {
        self.0.insert(property, value.into())
    }

    /// Remove a property.
    pub fn remove(&mut self, property: StyleProperty) -> Option<StyleValue> {
        self.0.remove(&property)
    }

    /// Shallow merge: every property in `other` overwrites the one here.
    pub fn merge(&mut self, other: &Style) {
        for (property, value) in &other.0 {
            self.0.insert(*property, value.clone());
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, property: StyleProperty, value: impl Into<StyleValue>) -> Self {
        self.insert(property, value);
        self
    }

    /// Iterate in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &StyleValue)> {
        self.0.iter().map(|(p, v)| (*p, v))
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no property is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(StyleProperty, StyleValue)> for Style {
    fn from_iter<I: IntoIterator<Item = (StyleProperty, StyleValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A responsive breakpoint with its own partial style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Breakpoint {
    Tablet,
    Mobile,
}

impl Breakpoint {
    /// Maximum viewport width, in points, at which the breakpoint applies.
    pub fn max_width(self) -> u32 {
        match self {
            Self::Tablet => 1024,
            Self::Mobile => 768,
        }
    }
}

/// Tablet and mobile partial style overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Responsive {
    #[serde(default, skip_serializing_if = "Style::is_empty")]
    pub tablet: Style,
    #[serde(default, skip_serializing_if = "Style::is_empty")]
    pub mobile: Style,
}

impl Responsive {
    pub fn get(&self, breakpoint: Breakpoint) -> &Style {
        match breakpoint {
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::Mobile => &self.mobile,
        }
    }

    pub fn get_mut(&mut self, breakpoint: Breakpoint) -> &mut Style {
        match breakpoint {
            Breakpoint::Tablet => &mut self.tablet,
            Breakpoint::Mobile => &mut self.mobile,
        }
    }

    /// Non-empty overrides, widest breakpoint first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &Style)> {
        [Breakpoint::Tablet, Breakpoint::Mobile]
            .into_iter()
            .map(move |bp| (bp, self.get(bp)))
            .filter(|(_, style)| !style.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.tablet.is_empty() && self.mobile.is_empty()
    }
}
