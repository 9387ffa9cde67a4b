//! Collage and timelapse configuration types.

use serde::{Deserialize, Serialize};

/// Available collage layout algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Grid,
    Masonry,
    Polaroid,
    Film,
    Circle,
    Honeycomb,
    Strips,
    Focus,
    Heart,
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LayoutKind::Grid => "grid",
            LayoutKind::Masonry => "masonry",
            LayoutKind::Polaroid => "polaroid",
            LayoutKind::Film => "film",
            LayoutKind::Circle => "circle",
            LayoutKind::Honeycomb => "honeycomb",
            LayoutKind::Strips => "strips",
            LayoutKind::Focus => "focus",
            LayoutKind::Heart => "heart",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(LayoutKind::Grid),
            "masonry" => Ok(LayoutKind::Masonry),
            "polaroid" => Ok(LayoutKind::Polaroid),
            "film" => Ok(LayoutKind::Film),
            "circle" => Ok(LayoutKind::Circle),
            "honeycomb" => Ok(LayoutKind::Honeycomb),
            "strips" => Ok(LayoutKind::Strips),
            "focus" => Ok(LayoutKind::Focus),
            "heart" => Ok(LayoutKind::Heart),
            other => Err(format!(
                "Unknown layout: {other}. Use: grid, masonry, polaroid, film, circle, honeycomb, strips, focus, heart"
            )),
        }
    }
}

/// An opaque RGB color, serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    /// Parse a `#rrggbb` hex string.
    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid color: {s}. Expected #rrggbb"));
        }
        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|e| e.to_string())?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|e| e.to_string())?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|e| e.to_string())?;
        Ok(Self { r, g, b })
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse_hex(s)
    }
}

/// Immutable input to a single collage run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Which arrangement algorithm to use.
    pub layout: LayoutKind,

    /// Canvas background color, flood-filled before any image is drawn.
    pub background: Color,

    /// Inter-image gutter in logical pixels, clamped to `[0, 100]`.
    pub spacing: u32,
}

impl LayoutConfig {
    pub fn new(layout: LayoutKind, background: Color, spacing: u32) -> Self {
        Self {
            layout,
            background,
            spacing: spacing.min(100),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layout: LayoutKind::Grid,
            background: Color::WHITE,
            spacing: 10,
        }
    }
}

/// Input to a single timelapse run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelapseConfig {
    /// Which plant's photo timeline to render.
    pub plant_id: String,

    /// Seconds each photo stays on screen, clamped to `[0.1, 3.0]`.
    pub seconds_per_photo: f64,
}

impl TimelapseConfig {
    pub fn new(plant_id: impl Into<String>, seconds_per_photo: f64) -> Self {
        Self {
            plant_id: plant_id.into(),
            seconds_per_photo: seconds_per_photo.clamp(0.1, 3.0),
        }
    }
}
