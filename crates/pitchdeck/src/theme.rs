use eframe::egui::Color32;
use std::fmt;
use std::str::FromStr;

/// Named color variables of the design system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteToken {
    Text,
    TextSecondary,
    Surface,
    Border,
    Primary,
    Secondary,
}

impl fmt::Display for PaletteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::TextSecondary => "text-secondary",
            Self::Surface => "surface",
            Self::Border => "border",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        };
        f.write_str(name)
    }
}

impl FromStr for PaletteToken {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "text" => Self::Text,
            "text-secondary" => Self::TextSecondary,
            "surface" => Self::Surface,
            "border" => Self::Border,
            "primary" => Self::Primary,
            "secondary" => Self::Secondary,
            _ => anyhow::bail!("Unknown palette token: {s}"),
        })
    }
}

/// Anything that can resolve palette tokens to colors at call time.
pub trait PaletteSource {
    fn read(&self, token: PaletteToken) -> Color32;
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub surface: Color32,
    pub border: Color32,
    pub primary: Color32,
    pub secondary: Color32,
    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub card_title_size: f32,
    pub small_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1F, 0x21, 0x21),
            text: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            text_secondary: Color32::from_rgb(0xA7, 0xA9, 0xA9),
            surface: Color32::from_rgb(0x26, 0x28, 0x28),
            border: Color32::from_rgb(0x4A, 0x4D, 0x4D),
            primary: Color32::from_rgb(0x32, 0xB8, 0xC6),
            secondary: Color32::from_rgb(0x3A, 0x3D, 0x3D),
            title_size: 72.0,
            heading_size: 52.0,
            body_size: 30.0,
            card_title_size: 28.0,
            small_size: 18.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xFC, 0xFC, 0xF9),
            text: Color32::from_rgb(0x13, 0x34, 0x3B),
            text_secondary: Color32::from_rgb(0x62, 0x6C, 0x71),
            surface: Color32::from_rgb(0xFF, 0xFF, 0xFD),
            border: Color32::from_rgb(0xC8, 0xCC, 0xCC),
            primary: Color32::from_rgb(0x21, 0x80, 0x8D),
            secondary: Color32::from_rgb(0xE6, 0xE8, 0xE4),
            title_size: 72.0,
            heading_size: 52.0,
            body_size: 30.0,
            card_title_size: 28.0,
            small_size: 18.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// Same color with a fixed alpha byte, e.g. `0x40` for chart grid lines.
    pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
    }
}

impl PaletteSource for Theme {
    fn read(&self, token: PaletteToken) -> Color32 {
        match token {
            PaletteToken::Text => self.text,
            PaletteToken::TextSecondary => self.text_secondary,
            PaletteToken::Surface => self.surface,
            PaletteToken::Border => self.border,
            PaletteToken::Primary => self.primary,
            PaletteToken::Secondary => self.secondary,
        }
    }
}
