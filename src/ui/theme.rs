//! Theme system for the gallery
//!
//! Provides:
//! - Theme struct with all UI colors
//! - Built-in presets (darkwall, catppuccin, nord, gruvbox)
//! - CSS color parsing for poem card backgrounds (hex and named colors)
//! - Readable text color selection for arbitrary card backgrounds

use ratatui::style::Color;
use thiserror::Error;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Main background color
    pub background: Color,
    /// Primary text color
    pub foreground: Color,
    /// Card background when the poem's color can't be parsed
    pub card_background: Color,
    /// Accent color (borders, headings)
    pub accent: Color,
    /// Border of the selected card
    pub selection_border: Color,
    /// Dimmed text (hints, secondary info)
    pub dimmed: Color,
    /// More dimmed text (status bar)
    pub dimmed_alt: Color,
    /// Error panel color
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::darkwall()
    }
}

impl Theme {
    /// Darkwall theme - default
    pub fn darkwall() -> Self {
        Self {
            background: Color::Rgb(13, 17, 22),       // #0d1116
            foreground: Color::Rgb(229, 234, 241),    // #e5eaf1
            card_background: Color::Rgb(20, 28, 42),  // #141c2a
            accent: Color::Rgb(189, 146, 252),        // #bd92fc
            selection_border: Color::Rgb(180, 83, 9), // #b45309 (amber)
            dimmed: Color::Rgb(156, 163, 175),        // #9ca3af
            dimmed_alt: Color::Rgb(107, 114, 128),    // #6b7280
            error: Color::Rgb(239, 68, 68),           // #ef4444
        }
    }

    /// Catppuccin Mocha theme
    pub fn catppuccin_mocha() -> Self {
        Self {
            background: Color::Rgb(30, 30, 46),          // #1e1e2e (base)
            foreground: Color::Rgb(205, 214, 244),       // #cdd6f4 (text)
            card_background: Color::Rgb(49, 50, 68),     // #313244 (surface0)
            accent: Color::Rgb(203, 166, 247),           // #cba6f7 (mauve)
            selection_border: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
            dimmed: Color::Rgb(166, 173, 200),           // #a6adc8 (subtext0)
            dimmed_alt: Color::Rgb(147, 153, 178),       // #9399b2 (overlay2)
            error: Color::Rgb(243, 139, 168),            // #f38ba8 (red)
        }
    }

    /// Catppuccin Latte theme (light)
    pub fn catppuccin_latte() -> Self {
        Self {
            background: Color::Rgb(239, 241, 245),      // #eff1f5 (base)
            foreground: Color::Rgb(76, 79, 105),        // #4c4f69 (text)
            card_background: Color::Rgb(204, 208, 218), // #ccd0da (surface0)
            accent: Color::Rgb(136, 57, 239),           // #8839ef (mauve)
            selection_border: Color::Rgb(223, 142, 29), // #df8e1d (yellow)
            dimmed: Color::Rgb(108, 111, 133),          // #6c6f85 (subtext0)
            dimmed_alt: Color::Rgb(140, 143, 161),      // #8c8fa1 (overlay2)
            error: Color::Rgb(210, 15, 57),             // #d20f39 (red)
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),          // #2e3440 (nord0)
            foreground: Color::Rgb(236, 239, 244),       // #eceff4 (nord6)
            card_background: Color::Rgb(67, 76, 94),     // #434c5e (nord2)
            accent: Color::Rgb(180, 142, 173),           // #b48ead (nord15)
            selection_border: Color::Rgb(235, 203, 139), // #ebcb8b (nord13)
            dimmed: Color::Rgb(216, 222, 233),           // #d8dee9 (nord4)
            dimmed_alt: Color::Rgb(76, 86, 106),         // #4c566a (nord3)
            error: Color::Rgb(191, 97, 106),             // #bf616a (nord11)
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            background: Color::Rgb(40, 40, 40),         // #282828 (bg)
            foreground: Color::Rgb(235, 219, 178),      // #ebdbb2 (fg)
            card_background: Color::Rgb(60, 56, 54),    // #3c3836 (bg1)
            accent: Color::Rgb(211, 134, 155),          // #d3869b (purple)
            selection_border: Color::Rgb(250, 189, 47), // #fabd2f (bright yellow)
            dimmed: Color::Rgb(168, 153, 132),          // #a89984 (gray)
            dimmed_alt: Color::Rgb(146, 131, 116),      // #928374 (gray)
            error: Color::Rgb(204, 36, 29),             // #cc241d (red)
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "darkwall" | "default" => Some(Self::darkwall()),
            "catppuccin-mocha" | "catppuccin_mocha" | "catppuccin" => Some(Self::catppuccin_mocha()),
            "catppuccin-latte" | "catppuccin_latte" => Some(Self::catppuccin_latte()),
            "nord" => Some(Self::nord()),
            "gruvbox" | "gruvbox-dark" | "gruvbox_dark" => Some(Self::gruvbox()),
            _ => None,
        }
    }

    /// Background for a poem card, from the poem's CSS color
    pub fn card_color(&self, css: &str) -> Color {
        parse_css_color(css).unwrap_or(self.card_background)
    }
}

/// CSS named colors accepted on cards
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("silver", (192, 192, 192)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("white", (255, 255, 255)),
    ("maroon", (128, 0, 0)),
    ("red", (255, 0, 0)),
    ("purple", (128, 0, 128)),
    ("fuchsia", (255, 0, 255)),
    ("magenta", (255, 0, 255)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("olive", (128, 128, 0)),
    ("yellow", (255, 255, 0)),
    ("navy", (0, 0, 128)),
    ("blue", (0, 0, 255)),
    ("teal", (0, 128, 128)),
    ("aqua", (0, 255, 255)),
    ("cyan", (0, 255, 255)),
    ("orange", (255, 165, 0)),
    ("pink", (255, 192, 203)),
    ("brown", (165, 42, 42)),
    ("gold", (255, 215, 0)),
    ("indigo", (75, 0, 130)),
    ("violet", (238, 130, 238)),
    ("coral", (255, 127, 80)),
    ("salmon", (250, 128, 114)),
    ("crimson", (220, 20, 60)),
    ("lavender", (230, 230, 250)),
    ("turquoise", (64, 224, 208)),
    ("rebeccapurple", (102, 51, 153)),
];

/// Parse a CSS color: `#rgb`, `#rrggbb`, `#rrggbbaa` or a named color
pub fn parse_css_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim();
    if s.starts_with('#') {
        return parse_hex_color(s);
    }
    let name = s.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, (r, g, b))| Color::Rgb(r, g, b))
        .ok_or_else(|| ColorError::UnknownName(s.to_string()))
}

/// Parse hex color string to Color
/// Supports: #rrggbb, #rgb, #rrggbbaa, with or without '#'
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return Err(ColorError::InvalidHex);
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).map_err(|_| ColorError::InvalidHex)
    };

    match s.len() {
        // #rgb -> #rrggbb
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        // #rrggbb, #rrggbbaa (alpha ignored)
        6 | 8 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        _ => Err(ColorError::InvalidLength),
    }
}

/// Black or white, whichever reads better on `bg`
pub fn readable_on(bg: Color) -> Color {
    match bg {
        Color::Rgb(r, g, b) => {
            // Rec. 601 luma
            let luma = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
            if luma > 150_000 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => Color::White,
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3, 6, or 8 hex chars)")]
    InvalidLength,
    #[error("invalid hex character")]
    InvalidHex,
    #[error("unknown color name '{0}'")]
    UnknownName(String),
}
