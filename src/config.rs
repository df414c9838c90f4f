use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::palette::Palette;
use crate::ui::theme::Theme;

/// Endpoint used by the original gallery when no URL is configured
pub const DEFAULT_POEMS_URL: &str = "http://localhost:8000/api/poems";
/// API base used by the evolved gallery when no URL is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
/// Path the evolved gallery appends to the API base
pub const PUBLIC_POEMS_PATH: &str = "/poems/public";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub gallery: GalleryConfig,
    pub appearance: AppearanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Full poems URL (original) or API base (evolved). Unset uses the built-in default.
    pub url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Which version of the gallery to behave like
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// 4-color palette, 2 sample poems, error panel hides the cards
    Original,
    /// 6-color palette, 3 sample poems, error banner above the cards
    #[default]
    Evolved,
}

impl Variant {
    /// Whether fallback cards are drawn under the error banner
    pub fn shows_cards_on_error(&self) -> bool {
        matches!(self, Variant::Evolved)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub variant: Variant,
    /// Custom color-cycle palette. Empty uses the variant's palette.
    pub palette: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Theme preset name
    pub theme: String,
    /// Lines drawn above the gallery
    pub headings: Vec<String>,
    /// Language of control labels
    pub locale: Locale,
    /// Upper bound on card columns
    pub max_columns: u16,
    /// Narrowest a card may get before dropping a column
    pub min_card_width: u16,
}

/// Control label language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

/// User-visible control labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub loading: &'static str,
    pub error: &'static str,
    pub retry: &'static str,
    pub change_color: &'static str,
    pub empty: &'static str,
    pub quit: &'static str,
}

const LABELS_ES: Labels = Labels {
    loading: "Cargando poemas...",
    error: "Error",
    retry: "Reintentar",
    change_color: "Cambiar Color",
    empty: "No hay poemas todavía",
    quit: "salir",
};

const LABELS_EN: Labels = Labels {
    loading: "Loading poems...",
    error: "Error",
    retry: "Retry",
    change_color: "Change Color",
    empty: "No poems yet",
    quit: "quit",
};

impl Locale {
    pub fn labels(&self) -> &'static Labels {
        match self {
            Locale::Es => &LABELS_ES,
            Locale::En => &LABELS_EN,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 10,
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "darkwall".to_string(),
            headings: vec![
                "Bienvenidos".to_string(),
                "Mis pobres versos y yo(rapsodaz)".to_string(),
            ],
            locale: Locale::default(),
            max_columns: 3,
            min_card_width: 32,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            Self::parse(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than zero");
        }
        Ok(config)
    }

    /// Resolve the poems endpoint for the configured variant.
    ///
    /// An empty URL counts as unset for the original gallery. The evolved
    /// gallery appends its path to whatever base is configured, so a
    /// set-but-empty base is used as-is and produces a bad URL rather than
    /// falling back to the default.
    pub fn endpoint(&self) -> String {
        match self.gallery.variant {
            Variant::Original => self
                .api
                .url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_POEMS_URL.to_string()),
            Variant::Evolved => {
                let base = self.api.url.as_deref().unwrap_or(DEFAULT_API_BASE);
                format!("{}{}", base, PUBLIC_POEMS_PATH)
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Color-cycle palette: configured colors, else the variant's built-in set
    pub fn palette(&self) -> Palette {
        Palette::new(self.gallery.palette.iter().cloned())
            .unwrap_or_else(|| Palette::for_variant(self.gallery.variant))
    }

    pub fn labels(&self) -> &'static Labels {
        self.appearance.locale.labels()
    }

    /// Resolve the theme preset, falling back to the default theme
    pub fn resolve_theme(&self) -> Theme {
        Theme::from_preset(&self.appearance.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme '{}', using default", self.appearance.theme);
            Theme::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.gallery.variant, Variant::Evolved);
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.appearance.headings.len(), 2);
        assert_eq!(config.palette().len(), 6);
    }

    #[test]
    fn test_endpoint_original_default() {
        let mut config = Config::default();
        config.gallery.variant = Variant::Original;
        assert_eq!(config.endpoint(), "http://localhost:8000/api/poems");
    }

    #[test]
    fn test_endpoint_original_configured() {
        let mut config = Config::default();
        config.gallery.variant = Variant::Original;
        config.api.url = Some("https://poemas.example/api/poems".to_string());
        assert_eq!(config.endpoint(), "https://poemas.example/api/poems");
    }

    #[test]
    fn test_endpoint_original_empty_url_uses_default() {
        let mut config = Config::default();
        config.gallery.variant = Variant::Original;
        config.api.url = Some(String::new());
        assert_eq!(config.endpoint(), DEFAULT_POEMS_URL);
    }

    #[test]
    fn test_endpoint_evolved_default() {
        let config = Config::default();
        assert_eq!(config.endpoint(), "http://localhost:8000/api/poems/public");
    }

    #[test]
    fn test_endpoint_evolved_configured_base() {
        let mut config = Config::default();
        config.api.url = Some("https://poemas.example/api".to_string());
        assert_eq!(config.endpoint(), "https://poemas.example/api/poems/public");
    }

    #[test]
    fn test_endpoint_evolved_empty_base_is_not_defaulted() {
        let mut config = Config::default();
        config.api.url = Some(String::new());
        assert_eq!(config.endpoint(), "/poems/public");
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse(
            r##"
            [gallery]
            variant = "original"
            palette = ["red", "#00ff00"]

            [appearance]
            locale = "en"
            "##,
        )
        .unwrap();
        assert_eq!(config.gallery.variant, Variant::Original);
        assert_eq!(config.palette().colors(), &["red", "#00ff00"]);
        assert_eq!(config.labels().retry, "Retry");
        // Untouched sections keep defaults
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.appearance.max_columns, 3);
    }

    #[test]
    fn test_parse_rejects_zero_timeout() {
        assert!(Config::parse("[api]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_variant() {
        assert!(Config::parse("[gallery]\nvariant = \"classic\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/poem-gallery/config.toml").unwrap();
        assert_eq!(config.gallery.variant, Variant::Evolved);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("poem-gallery-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[api]\nurl = \"http://127.0.0.1:9000/api\"\n").unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.endpoint(), "http://127.0.0.1:9000/api/poems/public");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let mut config = Config::default();
        config.appearance.theme = "solarized-neon".to_string();
        let theme = config.resolve_theme();
        assert_eq!(theme.background, Theme::default().background);
    }
}
