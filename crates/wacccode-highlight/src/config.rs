//! Highlighter configuration.
//!
//! All types implement [`serde::Deserialize`] and are usually loaded from a TOML file. Every
//! field has a default, so an empty file yields [`HighlightConfig::default`].
//!
//! ```toml
//! quiet_interval_ms = 750
//! comment_marker = "#"
//!
//! [theme]
//! keyword = "#39aca6"
//!
//! [marker]
//! distance_from_char = 20
//! ```
//!
//! # Example
//!
//! ```
//! # use wacccode_highlight::config::HighlightConfig;
//! let config = HighlightConfig::from_toml_str("quiet_interval_ms = 250").unwrap();
//! assert_eq!(config.quiet_interval().as_millis(), 250);
//! assert_eq!(config.comment_marker(), "#");
//! ```

use crate::scheduler::DEFAULT_QUIET_INTERVAL;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use wacccode_core::VisualClass;
use wacccode_lang::CommentConfig;

/// Errors raised while loading a [`HighlightConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML was malformed or had the wrong shape.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A theme entry is not a `#rrggbb` colour.
    #[error("invalid colour for `{key}`: {value:?}")]
    InvalidColor {
        /// Theme key.
        key: &'static str,
        /// Offending value.
        value: String,
    },

    /// A zero quiet interval would run a pass on every keystroke.
    #[error("quiet_interval_ms must be greater than zero")]
    ZeroQuietInterval,
}

/// A string that is not a `#rrggbb` colour.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected `#rrggbb`, got {0:?}")]
pub struct InvalidRgb(pub String);

/// A 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl FromStr for Rgb {
    type Err = InvalidRgb;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidRgb(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Colours for each visual class, as `#rrggbb` strings.
///
/// The pipeline only tags spans with a [`VisualClass`]; turning classes into colours is left to
/// the host that draws the buffer. Loading a config validates every entry, so the host can call
/// [`Theme::color`] without handling bad input at draw time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Theme {
    background: String,
    main_text: String,
    keyword: String,
    #[serde(rename = "type")]
    type_name: String,
    declaration: String,
    operator: String,
    string: String,
    int: String,
    comment: String,
    function: String,
    attribute: String,
    error: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#202746".to_string(),
            main_text: "#dfe2f1".to_string(),
            keyword: "#39aca6".to_string(),
            type_name: "#ac9739".to_string(),
            declaration: "#3d8fd1".to_string(),
            operator: "#979db4".to_string(),
            string: "#22a2c9".to_string(),
            int: "#c94922".to_string(),
            comment: "#5e6687".to_string(),
            function: "#c76b29".to_string(),
            attribute: "#c08b30".to_string(),
            error: "#9c637a".to_string(),
        }
    }
}

impl Theme {
    fn entry(&self, class: VisualClass) -> (&'static str, &str) {
        let value = match class {
            VisualClass::Keyword => &self.keyword,
            VisualClass::Type => &self.type_name,
            VisualClass::Declaration => &self.declaration,
            VisualClass::Operator => &self.operator,
            VisualClass::String => &self.string,
            VisualClass::Int => &self.int,
            VisualClass::Comment => &self.comment,
            VisualClass::Function => &self.function,
            VisualClass::Attribute => &self.attribute,
            VisualClass::MainText => &self.main_text,
            VisualClass::Error => &self.error,
        };
        (class.tag_name(), value)
    }

    /// The colour for `class`.
    pub fn color(&self, class: VisualClass) -> Result<Rgb, ConfigError> {
        let (key, value) = self.entry(class);
        parse_color(key, value)
    }

    /// The editor background colour.
    pub fn background(&self) -> Result<Rgb, ConfigError> {
        parse_color("background", &self.background)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.background()?;
        for class in VisualClass::ALL {
            self.color(class)?;
        }
        Ok(())
    }
}

fn parse_color(key: &'static str, value: &str) -> Result<Rgb, ConfigError> {
    value.parse().map_err(|_: InvalidRgb| ConfigError::InvalidColor {
        key,
        value: value.to_string(),
    })
}

/// Pixel offsets used to place inline error markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarkerGeometry {
    /// Vertical distance between the anchor char and the marker.
    pub distance_from_char: i32,
    /// Horizontal offset of the hover label from the marker.
    pub hover_label_offset: i32,
    /// Horizontal marker padding.
    pub padding_x: i32,
    /// Vertical marker padding.
    pub padding_y: i32,
}

impl Default for MarkerGeometry {
    fn default() -> Self {
        Self {
            distance_from_char: 20,
            hover_label_offset: 36,
            padding_x: 5,
            padding_y: 5,
        }
    }
}

/// Top-level highlighter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    quiet_interval_ms: u64,
    comment_marker: String,
    tab_width: usize,
    theme: Theme,
    marker: MarkerGeometry,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            quiet_interval_ms: DEFAULT_QUIET_INTERVAL.as_millis() as u64,
            comment_marker: "#".to_string(),
            tab_width: 2,
            theme: Theme::default(),
            marker: MarkerGeometry::default(),
        }
    }
}

impl HighlightConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check every value that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiet_interval_ms == 0 {
            return Err(ConfigError::ZeroQuietInterval);
        }
        self.theme.validate()
    }

    /// Override the quiet interval (millisecond precision).
    pub fn with_quiet_interval(mut self, interval: Duration) -> Self {
        self.quiet_interval_ms = interval.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Override the comment marker.
    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = marker.into();
        self
    }

    /// Debounce quiet interval.
    pub fn quiet_interval(&self) -> Duration {
        Duration::from_millis(self.quiet_interval_ms)
    }

    /// Line comment marker; empty disables comment painting.
    pub fn comment_marker(&self) -> &str {
        &self.comment_marker
    }

    /// Comment configuration for the painter.
    pub fn comments(&self) -> CommentConfig {
        CommentConfig::line(self.comment_marker.clone())
    }

    /// Tab width in cells.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Colour theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Marker placement offsets.
    pub fn marker_geometry(&self) -> MarkerGeometry {
        self.marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(
            HighlightConfig::from_toml_str("").unwrap(),
            HighlightConfig::default()
        );
    }

    #[test]
    fn test_partial_sections() {
        let config = HighlightConfig::from_toml_str(
            r##"
            quiet_interval_ms = 300
            tab_width = 4

            [theme]
            type = "#ffffff"

            [marker]
            padding_x = 2
            "##,
        )
        .unwrap();

        assert_eq!(config.quiet_interval(), Duration::from_millis(300));
        assert_eq!(config.tab_width(), 4);
        assert_eq!(
            config.theme().color(VisualClass::Type).unwrap(),
            Rgb {
                r: 255,
                g: 255,
                b: 255
            }
        );
        assert_eq!(
            config.theme().color(VisualClass::Keyword).unwrap().to_string(),
            "#39aca6"
        );
        assert_eq!(config.marker_geometry().padding_x, 2);
        assert_eq!(config.marker_geometry().distance_from_char, 20);
    }

    #[test]
    fn test_invalid_colour_rejected() {
        let err = HighlightConfig::from_toml_str("[theme]\ncomment = \"grey\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidColor { key: "comment", .. }
        ));
    }

    #[test]
    fn test_rgb_parse_errors_carry_input() {
        let rgb = "#0a0B0c".parse::<Rgb>().unwrap();
        assert_eq!((rgb.r, rgb.g, rgb.b), (10, 11, 12));
        for bad in ["0a0b0c", "#0a0b0", "#0a0b0g", "#0a0b0c0"] {
            let err = bad.parse::<Rgb>().unwrap_err();
            assert_eq!(err, InvalidRgb(bad.to_string()));
            assert_eq!(err.to_string(), format!("expected `#rrggbb`, got {bad:?}"));
        }
    }

    #[test]
    fn test_zero_quiet_interval_rejected() {
        let err = HighlightConfig::from_toml_str("quiet_interval_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroQuietInterval));
    }

    #[test]
    fn test_wrong_type_is_toml_error() {
        let err = HighlightConfig::from_toml_str("tab_width = \"two\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
