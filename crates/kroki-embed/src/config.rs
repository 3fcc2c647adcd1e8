//! Render configuration.
//!
//! [`RenderConfig`] is a value object: constructed once with defaults, then
//! cloned and overridden field-by-field per render call. It can also be
//! loaded from a TOML file, with validation of the server URL.
//!
//! Link mode and output format are closed enums; an unknown string in a
//! config file is rejected at parse time rather than falling through to
//! undefined behavior at render time.

use std::path::Path;

use serde::Deserialize;

use crate::consts::{
    DEFAULT_ASSET_PATH, DEFAULT_CLASS_NAME, DEFAULT_PUBLIC_DIR, DEFAULT_SERVER,
};

/// How the rendered image is delivered in the generated markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkMode {
    /// Fetch and return the raw SVG markup with the class attribute injected.
    Inline,
    /// Fetch and embed the image as a base64 `data:` URI (default).
    #[default]
    InlineBase64,
    /// Fetch and embed the image as a percent-encoded `data:` URI.
    ///
    /// Only sensible for SVG output; a PNG body is not valid UTF-8 and the
    /// render call reports it as such.
    InlineUrlEncode,
    /// Fetch, cache to a file under the public directory, and link to it.
    LocalLink,
    /// No fetch: link directly to the rendering service URL.
    ExternalLink,
}

impl LinkMode {
    /// Parse a link mode from its wire spelling (e.g. `"inlineBase64"`).
    ///
    /// Returns `None` for unknown modes.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "inline" => Some(Self::Inline),
            "inlineBase64" => Some(Self::InlineBase64),
            "inlineUrlEncode" => Some(Self::InlineUrlEncode),
            "localLink" => Some(Self::LocalLink),
            "externalLink" => Some(Self::ExternalLink),
            _ => None,
        }
    }

    /// Wire spelling of this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::InlineBase64 => "inlineBase64",
            Self::InlineUrlEncode => "inlineUrlEncode",
            Self::LocalLink => "localLink",
            Self::ExternalLink => "externalLink",
        }
    }
}

/// Output format requested from the rendering service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// SVG (default, text body).
    #[default]
    Svg,
    /// PNG (binary body).
    Png,
}

impl OutputFormat {
    /// Parse a format from its string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Format as URL path segment and file extension.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    /// Media type for `data:` URIs of this format.
    #[must_use]
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
        }
    }
}

/// Text to splice into the diagram source before encoding.
///
/// Used to inject a fixed preamble, e.g. a `!theme sketchy-outline` directive
/// after the opening line of a PlantUML diagram. An empty `content` disables
/// insertion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InsertDirective {
    /// Zero-based line the insertion goes after (0 = before everything).
    pub after_line: usize,
    /// The line to insert; empty means no insertion.
    pub content: String,
}

/// Configuration for a render call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Rendering service base URL.
    pub server: String,
    /// How the rendered image is delivered.
    pub link: LinkMode,
    /// Output format requested from the service.
    pub output_format: OutputFormat,
    /// Preamble insertion applied to the source before encoding.
    pub insert: InsertDirective,
    /// CSS class for the generated markup.
    pub class_name: String,
    /// Site output directory; stripped from cached file paths in markup.
    pub public_dir: String,
    /// Asset sub-path relative to `public_dir`.
    pub asset_path: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_owned(),
            link: LinkMode::default(),
            output_format: OutputFormat::default(),
            insert: InsertDirective::default(),
            class_name: DEFAULT_CLASS_NAME.to_owned(),
            public_dir: DEFAULT_PUBLIC_DIR.to_owned(),
            asset_path: DEFAULT_ASSET_PATH.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error (includes unknown link modes and formats).
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Semantic validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl RenderConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that the server URL is non-empty and uses an http(s) scheme.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.is_empty() {
            return Err(ConfigError::Validation("server cannot be empty".to_owned()));
        }
        if !self.server.starts_with("http://") && !self.server.starts_with("https://") {
            return Err(ConfigError::Validation(
                "server must start with http:// or https://".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.server, "https://kroki.io");
        assert_eq!(config.link, LinkMode::InlineBase64);
        assert_eq!(config.output_format, OutputFormat::Svg);
        assert_eq!(config.class_name, "kroki");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.asset_path, "assert");
        assert_eq!(config.insert.after_line, 0);
        assert!(config.insert.content.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
server = "http://localhost:8000"
link = "localLink"
output_format = "png"
class_name = "diagram"
public_dir = "site"
asset_path = "images"

[insert]
after_line = 0
content = "!theme sketchy-outline"
"#;
        let config: RenderConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server, "http://localhost:8000");
        assert_eq!(config.link, LinkMode::LocalLink);
        assert_eq!(config.output_format, OutputFormat::Png);
        assert_eq!(config.class_name, "diagram");
        assert_eq!(config.public_dir, "site");
        assert_eq!(config.asset_path, "images");
        assert_eq!(config.insert.content, "!theme sketchy-outline");
    }

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let config: RenderConfig = toml::from_str("").unwrap();
        assert_eq!(config.server, "https://kroki.io");
        assert_eq!(config.link, LinkMode::InlineBase64);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kroki.toml");
        std::fs::write(&path, "link = \"externalLink\"\nclass_name = \"uml\"\n").unwrap();

        let config = RenderConfig::load(&path).unwrap();
        assert_eq!(config.link, LinkMode::ExternalLink);
        assert_eq!(config.class_name, "uml");
        assert_eq!(config.server, "https://kroki.io");
    }

    #[test]
    fn test_load_rejects_invalid_server() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kroki.toml");
        std::fs::write(&path, "server = \"kroki.io\"\n").unwrap();

        let err = RenderConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = RenderConfig::load(Path::new("/nonexistent/kroki.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_unknown_link_mode_rejected_at_parse() {
        let result: Result<RenderConfig, _> = toml::from_str(r#"link = "tea""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_output_format_rejected_at_parse() {
        let result: Result<RenderConfig, _> = toml::from_str(r#"output_format = "jpeg""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_server() {
        let config = RenderConfig {
            server: String::new(),
            ..RenderConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_validate_non_http_server() {
        let config = RenderConfig {
            server: "ftp://kroki.io".to_owned(),
            ..RenderConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http"));
    }

    #[test]
    fn test_link_mode_wire_spellings_round_trip() {
        for mode in [
            LinkMode::Inline,
            LinkMode::InlineBase64,
            LinkMode::InlineUrlEncode,
            LinkMode::LocalLink,
            LinkMode::ExternalLink,
        ] {
            assert_eq!(LinkMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(LinkMode::parse("inlinebase64"), None);
        assert_eq!(LinkMode::parse(""), None);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("svg"), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::parse("png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::parse("jpeg"), None);
    }

    #[test]
    fn test_output_format_media_type() {
        assert_eq!(OutputFormat::Svg.media_type(), "image/svg+xml");
        assert_eq!(OutputFormat::Png.media_type(), "image/png");
    }

    #[test]
    fn test_per_call_override_leaves_defaults() {
        let config = RenderConfig {
            link: LinkMode::ExternalLink,
            ..RenderConfig::default()
        };
        assert_eq!(config.link, LinkMode::ExternalLink);
        assert_eq!(config.server, "https://kroki.io");
    }
}
