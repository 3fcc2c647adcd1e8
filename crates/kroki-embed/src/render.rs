//! Rendering resolver: turn diagram source into embeddable markup.
//!
//! A render call applies the configured preamble insertion, builds the
//! request URL via `kroki-url`, then materializes the result per the
//! configured [`LinkMode`]: fetch-and-inline (three flavors), fetch-and-cache
//! to a local file, or a bare external link with no network access at all.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use ureq::Agent;

use crate::cache::cache_file_name;
use crate::config::{LinkMode, RenderConfig};
use crate::consts::{CACHE_SUBDIR, DEFAULT_TIMEOUT};
use crate::insert::insert_after_line;

/// Root `<svg>` opening tag, for class attribute injection.
static SVG_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<svg([^>]*)>").unwrap());

/// Characters escaped in percent-encoded `data:` URIs.
///
/// Everything except alphanumerics and `-_.!~*()` is escaped. The single
/// quote is escaped too (unlike JavaScript's `encodeURIComponent`) because
/// the generated `src` attribute is single-quoted.
const DATA_URI_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Rendering error.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The rendering service answered with a non-2xx status.
    #[error("HTTP {status} from rendering service: {body}")]
    Http {
        /// Response status code.
        status: u16,
        /// Response body, best-effort decoded for diagnostics.
        body: String,
    },
    /// Transport-level failure (DNS, connection refused, timeout).
    #[error("transport error: {0}")]
    Transport(String),
    /// Filesystem failure while caching.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A text link mode received a body that is not UTF-8.
    #[error("response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Diagram renderer with a pooled HTTP agent.
///
/// The agent is reused across render calls for connection pooling. The
/// renderer itself holds no per-call state; configuration is passed to each
/// [`render`](Self::render) call and may differ between calls.
///
/// # Example
///
/// ```no_run
/// use kroki_embed::{RenderConfig, Renderer};
///
/// let renderer = Renderer::new();
/// let config = RenderConfig::default();
/// let markup = renderer.render(&config, "plantuml", "@startuml\nA->B\n@enduml")?;
/// # Ok::<(), kroki_embed::RenderError>(())
/// ```
pub struct Renderer {
    agent: Agent,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer with the default request timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a renderer with a custom request timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }

    /// Render a diagram into embeddable markup.
    ///
    /// Applies the configured preamble insertion, builds the request URL, and
    /// dispatches on the configured link mode. [`LinkMode::ExternalLink`]
    /// returns without any network access; the other modes fetch the rendered
    /// image from the configured server. [`LinkMode::LocalLink`] additionally
    /// writes the image under
    /// `<public_dir>/<asset_path>/puml/<sha256>.<format>` and skips the fetch
    /// entirely when that file already exists.
    pub fn render(
        &self,
        config: &RenderConfig,
        diagram_type: &str,
        content: &str,
    ) -> Result<String, RenderError> {
        let source: Cow<'_, str> = if config.insert.content.is_empty() {
            Cow::Borrowed(content)
        } else {
            Cow::Owned(insert_after_line(
                content,
                config.insert.after_line,
                &config.insert.content,
            ))
        };

        let url = kroki_url::encode_diagram_url(
            &config.server,
            diagram_type,
            &source,
            config.output_format.as_str(),
        );

        match config.link {
            LinkMode::ExternalLink => Ok(format!(
                r#"<img class="{}" src="{url}" />"#,
                config.class_name
            )),
            LinkMode::Inline => {
                let body = String::from_utf8(self.fetch(&url)?)?;
                Ok(inject_svg_class(&body, &config.class_name))
            }
            LinkMode::InlineBase64 => {
                let body = self.fetch(&url)?;
                Ok(format!(
                    "<img class=\"{}\" src='data:{};base64,{}'>",
                    config.class_name,
                    config.output_format.media_type(),
                    BASE64_STANDARD.encode(&body)
                ))
            }
            LinkMode::InlineUrlEncode => {
                let body = String::from_utf8(self.fetch(&url)?)?;
                Ok(format!(
                    "<img class=\"{}\" src='data:{};utf8,{}'>",
                    config.class_name,
                    config.output_format.media_type(),
                    utf8_percent_encode(&body, DATA_URI_SET)
                ))
            }
            LinkMode::LocalLink => self.render_local(config, &source, &url),
        }
    }

    /// Fetch, cache to disk, and return markup linking to the cached file.
    fn render_local(
        &self,
        config: &RenderConfig,
        source: &str,
        url: &str,
    ) -> Result<String, RenderError> {
        let filename = cache_file_name(source, config.output_format);
        let dir = Path::new(&config.public_dir)
            .join(&config.asset_path)
            .join(CACHE_SUBDIR);
        let file_path = dir.join(&filename);

        if file_path.exists() {
            tracing::debug!(path = %file_path.display(), "cache hit, skipping fetch");
        } else {
            let body = self.fetch(url)?;
            fs::create_dir_all(&dir)?;
            fs::write(&file_path, body)?;
            tracing::debug!(path = %file_path.display(), "cached rendered diagram");
        }

        // Site-root-relative src: the public_dir prefix is stripped
        Ok(format!(
            r#"<img class="{}" src="/{}/{CACHE_SUBDIR}/{filename}"/>"#,
            config.class_name,
            config.asset_path.trim_matches('/'),
        ))
    }

    /// GET the rendered image, buffering the full body.
    ///
    /// Non-2xx responses surface as [`RenderError::Http`] with the body
    /// decoded best-effort for diagnostics.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, RenderError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| RenderError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if !(200..300).contains(&status) {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(RenderError::Http {
                status,
                body: error_body,
            });
        }

        body.read_to_vec()
            .map_err(|e| RenderError::Transport(e.to_string()))
    }
}

/// Inject a `class` attribute into the root `<svg>` tag.
///
/// Only the first opening tag is touched; nested `<svg>` elements are left
/// alone.
fn inject_svg_class(svg: &str, class_name: &str) -> String {
    SVG_OPEN_RE
        .replace(svg, |caps: &regex::Captures| {
            format!(r#"<svg{} class="{class_name}">"#, &caps[1])
        })
        .into_owned()
}
