//! Kroki-backed diagram embedding.
//!
//! Converts textual diagram descriptions (PlantUML, Mermaid, etc.) into
//! embeddable image markup for a document-rendering pipeline. The diagram
//! source is encoded into a Kroki GET URL (via the `kroki-url` crate), then
//! materialized per the configured [`LinkMode`]:
//!
//! - [`LinkMode::Inline`]: raw SVG with an injected class attribute
//! - [`LinkMode::InlineBase64`]: `<img>` with a base64 `data:` URI
//! - [`LinkMode::InlineUrlEncode`]: `<img>` with a percent-encoded `data:` URI
//! - [`LinkMode::LocalLink`]: `<img>` linking to a content-addressed file
//!   cached under the site's public directory
//! - [`LinkMode::ExternalLink`]: `<img>` linking straight to the service URL,
//!   with no network access
//!
//! # Example
//!
//! ```no_run
//! use kroki_embed::{LinkMode, RenderConfig, Renderer};
//!
//! let renderer = Renderer::new();
//! let config = RenderConfig {
//!     link: LinkMode::ExternalLink,
//!     ..RenderConfig::default()
//! };
//! let markup = renderer.render(&config, "plantuml", "@startuml\nA->B\n@enduml")?;
//! assert!(markup.starts_with("<img"));
//! # Ok::<(), kroki_embed::RenderError>(())
//! ```

mod cache;
mod config;
mod consts;
mod insert;
mod render;

pub use cache::{cache_file_name, content_hash};
pub use config::{ConfigError, InsertDirective, LinkMode, OutputFormat, RenderConfig};
pub use insert::insert_after_line;
pub use render::{RenderError, Renderer};
