//! Internal constants for diagram embedding.

use std::time::Duration;

/// Default Kroki server URL.
pub const DEFAULT_SERVER: &str = "https://kroki.io";

/// Default CSS class injected into generated markup.
pub const DEFAULT_CLASS_NAME: &str = "kroki";

/// Default site output directory for cached diagram files.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Default asset sub-path (relative to the public directory).
///
/// The spelling is historical and kept for compatibility with sites already
/// serving diagrams from this path.
pub const DEFAULT_ASSET_PATH: &str = "assert";

/// Fixed cache subdirectory under the asset path.
///
/// Always `puml` regardless of diagram type; the on-disk layout is part of
/// the external contract.
pub const CACHE_SUBDIR: &str = "puml";

/// Default HTTP timeout for rendering requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
