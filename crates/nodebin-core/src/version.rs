//! Version-text parsing and binary-name shape checks.
//!
//! Node prints `v<major>.<minor>.<patch>` for `--version`. Only the major
//! component matters for gating, so anything after the first dot (minor,
//! patch, pre-release tags such as `-nightly`) is ignored.

use regex::Regex;
use std::sync::LazyLock;

/// The literal executable name of the Node.js runtime.
pub const CANONICAL_BINARY_NAME: &str = "node";

/// Oldest major version that speaks the debugging protocol features we rely on.
pub const MIN_SUPPORTED_MAJOR: u32 = 8;

static VERSION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v(\d+)\.").expect("static regex is valid"));

static CANONICAL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^node(64)?(\.exe|\.cmd)?$").expect("static regex is valid"));

/// Extract the major version from raw `--version` output.
///
/// Matching happens against the untrimmed text, so a trailing newline is
/// irrelevant but leading whitespace is not accepted. Returns `None` when
/// the text does not start with `v<digits>.` or the digits overflow `u32`.
pub fn parse_major_version(raw: &str) -> Option<u32> {
    VERSION_PREFIX
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Whether a file name looks like the Node binary itself rather than a shim.
///
/// Accepts `node`, `node64`, and either with an `.exe` or `.cmd` suffix.
/// The stem is case-sensitive on every platform.
pub fn is_canonical_binary_name(file_name: &str) -> bool {
    CANONICAL_NAME.is_match(file_name)
}
