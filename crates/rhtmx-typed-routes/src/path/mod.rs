/// Path utilities for turning raw context keys into route keys
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

// Optional platform suffix followed by a script extension
static SUPPORTED_EXTENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\.(ios|android|web|native))?\.(tsx|ts|jsx|js|mjs|cjs)$").unwrap()
});

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use rhtmx_typed_routes::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/(app)/[id]"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("about")); // Missing leading /
/// assert!(!is_valid_path("/about/")); // Trailing /
/// assert!(!is_valid_path("/about//page")); // Double //
/// assert!(!is_valid_path("/about\\page")); // Backslash
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when input is already valid (zero allocations).
///
/// - Trailing slashes: `/path/` → `/path`
/// - Double slashes: `/path//to` → `/path/to`
/// - Backslashes: `\path\to` → `/path/to`
/// - Empty input: `` → `/`
///
/// # Examples
///
/// ```
/// use rhtmx_typed_routes::path::normalize_path;
/// use std::borrow::Cow;
///
/// let path = normalize_path("/about");
/// assert!(matches!(path, Cow::Borrowed("/about")));
///
/// assert_eq!(normalize_path("\\users\\[id]"), "/users/[id]");
/// assert_eq!(normalize_path("/path//to///page/"), "/path/to/page");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Strips a supported script extension, including a platform suffix
///
/// ```
/// use rhtmx_typed_routes::path::strip_supported_extension;
///
/// assert_eq!(strip_supported_extension("./about.tsx"), "./about");
/// assert_eq!(strip_supported_extension("./home.web.tsx"), "./home");
/// assert_eq!(strip_supported_extension("./styles.css"), "./styles.css");
/// ```
pub fn strip_supported_extension(key: &str) -> &str {
    match SUPPORTED_EXTENSION.find(key) {
        Some(m) => &key[..m.start()],
        None => key,
    }
}

/// Strips a trailing `index` segment (`./blog/index` → `./blog`)
///
/// Only a whole segment counts: `./myindex` is left alone.
pub fn strip_index_segment(key: &str) -> &str {
    if key == "index" {
        return "";
    }
    key.strip_suffix("/index").unwrap_or(key)
}

/// Converts a raw context key into a `/`-rooted route key
///
/// Backslash separators are converted first so Windows-style keys see the
/// same `/index` rule. The remaining steps run in a fixed order: strip
/// extension, strip trailing `/index`, strip one leading `.`, coerce empty
/// to `/`, ensure the leading `/`, then normalize slashes. Coercing before
/// the leading-slash check keeps the root from becoming `//`.
///
/// # Examples
///
/// ```
/// use rhtmx_typed_routes::path::normalize_context_key;
///
/// assert_eq!(normalize_context_key("./index.tsx"), "/");
/// assert_eq!(normalize_context_key("./blog/[slug].tsx"), "/blog/[slug]");
/// assert_eq!(normalize_context_key("./(app)/settings/index.tsx"), "/(app)/settings");
/// ```
pub fn normalize_context_key(context_key: &str) -> String {
    let forward: Cow<'_, str> = if context_key.contains('\\') {
        Cow::Owned(context_key.replace('\\', "/"))
    } else {
        Cow::Borrowed(context_key)
    };

    let key = strip_supported_extension(&forward);
    let key = strip_index_segment(key);
    let key = key.strip_prefix('.').unwrap_or(key);
    let key = if key.is_empty() { "/" } else { key };

    let rooted: Cow<'_, str> = if key.starts_with('/') {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(format!("/{}", key))
    };

    normalize_path(&rooted).into_owned()
}

/// Converts a logical route (as produced for generated nodes) into a route key
///
/// No extension stripping happens here; there is no real file behind it.
///
/// ```
/// use rhtmx_typed_routes::path::normalize_canonical_route;
///
/// assert_eq!(normalize_canonical_route(""), "/");
/// assert_eq!(normalize_canonical_route("+not-found"), "/+not-found");
/// ```
pub fn normalize_canonical_route(route: &str) -> String {
    let rooted: Cow<'_, str> = if route.starts_with('/') {
        Cow::Borrowed(route)
    } else {
        Cow::Owned(format!("/{}", route))
    };

    normalize_path(&rooted).into_owned()
}
