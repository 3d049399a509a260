/// Segment classification for route keys
///
/// Pure functional parsing of a single path segment into a typed segment.
/// All functions are **pure**: same input → same output, no side effects.

/// Represents the different kinds of path segments in a route key
///
/// # Examples
///
/// ```
/// use rhtmx_typed_routes::route::segment::{classify_segment, Segment};
///
/// assert_eq!(classify_segment("about"), Ok(Segment::Literal("about".into())));
/// assert_eq!(classify_segment("[id]"), Ok(Segment::Param("id".into())));
/// assert_eq!(classify_segment("[...slug]"), Ok(Segment::CatchAll("slug".into())));
/// assert_eq!(
///     classify_segment("(app,auth)"),
///     Ok(Segment::Group(vec!["app".into(), "auth".into()]))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Static text segment
    Literal(String),
    /// Single-segment parameter: `[id]`
    Param(String),
    /// Catch-all parameter: `[...slug]`
    CatchAll(String),
    /// Group segment with one or more labels: `(app)` or `(app,auth)`
    Group(Vec<String>),
}

/// Classifies a single path segment (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Catch-all**: `[...name]`
/// 2. **Param**: `[name]` (an empty `[]` records an empty name)
/// 3. **Group**: `(a,b,c)` with comma-separated, whitespace-trimmed labels
/// 4. **Literal**: anything else, including `()` and groups with an empty label
///
/// A group label containing brackets or parentheses is rejected; the
/// rendering of such a label would be ambiguous.
pub fn classify_segment(segment: &str) -> Result<Segment, &'static str> {
    if let Some(inner) = segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return Ok(match inner.strip_prefix("...") {
            Some(name) => Segment::CatchAll(name.to_string()),
            None => Segment::Param(inner.to_string()),
        });
    }

    match segment.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => classify_group(segment, inner),
        None => Ok(Segment::Literal(segment.to_string())),
    }
}

fn classify_group(segment: &str, inner: &str) -> Result<Segment, &'static str> {
    if inner.contains(['(', ')']) {
        return Err("nested parentheses in group label");
    }
    if inner.contains(['[', ']']) {
        return Err("bracketed group label");
    }

    let labels: Vec<String> = inner.split(',').map(|l| l.trim().to_string()).collect();

    if labels.iter().any(String::is_empty) {
        return Ok(Segment::Literal(segment.to_string()));
    }

    Ok(Segment::Group(labels))
}

/// A parameter extracted from a dynamic route key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParam {
    /// Name without brackets or catch-all marker
    pub name: String,
    pub is_catch_all: bool,
}

impl RouteParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_catch_all: false,
        }
    }

    pub fn catch_all(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_catch_all: true,
        }
    }
}

/// Extracts parameters from a route key, left to right
///
/// Only segments [`classify_segment`] reads as parameters count.
///
/// ```
/// use rhtmx_typed_routes::route::segment::{extract_params, RouteParam};
///
/// assert_eq!(
///     extract_params("/users/[id]/files/[...path]"),
///     vec![RouteParam::new("id"), RouteParam::catch_all("path")]
/// );
/// ```
pub fn extract_params(key: &str) -> Vec<RouteParam> {
    key.split('/')
        .filter_map(|segment| match classify_segment(segment) {
            Ok(Segment::Param(name)) => Some(RouteParam::new(name)),
            Ok(Segment::CatchAll(name)) => Some(RouteParam::catch_all(name)),
            _ => None,
        })
        .collect()
}
