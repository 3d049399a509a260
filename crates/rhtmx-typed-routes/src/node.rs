// File: src/node.rs
// Purpose: Route tree model and the sources that produce it

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Discriminant for a node in the route tree
///
/// Only [`RouteNodeKind::Route`] is navigable. Layouts and API handlers are
/// structural and never become typed hrefs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteNodeKind {
    /// A navigable screen
    Route,
    /// A layout wrapping its children (`_layout`)
    Layout,
    /// A server handler (`+api`)
    Api,
}

/// A single node of the route tree produced by the external router
///
/// # Examples
///
/// ```
/// use rhtmx_typed_routes::{RouteNode, RouteNodeKind};
///
/// let node = RouteNode::route("./blog/[slug].tsx").dynamic();
/// assert_eq!(node.kind, RouteNodeKind::Route);
/// assert!(node.is_dynamic);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    pub kind: RouteNodeKind,

    /// Raw file-derived key, e.g. `./(group)/[id].tsx`
    #[serde(default)]
    pub context_key: Option<String>,

    /// Logical route; the only trustworthy key for generated nodes
    #[serde(default)]
    pub canonical_route: String,

    #[serde(default)]
    pub is_generated: bool,

    #[serde(default)]
    pub is_dynamic: bool,

    #[serde(default)]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    fn new(kind: RouteNodeKind, context_key: Option<String>, canonical_route: String) -> Self {
        Self {
            kind,
            context_key,
            canonical_route,
            is_generated: false,
            is_dynamic: false,
            children: Vec::new(),
        }
    }

    /// Creates a route node backed by a file.
    ///
    /// The canonical route is derived from the context key so the node is
    /// usable even when the caller only knows the file name.
    pub fn route(context_key: impl Into<String>) -> Self {
        let context_key = context_key.into();
        let canonical = crate::path::normalize_context_key(&context_key)
            .trim_start_matches('/')
            .to_string();
        Self::new(RouteNodeKind::Route, Some(context_key), canonical)
    }

    /// Creates the root layout node (empty logical route)
    pub fn root_layout() -> Self {
        Self::new(
            RouteNodeKind::Layout,
            Some("./_layout.tsx".to_string()),
            String::new(),
        )
    }

    /// Creates a nested layout node
    pub fn layout(context_key: impl Into<String>, canonical_route: impl Into<String>) -> Self {
        Self::new(
            RouteNodeKind::Layout,
            Some(context_key.into()),
            canonical_route.into(),
        )
    }

    /// Creates a node synthesized by the tree builder (not-found, sitemap, ...)
    pub fn generated(canonical_route: impl Into<String>) -> Self {
        let mut node = Self::new(RouteNodeKind::Route, None, canonical_route.into());
        node.is_generated = true;
        node
    }

    /// Marks this node as having a bracketed parameter segment
    pub fn dynamic(mut self) -> Self {
        self.is_dynamic = true;
        self
    }

    /// Appends a child node
    pub fn with_child(mut self, child: RouteNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several child nodes
    pub fn with_children(mut self, children: impl IntoIterator<Item = RouteNode>) -> Self {
        self.children.extend(children);
        self
    }
}

// Children are detached onto a heap stack so dropping a deep chain never
// recurses once per level.
impl Drop for RouteNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Anything able to build a route tree
///
/// This is the seam to the external tree builder. It may fail, and it may
/// legitimately produce no tree at all. Sources that already hold a tree
/// lend it out instead of copying it.
pub trait RouteTreeSource {
    fn build_tree(&self) -> Result<Option<Cow<'_, RouteNode>>>;
}

impl<F> RouteTreeSource for F
where
    F: Fn() -> Result<Option<RouteNode>>,
{
    fn build_tree(&self) -> Result<Option<Cow<'_, RouteNode>>> {
        Ok(self()?.map(Cow::Owned))
    }
}

impl RouteTreeSource for RouteNode {
    fn build_tree(&self) -> Result<Option<Cow<'_, RouteNode>>> {
        Ok(Some(Cow::Borrowed(self)))
    }
}

impl RouteTreeSource for Option<RouteNode> {
    fn build_tree(&self) -> Result<Option<Cow<'_, RouteNode>>> {
        Ok(self.as_ref().map(Cow::Borrowed))
    }
}

/// Reads a serialized route tree (JSON) from a file or from memory
///
/// A JSON `null` document is a valid "no tree" answer.
#[derive(Debug, Clone)]
pub enum JsonTreeSource {
    File(PathBuf),
    Inline(String),
}

impl JsonTreeSource {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn inline(json: impl Into<String>) -> Self {
        Self::Inline(json.into())
    }

    fn parse(json: &str, origin: &str) -> Result<Option<RouteNode>> {
        if json.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(json)
            .with_context(|| format!("Failed to parse route tree from {}", origin))
    }

    fn read(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read route tree file: {:?}", path))
    }
}

impl RouteTreeSource for JsonTreeSource {
    fn build_tree(&self) -> Result<Option<Cow<'_, RouteNode>>> {
        let tree = match self {
            JsonTreeSource::File(path) => {
                let content = Self::read(path)?;
                Self::parse(&content, &format!("{:?}", path))?
            }
            JsonTreeSource::Inline(json) => Self::parse(json, "inline document")?,
        };
        Ok(tree.map(Cow::Owned))
    }
}
