/// Route tree classification
///
/// Walks a route tree and buckets every navigable node into static keys or
/// dynamic key templates with their extracted parameters.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::segment::{extract_params, RouteParam};
use crate::node::{RouteNode, RouteNodeKind};
use crate::path::{normalize_canonical_route, normalize_context_key};

/// Static and dynamic route keys discovered in a route tree
///
/// Ordered containers keep the generated output byte-reproducible.
/// A key is never present in both containers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedRouteCollection {
    static_keys: BTreeSet<String>,
    dynamic_keys: BTreeMap<String, Vec<RouteParam>>,
}

impl GroupedRouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn static_keys(&self) -> &BTreeSet<String> {
        &self.static_keys
    }

    pub fn dynamic_keys(&self) -> &BTreeMap<String, Vec<RouteParam>> {
        &self.dynamic_keys
    }

    pub fn is_empty(&self) -> bool {
        self.static_keys.is_empty() && self.dynamic_keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.static_keys.len() + self.dynamic_keys.len()
    }

    /// Records a static key; a later dynamic entry for the same key is replaced
    pub fn insert_static(&mut self, key: String) {
        self.dynamic_keys.remove(&key);
        self.static_keys.insert(key);
    }

    /// Records a dynamic key template; a later static entry for the same key is replaced
    pub fn insert_dynamic(&mut self, key: String, params: Vec<RouteParam>) {
        self.static_keys.remove(&key);
        self.dynamic_keys.insert(key, params);
    }
}

/// Classifies a route tree into static and dynamic keys (pure function)
///
/// A missing tree yields the empty collection.
///
/// # Examples
///
/// ```
/// use rhtmx_typed_routes::{classify, RouteNode};
///
/// let tree = RouteNode::root_layout()
///     .with_child(RouteNode::route("./about.tsx"))
///     .with_child(RouteNode::route("./blog/[slug].tsx").dynamic());
///
/// let routes = classify(Some(&tree));
/// assert!(routes.static_keys().contains("/about"));
/// assert!(routes.dynamic_keys().contains_key("/blog/[slug]"));
///
/// assert!(classify(None).is_empty());
/// ```
pub fn classify(root: Option<&RouteNode>) -> GroupedRouteCollection {
    let mut collection = GroupedRouteCollection::new();
    if let Some(root) = root {
        walk(root, &mut collection);
    }
    collection
}

/// Pre-order depth-first walk
///
/// Only the root may be a non-route node whose children are still visited;
/// any other non-route node prunes its whole branch. An explicit stack keeps
/// arbitrarily deep trees off the call stack.
fn walk(root: &RouteNode, collection: &mut GroupedRouteCollection) {
    let mut stack = vec![(root, true)];

    while let Some((node, is_root)) = stack.pop() {
        match node.kind {
            RouteNodeKind::Route => add_route_node(node, collection),
            RouteNodeKind::Layout | RouteNodeKind::Api => {
                if !(is_root && node.canonical_route.is_empty()) {
                    debug!(route = %node.canonical_route, kind = ?node.kind, "pruning non-route branch");
                    continue;
                }
            }
        }

        stack.extend(node.children.iter().rev().map(|child| (child, false)));
    }
}

fn add_route_node(node: &RouteNode, collection: &mut GroupedRouteCollection) {
    let key = route_key(node);

    if node.is_dynamic {
        let params = extract_params(&key);
        debug!(key = %key, params = params.len(), "dynamic route");
        collection.insert_dynamic(key, params);
    } else {
        debug!(key = %key, "static route");
        collection.insert_static(key);
    }
}

/// Derives the route key for a node
///
/// Generated nodes have no real file, so their canonical route is used.
pub fn route_key(node: &RouteNode) -> String {
    match (&node.context_key, node.is_generated) {
        (Some(context_key), false) => normalize_context_key(context_key),
        _ => normalize_canonical_route(&node.canonical_route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(collection: &GroupedRouteCollection) -> Vec<&str> {
        collection.static_keys().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_classify_none_is_empty() {
        let collection = classify(None);
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
    }

    #[test]
    fn test_root_layout_children_are_visited() {
        let tree = RouteNode::root_layout()
            .with_child(RouteNode::route("./index.tsx"))
            .with_child(RouteNode::route("./about.tsx"));

        let collection = classify(Some(&tree));
        assert_eq!(keys(&collection), vec!["/", "/about"]);
    }

    #[test]
    fn test_nested_layout_is_pruned() {
        let tree = RouteNode::root_layout().with_child(
            RouteNode::layout("./(tabs)/_layout.tsx", "(tabs)")
                .with_child(RouteNode::route("./(tabs)/feed.tsx")),
        );

        assert!(classify(Some(&tree)).is_empty());
    }

    #[test]
    fn test_root_with_non_empty_route_is_pruned() {
        let tree = RouteNode::layout("./api/_layout.tsx", "api")
            .with_child(RouteNode::route("./api/users.tsx"));

        assert!(classify(Some(&tree)).is_empty());
    }

    #[test]
    fn test_route_children_are_visited() {
        let tree = RouteNode::route("./settings.tsx")
            .with_child(RouteNode::route("./settings/profile.tsx"));

        let collection = classify(Some(&tree));
        assert_eq!(keys(&collection), vec!["/settings", "/settings/profile"]);
    }

    #[test]
    fn test_generated_node_uses_canonical_route() {
        let mut node = RouteNode::generated("+not-found");
        node.context_key = Some("./does/not/matter.tsx".to_string());
        let tree = RouteNode::root_layout().with_child(node);

        assert_eq!(keys(&classify(Some(&tree))), vec!["/+not-found"]);
    }

    #[test]
    fn test_dynamic_params_extracted() {
        let tree = RouteNode::root_layout()
            .with_child(RouteNode::route("./blog/[...slug].tsx").dynamic())
            .with_child(RouteNode::route("./users/[id].tsx").dynamic());

        let collection = classify(Some(&tree));
        assert_eq!(
            collection.dynamic_keys().get("/blog/[...slug]"),
            Some(&vec![RouteParam::catch_all("slug")])
        );
        assert_eq!(
            collection.dynamic_keys().get("/users/[id]"),
            Some(&vec![RouteParam::new("id")])
        );
        assert!(collection.static_keys().is_empty());
    }

    #[test]
    fn test_duplicate_keys_are_deduplicated() {
        let tree = RouteNode::root_layout()
            .with_child(RouteNode::route("./about.tsx"))
            .with_child(RouteNode::route("./about.web.tsx"));

        assert_eq!(keys(&classify(Some(&tree))), vec!["/about"]);
    }

    #[test]
    fn test_key_never_in_both_sets() {
        let mut collection = GroupedRouteCollection::new();
        collection.insert_static("/x".to_string());
        collection.insert_dynamic("/x".to_string(), Vec::new());
        assert!(collection.static_keys().is_empty());
        assert_eq!(collection.dynamic_keys().len(), 1);

        collection.insert_static("/x".to_string());
        assert!(collection.dynamic_keys().is_empty());
        assert_eq!(collection.static_keys().len(), 1);
    }
}
