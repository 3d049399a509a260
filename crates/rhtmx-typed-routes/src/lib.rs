//! # RHTMX Typed Routes
//!
//! Generates compile-time route types from a file-based route tree:
//! - Static routes (`/about`)
//! - Dynamic parameters (`/users/[id]`)
//! - Catch-all routes (`/docs/[...slug]`)
//! - Group segments (`/(app)/home`, `/(home,search)/feed`)
//!
//! ## Pipeline
//!
//! 1. **Classify**: walk the route tree and bucket every navigable node into
//!    static keys or dynamic key templates ([`classify`]).
//! 2. **Synthesize**: expand each key into a small union of pattern
//!    expressions, enumerating group alternatives ([`pattern::synthesize`]).
//! 3. **Assemble**: render the expressions and wrap them in a module
//!    augmentation document ([`assemble`]).
//!
//! Every stage is a pure function of its input; the output is
//! byte-reproducible for identical trees and options.
//!
//! ## Example
//!
//! ```
//! use rhtmx_typed_routes::{generate, RouteNode, TypegenOptions};
//!
//! let tree = RouteNode::root_layout()
//!     .with_child(RouteNode::route("./about.tsx"))
//!     .with_child(RouteNode::route("./blog/[slug].tsx").dynamic());
//!
//! let document = generate(&tree, &TypegenOptions::default()).unwrap();
//! assert!(document.contains("`/about${`?${string}` | `#${string}` | ''}`"));
//! assert!(document.contains("`/blog/${Router.SingleRoutePart<T>}`"));
//! ```

use tracing::{debug, warn};

// ============================================================================
// Module Declarations
// ============================================================================

mod config;
mod declaration;
mod error;
mod node;
pub mod path;
pub mod pattern;
pub mod route;

pub use config::TypegenOptions;
pub use declaration::{assemble, render_document, RouteUnions, ROUTER_ALIAS};
pub use error::{Result, TypegenError};
pub use node::{JsonTreeSource, RouteNode, RouteNodeKind, RouteTreeSource};
pub use pattern::{
    synthesize, synthesize_key, ParamSegments, PatternExpr, PatternNode, PatternRenderer,
    Placeholder, RouteTemplate, SynthesizedPattern, TypeScriptRenderer,
};
pub use route::{classify, GroupedRouteCollection, RouteParam, Segment};

/// Builds the route tree and classifies it
///
/// This is the only fault boundary: a failing tree source is logged and
/// treated as "no routes", never propagated.
pub fn collect_routes<S>(source: &S) -> GroupedRouteCollection
where
    S: RouteTreeSource + ?Sized,
{
    let tree = match source.build_tree() {
        Ok(tree) => tree,
        Err(err) => {
            warn!("Failed to build route tree, generating generic routes only: {:#}", err);
            None
        }
    };

    let routes = classify(tree.as_deref());
    debug!(
        static_routes = routes.static_keys().len(),
        dynamic_routes = routes.dynamic_keys().len(),
        "classified route tree"
    );
    routes
}

/// Runs the whole pipeline and returns the declaration document
///
/// Tree construction failures degrade to a document holding only the
/// generic relative and external path kinds. The only error surfaced is
/// [`TypegenError::UnsupportedSegment`], for keys that cannot be rendered
/// unambiguously.
pub fn generate<S>(source: &S, options: &TypegenOptions) -> Result<String>
where
    S: RouteTreeSource + ?Sized,
{
    let routes = collect_routes(source);
    assemble(&routes, options)
}
