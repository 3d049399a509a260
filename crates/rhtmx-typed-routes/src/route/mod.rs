/// Route module: segment classification and route tree classification
///
/// All functions are pure: same input → same output, no side effects.

pub mod classify;
pub mod segment;

// Re-export commonly used types
pub use classify::{classify, route_key, GroupedRouteCollection};
pub use segment::{classify_segment, extract_params, RouteParam, Segment};
