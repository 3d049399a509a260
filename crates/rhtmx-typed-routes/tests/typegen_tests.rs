//! Integration tests for rhtmx-typed-routes
//!
//! Tests are organized by pipeline stage and cover:
//! - Classification of route trees (static, dynamic, generated, pruning)
//! - Pattern synthesis (groups, permissive groups, parameters)
//! - Declaration assembly (unions, document wrapper)
//! - The fault boundary around tree construction

use anyhow::anyhow;
use pretty_assertions::assert_eq;
use rhtmx_typed_routes::*;
use rstest::rstest;

fn sample_tree() -> RouteNode {
    RouteNode::root_layout().with_children([
        RouteNode::route("./index.tsx"),
        RouteNode::route("./about.tsx"),
        RouteNode::route("./blog/[slug].tsx").dynamic(),
        RouteNode::route("./docs/[...path].tsx").dynamic(),
        RouteNode::route("./(app,marketing)/pricing.tsx"),
        RouteNode::generated("+not-found"),
    ])
}

fn href_union(document: &str) -> &str {
    document
        .lines()
        .find_map(|line| line.trim().strip_prefix("href: "))
        .expect("document has an href union")
}

/// Whether `path` belongs to one of the string families in `pattern`
fn accepts(pattern: &SynthesizedPattern, path: &str) -> bool {
    pattern
        .alternatives()
        .iter()
        .any(|expr| matches_nodes(expr.nodes(), path))
}

fn matches_nodes(nodes: &[PatternNode], rest: &str) -> bool {
    let Some((node, tail)) = nodes.split_first() else {
        return rest.is_empty();
    };

    match node {
        PatternNode::Literal(text) => rest
            .strip_prefix(text.as_str())
            .map_or(false, |rest| matches_nodes(tail, rest)),
        PatternNode::Alternatives(values) => values.iter().any(|value| {
            rest.strip_prefix(value.as_str())
                .map_or(false, |rest| matches_nodes(tail, rest))
        }),
        PatternNode::Placeholder(Placeholder::SingleSegment) => (1..=rest.len())
            .filter(|end| rest.is_char_boundary(*end))
            .take_while(|end| !rest[..*end].contains('/'))
            .any(|end| matches_nodes(tail, &rest[end..])),
        PatternNode::Placeholder(Placeholder::CatchAll) => (0..=rest.len())
            .filter(|end| rest.is_char_boundary(*end))
            .any(|end| matches_nodes(tail, &rest[end..])),
        PatternNode::Placeholder(Placeholder::SearchOrHash) => {
            tail.is_empty() && (rest.is_empty() || rest.starts_with(['?', '#']))
        }
    }
}

fn bare_static(key: &str, permissive: bool) -> SynthesizedPattern {
    let template = RouteTemplate::parse(key, ParamSegments::Literal)
        .unwrap()
        .with_suffix(Placeholder::SearchOrHash);
    synthesize(&template, permissive)
}

fn input_union(document: &str) -> &str {
    document
        .lines()
        .find_map(|line| line.trim().strip_prefix("hrefInputParams: "))
        .expect("document has an input union")
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_static_dynamic_partition() {
    let routes = classify(Some(&sample_tree()));

    let statics: Vec<&str> = routes.static_keys().iter().map(String::as_str).collect();
    assert_eq!(
        statics,
        vec!["/", "/(app,marketing)/pricing", "/+not-found", "/about"]
    );

    let dynamics: Vec<&str> = routes.dynamic_keys().keys().map(String::as_str).collect();
    assert_eq!(dynamics, vec!["/blog/[slug]", "/docs/[...path]"]);

    for key in routes.static_keys() {
        assert!(!routes.dynamic_keys().contains_key(key));
    }
}

#[rstest]
#[case("./blog/[...slug].tsx", "slug", true)]
#[case("./blog/[id].tsx", "id", false)]
fn test_catch_all_vs_slug_extraction(
    #[case] context_key: &str,
    #[case] name: &str,
    #[case] catch_all: bool,
) {
    let tree = RouteNode::root_layout().with_child(RouteNode::route(context_key).dynamic());
    let routes = classify(Some(&tree));

    let params: Vec<&RouteParam> = routes.dynamic_keys().values().flatten().collect();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, name);
    assert_eq!(params[0].is_catch_all, catch_all);
}

#[test]
fn test_root_normalization() {
    let tree = RouteNode::root_layout().with_child(RouteNode::route("./index.tsx"));
    let routes = classify(Some(&tree));
    assert!(routes.static_keys().contains("/"));
}

#[test]
fn test_deep_tree_does_not_overflow() {
    let mut node = RouteNode::route("./leaf.tsx");
    for depth in 0..100_000 {
        node = RouteNode::route(format!("./level{}.tsx", depth)).with_child(node);
    }

    let routes = classify(Some(&node));
    assert_eq!(routes.static_keys().len(), 100_001);
}

#[test]
fn test_deep_tree_through_generate() {
    let mut node = RouteNode::route("./leaf.tsx");
    for depth in 0..100_000 {
        node = RouteNode::route(format!("./level{}.tsx", depth)).with_child(node);
    }
    let tree = Some(node);

    let document = generate(&tree, &TypegenOptions::default()).unwrap();
    assert!(href_union(&document).contains("`/leaf${"));
    assert!(href_union(&document).contains("`/level99999${"));
}

// ============================================================================
// Synthesis
// ============================================================================

#[test]
fn test_group_collapse_single_literal() {
    let pattern = synthesize_key("/(app)/(drawer)", ParamSegments::Literal, false).unwrap();
    assert_eq!(pattern.len(), 1);
    assert_eq!(pattern.alternatives()[0].as_literal(), Some("/(app)/(drawer)"));
}

#[test]
fn test_single_label_groups_keep_groups_removed_form() {
    let pattern = synthesize_key("/(app)/(drawer)/home", ParamSegments::Literal, false).unwrap();
    let literals: Vec<Option<&str>> = pattern.alternatives().iter().map(|e| e.as_literal()).collect();
    assert_eq!(literals, vec![Some("/(app)/(drawer)/home"), Some("/home")]);

    assert!(accepts(&pattern, "/home"));
    assert!(accepts(&pattern, "/(app)/(drawer)/home"));
    assert!(!accepts(&pattern, "/(app)/home"));
}

#[rstest]
#[case(false, vec!["/(a)", "/(b)"])]
#[case(true, vec!["/(a)", "/(b)", ""])]
fn test_group_enumeration(#[case] permissive: bool, #[case] expected: Vec<&str>) {
    let pattern = synthesize_key("/(a,b)/home", ParamSegments::Literal, permissive).unwrap();
    assert_eq!(pattern.len(), 2);

    let expanded = &pattern.alternatives()[0];
    match &expanded.nodes()[0] {
        PatternNode::Alternatives(values) => assert_eq!(values, &expected),
        other => panic!("expected alternatives, got {:?}", other),
    }
    assert_eq!(pattern.alternatives()[1].as_literal(), Some("/home"));
}

#[test]
fn test_group_enumeration_rendered() {
    let pattern = synthesize_key("/(app,drawer)/home", ParamSegments::Literal, false).unwrap();
    assert_eq!(
        TypeScriptRenderer::default().render(&pattern),
        "`${'/(app)' | '/(drawer)'}/home` | `/home`"
    );
}

#[test]
fn test_dynamic_route_inside_optional_group() {
    let pattern = synthesize_key("/(shop)/[id]", ParamSegments::Placeholders, true).unwrap();
    assert_eq!(
        TypeScriptRenderer::default().render(&pattern),
        "`${'/(shop)' | ''}/${Router.SingleRoutePart<T>}` | `/${Router.SingleRoutePart<T>}`"
    );
}

// ============================================================================
// Assembly
// ============================================================================

#[test]
fn test_scenario_static_and_dynamic_route() {
    let tree = RouteNode::root_layout()
        .with_child(RouteNode::route("./about.tsx"))
        .with_child(RouteNode::route("./blog/[slug].tsx").dynamic());

    let document = generate(&Some(tree), &TypegenOptions::default()).unwrap();
    let href = href_union(&document);

    assert!(href.contains("`/about${`?${string}` | `#${string}` | ''}`"));
    assert!(href.contains("`/blog/${Router.SingleRoutePart<T>}`"));
    assert!(!href.contains("SearchOrHash"));

    let about = bare_static("/about", false);
    assert!(accepts(&about, "/about"));
    assert!(accepts(&about, "/about?tab=1"));
    assert!(accepts(&about, "/about#team"));
    assert!(!accepts(&about, "/aboutus"));

    let blog = synthesize_key("/blog/[slug]", ParamSegments::Placeholders, false).unwrap();
    assert!(accepts(&blog, "/blog/hello"));
    assert!(!accepts(&blog, "/blog/a/b"));
    assert!(input_union(&document).contains(
        "{ pathname: `/blog/[slug]`; params: Router.UnknownInputParams & { slug: string | number; }; }"
    ));
}

#[test]
fn test_scenario_grouped_route() {
    let tree = RouteNode::root_layout().with_child(RouteNode::route("./(app,drawer)/home.tsx"));
    let document = generate(&Some(tree), &TypegenOptions::default()).unwrap();

    assert!(href_union(&document).contains(
        "`${'/(app)' | '/(drawer)'}/home${`?${string}` | `#${string}` | ''}` | `/home${`?${string}` | `#${string}` | ''}`"
    ));
    assert!(input_union(&document)
        .contains("{ pathname: `${'/(app)' | '/(drawer)'}/home` | `/home`; params?: Router.UnknownInputParams; }"));
}

#[test]
fn test_scenario_nested_single_label_groups() {
    let tree = RouteNode::root_layout().with_child(RouteNode::route("./(app)/(drawer)/home.tsx"));
    let document = generate(&Some(tree), &TypegenOptions::default()).unwrap();

    assert!(href_union(&document).contains(
        "`/(app)/(drawer)/home${`?${string}` | `#${string}` | ''}` | `/home${`?${string}` | `#${string}` | ''}`"
    ));
    assert!(input_union(&document).contains(
        "{ pathname: `/(app)/(drawer)/home` | `/home`; params?: Router.UnknownInputParams; }"
    ));

    let bare = bare_static("/(app)/(drawer)/home", false);
    assert!(accepts(&bare, "/home"));
    assert!(accepts(&bare, "/home?x=1"));
}

#[test]
fn test_grouped_index_gets_root_separator() {
    let tree = RouteNode::root_layout().with_child(RouteNode::route("./(a,b)/index.tsx"));
    let document = generate(&Some(tree), &TypegenOptions::default()).unwrap();

    assert!(href_union(&document).contains(
        "`${'/(a)' | '/(b)'}${`?${string}` | `#${string}` | ''}` | `/${`?${string}` | `#${string}` | ''}`"
    ));
    assert!(input_union(&document).contains("{ pathname: `${'/(a)' | '/(b)'}` | `/`;"));
}

#[test]
fn test_permissive_mode_document() {
    let tree = RouteNode::root_layout().with_child(RouteNode::route("./(app)/home.tsx"));
    let options = TypegenOptions::default().partial_typed_groups(true);
    let document = generate(&Some(tree), &options).unwrap();

    assert!(href_union(&document)
        .contains("`${'/(app)' | ''}/home${`?${string}` | `#${string}` | ''}` | `/home${`?${string}` | `#${string}` | ''}`"));
}

#[test]
fn test_idempotence() {
    let options = TypegenOptions::default().partial_typed_groups(true);
    let first = generate(&Some(sample_tree()), &options).unwrap();
    let second = generate(&Some(sample_tree()), &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_child_order_does_not_change_output() {
    let forward = RouteNode::root_layout()
        .with_child(RouteNode::route("./a.tsx"))
        .with_child(RouteNode::route("./b.tsx"));
    let backward = RouteNode::root_layout()
        .with_child(RouteNode::route("./b.tsx"))
        .with_child(RouteNode::route("./a.tsx"));

    let options = TypegenOptions::default();
    assert_eq!(
        generate(&Some(forward), &options).unwrap(),
        generate(&Some(backward), &options).unwrap()
    );
}

#[test]
fn test_unsupported_group_label_is_reported() {
    let tree = RouteNode::root_layout().with_child(RouteNode::route("./(a,(b))/home.tsx"));
    let err = generate(&Some(tree), &TypegenOptions::default()).unwrap_err();
    assert!(err.to_string().contains("(a,(b))"));
}

// ============================================================================
// Fault boundary
// ============================================================================

fn generic_only_document(options: &TypegenOptions) -> String {
    assemble(&GroupedRouteCollection::new(), options).unwrap()
}

#[test]
fn test_null_tree_degrades_to_generic_kinds() {
    let options = TypegenOptions::default();
    let document = generate(&None::<RouteNode>, &options).unwrap();

    assert_eq!(document, generic_only_document(&options));
    assert_eq!(
        href_union(&document),
        "Router.RelativePathString | Router.ExternalPathString | \
         { pathname: Router.RelativePathString; params?: Router.UnknownInputParams; } | \
         { pathname: Router.ExternalPathString; params?: Router.UnknownInputParams; };"
    );
}

#[test]
fn test_failing_source_degrades_to_generic_kinds() {
    let failing = || -> anyhow::Result<Option<RouteNode>> { Err(anyhow!("missing _layout")) };
    let options = TypegenOptions::default();

    let document = generate(&failing, &options).unwrap();
    assert_eq!(document, generic_only_document(&options));
}

#[test]
fn test_invalid_json_source_degrades_to_generic_kinds() {
    let options = TypegenOptions::default().test_ignore_comments(true);
    let document = generate(&JsonTreeSource::inline("{ broken"), &options).unwrap();
    assert_eq!(document, generic_only_document(&options));
}

#[test]
fn test_json_source_end_to_end() {
    let json = r#"{
        "kind": "layout",
        "contextKey": "./_layout.tsx",
        "canonicalRoute": "",
        "children": [
            { "kind": "route", "contextKey": "./settings/index.tsx", "canonicalRoute": "settings" },
            { "kind": "route", "contextKey": "./users/[id].tsx", "canonicalRoute": "users/[id]", "isDynamic": true },
            { "kind": "api", "contextKey": "./hello+api.ts", "canonicalRoute": "hello" }
        ]
    }"#;

    let document = generate(&JsonTreeSource::inline(json), &TypegenOptions::default()).unwrap();
    let href = href_union(&document);

    assert!(href.contains("`/settings${`?${string}` | `#${string}` | ''}`"));
    assert!(href.contains("`/users/${Router.SingleRoutePart<T>}`"));
    assert!(!href.contains("hello"));
}
