/// Pattern synthesis for route keys
///
/// A route key is first parsed into a [`RouteTemplate`] (literal text,
/// placeholder slots and group segments), then [`synthesize`] expands its
/// group segments into a [`SynthesizedPattern`]: a small union of
/// [`PatternExpr`] values. Turning those into text is the job of a
/// [`PatternRenderer`].
///
/// Expansion and rendering are kept apart so the combinatorics never depend
/// on the target syntax.

pub mod render;

pub use render::{PatternRenderer, TypeScriptRenderer};

use crate::error::{Result, TypegenError};
use crate::route::segment::{classify_segment, Segment};

/// A slot matching a family of strings rather than fixed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// Exactly one path segment (`[id]`)
    SingleSegment,
    /// Any number of path segments (`[...slug]`)
    CatchAll,
    /// A query string, a fragment, or nothing at all after the path
    SearchOrHash,
}

/// One node of a pattern expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternNode {
    Literal(String),
    Placeholder(Placeholder),
    /// Exactly one of a fixed set of literal strings
    Alternatives(Vec<String>),
}

/// A sequence of nodes describing one family of path strings
///
/// Adjacent literals are always merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PatternExpr {
    nodes: Vec<PatternNode>,
}

impl PatternExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn literal(text: impl Into<String>) -> Self {
        let mut expr = Self::new();
        expr.push(PatternNode::Literal(text.into()));
        expr
    }

    pub fn nodes(&self) -> &[PatternNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The literal text when the expression has no slots at all
    pub fn as_literal(&self) -> Option<&str> {
        match self.nodes.as_slice() {
            [] => Some(""),
            [PatternNode::Literal(text)] => Some(text),
            _ => None,
        }
    }

    pub fn push(&mut self, node: PatternNode) {
        if let PatternNode::Literal(text) = &node {
            if text.is_empty() {
                return;
            }
            if let Some(PatternNode::Literal(last)) = self.nodes.last_mut() {
                last.push_str(text);
                return;
            }
        }
        self.nodes.push(node);
    }

    fn starts_with_placeholder(&self) -> bool {
        matches!(self.nodes.first(), Some(PatternNode::Placeholder(_)))
    }

    fn prepend_literal(&mut self, text: &str) {
        match self.nodes.first_mut() {
            Some(PatternNode::Literal(first)) => first.insert_str(0, text),
            _ => self.nodes.insert(0, PatternNode::Literal(text.to_string())),
        }
    }
}

/// Every legal surface form of a route key, as a finite union
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedPattern {
    alternatives: Vec<PatternExpr>,
}

impl SynthesizedPattern {
    fn from_alternatives(alternatives: Vec<PatternExpr>) -> Self {
        let mut unique: Vec<PatternExpr> = Vec::with_capacity(alternatives.len());
        for expr in alternatives {
            if !unique.contains(&expr) {
                unique.push(expr);
            }
        }
        Self { alternatives: unique }
    }

    pub fn alternatives(&self) -> &[PatternExpr] {
        &self.alternatives
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

/// How bracketed parameter segments are carried into a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSegments {
    /// Keep `[id]` / `[...slug]` as literal text (object `pathname` form)
    Literal,
    /// Rewrite `[id]` to a single-segment slot and `[...slug]` to a catch-all slot
    Placeholders,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplatePart {
    Text(String),
    Slot(Placeholder),
    Group { raw: String, labels: Vec<String> },
}

/// A route key split into text, slots and group segments
///
/// # Examples
///
/// ```
/// use rhtmx_typed_routes::pattern::{ParamSegments, RouteTemplate};
///
/// let template = RouteTemplate::parse("/(app,auth)/[id]", ParamSegments::Placeholders).unwrap();
/// assert!(template.has_groups());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    parts: Vec<TemplatePart>,
}

impl RouteTemplate {
    /// Parses a `/`-rooted route key segment by segment
    ///
    /// Fails only on group segments that cannot be rendered unambiguously.
    pub fn parse(key: &str, params: ParamSegments) -> Result<Self> {
        let body = key.strip_prefix('/').unwrap_or(key);
        let mut template = Self { parts: Vec::new() };

        for segment in body.split('/') {
            let kind = classify_segment(segment)
                .map_err(|reason| TypegenError::unsupported(key, segment, reason))?;

            match (kind, params) {
                (Segment::Group(labels), _) => template.parts.push(TemplatePart::Group {
                    raw: format!("/{}", segment),
                    labels,
                }),
                (Segment::Param(_), ParamSegments::Placeholders) => {
                    template.push_text("/");
                    template.parts.push(TemplatePart::Slot(Placeholder::SingleSegment));
                }
                (Segment::CatchAll(_), ParamSegments::Placeholders) => {
                    template.push_text("/");
                    template.parts.push(TemplatePart::Slot(Placeholder::CatchAll));
                }
                _ => template.push_text(&format!("/{}", segment)),
            }
        }

        Ok(template)
    }

    /// Appends a trailing slot, e.g. the search/hash suffix of bare hrefs
    pub fn with_suffix(mut self, placeholder: Placeholder) -> Self {
        self.parts.push(TemplatePart::Slot(placeholder));
        self
    }

    pub fn has_groups(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, TemplatePart::Group { .. }))
    }

    fn push_text(&mut self, text: &str) {
        match self.parts.last_mut() {
            Some(TemplatePart::Text(last)) => last.push_str(text),
            _ => self.parts.push(TemplatePart::Text(text.to_string())),
        }
    }

    /// Nothing but group segments, ignoring a trailing search/hash suffix
    fn is_groups_only(&self) -> bool {
        self.has_groups()
            && self.parts.iter().all(|part| {
                matches!(
                    part,
                    TemplatePart::Group { .. } | TemplatePart::Slot(Placeholder::SearchOrHash)
                )
            })
    }

    fn has_enumerable_group(&self, permissive_groups: bool) -> bool {
        self.parts.iter().any(|part| match part {
            TemplatePart::Group { labels, .. } => is_enumerable(labels, permissive_groups),
            _ => false,
        })
    }

    /// Every group kept as its literal text
    fn verbatim(&self) -> PatternExpr {
        self.render_parts(|raw, _| Some(PatternNode::Literal(raw.to_string())))
    }

    /// Enumerable groups turned into alternatives, the rest kept literal
    fn expanded(&self, permissive_groups: bool) -> PatternExpr {
        self.render_parts(|raw, labels| {
            if !is_enumerable(labels, permissive_groups) {
                return Some(PatternNode::Literal(raw.to_string()));
            }

            let mut alternatives: Vec<String> =
                labels.iter().map(|label| format!("/({})", label)).collect();
            if permissive_groups {
                alternatives.push(String::new());
            }
            Some(PatternNode::Alternatives(alternatives))
        })
    }

    /// Every group dropped outright
    fn groups_removed(&self) -> PatternExpr {
        let mut expr = self.render_parts(|_, _| None);

        if expr.is_empty() {
            expr.push(PatternNode::Literal("/".to_string()));
        } else if expr.starts_with_placeholder() {
            expr.prepend_literal("/");
        }
        expr
    }

    fn render_parts<F>(&self, mut group: F) -> PatternExpr
    where
        F: FnMut(&str, &[String]) -> Option<PatternNode>,
    {
        let mut expr = PatternExpr::new();
        for part in &self.parts {
            match part {
                TemplatePart::Text(text) => expr.push(PatternNode::Literal(text.clone())),
                TemplatePart::Slot(placeholder) => expr.push(PatternNode::Placeholder(*placeholder)),
                TemplatePart::Group { raw, labels } => {
                    if let Some(node) = group(raw, labels) {
                        expr.push(node);
                    }
                }
            }
        }
        expr
    }
}

fn is_enumerable(labels: &[String], permissive_groups: bool) -> bool {
    labels.len() > 1 || permissive_groups
}

/// Expands the group segments of a template (pure function)
///
/// - No groups: a single expression, the key itself.
/// - Only single-label groups and nothing else (non-permissive): a single
///   expression with every group kept verbatim.
/// - Otherwise: the union of the group-expanded expression and the
///   groups-removed expression.
///
/// A group enumerates when it has more than one label, or when
/// `permissive_groups` is set; permissive groups also gain an empty
/// alternative so they may be absent entirely.
pub fn synthesize(template: &RouteTemplate, permissive_groups: bool) -> SynthesizedPattern {
    let enumerable = template.has_enumerable_group(permissive_groups);
    if !template.has_groups() || (!enumerable && template.is_groups_only()) {
        return SynthesizedPattern::from_alternatives(vec![template.verbatim()]);
    }

    SynthesizedPattern::from_alternatives(vec![
        template.expanded(permissive_groups),
        template.groups_removed(),
    ])
}

/// Parses a route key and synthesizes its pattern in one step
///
/// ```
/// use rhtmx_typed_routes::pattern::{synthesize_key, ParamSegments};
///
/// let pattern = synthesize_key("/about", ParamSegments::Literal, false).unwrap();
/// assert_eq!(pattern.alternatives()[0].as_literal(), Some("/about"));
/// ```
pub fn synthesize_key(
    key: &str,
    params: ParamSegments,
    permissive_groups: bool,
) -> Result<SynthesizedPattern> {
    let template = RouteTemplate::parse(key, params)?;
    Ok(synthesize(&template, permissive_groups))
}
