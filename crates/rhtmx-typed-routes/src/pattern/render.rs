/// Rendering of synthesized patterns into a target type syntax

use super::{PatternExpr, PatternNode, Placeholder, SynthesizedPattern};

/// Turns pattern expressions into text for one target type system
pub trait PatternRenderer {
    fn render_expr(&self, expr: &PatternExpr) -> String;

    /// Renders every alternative, joined as a union
    fn render(&self, pattern: &SynthesizedPattern) -> String {
        pattern
            .alternatives()
            .iter()
            .map(|expr| self.render_expr(expr))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Renders TypeScript template-literal types
///
/// # Examples
///
/// ```
/// use rhtmx_typed_routes::pattern::{synthesize_key, ParamSegments, PatternRenderer, TypeScriptRenderer};
///
/// let renderer = TypeScriptRenderer::new("Router");
/// let pattern = synthesize_key("/(a,b)/home", ParamSegments::Literal, false).unwrap();
/// assert_eq!(renderer.render(&pattern), "`${'/(a)' | '/(b)'}/home` | `/home`");
/// ```
#[derive(Debug, Clone)]
pub struct TypeScriptRenderer {
    alias: String,
}

impl TypeScriptRenderer {
    /// `alias` is the namespace the router's types are imported under
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
        }
    }

    fn placeholder(&self, placeholder: Placeholder) -> String {
        match placeholder {
            Placeholder::SingleSegment => format!("${{{}.SingleRoutePart<T>}}", self.alias),
            Placeholder::CatchAll => "${string}".to_string(),
            Placeholder::SearchOrHash => "${`?${string}` | `#${string}` | ''}".to_string(),
        }
    }
}

impl Default for TypeScriptRenderer {
    fn default() -> Self {
        Self::new("Router")
    }
}

impl PatternRenderer for TypeScriptRenderer {
    fn render_expr(&self, expr: &PatternExpr) -> String {
        let body: String = expr
            .nodes()
            .iter()
            .map(|node| match node {
                PatternNode::Literal(text) => escape_template(text),
                PatternNode::Placeholder(placeholder) => self.placeholder(*placeholder),
                PatternNode::Alternatives(values) => {
                    let union = values
                        .iter()
                        .map(|value| quote_single(value))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    format!("${{{}}}", union)
                }
            })
            .collect();

        format!("`{}`", body)
    }
}

fn escape_template(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '$') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn quote_single(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        if matches!(c, '\\' | '\'') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
