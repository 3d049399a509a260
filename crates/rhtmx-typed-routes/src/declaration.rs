// File: src/declaration.rs
// Purpose: Assembles synthesized route patterns into the declaration document

use tracing::trace;

use crate::config::TypegenOptions;
use crate::error::Result;
use crate::pattern::{
    synthesize, ParamSegments, PatternRenderer, Placeholder, RouteTemplate, TypeScriptRenderer,
};
use crate::route::{GroupedRouteCollection, RouteParam};

/// Alias the router's public types are imported under
pub const ROUTER_ALIAS: &str = "Router";

const IGNORE_COMMENT: &str =
    "// @ts-ignore -- duplicate declarations are expected when several generated fixtures are loaded together";

/// Which side of a navigation call an object form describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamsSide {
    /// Params passed into navigation (`string | number` accepted)
    Input,
    /// Params read back from the current route (always strings)
    Output,
}

impl ParamsSide {
    fn unknown_params(self) -> String {
        match self {
            ParamsSide::Input => format!("{}.UnknownInputParams", ROUTER_ALIAS),
            ParamsSide::Output => format!("{}.UnknownOutputParams", ROUTER_ALIAS),
        }
    }

    fn param_type(self, param: &RouteParam) -> &'static str {
        match (self, param.is_catch_all) {
            (ParamsSide::Input, false) => "string | number",
            (ParamsSide::Input, true) => "(string | number)[]",
            (ParamsSide::Output, false) => "string",
            (ParamsSide::Output, true) => "string[]",
        }
    }
}

/// The three computed unions of the route registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteUnions {
    /// Bare path strings plus input object forms
    pub href: Vec<String>,
    pub href_input_params: Vec<String>,
    pub href_output_params: Vec<String>,
}

impl RouteUnions {
    /// Builds the unions for a classified route collection
    ///
    /// The relative and external path kinds are always present, ahead of any
    /// discovered route.
    pub fn build(collection: &GroupedRouteCollection, options: &TypegenOptions) -> Result<Self> {
        let renderer = TypeScriptRenderer::new(ROUTER_ALIAS);
        let permissive = options.partial_typed_groups;

        let mut static_strings = Vec::new();
        let mut static_inputs = Vec::new();
        let mut static_outputs = Vec::new();

        for kind in ["RelativePathString", "ExternalPathString"] {
            let pathname = format!("{}.{}", ROUTER_ALIAS, kind);
            static_inputs.push(static_object(&pathname, ParamsSide::Input));
            static_outputs.push(static_object(&pathname, ParamsSide::Output));
            static_strings.push(pathname);
        }

        for key in collection.static_keys() {
            let template = RouteTemplate::parse(key, ParamSegments::Literal)?;

            let bare = template.clone().with_suffix(Placeholder::SearchOrHash);
            static_strings.push(renderer.render(&synthesize(&bare, permissive)));

            let pathname = renderer.render(&synthesize(&template, permissive));
            trace!(key = %key, pathname = %pathname, "static route pattern");
            static_inputs.push(static_object(&pathname, ParamsSide::Input));
            static_outputs.push(static_object(&pathname, ParamsSide::Output));
        }

        let mut dynamic_strings = Vec::new();
        let mut dynamic_inputs = Vec::new();
        let mut dynamic_outputs = Vec::new();

        for (key, params) in collection.dynamic_keys() {
            let bare = RouteTemplate::parse(key, ParamSegments::Placeholders)?;
            dynamic_strings.push(renderer.render(&synthesize(&bare, permissive)));

            let template = RouteTemplate::parse(key, ParamSegments::Literal)?;
            let pathname = renderer.render(&synthesize(&template, permissive));
            trace!(key = %key, pathname = %pathname, "dynamic route pattern");
            dynamic_inputs.push(dynamic_object(&pathname, params, ParamsSide::Input));
            dynamic_outputs.push(dynamic_object(&pathname, params, ParamsSide::Output));
        }

        let href = static_strings
            .into_iter()
            .chain(static_inputs.iter().cloned())
            .chain(dynamic_strings)
            .chain(dynamic_inputs.iter().cloned())
            .collect();

        Ok(Self {
            href,
            href_input_params: static_inputs.into_iter().chain(dynamic_inputs).collect(),
            href_output_params: static_outputs.into_iter().chain(dynamic_outputs).collect(),
        })
    }
}

fn static_object(pathname: &str, side: ParamsSide) -> String {
    format!(
        "{{ pathname: {}; params?: {}; }}",
        pathname,
        side.unknown_params()
    )
}

fn dynamic_object(pathname: &str, params: &[RouteParam], side: ParamsSide) -> String {
    let fields: String = params
        .iter()
        .map(|param| format!("{}: {}; ", field_name(&param.name), side.param_type(param)))
        .collect();

    format!(
        "{{ pathname: {}; params: {} & {{ {}}}; }}",
        pathname,
        side.unknown_params(),
        fields
    )
}

/// Quotes a property name unless it is a plain identifier
fn field_name(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };

    if is_identifier {
        name.to_string()
    } else {
        format!("{:?}", name)
    }
}

/// Renders the complete declaration document
///
/// # Examples
///
/// ```
/// use rhtmx_typed_routes::{assemble, GroupedRouteCollection, TypegenOptions};
///
/// let document = assemble(&GroupedRouteCollection::new(), &TypegenOptions::default()).unwrap();
/// assert!(document.starts_with("/* eslint-disable */"));
/// assert!(document.contains("href: Router.RelativePathString | Router.ExternalPathString"));
/// ```
pub fn assemble(collection: &GroupedRouteCollection, options: &TypegenOptions) -> Result<String> {
    let unions = RouteUnions::build(collection, options)?;
    Ok(render_document(&unions, options))
}

/// Wraps the computed unions in the module augmentation document
pub fn render_document(unions: &RouteUnions, options: &TypegenOptions) -> String {
    let ignore = if options.test_ignore_comments {
        format!("{}\n      ", IGNORE_COMMENT)
    } else {
        String::new()
    };
    let module = &options.router_module;

    format!(
        "/* eslint-disable */
import * as {alias} from '{module}';

export * from '{module}';

declare module '{module}' {{
  export namespace {namespace} {{
    export interface __routes<T extends string | object = string> {{
      {ignore}hrefInputParams: {input};
      {ignore}hrefOutputParams: {output};
      {ignore}href: {href};
    }}
  }}
}}
",
        alias = ROUTER_ALIAS,
        module = module,
        namespace = options.router_namespace,
        ignore = ignore,
        input = unions.href_input_params.join(" | "),
        output = unions.href_output_params.join(" | "),
        href = unions.href.join(" | "),
    )
}
