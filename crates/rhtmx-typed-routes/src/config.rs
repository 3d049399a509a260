// File: src/config.rs
// Purpose: Generator options, optionally loaded from a TOML file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options recognized by the declaration generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TypegenOptions {
    /// Treat every group as optional and enumerable, even single-label ones
    #[serde(alias = "partialTypedGroups")]
    pub partial_typed_groups: bool,

    /// Emit a diagnostic-suppression comment before each computed union
    #[serde(alias = "testIgnoreComments")]
    pub test_ignore_comments: bool,

    /// Module whose public surface is re-exported and augmented
    #[serde(alias = "routerModule")]
    pub router_module: String,

    /// Namespace inside the router module holding the route registry
    #[serde(alias = "routerNamespace")]
    pub router_namespace: String,
}

fn default_router_module() -> String {
    "expo-router".to_string()
}

fn default_router_namespace() -> String {
    "ExpoRouter".to_string()
}

impl Default for TypegenOptions {
    fn default() -> Self {
        Self {
            partial_typed_groups: false,
            test_ignore_comments: false,
            router_module: default_router_module(),
            router_namespace: default_router_namespace(),
        }
    }
}

impl TypegenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn partial_typed_groups(mut self, enabled: bool) -> Self {
        self.partial_typed_groups = enabled;
        self
    }

    pub fn test_ignore_comments(mut self, enabled: bool) -> Self {
        self.test_ignore_comments = enabled;
        self
    }

    pub fn router_module(mut self, module: impl Into<String>) -> Self {
        self.router_module = module.into();
        self
    }

    pub fn router_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.router_namespace = namespace.into();
        self
    }

    /// Load options from a TOML file
    ///
    /// A missing or empty file yields the defaults. Options may sit at the
    /// top level or under a `[typed_routes]` table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Parse options from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        #[derive(Deserialize)]
        struct Document {
            typed_routes: Option<TypegenOptions>,
            #[serde(flatten)]
            inline: TypegenOptions,
        }

        let document: Document = toml::from_str(content)?;
        Ok(document.typed_routes.unwrap_or(document.inline))
    }

    /// Load options from the default path (./typed-routes.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("typed-routes.toml")
    }
}
