use anyhow::{Context, Result};
use colored::Colorize;
use rhtmx_typed_routes::{assemble, collect_routes, TypegenOptions};
use std::fs;
use std::path::Path;
use tracing::info;

/// Command-line flags that take precedence over the options file
pub struct Overrides {
    pub partial_typed_groups: bool,
    pub test_ignore_comments: bool,
    pub router_module: Option<String>,
}

impl Overrides {
    fn apply(self, mut options: TypegenOptions) -> TypegenOptions {
        options.partial_typed_groups |= self.partial_typed_groups;
        options.test_ignore_comments |= self.test_ignore_comments;
        if let Some(module) = self.router_module {
            options.router_module = module;
        }
        options
    }
}

pub fn execute(
    tree: &str,
    out: Option<&Path>,
    config: Option<&Path>,
    overrides: Overrides,
) -> Result<()> {
    let options = match config {
        Some(path) => TypegenOptions::load(path)?,
        None => TypegenOptions::load_default()?,
    };
    let options = overrides.apply(options);
    info!(?options, "generating route declarations");

    let source = super::tree_source(tree)?;
    let routes = collect_routes(&source);
    let document = assemble(&routes, &options)?;

    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
            fs::write(path, &document)
                .with_context(|| format!("Failed to write declarations: {:?}", path))?;

            eprintln!(
                "{} {} ({} static, {} dynamic)",
                "✓ Wrote".green().bold(),
                path.display().to_string().cyan(),
                routes.static_keys().len(),
                routes.dynamic_keys().len()
            );
        }
        None => print!("{}", document),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_only_enable() {
        let options = TypegenOptions::default().partial_typed_groups(true);
        let overrides = Overrides {
            partial_typed_groups: false,
            test_ignore_comments: true,
            router_module: None,
        };

        let options = overrides.apply(options);
        assert!(options.partial_typed_groups);
        assert!(options.test_ignore_comments);
        assert_eq!(options.router_module, "expo-router");
    }

    #[test]
    fn test_overrides_router_module() {
        let overrides = Overrides {
            partial_typed_groups: false,
            test_ignore_comments: false,
            router_module: Some("my-router".to_string()),
        };

        assert_eq!(overrides.apply(TypegenOptions::default()).router_module, "my-router");
    }
}
