pub mod generate;
pub mod inspect;

use anyhow::{Context, Result};
use rhtmx_typed_routes::JsonTreeSource;
use std::io::Read;

/// Resolves the `--tree` argument into a tree source
///
/// `-` reads the whole of stdin up front.
pub fn tree_source(tree: &str) -> Result<JsonTreeSource> {
    if tree == "-" {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read route tree from stdin")?;
        return Ok(JsonTreeSource::inline(json));
    }

    Ok(JsonTreeSource::from_file(tree))
}
