//! Loading accessibility-tree snapshots from disk

use apuntar::ElementNode;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Load a tree from a `.json`, `.yaml` or `.yml` file, or from stdin when
/// `path` is `-`.
///
/// Anything without a `.json` extension goes through the YAML parser, which
/// also accepts JSON documents.
pub fn load_tree(path: &Path) -> CliResult<ElementNode> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| CliError::snapshot(format!("{}: {e}", path.display())))?
    };

    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let tree = parse_tree(&content, is_json)
        .map_err(|message| CliError::snapshot(format!("{}: {message}", path.display())))?;
    debug!(path = %path.display(), children = tree.children.len(), "loaded tree snapshot");
    Ok(tree)
}

fn parse_tree(content: &str, is_json: bool) -> Result<ElementNode, String> {
    if is_json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml_ng::from_str(content).map_err(|e| e.to_string())
    }
}
