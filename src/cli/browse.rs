//! Non-interactive browsing: `tree`, `show` and `meta`

use std::sync::Arc;

use crate::core::catalog::ContentSource;
use crate::core::content::{self, ContentNode};
use crate::core::session::Session;
use crate::error::{FolioError, Result};

/// Handle `devfolio tree`
pub fn handle_tree(source: &dyn ContentSource, all: bool) -> Result<()> {
    let session = Session::load(source)?;
    print!("{}", render_tree(session.tree(), all));
    Ok(())
}

/// Handle `devfolio show <PATH>`
pub fn handle_show(source: &dyn ContentSource, path: &str) -> Result<()> {
    let session = Session::load(source)?;
    let node = resolve_document(session.tree(), path)?;

    let body = node.body();
    print!("{}", body);
    if !body.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Handle `devfolio meta`
pub fn handle_meta(source: &dyn ContentSource, compact: bool) -> Result<()> {
    let catalog = source.load()?;
    let ld = catalog.profile.to_json_ld();
    let text = if compact {
        serde_json::to_string(&ld)?
    } else {
        serde_json::to_string_pretty(&ld)?
    };
    println!("{}", text);
    Ok(())
}

/// Find a document by root-relative path
pub fn resolve_document(tree: &Arc<ContentNode>, path: &str) -> Result<Arc<ContentNode>> {
    let node = content::find_by_path(tree, path)
        .ok_or_else(|| FolioError::DocumentNotFound(path.to_string()))?;

    if node.is_folder() {
        return Err(FolioError::NotADocument(path.to_string()));
    }
    Ok(node)
}

/// Indented listing of the visible rows
pub fn render_tree(tree: &Arc<ContentNode>, all: bool) -> String {
    let tree = if all {
        content::expand_all(tree)
    } else {
        Arc::clone(tree)
    };

    let mut out = String::new();
    for row in content::flatten(&tree) {
        let indent = "  ".repeat(row.depth);
        let node = &row.node;
        if node.is_folder() {
            let marker = if node.is_expanded() { "▾" } else { "▸" };
            out.push_str(&format!("{}{} {}/\n", indent, marker, node.name()));
        } else if node.project().is_some() {
            out.push_str(&format!("{}  {}  ▶\n", indent, node.name()));
        } else {
            out.push_str(&format!("{}  {}\n", indent, node.name()));
        }
    }
    out
}
