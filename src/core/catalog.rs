//! Portfolio catalog loading
//!
//! The catalog is a TOML document with a `[profile]` table and a `[root]`
//! node tree. The default catalog is compiled into the binary; a different
//! one can be supplied as a file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::content::{build_tree, ContentNode, NodeSpec};
use crate::core::profile::Profile;
use crate::error::Result;

/// Catalog compiled into the binary
pub const EMBEDDED_CATALOG: &str = include_str!("../../content/portfolio.toml");

/// Parsed catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub profile: Profile,
    pub root: NodeSpec,
}

impl Catalog {
    /// Parse a catalog from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(contents)?;
        Ok(catalog)
    }

    /// Build and validate the content tree
    pub fn build_tree(&self) -> Result<Arc<ContentNode>> {
        build_tree(&self.root)
    }
}

/// Where the catalog comes from
#[cfg_attr(test, mockall::automock)]
pub trait ContentSource {
    /// Human-readable origin, used in logs
    fn describe(&self) -> String;

    /// Read and parse the catalog
    fn load(&self) -> Result<Catalog>;
}

/// The catalog compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedContent;

impl ContentSource for EmbeddedContent {
    fn describe(&self) -> String {
        "built-in portfolio".to_string()
    }

    fn load(&self) -> Result<Catalog> {
        Catalog::from_toml(EMBEDDED_CATALOG)
    }
}

/// A catalog read from disk
#[derive(Debug, Clone)]
pub struct FileContent {
    path: PathBuf,
}

impl FileContent {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContentSource for FileContent {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Catalog> {
        let contents = fs::read_to_string(&self.path)?;
        Catalog::from_toml(&contents)
    }
}

/// Pick the catalog source: an explicit file, or the built-in one
pub fn source_for(path: Option<&Path>) -> Box<dyn ContentSource> {
    match path {
        Some(path) => Box::new(FileContent::new(path)),
        None => Box::new(EmbeddedContent),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::core::content::{find_by_path, flatten, NodeKind};
    use crate::core::demo::DemoKind;
    use crate::error::FolioError;

    const SMALL: &str = r#"
[profile]
name = "Jane Doe"
job_title = "Engineer"

[root]
name = "home"
expanded = true

[[root.children]]
name = "notes"

[[root.children.children]]
name = "todo.md"
body = "- ship it"

[[root.children]]
name = "App.kt"
body = "class App"

[root.children.project]
name = "App"
description = "An app"
tech_stack = "Kotlin"
link = "https://example.com/app"
demo = "app-backup"
"#;

    #[test]
    fn test_embedded_catalog_builds() {
        let catalog = EmbeddedContent.load().unwrap();
        let tree = catalog.build_tree().unwrap();

        assert_eq!(tree.name(), "portfolio");
        assert!(tree.is_expanded());
        assert!(find_by_path(&tree, "README.md").is_some());
        assert!(find_by_path(&tree, "experience/extracurricular/FOSSCU.kt").is_some());

        let zyptra = find_by_path(&tree, "projects/Zyptra.kt").unwrap();
        assert_eq!(zyptra.project().unwrap().demo, DemoKind::AppBackup);
        assert!(!catalog.profile.name.is_empty());
    }

    #[test]
    fn test_embedded_catalog_default_expansion() {
        let tree = EmbeddedContent.load().unwrap().build_tree().unwrap();
        let visible: Vec<String> = flatten(&tree)
            .iter()
            .map(|row| row.node.name().to_string())
            .collect();
        assert_eq!(
            visible,
            vec![
                "portfolio",
                "experience",
                "projects",
                "Zyptra.kt",
                "ImGC.kt",
                "Codev.kt",
                "Diaensho.kt",
                "skills",
                "achievements.md",
                "README.md",
            ]
        );
    }

    #[test]
    fn test_parse_small_catalog() {
        let catalog = Catalog::from_toml(SMALL).unwrap();
        assert_eq!(catalog.root.children.len(), 2);
        assert_eq!(catalog.root.children[0].resolved_kind(), NodeKind::Folder);

        let tree = catalog.build_tree().unwrap();
        let app = find_by_path(&tree, "App.kt").unwrap();
        assert_eq!(app.project().unwrap().link, "https://example.com/app");
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = Catalog::from_toml("[profile\nname=").unwrap_err();
        assert!(matches!(err, FolioError::Toml(_)));
    }

    #[test]
    fn test_file_content_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();

        let source = source_for(Some(file.path()));
        assert_eq!(source.describe(), file.path().display().to_string());
        assert_eq!(source.load().unwrap().profile.name, "Jane Doe");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = FileContent::new("/definitely/not/here.toml");
        assert!(matches!(source.load(), Err(FolioError::Io(_))));
    }

    #[test]
    fn test_default_source_is_embedded() {
        assert_eq!(source_for(None).describe(), "built-in portfolio");
    }
}
