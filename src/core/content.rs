//! Portfolio content tree
//!
//! The tree is built once from a [`NodeSpec`] declaration and never changes
//! shape afterwards. The only thing that can change is the `expanded` flag of
//! a folder, and even that is done by building a new root that shares every
//! untouched subtree with the old one.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::demo::Project;
use crate::error::{FolioError, Result};

/// Stable identity of a node, assigned in pre-order when the tree is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw pre-order index
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Folder or document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    Document,
}

/// How a document body is presented, derived from its file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Code-like text, colored by the line tokenizer
    Source,
    /// Markdown prose
    Markdown,
    /// Anything else, shown as-is
    Plain,
}

impl DocumentFormat {
    const SOURCE_EXTENSIONS: &'static [&'static str] =
        &["kt", "kts", "rs", "java", "dart", "js", "ts", "c", "cpp", "h", "py"];

    /// Classify a file name by extension
    pub fn from_name(name: &str) -> Self {
        let ext = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
            _ => return DocumentFormat::Plain,
        };

        if ext == "md" || ext == "markdown" {
            DocumentFormat::Markdown
        } else if Self::SOURCE_EXTENSIONS.contains(&ext.as_str()) {
            DocumentFormat::Source
        } else {
            DocumentFormat::Plain
        }
    }
}

/// Declarative description of a node, as written in the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,

    /// Explicit kind; inferred from `children` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,

    #[serde(default)]
    pub expanded: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// A folder declaration
    pub fn folder(name: impl Into<String>, children: Vec<NodeSpec>) -> Self {
        Self {
            name: name.into(),
            kind: Some(NodeKind::Folder),
            children,
            ..Default::default()
        }
    }

    /// A document declaration
    pub fn document(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: Some(NodeKind::Document),
            body: body.into(),
            ..Default::default()
        }
    }

    /// Mark a folder as initially expanded
    pub fn expanded(mut self) -> Self {
        self.expanded = true;
        self
    }

    /// Attach a runnable project
    pub fn with_project(mut self, project: Project) -> Self {
        self.project = Some(project);
        self
    }

    /// Kind after inference
    pub fn resolved_kind(&self) -> NodeKind {
        match self.kind {
            Some(kind) => kind,
            None if self.children.is_empty() => NodeKind::Document,
            None => NodeKind::Folder,
        }
    }
}

/// A node in the content tree
#[derive(Debug, Clone, PartialEq)]
pub struct ContentNode {
    id: NodeId,
    /// Exclusive upper bound of the ids in this subtree
    subtree_end: u32,
    name: String,
    kind: NodeKind,
    body: String,
    children: Vec<Arc<ContentNode>>,
    expanded: bool,
    project: Option<Project>,
}

impl ContentNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn children(&self) -> &[Arc<ContentNode>] {
        &self.children
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_document(&self) -> bool {
        self.kind == NodeKind::Document
    }

    /// Presentation format; folders report `Plain`
    pub fn format(&self) -> DocumentFormat {
        match self.kind {
            NodeKind::Folder => DocumentFormat::Plain,
            NodeKind::Document => DocumentFormat::from_name(&self.name),
        }
    }

    /// Whether `id` lives in this subtree (including this node)
    pub fn contains(&self, id: NodeId) -> bool {
        self.id.0 <= id.0 && id.0 < self.subtree_end
    }

    /// Number of nodes in this subtree
    pub fn subtree_len(&self) -> usize {
        (self.subtree_end - self.id.0) as usize
    }
}

/// Build an immutable tree from its declaration.
///
/// The root must be a folder. Documents cannot have children, folders cannot
/// carry a body or a project, and sibling names must be unique and free of
/// `/` so that paths resolve unambiguously.
pub fn build_tree(spec: &NodeSpec) -> Result<Arc<ContentNode>> {
    if spec.resolved_kind() != NodeKind::Folder {
        return Err(FolioError::Content(format!(
            "root '{}' must be a folder",
            spec.name
        )));
    }

    let mut next_id = 0;
    build_node(spec, &mut next_id, "")
}

fn build_node(spec: &NodeSpec, next_id: &mut u32, parent_path: &str) -> Result<Arc<ContentNode>> {
    let path = if parent_path.is_empty() {
        spec.name.clone()
    } else {
        format!("{}/{}", parent_path, spec.name)
    };

    if spec.name.trim().is_empty() {
        return Err(FolioError::Content(format!(
            "a node under '{}' has an empty name",
            parent_path
        )));
    }
    if spec.name.contains('/') {
        return Err(FolioError::Content(format!(
            "'{}' contains '/' in its name",
            path
        )));
    }

    let kind = spec.resolved_kind();
    match kind {
        NodeKind::Document if !spec.children.is_empty() => {
            return Err(FolioError::Content(format!(
                "document '{}' cannot have children",
                path
            )));
        }
        NodeKind::Folder if !spec.body.is_empty() => {
            return Err(FolioError::Content(format!(
                "folder '{}' cannot have a body",
                path
            )));
        }
        NodeKind::Folder if spec.project.is_some() => {
            return Err(FolioError::Content(format!(
                "folder '{}' cannot carry a project",
                path
            )));
        }
        _ => {}
    }

    let mut seen = HashSet::new();
    for child in &spec.children {
        if !seen.insert(child.name.as_str()) {
            return Err(FolioError::Content(format!(
                "'{}' contains '{}' more than once",
                path, child.name
            )));
        }
    }

    let id = NodeId(*next_id);
    *next_id += 1;

    let children = spec
        .children
        .iter()
        .map(|child| build_node(child, next_id, &path))
        .collect::<Result<Vec<_>>>()?;

    Ok(Arc::new(ContentNode {
        id,
        subtree_end: *next_id,
        name: spec.name.clone(),
        kind,
        body: spec.body.clone(),
        children,
        // Documents have nothing to expand
        expanded: kind == NodeKind::Folder && spec.expanded,
        project: spec.project.clone(),
    }))
}

/// Flip the `expanded` flag of the folder `target`.
///
/// Returns a new root; every subtree off the path to `target` is the same
/// `Arc` as before. Documents and unknown ids leave the tree untouched and the
/// input root is returned.
pub fn toggle_expansion(tree: &Arc<ContentNode>, target: NodeId) -> Arc<ContentNode> {
    replace_along_path(tree, target, &|node: &ContentNode| {
        if node.is_folder() {
            let mut toggled = node.clone();
            toggled.expanded = !toggled.expanded;
            Some(toggled)
        } else {
            None
        }
    })
    .unwrap_or_else(|| Arc::clone(tree))
}

/// Set the `expanded` flag of a folder to a specific value
pub fn set_expansion(tree: &Arc<ContentNode>, target: NodeId, expanded: bool) -> Arc<ContentNode> {
    match find(tree, target) {
        Some(node) if node.is_folder() && node.expanded != expanded => {
            toggle_expansion(tree, target)
        }
        _ => Arc::clone(tree),
    }
}

/// A copy of the tree with every folder expanded
pub fn expand_all(tree: &Arc<ContentNode>) -> Arc<ContentNode> {
    if tree.is_document() || (tree.expanded && tree.children.is_empty()) {
        return Arc::clone(tree);
    }

    let mut copy = ContentNode::clone(tree);
    copy.expanded = true;
    copy.children = tree.children.iter().map(expand_all).collect();
    Arc::new(copy)
}

fn replace_along_path(
    node: &Arc<ContentNode>,
    target: NodeId,
    edit: &dyn Fn(&ContentNode) -> Option<ContentNode>,
) -> Option<Arc<ContentNode>> {
    if !node.contains(target) {
        return None;
    }

    if node.id == target {
        return edit(node).map(Arc::new);
    }

    let (index, replaced) = node
        .children
        .iter()
        .enumerate()
        .find_map(|(i, child)| replace_along_path(child, target, edit).map(|new| (i, new)))?;

    let mut copy = ContentNode::clone(node);
    copy.children[index] = replaced;
    Some(Arc::new(copy))
}

/// One visible row of the explorer
#[derive(Debug, Clone)]
pub struct TreeRow {
    pub node: Arc<ContentNode>,
    pub depth: usize,
}

/// Depth-first, pre-order walk that only descends into expanded folders.
///
/// The root is always the first row, at depth 0.
pub fn flatten(tree: &Arc<ContentNode>) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    flatten_into(tree, 0, &mut rows);
    rows
}

fn flatten_into(node: &Arc<ContentNode>, depth: usize, rows: &mut Vec<TreeRow>) {
    rows.push(TreeRow {
        node: Arc::clone(node),
        depth,
    });

    if node.is_folder() && node.expanded {
        for child in &node.children {
            flatten_into(child, depth + 1, rows);
        }
    }
}

/// Look a node up by identity
pub fn find(tree: &Arc<ContentNode>, id: NodeId) -> Option<Arc<ContentNode>> {
    if !tree.contains(id) {
        return None;
    }
    if tree.id == id {
        return Some(Arc::clone(tree));
    }
    tree.children.iter().find_map(|child| find(child, id))
}

/// First node with the given name in pre-order
pub fn find_by_name(tree: &Arc<ContentNode>, name: &str) -> Option<Arc<ContentNode>> {
    if tree.name == name {
        return Some(Arc::clone(tree));
    }
    tree.children
        .iter()
        .find_map(|child| find_by_name(child, name))
}

/// Resolve a `/`-separated path relative to the root.
///
/// `"projects/Zyptra.kt"` and `"/projects/Zyptra.kt"` are equivalent; an
/// empty path resolves to the root itself.
pub fn find_by_path(tree: &Arc<ContentNode>, path: &str) -> Option<Arc<ContentNode>> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .try_fold(Arc::clone(tree), |node, segment| {
            node.children
                .iter()
                .find(|child| child.name == segment)
                .cloned()
        })
}

/// Nodes from the root down to `id`, inclusive
pub fn ancestry(tree: &Arc<ContentNode>, id: NodeId) -> Vec<Arc<ContentNode>> {
    let mut chain = Vec::new();
    let mut current = Some(Arc::clone(tree));

    while let Some(node) = current.take() {
        if !node.contains(id) {
            return Vec::new();
        }
        chain.push(Arc::clone(&node));
        if node.id == id {
            break;
        }
        current = node.children.iter().find(|c| c.contains(id)).cloned();
    }

    chain
}

/// Path of `id` relative to the root, as accepted by [`find_by_path`]
pub fn path_of(tree: &Arc<ContentNode>, id: NodeId) -> Option<String> {
    let chain = ancestry(tree, id);
    if chain.is_empty() {
        return None;
    }
    Some(
        chain
            .iter()
            .skip(1)
            .map(|node| node.name.as_str())
            .collect::<Vec<_>>()
            .join("/"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Arc<ContentNode> {
        build_tree(
            &NodeSpec::folder(
                "portfolio",
                vec![
                    NodeSpec::folder(
                        "experience",
                        vec![
                            NodeSpec::document("AGOMUC.kt", "class A"),
                            NodeSpec::folder(
                                "extracurricular",
                                vec![NodeSpec::document("DSC.kt", "class D")],
                            ),
                        ],
                    ),
                    NodeSpec::folder(
                        "projects",
                        vec![NodeSpec::document("Zyptra.kt", "class Z")],
                    )
                    .expanded(),
                    NodeSpec::document("README.md", "# Hello"),
                ],
            )
            .expanded(),
        )
        .unwrap()
    }

    fn names(rows: &[TreeRow]) -> Vec<(&str, usize)> {
        rows.iter().map(|r| (r.node.name(), r.depth)).collect()
    }

    #[test]
    fn test_ids_are_preorder() {
        let tree = sample();
        let ids: Vec<u32> = flatten(&expand_all(&tree))
            .iter()
            .map(|r| r.node.id().index())
            .collect();
        assert_eq!(ids, (0..tree.subtree_len() as u32).collect::<Vec<_>>());
        assert_eq!(tree.subtree_len(), 8);
    }

    #[test]
    fn test_flatten_respects_expansion() {
        let tree = sample();
        assert_eq!(
            names(&flatten(&tree)),
            vec![
                ("portfolio", 0),
                ("experience", 1),
                ("projects", 1),
                ("Zyptra.kt", 2),
                ("README.md", 1),
            ]
        );
    }

    #[test]
    fn test_flatten_all_collapsed_yields_root_only() {
        let tree = build_tree(&NodeSpec::folder(
            "root",
            vec![NodeSpec::folder("a", vec![NodeSpec::document("b.kt", "")])],
        ))
        .unwrap();
        let rows = flatten(&tree);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].node.name(), "root");
        assert_eq!(rows[0].depth, 0);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let tree = sample();
        let experience = find_by_name(&tree, "experience").unwrap();

        let once = toggle_expansion(&tree, experience.id());
        assert_ne!(once, tree);
        assert!(find(&once, experience.id()).unwrap().is_expanded());

        let twice = toggle_expansion(&once, experience.id());
        assert_eq!(twice, tree);
    }

    #[test]
    fn test_toggle_shares_untouched_subtrees() {
        let tree = sample();
        let nested = find_by_name(&tree, "extracurricular").unwrap();
        let toggled = toggle_expansion(&tree, nested.id());

        assert!(!Arc::ptr_eq(&tree, &toggled));
        // Sibling subtrees off the path are the same allocation
        assert!(Arc::ptr_eq(&tree.children()[1], &toggled.children()[1]));
        assert!(Arc::ptr_eq(&tree.children()[2], &toggled.children()[2]));
        // Documents keep their allocation even on the path's parent
        assert!(Arc::ptr_eq(
            &tree.children()[0].children()[0],
            &toggled.children()[0].children()[0]
        ));
    }

    #[test]
    fn test_toggle_document_or_unknown_is_noop() {
        let tree = sample();
        let readme = find_by_name(&tree, "README.md").unwrap();
        assert!(Arc::ptr_eq(&tree, &toggle_expansion(&tree, readme.id())));
        assert!(Arc::ptr_eq(&tree, &toggle_expansion(&tree, NodeId(999))));
    }

    #[test]
    fn test_set_expansion() {
        let tree = sample();
        let projects = find_by_name(&tree, "projects").unwrap();
        assert!(Arc::ptr_eq(&tree, &set_expansion(&tree, projects.id(), true)));

        let collapsed = set_expansion(&tree, projects.id(), false);
        assert!(!find(&collapsed, projects.id()).unwrap().is_expanded());
    }

    #[test]
    fn test_find_by_path() {
        let tree = sample();
        let dsc = find_by_path(&tree, "experience/extracurricular/DSC.kt").unwrap();
        assert_eq!(dsc.body(), "class D");
        assert_eq!(
            find_by_path(&tree, "/projects/Zyptra.kt").unwrap().name(),
            "Zyptra.kt"
        );
        assert_eq!(find_by_path(&tree, "").unwrap().name(), "portfolio");
        assert!(find_by_path(&tree, "projects/Missing.kt").is_none());
    }

    #[test]
    fn test_path_of_round_trips() {
        let tree = sample();
        let dsc = find_by_name(&tree, "DSC.kt").unwrap();
        let path = path_of(&tree, dsc.id()).unwrap();
        assert_eq!(path, "experience/extracurricular/DSC.kt");
        assert_eq!(find_by_path(&tree, &path).unwrap().id(), dsc.id());
        assert_eq!(ancestry(&tree, dsc.id()).len(), 4);
        assert!(path_of(&tree, NodeId(42)).is_none());
    }

    #[test]
    fn test_kind_is_inferred() {
        let spec = NodeSpec {
            name: "root".into(),
            children: vec![NodeSpec {
                name: "notes.txt".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let tree = build_tree(&spec).unwrap();
        assert!(tree.is_folder());
        assert!(tree.children()[0].is_document());
        assert_eq!(tree.children()[0].format(), DocumentFormat::Plain);
    }

    #[test]
    fn test_rejects_document_with_children() {
        let mut doc = NodeSpec::document("a.kt", "");
        doc.children.push(NodeSpec::document("b.kt", ""));
        let err = build_tree(&NodeSpec::folder("root", vec![doc])).unwrap_err();
        assert!(matches!(err, FolioError::Content(_)));
    }

    #[test]
    fn test_rejects_duplicate_siblings() {
        let err = build_tree(&NodeSpec::folder(
            "root",
            vec![NodeSpec::document("a.kt", ""), NodeSpec::document("a.kt", "")],
        ))
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_rejects_document_root_and_slashes() {
        assert!(build_tree(&NodeSpec::document("README.md", "")).is_err());
        assert!(build_tree(&NodeSpec::folder(
            "root",
            vec![NodeSpec::document("a/b.kt", "")]
        ))
        .is_err());
    }

    #[test]
    fn test_document_format_from_name() {
        assert_eq!(DocumentFormat::from_name("Zyptra.kt"), DocumentFormat::Source);
        assert_eq!(DocumentFormat::from_name("README.md"), DocumentFormat::Markdown);
        assert_eq!(DocumentFormat::from_name("notes"), DocumentFormat::Plain);
        assert_eq!(DocumentFormat::from_name(".md"), DocumentFormat::Plain);
    }
}
