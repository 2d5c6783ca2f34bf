//! Portfolio session: the view-model behind the TUI
//!
//! Holds the content tree, the open tabs and the active pointer, plus the
//! project demo dialog. All writes go through the methods here, which delegate
//! to the pure operations in [`content`](crate::core::content) and
//! [`tabs`](crate::core::tabs).

use std::sync::Arc;

use tracing::{debug, info};

use crate::core::catalog::{Catalog, ContentSource};
use crate::core::content::{self, ContentNode, NodeId, TreeRow};
use crate::core::demo::DemoState;
use crate::core::profile::Profile;
use crate::core::tabs::{self, OpenTab};
use crate::error::Result;

/// In-memory session, recreated on every launch
#[derive(Debug, Clone)]
pub struct Session {
    tree: Arc<ContentNode>,
    tabs: Vec<OpenTab>,
    active: Option<NodeId>,
    profile: Profile,
    demo: Option<DemoState>,
}

impl Session {
    /// Build a session from a parsed catalog
    pub fn new(catalog: Catalog) -> Result<Self> {
        let tree = catalog.build_tree()?;
        Ok(Self {
            tree,
            tabs: Vec::new(),
            active: None,
            profile: catalog.profile,
            demo: None,
        })
    }

    /// Load the catalog from `source` and build a session
    pub fn load(source: &dyn ContentSource) -> Result<Self> {
        let catalog = source.load()?;
        let session = Self::new(catalog)?;
        info!(
            source = %source.describe(),
            nodes = session.tree.subtree_len(),
            "portfolio loaded"
        );
        Ok(session)
    }

    /// Open the first document called `name`, if there is one
    pub fn open_startup_document(&mut self, name: &str) -> bool {
        match content::find_by_name(&self.tree, name) {
            Some(node) if node.is_document() => {
                self.open(node.id());
                true
            }
            _ => {
                debug!(name, "startup document not found");
                false
            }
        }
    }

    pub fn tree(&self) -> &Arc<ContentNode> {
        &self.tree
    }

    pub fn tabs(&self) -> &[OpenTab] {
        &self.tabs
    }

    pub fn active_id(&self) -> Option<NodeId> {
        self.active
    }

    /// Node shown in the editor
    pub fn active_node(&self) -> Option<&Arc<ContentNode>> {
        let active = self.active?;
        self.tabs
            .iter()
            .find(|tab| tab.id() == active)
            .map(|tab| &tab.node)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn demo(&self) -> Option<&DemoState> {
        self.demo.as_ref()
    }

    pub fn demo_mut(&mut self) -> Option<&mut DemoState> {
        self.demo.as_mut()
    }

    /// Visible explorer rows
    pub fn rows(&self) -> Vec<TreeRow> {
        content::flatten(&self.tree)
    }

    /// Root-relative path of a node
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        content::path_of(&self.tree, id)
    }

    /// Explorer "click": folders toggle, documents open
    pub fn activate(&mut self, id: NodeId) {
        let Some(node) = content::find(&self.tree, id) else {
            return;
        };

        if node.is_folder() {
            self.toggle(id);
        } else {
            self.open(id);
        }
    }

    /// Flip a folder's expansion
    pub fn toggle(&mut self, id: NodeId) {
        self.tree = content::toggle_expansion(&self.tree, id);
        debug!(node = %id, "toggled folder");
    }

    /// Force a folder open or closed
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        self.tree = content::set_expansion(&self.tree, id, expanded);
    }

    /// Open a document in a tab and make it active
    pub fn open(&mut self, id: NodeId) {
        let Some(node) = content::find(&self.tree, id) else {
            return;
        };
        let (tabs, active) = tabs::open_document(&self.tabs, self.active, &node);
        self.tabs = tabs;
        self.active = active;
        debug!(node = %id, name = node.name(), tabs = self.tabs.len(), "opened document");
    }

    /// Close a tab; closing something that is not open does nothing
    pub fn close(&mut self, id: NodeId) {
        let (tabs, active) = tabs::close_tab(&self.tabs, self.active, id);
        self.tabs = tabs;
        self.active = active;
        debug!(node = %id, active = ?self.active, "closed tab");
    }

    /// Close whatever tab is active
    pub fn close_active(&mut self) {
        if let Some(id) = self.active {
            self.close(id);
        }
    }

    /// Activate an open tab
    pub fn select(&mut self, id: NodeId) {
        let (tabs, active) = tabs::select_tab(&self.tabs, self.active, id);
        self.tabs = tabs;
        self.active = active;
    }

    /// Activate the tab `offset` positions away, wrapping around
    pub fn cycle_tab(&mut self, offset: isize) {
        if let Some(id) = tabs::cycle(&self.tabs, self.active, offset) {
            self.select(id);
        }
    }

    /// Open the demo dialog for a project document
    pub fn run_project(&mut self, id: NodeId) -> bool {
        let Some(project) = content::find(&self.tree, id).and_then(|n| n.project().cloned())
        else {
            return false;
        };
        debug!(project = %project.name, demo = ?project.demo, "running project demo");
        self.demo = Some(DemoState::open(project));
        true
    }

    /// Run the active document's project, if it has one
    pub fn run_active_project(&mut self) -> bool {
        match self.active {
            Some(id) => self.run_project(id),
            None => false,
        }
    }

    pub fn close_demo(&mut self) {
        self.demo = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{EmbeddedContent, MockContentSource};
    use crate::core::content::{find_by_path, NodeSpec};
    use crate::core::demo::{DemoKind, Project};
    use crate::error::FolioError;

    fn catalog() -> Catalog {
        Catalog {
            profile: Profile {
                name: "Jane Doe".into(),
                job_title: "Engineer".into(),
                ..Default::default()
            },
            root: NodeSpec::folder(
                "home",
                vec![
                    NodeSpec::folder(
                        "projects",
                        vec![NodeSpec::document("App.kt", "class App").with_project(Project {
                            name: "App".into(),
                            description: "An app".into(),
                            tech_stack: "Kotlin".into(),
                            link: "https://example.com".into(),
                            demo: DemoKind::ImageAnalysis,
                        })],
                    ),
                    NodeSpec::document("notes.md", "# Notes"),
                    NodeSpec::document("README.md", "# Hi"),
                ],
            )
            .expanded(),
        }
    }

    fn id(session: &Session, path: &str) -> NodeId {
        find_by_path(session.tree(), path).unwrap().id()
    }

    #[test]
    fn test_load_from_mock_source() {
        let mut source = MockContentSource::new();
        source.expect_load().times(1).returning(|| Ok(catalog()));
        source
            .expect_describe()
            .returning(|| "mock catalog".to_string());

        let session = Session::load(&source).unwrap();
        assert_eq!(session.profile().name, "Jane Doe");
        assert!(session.tabs().is_empty());
        assert!(session.active_node().is_none());
    }

    #[test]
    fn test_load_propagates_source_error() {
        let mut source = MockContentSource::new();
        source
            .expect_load()
            .returning(|| Err(FolioError::Content("broken".into())));
        source.expect_describe().returning(String::new);

        assert!(matches!(
            Session::load(&source),
            Err(FolioError::Content(_))
        ));
    }

    #[test]
    fn test_startup_document_opens_readme() {
        let mut session = Session::new(catalog()).unwrap();
        assert!(session.open_startup_document("README.md"));
        assert_eq!(session.active_node().unwrap().name(), "README.md");
        assert_eq!(session.tabs().len(), 1);
        assert!(session.tabs()[0].active);

        assert!(!session.open_startup_document("MISSING.md"));
        assert!(!session.open_startup_document("projects"));
    }

    #[test]
    fn test_activate_folder_toggles_and_document_opens() {
        let mut session = Session::new(catalog()).unwrap();
        let projects = id(&session, "projects");

        assert_eq!(session.rows().len(), 4);
        session.activate(projects);
        assert_eq!(session.rows().len(), 5);
        session.activate(projects);
        assert_eq!(session.rows().len(), 4);

        session.activate(id(&session, "notes.md"));
        assert_eq!(session.active_node().unwrap().name(), "notes.md");
    }

    #[test]
    fn test_tabs_survive_folder_toggles() {
        let mut session = Session::new(catalog()).unwrap();
        let projects = id(&session, "projects");
        let app = id(&session, "projects/App.kt");

        session.open(app);
        session.toggle(projects);
        session.toggle(projects);

        let active = session.active_node().unwrap();
        assert_eq!(active.id(), app);
        assert!(Arc::ptr_eq(
            active,
            &content::find(session.tree(), app).unwrap()
        ));
    }

    #[test]
    fn test_close_and_cycle() {
        let mut session = Session::new(catalog()).unwrap();
        let notes = id(&session, "notes.md");
        let readme = id(&session, "README.md");
        let app = id(&session, "projects/App.kt");

        session.open(notes);
        session.open(readme);
        session.open(app);
        session.cycle_tab(1);
        assert_eq!(session.active_id(), Some(notes));

        session.close_active();
        assert_eq!(session.active_id(), Some(app));

        session.close(readme);
        session.close(app);
        assert_eq!(session.active_id(), None);
        assert!(session.tabs().is_empty());

        session.close_active();
        assert!(session.tabs().is_empty());
    }

    #[test]
    fn test_run_project() {
        let mut session = Session::new(catalog()).unwrap();
        assert!(!session.run_active_project());

        session.open(id(&session, "notes.md"));
        assert!(!session.run_active_project());
        assert!(session.demo().is_none());

        session.open(id(&session, "projects/App.kt"));
        assert!(session.run_active_project());
        assert_eq!(session.demo().unwrap().project.demo, DemoKind::ImageAnalysis);

        session.close_demo();
        assert!(session.demo().is_none());
    }

    #[test]
    fn test_embedded_session_paths() {
        let session = Session::load(&EmbeddedContent).unwrap();
        let zyptra = id(&session, "projects/Zyptra.kt");
        assert_eq!(session.path_of(zyptra).as_deref(), Some("projects/Zyptra.kt"));
    }
}
