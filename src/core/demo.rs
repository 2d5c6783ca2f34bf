//! Project demos
//!
//! Project documents carry a [`Project`]; "running" one opens a simulated demo
//! whose shape depends on the project's [`DemoKind`]. Nothing is executed.

use serde::{Deserialize, Serialize};

/// What the Run action shows for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DemoKind {
    /// Plain link card
    #[default]
    Link,
    /// Sample image analysis report
    ImageAnalysis,
    /// Interactive app picker for a backup tool
    AppBackup,
    /// Repository card
    GithubLink,
}

/// A portfolio project that can be "run"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub tech_stack: String,
    pub link: String,
    #[serde(default)]
    pub demo: DemoKind,
}

/// Sample apps listed by the backup demo, with their initial selection
const BACKUP_SAMPLE_APPS: &[(&str, bool)] = &[
    ("WhatsApp", true),
    ("Instagram", false),
    ("Gmail", true),
    ("Chrome", false),
    ("Spotify", true),
    ("Netflix", false),
    ("YouTube", true),
    ("Maps", false),
];

/// Findings shown by the image analysis demo
pub const IMAGE_ANALYSIS_FINDINGS: &[(&str, &str)] = &[
    ("Object Detection", "Mobile phone, person, indoor environment"),
    ("Scene Understanding", "Technology demonstration in indoor setting"),
    ("Text Recognition", "No visible text detected"),
    ("Confidence Score", "94.7%"),
];

/// Accessibility description shown by the image analysis demo
pub const IMAGE_ANALYSIS_DESCRIPTION: &str = "A person is holding a smartphone displaying an \
application interface. The setting appears to be indoors with good lighting, suitable for app \
demonstration purposes.";

/// One row of the backup demo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub app: String,
    pub selected: bool,
}

/// State of an open demo dialog
#[derive(Debug, Clone)]
pub struct DemoState {
    pub project: Project,
    /// Backup demo rows; empty for other demo kinds
    pub entries: Vec<BackupEntry>,
    /// Cursor within `entries`
    pub cursor: usize,
    /// Feedback line after pressing an action
    pub last_action: Option<String>,
}

impl DemoState {
    /// Open a fresh demo for `project`
    pub fn open(project: Project) -> Self {
        let entries = match project.demo {
            DemoKind::AppBackup => BACKUP_SAMPLE_APPS
                .iter()
                .map(|(app, selected)| BackupEntry {
                    app: (*app).to_string(),
                    selected: *selected,
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            project,
            entries,
            cursor: 0,
            last_action: None,
        }
    }

    pub fn next(&mut self) {
        if !self.entries.is_empty() {
            self.cursor = (self.cursor + 1) % self.entries.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.entries.is_empty() {
            self.cursor = self
                .cursor
                .checked_sub(1)
                .unwrap_or(self.entries.len() - 1);
        }
    }

    /// Flip the checkbox under the cursor
    pub fn toggle_current(&mut self) {
        if let Some(entry) = self.entries.get_mut(self.cursor) {
            entry.selected = !entry.selected;
        }
    }

    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|e| e.selected).count()
    }

    /// Simulate the demo's primary action
    pub fn primary_action(&mut self) {
        let message = match self.project.demo {
            DemoKind::AppBackup => format!(
                "Backed up {} app(s) to Google Drive (simulated)",
                self.selected_count()
            ),
            DemoKind::ImageAnalysis => "Analysis refreshed (simulated)".to_string(),
            DemoKind::GithubLink | DemoKind::Link => format!("Open {}", self.project.link),
        };
        self.last_action = Some(message);
    }

    /// Simulate the demo's secondary action, if it has one
    pub fn secondary_action(&mut self) {
        if self.project.demo == DemoKind::AppBackup {
            self.last_action = Some("Restored from latest backup (simulated)".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(demo: DemoKind) -> Project {
        Project {
            name: "Zyptra".to_string(),
            description: "Backup tool".to_string(),
            tech_stack: "Kotlin".to_string(),
            link: "https://github.com/example/zyptra".to_string(),
            demo,
        }
    }

    #[test]
    fn test_project_demo_kind_is_kebab_case() {
        let project: Project = toml::from_str(
            "name = \"ImGC\"\ndescription = \"\"\ntech_stack = \"\"\nlink = \"\"\ndemo = \"image-analysis\"",
        )
        .unwrap();
        assert_eq!(project.demo, DemoKind::ImageAnalysis);

        let fallback: Project =
            toml::from_str("name = \"x\"\ndescription = \"\"\ntech_stack = \"\"\nlink = \"\"").unwrap();
        assert_eq!(fallback.demo, DemoKind::Link);

        let unknown: std::result::Result<Project, _> = toml::from_str(
            "name = \"x\"\ndescription = \"\"\ntech_stack = \"\"\nlink = \"\"\ndemo = \"nope\"",
        );
        assert!(unknown.is_err());
    }

    #[test]
    fn test_backup_demo_starts_with_sample_selection() {
        let demo = DemoState::open(project(DemoKind::AppBackup));
        assert_eq!(demo.entries.len(), 8);
        assert_eq!(demo.selected_count(), 4);
    }

    #[test]
    fn test_backup_demo_toggle_and_wrap() {
        let mut demo = DemoState::open(project(DemoKind::AppBackup));
        demo.previous();
        assert_eq!(demo.cursor, 7);
        demo.toggle_current();
        assert!(demo.entries[7].selected);
        demo.next();
        assert_eq!(demo.cursor, 0);
        demo.toggle_current();
        assert!(!demo.entries[0].selected);
        assert_eq!(demo.selected_count(), 4);

        demo.primary_action();
        assert_eq!(
            demo.last_action.as_deref(),
            Some("Backed up 4 app(s) to Google Drive (simulated)")
        );
    }

    #[test]
    fn test_link_demo_has_no_entries() {
        let mut demo = DemoState::open(project(DemoKind::GithubLink));
        demo.next();
        demo.toggle_current();
        assert!(demo.entries.is_empty());
        assert_eq!(demo.cursor, 0);

        demo.secondary_action();
        assert!(demo.last_action.is_none());
        demo.primary_action();
        assert!(demo.last_action.unwrap().contains("github.com/example/zyptra"));
    }
}
