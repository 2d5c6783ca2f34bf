//! Main TUI application state and logic

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Position, Rect};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, warn};

use crate::core::config::Config;
use crate::core::content::{self, NodeId};
use crate::core::session::Session;
use crate::error::{FolioError, Result};
use crate::tui::event::{is_back_key, is_quit_key, AppEvent, EventHandler};
use crate::tui::ui;

/// Ticks a status message stays on screen
const STATUS_TICKS: u64 = 12;

/// Lines moved per mouse wheel notch
const WHEEL_LINES: isize = 3;

/// Pane receiving navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Explorer,
    Editor,
}

/// List selection state
#[derive(Debug, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total items in the list
    pub total: usize,
}

impl ListState {
    pub fn new(total: usize) -> Self {
        Self { selected: 0, total }
    }

    pub fn next(&mut self) {
        if self.total > 0 {
            self.selected = (self.selected + 1) % self.total;
        }
    }

    pub fn previous(&mut self) {
        if self.total > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.total - 1);
        }
    }

    /// Keep `selected` in range after the list changed size
    pub fn resize(&mut self, total: usize) {
        self.total = total;
        self.selected = self.selected.min(total.saturating_sub(1));
    }
}

/// Clickable regions recorded by the last draw
#[derive(Debug, Default, Clone)]
pub struct HitAreas {
    /// Compact header menu toggle
    pub menu: Option<Rect>,
    /// Explorer rows, first row at `explorer_offset`
    pub explorer: Option<Rect>,
    pub explorer_offset: usize,
    pub tabs: Vec<(Rect, NodeId)>,
    pub tab_close: Vec<(Rect, NodeId)>,
    pub run: Option<Rect>,
    pub editor: Option<Rect>,
}

/// Main application state
pub struct App {
    /// Whether the app is running
    pub running: bool,
    pub session: Session,
    pub config: Config,
    pub focus: Focus,
    /// Cursor over the explorer rows
    pub explorer: ListState,
    /// First explorer row drawn (computed during render)
    pub explorer_offset: Cell<usize>,
    /// Editor scroll offset per open document
    pub scroll: HashMap<NodeId, usize>,
    /// Largest useful scroll offset for the active document (computed during render)
    pub editor_max_scroll: Cell<usize>,
    /// Body height of the editor (computed during render)
    pub editor_page: Cell<usize>,
    /// Explorer overlay in the compact layout
    pub explorer_overlay: bool,
    pub show_help: bool,
    pub status_message: Option<String>,
    status_expires: u64,
    /// Tick counter for timed UI state
    pub tick_counter: u64,
    /// Terminal width in columns
    pub width: u16,
    pub hits: RefCell<HitAreas>,
}

impl App {
    /// Create the app around a loaded session
    pub fn new(session: Session, config: Config) -> Self {
        let rows = session.rows();
        let mut explorer = ListState::new(rows.len());
        let focus = match session.active_id() {
            Some(active) => {
                if let Some(index) = rows.iter().position(|row| row.node.id() == active) {
                    explorer.selected = index;
                }
                Focus::Editor
            }
            None => Focus::Explorer,
        };

        Self {
            running: true,
            session,
            config,
            focus,
            explorer,
            explorer_offset: Cell::new(0),
            scroll: HashMap::new(),
            editor_max_scroll: Cell::new(0),
            editor_page: Cell::new(10),
            explorer_overlay: false,
            show_help: false,
            status_message: None,
            status_expires: 0,
            tick_counter: 0,
            width: u16::MAX,
            hits: RefCell::new(HitAreas::default()),
        }
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| FolioError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| FolioError::Terminal(e.to_string()))?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| FolioError::Terminal(e.to_string()))?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| FolioError::Terminal(e.to_string()))?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| FolioError::Terminal(e.to_string()))?;
        terminal
            .show_cursor()
            .map_err(|e| FolioError::Terminal(e.to_string()))?;
        Ok(())
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        Self::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        let size = terminal
            .size()
            .map_err(|e| FolioError::Terminal(e.to_string()))?;
        self.resize(size.width);

        let mut events = EventHandler::new(Duration::from_millis(self.config.tick_rate_ms));

        // Main event loop
        while self.running {
            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|e| FolioError::Terminal(e.to_string()))?;

            match events.next().await {
                Some(event) => self.handle_event(event),
                None => {
                    warn!("Event channel closed, quitting");
                    self.quit();
                }
            }
        }

        Ok(())
    }

    /// Dispatch one event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key_event(key),
            AppEvent::Mouse(mouse) => self.handle_mouse_event(mouse),
            AppEvent::Resize(width, _) => self.resize(width),
            AppEvent::Tick => self.on_tick(),
        }
    }

    /// Whether the narrow layout is in effect
    pub fn is_compact(&self) -> bool {
        self.config.is_compact(self.width)
    }

    /// The explorer is always shown in the wide layout and on demand in the compact one
    pub fn explorer_visible(&self) -> bool {
        !self.is_compact() || self.explorer_overlay
    }

    /// Focus as seen by key handling; a hidden explorer cannot hold it
    pub fn effective_focus(&self) -> Focus {
        if self.focus == Focus::Explorer && !self.explorer_visible() {
            Focus::Editor
        } else {
            self.focus
        }
    }

    pub fn resize(&mut self, width: u16) {
        self.width = width;
        if !self.is_compact() {
            self.explorer_overlay = false;
        }
    }

    fn on_tick(&mut self) {
        self.tick_counter = self.tick_counter.wrapping_add(1);
        if self.status_message.is_some() && self.tick_counter >= self.status_expires {
            self.status_message = None;
        }
    }

    /// Show a transient message in the status bar
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_expires = self.tick_counter + STATUS_TICKS;
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keyboard
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // If help is shown, any key dismisses it
        if self.show_help {
            self.show_help = false;
            return;
        }

        // The demo dialog captures all input while open
        if self.session.demo().is_some() {
            self.handle_demo_key(key);
            return;
        }

        if is_quit_key(&key) {
            self.quit();
            return;
        }

        match key.code {
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Esc => {
                if self.is_compact() && self.explorer_overlay {
                    self.hide_explorer();
                }
            }
            KeyCode::Tab | KeyCode::BackTab => self.switch_focus(),
            KeyCode::Char('m') => self.toggle_explorer(),
            KeyCode::Char('[') => self.session.cycle_tab(-1),
            KeyCode::Char(']') => self.session.cycle_tab(1),
            KeyCode::Char('x') => self.session.close_active(),
            KeyCode::Char('r') => self.run_project(),
            KeyCode::Char(c @ '1'..='9') => self.select_tab_number(c),
            _ => match self.effective_focus() {
                Focus::Explorer => self.handle_explorer_key(key),
                Focus::Editor => self.handle_editor_key(key),
            },
        }
    }

    fn handle_explorer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.explorer.next(),
            KeyCode::Char('k') | KeyCode::Up => self.explorer.previous(),
            KeyCode::Char('g') | KeyCode::Home => self.explorer.selected = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.explorer.selected = self.explorer.total.saturating_sub(1)
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right | KeyCode::Char(' ') => {
                self.activate_selected()
            }
            KeyCode::Char('h') | KeyCode::Left => self.collapse_selected(),
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let page = self.editor_page.get().max(1) as isize;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.scroll_editor(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_editor(-1),
            KeyCode::PageDown | KeyCode::Char('d') => self.scroll_editor(page),
            KeyCode::PageUp | KeyCode::Char('u') => self.scroll_editor(-page),
            KeyCode::Char('g') | KeyCode::Home => self.scroll_editor(isize::MIN),
            KeyCode::Char('G') | KeyCode::End => self.scroll_editor(isize::MAX),
            _ => {}
        }
    }

    fn handle_demo_key(&mut self, key: KeyEvent) {
        if is_back_key(&key) || is_quit_key(&key) {
            self.session.close_demo();
            return;
        }

        let Some(demo) = self.session.demo_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => demo.next(),
            KeyCode::Char('k') | KeyCode::Up => demo.previous(),
            KeyCode::Char(' ') => demo.toggle_current(),
            KeyCode::Enter => demo.primary_action(),
            KeyCode::Char('s') => demo.secondary_action(),
            _ => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mouse
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let pos = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.show_help {
                    self.show_help = false;
                } else if self.session.demo().is_none() {
                    self.click(pos);
                }
            }
            MouseEventKind::ScrollDown => self.wheel(pos, WHEEL_LINES),
            MouseEventKind::ScrollUp => self.wheel(pos, -WHEEL_LINES),
            _ => {}
        }
    }

    fn click(&mut self, pos: Position) {
        let hits = self.hits.borrow().clone();

        if hits.menu.is_some_and(|r| r.contains(pos)) {
            self.toggle_explorer();
            return;
        }

        if let Some(&(_, id)) = hits.tab_close.iter().find(|(r, _)| r.contains(pos)) {
            self.session.close(id);
            return;
        }

        if let Some(&(_, id)) = hits.tabs.iter().find(|(r, _)| r.contains(pos)) {
            self.session.select(id);
            self.focus = Focus::Editor;
            return;
        }

        if hits.run.is_some_and(|r| r.contains(pos)) {
            self.run_project();
            return;
        }

        if let Some(area) = hits.explorer.filter(|r| r.contains(pos)) {
            let index = hits.explorer_offset + usize::from(pos.y - area.y);
            if index < self.explorer.total {
                self.explorer.selected = index;
                self.focus = Focus::Explorer;
                self.activate_selected();
            }
            return;
        }

        if hits.editor.is_some_and(|r| r.contains(pos)) {
            self.focus = Focus::Editor;
        }
    }

    fn wheel(&mut self, pos: Position, lines: isize) {
        let hits = self.hits.borrow().clone();
        if hits.explorer.is_some_and(|r| r.contains(pos)) {
            for _ in 0..lines.unsigned_abs() {
                if lines > 0 {
                    self.explorer.next();
                } else {
                    self.explorer.previous();
                }
            }
        } else if hits.editor.is_some_and(|r| r.contains(pos)) {
            self.scroll_editor(lines);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Explorer "click" on the selected row
    pub fn activate_selected(&mut self) {
        let rows = self.session.rows();
        let Some(row) = rows.get(self.explorer.selected) else {
            return;
        };
        let id = row.node.id();
        let is_document = row.node.is_document();

        self.session.activate(id);
        self.sync_explorer();

        if is_document {
            self.focus = Focus::Editor;
            if self.is_compact() {
                self.explorer_overlay = false;
            }
        }
    }

    /// Collapse the selected folder, or jump to the parent folder
    fn collapse_selected(&mut self) {
        let rows = self.session.rows();
        let Some(row) = rows.get(self.explorer.selected) else {
            return;
        };

        if row.node.is_folder() && row.node.is_expanded() {
            self.session.set_expanded(row.node.id(), false);
            self.sync_explorer();
            return;
        }

        let chain = content::ancestry(self.session.tree(), row.node.id());
        if chain.len() < 2 {
            return;
        }
        let parent = chain[chain.len() - 2].id();
        if let Some(index) = rows.iter().position(|r| r.node.id() == parent) {
            self.explorer.selected = index;
        }
    }

    /// Re-count explorer rows after the tree changed shape
    fn sync_explorer(&mut self) {
        let total = self.session.rows().len();
        self.explorer.resize(total);
    }

    fn scroll_editor(&mut self, delta: isize) {
        let Some(id) = self.session.active_id() else {
            return;
        };
        let max = self.editor_max_scroll.get();
        let current = self.scroll.get(&id).copied().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(max);
        self.scroll.insert(id, next);
    }

    /// Current scroll offset of the active document
    pub fn active_scroll(&self) -> usize {
        self.session
            .active_id()
            .and_then(|id| self.scroll.get(&id).copied())
            .unwrap_or(0)
    }

    /// Run the project under the explorer cursor, or the active document's
    fn run_project(&mut self) {
        let selected = match self.effective_focus() {
            Focus::Explorer => self
                .session
                .rows()
                .get(self.explorer.selected)
                .map(|row| row.node.id()),
            Focus::Editor => None,
        };

        let started = match selected {
            Some(id) => self.session.run_project(id),
            None => self.session.run_active_project(),
        };

        if !started {
            self.set_status("Nothing to run: this file is not a project");
        }
    }

    fn select_tab_number(&mut self, c: char) {
        let Some(index) = c.to_digit(10).map(|n| n as usize - 1) else {
            return;
        };
        if let Some(id) = self.session.tabs().get(index).map(|tab| tab.id()) {
            self.session.select(id);
            self.focus = Focus::Editor;
        }
    }

    fn switch_focus(&mut self) {
        if self.is_compact() {
            self.toggle_explorer();
            return;
        }
        self.focus = match self.focus {
            Focus::Explorer => Focus::Editor,
            Focus::Editor => Focus::Explorer,
        };
    }

    /// Show or hide the compact explorer overlay; in the wide layout just focus it
    fn toggle_explorer(&mut self) {
        if !self.is_compact() {
            self.focus = Focus::Explorer;
            return;
        }
        if self.explorer_overlay {
            self.hide_explorer();
        } else {
            self.explorer_overlay = true;
            self.focus = Focus::Explorer;
        }
        debug!(overlay = self.explorer_overlay, "explorer toggled");
    }

    fn hide_explorer(&mut self) {
        self.explorer_overlay = false;
        self.focus = Focus::Editor;
    }
}
