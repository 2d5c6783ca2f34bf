//! Main UI renderer

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::core::content::DocumentFormat;
use crate::core::demo::{DemoKind, DemoState, IMAGE_ANALYSIS_DESCRIPTION, IMAGE_ANALYSIS_FINDINGS};
use crate::tui::app::App;
use crate::tui::theme::{icons, Theme};
use crate::tui::{editor, explorer};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    *app.hits.borrow_mut() = Default::default();

    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    if app.is_compact() {
        render_compact(frame, area, app);
    } else {
        render_wide(frame, area, app);
    }

    if let Some(demo) = app.session.demo() {
        render_demo_dialog(frame, demo);
    }

    // Render help overlay on top if active
    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Explorer on the left, editor on the right
fn render_wide(frame: &mut Frame, area: Rect, app: &App) {
    let [main, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let explorer_width = app.config.explorer_width.min(main.width / 2);
    let [left, right] =
        Layout::horizontal([Constraint::Length(explorer_width), Constraint::Min(0)]).areas(main);

    explorer::render(frame, left, app);
    editor::render(frame, right, app);
    render_status_bar(frame, status, app);
}

/// Header bar with a menu toggle; the explorer replaces the editor when open
fn render_compact(frame: &mut Frame, area: Rect, app: &App) {
    let [header, main, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_compact_header(frame, header, app);
    if app.explorer_overlay {
        explorer::render(frame, main, app);
    } else {
        editor::render(frame, main, app);
    }
    render_status_bar(frame, status, app);
}

fn render_compact_header(frame: &mut Frame, area: Rect, app: &App) {
    let menu = format!(" {} ", icons::MENU);
    let menu_width = Span::raw(menu.as_str()).width() as u16;

    let title = Paragraph::new(Line::from(vec![
        Span::styled(menu, Theme::run_button()),
        Span::raw(format!(" {}", app.session.profile().title())),
    ]))
    .style(Theme::header());
    frame.render_widget(title, area);

    app.hits.borrow_mut().menu = Some(Rect::new(
        area.x,
        area.y,
        menu_width.min(area.width),
        area.height,
    ));
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let left = match &app.status_message {
        Some(msg) => format!(" {} ", msg),
        None => format!(" {} ", app.session.profile().caption()),
    };
    frame.render_widget(
        Paragraph::new(left).style(Theme::status_bar()),
        area,
    );

    let right = format!(" {} │ ? help ", status_details(app));
    frame.render_widget(
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .style(Theme::status_bar()),
        area,
    );
}

/// Right-hand status text: position in the active document, then the stack
fn status_details(app: &App) -> String {
    const STACK: &str = "ratatui | crossterm";

    let Some(node) = app.session.active_node() else {
        return STACK.to_string();
    };

    let total = node.body().lines().count().max(1);
    let line = (app.active_scroll() + 1).min(total);
    let format = match node.format() {
        DocumentFormat::Source => "Source",
        DocumentFormat::Markdown => "Markdown",
        DocumentFormat::Plain => "Text",
    };
    format!("Ln {}/{} │ {} │ {}", line, total, format, STACK)
}

/// `percent` of `length`, widened so large terminals do not overflow
fn percent_of(length: u16, percent: u16) -> u16 {
    let scaled = u32::from(length) * u32::from(percent) / 100;
    u16::try_from(scaled).unwrap_or(u16::MAX)
}

/// Centered popup area, clamped to the frame
fn popup_area(area: Rect, percent_x: u16, percent_y: u16, max_width: u16) -> Rect {
    let width = percent_of(area.width, percent_x).min(max_width);
    let height = percent_of(area.height, percent_y);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn render_demo_dialog(frame: &mut Frame, demo: &DemoState) {
    let area = popup_area(frame.area(), 80, 80, 90);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} {} - Demo ", icons::RUN, demo.project.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::PRIMARY))
        .style(Style::default().bg(Theme::SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(inner);

    let lines = match demo.project.demo {
        DemoKind::AppBackup => backup_lines(demo),
        DemoKind::ImageAnalysis => image_analysis_lines(demo),
        DemoKind::GithubLink | DemoKind::Link => link_lines(demo),
    };
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        body,
    );

    let keys = match demo.project.demo {
        DemoKind::AppBackup => {
            " j/k move  Space toggle  Enter back up to Google Drive  s restore  Esc close"
        }
        DemoKind::ImageAnalysis => " Enter analyze again  Esc close",
        DemoKind::GithubLink => " Enter view on GitHub  Esc close",
        DemoKind::Link => " Enter open link  Esc close",
    };
    let mut footer_lines = vec![Line::from(Span::styled(keys, Theme::muted()))];
    if let Some(action) = &demo.last_action {
        footer_lines.insert(
            0,
            Line::from(Span::styled(
                format!(" {}", action),
                Style::default().fg(Theme::NUMBER),
            )),
        );
    }
    frame.render_widget(Paragraph::new(footer_lines), footer);
}

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default()
            .fg(Theme::ON_BACKGROUND)
            .add_modifier(Modifier::BOLD),
    ))
}

fn backup_lines(demo: &DemoState) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading(" Select apps to back up:"),
        Line::from(""),
    ];

    for (index, entry) in demo.entries.iter().enumerate() {
        let check = if entry.selected { "[x]" } else { "[ ]" };
        let style = if index == demo.cursor {
            Theme::selected_focused()
        } else {
            Theme::normal()
        };
        lines.push(Line::from(Span::styled(
            format!(" {} {}", check, entry.app),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            " {} of {} apps selected",
            demo.selected_count(),
            demo.entries.len()
        ),
        Theme::muted(),
    )));
    lines
}

fn image_analysis_lines(demo: &DemoState) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", demo.project.description),
            Theme::muted(),
        )),
        Line::from(""),
        heading(" Sample image"),
        Line::from(Span::styled(
            " ┌──────────────────────┐",
            Theme::muted(),
        )),
        Line::from(Span::styled(
            " │   (sample photo)     │",
            Theme::muted(),
        )),
        Line::from(Span::styled(
            " └──────────────────────┘",
            Theme::muted(),
        )),
        Line::from(""),
        heading(" Gemini Vision analysis"),
        Line::from(format!(" {}", IMAGE_ANALYSIS_DESCRIPTION)),
        Line::from(""),
    ];

    for (label, value) in IMAGE_ANALYSIS_FINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!("  • {}: ", label), Style::default().fg(Theme::TYPE)),
            Span::styled((*value).to_string(), Theme::normal()),
        ]));
    }
    lines
}

fn link_lines(demo: &DemoState) -> Vec<Line<'static>> {
    let project = &demo.project;
    vec![
        heading(format!(" {}", project.name)),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", project.description),
            Theme::normal(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Tech stack: ", Theme::muted()),
            Span::styled(
                project.tech_stack.clone(),
                Style::default().fg(Theme::KEYWORD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", project.link),
            Style::default()
                .fg(Theme::MARKDOWN_ICON)
                .add_modifier(Modifier::UNDERLINED),
        )),
    ]
}

/// Render the help overlay
fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let popup_width = percent_of(area.width, 60).clamp(20.min(area.width), 60);
    let popup_height = (HELP_KEYS.len() as u16 + 2).min(area.height);
    let popup_area = Rect::new(
        (area.width.saturating_sub(popup_width)) / 2,
        (area.height.saturating_sub(popup_height)) / 2,
        popup_width,
        popup_height,
    );

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let text: Vec<Line> = HELP_KEYS
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {:12}", key), Style::default().fg(Theme::TYPE)),
                Span::raw(*desc),
            ])
        })
        .collect();

    let help = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::FOLDER_ICON)),
        )
        .style(Style::default().bg(Theme::SURFACE).fg(Theme::ON_SURFACE));

    frame.render_widget(help, popup_area);
}

const HELP_KEYS: &[(&str, &str)] = &[
    ("j / ↓", "Move down / scroll"),
    ("k / ↑", "Move up / scroll"),
    ("Enter / l", "Open file / toggle folder"),
    ("h", "Collapse folder / go to parent"),
    ("Tab", "Switch explorer and editor"),
    ("m", "Show or hide the explorer"),
    ("[ / ]", "Previous / next tab"),
    ("1-9", "Jump to tab"),
    ("x", "Close tab"),
    ("r", "Run project demo"),
    ("g / G", "Top / bottom"),
    ("PgUp / PgDn", "Scroll a page"),
    ("Esc", "Close overlay"),
    ("q", "Quit"),
];
