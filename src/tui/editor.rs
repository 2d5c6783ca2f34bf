//! Editor pane: tab bar, file header, document body and welcome screen

use std::sync::Arc;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::content::{ContentNode, DocumentFormat};
use crate::core::highlight::{tokenize, Token};
use crate::tui::app::App;
use crate::tui::markdown::markdown_lines;
use crate::tui::theme::{icons, Theme};

const RUN_LABEL: &str = " ▶ Run ";

/// Render the editor into `area`
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(
        Block::default().style(Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    let Some(node) = app.session.active_node().cloned() else {
        render_welcome(frame, area, app);
        return;
    };

    let [tabs, header, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    render_tab_bar(frame, tabs, app);
    render_file_header(frame, header, app, &node);
    render_body(frame, body, app, &node);
}

fn render_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(
        Block::default().style(Style::default().bg(Theme::SURFACE_VARIANT)),
        area,
    );

    let mut hits = app.hits.borrow_mut();
    let mut spans = Vec::new();
    let mut x = area.x;
    let right = area.x + area.width;

    for tab in app.session.tabs() {
        let (icon, color) = Theme::icon(&tab.node);
        let style = Theme::tab(tab.active);
        let label = [
            Span::styled(format!(" {} ", icon), style.fg(color)),
            Span::styled(format!("{} ", tab.node.name()), style),
            Span::styled(format!("{} ", icons::CLOSE), style.fg(Theme::MUTED)),
        ];
        let width: u16 = label.iter().map(|s| s.width() as u16).sum();
        if x + width > right {
            break;
        }

        hits.tabs.push((Rect::new(x, area.y, width, 1), tab.id()));
        hits.tab_close.push((Rect::new(x + width - 2, area.y, 2, 1), tab.id()));

        spans.extend(label);
        spans.push(Span::styled("│", Style::default().fg(Theme::TAB_BORDER)));
        x += width + 1;
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_file_header(frame: &mut Frame, area: Rect, app: &App, node: &Arc<ContentNode>) {
    let (icon, color) = Theme::icon(node);
    let path = app
        .session
        .path_of(node.id())
        .unwrap_or_else(|| node.name().to_string());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", icon), Style::default().fg(color)),
        Span::raw(path),
    ]))
    .style(Theme::header());
    frame.render_widget(header, area);

    if node.project().is_some() {
        let width = Span::raw(RUN_LABEL).width() as u16;
        if width + 1 < area.width {
            let button = Rect::new(area.x + area.width - width - 1, area.y, width, 1);
            frame.render_widget(
                Paragraph::new(RUN_LABEL).style(Theme::run_button()),
                button,
            );
            app.hits.borrow_mut().run = Some(button);
        }
    }
}

fn render_body(frame: &mut Frame, area: Rect, app: &App, node: &ContentNode) {
    app.hits.borrow_mut().editor = Some(area);

    let lines = body_lines(node);
    let height = usize::from(area.height);
    app.editor_page.set(height.saturating_sub(1).max(1));
    app.editor_max_scroll.set(lines.len().saturating_sub(height));

    let scroll = app.active_scroll().min(app.editor_max_scroll.get());
    let gutter = lines.len().max(1).to_string().len();

    let numbered: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .skip(scroll)
        .take(height)
        .map(|(index, line)| {
            let mut spans = vec![Span::styled(
                format!(" {:>width$} ", index + 1, width = gutter),
                Theme::muted(),
            )];
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(numbered), area);
}

/// Styled body lines for a document, one per source line
pub fn body_lines(node: &ContentNode) -> Vec<Line<'static>> {
    match node.format() {
        DocumentFormat::Markdown => markdown_lines(node.body()),
        DocumentFormat::Source => tokenize(node.body())
            .iter()
            .map(|tokens| highlighted_line(tokens))
            .collect(),
        DocumentFormat::Plain => node
            .body()
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), Theme::normal())))
            .collect(),
    }
}

fn highlighted_line(tokens: &[Token]) -> Line<'static> {
    Line::from(
        tokens
            .iter()
            .map(|token| Span::styled(token.text.clone(), Theme::token(token.kind)))
            .collect::<Vec<_>>(),
    )
}

/// Landing screen when no tab is active
fn render_welcome(frame: &mut Frame, area: Rect, app: &App) {
    let profile = app.session.profile();
    let hint = if app.is_compact() {
        "Press m to explore files"
    } else {
        "Select a file from the explorer to get started"
    };

    let top = area.height.saturating_sub(5) / 2;
    let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
    lines.extend([
        Line::from(Span::styled(
            profile.title(),
            Style::default()
                .fg(Theme::ON_BACKGROUND)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            profile.job_title.clone(),
            Style::default().fg(Theme::KEYWORD),
        )),
        Line::from(""),
        Line::from(Span::styled(hint, Theme::muted())),
    ]);

    let welcome = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(welcome, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::{build_tree, NodeSpec};
    use crate::core::highlight::TokenKind;

    fn document(name: &str, body: &str) -> Arc<ContentNode> {
        let tree = build_tree(&NodeSpec::folder("root", vec![NodeSpec::document(name, body)]))
            .unwrap();
        Arc::clone(&tree.children()[0])
    }

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_source_lines_are_highlighted() {
        let node = document("Main.kt", "// hello\nval answer = 42");
        let lines = body_lines(&node);

        assert_eq!(lines.len(), 2);
        assert_eq!(text_of(&lines[1]), "val answer = 42");
        assert_eq!(lines[0].spans[0].style, Theme::token(TokenKind::Comment));
        assert_eq!(lines[1].spans[0].style, Theme::token(TokenKind::Keyword));
    }

    #[test]
    fn test_markdown_and_plain_bodies() {
        let md = document("README.md", "# Hi\n- item");
        assert_eq!(text_of(&body_lines(&md)[0]), "Hi");

        let plain = document("notes.txt", "# Hi");
        assert_eq!(text_of(&body_lines(&plain)[0]), "# Hi");
    }
}
