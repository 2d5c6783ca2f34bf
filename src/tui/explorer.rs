//! Explorer pane: the flattened content tree

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::content::TreeRow;
use crate::tui::app::{App, Focus};
use crate::tui::theme::{icons, Theme};

/// Columns of indentation per tree level
const INDENT: usize = 2;

/// Render the explorer into `area`
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.effective_focus() == Focus::Explorer;
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Theme::border(focused))
        .style(Style::default().bg(Theme::SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

    let title = Paragraph::new(Line::from(vec![
        Span::raw(" EXPLORER"),
        Span::styled(format!("  {}", app.session.profile().name), Theme::muted()),
    ]))
    .style(Theme::header());
    frame.render_widget(title, header);

    let rows = app.session.rows();
    let height = usize::from(body.height);
    let offset = visible_offset(app.explorer_offset.get(), app.explorer.selected, height);
    app.explorer_offset.set(offset);

    {
        let mut hits = app.hits.borrow_mut();
        hits.explorer = Some(body);
        hits.explorer_offset = offset;
    }

    let active = app.session.active_id();
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(index, row)| {
            let style = if index == app.explorer.selected {
                if focused {
                    Theme::selected_focused()
                } else {
                    Theme::selected()
                }
            } else if Some(row.node.id()) == active {
                Theme::normal().add_modifier(Modifier::BOLD)
            } else {
                Theme::normal()
            };
            row_line(row, usize::from(body.width)).style(style)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), body);
}

/// First row to draw so that `selected` stays on screen
fn visible_offset(offset: usize, selected: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    if selected < offset {
        selected
    } else if selected >= offset + height {
        selected + 1 - height
    } else {
        offset
    }
}

/// One explorer row: indentation, expansion arrow, icon, name
fn row_line(row: &TreeRow, width: usize) -> Line<'static> {
    let node = &row.node;
    let (icon, color) = Theme::icon(node);
    let arrow = if node.is_folder() {
        if node.is_expanded() {
            icons::EXPANDED
        } else {
            icons::COLLAPSED
        }
    } else {
        " "
    };

    let mut spans = vec![
        Span::raw(format!(" {}", " ".repeat(row.depth * INDENT))),
        Span::styled(format!("{} ", arrow), Theme::muted()),
        Span::styled(format!("{} ", icon), Style::default().fg(color)),
        Span::raw(node.name().to_string()),
    ];

    if node.project().is_some() {
        let used: usize = spans.iter().map(|s| s.width()).sum();
        let pad = width.saturating_sub(used + 2);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(
            icons::RUN.to_string(),
            Style::default().fg(Theme::NUMBER),
        ));
    }

    Line::from(spans)
}
