//! Light markdown styling for `.md` documents
//!
//! Not a real markdown parser: every source line maps to exactly one styled
//! line, so the editor's line numbers stay aligned with the file.

use once_cell::sync::Lazy;
use ratatui::prelude::*;
use regex::Regex;

use crate::tui::theme::Theme;

static HTML_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Style every line of a markdown body
pub fn markdown_lines(input: &str) -> Vec<Line<'static>> {
    let mut in_code_block = false;

    input
        .lines()
        .map(|line| {
            let line = HTML_TAG_REGEX.replace_all(line, "");
            if line.trim_start().starts_with("```") {
                in_code_block = !in_code_block;
                return fence_line(line.trim());
            }
            if in_code_block {
                return Line::from(Span::styled(line.to_string(), code_style()));
            }
            parse_markdown_line(&line)
        })
        .collect()
}

fn code_style() -> Style {
    Style::default().fg(Theme::STRING).bg(Theme::SURFACE)
}

fn fence_line(fence: &str) -> Line<'static> {
    let lang = fence.trim_start_matches('`').trim();
    let label = if lang.is_empty() { "code" } else { lang };
    Line::from(Span::styled(
        format!("───── {} ─────", label),
        Theme::muted(),
    ))
}

/// Parse a single line of markdown into a styled Line
fn parse_markdown_line(line: &str) -> Line<'static> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Line::from("");
    }

    // Horizontal rule (---, ___, ***)
    if is_horizontal_rule(trimmed) {
        return Line::from(Span::styled("─".repeat(40), Theme::muted()));
    }

    if let Some((level, content)) = parse_header(trimmed) {
        let style = match level {
            1 => Style::default()
                .fg(Theme::KEYWORD)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            2 => Style::default()
                .fg(Theme::KEYWORD)
                .add_modifier(Modifier::BOLD),
            _ => Style::default()
                .fg(Theme::TYPE)
                .add_modifier(Modifier::BOLD),
        };
        return Line::from(Span::styled(content.to_string(), style));
    }

    // List items keep their nesting
    if let Some(content) = parse_list_item(trimmed) {
        let indent = " ".repeat(line.len() - line.trim_start().len());
        let mut spans = vec![Span::styled(
            format!("{}  • ", indent),
            Style::default().fg(Theme::FOLDER_ICON),
        )];
        spans.extend(parse_inline_spans(content));
        return Line::from(spans);
    }

    if let Some(content) = trimmed.strip_prefix('>') {
        return Line::from(vec![
            Span::styled("│ ", Theme::muted()),
            Span::styled(
                content.trim().to_string(),
                Theme::muted().add_modifier(Modifier::ITALIC),
            ),
        ]);
    }

    Line::from(parse_inline_spans(trimmed))
}

/// Check if line is a horizontal rule
fn is_horizontal_rule(line: &str) -> bool {
    let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.len() < 3 {
        return false;
    }
    let first = chars[0];
    (first == '-' || first == '_' || first == '*') && chars.iter().all(|&c| c == first)
}

/// Parse a header line, returns (level, content)
fn parse_header(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }

    // Must have space after #
    if !line[level..].starts_with(' ') {
        return None;
    }

    Some((level, line[level..].trim()))
}

/// Parse a list item, returns the content without the marker
fn parse_list_item(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some(rest);
    }

    // Numbered list (1. 2. etc.)
    let num_len = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if num_len > 0 && line[num_len..].starts_with(". ") {
        return Some(&line[num_len + 2..]);
    }

    None
}

/// Parse inline formatting (bold, italic, code, links)
fn parse_inline_spans(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            // Bold (**text**)
            '*' if chars.peek() == Some(&'*') => {
                flush(&mut spans, &mut current);
                chars.next();
                let bold_text = consume_until(&mut chars, "**");
                spans.push(Span::styled(
                    bold_text,
                    Theme::normal().add_modifier(Modifier::BOLD),
                ));
            }
            // Italic (*text* or _text_), but not snake_case words
            '*' | '_' if current.is_empty() || current.ends_with(' ') => {
                flush(&mut spans, &mut current);
                let italic_text = consume_until_char(&mut chars, c);
                spans.push(Span::styled(
                    italic_text,
                    Theme::normal().add_modifier(Modifier::ITALIC),
                ));
            }
            '`' => {
                flush(&mut spans, &mut current);
                let code_text = consume_until_char(&mut chars, '`');
                spans.push(Span::styled(code_text, code_style()));
            }
            // Link [text](url) - just show text
            '[' => {
                flush(&mut spans, &mut current);
                let link_text = consume_until_char(&mut chars, ']');
                if chars.peek() == Some(&'(') {
                    chars.next();
                    consume_until_char(&mut chars, ')');
                }
                spans.push(Span::styled(
                    link_text,
                    Style::default()
                        .fg(Theme::MARKDOWN_ICON)
                        .add_modifier(Modifier::UNDERLINED),
                ));
            }
            _ => current.push(c),
        }
    }

    flush(&mut spans, &mut current);
    if spans.is_empty() {
        spans.push(Span::raw(""));
    }

    spans
}

fn flush(spans: &mut Vec<Span<'static>>, current: &mut String) {
    if !current.is_empty() {
        spans.push(Span::styled(std::mem::take(current), Theme::normal()));
    }
}

/// Consume characters until we hit the delimiter string
fn consume_until(chars: &mut std::iter::Peekable<std::str::Chars>, delimiter: &str) -> String {
    let mut result = String::new();
    let delim_chars: Vec<char> = delimiter.chars().collect();

    while let Some(&c) = chars.peek() {
        if delim_chars.len() == 2 && c == delim_chars[0] {
            chars.next();
            if chars.peek() == Some(&delim_chars[1]) {
                chars.next();
                break;
            } else {
                result.push(c);
            }
        } else if delim_chars.len() == 1 && c == delim_chars[0] {
            chars.next();
            break;
        } else {
            result.push(c);
            chars.next();
        }
    }
    result
}

/// Consume characters until we hit a single delimiter character
fn consume_until_char(chars: &mut std::iter::Peekable<std::str::Chars>, delimiter: char) -> String {
    let mut result = String::new();
    while let Some(&c) = chars.peek() {
        chars.next();
        if c == delimiter {
            break;
        }
        result.push(c);
    }
    result
}
