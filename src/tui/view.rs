//! 渲染层
//!
//! 无状态渲染：输入为当前会话状态 + 查询输入行 + 固定样式表，
//! 不持有也不修改任何状态。

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::preview::Preview;
use crate::session::{SessionState, VISIBLE_ITEMS};
use crate::tui::input::QueryInput;

const HEADER_HEIGHT: u16 = 1;
const QUERY_HEIGHT: u16 = 1;
const HELP_HEIGHT: u16 = 1;
const QUERY_PROMPT: &str = "Search: ";

/// 固定样式配置，按值传入渲染函数
pub struct StyleSheet {
    pub title: Style,
    pub mode: Style,
    pub status: Style,
    pub selected: Style,
    pub counter: Style,
    pub context: Style,
    pub match_line: Style,
    pub hint: Style,
    pub help: Style,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            mode: Style::default().fg(Color::Green),
            status: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            counter: Style::default().fg(Color::DarkGray),
            context: Style::default().fg(Color::DarkGray),
            match_line: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            hint: Style::default().fg(Color::DarkGray),
            help: Style::default().fg(Color::DarkGray),
        }
    }
}

pub fn render(frame: &mut Frame, state: &SessionState, input: &QueryInput, styles: &StyleSheet) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(QUERY_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(HELP_HEIGHT),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state, styles);
    render_query(frame, chunks[1], input);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);

    render_results(frame, body[0], state, styles);
    render_preview(frame, body[1], state, styles);

    render_help(frame, chunks[3], styles);

    // 光标停在查询行的编辑位置，不越过行尾
    let offset = (QUERY_PROMPT.len() + input.cursor_column()).min(u16::MAX as usize) as u16;
    let x = chunks[1]
        .x
        .saturating_add(offset)
        .min(chunks[1].right().saturating_sub(1));
    frame.set_cursor_position((x, chunks[1].y));
}

fn render_header(frame: &mut Frame, area: Rect, state: &SessionState, styles: &StyleSheet) {
    let mode = if state.case_insensitive() {
        "CASE-INSENSITIVE"
    } else {
        "CASE-SENSITIVE"
    };

    let mut spans = vec![
        Span::styled("glint - interactive code search", styles.title),
        Span::raw("  "),
        Span::styled(format!("Mode: {mode}"), styles.mode),
    ];
    if let Some(status) = state.status() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status.to_string(), styles.status));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_query(frame: &mut Frame, area: Rect, input: &QueryInput) {
    let line = Line::from(vec![Span::raw(QUERY_PROMPT), Span::raw(input.text())]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_results(frame: &mut Frame, area: Rect, state: &SessionState, styles: &StyleSheet) {
    let block = Block::default().title("Results").borders(Borders::ALL);

    let results = state.results();
    let mut lines: Vec<Line> = Vec::new();

    if results.is_empty() {
        lines.push(Line::from(Span::styled(
            "No results yet...",
            styles.hint,
        )));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "Start typing to search!",
            styles.hint,
        )));
    } else {
        let scroll = state.scroll();
        let end = (scroll + VISIBLE_ITEMS).min(results.len());
        lines.push(Line::from(Span::styled(
            format!("Results {}-{} of {}:", scroll + 1, end, results.len()),
            styles.counter,
        )));

        if scroll > 0 {
            lines.push(Line::from(Span::styled("  ↑ more ↑", styles.counter)));
        } else {
            lines.push(Line::raw(""));
        }

        for (idx, m) in results.iter().enumerate().take(end).skip(scroll) {
            let text = format!("{}:{}", m.path.display(), m.line);
            if idx == state.selected() {
                lines.push(Line::from(Span::styled(format!("▶ {text}"), styles.selected)));
            } else {
                lines.push(Line::from(Span::raw(format!("  {text}"))));
            }
        }

        if end < results.len() {
            lines.push(Line::from(Span::styled("  ↓ more ↓", styles.counter)));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_preview(frame: &mut Frame, area: Rect, state: &SessionState, styles: &StyleSheet) {
    let block = Block::default().title("Preview").borders(Borders::ALL);

    let lines: Vec<Line> = match state.preview() {
        Preview::Placeholder(text) => text
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), styles.hint)))
            .collect(),
        Preview::Context {
            path,
            line,
            position,
            lines: context,
        } => {
            let mut out = vec![
                Line::from(Span::raw(format!("{}", path.display()))),
                Line::from(Span::styled(format!("Line {line}"), styles.counter)),
                Line::raw(""),
            ];
            for ctx in context {
                let text = format!("{:3} | {}", ctx.number, ctx.text);
                let style = if ctx.is_match {
                    styles.match_line
                } else {
                    styles.context
                };
                out.push(Line::from(Span::styled(text, style)));
            }
            out.push(Line::raw(""));
            out.push(Line::from(Span::styled(
                format!("Result {} of {}", position.0, position.1),
                styles.counter,
            )));
            out
        }
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_help(frame: &mut Frame, area: Rect, styles: &StyleSheet) {
    let help = "↑/↓ or Ctrl+K/Ctrl+J: navigate   Enter: open   Tab: toggle case   Ctrl+C: quit";
    frame.render_widget(
        Paragraph::new(Span::styled(help, styles.help)),
        area,
    );
}
