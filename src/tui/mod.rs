//! TUI 集成层（crossterm + ratatui）
//!
//! 事件循环：阻塞读取按键 → 翻译成用户意图 → 应用到会话状态
//! → 整帧重绘。QueryChanged/ToggleMode 中的重新搜索同步阻塞在
//! 循环里，这是刻意的简化（不做进行中搜索的取消）。

pub mod input;
pub mod terminal_guard;
pub mod view;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::editor;
use crate::session::{Intent, SessionState, Transition};
use input::QueryInput;
use terminal_guard::TerminalGuard;
use view::StyleSheet;

/// 运行交互式会话，直到用户退出或打开某个匹配
pub fn run(root: &Path) -> io::Result<()> {
    let guard = TerminalGuard::new()?;
    #[cfg(unix)]
    terminal_guard::install_termination_signals(guard.restorer())?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut state = SessionState::new(root);
    let mut query = QueryInput::new();
    let styles = StyleSheet::default();

    loop {
        terminal.draw(|frame| view::render(frame, &state, &query, &styles))?;

        let event = event::read()?;
        let Some(intent) = intent_from_event(event, &mut query) else {
            continue;
        };

        match state.apply(intent) {
            Transition::None => {}
            Transition::Open { path, line } => {
                // 启动失败不上报，会话照常结束
                let _ = editor::open_in_editor(&path, line);
                break;
            }
            Transition::Quit => break,
        }
    }

    drop(terminal);
    guard.restorer().restore()
}

/// 把一个终端事件翻译成用户意图；纯编辑动作（光标移动）
/// 只更新输入行，不产生意图
fn intent_from_event(event: Event, query: &mut QueryInput) -> Option<Intent> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind == KeyEventKind::Release {
        return None;
    }
    intent_from_key(key, query)
}

fn intent_from_key(key: KeyEvent, query: &mut QueryInput) -> Option<Intent> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => Some(Intent::Quit),
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
            Some(Intent::NavigateUp)
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::CONTROL) => {
            Some(Intent::NavigateDown)
        }
        (KeyCode::Enter, _) => Some(Intent::Confirm),
        // 终端无法区分 Ctrl+I 和 Tab，两者都切换大小写模式
        (KeyCode::Tab, _) | (KeyCode::Char('i'), KeyModifiers::CONTROL) => {
            Some(Intent::ToggleMode)
        }
        (KeyCode::Backspace, _) => query
            .delete_backward()
            .then(|| Intent::QueryChanged(query.text().to_string())),
        (KeyCode::Left, _) => {
            query.cursor_left();
            None
        }
        (KeyCode::Right, _) => {
            query.cursor_right();
            None
        }
        (KeyCode::Char(c), mods) if mods.is_empty() || mods == KeyModifiers::SHIFT => {
            query.insert(c);
            Some(Intent::QueryChanged(query.text().to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_typing_emits_query_changed() {
        let mut query = QueryInput::new();

        let intent = intent_from_key(key(KeyCode::Char('h'), KeyModifiers::NONE), &mut query);
        assert_eq!(intent, Some(Intent::QueryChanged("h".to_string())));

        let intent = intent_from_key(key(KeyCode::Char('i'), KeyModifiers::NONE), &mut query);
        assert_eq!(intent, Some(Intent::QueryChanged("hi".to_string())));
    }

    #[test]
    fn test_backspace() {
        let mut query = QueryInput::new();
        query.insert('a');

        let intent = intent_from_key(key(KeyCode::Backspace, KeyModifiers::NONE), &mut query);
        assert_eq!(intent, Some(Intent::QueryChanged(String::new())));

        // 空输入上退格不触发重新搜索
        let intent = intent_from_key(key(KeyCode::Backspace, KeyModifiers::NONE), &mut query);
        assert_eq!(intent, None);
    }

    #[test]
    fn test_navigation_keys() {
        let mut query = QueryInput::new();

        assert_eq!(
            intent_from_key(key(KeyCode::Up, KeyModifiers::NONE), &mut query),
            Some(Intent::NavigateUp)
        );
        assert_eq!(
            intent_from_key(key(KeyCode::Char('j'), KeyModifiers::CONTROL), &mut query),
            Some(Intent::NavigateDown)
        );
        assert_eq!(
            intent_from_key(key(KeyCode::Enter, KeyModifiers::NONE), &mut query),
            Some(Intent::Confirm)
        );
    }

    #[test]
    fn test_toggle_and_quit_keys() {
        let mut query = QueryInput::new();

        assert_eq!(
            intent_from_key(key(KeyCode::Tab, KeyModifiers::NONE), &mut query),
            Some(Intent::ToggleMode)
        );
        assert_eq!(
            intent_from_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut query),
            Some(Intent::Quit)
        );
        assert_eq!(
            intent_from_key(key(KeyCode::Esc, KeyModifiers::NONE), &mut query),
            Some(Intent::Quit)
        );
    }

    #[test]
    fn test_cursor_movement_emits_nothing() {
        let mut query = QueryInput::new();
        query.insert('a');

        assert_eq!(
            intent_from_key(key(KeyCode::Left, KeyModifiers::NONE), &mut query),
            None
        );
        assert_eq!(
            intent_from_key(key(KeyCode::Right, KeyModifiers::NONE), &mut query),
            None
        );
    }

    #[test]
    fn test_q_is_a_query_character() {
        let mut query = QueryInput::new();
        let intent = intent_from_key(key(KeyCode::Char('q'), KeyModifiers::NONE), &mut query);
        assert_eq!(intent, Some(Intent::QueryChanged("q".to_string())));
    }
}
