//! 会话状态机
//!
//! 持有查询、匹配模式、结果集、选中项、滚动窗口与派生预览。
//! 所有变化由离散的用户意图驱动；只有 QueryChanged 和 ToggleMode
//! 触发文件系统 I/O（同步阻塞的重新搜索），其余转移纯粹基于已
//! 持有的结果计算。
//!
//! 不变量：
//! - 结果非空时 `0 <= selected < results.len()`，为空时 selected == 0
//! - `scroll <= selected < scroll + VISIBLE_ITEMS`（选中项始终可见）
//! - `results` 总是最近一次 `(query, mode)` 搜索的完整输出

use std::path::{Path, PathBuf};

use crate::preview::{self, Preview};
use crate::services::search::{self, Match, SearchOptions};

/// 结果列表一屏可见的条目数
pub const VISIBLE_ITEMS: usize = 6;

/// 离散用户意图
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    QueryChanged(String),
    ToggleMode,
    NavigateUp,
    NavigateDown,
    Confirm,
    Quit,
}

/// 一次转移要求调用方执行的外部效果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    None,
    /// 在外部编辑器中打开并结束会话
    Open { path: PathBuf, line: usize },
    Quit,
}

pub struct SessionState {
    root: PathBuf,
    query: String,
    case_insensitive: bool,
    results: Vec<Match>,
    selected: usize,
    scroll: usize,
    status: Option<String>,
    preview: Preview,
}

impl SessionState {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            query: String::new(),
            case_insensitive: true,
            results: Vec::new(),
            selected: 0,
            scroll: 0,
            status: None,
            preview: Preview::type_to_search(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn results(&self) -> &[Match] {
        &self.results
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// 应用一次意图，返回要求调用方执行的效果
    pub fn apply(&mut self, intent: Intent) -> Transition {
        match intent {
            Intent::QueryChanged(text) => {
                self.query = text;
                self.refresh_results();
                Transition::None
            }
            Intent::ToggleMode => {
                self.case_insensitive = !self.case_insensitive;
                if !self.query.is_empty() {
                    self.refresh_results();
                }
                let mode = if self.case_insensitive {
                    "CASE-INSENSITIVE"
                } else {
                    "CASE-SENSITIVE"
                };
                self.status = Some(format!("Switched to {mode} mode"));
                Transition::None
            }
            Intent::NavigateUp => {
                self.status = None;
                if !self.results.is_empty() && self.selected > 0 {
                    self.selected -= 1;
                    self.adjust_scroll();
                    self.rebuild_preview();
                }
                Transition::None
            }
            Intent::NavigateDown => {
                self.status = None;
                if !self.results.is_empty() && self.selected + 1 < self.results.len() {
                    self.selected += 1;
                    self.adjust_scroll();
                    self.rebuild_preview();
                }
                Transition::None
            }
            Intent::Confirm => match self.results.get(self.selected) {
                Some(m) => Transition::Open {
                    path: self.root.join(&m.path),
                    line: m.line,
                },
                None => Transition::None,
            },
            Intent::Quit => Transition::Quit,
        }
    }

    /// 按当前 `(query, mode)` 重新搜索，整体替换结果集
    fn refresh_results(&mut self) {
        self.selected = 0;
        self.scroll = 0;
        self.status = None;

        if self.query.is_empty() {
            self.results.clear();
            self.preview = Preview::type_to_search();
            return;
        }

        let options = SearchOptions {
            case_insensitive: self.case_insensitive,
            ..SearchOptions::default()
        };
        self.results = search::search(&self.query, &self.root, options);
        tracing::debug!(query = %self.query, results = self.results.len(), "results replaced");
        self.rebuild_preview();
    }

    fn rebuild_preview(&mut self) {
        self.preview = match self.results.get(self.selected) {
            Some(m) => {
                preview::build_preview(&self.root, m, (self.selected + 1, self.results.len()))
            }
            None => Preview::no_matches(),
        };
    }

    /// 选中项变化后重新箝位滚动偏移，保证选中项落在可见窗口内
    fn adjust_scroll(&mut self) {
        if self.selected >= self.scroll + VISIBLE_ITEMS {
            self.scroll = self.selected + 1 - VISIBLE_ITEMS;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        }
    }
}
