//! 预览构建器
//!
//! 为当前选中的匹配重新读取源文件，取上下各一行上下文，
//! 产出可直接渲染的显示模型。文件已不可读时退化为占位文案。

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::services::search::Match;

pub const CONTEXT_RADIUS: usize = 1;

pub const TYPE_TO_SEARCH: &str = "Start typing to search!\n\nResults will appear here in real time.";
pub const NO_MATCHES: &str = "No matches found\n\nTry a different search term!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    /// 1 起始的行号
    pub number: usize,
    pub text: String,
    /// 是否为命中行本身（渲染时高亮区分）
    pub is_match: bool,
}

/// 预览面板的显示模型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Placeholder(&'static str),
    Context {
        path: PathBuf,
        line: usize,
        /// (当前序号, 总数)，从 1 起
        position: (usize, usize),
        lines: Vec<PreviewLine>,
    },
}

impl Preview {
    pub fn type_to_search() -> Self {
        Preview::Placeholder(TYPE_TO_SEARCH)
    }

    pub fn no_matches() -> Self {
        Preview::Placeholder(NO_MATCHES)
    }
}

/// 构建 `m` 的上下文预览；`position` 为该匹配在结果集中的 (序号, 总数)
pub fn build_preview(root: &Path, m: &Match, position: (usize, usize)) -> Preview {
    let source = root.join(&m.path);
    let mut lines = file_context(&source, m.line, CONTEXT_RADIUS);

    if lines.is_empty() {
        // 文件自搜索以来被删除或截短：退回到搜索时记录的行文本
        if source.exists() {
            lines.push(PreviewLine {
                number: m.line,
                text: m.content.clone(),
                is_match: true,
            });
        } else {
            return Preview::no_matches();
        }
    }

    Preview::Context {
        path: m.path.clone(),
        line: m.line,
        position,
        lines,
    }
}

/// 读取 `[target - radius, target + radius]` 范围内的行，下界箝位到 1
fn file_context(path: &Path, target: usize, radius: usize) -> Vec<PreviewLine> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };

    let start = target.saturating_sub(radius).max(1);
    let end = target + radius;
    let mut lines = Vec::new();

    let reader = BufReader::new(file);
    for (idx, line) in reader.lines().enumerate() {
        let number = idx + 1;
        if number > end {
            break;
        }
        // 编码损坏的上下文行跳过，不影响窗口里的其他行
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };
        if number >= start {
            lines.push(PreviewLine {
                number,
                text: line,
                is_match: number == target,
            });
        }
    }

    lines
}
