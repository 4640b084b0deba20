//! 子串搜索服务
//!
//! 面向工作目录的有界增量搜索：
//! - classify: 文件分类（排除目录、二进制探测）
//! - matcher: 单文件逐行匹配，每文件上限 5 条
//! - walker: 目录遍历与全局上限控制

pub mod classify;
pub mod matcher;
pub mod walker;

use std::path::PathBuf;

pub use walker::search;

/// 每个文件最多贡献的匹配数，与全局上限无关
pub const PER_FILE_CAP: usize = 5;

/// 交互模式使用的全局匹配上限
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// 一处子串匹配，产生后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// 相对搜索根目录的路径
    pub path: PathBuf,
    /// 1 起始的行号
    pub line: usize,
    /// 匹配时刻的整行文本
    pub content: String,
}

/// 单次搜索的配置，按值传入，搜索期间不变
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub case_insensitive: bool,
    /// `Some(n)` 为硬上限，`None` 为不限制（一次性 CLI 模式）
    pub max_results: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            max_results: Some(DEFAULT_MAX_RESULTS),
        }
    }
}
