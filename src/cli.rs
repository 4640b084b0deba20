//! 一次性 CLI 模式
//!
//! 搜索一次并按 `path:line: content` 逐行输出；该模式不设全局上限。
//! 无论是否有匹配，进程都以 0 退出。

use std::io::{self, Write};
use std::path::Path;

use crate::services::search::{self, Match, SearchOptions};

pub fn run(term: &str, root: &Path, case_insensitive: bool) -> io::Result<()> {
    let options = SearchOptions {
        case_insensitive,
        max_results: None,
    };
    let results = search::search(term, root, options);

    let stdout = io::stdout();
    render(&mut stdout.lock(), &results)
}

fn render(out: &mut impl Write, results: &[Match]) -> io::Result<()> {
    for m in results {
        writeln!(out, "{}:{}: {}", m.path.display(), m.line, m.content)?;
    }
    if results.is_empty() {
        writeln!(out, "No matches found")?;
    }
    Ok(())
}
