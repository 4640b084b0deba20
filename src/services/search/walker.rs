//! 目录树搜索
//!
//! 深度优先遍历搜索根目录：
//! - 同级目录项按文件名排序，保证一次运行内结果顺序可复现
//! - 排除目录整棵剪枝，二进制文件跳过
//! - 结果数达到上限后立即停止遍历，不再下探
//!
//! 单项 I/O 失败一律按"该项无匹配"处理，search 本身永不失败。

use std::path::Path;
use std::sync::Mutex;

use ignore::WalkBuilder;

use super::classify::{is_binary_file, is_excluded_dir};
use super::matcher::match_lines;
use super::{Match, SearchOptions};

/// 线程安全的有界累加器
///
/// 一次 search 调用独占一个 MatchSink；append 在内部互斥，
/// 超出容量的部分按发现顺序确定性截断。串行遍历同样适用。
pub struct MatchSink {
    cap: Option<usize>,
    inner: Mutex<Vec<Match>>,
}

impl MatchSink {
    pub fn new(cap: Option<usize>) -> Self {
        Self {
            cap,
            inner: Mutex::new(Vec::new()),
        }
    }

    /// 追加一批匹配；容量已满返回 false
    pub fn try_append(&self, batch: Vec<Match>) -> bool {
        let mut matches = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        matches.extend(batch);
        match self.cap {
            Some(cap) => {
                matches.truncate(cap);
                matches.len() < cap
            }
            None => true,
        }
    }

    pub fn is_full(&self) -> bool {
        let held = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.cap.is_some_and(|cap| held.len() >= cap)
    }

    pub fn into_matches(self) -> Vec<Match> {
        match self.inner.into_inner() {
            Ok(matches) => matches,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// 在 `root` 下搜索 `pattern`，返回有界、按发现顺序排列的结果
///
/// 同步阻塞调用；返回的路径相对于 `root`。空模式不遍历，直接返回空集。
pub fn search(pattern: &str, root: &Path, options: SearchOptions) -> Vec<Match> {
    let sink = MatchSink::new(options.max_results);
    if pattern.is_empty() {
        return sink.into_matches();
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            let excluded = entry
                .file_name()
                .to_str()
                .is_some_and(is_excluded_dir);
            !(is_dir && excluded)
        })
        .build();

    let mut files_scanned = 0usize;

    for entry in walker {
        if sink.is_full() {
            break;
        }

        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        if is_binary_file(path) {
            continue;
        }

        files_scanned += 1;
        let mut batch = match_lines(pattern, path, options);
        if batch.is_empty() {
            continue;
        }

        for m in &mut batch {
            if let Ok(rel) = m.path.strip_prefix(root) {
                m.path = rel.to_path_buf();
            }
        }

        if !sink.try_append(batch) {
            break;
        }
    }

    let results = sink.into_matches();
    tracing::debug!(
        pattern,
        files_scanned,
        matches = results.len(),
        "search finished"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn capped(cap: usize) -> SearchOptions {
        SearchOptions {
            case_insensitive: false,
            max_results: Some(cap),
        }
    }

    #[test]
    fn test_global_cap() {
        let dir = tempdir().unwrap();
        for i in 0..10 {
            let path = dir.path().join(format!("f{i:02}.txt"));
            fs::write(&path, "needle\nneedle\nneedle\n").unwrap();
        }

        let results = search("needle", dir.path(), capped(7));
        assert_eq!(results.len(), 7);
    }

    #[test]
    fn test_unbounded() {
        let dir = tempdir().unwrap();
        for i in 0..30 {
            let path = dir.path().join(format!("f{i:02}.txt"));
            fs::write(&path, "needle\nneedle\nneedle\n").unwrap();
        }

        let options = SearchOptions {
            case_insensitive: false,
            max_results: None,
        };
        assert_eq!(search("needle", dir.path(), options).len(), 90);
    }

    #[test]
    fn test_excluded_dirs_pruned() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();

        fs::write(dir.path().join(".git/config"), "needle\n").unwrap();
        fs::write(dir.path().join("node_modules/pkg.js"), "needle\n").unwrap();
        fs::write(dir.path().join("src/lib.rs"), "needle\n").unwrap();

        let results = search("needle", dir.path(), SearchOptions::default());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, PathBuf::from("src/lib.rs"));
    }

    #[test]
    fn test_binary_file_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello world\n").unwrap();
        fs::write(dir.path().join("b.bin"), b"hello\x00world").unwrap();

        let results = search("hello", dir.path(), SearchOptions::default());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, PathBuf::from("a.txt"));
    }

    #[test]
    fn test_deterministic_order() {
        let dir = tempdir().unwrap();
        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(dir.path().join(name), "needle\n").unwrap();
        }

        let first = search("needle", dir.path(), SearchOptions::default());
        let second = search("needle", dir.path(), SearchOptions::default());

        assert_eq!(first, second);
        let names: Vec<_> = first.iter().map(|m| m.path.clone()).collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
                PathBuf::from("c.txt")
            ]
        );
    }

    #[test]
    fn test_empty_pattern_returns_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "anything\n").unwrap();

        assert!(search("", dir.path(), SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_sink_truncates_overshoot() {
        let sink = MatchSink::new(Some(2));
        let batch = (1..=4)
            .map(|line| Match {
                path: PathBuf::from("a.txt"),
                line,
                content: "x".to_string(),
            })
            .collect();

        assert!(!sink.try_append(batch));
        assert!(sink.is_full());

        let matches = sink.into_matches();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line, 1);
        assert_eq!(matches[1].line, 2);
    }

    #[test]
    fn test_sink_unbounded_never_fills() {
        let sink = MatchSink::new(None);
        for line in 1..=100 {
            assert!(sink.try_append(vec![Match {
                path: PathBuf::from("a.txt"),
                line,
                content: "x".to_string(),
            }]));
        }
        assert!(!sink.is_full());
        assert_eq!(sink.into_matches().len(), 100);
    }
}
