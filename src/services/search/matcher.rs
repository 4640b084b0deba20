//! 单文件行匹配器
//!
//! 逐行读取文件做纯子串匹配，每个文件最多返回 PER_FILE_CAP 条。
//! 大小写不敏感模式下，模式与候选行都先做小写折叠再比较。

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use memchr::memmem::Finder;

use super::{Match, SearchOptions, PER_FILE_CAP};

/// 在 `path` 的内容中查找 `pattern` 的出现行
///
/// 不可读的文件返回空集合而不是错误；行号从 1 起计数，
/// 每读一行递增一次，与是否命中无关。
pub fn match_lines(pattern: &str, path: &Path, options: SearchOptions) -> Vec<Match> {
    let mut results = Vec::new();
    if pattern.is_empty() {
        return results;
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return results,
    };

    let needle = if options.case_insensitive {
        pattern.to_lowercase()
    } else {
        pattern.to_string()
    };
    let finder = Finder::new(needle.as_bytes());

    let reader = BufReader::new(file);
    for (idx, line) in reader.lines().enumerate() {
        if results.len() >= PER_FILE_CAP {
            break;
        }

        // 编码损坏的行跳过，继续读后面的行
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };

        let hit = if options.case_insensitive {
            finder.find(line.to_lowercase().as_bytes()).is_some()
        } else {
            finder.find(line.as_bytes()).is_some()
        };

        if hit {
            results.push(Match {
                path: path.to_path_buf(),
                line: idx + 1,
                content: line,
            });
        }
    }

    results
}
