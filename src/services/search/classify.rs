//! 文件分类器
//!
//! 判断一个目录项是否参与文本搜索：
//! - 固定的排除目录列表（版本控制、依赖、构建产物）
//! - 已知二进制扩展名（大小写不敏感）
//! - 兜底：读取文件前 256 字节，出现 NUL 字节视为二进制

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 整棵子树被剪枝的目录名
const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    ".vscode",
    ".idea",
    "node_modules",
    "target",
    "build",
    "dist",
];

/// 按扩展名直接判定为二进制的文件
const BINARY_EXTS: &[&str] = &[
    "exe", "dll", "so", "dylib", "a", "o", // 可执行 / 目标文件
    "jpg", "jpeg", "png", "gif", "bmp", "ico", // 图片
    "pdf", "zip", "tar", "gz", "7z", // 文档 / 压缩包
    "mp3", "mp4", "avi", "mov", // 音视频
];

const SNIFF_LEN: usize = 256;

pub fn is_excluded_dir(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name)
}

/// 文件是否应按二进制处理（从而不参与搜索）
///
/// 读取失败时按二进制处理：分类失败不允许中断整个遍历
pub fn is_binary_file(path: &Path) -> bool {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let ext = ext.to_ascii_lowercase();
        if BINARY_EXTS.contains(&ext.as_str()) {
            return true;
        }
    }

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return true,
    };

    let mut buf = [0u8; SNIFF_LEN];
    let mut filled = 0usize;
    while filled < SNIFF_LEN {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(_) => return true,
        }
    }

    buf[..filled].contains(&0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_excluded_dirs() {
        assert!(is_excluded_dir(".git"));
        assert!(is_excluded_dir("node_modules"));
        assert!(is_excluded_dir("target"));
        assert!(!is_excluded_dir("src"));
        assert!(!is_excluded_dir("docs"));
    }

    #[test]
    fn test_binary_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.PNG");
        fs::write(&path, "not really an image").unwrap();

        // 扩展名判定不看内容，大小写不敏感
        assert!(is_binary_file(&path));
    }

    #[test]
    fn test_nul_sniff() {
        let dir = tempdir().unwrap();
        let binary = dir.path().join("blob.dat");
        let text = dir.path().join("notes.dat");

        fs::write(&binary, b"hello\x00world").unwrap();
        fs::write(&text, "hello world").unwrap();

        assert!(is_binary_file(&binary));
        assert!(!is_binary_file(&text));
    }

    #[test]
    fn test_nul_outside_sniff_window() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("late_nul.dat");

        let mut content = vec![b'a'; 300];
        content.push(0);
        fs::write(&path, &content).unwrap();

        // NUL 在前 256 字节之外，按文本处理
        assert!(!is_binary_file(&path));
    }

    #[test]
    fn test_missing_file_is_binary() {
        let dir = tempdir().unwrap();
        assert!(is_binary_file(&dir.path().join("gone.txt")));
    }
}
