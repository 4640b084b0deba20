//! 外部编辑器启动
//!
//! fire-and-forget：子进程 spawn 后立即丢弃句柄，从不等待，
//! 启动失败只记日志，不影响会话收尾。

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// 打开 `path` 的第 `line` 行
///
/// PATH 上有 `code` 时用 `code -g path:line` 精确跳行，
/// 否则退回平台默认的文件打开方式；未知平台返回错误。
pub fn open_in_editor(path: &Path, line: usize) -> io::Result<()> {
    let mut command = editor_command(path, line)?;
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    match command.spawn() {
        Ok(child) => {
            // 不 join：子进程存活与否不关本进程的事
            drop(child);
            Ok(())
        }
        Err(err) => {
            tracing::warn!(%err, path = %path.display(), "editor launch failed");
            Err(err)
        }
    }
}

fn editor_command(path: &Path, line: usize) -> io::Result<Command> {
    if which::which("code").is_ok() {
        let mut cmd = Command::new("code");
        cmd.arg("-g").arg(goto_arg(path, line));
        return Ok(cmd);
    }

    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        Ok(cmd)
    } else if cfg!(target_os = "linux") {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        Ok(cmd)
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        Ok(cmd)
    } else {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "no file opener known for this platform",
        ))
    }
}

/// `code -g` 接受的 `path:line` 跳转参数
fn goto_arg(path: &Path, line: usize) -> String {
    format!("{}:{}", path.display(), line)
}
