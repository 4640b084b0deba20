//! glint - 交互式增量代码搜索
//!
//! 模块结构：
//! - services: 搜索服务（分类、行匹配、目录遍历）
//! - session: 会话状态机（选中、滚动窗口、模式切换、预览）
//! - preview: 上下文预览构建
//! - tui: 终端交互层（事件循环、渲染、终端守卫）
//! - cli: 一次性非交互输出模式
//! - editor: 外部编辑器启动

pub mod cli;
pub mod editor;
pub mod logging;
pub mod preview;
pub mod services;
pub mod session;
pub mod tui;
