//! 服务层模块
//!
//! - search: 有界目录子串搜索

pub mod search;

pub use search::{Match, SearchOptions};
