//! 查询输入行
//!
//! 单行文本编辑：插入、退格、光标左右移动。
//! cursor 为字节偏移，任何操作后都落在字符边界上。

#[derive(Debug, Default)]
pub struct QueryInput {
    text: String,
    cursor: usize,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 光标前的字符数，供渲染定位
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// 删除光标前一个字符；有删除发生返回 true
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let mut prev = self.cursor - 1;
        while prev > 0 && !self.text.is_char_boundary(prev) {
            prev -= 1;
        }
        self.text.remove(prev);
        self.cursor = prev;
        true
    }

    pub fn cursor_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut pos = self.cursor - 1;
        while pos > 0 && !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        self.cursor = pos;
    }

    pub fn cursor_right(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        let mut pos = self.cursor + 1;
        while pos < self.text.len() && !self.text.is_char_boundary(pos) {
            pos += 1;
        }
        self.cursor = pos;
    }
}
