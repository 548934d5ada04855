//! 按行拼接 SQL 文本的工具：每个子句块以换行结尾，嵌套内容按缩进级别右移。

/// 默认的单级缩进（四个空格）。
pub const DEFAULT_INDENT: &str = "    ";

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    /// 写入一行并追加换行。
    pub(crate) fn write_line(&mut self, s: &str) {
        self.buf.push_str(s);
        self.buf.push('\n');
    }

    /// 写入 `header` 行，随后每个 item 缩进一级，item 之间用 `sep` 连接（`sep` 写在上一项行尾）。
    ///
    /// 空 item 会被跳过；没有任何 item 时什么也不写。
    pub(crate) fn write_block(&mut self, header: &str, items: &[String], sep: &str, indent: &str) {
        let items: Vec<&String> = items.iter().filter(|s| !s.is_empty()).collect();
        if items.is_empty() {
            return;
        }
        self.write_line(header);
        let last = items.len() - 1;
        for (i, item) in items.into_iter().enumerate() {
            self.buf.push_str(&reindent(item, indent));
            if i < last {
                self.buf.push_str(sep);
            }
            self.buf.push('\n');
        }
    }

    /// 写入 `keyword rest` 行；`rest` 为空时只写 `keyword`，不留尾随空格。
    pub(crate) fn write_head(&mut self, keyword: &str, rest: &str) {
        if rest.is_empty() {
            self.write_line(keyword);
        } else {
            self.write_line(&format!("{keyword} {rest}"));
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

/// 把多行文本整体右移一级：去掉末尾换行，每个非空行前加 `indent`。
pub fn reindent(text: &str, indent: &str) -> String {
    text.trim_end_matches('\n')
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 用括号包住一个嵌套语句，内容右移一级：`(\n    ...\n)`。
pub(crate) fn parenthesize(text: &str, indent: &str) -> String {
    format!("(\n{}\n)", reindent(text, indent))
}

#[cfg(test)]
mod tests {
    use super::{StringBuilder, parenthesize, reindent};
    use pretty_assertions::assert_eq;

    #[test]
    fn reindent_shifts_every_line() {
        assert_eq!(reindent("SELECT\n    *\n", "  "), "  SELECT\n      *");
        assert_eq!(reindent("a\n\nb", "--"), "--a\n\n--b");
    }

    #[test]
    fn parenthesize_nested_text() {
        assert_eq!(parenthesize("SELECT\n    *\n", "    "), "(\n    SELECT\n        *\n)");
    }

    #[test]
    fn write_block_skips_empty_items() {
        let mut buf = StringBuilder::new();
        buf.write_block("ORDER BY", &[], ",", "    ");
        buf.write_block(
            "GROUP BY",
            &["a".to_string(), String::new(), "b".to_string()],
            ",",
            "    ",
        );
        assert_eq!(buf.into_string(), "GROUP BY\n    a,\n    b\n");
    }

    #[test]
    fn write_head_without_rest_has_no_trailing_space() {
        let mut buf = StringBuilder::new();
        buf.write_head("INSERT INTO", "");
        buf.write_head("UPDATE", "users");
        assert_eq!(buf.into_string(), "INSERT INTO\nUPDATE users\n");
    }
}
