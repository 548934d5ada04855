//! Quoter：按 token 决定是否给字段名 / 表名加方言引号。
//!
//! 不是 SQL 解析器。判断不了的输入一律原样保留，而不是猜测。
//!
//! 语句在入栈时只记录原文与当时的 quoting 开关（`Phrase`），渲染时才按语句当前的
//! Flavor 加引号，因此中途调用 `set_flavor` 不会产生混合引号。

use crate::flavor::Flavor;

/// 保持原样的比较/运算符号。
const SYMBOLS: &[&str] = &[
    "=", "<", ">", "<=", ">=", "<>", "!=", "+", "-", "*", "/", "%", "||", "?", "(", ")", ",",
];

/// 绑定标记字符：包含它的 token 视为参数 label。
const BIND_MARKER: char = ':';

/// 字符串字面量的定界符。
const STRING_QUOTE: char = '\'';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quoter {
    flavor: Flavor,
    enabled: bool,
}

impl Default for Quoter {
    fn default() -> Self {
        Self::new(Flavor::default())
    }
}

impl Quoter {
    pub fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            enabled: true,
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn set_flavor(&mut self, flavor: Flavor) {
        self.flavor = flavor;
    }

    /// 开关 quoting，返回旧值。关闭后调用方可以原样注入已经拼好的 SQL 片段。
    pub fn enable_quoting(&mut self, enabled: bool) -> bool {
        let old = self.enabled;
        self.enabled = enabled;
        old
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 记录一个字段表达式，渲染时按 `quote_field` 处理；quoting 关闭时记录为原样文本。
    pub fn field(&self, text: &str) -> Phrase {
        let segment = if self.enabled {
            Segment::Field(text.to_string())
        } else {
            Segment::Raw(text.to_string())
        };
        Phrase::from_segment(segment)
    }

    /// 记录一个表名，渲染时按 `quote_table` 处理；quoting 关闭时记录为原样文本。
    pub fn table(&self, text: &str) -> Phrase {
        let segment = if self.enabled {
            Segment::Table(text.to_string())
        } else {
            Segment::Raw(text.to_string())
        };
        Phrase::from_segment(segment)
    }

    /// 给字段表达式中的标识符加引号。
    ///
    /// - `owner.field`：逐段处理，已经是全小写的一段不加引号；
    /// - `func(args)`：只处理括号前的函数名，括号及其内容原样保留；
    /// - `(a = 1 OR B = 2)` 这类分组括号不影响括号内标识符的处理；
    /// - 单引号字符串内的内容原样保留；
    /// - 其它普通 token 整体加引号。
    ///
    /// 对已经处理过的输出再次调用不会改变结果。
    pub fn quote_field(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        // 函数调用参数的括号深度，参数内的 token 原样保留
        let mut depth = 0usize;
        map_tokens(text, |token| {
            if depth > 0 {
                depth = paren_depth(depth, token);
                return token.to_string();
            }
            let out = self.quote_field_token(token);
            if !token.contains(STRING_QUOTE) {
                let rest = token.trim_start_matches('(');
                if rest.find('(').is_some_and(|i| i > 0) {
                    depth = paren_depth(0, rest);
                }
            }
            out
        })
    }

    /// 给表名加引号：全小写的 token 保持原样，其余按 `.` 分段加引号。
    pub fn quote_table(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        map_tokens(text, |token| self.quote_table_token(token))
    }

    fn quote_field_token(&self, token: &str) -> String {
        if self.is_literal_token(token) {
            return token.to_string();
        }

        // 尾随逗号保持在引号外侧
        let trimmed = token.trim_end_matches(',');
        if trimmed.len() < token.len() {
            if trimmed.is_empty() {
                return token.to_string();
            }
            return format!(
                "{}{}",
                self.quote_field_token(trimmed),
                &token[trimmed.len()..]
            );
        }

        // 分组用的左括号
        let inner = token.trim_start_matches('(');
        if inner.len() < token.len() {
            if inner.is_empty() {
                return token.to_string();
            }
            return format!(
                "{}{}",
                &token[..token.len() - inner.len()],
                self.quote_field_token(inner)
            );
        }

        let (open, close) = self.flavor.field_quotes();
        if let Some(paren) = token.find('(') {
            let (name, rest) = token.split_at(paren);
            if self.flavor.is_keyword(name) || is_numeric(name) {
                return token.to_string();
            }
            return format!("{}{rest}", self.quote_dotted(name, open, close));
        }

        // 分组用的右括号
        let inner = token.trim_end_matches(')');
        if inner.len() < token.len() {
            if inner.is_empty() {
                return token.to_string();
            }
            return format!(
                "{}{}",
                self.quote_field_token(inner),
                &token[inner.len()..]
            );
        }

        if token.contains('.') {
            return self.quote_dotted(token, open, close);
        }
        format!("{open}{token}{close}")
    }

    fn quote_table_token(&self, token: &str) -> String {
        if self.is_literal_token(token) || is_lower_case(token) {
            return token.to_string();
        }
        if token.contains('(') || token.contains(')') {
            return token.to_string();
        }
        let (open, close) = self.flavor.table_quotes();
        self.quote_dotted(token, open, close)
    }

    /// 对 `a.b.c` 逐段加引号，全小写的一段保持原样。
    fn quote_dotted(&self, token: &str, open: char, close: char) -> String {
        token
            .split('.')
            .map(|part| {
                if part == "*" || is_lower_case(part) || self.is_literal_token(part) {
                    part.to_string()
                } else {
                    format!("{open}{part}{close}")
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// 不需要加引号的 token：已带引号、关键字、纯数字、绑定 label、运算符号或字符串字面量。
    fn is_literal_token(&self, token: &str) -> bool {
        let (open, _) = self.flavor.field_quotes();
        let (table_open, _) = self.flavor.table_quotes();
        token.is_empty()
            || token.contains(open)
            || token.contains(table_open)
            || token.contains(STRING_QUOTE)
            || token.contains(BIND_MARKER)
            || self.flavor.is_keyword(token)
            || is_numeric(token)
            || SYMBOLS.contains(&token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Raw(String),
    Field(String),
    Table(String),
}

impl Segment {
    fn source(&self) -> &str {
        match self {
            Self::Raw(s) | Self::Field(s) | Self::Table(s) => s,
        }
    }
}

/// 延迟到渲染时才按方言加引号的 SQL 文本。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Phrase {
    segments: Vec<Segment>,
}

impl Phrase {
    fn from_segment(segment: Segment) -> Self {
        Self {
            segments: vec![segment],
        }
    }

    /// 原样输出、从不加引号的文本。
    pub fn raw(text: impl Into<String>) -> Self {
        Self::from_segment(Segment::Raw(text.into()))
    }

    pub fn and(mut self, other: Phrase) -> Self {
        self.segments.extend(other.segments);
        self
    }

    pub fn and_raw(self, text: impl Into<String>) -> Self {
        self.and(Self::raw(text))
    }

    /// 用 `sep` 连接多个 Phrase。
    pub fn join(phrases: impl IntoIterator<Item = Phrase>, sep: &str) -> Self {
        let mut out = Self::default();
        for (i, p) in phrases.into_iter().enumerate() {
            if i > 0 {
                out = out.and_raw(sep);
            }
            out = out.and(p);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.source().is_empty())
    }

    /// 未加引号的原文。
    pub fn source(&self) -> String {
        self.segments.iter().map(Segment::source).collect()
    }

    pub fn render(&self, flavor: Flavor) -> String {
        let quoter = Quoter::new(flavor);
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Raw(text) => text.clone(),
                Segment::Field(text) => quoter.quote_field(text),
                Segment::Table(text) => quoter.quote_table(text),
            })
            .collect()
    }
}

impl From<String> for Phrase {
    fn from(text: String) -> Self {
        Self::raw(text)
    }
}

impl From<&str> for Phrase {
    fn from(text: &str) -> Self {
        Self::raw(text)
    }
}

/// 按空白切分 token，空白原样保留，对每个 token 调用 `f`。
///
/// 单引号字符串内的空白不切分，整个字符串（连同相邻字符）作为一个 token。
fn map_tokens(text: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut start: Option<usize> = None;
    let mut in_string = false;
    for (i, c) in text.char_indices() {
        if c == STRING_QUOTE {
            in_string = !in_string;
        }
        if c.is_whitespace() && !in_string {
            if let Some(s) = start.take() {
                out.push_str(&f(&text[s..i]));
            }
            out.push(c);
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push_str(&f(&text[s..]));
    }
    out
}

/// 在 `depth` 的基础上累计 token 中的括号，结果不小于 0。
fn paren_depth(depth: usize, token: &str) -> usize {
    token.chars().fold(depth, |d, c| match c {
        '(' => d + 1,
        ')' => d.saturating_sub(1),
        _ => d,
    })
}

fn is_numeric(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn is_lower_case(token: &str) -> bool {
    !token.chars().any(|c| c.is_uppercase())
}
