//! SelectBuilder：构建 SELECT 语句。
//!
//! 子句固定按 `SELECT [DISTINCT] / 字段 / FROM / JOIN / WHERE / GROUP BY / HAVING /
//! ORDER BY / LIMIT / OFFSET` 的顺序输出，与方言无关。

use crate::bindings::Bindings;
use crate::case::{CaseBuilder, CaseTarget};
use crate::clause::ClauseStack;
use crate::flavor::{Flavor, default_flavor};
use crate::label::LabelGenerator;
use crate::quote::{Phrase, Quoter};
use crate::statement::Statement;
use crate::string_builder::{DEFAULT_INDENT, StringBuilder};
use crate::value::SqlValue;
use crate::where_clause::{WhereChain, where_methods};
use std::fmt;

/// OUTER JOIN 允许的方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinDirection {
    Left,
    Right,
    Full,
}

impl JoinDirection {
    /// 大小写不敏感解析；不在 `LEFT/RIGHT/FULL` 之内返回 `None`。
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "FULL" => Some(Self::Full),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
        }
    }
}

/// 排序方向；无法识别的方向一律按升序处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "DESC" | "DESCENDING" => Self::Desc,
            _ => Self::Asc,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrder {
    First,
    Last,
}

impl NullOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIRST" | "NULLS FIRST" => Some(Self::First),
            "LAST" | "NULLS LAST" => Some(Self::Last),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectBuilder {
    quoter: Quoter,
    bindings: Bindings,
    indent: String,

    distinct: bool,
    distinct_on: Option<Phrase>,
    fields: ClauseStack,
    from: ClauseStack,
    joins: ClauseStack,
    where_chain: WhereChain,
    group_by: ClauseStack,
    having: ClauseStack,
    order: ClauseStack,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Default for SelectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self {
            quoter: Quoter::new(default_flavor()),
            bindings: Bindings::new(LabelGenerator::default()),
            indent: DEFAULT_INDENT.to_string(),
            distinct: false,
            distinct_on: None,
            fields: ClauseStack::new(),
            from: ClauseStack::new(),
            joins: ClauseStack::new(),
            where_chain: WhereChain::default(),
            group_by: ClauseStack::new(),
            having: ClauseStack::new(),
            order: ClauseStack::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn set_flavor(&mut self, flavor: Flavor) -> Flavor {
        let old = self.quoter.flavor();
        self.quoter.set_flavor(flavor);
        old
    }

    pub fn flavor(&self) -> Flavor {
        self.quoter.flavor()
    }

    pub fn set_label_generator(&mut self, labels: LabelGenerator) -> &mut Self {
        self.bindings.set_label_generator(labels);
        self
    }

    pub fn label_generator(&self) -> &LabelGenerator {
        self.bindings.label_generator()
    }

    pub fn set_indent(&mut self, indent: impl Into<String>) -> &mut Self {
        self.indent = indent.into();
        self
    }

    /// 开关字段/表名 quoting，返回旧值。
    pub fn enable_quoting(&mut self, enabled: bool) -> bool {
        self.quoter.enable_quoting(enabled)
    }

    pub fn quoting_enabled(&self) -> bool {
        self.quoter.is_enabled()
    }

    pub fn quoter(&self) -> &Quoter {
        &self.quoter
    }

    /// 直接登记一个绑定（用于调用方在 HAVING 等原样片段里自带的 `:label`）。
    pub fn set_binding(&mut self, label: impl Into<String>, value: impl Into<SqlValue>) -> &mut Self {
        self.bindings.set_binding(label, value);
        self
    }

    pub(crate) fn merge_bindings(&mut self, other: &Bindings) {
        self.bindings.merge_from(other);
    }

    /// `flag` 为 false 时取消 DISTINCT；`on` 非空时输出 `DISTINCT ON (...)`。
    pub fn distinct(&mut self, flag: bool, on: Option<&str>) -> &mut Self {
        self.distinct = flag;
        self.distinct_on = match on {
            Some(expr) if flag && !expr.trim().is_empty() => Some(self.quoter.field(expr)),
            _ => None,
        };
        self
    }

    pub fn field(&mut self, field: &str) -> &mut Self {
        self.fields.push(self.quoter.field(field));
        self
    }

    /// 追加一个已经组装好的字段表达式（CASE 等）。
    pub(crate) fn push_field(&mut self, phrase: Phrase) -> &mut Self {
        self.fields.push(phrase);
        self
    }

    /// 用一组字段替换当前字段栈。
    pub fn fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<Phrase> = fields
            .into_iter()
            .map(|f| self.quoter.field(f.as_ref()))
            .collect();
        self.fields.replace(phrases);
        self
    }

    pub fn reset_fields(&mut self) -> &mut Self {
        self.fields.reset();
        self
    }

    pub fn from(&mut self, table: &str) -> &mut Self {
        self.from.push(self.quoter.table(table));
        self
    }

    /// 以子查询作为 FROM 来源；子查询在本语句渲染时才展开。
    pub fn from_sub(&mut self, alias: &str, sub: impl Statement + 'static) -> &mut Self {
        self.from.push_sub(self.quoter.table(alias), Box::new(sub));
        self
    }

    pub fn reset_from(&mut self) -> &mut Self {
        self.from.reset();
        self
    }

    pub fn join(&mut self, table: &str, on: &str) -> &mut Self {
        let text = Phrase::raw("JOIN ")
            .and(self.quoter.table(table))
            .and_raw(" ON ")
            .and(self.quoter.field(on));
        self.joins.push(text);
        self
    }

    pub fn join_using<I, S>(&mut self, table: &str, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = Phrase::raw("JOIN ")
            .and(self.quoter.table(table))
            .and_raw(" USING (")
            .and(self.field_list(fields))
            .and_raw(")");
        self.joins.push(text);
        self
    }

    pub fn join_natural(&mut self, table: &str) -> &mut Self {
        let text = Phrase::raw("NATURAL JOIN ").and(self.quoter.table(table));
        self.joins.push(text);
        self
    }

    /// `direction` 只接受 LEFT/RIGHT/FULL，其它值忽略本次调用。
    pub fn join_outer(&mut self, direction: &str, table: &str, on: &str) -> &mut Self {
        let Some(dir) = JoinDirection::parse(direction) else {
            tracing::debug!(direction, table, "unsupported outer join direction ignored");
            return self;
        };
        let text = Phrase::raw(format!("{} OUTER JOIN ", dir.as_str()))
            .and(self.quoter.table(table))
            .and_raw(" ON ")
            .and(self.quoter.field(on));
        self.joins.push(text);
        self
    }

    pub fn join_outer_using<I, S>(&mut self, direction: &str, table: &str, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(dir) = JoinDirection::parse(direction) else {
            tracing::debug!(direction, table, "unsupported outer join direction ignored");
            return self;
        };
        let text = Phrase::raw(format!("{} OUTER JOIN ", dir.as_str()))
            .and(self.quoter.table(table))
            .and_raw(" USING (")
            .and(self.field_list(fields))
            .and_raw(")");
        self.joins.push(text);
        self
    }

    pub fn reset_joins(&mut self) -> &mut Self {
        self.joins.reset();
        self
    }

    where_methods!();

    /// 以 CASE 表达式作为一个 WHERE 谓词；`end_case` 的 alias 在这里被忽略。
    pub fn where_case(&mut self) -> CaseBuilder<'_> {
        CaseBuilder::new(self, CaseTarget::Where)
    }

    /// 以 CASE 表达式作为一个输出字段。
    pub fn case(&mut self) -> CaseBuilder<'_> {
        CaseBuilder::new(self, CaseTarget::Field)
    }

    pub fn group_by(&mut self, field: &str) -> &mut Self {
        self.group_by.push(self.quoter.field(field));
        self
    }

    pub fn group_by_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<Phrase> = fields
            .into_iter()
            .map(|f| self.quoter.field(f.as_ref()))
            .collect();
        self.group_by.replace(phrases);
        self
    }

    pub fn reset_group_by(&mut self) -> &mut Self {
        self.group_by.reset();
        self
    }

    /// HAVING 条件原样写入（不做 quoting），多个条件以 AND 连接。
    pub fn having(&mut self, expr: &str) -> &mut Self {
        self.having.push(expr);
        self
    }

    pub fn reset_having(&mut self) -> &mut Self {
        self.having.reset();
        self
    }

    /// 追加排序字段。方向缺省或无法识别时为 ASC；`null_order` 只接受 FIRST/LAST。
    pub fn order(
        &mut self,
        field: &str,
        direction: Option<&str>,
        null_order: Option<&str>,
    ) -> &mut Self {
        let dir = direction.map(OrderDirection::parse).unwrap_or_default();
        let mut text = self.quoter.field(field).and_raw(format!(" {}", dir.as_str()));
        if let Some(raw) = null_order {
            match NullOrder::parse(raw) {
                Some(n) => text = text.and_raw(format!(" {}", n.as_str())),
                None => tracing::debug!(null_order = raw, "unsupported null order ignored"),
            }
        }
        self.order.push(text);
        self
    }

    pub fn reset_order(&mut self) -> &mut Self {
        self.order.reset();
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    pub fn reset_limit(&mut self) -> &mut Self {
        self.limit = None;
        self.offset = None;
        self
    }

    fn field_list<I, S>(&self, fields: I) -> Phrase
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Phrase::join(fields.into_iter().map(|f| self.quoter.field(f.as_ref())), ", ")
    }
}

impl Statement for SelectBuilder {
    fn render(&self) -> String {
        let indent = self.indent.as_str();
        let flavor = self.quoter.flavor();
        let mut buf = StringBuilder::new();

        let mut head = String::from("SELECT");
        if self.distinct {
            head.push_str(" DISTINCT");
            if let Some(on) = &self.distinct_on {
                head.push_str(" ON (");
                head.push_str(&on.render(flavor));
                head.push(')');
            }
        }
        let fields = if self.fields.is_empty() {
            vec!["*".to_string()]
        } else {
            self.fields.render_items(flavor, indent)
        };
        buf.write_block(&head, &fields, ",", indent);

        buf.write_block("FROM", &self.from.render_items(flavor, indent), ",", indent);

        for join in self.joins.render_items(flavor, indent) {
            buf.write_line(&join);
        }

        self.where_chain.write_to(&mut buf, flavor, indent);

        buf.write_block(
            "GROUP BY",
            &self.group_by.render_items(flavor, indent),
            ",",
            indent,
        );

        let having: Vec<String> = self
            .having
            .render_items(flavor, indent)
            .into_iter()
            .filter(|h| !h.is_empty())
            .enumerate()
            .map(|(i, h)| if i == 0 { h } else { format!("AND {h}") })
            .collect();
        buf.write_block("HAVING", &having, "", indent);

        buf.write_block("ORDER BY", &self.order.render_items(flavor, indent), ",", indent);

        if let Some(limit) = self.limit {
            buf.write_line(&format!("LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            buf.write_line(&format!("OFFSET {offset}"));
        }

        buf.into_string()
    }

    fn bindings(&self) -> Bindings {
        let mut out = self.bindings.clone();
        self.from.merge_bindings_into(&mut out);
        self.where_chain.merge_bindings_into(&mut out);
        out
    }

    fn flavor(&self) -> Flavor {
        self.quoter.flavor()
    }
}

impl fmt::Display for SelectBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
