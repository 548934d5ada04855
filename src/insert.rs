//! InsertBuilder：构建 INSERT 语句。

use crate::bindings::Bindings;
use crate::clause::ClauseStack;
use crate::field_value::{FieldValue, FieldValueSet};
use crate::flavor::{Flavor, default_flavor};
use crate::label::LabelGenerator;
use crate::quote::{Phrase, Quoter};
use crate::statement::Statement;
use crate::string_builder::{DEFAULT_INDENT, StringBuilder, reindent};
use crate::value::SqlValue;
use std::fmt;

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    quoter: Quoter,
    bindings: Bindings,
    indent: String,

    table: Option<Phrase>,
    values: FieldValueSet,
    // Insert-Select：存在时取代 VALUES
    value_select: Option<Box<dyn Statement>>,
    returning: ClauseStack,
}

impl Default for InsertBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InsertBuilder {
    pub fn new() -> Self {
        Self {
            quoter: Quoter::new(default_flavor()),
            bindings: Bindings::new(LabelGenerator::default()),
            indent: DEFAULT_INDENT.to_string(),
            table: None,
            values: FieldValueSet::new(),
            value_select: None,
            returning: ClauseStack::new(),
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

    pub fn enable_quoting(&mut self, enabled: bool) -> bool {
        self.quoter.enable_quoting(enabled)
    }

    pub fn set_binding(&mut self, label: impl Into<String>, value: impl Into<SqlValue>) -> &mut Self {
        self.bindings.set_binding(label, value);
        self
    }

    pub fn table(&mut self, table: &str) -> &mut Self {
        self.table = Some(self.quoter.table(table));
        self
    }

    /// 列值原样写入 SQL（例如 `NOW()`、`DEFAULT`），不做 quoting 也不绑定。
    pub fn field_value(&mut self, field: &str, marker: &str) -> &mut Self {
        self.push_value(field, Some(marker), None)
    }

    /// `marker` 为 `?` 或空串时自动生成 label 绑定 `bound`；为 `:label` 时按该 label 绑定；
    /// 其它情况 `marker` 原样写入，`bound` 被忽略。
    pub fn field_value_bound(
        &mut self,
        field: &str,
        marker: &str,
        bound: impl Into<SqlValue>,
    ) -> &mut Self {
        self.push_value(field, Some(marker), Some(bound.into()))
    }

    /// 未给出 marker：总是生成 label 绑定。
    pub fn bind_field(&mut self, field: &str, bound: impl Into<SqlValue>) -> &mut Self {
        self.push_value(field, None, Some(bound.into()))
    }

    /// 对每一项执行 `bind_field`。
    pub fn field_values<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<SqlValue>,
    {
        for (field, value) in values {
            self.bind_field(field.as_ref(), value);
        }
        self
    }

    pub fn reset_values(&mut self) -> &mut Self {
        self.values.reset();
        self
    }

    /// 用一个 SELECT 作为数据来源；存在时不再输出 VALUES。
    pub fn value_select(&mut self, select: impl Statement + 'static) -> &mut Self {
        self.value_select = Some(Box::new(select));
        self
    }

    /// 请求返回列；方言不支持 RETURNING 时忽略。
    pub fn returning(&mut self, field: &str) -> &mut Self {
        if !self.quoter.flavor().supports_returning() {
            tracing::debug!(flavor = %self.quoter.flavor(), field, "returning unsupported, ignored");
            return self;
        }
        self.returning.push(self.quoter.field(field));
        self
    }

    pub fn returning_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.quoter.flavor().supports_returning() {
            tracing::debug!(flavor = %self.quoter.flavor(), "returning unsupported, ignored");
            return self;
        }
        let phrases: Vec<Phrase> = fields
            .into_iter()
            .map(|f| self.quoter.field(f.as_ref()))
            .collect();
        self.returning.replace(phrases);
        self
    }

    fn push_value(&mut self, field: &str, marker: Option<&str>, bound: Option<SqlValue>) -> &mut Self {
        let value = FieldValue::new(
            self.quoter.field(field),
            marker,
            bound,
            self.bindings.label_generator(),
        );
        self.values.set(value);
        self
    }
}

impl Statement for InsertBuilder {
    fn render(&self) -> String {
        let indent = self.indent.as_str();
        let flavor = self.quoter.flavor();
        let mut buf = StringBuilder::new();

        let table = self.table.as_ref().map(|t| t.render(flavor)).unwrap_or_default();
        buf.write_head("INSERT INTO", &table);

        if !self.values.is_empty() {
            buf.write_line(&format!("{indent}({})", self.values.fields(flavor).join(", ")));
        }

        if let Some(select) = &self.value_select {
            buf.write_line(&reindent(&select.render(), indent));
        } else if !self.values.is_empty() {
            buf.write_line("VALUES");
            buf.write_line(&format!("{indent}({})", self.values.markers().join(", ")));
        }

        if flavor.supports_returning() {
            buf.write_block(
                "RETURNING",
                &self.returning.render_items(flavor, indent),
                ",",
                indent,
            );
        }
        buf.into_string()
    }

    fn bindings(&self) -> Bindings {
        let mut out = self.bindings.clone();
        match &self.value_select {
            Some(select) => out.merge_from(&select.bindings()),
            None => self.values.merge_bindings_into(&mut out),
        }
        out
    }

    fn flavor(&self) -> Flavor {
        self.quoter.flavor()
    }
}

impl fmt::Display for InsertBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
