//! UpdateBuilder：构建 UPDATE 语句。

use crate::bindings::Bindings;
use crate::clause::ClauseStack;
use crate::field_value::{FieldValue, FieldValueSet};
use crate::flavor::{Flavor, default_flavor};
use crate::label::LabelGenerator;
use crate::quote::{Phrase, Quoter};
use crate::statement::Statement;
use crate::string_builder::{DEFAULT_INDENT, StringBuilder};
use crate::value::SqlValue;
use crate::where_clause::{WhereChain, where_methods};
use std::fmt;

#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    quoter: Quoter,
    bindings: Bindings,
    indent: String,

    table: Option<Phrase>,
    assignments: FieldValueSet,
    where_chain: WhereChain,
    returning: ClauseStack,
}

impl Default for UpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self {
            quoter: Quoter::new(default_flavor()),
            bindings: Bindings::new(LabelGenerator::default()),
            indent: DEFAULT_INDENT.to_string(),
            table: None,
            assignments: FieldValueSet::new(),
            where_chain: WhereChain::default(),
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

    /// `field = marker`，marker 原样写入（例如 `count + 1`）。
    pub fn field_value(&mut self, field: &str, marker: &str) -> &mut Self {
        self.push_assignment(field, Some(marker), None)
    }

    /// 绑定规则与 `InsertBuilder::field_value_bound` 相同。
    pub fn field_value_bound(
        &mut self,
        field: &str,
        marker: &str,
        bound: impl Into<SqlValue>,
    ) -> &mut Self {
        self.push_assignment(field, Some(marker), Some(bound.into()))
    }

    pub fn bind_field(&mut self, field: &str, bound: impl Into<SqlValue>) -> &mut Self {
        self.push_assignment(field, None, Some(bound.into()))
    }

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
        self.assignments.reset();
        self
    }

    where_methods!();

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

    fn push_assignment(
        &mut self,
        field: &str,
        marker: Option<&str>,
        bound: Option<SqlValue>,
    ) -> &mut Self {
        let value = FieldValue::new(
            self.quoter.field(field),
            marker,
            bound,
            self.bindings.label_generator(),
        );
        self.assignments.set(value);
        self
    }
}

impl Statement for UpdateBuilder {
    fn render(&self) -> String {
        let indent = self.indent.as_str();
        let flavor = self.quoter.flavor();
        let mut buf = StringBuilder::new();

        let table = self.table.as_ref().map(|t| t.render(flavor)).unwrap_or_default();
        buf.write_head("UPDATE", &table);

        let sets: Vec<String> = self
            .assignments
            .iter()
            .map(|v| format!("{} = {}", v.field().render(flavor), v.marker()))
            .collect();
        buf.write_block("SET", &sets, ",", indent);

        self.where_chain.write_to(&mut buf, flavor, indent);

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
        self.assignments.merge_bindings_into(&mut out);
        self.where_chain.merge_bindings_into(&mut out);
        out
    }

    fn flavor(&self) -> Flavor {
        self.quoter.flavor()
    }
}

impl fmt::Display for UpdateBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
