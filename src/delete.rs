//! DeleteBuilder：构建 DELETE 语句。

use crate::bindings::Bindings;
use crate::clause::ClauseStack;
use crate::flavor::{Flavor, default_flavor};
use crate::label::LabelGenerator;
use crate::quote::{Phrase, Quoter};
use crate::statement::Statement;
use crate::string_builder::{DEFAULT_INDENT, StringBuilder};
use crate::value::SqlValue;
use crate::where_clause::{WhereChain, where_methods};
use std::fmt;

#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    quoter: Quoter,
    bindings: Bindings,
    indent: String,

    table: Option<Phrase>,
    where_chain: WhereChain,
    returning: ClauseStack,
}

impl Default for DeleteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeleteBuilder {
    pub fn new() -> Self {
        Self {
            quoter: Quoter::new(default_flavor()),
            bindings: Bindings::new(LabelGenerator::default()),
            indent: DEFAULT_INDENT.to_string(),
            table: None,
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

    where_methods!();

    pub fn returning(&mut self, field: &str) -> &mut Self {
        if !self.quoter.flavor().supports_returning() {
            tracing::debug!(flavor = %self.quoter.flavor(), field, "returning unsupported, ignored");
            return self;
        }
        self.returning.push(self.quoter.field(field));
        self
    }
}

impl Statement for DeleteBuilder {
    fn render(&self) -> String {
        let indent = self.indent.as_str();
        let flavor = self.quoter.flavor();
        let mut buf = StringBuilder::new();

        let table = self.table.as_ref().map(|t| t.render(flavor)).unwrap_or_default();
        buf.write_head("DELETE FROM", &table);
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
        self.where_chain.merge_bindings_into(&mut out);
        out
    }

    fn flavor(&self) -> Flavor {
        self.quoter.flavor()
    }
}

impl fmt::Display for DeleteBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
