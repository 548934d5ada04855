//! WithBuilder：构建 `WITH [RECURSIVE] ...` 公共表表达式，后接一条消费语句。

use crate::bindings::Bindings;
use crate::flavor::{Flavor, default_flavor};
use crate::label::LabelGenerator;
use crate::quote::{Phrase, Quoter};
use crate::statement::Statement;
use crate::string_builder::{DEFAULT_INDENT, StringBuilder, parenthesize};
use crate::value::SqlValue;
use std::fmt;

/// 自引用的 CTE 成员：`alias [(fields)] AS (<union>)`。
///
/// alias 与 union 都设置之后才算就绪，未就绪时渲染直接跳过。
#[derive(Debug, Clone, Default)]
pub struct RecursiveCte {
    alias: Option<String>,
    fields: Vec<String>,
    union: Option<Box<dyn Statement>>,
}

impl RecursiveCte {
    pub fn set_alias(&mut self, alias: &str) -> &mut Self {
        let alias = alias.trim();
        self.alias = (!alias.is_empty()).then(|| alias.to_string());
        self
    }

    pub fn set_union(&mut self, union: impl Statement + 'static) -> &mut Self {
        self.union = Some(Box::new(union));
        self
    }

    pub fn set_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fields = fields.into_iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.alias.is_some() && self.union.is_some()
    }

    fn render(&self, quoter: &Quoter, indent: &str) -> Option<String> {
        let (alias, union) = (self.alias.as_deref()?, self.union.as_ref()?);
        let mut head = quoter.quote_table(alias);
        if !self.fields.is_empty() {
            let fields: Vec<String> = self.fields.iter().map(|f| quoter.quote_field(f)).collect();
            head.push_str(&format!(" ({})", fields.join(", ")));
        }
        Some(format!("{head} AS {}", parenthesize(&union.render(), indent)))
    }

    fn bindings(&self) -> Option<Bindings> {
        if !self.is_ready() {
            return None;
        }
        self.union.as_ref().map(|u| u.bindings())
    }
}

#[derive(Debug, Clone)]
pub struct WithBuilder {
    quoter: Quoter,
    bindings: Bindings,
    indent: String,

    recursive: RecursiveCte,
    members: Vec<(Phrase, Box<dyn Statement>)>,
    suffix: Option<Box<dyn Statement>>,
}

impl Default for WithBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WithBuilder {
    pub fn new() -> Self {
        Self {
            quoter: Quoter::new(default_flavor()),
            bindings: Bindings::new(LabelGenerator::default()),
            indent: DEFAULT_INDENT.to_string(),
            recursive: RecursiveCte::default(),
            members: Vec::new(),
            suffix: None,
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

    /// 追加一个具名成员；同名成员原位覆盖。
    pub fn set_statement(&mut self, alias: &str, statement: impl Statement + 'static) -> &mut Self {
        let alias = self.quoter.table(alias);
        let statement: Box<dyn Statement> = Box::new(statement);
        match self
            .members
            .iter_mut()
            .find(|(a, _)| a.source() == alias.source())
        {
            Some(member) => member.1 = statement,
            None => self.members.push((alias, statement)),
        }
        self
    }

    /// 设置 WITH 之后真正执行的语句。
    pub fn set_suffix(&mut self, statement: impl Statement + 'static) -> &mut Self {
        self.suffix = Some(Box::new(statement));
        self
    }

    /// 一次性设置递归成员；方言不支持递归 CTE 时忽略。
    pub fn set_recursive<I, S>(
        &mut self,
        alias: &str,
        union: impl Statement + 'static,
        fields: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.quoter.flavor().supports_recursive() {
            tracing::debug!(flavor = %self.quoter.flavor(), alias, "recursive cte unsupported, ignored");
            return self;
        }
        self.recursive
            .set_alias(alias)
            .set_union(union)
            .set_fields(fields);
        self
    }

    pub fn recursive(&self) -> &RecursiveCte {
        &self.recursive
    }

    pub fn recursive_mut(&mut self) -> &mut RecursiveCte {
        &mut self.recursive
    }

    fn recursive_enabled(&self) -> bool {
        self.recursive.is_ready() && self.quoter.flavor().supports_recursive()
    }
}

impl Statement for WithBuilder {
    fn render(&self) -> String {
        let indent = self.indent.as_str();
        let mut buf = StringBuilder::new();

        let mut entries = Vec::with_capacity(self.members.len() + 1);
        let mut recursive = false;
        if self.recursive_enabled() {
            if let Some(text) = self.recursive.render(&self.quoter, indent) {
                entries.push(text);
                recursive = true;
            }
        }
        for (alias, statement) in &self.members {
            entries.push(format!(
                "{} AS {}",
                alias.render(self.quoter.flavor()),
                parenthesize(&statement.render(), indent)
            ));
        }

        if !entries.is_empty() {
            let keyword = if recursive { "WITH RECURSIVE" } else { "WITH" };
            buf.write_line(&format!("{keyword} {}", entries.join(",\n")));
        }
        if let Some(suffix) = &self.suffix {
            buf.write_line(suffix.render().trim_end_matches('\n'));
        }
        buf.into_string()
    }

    /// 合并顺序：自身、递归成员、具名成员、suffix。
    fn bindings(&self) -> Bindings {
        let mut out = self.bindings.clone();
        if self.recursive_enabled() {
            if let Some(b) = self.recursive.bindings() {
                out.merge_from(&b);
            }
        }
        for (_, statement) in &self.members {
            out.merge_from(&statement.bindings());
        }
        if let Some(suffix) = &self.suffix {
            out.merge_from(&suffix.bindings());
        }
        out
    }

    fn flavor(&self) -> Flavor {
        self.quoter.flavor()
    }
}

impl fmt::Display for WithBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
