//! Dialect：绑定到某个方言的语句构造入口。
//!
//! 同一个 Dialect 构造出的所有语句共用一个 label 生成器与缩进设置，
//! 因此嵌套组合时 label 不会冲突。

use crate::cte::WithBuilder;
use crate::delete::DeleteBuilder;
use crate::flavor::{DialectError, Flavor, default_flavor};
use crate::insert::InsertBuilder;
use crate::label::LabelGenerator;
use crate::select::SelectBuilder;
use crate::string_builder::DEFAULT_INDENT;
use crate::union::UnionBuilder;
use crate::update::UpdateBuilder;

#[derive(Debug, Clone)]
pub struct Dialect {
    flavor: Flavor,
    labels: LabelGenerator,
    indent: String,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::new(default_flavor())
    }
}

impl Dialect {
    pub fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            labels: LabelGenerator::default(),
            indent: DEFAULT_INDENT.to_string(),
        }
    }

    /// 按名称（大小写不敏感）选择方言，未知名称返回 `DialectError::UnknownDialect`。
    pub fn from_name(name: &str) -> Result<Self, DialectError> {
        let flavor = name.parse::<Flavor>()?;
        Ok(Self::new(flavor))
    }

    pub fn with_labels(mut self, labels: LabelGenerator) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn labels(&self) -> &LabelGenerator {
        &self.labels
    }

    pub fn select(&self) -> SelectBuilder {
        let mut b = SelectBuilder::new();
        b.set_flavor(self.flavor);
        b.set_label_generator(self.labels.clone())
            .set_indent(self.indent.clone());
        b
    }

    pub fn insert(&self) -> InsertBuilder {
        let mut b = InsertBuilder::new();
        b.set_flavor(self.flavor);
        b.set_label_generator(self.labels.clone())
            .set_indent(self.indent.clone());
        b
    }

    pub fn update(&self) -> UpdateBuilder {
        let mut b = UpdateBuilder::new();
        b.set_flavor(self.flavor);
        b.set_label_generator(self.labels.clone())
            .set_indent(self.indent.clone());
        b
    }

    pub fn delete(&self) -> DeleteBuilder {
        let mut b = DeleteBuilder::new();
        b.set_flavor(self.flavor);
        b.set_label_generator(self.labels.clone())
            .set_indent(self.indent.clone());
        b
    }

    pub fn union(&self) -> UnionBuilder {
        let mut b = UnionBuilder::new();
        b.set_flavor(self.flavor);
        b.set_label_generator(self.labels.clone());
        b
    }

    pub fn with(&self) -> WithBuilder {
        let mut b = WithBuilder::new();
        b.set_flavor(self.flavor);
        b.set_label_generator(self.labels.clone())
            .set_indent(self.indent.clone());
        b
    }
}
