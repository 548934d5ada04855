//! ClauseStack：一个 SQL 子句（字段、FROM、JOIN、GROUP BY ...）按顺序堆叠的片段。

use crate::bindings::Bindings;
use crate::flavor::Flavor;
use crate::quote::Phrase;
use crate::statement::Statement;
use crate::string_builder::parenthesize;

/// 子句中的一个片段：文本，或渲染时才展开的嵌套语句。
#[derive(Debug, Clone)]
pub enum Fragment {
    Text(Phrase),
    Sub {
        alias: Phrase,
        statement: Box<dyn Statement>,
    },
}

impl Fragment {
    pub fn render(&self, flavor: Flavor, indent: &str) -> String {
        match self {
            Self::Text(text) => text.render(flavor),
            Self::Sub { alias, statement } => format!(
                "{} AS {}",
                parenthesize(&statement.render(), indent),
                alias.render(flavor)
            ),
        }
    }

    pub fn bindings(&self) -> Option<Bindings> {
        match self {
            Self::Text(_) => None,
            Self::Sub { statement, .. } => Some(statement.bindings()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClauseStack {
    fragments: Vec<Fragment>,
}

impl ClauseStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<Phrase>) {
        self.fragments.push(Fragment::Text(text.into()));
    }

    pub fn push_sub(&mut self, alias: Phrase, statement: Box<dyn Statement>) {
        self.fragments.push(Fragment::Sub { alias, statement });
    }

    /// 用一组文本替换整个栈。
    pub fn replace(&mut self, texts: impl IntoIterator<Item = Phrase>) {
        self.fragments = texts.into_iter().map(Fragment::Text).collect();
    }

    pub fn reset(&mut self) {
        self.fragments.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn render_items(&self, flavor: Flavor, indent: &str) -> Vec<String> {
        self.fragments
            .iter()
            .map(|f| f.render(flavor, indent))
            .collect()
    }

    /// 按片段顺序把嵌套语句的绑定合并进 `dst`（`dst` 已有的 label 优先）。
    pub fn merge_bindings_into(&self, dst: &mut Bindings) {
        for b in self.fragments.iter().filter_map(Fragment::bindings) {
            dst.merge_from(&b);
        }
    }
}
