//! WhereClause：WHERE 谓词的三种形态，以及按 AND 连接的谓词栈。

use crate::bindings::{Bindings, IntoBindValues};
use crate::flavor::Flavor;
use crate::label::LabelGenerator;
use crate::quote::{Phrase, Quoter};
use crate::statement::Statement;
use crate::string_builder::{StringBuilder, parenthesize};
use crate::value::SqlValue;

/// 一个谓词。
#[derive(Debug, Clone)]
pub enum WhereClause {
    /// 任意条件文本，`?` 已被替换为 label，字段在渲染时加引号。
    Criteria { text: Phrase, bindings: Bindings },
    /// `field [NOT] IN (:a, :b, ...)`。
    ValueMembership {
        field: Phrase,
        labels: Vec<String>,
        is_in: bool,
        bindings: Bindings,
    },
    /// `field [NOT] IN ( <子查询> )`，绑定完全来自子查询。
    SubqueryMembership {
        field: Phrase,
        select: Box<dyn Statement>,
        is_in: bool,
    },
}

impl WhereClause {
    pub fn criteria(
        text: &str,
        values: Vec<SqlValue>,
        quoter: &Quoter,
        labels: &LabelGenerator,
    ) -> Self {
        let mut bindings = Bindings::new(labels.clone());
        let text = bindings.bind_positional(text, values);
        Self::Criteria {
            text: quoter.field(&text),
            bindings,
        }
    }

    /// 已经拼好的条件文本（例如 CASE 表达式），不再做任何处理。
    pub fn raw(text: impl Into<Phrase>, bindings: Bindings) -> Self {
        Self::Criteria {
            text: text.into(),
            bindings,
        }
    }

    pub fn value_membership(
        field: &str,
        values: Vec<SqlValue>,
        is_in: bool,
        quoter: &Quoter,
        labels: &LabelGenerator,
    ) -> Self {
        let mut bindings = Bindings::new(labels.clone());
        let labels: Vec<String> = values.iter().map(|_| bindings.generate_label()).collect();
        bindings.set_bindings(labels.iter().cloned().zip(values));
        Self::ValueMembership {
            field: quoter.field(field),
            labels,
            is_in,
            bindings,
        }
    }

    pub fn subquery_membership(
        field: &str,
        select: Box<dyn Statement>,
        is_in: bool,
        quoter: &Quoter,
    ) -> Self {
        Self::SubqueryMembership {
            field: quoter.field(field),
            select,
            is_in,
        }
    }

    pub fn render(&self, flavor: Flavor, indent: &str) -> String {
        match self {
            Self::Criteria { text, .. } => text.render(flavor),
            Self::ValueMembership {
                field,
                labels,
                is_in,
                ..
            } => format!(
                "{} {} ({})",
                field.render(flavor),
                in_keyword(*is_in),
                labels.join(", ")
            ),
            Self::SubqueryMembership {
                field,
                select,
                is_in,
            } => format!(
                "{} {} {}",
                field.render(flavor),
                in_keyword(*is_in),
                parenthesize(&select.render(), indent)
            ),
        }
    }

    pub fn bindings(&self) -> Bindings {
        match self {
            Self::Criteria { bindings, .. } | Self::ValueMembership { bindings, .. } => {
                bindings.clone()
            }
            Self::SubqueryMembership { select, .. } => select.bindings(),
        }
    }
}

fn in_keyword(is_in: bool) -> &'static str {
    if is_in { "IN" } else { "NOT IN" }
}

/// Where：只接受第一次设置的谓词，之后的设置调用都是 no-op。
#[derive(Debug, Clone)]
pub struct Where {
    quoter: Quoter,
    labels: LabelGenerator,
    clause: Option<WhereClause>,
}

impl Where {
    pub fn new(quoter: Quoter, labels: LabelGenerator) -> Self {
        Self {
            quoter,
            labels,
            clause: None,
        }
    }

    pub fn set_criteria(&mut self, text: &str, values: impl IntoBindValues) -> &mut Self {
        if self.already_set("set_criteria") {
            return self;
        }
        self.clause = Some(WhereClause::criteria(
            text,
            values.into_bind_values(),
            &self.quoter,
            &self.labels,
        ));
        self
    }

    pub fn set_in_list(
        &mut self,
        field: &str,
        values: impl IntoBindValues,
        is_in: bool,
    ) -> &mut Self {
        if self.already_set("set_in_list") {
            return self;
        }
        let values = values.into_bind_values();
        if values.is_empty() {
            tracing::debug!(field, "empty IN list, where clause skipped");
            return self;
        }
        self.clause = Some(WhereClause::value_membership(
            field,
            values,
            is_in,
            &self.quoter,
            &self.labels,
        ));
        self
    }

    pub fn set_in_select(
        &mut self,
        field: &str,
        select: impl Statement + 'static,
        is_in: bool,
    ) -> &mut Self {
        if self.already_set("set_in_select") {
            return self;
        }
        self.clause = Some(WhereClause::subquery_membership(
            field,
            Box::new(select),
            is_in,
            &self.quoter,
        ));
        self
    }

    pub(crate) fn set_clause(&mut self, clause: WhereClause) -> &mut Self {
        if self.already_set("set_clause") {
            return self;
        }
        self.clause = Some(clause);
        self
    }

    fn already_set(&self, op: &str) -> bool {
        if self.clause.is_some() {
            tracing::debug!(op, "where clause already set, call ignored");
            return true;
        }
        false
    }

    pub fn clause(&self) -> Option<&WhereClause> {
        self.clause.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.clause.is_some()
    }

    pub fn render(&self, flavor: Flavor, indent: &str) -> String {
        self.clause
            .as_ref()
            .map(|c| c.render(flavor, indent))
            .unwrap_or_default()
    }

    pub fn bindings(&self) -> Bindings {
        self.clause
            .as_ref()
            .map(WhereClause::bindings)
            .unwrap_or_else(|| Bindings::new(self.labels.clone()))
    }
}

/// WhereChain：语句持有的谓词栈，渲染时以 AND 连接。
#[derive(Debug, Clone, Default)]
pub struct WhereChain {
    wheres: Vec<Where>,
}

impl WhereChain {
    pub fn push(&mut self, w: Where) {
        self.wheres.push(w);
    }

    pub fn reset(&mut self) {
        self.wheres.clear();
    }

    pub fn is_empty(&self) -> bool {
        !self.wheres.iter().any(Where::is_set)
    }

    pub fn len(&self) -> usize {
        self.wheres.iter().filter(|w| w.is_set()).count()
    }

    /// 写出 `WHERE` 块：第一个谓词之后的每个谓词都以 `AND ` 开头。
    pub(crate) fn write_to(&self, buf: &mut StringBuilder, flavor: Flavor, indent: &str) {
        let items: Vec<String> = self
            .wheres
            .iter()
            .map(|w| w.render(flavor, indent))
            .filter(|text| !text.is_empty())
            .enumerate()
            .map(|(i, text)| if i == 0 { text } else { format!("AND {text}") })
            .collect();
        buf.write_block("WHERE", &items, "", indent);
    }

    pub fn merge_bindings_into(&self, dst: &mut Bindings) {
        for w in &self.wheres {
            dst.merge_from(&w.bindings());
        }
    }
}

/// 为持有 `where_chain`、`quoter`、`bindings` 字段的语句生成 WHERE 相关的链式方法。
macro_rules! where_methods {
    () => {
        pub(crate) fn new_where(&self) -> $crate::where_clause::Where {
            $crate::where_clause::Where::new(
                self.quoter,
                self.bindings.label_generator().clone(),
            )
        }

        /// 追加一个条件；`?` 按顺序绑定到 `values`（`()` 表示没有绑定值）。
        pub fn where_(
            &mut self,
            criteria: &str,
            values: impl $crate::bindings::IntoBindValues,
        ) -> &mut Self {
            let mut w = self.new_where();
            w.set_criteria(criteria, values);
            self.where_chain.push(w);
            self
        }

        pub fn where_in(
            &mut self,
            field: &str,
            values: impl $crate::bindings::IntoBindValues,
        ) -> &mut Self {
            let mut w = self.new_where();
            w.set_in_list(field, values, true);
            self.where_chain.push(w);
            self
        }

        pub fn where_not_in(
            &mut self,
            field: &str,
            values: impl $crate::bindings::IntoBindValues,
        ) -> &mut Self {
            let mut w = self.new_where();
            w.set_in_list(field, values, false);
            self.where_chain.push(w);
            self
        }

        pub fn where_in_sub(
            &mut self,
            field: &str,
            select: impl $crate::statement::Statement + 'static,
        ) -> &mut Self {
            let mut w = self.new_where();
            w.set_in_select(field, select, true);
            self.where_chain.push(w);
            self
        }

        pub fn where_not_in_sub(
            &mut self,
            field: &str,
            select: impl $crate::statement::Statement + 'static,
        ) -> &mut Self {
            let mut w = self.new_where();
            w.set_in_select(field, select, false);
            self.where_chain.push(w);
            self
        }

        /// 追加一个已经构造好的 Where。
        pub fn add_where(&mut self, w: $crate::where_clause::Where) -> &mut Self {
            self.where_chain.push(w);
            self
        }

        pub fn reset_where(&mut self) -> &mut Self {
            self.where_chain.reset();
            self
        }
    };
}

pub(crate) use where_methods;
