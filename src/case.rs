//! CaseBuilder / WhenBuilder：在 SelectBuilder 上拼装 `CASE WHEN ... THEN ... ELSE ... END`。
//!
//! 子 builder 只在调用链期间借用父 SelectBuilder，`end_case` 之后把控制权交还父语句。

use crate::bindings::{Bindings, IntoBindValues};
use crate::quote::Phrase;
use crate::select::SelectBuilder;
use crate::where_clause::WhereClause;

/// CASE 表达式最终放到哪里。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CaseTarget {
    Field,
    Where,
}

pub struct CaseBuilder<'a> {
    parent: &'a mut SelectBuilder,
    target: CaseTarget,
    whens: Vec<(Phrase, Phrase)>,
    else_result: Option<Phrase>,
    bindings: Bindings,
}

impl<'a> CaseBuilder<'a> {
    pub(crate) fn new(parent: &'a mut SelectBuilder, target: CaseTarget) -> Self {
        let bindings = Bindings::new(parent.label_generator().clone());
        Self {
            parent,
            target,
            whens: Vec::new(),
            else_result: None,
            bindings,
        }
    }

    /// 开始一个 WHEN 分支；返回的 WhenBuilder 只能用 `then` 补全结果。
    pub fn when(mut self, criteria: &str, values: impl IntoBindValues) -> WhenBuilder<'a> {
        let criteria = self.prepare(criteria, values);
        WhenBuilder {
            case: self,
            criteria,
        }
    }

    pub fn else_then(mut self, result: &str, values: impl IntoBindValues) -> Self {
        self.else_result = Some(self.prepare(result, values));
        self
    }

    /// 拼出完整的 CASE 文本，交给父语句并返回父语句。
    ///
    /// 作为字段时 `alias` 生成 `AS alias`；作为 WHERE 谓词时忽略 `alias`。
    /// 没有任何 WHEN 分支时不修改父语句。
    pub fn end_case(self, alias: Option<&str>) -> &'a mut SelectBuilder {
        let Self {
            parent,
            target,
            whens,
            else_result,
            bindings,
        } = self;

        if whens.is_empty() {
            tracing::debug!("case expression without WHEN branches ignored");
            return parent;
        }

        let mut text = Phrase::raw("CASE");
        for (criteria, result) in whens {
            text = text
                .and_raw(" WHEN ")
                .and(criteria)
                .and_raw(" THEN ")
                .and(result);
        }
        if let Some(result) = else_result {
            text = text.and_raw(" ELSE ").and(result);
        }
        text = text.and_raw(" END");

        match target {
            CaseTarget::Field => {
                if let Some(alias) = alias.filter(|a| !a.trim().is_empty()) {
                    text = text.and_raw(" AS ").and(parent.quoter().field(alias));
                }
                parent.push_field(text);
                parent.merge_bindings(&bindings);
            }
            CaseTarget::Where => {
                if let Some(alias) = alias {
                    tracing::debug!(alias, "alias of a CASE used in WHERE ignored");
                }
                let mut w = parent.new_where();
                w.set_clause(WhereClause::raw(text, bindings));
                parent.add_where(w);
            }
        }
        parent
    }

    fn prepare(&mut self, text: &str, values: impl IntoBindValues) -> Phrase {
        let text = self
            .bindings
            .bind_positional(text, values.into_bind_values());
        self.parent.quoter().field(&text)
    }
}

/// WhenBuilder：持有一个尚未给出结果的 WHEN 分支。
pub struct WhenBuilder<'a> {
    case: CaseBuilder<'a>,
    criteria: Phrase,
}

impl<'a> WhenBuilder<'a> {
    pub fn then(self, result: &str, values: impl IntoBindValues) -> CaseBuilder<'a> {
        let Self { mut case, criteria } = self;
        let result = case.prepare(result, values);
        case.whens.push((criteria, result));
        case
    }
}
