//! UnionBuilder：把多条语句用 UNION / UNION ALL / UNION DISTINCT 串起来。

use crate::bindings::Bindings;
use crate::flavor::{Flavor, default_flavor};
use crate::label::LabelGenerator;
use crate::statement::Statement;
use crate::string_builder::StringBuilder;
use crate::value::SqlValue;
use std::fmt;

/// 相邻两个成员之间的集合运算类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnionType {
    /// 方言默认（裸 `UNION`）。
    #[default]
    Default,
    All,
    Distinct,
}

impl UnionType {
    /// `None` 或空串为 `Default`；`ALL`/`DISTINCT` 大小写不敏感；其它值返回 `None`。
    pub fn parse(s: Option<&str>) -> Option<Self> {
        let Some(s) = s else {
            return Some(Self::Default);
        };
        match s.trim().to_ascii_uppercase().as_str() {
            "" => Some(Self::Default),
            "ALL" => Some(Self::All),
            "DISTINCT" => Some(Self::Distinct),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Default => "UNION",
            Self::All => "UNION ALL",
            Self::Distinct => "UNION DISTINCT",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnionBuilder {
    flavor: Flavor,
    bindings: Bindings,
    members: Vec<(UnionType, Box<dyn Statement>)>,
}

impl Default for UnionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UnionBuilder {
    pub fn new() -> Self {
        Self {
            flavor: default_flavor(),
            bindings: Bindings::new(LabelGenerator::default()),
            members: Vec::new(),
        }
    }

    pub fn set_flavor(&mut self, flavor: Flavor) -> Flavor {
        std::mem::replace(&mut self.flavor, flavor)
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn set_label_generator(&mut self, labels: LabelGenerator) -> &mut Self {
        self.bindings.set_label_generator(labels);
        self
    }

    pub fn label_generator(&self) -> &LabelGenerator {
        self.bindings.label_generator()
    }

    pub fn set_binding(&mut self, label: impl Into<String>, value: impl Into<SqlValue>) -> &mut Self {
        self.bindings.set_binding(label, value);
        self
    }

    /// 追加一个成员。
    ///
    /// 第一个成员的 `union_type` 不起作用；之后的成员只接受 `None`、`ALL`、`DISTINCT`，
    /// 其它值忽略本次调用（成员不会被加入）。
    pub fn set_select(
        &mut self,
        select: impl Statement + 'static,
        union_type: Option<&str>,
    ) -> &mut Self {
        let kind = if self.members.is_empty() {
            UnionType::Default
        } else {
            match UnionType::parse(union_type) {
                Some(kind) => kind,
                None => {
                    tracing::debug!(union_type, "unsupported union type, member ignored");
                    return self;
                }
            }
        };
        self.members.push((kind, Box::new(select)));
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn reset(&mut self) -> &mut Self {
        self.members.clear();
        self
    }

    fn is_complete(&self) -> bool {
        self.members.len() >= 2
    }
}

impl Statement for UnionBuilder {
    /// 少于两个成员时返回空串。
    fn render(&self) -> String {
        if !self.is_complete() {
            return String::new();
        }
        let mut buf = StringBuilder::new();
        let mut written = 0usize;
        for (kind, member) in &self.members {
            let text = member.render();
            let text = text.trim_end_matches('\n');
            // 渲染为空的成员（例如不足两个成员的内层 union）整个跳过
            if text.is_empty() {
                tracing::debug!("empty union member skipped");
                continue;
            }
            if written > 0 {
                buf.write_line(kind.keyword());
            }
            buf.write_line(text);
            written += 1;
        }
        buf.into_string()
    }

    fn bindings(&self) -> Bindings {
        if !self.is_complete() {
            return Bindings::new(self.bindings.label_generator().clone());
        }
        let mut out = self.bindings.clone();
        for (_, member) in &self.members {
            out.merge_from(&member.bindings());
        }
        out
    }

    fn flavor(&self) -> Flavor {
        self.flavor
    }
}

impl fmt::Display for UnionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
