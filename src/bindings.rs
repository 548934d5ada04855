//! Bindings：一条语句的 label → value 有序映射（参数登记表）。

use crate::label::LabelGenerator;
use crate::value::SqlValue;

/// 位置占位符字符，`bind_positional` 会把它替换为生成的 label。
pub const PLACEHOLDER: char = '?';

/// 语句持有的绑定参数表。
///
/// 保持插入顺序；同一个 label 只出现一次。
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    labels: LabelGenerator,
    entries: Vec<(String, SqlValue)>,
}

impl PartialEq for Bindings {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Bindings {
    pub fn new(labels: LabelGenerator) -> Self {
        Self {
            labels,
            entries: Vec::new(),
        }
    }

    /// 清空所有绑定（label 生成器保持不变）。
    pub fn init(&mut self) {
        self.entries.clear();
    }

    pub fn label_generator(&self) -> &LabelGenerator {
        &self.labels
    }

    pub fn set_label_generator(&mut self, labels: LabelGenerator) {
        self.labels = labels;
    }

    /// 新增或覆盖一个绑定；覆盖时保留原位置。
    pub fn set_binding(&mut self, label: impl Into<String>, value: impl Into<SqlValue>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    /// 批量 upsert；同一批里重复的 label 以最后一次为准。
    pub fn set_bindings<K, V>(&mut self, bindings: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<SqlValue>,
    {
        for (label, value) in bindings {
            self.set_binding(label, value);
        }
    }

    pub fn generate_label(&self) -> String {
        self.labels.next_label()
    }

    /// 把 `other` 中本地没有的 label 复制过来；本地已存在的 label 永不覆盖（外层语句优先）。
    pub fn merge_from(&mut self, other: &Bindings) {
        for (label, value) in &other.entries {
            if !self.contains(label) {
                self.entries.push((label.clone(), value.clone()));
            }
        }
    }

    /// 从左到右把 `text` 中的 `?` 替换成新生成的 label，并依次登记对应的值。
    ///
    /// 占位符数量与 `values` 长度不一致时原样返回 `text`，不登记任何绑定。
    pub fn bind_positional(&mut self, text: &str, values: Vec<SqlValue>) -> String {
        let count = text.matches(PLACEHOLDER).count();
        if count != values.len() {
            tracing::debug!(
                text,
                placeholders = count,
                values = values.len(),
                "placeholder count mismatch, binding skipped"
            );
            return text.to_string();
        }
        if count == 0 {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + count * 8);
        let mut values = values.into_iter();
        for c in text.chars() {
            if c != PLACEHOLDER {
                out.push(c);
                continue;
            }
            if let Some(value) = values.next() {
                let label = self.generate_label();
                out.push_str(&label);
                self.entries.push((label, value));
            }
        }
        out
    }

    pub fn get(&self, label: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(l, _)| l.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<(String, SqlValue)> {
        self.entries
    }
}

/// 可以作为一组绑定值传入的类型：标量会被规整成单元素列表，`()` 表示没有绑定值。
pub trait IntoBindValues {
    fn into_bind_values(self) -> Vec<SqlValue>;
}

impl IntoBindValues for () {
    fn into_bind_values(self) -> Vec<SqlValue> {
        Vec::new()
    }
}

macro_rules! scalar_bind_values {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoBindValues for $t {
                fn into_bind_values(self) -> Vec<SqlValue> {
                    vec![SqlValue::from(self)]
                }
            }
        )*
    };
}

scalar_bind_values!(
    SqlValue,
    bool,
    i32,
    i64,
    u32,
    u64,
    f64,
    String,
    &'static str,
    time::OffsetDateTime,
);

impl<T: Into<SqlValue>> IntoBindValues for Vec<T> {
    fn into_bind_values(self) -> Vec<SqlValue> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<SqlValue>, const N: usize> IntoBindValues for [T; N] {
    fn into_bind_values(self) -> Vec<SqlValue> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<SqlValue> + Clone> IntoBindValues for &[T] {
    fn into_bind_values(self) -> Vec<SqlValue> {
        self.iter().cloned().map(Into::into).collect()
    }
}
