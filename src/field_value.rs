//! FieldValue / FieldValueSet：INSERT 与 UPDATE 使用的列赋值集合。

use crate::bindings::{Bindings, PLACEHOLDER};
use crate::flavor::Flavor;
use crate::label::LabelGenerator;
use crate::quote::Phrase;
use crate::value::SqlValue;

/// 一个列赋值：列名、写入 SQL 的值标记，以及该标记对应的绑定。
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    field: Phrase,
    marker: String,
    bindings: Bindings,
}

impl FieldValue {
    /// 按三条规则构造：
    ///
    /// 1. `marker` 是 `?`、空串或未给出，且提供了 `bound`：生成 label 并绑定；
    /// 2. `marker` 是不含空格的 `:label`，且提供了 `bound`：以该 label 绑定；
    /// 3. 其它情况：`marker` 原样写入 SQL，不加引号也不绑定。
    pub fn new(
        field: impl Into<Phrase>,
        marker: Option<&str>,
        bound: Option<SqlValue>,
        labels: &LabelGenerator,
    ) -> Self {
        let field = field.into();
        let marker = marker.unwrap_or("");
        let mut bindings = Bindings::new(labels.clone());

        let marker = match bound {
            Some(value) if marker.is_empty() || marker == PLACEHOLDER.to_string() => {
                let label = bindings.generate_label();
                bindings.set_binding(label.clone(), value);
                label
            }
            Some(value) if is_explicit_label(marker) => {
                bindings.set_binding(marker, value);
                marker.to_string()
            }
            Some(_) => {
                tracing::debug!(
                    field = %field.source(),
                    marker,
                    "marker is neither placeholder nor label, bound value ignored"
                );
                marker.to_string()
            }
            None => marker.to_string(),
        };

        Self {
            field,
            marker,
            bindings,
        }
    }

    pub fn field(&self) -> &Phrase {
        &self.field
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn set_marker(&mut self, marker: impl Into<String>) {
        self.marker = marker.into();
    }

    pub fn set_bindings(&mut self, bindings: Bindings) {
        self.bindings = bindings;
    }
}

fn is_explicit_label(marker: &str) -> bool {
    marker.len() > 1 && marker.starts_with(':') && !marker.contains(char::is_whitespace)
}

/// 按插入顺序保存的 FieldValue 集合；同名列再次设置时原位替换。
#[derive(Debug, Clone, Default)]
pub struct FieldValueSet {
    values: Vec<FieldValue>,
}

impl FieldValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, value: FieldValue) {
        match self.values.iter_mut().find(|v| v.field.source() == value.field.source()) {
            Some(existing) => *existing = value,
            None => self.values.push(value),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.iter().find(|v| v.field.source() == field)
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldValue> {
        self.values.iter()
    }

    pub fn fields(&self, flavor: Flavor) -> Vec<String> {
        self.values.iter().map(|v| v.field.render(flavor)).collect()
    }

    pub fn markers(&self) -> Vec<String> {
        self.values.iter().map(|v| v.marker.clone()).collect()
    }

    pub fn merge_bindings_into(&self, dst: &mut Bindings) {
        for v in &self.values {
            dst.merge_from(&v.bindings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldValue, FieldValueSet};
    use crate::flavor::Flavor;
    use crate::label::LabelGenerator;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn placeholder_marker_is_auto_bound() {
        let labels = LabelGenerator::sequence();
        let fv = FieldValue::new("name", Some("?"), Some("Fred".into()), &labels);
        assert_eq!(fv.marker(), ":bind1");
        assert_eq!(fv.bindings().get(":bind1"), Some(&SqlValue::from("Fred")));

        let fv = FieldValue::new("age", None, Some(30.into()), &labels);
        assert_eq!(fv.marker(), ":bind2");
        let fv = FieldValue::new("age", Some(""), Some(31.into()), &labels);
        assert_eq!(fv.marker(), ":bind3");
    }

    #[test]
    fn explicit_label_is_bound_as_is() {
        let labels = LabelGenerator::sequence();
        let fv = FieldValue::new("name", Some(":who"), Some("Fred".into()), &labels);
        assert_eq!(fv.marker(), ":who");
        assert_eq!(fv.bindings().labels(), vec![":who"]);
    }

    #[test]
    fn other_markers_are_verbatim() {
        let labels = LabelGenerator::sequence();
        let fv = FieldValue::new("created", Some("NOW()"), None, &labels);
        assert_eq!(fv.marker(), "NOW()");
        assert!(fv.bindings().is_empty());

        let fv = FieldValue::new("n", Some("n + 1"), Some(2.into()), &labels);
        assert_eq!(fv.marker(), "n + 1");
        assert!(fv.bindings().is_empty());

        let fv = FieldValue::new("n", Some(": spaced"), Some(2.into()), &labels);
        assert!(fv.bindings().is_empty());

        let fv = FieldValue::new("n", Some("?"), None, &labels);
        assert_eq!(fv.marker(), "?");
        assert!(fv.bindings().is_empty());
    }

    #[test]
    fn set_replaces_same_field_in_place() {
        let labels = LabelGenerator::sequence();
        let mut set = FieldValueSet::new();
        set.set(FieldValue::new("a", Some("1"), None, &labels));
        set.set(FieldValue::new("b", Some("2"), None, &labels));
        set.set(FieldValue::new("a", Some("3"), None, &labels));
        assert_eq!(set.fields(Flavor::MySQL), vec!["a", "b"]);
        assert_eq!(set.get("a").map(FieldValue::marker), Some("3"));
        assert_eq!(set.markers(), vec!["3", "2"]);
    }
}
