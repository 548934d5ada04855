#[cfg(test)]
mod tests {
    use crate::{Dialect, Flavor, LabelGenerator, SelectBuilder, Statement, UnionType};
    use pretty_assertions::assert_eq;

    fn pick(d: &Dialect, table: &str, criteria: &str, value: i64) -> SelectBuilder {
        let mut sb = d.select();
        sb.field("id").from(table).where_(criteria, value);
        sb
    }

    #[test]
    fn union_type_parse() {
        assert_eq!(UnionType::parse(None), Some(UnionType::Default));
        assert_eq!(UnionType::parse(Some("")), Some(UnionType::Default));
        assert_eq!(UnionType::parse(Some("all")), Some(UnionType::All));
        assert_eq!(UnionType::parse(Some(" Distinct ")), Some(UnionType::Distinct));
        assert_eq!(UnionType::parse(Some("EXCEPT")), None);
    }

    #[test]
    fn union_all_of_two_selects() {
        let d = Dialect::new(Flavor::MySQL).with_labels(LabelGenerator::sequence());
        let mut u = d.union();
        u.set_select(pick(&d, "a", "x = ?", 1), Some("bogus"))
            .set_select(pick(&d, "b", "y = ?", 2), Some("all"));

        assert_eq!(
            u.render(),
            "SELECT\n    `id`\nFROM\n    a\nWHERE\n    `x` = :bind1\nUNION ALL\nSELECT\n    `id`\nFROM\n    b\nWHERE\n    `y` = :bind2\n"
        );
        assert_eq!(u.bindings().labels(), vec![":bind1", ":bind2"]);
    }

    #[test]
    fn fewer_than_two_members_is_empty() {
        let d = Dialect::new(Flavor::PostgreSQL).with_labels(LabelGenerator::sequence());
        let mut u = d.union();
        assert_eq!(u.render(), "");
        assert!(u.bindings().is_empty());

        u.set_select(pick(&d, "a", "x = ?", 1), None);
        assert_eq!(u.len(), 1);
        assert_eq!(u.render(), "");
        assert!(u.bindings().is_empty());
    }

    #[test]
    fn first_member_type_has_no_effect() {
        let build = |first: Option<&str>| {
            let d = Dialect::new(Flavor::MySQL).with_labels(LabelGenerator::sequence());
            let mut u = d.union();
            u.set_select(pick(&d, "a", "x = ?", 1), first)
                .set_select(pick(&d, "b", "y = ?", 2), Some("distinct"));
            u.render()
        };
        let plain = build(None);
        assert_eq!(build(Some("ALL")), plain);
        assert_eq!(build(Some("nonsense")), plain);
        assert!(plain.contains("\nUNION DISTINCT\n"));
    }

    #[test]
    fn invalid_later_type_skips_member() {
        let d = Dialect::new(Flavor::MySQL).with_labels(LabelGenerator::sequence());
        let mut u = d.union();
        u.set_select(pick(&d, "a", "x = ?", 1), None)
            .set_select(pick(&d, "b", "y = ?", 2), None);
        let before = u.render();

        u.set_select(pick(&d, "c", "z = ?", 3), Some("INTERSECT"));
        assert_eq!(u.len(), 2);
        assert_eq!(u.render(), before);
        assert!(before.contains("\nUNION\n"));
        assert_eq!(u.bindings().len(), 2);
    }

    #[test]
    fn empty_member_leaves_no_gap() {
        let d = Dialect::new(Flavor::MySQL).with_labels(LabelGenerator::sequence());
        let mut lonely = d.union();
        lonely.set_select(pick(&d, "z", "q = ?", 9), None);

        let mut u = d.union();
        u.set_select(lonely, None)
            .set_select(pick(&d, "a", "x = ?", 1), Some("all"))
            .set_select(pick(&d, "b", "y = ?", 2), None);

        assert_eq!(
            u.render(),
            "SELECT\n    `id`\nFROM\n    a\nWHERE\n    `x` = :bind2\nUNION\nSELECT\n    `id`\nFROM\n    b\nWHERE\n    `y` = :bind3\n"
        );
        assert_eq!(u.bindings().labels(), vec![":bind2", ":bind3"]);
    }
}
