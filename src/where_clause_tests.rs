#[cfg(test)]
mod tests {
    use crate::{
        Dialect, Flavor, LabelGenerator, Quoter, SqlValue, Statement, Where, WhereClause,
    };
    use pretty_assertions::assert_eq;

    fn mysql() -> Dialect {
        Dialect::new(Flavor::MySQL).with_labels(LabelGenerator::sequence())
    }

    #[test]
    fn criteria_binds_then_quotes() {
        let labels = LabelGenerator::sequence();
        let clause = WhereClause::criteria(
            "Age > ? AND name = ?",
            vec![18.into(), "Fred".into()],
            &Quoter::new(Flavor::MySQL),
            &labels,
        );
        assert_eq!(clause.render(Flavor::MySQL, "    "), "`Age` > :bind1 AND `name` = :bind2");
        assert_eq!(clause.bindings().labels(), vec![":bind1", ":bind2"]);
    }

    #[test]
    fn value_membership_binds_whole_list() {
        let labels = LabelGenerator::sequence();
        let q = Quoter::new(Flavor::PostgreSQL);
        let clause =
            WhereClause::value_membership("grp", vec!["a".into(), "b".into()], false, &q, &labels);
        assert_eq!(clause.render(Flavor::PostgreSQL, "    "), "\"grp\" NOT IN (:bind1, :bind2)");
        let b = clause.bindings();
        assert_eq!(b.get(":bind1"), Some(&SqlValue::from("a")));
        assert_eq!(b.get(":bind2"), Some(&SqlValue::from("b")));
    }

    #[test]
    fn subquery_membership_delegates_bindings() {
        let d = mysql();
        let mut sub = d.select();
        sub.field("id").from("groups").where_("owner = ?", 7_i64);

        let clause = WhereClause::subquery_membership(
            "gid",
            Box::new(sub.clone()),
            true,
            &Quoter::new(Flavor::MySQL),
        );
        assert_eq!(
            clause.render(Flavor::MySQL, "    "),
            "`gid` IN (\n    SELECT\n        `id`\n    FROM\n        groups\n    WHERE\n        `owner` = :bind1\n)"
        );
        assert_eq!(clause.bindings(), sub.bindings());
    }

    #[test]
    fn where_wrapper_is_first_write_wins() {
        let labels = LabelGenerator::sequence();
        let mut w = Where::new(Quoter::new(Flavor::MySQL), labels);
        w.set_criteria("a = ?", 1_i64);
        let before = w.render(Flavor::MySQL, "    ");

        w.set_criteria("b = ?", 2_i64)
            .set_in_list("c", [1_i64, 2], true)
            .set_in_select("d", mysql().select(), true);

        assert_eq!(w.render(Flavor::MySQL, "    "), before);
        assert_eq!(before, "`a` = :bind1");
        assert_eq!(w.bindings().len(), 1);
    }

    #[test]
    fn unset_where_renders_nothing() {
        let w = Where::new(Quoter::new(Flavor::MySQL), LabelGenerator::sequence());
        assert!(!w.is_set());
        assert_eq!(w.render(Flavor::MySQL, "    "), "");
        assert!(w.bindings().is_empty());
    }

    #[test]
    fn where_chain_joins_with_and() {
        let d = mysql();
        for n in 1..=4 {
            let mut sb = d.select();
            sb.from("t");
            for i in 0..n {
                sb.where_(&format!("c{i} = {i}"), ());
            }
            let sql = sb.render();
            assert_eq!(sql.matches("AND ").count(), n - 1, "{sql}");
            assert!(!sql.contains("WHERE\n    AND"));
            assert!(!sql.trim_end().ends_with("AND"));
        }
    }

    #[test]
    fn mismatched_placeholders_are_left_alone() {
        let mut sb = mysql().select();
        sb.from("t").where_("a = ? AND b = ?", 1_i64);
        assert_eq!(sb.render(), "SELECT\n    *\nFROM\n    t\nWHERE\n    `a` = ? AND `b` = ?\n");
        assert!(sb.bindings().is_empty());
    }

    #[test]
    fn string_literal_words_are_not_quoted() {
        let mut sb = mysql().select();
        sb.from("t")
            .where_("status = 'in progress now'", ())
            .where_("note <> 'Draft' AND Kind = ?", "x");
        assert_eq!(
            sb.render(),
            "SELECT\n    *\nFROM\n    t\nWHERE\n    `status` = 'in progress now'\n    AND `note` <> 'Draft' AND `Kind` = :bind1\n"
        );
    }

    #[test]
    fn grouped_criteria_quotes_every_field() {
        let d = Dialect::new(Flavor::PostgreSQL).with_labels(LabelGenerator::sequence());
        let mut sb = d.select();
        sb.from("t").where_("(Name = ? OR Age = ?)", [1_i64, 2]);
        assert_eq!(
            sb.render(),
            "SELECT\n    *\nFROM\n    t\nWHERE\n    (\"Name\" = :bind1 OR \"Age\" = :bind2)\n"
        );
        assert_eq!(sb.bindings().labels(), vec![":bind1", ":bind2"]);
    }

    #[test]
    fn empty_in_list_is_skipped() {
        let mut sb = mysql().select();
        sb.from("t")
            .where_in("id", Vec::<i64>::new())
            .where_not_in("kind", Vec::<&str>::new());
        assert_eq!(sb.render(), "SELECT\n    *\nFROM\n    t\n");
        assert!(sb.bindings().is_empty());

        let mut w = Where::new(Quoter::new(Flavor::MySQL), LabelGenerator::sequence());
        w.set_in_list("id", Vec::<i64>::new(), true);
        assert!(!w.is_set());
        w.set_criteria("a = ?", 1_i64);
        assert_eq!(w.render(Flavor::MySQL, "    "), "`a` = :bind1");
    }

    #[test]
    fn criteria_follows_flavor_at_render_time() {
        let mut sb = mysql().select();
        sb.from("t").where_("Age > ?", 18_i64);
        sb.set_flavor(Flavor::PostgreSQL);
        sb.where_("Name = ?", "Fred");
        assert_eq!(
            sb.render(),
            "SELECT\n    *\nFROM\n    t\nWHERE\n    \"Age\" > :bind1\n    AND \"Name\" = :bind2\n"
        );
    }
}
