#[cfg(test)]
mod tests {
    use crate::{Dialect, Flavor, LabelGenerator, RecursiveCte, Statement, UnionBuilder};
    use pretty_assertions::assert_eq;

    fn dialect(flavor: Flavor) -> Dialect {
        Dialect::new(flavor).with_labels(LabelGenerator::sequence())
    }

    fn tree_union(d: &Dialect) -> UnionBuilder {
        let mut base = d.select();
        base.field("id")
            .field("parent_id")
            .from("nodes")
            .where_("id = ?", 1_i64);
        let mut step = d.select();
        step.field("n.id")
            .field("n.parent_id")
            .from("nodes n")
            .join("tree t", "n.parent_id = t.id");

        let mut u = d.union();
        u.set_select(base, None).set_select(step, Some("ALL"));
        u
    }

    #[test]
    fn recursive_cte_renders_first() {
        let d = dialect(Flavor::PostgreSQL);
        let mut tail = d.select();
        tail.from("tree");

        let mut w = d.with();
        w.set_recursive("tree", tree_union(&d), ["id", "parent_id"])
            .set_suffix(tail);

        assert_eq!(
            w.render(),
            "WITH RECURSIVE tree (\"id\", \"parent_id\") AS (\n    SELECT\n        \"id\",\n        \"parent_id\"\n    FROM\n        nodes\n    WHERE\n        \"id\" = :bind1\n    UNION ALL\n    SELECT\n        n.id,\n        n.parent_id\n    FROM\n        nodes n\n    JOIN tree t ON n.parent_id = t.id\n)\nSELECT\n    *\nFROM\n    tree\n"
        );
        assert_eq!(w.bindings().labels(), vec![":bind1"]);
    }

    #[test]
    fn recursive_ready_needs_alias_and_union() {
        let d = dialect(Flavor::PostgreSQL);
        let mut rec = RecursiveCte::default();
        assert!(!rec.is_ready());
        rec.set_alias("tree");
        assert!(!rec.is_ready());
        rec.set_union(tree_union(&d));
        assert!(rec.is_ready());
        rec.set_alias("  ");
        assert!(!rec.is_ready());
    }

    #[test]
    fn not_ready_recursive_is_omitted_without_stray_commas() {
        let d = dialect(Flavor::PostgreSQL);
        let mut recent = d.select();
        recent.from("events");
        let mut tail = d.select();
        tail.from("recent");

        let mut w = d.with();
        w.recursive_mut().set_alias("tree");
        w.set_statement("recent", recent).set_suffix(tail);

        assert_eq!(
            w.render(),
            "WITH recent AS (\n    SELECT\n        *\n    FROM\n        events\n)\nSELECT\n    *\nFROM\n    recent\n"
        );
    }

    #[test]
    fn members_are_comma_joined_and_overwritten_by_alias() {
        let d = dialect(Flavor::MySQL);
        let mut w = d.with();
        let (mut a, mut b, mut a2) = (d.select(), d.select(), d.select());
        a.from("x");
        b.from("y");
        a2.from("z");
        let mut tail = d.select();
        tail.from("a");

        w.set_statement("a", a)
            .set_statement("b", b)
            .set_statement("a", a2)
            .set_suffix(tail);

        assert_eq!(
            w.render(),
            "WITH a AS (\n    SELECT\n        *\n    FROM\n        z\n),\nb AS (\n    SELECT\n        *\n    FROM\n        y\n)\nSELECT\n    *\nFROM\n    a\n"
        );
    }

    #[test]
    fn recursive_ignored_where_unsupported() {
        let d = dialect(Flavor::MySQL);
        let mut w = d.with();
        w.set_recursive("tree", tree_union(&d), Vec::<&str>::new());
        assert!(!w.recursive().is_ready());
        assert_eq!(w.render(), "");
    }

    #[test]
    fn bindings_merge_in_traversal_order() {
        let d = dialect(Flavor::PostgreSQL);
        let mut tail = d.select();
        tail.from("tree").where_("depth < ?", 5_i64);
        let mut member = d.select();
        member.from("roots").where_("kind = ?", "r");

        let mut w = d.with();
        w.set_suffix(tail)
            .set_statement("roots", member)
            .set_recursive("tree", tree_union(&d), ["id"]);

        assert_eq!(w.bindings().labels(), vec![":bind3", ":bind2", ":bind1"]);
        assert!(w.render().starts_with("WITH RECURSIVE tree (\"id\") AS (\n"));
        assert!(w.render().contains("\n),\nroots AS (\n"));
    }

    #[test]
    fn member_alias_follows_flavor_at_render_time() {
        let d = dialect(Flavor::MySQL);
        let mut recent = d.select();
        recent.from("events");
        let mut tail = d.select();
        tail.from("Recent");

        let mut w = d.with();
        w.set_statement("Recent", recent).set_suffix(tail);
        w.set_flavor(Flavor::PostgreSQL);
        assert!(w.render().starts_with("WITH \"Recent\" AS (\n"));
        w.set_flavor(Flavor::MySQL);
        assert!(w.render().starts_with("WITH `Recent` AS (\n"));
    }
}
