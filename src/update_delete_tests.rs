#[cfg(test)]
mod tests {
    use crate::{Dialect, Flavor, LabelGenerator, SqlValue, Statement};
    use pretty_assertions::assert_eq;

    fn dialect(flavor: Flavor) -> Dialect {
        Dialect::new(flavor).with_labels(LabelGenerator::sequence())
    }

    #[test]
    fn update_assignments_and_where() {
        let mut ub = dialect(Flavor::MySQL).update();
        ub.table("users")
            .bind_field("name", "Ann")
            .field_value("visits", "visits + 1")
            .where_("id = ?", 9_i64);

        assert_eq!(
            ub.render(),
            "UPDATE users\nSET\n    `name` = :bind1,\n    `visits` = visits + 1\nWHERE\n    `id` = :bind2\n"
        );
        let b = ub.bindings();
        assert_eq!(b.labels(), vec![":bind1", ":bind2"]);
        assert_eq!(b.get(":bind1"), Some(&SqlValue::from("Ann")));
    }

    #[test]
    fn update_returning_on_postgres() {
        let mut ub = dialect(Flavor::PostgreSQL).update();
        ub.table("users")
            .field_value_bound("age", "?", 30_i64)
            .where_in("id", [1_i64, 2])
            .returning("id");

        assert_eq!(
            ub.render(),
            "UPDATE users\nSET\n    \"age\" = :bind1\nWHERE\n    \"id\" IN (:bind2, :bind3)\nRETURNING\n    \"id\"\n"
        );
        assert_eq!(ub.bindings().len(), 3);
    }

    #[test]
    fn update_returning_ignored_on_mysql() {
        let mut ub = dialect(Flavor::MySQL).update();
        ub.table("users").bind_field("a", 1_i64);
        let before = ub.render();
        ub.returning("id").returning_fields(["id"]);
        assert_eq!(ub.render(), before);
    }

    #[test]
    fn update_reset_where_keeps_assignments() {
        let mut ub = dialect(Flavor::MySQL).update();
        ub.table("t").bind_field("a", 1_i64).where_("b = ?", 2_i64);
        ub.reset_where();
        assert_eq!(ub.render(), "UPDATE t\nSET\n    `a` = :bind1\n");
        assert_eq!(ub.bindings().labels(), vec![":bind1"]);
    }

    #[test]
    fn delete_with_where_chain() {
        let mut db = dialect(Flavor::MySQL).delete();
        db.table("sessions")
            .where_("expires < ?", 100_i64)
            .where_not_in("user_id", [7_i64]);

        assert_eq!(
            db.render(),
            "DELETE FROM sessions\nWHERE\n    `expires` < :bind1\n    AND `user_id` NOT IN (:bind2)\n"
        );
        assert_eq!(db.bindings().len(), 2);

        let before = db.render();
        db.returning("id");
        assert_eq!(db.render(), before);
    }

    #[test]
    fn delete_returning_and_sub_select() {
        let d = dialect(Flavor::PostgreSQL);
        let mut banned = d.select();
        banned.field("id").from("banned").where_("reason = ?", "spam");

        let mut db = d.delete();
        db.table("Users").where_in_sub("id", banned).returning("id");

        assert_eq!(
            db.render(),
            "DELETE FROM \"Users\"\nWHERE\n    \"id\" IN (\n        SELECT\n            \"id\"\n        FROM\n            banned\n        WHERE\n            \"reason\" = :bind1\n    )\nRETURNING\n    \"id\"\n"
        );
        assert_eq!(db.bindings().get(":bind1"), Some(&SqlValue::from("spam")));
    }

    #[test]
    fn missing_table_has_no_trailing_space() {
        let d = dialect(Flavor::MySQL);
        let mut ub = d.update();
        ub.bind_field("a", 1_i64);
        assert_eq!(ub.render(), "UPDATE\nSET\n    `a` = :bind1\n");
        assert_eq!(d.delete().render(), "DELETE FROM\n");
    }

    #[test]
    fn set_flavor_applies_to_earlier_parts() {
        let d = dialect(Flavor::MySQL);
        let mut ub = d.update();
        ub.table("Users").bind_field("Name", "Ann").where_("Id = ?", 3_i64);
        ub.set_flavor(Flavor::PostgreSQL);
        assert_eq!(
            ub.render(),
            "UPDATE \"Users\"\nSET\n    \"Name\" = :bind1\nWHERE\n    \"Id\" = :bind2\n"
        );

        let mut db = d.delete();
        db.table("Users").where_in("Id", [1_i64, 2]);
        db.set_flavor(Flavor::PostgreSQL);
        assert_eq!(
            db.render(),
            "DELETE FROM \"Users\"\nWHERE\n    \"Id\" IN (:bind3, :bind4)\n"
        );
    }
}
