#[cfg(test)]
mod tests {
    use vat_core::{Error, Row, RowNames, Value};

    fn names() -> RowNames {
        ["id".to_string(), "name".to_string(), "score".to_string()].into()
    }

    fn row(id: i64, name: &str, score: f64) -> Row {
        let mut row = Row::new(names());
        row.set(0, id).unwrap();
        row.set(1, name).unwrap();
        row.set(2, score).unwrap();
        row
    }

    #[test]
    fn row_positional_and_named_access() {
        let mut row = row(1, "alice", 9.5);
        assert_eq!(row.len(), 3);
        assert_eq!(*row.get(1).unwrap(), Value::Varchar("alice".into()));
        assert!(matches!(row.get(3), Err(Error::Range(..))));
        assert!(matches!(row.set(3, 0), Err(Error::Range(..))));
        // Name lookup is case-insensitive.
        assert_eq!(*row.get_named("NAME").unwrap(), Value::Varchar("alice".into()));
        row.set_named("Score", 7.5).unwrap();
        assert_eq!(*row.get(2).unwrap(), Value::Float64(7.5));
        assert!(matches!(row.get_named("missing"), Err(Error::Access(..))));
    }

    #[test]
    fn row_always_has_a_sort_field() {
        let row = Row::new(names());
        assert_eq!(row.sort_fields().len(), 1);
        assert_eq!(row.sort_fields()[0].position, 0);

        let mut row = row;
        row.add_sort_field(1).unwrap();
        row.remove_sort_field(0).unwrap();
        row.remove_sort_field(1).unwrap();
        // Removing the last field restores the default on column 0.
        assert_eq!(row.sort_fields().len(), 1);
        assert_eq!(row.sort_fields()[0].position, 0);
        assert!(matches!(row.add_sort_field(9), Err(Error::Range(..))));
    }

    #[test]
    fn row_ordering() {
        let mut a = row(1, "alice", 9.5);
        let mut b = row(2, "bob", 7.0);
        // Sort on the id column, captured as an integer domain.
        a.replace_sort_field(0, 0).unwrap();
        b.replace_sort_field(0, 0).unwrap();
        assert_eq!(a.sort_fields(), b.sort_fields());
        assert!(a.less_than(&b).unwrap());
        assert!(!b.less_than(&a).unwrap());
        assert!(!a.less_than(&a).unwrap());

        let mut by_score = row(3, "carol", 1.0);
        by_score.replace_sort_field(0, 2).unwrap();
        assert!(matches!(
            a.less_than(&by_score),
            Err(Error::Access(..))
        ));
    }

    #[test]
    fn row_sort_field_maintenance() {
        let mut row = row(1, "alice", 9.5);
        row.add_sort_field(2).unwrap();
        // Duplicates are a no-op.
        row.add_sort_field(2).unwrap();
        assert_eq!(row.sort_fields().len(), 2);
        row.replace_sort_field(2, 1).unwrap();
        assert_eq!(row.sort_fields().len(), 2);
        assert!(row.sort_fields().iter().any(|f| f.position == 1));
        assert!(matches!(
            row.replace_sort_field(2, 1),
            Err(Error::Access(..))
        ));
    }

    #[test]
    fn row_equality() {
        let a = row(1, "alice", 9.5);
        let b = row(1, "alice", 9.5);
        assert_eq!(a, b);
        assert_ne!(a, row(2, "alice", 9.5));
        // Same rendering with a different held kind is not equal.
        let mut c = row(1, "alice", 9.5);
        c.set(0, 1 as u8).unwrap();
        assert_ne!(a, c);
        let shorter = Row::new(["id".to_string()].into());
        assert_ne!(a, shorter);
    }
}
