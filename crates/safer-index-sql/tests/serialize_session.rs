use pretty_assertions::assert_eq;
use safer_index_sql::{stmt::Statement, Params, Placeholder, Serializer};

/// Session statements bind nothing.
struct NoParams;

impl Params for NoParams {
    fn push(&mut self, param: &str) -> Placeholder {
        panic!("unexpected bind parameter {param:?}");
    }
}

fn serialize(stmt: &Statement) -> String {
    Serializer::postgresql().serialize(stmt, &mut NoParams)
}

#[test]
fn show_lock_timeout() {
    let sql = serialize(&Statement::show_lock_timeout());
    assert_eq!(sql, "SHOW lock_timeout;");
}

#[test]
fn disable_lock_timeout() {
    let sql = serialize(&Statement::disable_lock_timeout());
    assert_eq!(sql, "SET lock_timeout = 0;");
}

#[test]
fn restore_lock_timeout_quotes_value() {
    let sql = serialize(&Statement::set_lock_timeout("1s"));
    assert_eq!(sql, "SET lock_timeout = '1s';");

    let sql = serialize(&Statement::set_lock_timeout("it's"));
    assert_eq!(sql, "SET lock_timeout = 'it''s';");
}

#[test]
fn find_invalid_index_binds_name() {
    let mut params = Vec::<String>::new();
    let sql = Serializer::postgresql().serialize(
        &Statement::find_invalid_index("int_field_idx"),
        &mut params,
    );

    assert_eq!(
        sql,
        "SELECT relname FROM pg_class, pg_index WHERE (pg_index.indisvalid = false AND pg_index.indexrelid = pg_class.oid AND relname = $1);"
    );
    assert_eq!(params, ["int_field_idx"]);
}

#[test]
fn placeholders_count_from_one() {
    let mut params = Vec::<String>::new();
    assert_eq!(Params::push(&mut params, "a"), Placeholder(1));
    assert_eq!(Params::push(&mut params, "b"), Placeholder(2));
}
