use syncopate::prelude::*;
use syncopate::query_builder::{
    compile_assignment, compile_condition, compile_delete, compile_select,
};

#[test]
fn scenario_a_equality_is_escaped() -> Result<(), StoreError> {
    let condition = Condition::new().equals("name", "O'Brien");
    assert_eq!(
        compile_select("users", Some(&condition), None)?,
        "SELECT * FROM users WHERE name = 'O''Brien'"
    );
    Ok(())
}

#[test]
fn scenario_b_operator_is_trimmed() -> Result<(), StoreError> {
    let condition = Condition::new().compare("age", "> ", 30);
    assert_eq!(
        compile_select("users", Some(&condition), None)?,
        "SELECT * FROM users WHERE age > 30"
    );
    Ok(())
}

#[test]
fn scenario_c_and_d_insert_or_update() -> Result<(), StoreError> {
    let insert = Record::new().with("name", "Ann");
    assert_eq!(
        compile_assignment("users", &insert)?,
        "INSERT INTO users (name) VALUES('Ann')"
    );
    let update = Record::new().with("id", 5).with("name", "Ann");
    assert_eq!(
        compile_assignment("users", &update)?,
        "UPDATE users SET name = 'Ann' WHERE id = 5"
    );
    Ok(())
}

#[test]
fn scenario_e_erase_without_condition() -> Result<(), StoreError> {
    assert_eq!(compile_delete("users", None)?, "DELETE FROM users");
    assert_eq!(compile_delete("users", Some(&Condition::new()))?, "DELETE FROM users");
    Ok(())
}

#[test]
fn scenario_f_membership() -> Result<(), StoreError> {
    let condition = Condition::new().is_in("status", ["a", "b"]);
    assert_eq!(
        compile_select("users", Some(&condition), None)?,
        "SELECT * FROM users WHERE status in ('a','b')"
    );
    Ok(())
}

#[test]
fn terms_join_in_insertion_order() -> Result<(), StoreError> {
    let condition = Condition::new()
        .equals("name", "Ann")
        .compare("age", ">=", 18)
        .not_in("status", ["banned"]);
    assert_eq!(
        compile_condition(Some(&condition))?,
        " WHERE name = 'Ann' AND age >= 18 AND status not in ('banned')"
    );
    Ok(())
}

#[test]
fn compilation_is_pure() -> Result<(), StoreError> {
    let condition = Condition::new().equals("name", "it's").compare("age", "<", 3);
    let first = compile_condition(Some(&condition))?;
    let second = compile_condition(Some(&condition))?;
    assert_eq!(first, second);

    let data = Record::new().with("name", "x").with("id", Value::Null);
    assert_eq!(compile_assignment("t", &data)?, compile_assignment("t", &data)?);
    Ok(())
}

#[test]
fn empty_inputs() -> Result<(), StoreError> {
    assert_eq!(compile_condition(None)?, "");
    assert_eq!(compile_condition(Some(&Condition::new()))?, "");
    let err = compile_assignment("users", &Record::new()).unwrap_err();
    assert!(err.is_invalid_argument());
    Ok(())
}

#[test]
fn select_options_follow_the_where_clause() -> Result<(), StoreError> {
    let condition = Condition::new().equals("active", true);
    let options = QueryOptions::default()
        .order_by("age DESC")
        .limit(10)
        .offset(20);
    assert_eq!(
        compile_select("users", Some(&condition), Some(&options))?,
        "SELECT * FROM users WHERE active = true ORDER BY age DESC LIMIT 10 OFFSET 20"
    );
    Ok(())
}
