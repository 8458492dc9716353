//! Pure SQL text compilation: conditions, assignments, select modifiers and
//! the fixed DDL templates. Nothing here touches the engine.

mod condition;
mod ddl;
mod dml;
mod literal;
mod select;

pub use condition::compile_condition;
pub use ddl::{
    add_column_sql, create_index_sql, create_table_sql, drop_index_sql, drop_table_sql,
    rename_table_sql,
};
pub use dml::{
    DEFAULT_PRIMARY_KEY, compile_assignment, compile_assignment_keyed, compile_delete,
    compile_update, primary_key_value,
};
pub use literal::{escape_literal, literal, write_literal};
pub use select::{QueryOptions, compile_count, compile_options, compile_select};
