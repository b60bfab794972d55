//! Dialect renderers: translate a table model into engine-specific DDL.
//!
//! Each supported engine is a stateless unit struct implementing
//! [`Dialect`]; accessor functions (`mysql()`, `sqlite()`, `postgres()`)
//! hand out shared static instances. Assembly helpers common to every
//! engine (column definitions, primary-key and constraint clauses) live in
//! this module; everything engine-specific stays in the per-dialect files.

mod mysql;
mod postgres;
mod sqlite;

#[cfg(test)]
mod tests;

pub use mysql::{Mysql, mysql};
pub use postgres::{Postgres, postgres};
pub use sqlite::{Sqlite, sqlite};

use crate::error::DdlResult;
use crate::model::{Column, Model};
use crate::sqlbuilder::SqlBuilder;

/// Engine-specific SQL renderer.
///
/// Generated statements quote identifiers with the dialect's quote pair and
/// refer to the table as a `{name}` placeholder, resolved by the execution
/// layer (which may prefix table names).
pub trait Dialect: Send + Sync {
    /// Dialect name for diagnostics.
    fn name(&self) -> &'static str;

    /// Identifier quote pair.
    fn quote_tuple(&self) -> (char, char);

    /// Pass a statement through dialect-specific literal rewriting, such as
    /// placeholder conversion for engines with numbered parameters.
    fn sql(&self, query: &str) -> DdlResult<String>;

    /// Column type for `col` in this engine.
    fn column_sql_type(&self, col: &Column) -> DdlResult<String>;

    /// Render `CREATE TABLE` for a model, plus any companion statements
    /// (engines without inline index syntax emit separate `CREATE INDEX`).
    fn create_table_sql(&self, model: &Model) -> DdlResult<Vec<String>>;

    /// Row-limiting fragment plus its bound arguments.
    fn limit_sql(&self, limit: i64, offset: Option<i64>) -> (String, Vec<i64>);

    /// Statement emptying a table. `ai_col` names the auto-increment column
    /// for engines that must reset its counter alongside; empty when there
    /// is none.
    fn truncate_table_sql(&self, table: &str, ai_col: &str) -> String;

    /// Whether this engine can run DDL inside a transaction. Callers use
    /// this to decide if schema changes can be wrapped in a rollback-capable
    /// transaction.
    fn transactional_ddl(&self) -> bool;
}

/// Quote an identifier with the dialect's quote pair.
pub(crate) fn quote(d: &dyn Dialect, ident: &str) -> String {
    let (open, close) = d.quote_tuple();
    format!("{open}{ident}{close}")
}

/// Write one column definition: quoted name, type, `NOT NULL`, `DEFAULT`.
pub(crate) fn write_col(d: &dyn Dialect, w: &mut SqlBuilder, col: &Column) -> DdlResult<()> {
    w.write(&quote(d, &col.name))
        .write_char(' ')
        .write(&d.column_sql_type(col)?);
    if !col.nullable {
        w.write(" NOT NULL");
    }
    if col.has_default {
        w.write(" DEFAULT ").write(&col.default);
    }
    Ok(())
}

/// Write the table-level primary-key clause.
pub(crate) fn write_pk(d: &dyn Dialect, w: &mut SqlBuilder, model: &Model) {
    w.write("PRIMARY KEY(");
    for &id in &model.pk {
        w.write(&quote(d, &model.col(id).name)).write_char(',');
    }
    w.truncate_last(1).write_char(')');
}

/// Write check, foreign-key and unique constraints, each with a trailing
/// comma for the caller to balance.
pub(crate) fn write_constraints(d: &dyn Dialect, w: &mut SqlBuilder, model: &Model) {
    for (name, expr) in &model.checks {
        w.write("CONSTRAINT ")
            .write(&quote(d, name))
            .write(" CHECK(")
            .write(expr)
            .write("),");
    }
    for (name, fk) in &model.foreign_keys {
        w.write("CONSTRAINT ")
            .write(&quote(d, name))
            .write(" FOREIGN KEY(")
            .write(&quote(d, &model.col(fk.col).name))
            .write(") REFERENCES ")
            .write(&fk.ref_table)
            .write_char('(')
            .write(&quote(d, &fk.ref_col))
            .write_char(')');
        if let Some(rule) = &fk.update_rule {
            w.write(" ON UPDATE ").write(rule);
        }
        if let Some(rule) = &fk.delete_rule {
            w.write(" ON DELETE ").write(rule);
        }
        w.write_char(',');
    }
    for (name, cols) in &model.unique_indexes {
        w.write("CONSTRAINT ")
            .write(&quote(d, name))
            .write(" UNIQUE(");
        for &id in cols {
            w.write(&quote(d, &model.col(id).name)).write_char(',');
        }
        w.truncate_last(1).write("),");
    }
}

/// `CREATE INDEX` statements for engines without inline index syntax.
pub(crate) fn index_statements(d: &dyn Dialect, model: &Model) -> Vec<String> {
    model
        .key_indexes
        .iter()
        .map(|(name, cols)| {
            let mut w = SqlBuilder::new("CREATE INDEX ");
            w.write(&quote(d, name))
                .write(" ON {")
                .write(&model.name)
                .write("}(");
            for &id in cols {
                w.write(&quote(d, &model.col(id).name)).write_char(',');
            }
            w.truncate_last(1).write_char(')');
            w.finish()
        })
        .collect()
}
