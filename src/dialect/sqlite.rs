//! SQLite dialect.

use crate::error::{DdlError, DdlResult};
use crate::model::{Column, Model};
use crate::record::HostType;
use crate::sqlbuilder::SqlBuilder;

use super::{Dialect, index_statements, quote, write_col, write_constraints, write_pk};

/// SQLite renderer.
///
/// SQLite resolves column types by affinity, so length parameters are not
/// rendered. Named indexes cannot appear inside `CREATE TABLE`; they are
/// emitted as companion `CREATE INDEX` statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

static SQLITE: Sqlite = Sqlite;

/// Shared SQLite dialect instance.
pub fn sqlite() -> &'static Sqlite {
    &SQLITE
}

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_tuple(&self) -> (char, char) {
        ('"', '"')
    }

    fn sql(&self, query: &str) -> DdlResult<String> {
        Ok(query.to_string())
    }

    fn column_sql_type(&self, col: &Column) -> DdlResult<String> {
        let ty = match col.host {
            HostType::Bool | HostType::NullBool => "BOOLEAN",
            HostType::I8
            | HostType::I16
            | HostType::I32
            | HostType::I64
            | HostType::U8
            | HostType::U16
            | HostType::U32
            | HostType::U64
            | HostType::NullI64 => "INTEGER",
            HostType::F32 | HostType::F64 | HostType::NullF64 => "REAL",
            HostType::Str | HostType::Bytes | HostType::Chars | HostType::NullStr => "TEXT",
            HostType::DateTime => "DATETIME",
            HostType::Seq(_) | HostType::Other(_) => {
                return Err(DdlError::UnsupportedType(col.host.to_string()));
            }
        };
        Ok(ty.to_string())
    }

    fn create_table_sql(&self, model: &Model) -> DdlResult<Vec<String>> {
        let mut w = SqlBuilder::new("CREATE TABLE IF NOT EXISTS {");
        w.write(&model.name).write("}(");

        // SQLite only auto-increments a column declared with this exact
        // spelling, so the mapped type is bypassed here.
        if let Some(ai) = model.ai {
            w.write(&quote(self, &model.col(ai).name))
                .write(" INTEGER PRIMARY KEY AUTOINCREMENT,");
        }
        for (id, col) in model.columns() {
            if model.is_auto_increment(id) {
                continue;
            }
            write_col(self, &mut w, col)?;
            w.write_char(',');
        }

        if !model.pk.is_empty() && Some(model.pk[0]) != model.ai {
            write_pk(self, &mut w, model);
            w.write_char(',');
        }
        write_constraints(self, &mut w, model);

        w.truncate_last(1).write_char(')');

        let mut stmts = vec![w.finish()];
        stmts.extend(index_statements(self, model));
        Ok(stmts)
    }

    fn limit_sql(&self, limit: i64, offset: Option<i64>) -> (String, Vec<i64>) {
        match offset {
            Some(offset) => (" LIMIT ? OFFSET ?".to_string(), vec![limit, offset]),
            None => (" LIMIT ?".to_string(), vec![limit]),
        }
    }

    fn truncate_table_sql(&self, table: &str, ai_col: &str) -> String {
        if ai_col.is_empty() {
            format!("DELETE FROM {table}")
        } else {
            // Resetting the rowid sequence empties the AUTOINCREMENT counter.
            format!("DELETE FROM {table};DELETE FROM sqlite_sequence WHERE name='{table}'")
        }
    }

    fn transactional_ddl(&self) -> bool {
        true
    }
}
