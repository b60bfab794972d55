//! PostgreSQL dialect.

use crate::error::{DdlError, DdlResult};
use crate::model::{Column, Model};
use crate::record::HostType;
use crate::sqlbuilder::SqlBuilder;

use super::{Dialect, index_statements, quote, write_col, write_constraints, write_pk};

/// PostgreSQL renderer.
///
/// PostgreSQL has no unsigned integer types; unsigned categories map one
/// size tier up. Auto-increment columns render as `SERIAL`/`BIGSERIAL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

static POSTGRES: Postgres = Postgres;

/// Shared PostgreSQL dialect instance.
pub fn postgres() -> &'static Postgres {
    &POSTGRES
}

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_tuple(&self) -> (char, char) {
        ('"', '"')
    }

    /// Rewrite `?` placeholders to numbered `$1..$n` parameters, leaving
    /// question marks inside string literals untouched.
    fn sql(&self, query: &str) -> DdlResult<String> {
        let mut out = String::with_capacity(query.len() + 4);
        let mut n = 0usize;
        let mut in_literal = false;
        for c in query.chars() {
            match c {
                '\'' => {
                    in_literal = !in_literal;
                    out.push(c);
                }
                '?' if !in_literal => {
                    n += 1;
                    out.push('$');
                    out.push_str(&n.to_string());
                }
                _ => out.push(c),
            }
        }
        Ok(out)
    }

    fn column_sql_type(&self, col: &Column) -> DdlResult<String> {
        let numeric = || {
            if col.len1 <= 0 || col.len2 <= 0 {
                return Err(DdlError::MissingLength {
                    column: col.name.clone(),
                });
            }
            Ok(format!("NUMERIC({},{})", col.len1, col.len2))
        };
        let text = || {
            if col.len1 > 0 && col.len1 <= 65533 {
                format!("VARCHAR({})", col.len1)
            } else {
                "TEXT".to_string()
            }
        };

        Ok(match col.host {
            HostType::Bool | HostType::NullBool => "BOOLEAN".to_string(),
            HostType::I8 | HostType::I16 => "SMALLINT".to_string(),
            HostType::I32 => "INT".to_string(),
            HostType::I64 | HostType::NullI64 => "BIGINT".to_string(),
            HostType::U8 | HostType::U16 => "INT".to_string(),
            HostType::U32 | HostType::U64 => "BIGINT".to_string(),
            HostType::F32 | HostType::F64 | HostType::NullF64 => numeric()?,
            HostType::Str | HostType::Bytes | HostType::Chars | HostType::NullStr => text(),
            HostType::DateTime => "TIMESTAMP".to_string(),
            HostType::Seq(_) | HostType::Other(_) => {
                return Err(DdlError::UnsupportedType(col.host.to_string()));
            }
        })
    }

    fn create_table_sql(&self, model: &Model) -> DdlResult<Vec<String>> {
        let mut w = SqlBuilder::new("CREATE TABLE IF NOT EXISTS {");
        w.write(&model.name).write("}(");

        if let Some(ai) = model.ai {
            let col = model.col(ai);
            let serial = match col.host {
                HostType::I64 | HostType::U64 => "BIGSERIAL",
                _ => "SERIAL",
            };
            w.write(&quote(self, &col.name))
                .write_char(' ')
                .write(serial)
                .write(" PRIMARY KEY,");
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
        // Fragments use `?`; callers run the final statement through
        // `sql()` for `$n` numbering.
        match offset {
            Some(offset) => (" LIMIT ? OFFSET ?".to_string(), vec![limit, offset]),
            None => (" LIMIT ?".to_string(), vec![limit]),
        }
    }

    fn truncate_table_sql(&self, table: &str, _ai_col: &str) -> String {
        format!("TRUNCATE TABLE {table} RESTART IDENTITY")
    }

    fn transactional_ddl(&self) -> bool {
        true
    }
}
