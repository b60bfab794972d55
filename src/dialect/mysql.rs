//! MySQL dialect.

use crate::error::{DdlError, DdlResult};
use crate::model::{Column, Model};
use crate::record::HostType;
use crate::sqlbuilder::SqlBuilder;

use super::{Dialect, quote, write_col, write_constraints, write_pk};

/// MySQL renderer.
///
/// Recognized table options:
/// - `engine(innodb)` — storage engine
/// - `charset(utf8mb4)` — character set
#[derive(Debug, Clone, Copy, Default)]
pub struct Mysql;

static MYSQL: Mysql = Mysql;

/// Shared MySQL dialect instance.
pub fn mysql() -> &'static Mysql {
    &MYSQL
}

impl Dialect for Mysql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_tuple(&self) -> (char, char) {
        ('`', '`')
    }

    fn sql(&self, query: &str) -> DdlResult<String> {
        Ok(query.to_string())
    }

    fn column_sql_type(&self, col: &Column) -> DdlResult<String> {
        // Integer display width applies only when a positive length was set.
        let int_len = |base: &str| {
            if col.len1 > 0 {
                format!("{base}({})", col.len1)
            } else {
                base.to_string()
            }
        };
        let double = || {
            if col.len1 <= 0 || col.len2 <= 0 {
                return Err(DdlError::MissingLength {
                    column: col.name.clone(),
                });
            }
            Ok(format!("DOUBLE({},{})", col.len1, col.len2))
        };
        let text = || {
            if col.len1 > 0 && col.len1 <= 65533 {
                format!("VARCHAR({})", col.len1)
            } else {
                "LONGTEXT".to_string()
            }
        };

        Ok(match col.host {
            HostType::Bool | HostType::NullBool => "BOOLEAN".to_string(),
            HostType::I8 => int_len("SMALLINT"),
            HostType::I16 => int_len("MEDIUMINT"),
            HostType::I32 => int_len("INT"),
            HostType::I64 | HostType::NullI64 => int_len("BIGINT"),
            HostType::U8 => format!("{} UNSIGNED", int_len("SMALLINT")),
            HostType::U16 => format!("{} UNSIGNED", int_len("MEDIUMINT")),
            HostType::U32 => format!("{} UNSIGNED", int_len("INT")),
            HostType::U64 => format!("{} UNSIGNED", int_len("BIGINT")),
            HostType::F32 | HostType::F64 | HostType::NullF64 => double()?,
            HostType::Str | HostType::Bytes | HostType::Chars | HostType::NullStr => text(),
            HostType::DateTime => "DATETIME".to_string(),
            HostType::Seq(_) | HostType::Other(_) => {
                return Err(DdlError::UnsupportedType(col.host.to_string()));
            }
        })
    }

    fn create_table_sql(&self, model: &Model) -> DdlResult<Vec<String>> {
        let mut w = SqlBuilder::new("CREATE TABLE IF NOT EXISTS {");
        w.write(&model.name).write("}(");

        // The auto-increment column declares itself primary inline.
        if let Some(ai) = model.ai {
            write_col(self, &mut w, model.col(ai))?;
            w.write(" PRIMARY KEY AUTO_INCREMENT,");
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

        for (name, cols) in &model.key_indexes {
            w.write("INDEX ").write(&quote(self, name)).write_char('(');
            for &id in cols {
                w.write(&quote(self, &model.col(id).name)).write_char(',');
            }
            w.truncate_last(1).write("),");
        }

        w.truncate_last(1).write_char(')');
        self.write_table_options(&mut w, model)?;

        Ok(vec![w.finish()])
    }

    fn limit_sql(&self, limit: i64, offset: Option<i64>) -> (String, Vec<i64>) {
        match offset {
            Some(offset) => (" LIMIT ? OFFSET ?".to_string(), vec![limit, offset]),
            None => (" LIMIT ?".to_string(), vec![limit]),
        }
    }

    fn truncate_table_sql(&self, table: &str, _ai_col: &str) -> String {
        format!("TRUNCATE TABLE {table}")
    }

    fn transactional_ddl(&self) -> bool {
        false
    }
}

impl Mysql {
    /// Append table options after the closing parenthesis. A recognized
    /// option with zero arguments emits nothing; more than one argument is
    /// an error.
    fn write_table_options(&self, w: &mut SqlBuilder, model: &Model) -> DdlResult<()> {
        if let Some(args) = model.meta.get("engine") {
            match args.len() {
                0 => {}
                1 => {
                    w.write(" ENGINE=").write(&args[0]);
                }
                _ => {
                    return Err(DdlError::InvalidTableOption {
                        option: "engine".to_string(),
                    });
                }
            }
        }
        if let Some(args) = model.meta.get("charset") {
            match args.len() {
                0 => {}
                1 => {
                    w.write(" CHARACTER SET=").write(&args[0]);
                }
                _ => {
                    return Err(DdlError::InvalidTableOption {
                        option: "charset".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
