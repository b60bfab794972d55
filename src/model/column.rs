//! Column definitions.

use serde::Serialize;

use crate::error::{DdlError, DdlResult};
use crate::record::HostType;

/// One table column derived from one record field.
///
/// Whether a column is the auto-increment column is not stored here; it is
/// derived by asking the owning model (`Model::is_auto_increment`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Column name. Mutable during clause application (the `name` clause
    /// renames), fixed once recorded in the model's column mapping.
    pub name: String,
    /// Host value type category, used for dialect type mapping.
    pub host: HostType,
    /// First length/precision parameter. `0` means unspecified, `-1` is the
    /// explicit "unbounded" sentinel.
    pub len1: i32,
    /// Second length/precision parameter (scale for fixed-precision types).
    pub len2: i32,
    pub nullable: bool,
    pub has_default: bool,
    /// Default value literal; meaningful only when `has_default` is set.
    pub default: String,
}

impl Column {
    pub(crate) fn new(name: &str, host: HostType) -> Self {
        Self {
            name: name.to_string(),
            host,
            len1: 0,
            len2: 0,
            nullable: false,
            has_default: false,
            default: String::new(),
        }
    }

    /// Apply a `len(n)` or `len(n,m)` clause.
    pub(crate) fn set_len(&mut self, args: &[String]) -> DdlResult<()> {
        if args.is_empty() || args.len() > 2 {
            return Err(DdlError::arity("len", &self.name, "1 or 2", args.len()));
        }
        self.len1 = parse_int("len", &self.name, &args[0])?;
        if let Some(arg) = args.get(1) {
            self.len2 = parse_int("len", &self.name, arg)?;
        }
        Ok(())
    }
}

fn parse_int(clause: &'static str, column: &str, arg: &str) -> DdlResult<i32> {
    arg.parse::<i32>()
        .map_err(|_| DdlError::argument(clause, column, format!("invalid integer '{arg}'")))
}

/// Parse a boolean clause argument. Accepts the usual literal spellings.
pub(crate) fn parse_bool(clause: &'static str, column: &str, arg: &str) -> DdlResult<bool> {
    match arg.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(DdlError::argument(
            clause,
            column,
            format!("invalid boolean '{arg}'"),
        )),
    }
}
