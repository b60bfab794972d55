//! Schema extraction and dialect-aware DDL generation.
//!
//! `ddlgen` turns annotated record descriptions into normalized table
//! models and renders those models as `CREATE TABLE` statements for MySQL,
//! SQLite and PostgreSQL. Field behavior is driven by a compact annotation
//! language (`ai`, `pk`, `len(50)`, `fk(...)`, ...) attached to each field.
//!
//! ```
//! use ddlgen::prelude::*;
//!
//! struct User;
//!
//! impl Record for User {
//!     fn descriptor() -> Descriptor {
//!         Descriptor::record("User")
//!             .field(FieldDef::of::<i64>("id").tag("ai"))
//!             .field(FieldDef::of::<String>("name").tag("len(50)"))
//!     }
//!
//!     fn meta() -> Option<&'static str> {
//!         Some("name(users)")
//!     }
//! }
//!
//! let cache = ModelCache::new();
//! let model = cache.lookup_or_build::<User>()?;
//! let stmts = mysql().create_table_sql(&model)?;
//! assert_eq!(
//!     stmts[0],
//!     "CREATE TABLE IF NOT EXISTS {users}(\
//!      `id` BIGINT NOT NULL PRIMARY KEY AUTO_INCREMENT,\
//!      `name` VARCHAR(50) NOT NULL)"
//! );
//! # Ok::<(), ddlgen::DdlError>(())
//! ```

pub mod dialect;
pub mod error;
pub mod model;
pub mod record;
pub mod sqlbuilder;
pub mod tags;

pub use error::{DdlError, DdlResult};

/// Common imports.
pub mod prelude {
    pub use crate::dialect::{Dialect, mysql, postgres, sqlite};
    pub use crate::error::{DdlError, DdlResult};
    pub use crate::model::{ColId, Column, Model, ModelCache};
    pub use crate::record::{Descriptor, FieldDef, FieldKind, HostType, Record, RecordKind};
    pub use crate::sqlbuilder::SqlBuilder;
}
