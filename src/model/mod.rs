//! Table models derived from record types.
//!
//! [`Model`] is the normalized, validated schema of one table: columns,
//! primary key, auto-increment and optimistic-lock columns, indexes,
//! foreign keys, check constraints and table-level metadata. Models are
//! built from [`Record`](crate::record::Record) descriptors by the builder
//! and cached per type by [`ModelCache`].

pub mod column;

mod builder;
mod cache;


pub use cache::ModelCache;
pub use column::Column;

pub(crate) use builder::build;

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{DdlError, DdlResult};

/// Identifier of a column within its owning model.
///
/// Shared references between the column table, primary key, indexes and
/// foreign keys are expressed as ids, so a rename through the `name` clause
/// never leaves a stale reference behind.
pub type ColId = usize;

/// The constraint namespace a name is registered under. All four namespaces
/// share one case-insensitive name space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintKind {
    Index,
    Unique,
    ForeignKey,
    Check,
}

impl ConstraintKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Unique => "unique",
            Self::ForeignKey => "foreign key",
            Self::Check => "check",
        }
    }

    /// Whether repeating a name in this namespace adds to an existing
    /// constraint. Indexes accumulate columns; foreign keys and checks must
    /// be uniquely named.
    fn accumulates(self) -> bool {
        matches!(self, Self::Index | Self::Unique)
    }
}

/// A foreign-key constraint on one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForeignKey {
    /// Owning column.
    pub col: ColId,
    pub ref_table: String,
    pub ref_col: String,
    pub update_rule: Option<String>,
    pub delete_rule: Option<String>,
}

/// One table's full schema.
///
/// Immutable once construction succeeds; callers receive shared read-only
/// views (`Arc<Model>`) from the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    /// Table name.
    pub name: String,
    /// Every retained column, in declaration order. Indexed by [`ColId`].
    cols: Vec<Column>,
    /// Finalized column name → column, in insertion order. A later column
    /// with the same finalized name shadows the earlier mapping.
    names: IndexMap<String, ColId>,
    /// Primary-key columns, in declaration order.
    pub pk: Vec<ColId>,
    /// The auto-increment column, if any. When present it is also the sole
    /// primary-key entry.
    pub ai: Option<ColId>,
    /// The optimistic-lock column, if any.
    pub occ: Option<ColId>,
    /// Key index name → columns, in registration order.
    pub key_indexes: IndexMap<String, Vec<ColId>>,
    /// Unique index name → columns, in registration order.
    pub unique_indexes: IndexMap<String, Vec<ColId>>,
    /// Foreign-key constraint name → definition.
    pub foreign_keys: IndexMap<String, ForeignKey>,
    /// Check constraint name → expression.
    pub checks: IndexMap<String, String>,
    /// Table-level options (storage engine, character set, ...), passed
    /// through verbatim for the dialect to interpret.
    pub meta: IndexMap<String, Vec<String>>,

    /// Constraint-name registry spanning all four namespaces, lowercased.
    #[serde(skip)]
    constraints: HashMap<String, ConstraintKind>,
}

impl Model {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cols: Vec::new(),
            names: IndexMap::new(),
            pk: Vec::new(),
            ai: None,
            occ: None,
            key_indexes: IndexMap::new(),
            unique_indexes: IndexMap::new(),
            foreign_keys: IndexMap::new(),
            checks: IndexMap::new(),
            meta: IndexMap::new(),
            constraints: HashMap::new(),
        }
    }

    /// Look up a column by id.
    pub fn col(&self, id: ColId) -> &Column {
        &self.cols[id]
    }

    /// Look up a column by its finalized name.
    pub fn col_by_name(&self, name: &str) -> Option<&Column> {
        self.names.get(name).map(|&id| &self.cols[id])
    }

    /// Id of the column with the given finalized name.
    pub fn col_id(&self, name: &str) -> Option<ColId> {
        self.names.get(name).copied()
    }

    /// Finalized columns in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (ColId, &Column)> {
        self.names.values().map(|&id| (id, &self.cols[id]))
    }

    /// Number of finalized columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// A column is auto-increment iff it is the model's AI column.
    pub fn is_auto_increment(&self, id: ColId) -> bool {
        self.ai == Some(id)
    }

    pub(crate) fn push_col(&mut self, col: Column) -> ColId {
        self.cols.push(col);
        self.cols.len() - 1
    }

    pub(crate) fn col_mut(&mut self, id: ColId) -> &mut Column {
        &mut self.cols[id]
    }

    /// Record the column under its finalized name. Deferred until every
    /// clause of the field has been applied, since `name` may rename.
    pub(crate) fn finalize_col(&mut self, id: ColId) {
        let name = self.cols[id].name.clone();
        self.names.insert(name, id);
    }

    /// Register `name` under a constraint namespace. Names are compared
    /// case-insensitively; a name held by a different namespace is always
    /// rejected, and re-registration under the same namespace is allowed
    /// only where it accumulates (multi-column indexes).
    pub(crate) fn register_constraint(
        &mut self,
        name: &str,
        kind: ConstraintKind,
    ) -> DdlResult<()> {
        let key = name.to_lowercase();
        match self.constraints.get(&key) {
            Some(&existing) if existing != kind || !kind.accumulates() => {
                Err(DdlError::ConstraintNameCollision {
                    name: name.to_string(),
                    existing: existing.as_str(),
                })
            }
            _ => {
                self.constraints.insert(key, kind);
                Ok(())
            }
        }
    }
}
