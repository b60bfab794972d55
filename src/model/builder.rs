//! Schema model builder: walks a record descriptor and applies annotation
//! clauses to produce a validated [`Model`].

use tracing::debug;

use crate::error::{DdlError, DdlResult};
use crate::record::{FieldDef, FieldKind, HostType, Record, RecordKind};
use crate::tags;

use super::column::{Column, parse_bool};
use super::{ColId, ConstraintKind, ForeignKey, Model};

/// Skip marker: a field tagged with the literal `-` contributes no column.
const SKIP_TAG: &str = "-";

/// Derive a model from a record type. Uncached; [`super::ModelCache`] wraps
/// this with the per-type lookup.
pub(crate) fn build<R: Record>() -> DdlResult<Model> {
    let desc = R::descriptor();
    let fields = match desc.kind {
        RecordKind::Struct(fields) => fields,
        RecordKind::Scalar(name) => return Err(DdlError::InvalidKind(name.to_string())),
    };

    let mut model = Model::new(desc.name);
    walk_fields(&mut model, fields)?;

    if let Some(meta) = R::meta() {
        apply_meta(&mut model, meta)?;
    }

    debug!(table = %model.name, columns = model.len(), "derived table model");
    Ok(model)
}

/// Process fields in declaration order, recursing depth-first into embedded
/// sub-records so their columns merge into the same model.
fn walk_fields(model: &mut Model, fields: Vec<FieldDef>) -> DdlResult<()> {
    for field in fields {
        match field.kind {
            FieldKind::Embedded(desc) => {
                let RecordKind::Struct(inner) = desc.kind else {
                    return Err(DdlError::InvalidKind(desc.name.to_string()));
                };
                walk_fields(model, inner)?;
            }
            FieldKind::Column(host) => {
                apply_field(model, field.name, host, field.tag, field.exported)?;
            }
        }
    }
    Ok(())
}

fn apply_field(
    model: &mut Model,
    name: &str,
    host: HostType,
    tag: Option<&str>,
    exported: bool,
) -> DdlResult<()> {
    if !exported {
        return Ok(());
    }
    if tag == Some(SKIP_TAG) {
        return Ok(());
    }

    let id = model.push_col(Column::new(name, host));

    if let Some(tag) = tag {
        for (key, args) in tags::parse(tag)? {
            apply_clause(model, id, &key, &args)?;
        }
    }

    // The name clause may have renamed the column, so the mapping is
    // recorded only now.
    model.finalize_col(id);
    Ok(())
}

fn apply_clause(model: &mut Model, id: ColId, key: &str, args: &[String]) -> DdlResult<()> {
    match key {
        "name" => set_name(model, id, args),
        "index" => set_index(model, id, args),
        "unique" => set_unique(model, id, args),
        "pk" => set_pk(model, id, args),
        "ai" => set_ai(model, id, args),
        "nullable" => set_nullable(model, id, args),
        "len" => model.col_mut(id).set_len(args),
        "fk" => set_fk(model, id, args),
        "default" => set_default(model, id, args),
        "occ" => set_occ(model, id, args),
        _ => Err(DdlError::UnknownAnnotation {
            clause: key.to_string(),
            column: model.col(id).name.clone(),
        }),
    }
}

// name(colname)
fn set_name(model: &mut Model, id: ColId, args: &[String]) -> DdlResult<()> {
    if args.len() != 1 {
        return Err(DdlError::arity("name", &model.col(id).name, "1", args.len()));
    }
    model.col_mut(id).name = args[0].clone();
    Ok(())
}

// index(idx_name)
fn set_index(model: &mut Model, id: ColId, args: &[String]) -> DdlResult<()> {
    if args.len() != 1 {
        return Err(DdlError::arity("index", &model.col(id).name, "1", args.len()));
    }
    model.register_constraint(&args[0], ConstraintKind::Index)?;
    model.key_indexes.entry(args[0].clone()).or_default().push(id);
    Ok(())
}

// unique(unique_name)
fn set_unique(model: &mut Model, id: ColId, args: &[String]) -> DdlResult<()> {
    if args.len() != 1 {
        return Err(DdlError::arity("unique", &model.col(id).name, "1", args.len()));
    }
    model.register_constraint(&args[0], ConstraintKind::Unique)?;
    model
        .unique_indexes
        .entry(args[0].clone())
        .or_default()
        .push(id);
    Ok(())
}

// pk
fn set_pk(model: &mut Model, id: ColId, args: &[String]) -> DdlResult<()> {
    if !args.is_empty() {
        return Err(DdlError::arity("pk", &model.col(id).name, "0", args.len()));
    }
    if model.col(id).has_default {
        return Err(DdlError::state(
            &model.col(id).name,
            "a column with a default value cannot be a primary key",
        ));
    }
    match model.ai {
        // The AI column already is the whole primary key.
        Some(ai) if ai == id => Ok(()),
        Some(_) => Err(DdlError::state(
            &model.col(id).name,
            "an auto-increment column already defines the primary key",
        )),
        None => {
            model.pk.push(id);
            Ok(())
        }
    }
}

// ai
fn set_ai(model: &mut Model, id: ColId, args: &[String]) -> DdlResult<()> {
    let col = model.col(id);
    if !args.is_empty() {
        return Err(DdlError::arity("ai", &col.name, "0", args.len()));
    }
    if col.has_default {
        return Err(DdlError::state(
            &col.name,
            "a column with a default value cannot be auto-increment",
        ));
    }
    if col.nullable {
        return Err(DdlError::state(
            &col.name,
            "a nullable column cannot be auto-increment",
        ));
    }
    if !col.host.is_integer() {
        return Err(DdlError::state(
            &col.name,
            "auto-increment requires an integer column type",
        ));
    }
    if let Some(ai) = model.ai {
        if ai != id {
            return Err(DdlError::state(
                &model.col(id).name,
                "an auto-increment column already exists",
            ));
        }
    }

    model.ai = Some(id);
    // Auto-increment implies primary key and overrides any declared one.
    model.pk.clear();
    model.pk.push(id);
    Ok(())
}

// nullable, nullable(true), nullable(false)
fn set_nullable(model: &mut Model, id: ColId, args: &[String]) -> DdlResult<()> {
    let col = model.col(id);
    let value = match args.len() {
        0 => true,
        1 => parse_bool("nullable", &col.name, &args[0])?,
        n => return Err(DdlError::arity("nullable", &col.name, "0 or 1", n)),
    };

    if value && model.ai == Some(id) {
        return Err(DdlError::state(
            &col.name,
            "an auto-increment column cannot be nullable",
        ));
    }
    if value && model.occ == Some(id) {
        return Err(DdlError::state(
            &col.name,
            "the optimistic-lock column cannot be nullable",
        ));
    }

    model.col_mut(id).nullable = value;
    Ok(())
}

// fk(name,refTable,refCol[,updateRule[,deleteRule]])
fn set_fk(model: &mut Model, id: ColId, args: &[String]) -> DdlResult<()> {
    if args.len() < 3 || args.len() > 5 {
        return Err(DdlError::arity("fk", &model.col(id).name, "3 to 5", args.len()));
    }
    model.register_constraint(&args[0], ConstraintKind::ForeignKey)?;

    let fk = ForeignKey {
        col: id,
        ref_table: args[1].clone(),
        ref_col: args[2].clone(),
        update_rule: args.get(3).cloned(),
        delete_rule: args.get(4).cloned(),
    };
    model.foreign_keys.insert(args[0].clone(), fk);
    Ok(())
}

// default(value)
fn set_default(model: &mut Model, id: ColId, args: &[String]) -> DdlResult<()> {
    let col = model.col(id);
    if args.len() != 1 {
        return Err(DdlError::arity("default", &col.name, "1", args.len()));
    }
    if model.ai == Some(id) {
        return Err(DdlError::state(
            &col.name,
            "an auto-increment column cannot have a default value",
        ));
    }
    if model.pk.contains(&id) {
        return Err(DdlError::state(
            &col.name,
            "a primary-key column cannot have a default value",
        ));
    }

    let col = model.col_mut(id);
    col.has_default = true;
    col.default = args[0].clone();
    Ok(())
}

// occ, occ(true), occ(false)
fn set_occ(model: &mut Model, id: ColId, args: &[String]) -> DdlResult<()> {
    let col = model.col(id);
    if model.ai == Some(id) || col.nullable {
        return Err(DdlError::state(
            &col.name,
            "an auto-increment or nullable column cannot be the optimistic-lock column",
        ));
    }
    if model.occ.is_some() {
        return Err(DdlError::state(
            &col.name,
            "an optimistic-lock column already exists",
        ));
    }
    if !col.host.is_integer() {
        return Err(DdlError::state(
            &col.name,
            "the optimistic-lock column must be an integer type",
        ));
    }

    let value = match args.len() {
        0 => true,
        1 => parse_bool("occ", &col.name, &args[0])?,
        n => return Err(DdlError::arity("occ", &col.name, "0 or 1", n)),
    };
    if value {
        model.occ = Some(id);
    }
    Ok(())
}

/// Apply table-level annotations from the record's metadata string. `name`
/// renames the table, `check` registers a check constraint, every other key
/// is stored verbatim in `meta`.
fn apply_meta(model: &mut Model, meta: &str) -> DdlResult<()> {
    for (key, args) in tags::parse(meta)? {
        match key.as_str() {
            "name" => {
                if args.len() != 1 {
                    return Err(DdlError::arity("name", &model.name, "1", args.len()));
                }
                model.name = args[0].clone();
            }
            "check" => {
                if args.len() != 2 {
                    return Err(DdlError::arity("check", &model.name, "2", args.len()));
                }
                model.register_constraint(&args[0], ConstraintKind::Check)?;
                model.checks.insert(args[0].clone(), args[1].clone());
            }
            _ => {
                model.meta.insert(key, args);
            }
        }
    }
    Ok(())
}
