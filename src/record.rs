//! Record descriptors: the boundary between the embedding engine and the
//! schema model builder.
//!
//! Rust has no runtime reflection, so a record type describes itself through
//! the [`Record`] trait: a [`Descriptor`] listing its fields in declaration
//! order, each with a semantic [`HostType`] category and an optional
//! annotation string. Descriptors are typically written by hand or emitted
//! by code generation; the builder only ever sees this interface.

use serde::Serialize;

/// Semantic category of a field's host value type.
///
/// Dialects map these categories onto engine column types; concrete Rust
/// types are adapted into the closed set at the boundary via [`HostTyped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HostType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// Textual scalar.
    Str,
    /// Sequence of single-byte elements; rendered like text.
    Bytes,
    /// Sequence of 32-bit characters; rendered like text.
    Chars,
    /// Sequence of any other element type, by element type name. Never
    /// mappable; dialects reject it.
    Seq(&'static str),
    /// Boxed nullable boolean.
    NullBool,
    /// Boxed nullable 64-bit integer.
    NullI64,
    /// Boxed nullable double.
    NullF64,
    /// Boxed nullable string.
    NullStr,
    /// Timestamp-like wrapper.
    DateTime,
    /// Anything else, by type name. Never mappable.
    Other(&'static str),
}

impl HostType {
    /// Whether this category is a plain (non-wrapper) integer, signed or
    /// unsigned. Auto-increment and optimistic-lock columns require one.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
        )
    }
}

impl std::fmt::Display for HostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Str => "String",
            Self::Bytes => "Vec<u8>",
            Self::Chars => "Vec<char>",
            Self::Seq(elem) => return write!(f, "Vec<{elem}>"),
            Self::NullBool => "Option<bool>",
            Self::NullI64 => "Option<i64>",
            Self::NullF64 => "Option<f64>",
            Self::NullStr => "Option<String>",
            Self::DateTime => "DateTime",
            Self::Other(name) => name,
        };
        f.write_str(name)
    }
}

/// Adapter from a concrete Rust type to its [`HostType`] category.
pub trait HostTyped {
    const HOST_TYPE: HostType;
}

macro_rules! host_typed {
    ($($ty:ty => $host:expr,)*) => {
        $(impl HostTyped for $ty {
            const HOST_TYPE: HostType = $host;
        })*
    };
}

host_typed! {
    bool => HostType::Bool,
    i8 => HostType::I8,
    i16 => HostType::I16,
    i32 => HostType::I32,
    i64 => HostType::I64,
    u8 => HostType::U8,
    u16 => HostType::U16,
    u32 => HostType::U32,
    u64 => HostType::U64,
    f32 => HostType::F32,
    f64 => HostType::F64,
    String => HostType::Str,
    &'static str => HostType::Str,
    Vec<u8> => HostType::Bytes,
    Vec<char> => HostType::Chars,
    Option<bool> => HostType::NullBool,
    Option<i64> => HostType::NullI64,
    Option<f64> => HostType::NullF64,
    Option<String> => HostType::NullStr,
    chrono::NaiveDateTime => HostType::DateTime,
    chrono::DateTime<chrono::Utc> => HostType::DateTime,
}

/// A type that can describe itself as a database record.
///
/// `meta` optionally supplies a table-level annotation in the same clause
/// syntax as field annotations (`name(users);engine(innodb)`).
pub trait Record: 'static {
    fn descriptor() -> Descriptor;

    fn meta() -> Option<&'static str> {
        None
    }
}

/// Description of one record type.
#[derive(Debug, Clone)]
pub struct Descriptor {
    /// Type name; becomes the table name unless renamed by a `name` meta
    /// clause.
    pub name: &'static str,
    pub kind: RecordKind,
}

impl Descriptor {
    /// Create a struct-like record descriptor with no fields yet.
    pub fn record(name: &'static str) -> Self {
        Self {
            name,
            kind: RecordKind::Struct(Vec::new()),
        }
    }

    /// Create a descriptor for a non-record type. The builder rejects these
    /// with `DdlError::InvalidKind`.
    pub fn scalar(name: &'static str) -> Self {
        Self {
            name,
            kind: RecordKind::Scalar(name),
        }
    }

    /// Append a field. Fields must be added in declaration order.
    pub fn field(mut self, field: FieldDef) -> Self {
        if let RecordKind::Struct(fields) = &mut self.kind {
            fields.push(field);
        }
        self
    }
}

/// Underlying shape of a described type.
#[derive(Debug, Clone)]
pub enum RecordKind {
    /// A composite record with named fields.
    Struct(Vec<FieldDef>),
    /// Any non-composite type, by name.
    Scalar(&'static str),
}

/// One field of a record.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Raw annotation string, if any. The literal `-` marks the field as
    /// skipped.
    pub tag: Option<&'static str>,
    /// Unexported fields are skipped by the builder.
    pub exported: bool,
}

impl FieldDef {
    /// Create a column field with an explicit host type category.
    pub fn new(name: &'static str, host: HostType) -> Self {
        Self {
            name,
            kind: FieldKind::Column(host),
            tag: None,
            exported: true,
        }
    }

    /// Create a column field whose category is derived from a Rust type.
    pub fn of<T: HostTyped>(name: &'static str) -> Self {
        Self::new(name, T::HOST_TYPE)
    }

    /// Create an embedded (anonymous) sub-record whose columns flatten into
    /// the owning model.
    pub fn embedded(name: &'static str, descriptor: Descriptor) -> Self {
        Self {
            name,
            kind: FieldKind::Embedded(descriptor),
            tag: None,
            exported: true,
        }
    }

    /// Attach an annotation string.
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Mark the field unexported; the builder will skip it.
    pub fn unexported(mut self) -> Self {
        self.exported = false;
        self
    }
}

/// What a field contributes to the model.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// A plain column of the given host type category.
    Column(HostType),
    /// An embedded sub-record, flattened recursively.
    Embedded(Descriptor),
}
