//! Resolved Avro schema model.

use avrogen_core::FullName;
use serde_json::Value;

/// A fully resolved Avro schema.
///
/// Named types appear inline where they are defined and as [`Schema::Ref`]
/// everywhere else, exactly as in Avro JSON.
#[derive(Clone, Debug, PartialEq)]
pub enum Schema {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    /// A logical type annotating an underlying schema.
    Logical(LogicalType, Box<Schema>),
    Array(Box<Schema>),
    Map(Box<Schema>),
    Union(Vec<Schema>),
    Record(RecordSchema),
    Enum(EnumSchema),
    Fixed(FixedSchema),
    /// Reference to a named type registered in the namespace.
    Ref(FullName),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalType {
    Date,
    TimeMillis,
    TimeMicros,
    TimestampMillis,
    TimestampMicros,
    Uuid,
    Decimal { precision: u32, scale: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordSchema {
    pub name: FullName,
    pub doc: Option<String>,
    pub aliases: Vec<FullName>,
    pub fields: Vec<Field>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub doc: Option<String>,
    pub schema: Schema,
    pub default: Option<Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumSchema {
    pub name: FullName,
    pub doc: Option<String>,
    pub aliases: Vec<FullName>,
    pub symbols: Vec<String>,
    pub default: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FixedSchema {
    pub name: FullName,
    pub aliases: Vec<FullName>,
    pub size: usize,
}

impl Schema {
    /// Name of a record, enum or fixed definition.
    pub fn name(&self) -> Option<&FullName> {
        match self {
            Schema::Record(r) => Some(&r.name),
            Schema::Enum(e) => Some(&e.name),
            Schema::Fixed(f) => Some(&f.name),
            _ => None,
        }
    }

    pub fn is_named(&self) -> bool {
        self.name().is_some()
    }

    /// Avro type keyword, used in listings and messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::Null => "null",
            Schema::Boolean => "boolean",
            Schema::Int => "int",
            Schema::Long => "long",
            Schema::Float => "float",
            Schema::Double => "double",
            Schema::Bytes => "bytes",
            Schema::String => "string",
            Schema::Logical(_, inner) => inner.kind(),
            Schema::Array(_) => "array",
            Schema::Map(_) => "map",
            Schema::Union(_) => "union",
            Schema::Record(_) => "record",
            Schema::Enum(_) => "enum",
            Schema::Fixed(_) => "fixed",
            Schema::Ref(_) => "ref",
        }
    }

    /// Named types defined inline in this schema, outermost first.
    pub fn named_definitions(&self) -> Vec<&Schema> {
        let mut out = Vec::new();
        self.collect_definitions(&mut out);
        out
    }

    fn collect_definitions<'a>(&'a self, out: &mut Vec<&'a Schema>) {
        match self {
            Schema::Record(r) => {
                out.push(self);
                for field in &r.fields {
                    field.schema.collect_definitions(out);
                }
            }
            Schema::Enum(_) | Schema::Fixed(_) => out.push(self),
            Schema::Logical(_, inner) | Schema::Array(inner) | Schema::Map(inner) => {
                inner.collect_definitions(out)
            }
            Schema::Union(branches) => {
                for branch in branches {
                    branch.collect_definitions(out);
                }
            }
            _ => {}
        }
    }

    /// For `["null", T]` (either order) returns `T`.
    pub fn as_nullable(&self) -> Option<&Schema> {
        let Schema::Union(branches) = self else {
            return None;
        };
        match branches.as_slice() {
            [Schema::Null, other] | [other, Schema::Null] => Some(other),
            _ => None,
        }
    }
}

impl LogicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Date => "date",
            LogicalType::TimeMillis => "time-millis",
            LogicalType::TimeMicros => "time-micros",
            LogicalType::TimestampMillis => "timestamp-millis",
            LogicalType::TimestampMicros => "timestamp-micros",
            LogicalType::Uuid => "uuid",
            LogicalType::Decimal { .. } => "decimal",
        }
    }
}
