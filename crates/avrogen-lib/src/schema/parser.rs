//! Avro JSON parser.
//!
//! Parsing is a single recursive walk over the JSON value:
//! 1. Type names resolve to primitives or to named types visible in the
//!    namespace (or currently being defined, for recursive records)
//! 2. Named types are registered in the namespace as soon as their own
//!    definition completes, so a later failure in the same document can leave
//!    registrations behind; the resolver rolls those back

use std::ops::Range;

use avrogen_core::{FullName, NameError, is_valid_name};
use serde_json::{Map, Value};

use super::error::ParseError;
use super::types::{EnumSchema, Field, FixedSchema, LogicalType, RecordSchema, Schema};
use crate::namespace::{Namespace, RegisterError};
use crate::resolve::SchemaParser;

type Result<T> = std::result::Result<T, ParseError>;

/// Parser for Avro JSON schema documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct AvroParser;

impl AvroParser {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaParser for AvroParser {
    type Output = Schema;
    type Error = ParseError;

    fn parse(&self, content: &str, namespace: &mut Namespace) -> Result<Schema> {
        let json: Value =
            serde_json::from_str(content).map_err(|e| ParseError::json(content, &e))?;

        let mut cx = Context {
            source: content,
            namespace,
            defining: Vec::new(),
        };
        cx.parse_schema(&json, None)
    }
}

struct Context<'s, 'n> {
    source: &'s str,
    namespace: &'n mut Namespace,
    /// Named types whose definition is still open.
    defining: Vec<FullName>,
}

impl Context<'_, '_> {
    fn parse_schema(&mut self, value: &Value, enclosing: Option<&str>) -> Result<Schema> {
        match value {
            Value::String(name) => self.parse_type_name(name, enclosing),
            Value::Array(branches) => self.parse_union(branches, enclosing),
            Value::Object(map) => self.parse_complex(map, enclosing),
            other => Err(self.invalid(
                format!("expected a type name, union or object, found `{other}`"),
                None,
            )),
        }
    }

    fn parse_type_name(&self, name: &str, enclosing: Option<&str>) -> Result<Schema> {
        if let Some(primitive) = primitive(name) {
            return Ok(primitive);
        }
        self.resolve_reference(name, enclosing)
    }

    /// Dotted names are looked up as written; simple names in the enclosing
    /// namespace first, then in the null namespace.
    fn resolve_reference(&self, raw: &str, enclosing: Option<&str>) -> Result<Schema> {
        let span = self.find_quoted(raw);
        let full = FullName::new(raw, enclosing).map_err(|source| ParseError::InvalidName {
            source,
            span: span.clone(),
        })?;

        let mut candidates = vec![full];
        if !raw.contains('.') && enclosing.is_some() {
            candidates.extend(FullName::new(raw, None).ok());
        }

        candidates
            .into_iter()
            .find(|name| self.is_visible(name))
            .map(Schema::Ref)
            .ok_or_else(|| ParseError::UnknownType {
                name: raw.to_owned(),
                span,
            })
    }

    fn is_visible(&self, name: &FullName) -> bool {
        self.namespace.contains(name) || self.defining.contains(name)
    }

    fn parse_union(&mut self, branches: &[Value], enclosing: Option<&str>) -> Result<Schema> {
        if branches.is_empty() {
            return Err(self.invalid("union must have at least one branch", None));
        }

        let mut parsed: Vec<Schema> = Vec::with_capacity(branches.len());
        let mut keys: Vec<String> = Vec::with_capacity(branches.len());
        for branch in branches {
            let schema = self.parse_schema(branch, enclosing)?;
            if matches!(schema, Schema::Union(_)) {
                return Err(self.invalid("unions may not immediately contain other unions", None));
            }

            let key = union_key(&schema);
            if keys.contains(&key) {
                return Err(self.invalid(
                    format!("union contains `{key}` more than once"),
                    self.find_quoted(&key),
                ));
            }
            keys.push(key);
            parsed.push(schema);
        }
        Ok(Schema::Union(parsed))
    }

    fn parse_complex(&mut self, map: &Map<String, Value>, enclosing: Option<&str>) -> Result<Schema> {
        let Some(ty) = map.get("type") else {
            return Err(self.invalid("schema object is missing `type`", None));
        };

        let ty = match ty {
            Value::String(ty) => ty.as_str(),
            nested @ (Value::Object(_) | Value::Array(_)) => {
                return self.parse_schema(nested, enclosing);
            }
            other => {
                return Err(self.invalid(format!("`type` must be a string, found `{other}`"), None));
            }
        };

        match ty {
            "record" | "error" => self.parse_record(map, enclosing),
            "enum" => self.parse_enum(map, enclosing),
            "fixed" => {
                let fixed = self.parse_fixed(map, enclosing)?;
                Ok(self.with_logical(map, fixed))
            }
            "array" => {
                let items = self.required(map, "items", "array")?;
                let items = self.parse_schema(items, enclosing)?;
                Ok(Schema::Array(Box::new(items)))
            }
            "map" => {
                let values = self.required(map, "values", "map")?;
                let values = self.parse_schema(values, enclosing)?;
                Ok(Schema::Map(Box::new(values)))
            }
            other => {
                let base = self.parse_type_name(other, enclosing)?;
                Ok(self.with_logical(map, base))
            }
        }
    }

    fn parse_record(&mut self, map: &Map<String, Value>, enclosing: Option<&str>) -> Result<Schema> {
        let name = self.full_name(map, enclosing)?;
        self.begin_named(&name)?;

        let Some(Value::Array(raw_fields)) = map.get("fields") else {
            return Err(self.invalid(
                format!("record `{name}` is missing a `fields` array"),
                self.find_quoted(name.name()),
            ));
        };

        self.defining.push(name.clone());
        let fields = self.parse_fields(raw_fields, name.namespace());
        self.defining.pop();
        let fields = fields?;

        let aliases = self.aliases(map, name.namespace())?;
        self.register(Schema::Record(RecordSchema {
            doc: doc(map),
            aliases,
            fields,
            name,
        }))
    }

    fn parse_fields(&mut self, raw: &[Value], namespace: Option<&str>) -> Result<Vec<Field>> {
        let mut fields: Vec<Field> = Vec::with_capacity(raw.len());
        for value in raw {
            let Value::Object(map) = value else {
                return Err(self.invalid("record fields must be objects", None));
            };

            let name = self.required_str(map, "name", "field")?;
            if !is_valid_name(name) {
                return Err(ParseError::InvalidName {
                    source: NameError::InvalidName(name.to_owned()),
                    span: self.find_quoted(name),
                });
            }
            if fields.iter().any(|f| f.name == name) {
                return Err(self.invalid(
                    format!("field `{name}` is declared more than once"),
                    self.find_quoted(name),
                ));
            }

            let ty = self.required(map, "type", "field")?;
            let schema = self.parse_schema(ty, namespace)?;

            fields.push(Field {
                name: name.to_owned(),
                doc: doc(map),
                schema,
                default: map.get("default").cloned(),
            });
        }
        Ok(fields)
    }

    fn parse_enum(&mut self, map: &Map<String, Value>, enclosing: Option<&str>) -> Result<Schema> {
        let name = self.full_name(map, enclosing)?;
        self.begin_named(&name)?;

        let Some(Value::Array(raw_symbols)) = map.get("symbols") else {
            return Err(self.invalid(
                format!("enum `{name}` is missing a `symbols` array"),
                self.find_quoted(name.name()),
            ));
        };

        let mut symbols: Vec<String> = Vec::with_capacity(raw_symbols.len());
        for symbol in raw_symbols {
            let Some(symbol) = symbol.as_str() else {
                return Err(self.invalid(format!("enum `{name}` symbols must be strings"), None));
            };
            if !is_valid_name(symbol) {
                return Err(ParseError::InvalidName {
                    source: NameError::InvalidName(symbol.to_owned()),
                    span: self.find_quoted(symbol),
                });
            }
            if symbols.iter().any(|s| s == symbol) {
                return Err(self.invalid(
                    format!("enum `{name}` declares `{symbol}` more than once"),
                    self.find_quoted(symbol),
                ));
            }
            symbols.push(symbol.to_owned());
        }

        let default = match map.get("default") {
            None | Some(Value::Null) => None,
            Some(Value::String(d)) if symbols.contains(d) => Some(d.clone()),
            Some(other) => {
                return Err(self.invalid(
                    format!("enum `{name}` default `{other}` is not one of its symbols"),
                    None,
                ));
            }
        };

        let aliases = self.aliases(map, name.namespace())?;
        self.register(Schema::Enum(EnumSchema {
            doc: doc(map),
            aliases,
            symbols,
            default,
            name,
        }))
    }

    fn parse_fixed(&mut self, map: &Map<String, Value>, enclosing: Option<&str>) -> Result<Schema> {
        let name = self.full_name(map, enclosing)?;
        self.begin_named(&name)?;

        let Some(size) = map.get("size").and_then(Value::as_u64) else {
            return Err(self.invalid(
                format!("fixed `{name}` needs a non-negative integer `size`"),
                self.find_quoted(name.name()),
            ));
        };

        let aliases = self.aliases(map, name.namespace())?;
        self.register(Schema::Fixed(FixedSchema {
            aliases,
            size: size as usize,
            name,
        }))
    }

    /// Wraps `base` in its `logicalType`. Unknown logical types, and ones that
    /// do not fit the underlying type, leave `base` unchanged.
    fn with_logical(&self, map: &Map<String, Value>, base: Schema) -> Schema {
        let Some(logical) = map.get("logicalType").and_then(Value::as_str) else {
            return base;
        };

        let logical = match (logical, &base) {
            ("date", Schema::Int) => LogicalType::Date,
            ("time-millis", Schema::Int) => LogicalType::TimeMillis,
            ("time-micros", Schema::Long) => LogicalType::TimeMicros,
            ("timestamp-millis", Schema::Long) => LogicalType::TimestampMillis,
            ("timestamp-micros", Schema::Long) => LogicalType::TimestampMicros,
            ("uuid", Schema::String) => LogicalType::Uuid,
            ("decimal", Schema::Bytes | Schema::Fixed(_)) => match decimal(map) {
                Some(decimal) => decimal,
                None => return base,
            },
            _ => return base,
        };
        Schema::Logical(logical, Box::new(base))
    }

    fn full_name(&self, map: &Map<String, Value>, enclosing: Option<&str>) -> Result<FullName> {
        let name = self.required_str(map, "name", "named type")?;
        let namespace = match map.get("namespace") {
            None | Some(Value::Null) => enclosing,
            Some(Value::String(ns)) => Some(ns.as_str()),
            Some(other) => {
                return Err(self.invalid(
                    format!("`namespace` must be a string, found `{other}`"),
                    None,
                ));
            }
        };

        FullName::new(name, namespace).map_err(|source| ParseError::InvalidName {
            source,
            span: self.find_quoted(name),
        })
    }

    fn aliases(&self, map: &Map<String, Value>, namespace: Option<&str>) -> Result<Vec<FullName>> {
        let Some(raw) = map.get("aliases") else {
            return Ok(Vec::new());
        };
        let Value::Array(raw) = raw else {
            return Err(self.invalid("`aliases` must be an array of names", None));
        };

        raw.iter()
            .map(|alias| {
                let alias = alias
                    .as_str()
                    .ok_or_else(|| self.invalid("`aliases` must be an array of names", None))?;
                FullName::new(alias, namespace).map_err(|source| ParseError::InvalidName {
                    source,
                    span: self.find_quoted(alias),
                })
            })
            .collect()
    }

    fn begin_named(&self, name: &FullName) -> Result<()> {
        if self.is_visible(name) {
            return Err(ParseError::DuplicateName {
                name: name.clone(),
                span: self.find_quoted(name.name()),
            });
        }
        Ok(())
    }

    fn register(&mut self, schema: Schema) -> Result<Schema> {
        match self.namespace.register(schema.clone()) {
            Ok(()) => Ok(schema),
            Err(RegisterError::AlreadyDefined(name)) => Err(ParseError::DuplicateName {
                span: self.find_quoted(name.name()),
                name,
            }),
            Err(err @ RegisterError::Unnamed(_)) => Err(self.invalid(err.to_string(), None)),
        }
    }

    fn required<'m>(&self, map: &'m Map<String, Value>, key: &str, what: &str) -> Result<&'m Value> {
        map.get(key)
            .ok_or_else(|| self.invalid(format!("{what} is missing `{key}`"), None))
    }

    fn required_str<'m>(&self, map: &'m Map<String, Value>, key: &str, what: &str) -> Result<&'m str> {
        self.required(map, key, what)?
            .as_str()
            .ok_or_else(|| self.invalid(format!("{what} `{key}` must be a string"), None))
    }

    /// Span of the first `"text"` in the source, excluding the quotes.
    fn find_quoted(&self, text: &str) -> Option<Range<usize>> {
        let needle = format!("\"{text}\"");
        self.source
            .find(&needle)
            .map(|start| start + 1..start + 1 + text.len())
    }

    fn invalid(&self, message: impl Into<String>, span: Option<Range<usize>>) -> ParseError {
        ParseError::InvalidSchema {
            message: message.into(),
            span,
        }
    }
}

fn primitive(name: &str) -> Option<Schema> {
    Some(match name {
        "null" => Schema::Null,
        "boolean" => Schema::Boolean,
        "int" => Schema::Int,
        "long" => Schema::Long,
        "float" => Schema::Float,
        "double" => Schema::Double,
        "bytes" => Schema::Bytes,
        "string" => Schema::String,
        _ => return None,
    })
}

fn doc(map: &Map<String, Value>) -> Option<String> {
    map.get("doc").and_then(Value::as_str).map(str::to_owned)
}

fn decimal(map: &Map<String, Value>) -> Option<LogicalType> {
    let precision = map.get("precision").and_then(Value::as_u64).filter(|&p| p > 0)?;
    let scale = match map.get("scale") {
        None => 0,
        Some(scale) => scale.as_u64()?,
    };
    if scale > precision {
        return None;
    }
    Some(LogicalType::Decimal {
        precision: u32::try_from(precision).ok()?,
        scale: u32::try_from(scale).ok()?,
    })
}

/// Union branches must be distinct by this key: full name for named types,
/// the underlying type keyword otherwise.
fn union_key(schema: &Schema) -> String {
    match schema {
        Schema::Ref(name) => name.to_string(),
        other => match other.name() {
            Some(name) => name.to_string(),
            None => other.kind().to_owned(),
        },
    }
}
